// 集成测试公共模块
//
// 提供共享的 HTML 样例和断言辅助

#![allow(dead_code)]

use wcag_checker::rules::Issue;

/// 结构完整的页面：有 viewport、带 alt 的图片、带 id 的输入框、一个 h1 和表单
pub const VALID_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Contact</title>
</head>
<body>
    <h1>Contact us</h1>
    <form>
        <label for="name">Name</label>
        <input type="text" id="name">
    </form>
    <img src="logo.png" alt="Company logo">
</body>
</html>"#;

pub const EMPTY_PAGE: &str = "<html></html>";

pub const IMAGE_WITHOUT_ALT: &str = r#"<!DOCTYPE html>
<html>
<head><meta name="viewport" content="width=device-width"></head>
<body><img src="x.jpg"></body>
</html>"#;

pub const SKIPPED_HEADING: &str = r#"<!DOCTYPE html>
<html>
<head><meta name="viewport" content="width=device-width"></head>
<body><h1>Title</h1><h3>Details</h3></body>
</html>"#;

pub const ORDERED_HEADINGS: &str = r#"<!DOCTYPE html>
<html>
<head><meta name="viewport" content="width=device-width"></head>
<body><h1>Title</h1><h2>Section</h2><h3>Details</h3></body>
</html>"#;

pub const TEMPLATE_CONTENT: &str = r#"<!DOCTYPE html>
<html>
<head><meta name="viewport" content="width=device-width"></head>
<body>
    <a href="/" tabindex="0">Home</a>
    <template><img src="x.png"></template>
</body>
</html>"#;

/// `depth` nested `div`s with nothing else in them
pub fn deeply_nested(depth: usize) -> String {
    format!("{}{}", "<div>".repeat(depth), "</div>".repeat(depth))
}

/// Issues whose description equals `description`
pub fn issues_named<'a>(issues: &'a [Issue], description: &str) -> Vec<&'a Issue> {
    issues
        .iter()
        .filter(|issue| issue.issue == description)
        .collect()
}
