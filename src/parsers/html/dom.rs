//! html5ever + rcdom 基础操作：解码、解析、元素收集和属性读取

use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// 将 HTML 字节按给定字符集解码为文本，无法识别时按 UTF-8 宽松解码
pub fn decode_html(data: &[u8], document_encoding: Option<&str>) -> String {
    match document_encoding.and_then(|label| Encoding::for_label(label.trim().as_bytes())) {
        Some(encoding) => {
            let (string, _, _) = encoding.decode(data);
            string.into_owned()
        }
        None => String::from_utf8_lossy(data).into_owned(),
    }
}

/// 将 HTML 文本转换为 DOM
pub fn html_to_dom(html: &str) -> std::io::Result<RcDom> {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
}

/// 按文档顺序收集所有元素节点，包括 `<template>` 内容
///
/// 使用显式栈遍历，嵌套深度不受线程栈大小限制。
pub fn collect_elements(node: &Handle, found: &mut Vec<Handle>) {
    let mut stack = vec![node.clone()];

    while let Some(node) = stack.pop() {
        let mut children: Vec<Handle> = node.children.borrow().iter().cloned().collect();

        if let NodeData::Element {
            ref template_contents,
            ..
        } = node.data
        {
            if let Some(contents) = template_contents.borrow().as_ref() {
                children.extend(contents.children.borrow().iter().cloned());
            }
            found.push(node.clone());
        }

        stack.extend(children.into_iter().rev());
    }
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}
