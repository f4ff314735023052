//! Web 服务器主程序入口

#[cfg(feature = "web")]
use std::sync::Arc;

#[cfg(feature = "web")]
use wcag_checker::core::AnalyzerOptions;
#[cfg(feature = "web")]
use wcag_checker::enhancer::{EnhancerConfig, GeminiClient, TextGenerator};
#[cfg(feature = "web")]
use wcag_checker::env::EnvConfig;
#[cfg(feature = "web")]
use wcag_checker::web::{WebConfig, WebServer};

#[cfg(feature = "web")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 先加载 .env，再读取环境变量配置；文件不存在时忽略
    dotenv::dotenv().ok();

    let env_config = EnvConfig::from_env()?;
    env_config.validate()?;
    init_logging(&env_config);
    env_config.log_summary();

    let mut web_config = WebConfig::from_env()?;

    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                let Some(addr) = args.get(i + 1) else {
                    eprintln!("Error: --bind requires an address");
                    std::process::exit(1);
                };
                web_config.bind_addr = addr.clone();
                i += 2;
            }
            "--port" | "-p" => {
                let Some(port) = args.get(i + 1).and_then(|p| p.parse().ok()) else {
                    eprintln!("Error: --port requires a valid port number");
                    std::process::exit(1);
                };
                web_config.port = port;
                i += 2;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }
    web_config.validate()?;

    let options = AnalyzerOptions {
        parser: env_config.parser,
        label_policy: env_config.label_policy,
    };

    let enhancer: Option<Arc<dyn TextGenerator>> = if env_config.enhancer_enabled {
        Some(Arc::new(GeminiClient::new(EnhancerConfig::from_env()?)))
    } else {
        None
    };

    // 启动 Web 服务器
    let server = WebServer::new(web_config, options, enhancer);
    server.start().await?;

    Ok(())
}

#[cfg(feature = "web")]
fn init_logging(config: &EnvConfig) {
    let level = config
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(!config.no_color)
        .with_target(false)
        .init();
}

#[cfg(feature = "web")]
fn print_help() {
    println!("WCAG Checker Web Server");
    println!();
    println!("USAGE:");
    println!("    wcag-checker-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>     Bind address [env: WCAG_WEB_BIND_ADDRESS, default: 127.0.0.1]");
    println!("    -p, --port <PORT>        Port number [env: WCAG_WEB_PORT, default: 7080]");
    println!("    -h, --help               Print help information");
    println!();
    println!("ENDPOINTS:");
    println!("    POST /api/check          multipart upload, field `html_file`");
}

#[cfg(not(feature = "web"))]
fn main() {
    eprintln!("Error: Web feature not enabled. Please compile with --features web");
    std::process::exit(1);
}
