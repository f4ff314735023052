//! 命令行入口：检查单个 HTML 文件并输出得分和问题列表

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use wcag_checker::core::{analyze_bytes, AnalysisResult, AnalyzerOptions};
use wcag_checker::enhancer::{EnhancerConfig, GeminiClient, TextGenerator};
use wcag_checker::env::core::Parser as ParserVar;
use wcag_checker::env::{generate_env_docs, EnvConfig, EnvVar};
use wcag_checker::parsers::ParserBackend;
use wcag_checker::rules::LabelPolicy;

/// WCAG accessibility checker for HTML documents
#[derive(Parser)]
#[command(name = "wcag-checker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// HTML file to check, or `-` to read from stdin
    #[arg(required_unless_present = "env_docs")]
    input: Option<PathBuf>,

    /// Print the environment variable reference and exit
    #[arg(long)]
    env_docs: bool,

    /// Parser backend (tree or query) [env: WCAG_PARSER]
    #[arg(short, long)]
    parser: Option<ParserBackend>,

    /// Form label policy (either or both) [env: WCAG_LABEL_POLICY]
    #[arg(long)]
    label_policy: Option<LabelPolicy>,

    /// Character encoding of the input (defaults to UTF-8)
    #[arg(short, long)]
    encoding: Option<String>,

    /// Rewrite issues through the configured text-generation service
    #[arg(long)]
    enhance: bool,

    /// Output format
    #[arg(short, long, default_value = "json")]
    format: FormatArg,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Pretty-printed JSON
    Json,
    /// Human-readable text
    Text,
}

fn init_logging(level: &str, quiet: bool, no_color: bool) {
    let level = if quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::from_str(level).unwrap_or(tracing::Level::INFO)
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &Path) -> io::Result<Vec<u8>> {
    if input.as_os_str() == "-" {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        Ok(data)
    } else {
        fs::read(input)
    }
}

fn render_text(result: &AnalysisResult) -> String {
    let mut out = format!("Accessibility score: {:.2}\n", result.accessibility_score);
    if result.issues.is_empty() {
        out.push_str("No issues found.\n");
        return out;
    }

    out.push_str(&format!("Issues ({}):\n", result.issues.len()));
    for issue in &result.issues {
        out.push_str(&format!("  [{}] <{}> {}\n", issue.severity, issue.element, issue.issue));
        if let Some(suggestion) = &issue.suggestion {
            out.push_str(&format!("      {}\n", suggestion));
        }
    }
    out
}

fn run(cli: Cli, env: EnvConfig) -> Result<(), Box<dyn Error>> {
    let options = AnalyzerOptions {
        parser: cli.parser.unwrap_or(env.parser),
        label_policy: cli.label_policy.unwrap_or(env.label_policy),
    };

    let generator: Option<GeminiClient> = if cli.enhance || env.enhancer_enabled {
        Some(GeminiClient::new(EnhancerConfig::from_env()?))
    } else {
        None
    };

    let Some(input) = cli.input.as_deref() else {
        return Err("no input given".into());
    };
    let data = read_input(input)?;
    let result = analyze_bytes(
        &data,
        cli.encoding.as_deref(),
        &options,
        generator.as_ref().map(|client| client as &dyn TextGenerator),
    )?;

    match cli.format {
        FormatArg::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        FormatArg::Text => print!("{}", render_text(&result)),
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.env_docs {
        print!("{}", generate_env_docs());
        return ExitCode::SUCCESS;
    }

    let env = match EnvConfig::from_env() {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&env.log_level, cli.quiet, env.no_color);
    tracing::debug!("Default parser from {}: {}", ParserVar::NAME, env.parser);

    match run(cli, env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
