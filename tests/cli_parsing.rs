//! Tests for CLI value parsing.
//!
//! The binary's `Cli` type lives in main.rs and cannot be imported, so these
//! tests mirror its shape with the library's `ValueEnum` types.

use clap::Parser;
use seo_audit::config::{LogFormat, LogLevel, OutputFormat};
use seo_audit::performance::Strategy;
use seo_audit::run::BulkCheck;

#[derive(Debug, clap::Parser)]
#[command(name = "seo_audit")]
struct TestCli {
    #[command(subcommand)]
    command: TestCommand,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    output: OutputFormat,
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    log_format: LogFormat,
    #[arg(long, env = "SEO_AUDIT_TEST_API_KEY", global = true)]
    api_key: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum TestCommand {
    Performance {
        url: String,
        #[arg(long, value_enum, default_value_t = Strategy::Mobile)]
        strategy: Strategy,
    },
    Bulk {
        file: std::path::PathBuf,
        #[arg(long, value_enum, value_delimiter = ',', default_values_t = [BulkCheck::Schema, BulkCheck::Meta])]
        checks: Vec<BulkCheck>,
    },
}

#[test]
fn test_defaults() {
    let cli = TestCli::try_parse_from(["seo_audit", "performance", "https://example.com"])
        .expect("parses");
    assert_eq!(cli.output, OutputFormat::Json);
    assert!(matches!(cli.log_level, LogLevel::Info));
    assert!(matches!(cli.log_format, LogFormat::Plain));
    match cli.command {
        TestCommand::Performance { url, strategy } => {
            assert_eq!(url, "https://example.com");
            assert_eq!(strategy, Strategy::Mobile);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_global_output_after_subcommand() {
    let cli = TestCli::try_parse_from([
        "seo_audit",
        "performance",
        "https://example.com",
        "--strategy",
        "desktop",
        "--output",
        "html",
    ])
    .expect("parses");
    assert_eq!(cli.output, OutputFormat::Html);
    assert!(matches!(
        cli.command,
        TestCommand::Performance {
            strategy: Strategy::Desktop,
            ..
        }
    ));
}

#[test]
fn test_bulk_checks_list() {
    let cli = TestCli::try_parse_from([
        "seo_audit",
        "bulk",
        "urls.txt",
        "--checks",
        "meta,mobile,performance",
    ])
    .expect("parses");
    match cli.command {
        TestCommand::Bulk { checks, .. } => {
            assert_eq!(
                checks,
                vec![BulkCheck::Meta, BulkCheck::Mobile, BulkCheck::Performance]
            );
        }
        other => panic!("unexpected command {other:?}"),
    }

    let cli = TestCli::try_parse_from(["seo_audit", "bulk", "urls.txt"]).expect("parses");
    match cli.command {
        TestCommand::Bulk { checks, .. } => {
            assert_eq!(checks, vec![BulkCheck::Schema, BulkCheck::Meta]);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_invalid_output_format_rejected() {
    let err = TestCli::try_parse_from([
        "seo_audit",
        "--output",
        "xml",
        "performance",
        "https://example.com",
    ])
    .expect_err("xml is not a format");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn test_api_key_flag() {
    let cli = TestCli::try_parse_from([
        "seo_audit",
        "--api-key",
        "secret",
        "performance",
        "https://example.com",
    ])
    .expect("parses");
    assert_eq!(cli.api_key.as_deref(), Some("secret"));
}
