//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `seo_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Rendering and saving reports
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use seo_audit::initialization::init_logger_with;
use seo_audit::performance::Strategy;
use seo_audit::report::{render, render_bulk_csv, render_meta_csv};
use seo_audit::run::{read_url_list, run_bulk, BulkCheck};
use seo_audit::{Config, LogFormat, LogLevel, OutputFormat, SeoAuditor};

/// On-page SEO audit toolkit.
#[derive(Debug, Parser)]
#[command(name = "seo_audit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    options: GlobalOptions,
}

#[derive(Debug, Args)]
struct GlobalOptions {
    /// Report format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Json, global = true)]
    output: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(long, global = true)]
    save: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = seo_audit::config::DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = seo_audit::config::DEFAULT_USER_AGENT, global = true)]
    user_agent: String,

    /// Do not follow HTTP redirects
    #[arg(long, global = true)]
    no_follow_redirects: bool,

    /// PageSpeed Insights API key
    #[arg(long, env = "PAGESPEED_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Schema and meta audit of one page
    Audit {
        url: String,
        /// Also run a PageSpeed Insights analysis
        #[arg(long)]
        performance: bool,
    },
    /// Structured data audit
    Schema { url: String },
    /// Meta tag and content audit
    Meta { url: String },
    /// Mobile-friendliness check, fetched with a phone user agent
    Mobile { url: String },
    /// XML sitemap analysis
    Sitemap {
        /// Sitemap URL, or a domain with --find
        url: String,
        /// Discover sitemaps for the domain instead of analysing one
        #[arg(long)]
        find: bool,
        /// HEAD-check the first URLs of the sitemap
        #[arg(long)]
        check_urls: bool,
    },
    /// Core Web Vitals via PageSpeed Insights
    Performance {
        url: String,
        #[arg(long, value_enum, default_value_t = Strategy::Mobile)]
        strategy: Strategy,
    },
    /// Audit every URL listed in a file
    Bulk {
        file: PathBuf,
        /// Checks to run for each URL
        #[arg(long, value_enum, value_delimiter = ',', default_values_t = [BulkCheck::Schema, BulkCheck::Meta])]
        checks: Vec<BulkCheck>,
    },
}

impl GlobalOptions {
    fn to_config(&self) -> Config {
        Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
            follow_redirects: !self.no_follow_redirects,
            api_key: self.api_key.clone(),
            ..Default::default()
        }
    }
}

/// Rendered report plus whether the audited target failed.
struct Outcome {
    report: String,
    failed: bool,
}

async fn execute(command: Command, format: OutputFormat, auditor: &SeoAuditor) -> Result<Outcome> {
    let outcome = match command {
        Command::Audit { url, performance } => {
            let audit = auditor.audit(&url, performance).await;
            let report = match format {
                OutputFormat::Csv => render_meta_csv(std::slice::from_ref(&audit.meta))?,
                _ => render(&audit, format)?,
            };
            Outcome {
                report,
                failed: audit.is_error(),
            }
        }
        Command::Schema { url } => {
            let result = auditor.parse(&url).await;
            Outcome {
                report: render(&result, format)?,
                failed: result.is_error(),
            }
        }
        Command::Meta { url } => {
            let result = auditor.extract(&url).await;
            let report = match format {
                OutputFormat::Csv => render_meta_csv(std::slice::from_ref(&result))?,
                _ => render(&result, format)?,
            };
            Outcome {
                report,
                failed: result.is_error(),
            }
        }
        Command::Mobile { url } => {
            let result = auditor.mobile(&url).await;
            Outcome {
                report: render(&result, format)?,
                failed: result.is_error(),
            }
        }
        Command::Sitemap {
            url,
            find: true,
            ..
        } => {
            let found = auditor.find_sitemaps(&url).await;
            let report = match format {
                OutputFormat::Json => seo_audit::report::render_json(&found)?,
                _ if found.is_empty() => "No sitemaps found".to_string(),
                _ => found.join("\n"),
            };
            Outcome {
                report,
                failed: false,
            }
        }
        Command::Sitemap {
            url, check_urls, ..
        } => {
            let result = auditor.analyze_sitemap(&url, check_urls).await;
            Outcome {
                report: render(&result, format)?,
                failed: result.is_error(),
            }
        }
        Command::Performance { url, strategy } => {
            let result = auditor.performance(&url, strategy).await;
            Outcome {
                report: render(&result, format)?,
                failed: result.is_error(),
            }
        }
        Command::Bulk { file, checks } => {
            let urls = read_url_list(&file).await?;
            let report = run_bulk(auditor, &urls, &checks, auditor.config().bulk_delay).await;
            let rendered = match format {
                OutputFormat::Csv => render_bulk_csv(&report.entries)?,
                _ => render(&report, format)?,
            };
            // One bad URL does not fail a batch
            Outcome {
                report: rendered,
                failed: false,
            }
        }
    };
    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting PAGESPEED_API_KEY in .env without exporting it manually
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.options.to_config();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let auditor = SeoAuditor::new(config).context("Failed to initialize HTTP client")?;

    let outcome = match execute(cli.command, cli.options.output, &auditor).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("seo_audit error: {:#}", e);
            process::exit(1);
        }
    };

    match &cli.options.save {
        Some(path) => {
            std::fs::write(path, &outcome.report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report saved to {}", path.display());
        }
        None => println!("{}", outcome.report),
    }

    if outcome.failed {
        process::exit(1);
    }
    Ok(())
}
