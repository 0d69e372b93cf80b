use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use slog::{Drain, Level, Logger};
use slog_scope::{error, info};

use tanglish_end_to_end::oracle::{WebDriverSession, WebPageOracle, WebPageOracleConfig};
use tanglish_end_to_end::{Spec, SpecConfig, StdResult, suite_cases};

/// Suite args
#[derive(Parser, Debug, Clone)]
pub struct Args {
    /// Url of the W3C WebDriver remote end driving the browser
    /// (chromedriver by default).
    #[clap(long, env = "WEBDRIVER_URL", default_value = "http://localhost:9515")]
    webdriver_url: String,

    /// Url of the transliteration oracle page.
    #[clap(long, env = "ORACLE_URL", default_value = "https://tamil.changathi.com/")]
    oracle_url: String,

    /// Settling window after submission, in milliseconds.
    ///
    /// The oracle gives no completion signal: a window too short fails
    /// cases the oracle was still processing, a window too long only
    /// costs wall-clock time.
    #[clap(long, default_value_t = 2500)]
    settling_window_ms: u64,

    /// Interval between two reads of the output surface, in milliseconds.
    #[clap(long, default_value_t = 250)]
    poll_interval_ms: u64,

    /// Bounded wait for the oracle page to expose its text surfaces, in
    /// milliseconds.
    #[clap(long, default_value_t = 10_000)]
    discovery_timeout_ms: u64,

    /// Wall-clock budget for the whole suite, in seconds. Cases not
    /// started before expiry are reported as skipped.
    #[clap(long, default_value_t = 600)]
    global_budget_secs: u64,

    /// Fail a case when the settling window elapses without any output
    /// change being observed.
    #[clap(long)]
    strict_settling: bool,

    /// Only run cases whose id contains this substring.
    #[clap(long)]
    only: Option<String>,

    /// Verbosity level
    #[clap(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Verbosity level, add more v to increase"
    )]
    verbose: u8,
}

impl Args {
    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::Error,
            1 => Level::Warning,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

#[tokio::main]
async fn main() -> StdResult<()> {
    let args = Args::parse();
    let _guard = slog_scope::set_global_logger(build_logger(&args));

    let cases: Vec<_> = suite_cases()
        .into_iter()
        .filter(|case| {
            args.only
                .as_deref()
                .is_none_or(|filter| case.id.contains(filter))
        })
        .collect();
    info!("Starting suite"; "cases" => cases.len(), "oracle_url" => &args.oracle_url);

    let session = WebDriverSession::connect(&args.webdriver_url)
        .await
        .with_context(|| {
            format!(
                "Could not open a webdriver session on `{}`",
                args.webdriver_url
            )
        })?;
    let oracle = WebPageOracle::new(
        session,
        WebPageOracleConfig {
            page_url: args.oracle_url.clone(),
            discovery_timeout: Duration::from_millis(args.discovery_timeout_ms),
            settling_window: Duration::from_millis(args.settling_window_ms),
            poll_interval: Duration::from_millis(args.poll_interval_ms),
            strict_settling: args.strict_settling,
        },
    );

    let mut spec = Spec::new(
        Box::new(oracle),
        cases,
        SpecConfig {
            global_budget: Duration::from_secs(args.global_budget_secs),
        },
    );
    let report = spec.run().await;
    println!("{}", report.render());

    if report.fully_passed() {
        Ok(())
    } else {
        error!(
            "Suite did not fully pass";
            "failed" => report.failed_count(), "skipped" => report.skipped_count()
        );
        Err(anyhow::anyhow!(
            "{} case(s) failed, {} case(s) skipped",
            report.failed_count(),
            report.skipped_count()
        ))
    }
}

fn build_logger(args: &Args) -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog::LevelFilter::new(drain, args.log_level()).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(Arc::new(drain), slog::o!())
}
