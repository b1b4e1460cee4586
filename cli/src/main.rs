//! `kidoo-cli`: inspect the content API through the same pipeline the site uses.
//!
//! `check` hits every list endpoint and reports what a page would show;
//! `list` prints one section's normalized items; `settings` prints the
//! resolved contact settings with their defaults filled in.

mod report;

use std::time::Duration;

use clap::{Parser, Subcommand};
use kidoo::api::{ApiError, ContentApi, HttpContentApi, Resource};
use kidoo::config::{API_URL_VAR, DEFAULT_API_BASE_URL};
use kidoo::content::fetcher::unwrap_payload;
use kidoo::content::section::{
    ABOUT_FEATURES, ABOUT_PAGE, BLOG, EVENTS, FAQS, GALLERY, HERO_SLIDES, HOME_STATS, PROGRAMS, TEAM, TESTIMONIALS,
    UPCOMING_EVENTS,
};
use kidoo::content::{LoadState, Normalize, Section, SettingsMap};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::report::{CheckLine, SectionReport};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown resource `{0}`; expected one of: {names}", names = report::resource_names())]
    UnknownResource(String),
    #[error("API request failed: {0}")]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{failed} of {total} endpoints failed")]
    CheckFailed { failed: usize, total: usize },
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Parser, Debug)]
#[command(name = "kidoo-cli", about = "Kidoo content API diagnostics")]
struct Cli {
    #[arg(long, env = API_URL_VAR, default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Request every list endpoint and summarize the outcome.
    Check,
    /// Print one resource through the fallback pipeline.
    List {
        resource: String,
        /// Print the unwrapped server payload instead of normalized items.
        #[arg(long, default_value_t = false)]
        raw: bool,
    },
    /// Print resolved site settings.
    Settings,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = HttpContentApi::new(&cli.base_url)?;
    let timeout = Duration::from_secs(cli.timeout);
    tracing::info!(base_url = %api.base_url(), "using content API");

    match cli.command {
        Command::Check => run_check(&api, timeout).await,
        Command::List { resource, raw } => {
            let resource = Resource::from_name(&resource).ok_or(CliError::UnknownResource(resource))?;
            if raw { run_list_raw(&api, resource, timeout).await } else { run_list(&api, resource, timeout).await }
        }
        Command::Settings => run_settings(&api, timeout).await,
    }
}

async fn with_timeout<F: Future>(timeout: Duration, fut: F) -> Result<F::Output, CliError> {
    tokio::time::timeout(timeout, fut).await.map_err(|_| CliError::Timeout(timeout))
}

async fn run_check(api: &HttpContentApi, timeout: Duration) -> Result<(), CliError> {
    let mut lines = Vec::with_capacity(Resource::ALL.len());
    for resource in Resource::ALL {
        let started = std::time::Instant::now();
        let result = match with_timeout(timeout, api.list(resource)).await {
            Ok(result) => result.map(|payload| unwrap_payload(resource, payload).len()),
            Err(e) => Err(ApiError::Transport(e.to_string())),
        };
        if let Err(e) = &result {
            tracing::warn!(%resource, error = %e, "endpoint failed");
        }
        lines.push(CheckLine { resource, result, elapsed: started.elapsed() });
    }

    for line in &lines {
        println!("{line}");
    }
    let failed = lines.iter().filter(|l| l.result.is_err()).count();
    if failed > 0 {
        return Err(CliError::CheckFailed { failed, total: lines.len() });
    }
    Ok(())
}

async fn run_list_raw(api: &HttpContentApi, resource: Resource, timeout: Duration) -> Result<(), CliError> {
    let payload = with_timeout(timeout, api.list(resource)).await??;
    print_json(&Value::Array(unwrap_payload(resource, payload)))
}

async fn run_list(api: &HttpContentApi, resource: Resource, timeout: Duration) -> Result<(), CliError> {
    match resource {
        Resource::Programs => print_section(api, PROGRAMS, timeout).await,
        Resource::Gallery => print_section(api, GALLERY, timeout).await,
        Resource::Events => print_section(api, EVENTS, timeout).await,
        Resource::UpcomingEvents => print_section(api, UPCOMING_EVENTS, timeout).await,
        Resource::Blogs => print_section(api, BLOG, timeout).await,
        Resource::Testimonials => print_section(api, TESTIMONIALS, timeout).await,
        Resource::Faqs => print_section(api, FAQS, timeout).await,
        Resource::HomeSlider => print_section(api, HERO_SLIDES, timeout).await,
        Resource::HomeStats => print_section(api, HOME_STATS, timeout).await,
        Resource::Team => print_section(api, TEAM, timeout).await,
        Resource::AboutPage => print_section(api, ABOUT_PAGE, timeout).await,
        Resource::AboutFeaturesByCategory => print_section(api, ABOUT_FEATURES, timeout).await,
        Resource::Settings => run_settings(api, timeout).await,
        Resource::Branches | Resource::AboutFeatures => {
            tracing::info!(%resource, "no display section; printing raw payload");
            run_list_raw(api, resource, timeout).await
        }
    }
}

async fn print_section<R>(api: &HttpContentApi, section: Section<R>, timeout: Duration) -> Result<(), CliError>
where
    R: Normalize + DeserializeOwned,
{
    let state: LoadState<R::View> = with_timeout(timeout, section.load(api)).await?;
    let report = SectionReport::from_state(section.resource(), &state);
    eprintln!("{report}");
    print_json(&serde_json::to_value(state.items())?)
}

async fn run_settings(api: &HttpContentApi, timeout: Duration) -> Result<(), CliError> {
    let settings = with_timeout(timeout, SettingsMap::load(api)).await?;
    for (key, value, overridden) in report::settings_rows(&settings) {
        let source = if overridden { "api" } else { "default" };
        println!("{key:<24} {value}  [{source}]");
    }
    Ok(())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
