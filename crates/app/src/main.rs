use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use services::{ApiConfig, AppServices};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "app=info,services=info,ui=info,storage=info";

/// BrainPath desktop client.
#[derive(Debug, Parser)]
#[command(name = "brainpath", version, about)]
struct Args {
    /// Backend base URL; requests go to `<url>/api/...`.
    #[arg(long, env = "BRAINPATH_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// SQLite URL or file path for the saved login.
    #[arg(long = "db", env = "BRAINPATH_DB_URL")]
    db_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "BRAINPATH_API_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("--timeout-secs must be greater than zero")]
    ZeroTimeout,
}

fn default_db_url() -> String {
    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("brainpath");
    format!("sqlite://{}", dir.join("client.sqlite3").display())
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| StartupError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(StartupError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.timeout_secs == 0 {
        return Err(StartupError::ZeroTimeout.into());
    }
    let config = ApiConfig::new(&args.api_url, Duration::from_secs(args.timeout_secs))?;

    let db_url = args
        .db_url
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map_or_else(default_db_url, normalize_sqlite_url);
    prepare_sqlite_file(&db_url)?;

    let services = AppServices::new_sqlite(config, &db_url).await?;
    tracing::info!(
        authenticated = services.session().is_authenticated(),
        "client state loaded"
    );

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // Some window managers default new tao windows to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("BrainPath")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    if let Err(err) = run(args).await {
        tracing::error!(error = %err, "startup failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_become_absolute_sqlite_urls() {
        let url = normalize_sqlite_url("sqlite:data/client.sqlite3");
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/client.sqlite3"), "{url}");
    }

    #[test]
    fn memory_and_absolute_urls_pass_through() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/bp.sqlite3"),
            "sqlite:///tmp/bp.sqlite3"
        );
    }

    #[test]
    fn flags_override_configuration() {
        let args = Args::try_parse_from([
            "brainpath",
            "--api-url",
            "http://10.0.0.2:9000",
            "--db",
            "sqlite::memory:",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert_eq!(args.api_url, "http://10.0.0.2:9000");
        assert_eq!(args.db_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(args.timeout_secs, 5);
    }

    #[test]
    fn prepare_rejects_non_sqlite_urls() {
        assert!(prepare_sqlite_file("postgres://localhost/db").is_err());
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
    }
}
