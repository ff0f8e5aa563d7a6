// # dnsyncd - one-shot dnsync runner
//
// Thin integration layer only: read configuration, wire the collaborators,
// execute one run, map the outcome to an exit code. All reconciliation
// logic lives in dnsync-core. Scheduling is external; run this from cron or
// a systemd timer.
//
// ## Configuration
//
// The run configuration (domains, apiBase, token) comes from a JSON file.
// Everything else is environment variables:
//
// - `DNSYNC_CONFIG`: path to the JSON config file (default: config.json)
// - `DNSYNC_STATE_DIR`: directory for persisted artifacts (default: .)
// - `DNSYNC_IP_URL`: optional echo endpoint overriding the built-in list
// - `DNSYNC_LOG_LEVEL`: trace|debug|info|warn|error (default: info)
//
// ## Exit Codes
//
// - 0: run completed (including runs with individually failed domains)
// - 1: configuration or startup error
// - 2: fatal run error (the run log has been written with the message)

use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use dnsync_core::{Config, FileStore, Runner};
use dnsync_ip_http::HttpIpSource;
use dnsync_provider_cloudflare::CloudflareProvider;

/// Exit codes for the different termination scenarios
#[derive(Debug, Clone, Copy)]
enum RunExitCode {
    /// Run completed normally
    Success = 0,
    /// Configuration or startup failure, nothing was attempted
    ConfigError = 1,
    /// Fatal run error after startup
    RunFailed = 2,
}

impl From<RunExitCode> for ExitCode {
    fn from(code: RunExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Environment-derived settings
struct Settings {
    config_path: String,
    state_dir: String,
    ip_url: Option<String>,
    log_level: String,
}

impl Settings {
    fn from_env() -> Self {
        Self {
            config_path: env::var("DNSYNC_CONFIG").unwrap_or_else(|_| "config.json".to_string()),
            state_dir: env::var("DNSYNC_STATE_DIR").unwrap_or_else(|_| ".".to_string()),
            ip_url: env::var("DNSYNC_IP_URL").ok(),
            log_level: env::var("DNSYNC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

fn main() -> ExitCode {
    let settings = Settings::from_env();

    let log_level = match settings.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            eprintln!("DNSYNC_LOG_LEVEL '{}' is not valid (trace|debug|info|warn|error)", other);
            return RunExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {}", e);
        return RunExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {}", e);
            return RunExitCode::ConfigError.into();
        }
    };

    rt.block_on(async {
        let runner = match build_runner(&settings).await {
            Ok(runner) => runner,
            Err(e) => {
                error!("startup error: {:#}", e);
                return RunExitCode::ConfigError;
            }
        };

        match runner.run().await {
            Ok(log) => {
                let updated = log.domain_logs.iter().filter(|r| r.updated).count();
                info!(
                    "run complete: {} domain(s), {} updated",
                    log.domain_logs.len(),
                    updated
                );
                RunExitCode::Success
            }
            Err(e) => {
                error!("run failed: {}", e);
                RunExitCode::RunFailed
            }
        }
    })
    .into()
}

/// Wire the collaborators into a runner
async fn build_runner(settings: &Settings) -> anyhow::Result<Runner> {
    let raw = tokio::fs::read_to_string(&settings.config_path)
        .await
        .map_err(|e| anyhow::anyhow!("cannot read config file {}: {}", settings.config_path, e))?;
    let config = Config::from_json(&raw)?;
    info!(
        "configuration loaded from {}: {} domain(s)",
        settings.config_path,
        config.domains.len()
    );

    let store = FileStore::new(&settings.state_dir).await?;

    let ip_source = match &settings.ip_url {
        Some(url) => HttpIpSource::with_endpoints(vec![url.clone()])?,
        None => HttpIpSource::new()?,
    };

    let provider = CloudflareProvider::new(&config.api_base, &config.token)?;

    let runner = Runner::new(
        Box::new(ip_source),
        Box::new(provider),
        Box::new(store),
        config,
    )?;

    Ok(runner)
}
