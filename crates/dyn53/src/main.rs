// # dyn53 - one-shot dynamic DNS updater
//
// Run from cron or a systemd timer. Each run:
// 1. Reads process options from environment variables
// 2. Opens the log file
// 3. Loads the properties file
// 4. Runs one check-and-update cycle
// 5. Exits (0 on success, 1 on any error)
//
// All DNS logic lives in dyn53-core; this binary only wires it up.
//
// ## Environment
//
// - `DYN53_PROPS`: Properties file (default `dyn53.props`)
// - `DYN53_LOG_FILE`: Log file (default `log/dyn53.log`)
// - `DYN53_LOG_LEVEL`: trace, debug, info, warn, error (default `info`)
// - `DYN53_MODE`: `live` (default) or `dry-run`
//
// ## Example
//
// ```bash
// cat > dyn53.props <<'PROPS'
// hostname=home.example.com
// aws.access.key=AKIA...
// aws.access.secret=...
// PROPS
// mkdir -p log
// dyn53
// ```

mod logging;

use anyhow::{Context, Result};
use dyn53_core::{CycleOutcome, Dyn53Config, Dyn53Engine, SystemResolver};
use dyn53_ip_http::HttpIpSource;
use dyn53_provider_route53::route53_provider;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info};

const DEFAULT_LOG_FILE: &str = "log/dyn53.log";

/// Exit codes
///
/// Schedulers only need to tell success from failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dyn53ExitCode {
    /// Record checked (and updated if needed)
    Success = 0,
    /// Anything went wrong
    Failure = 1,
}

impl From<Dyn53ExitCode> for ExitCode {
    fn from(code: Dyn53ExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Process options
#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    props_path: PathBuf,
    log_file: PathBuf,
    log_level: String,
    dry_run: bool,
}

impl Options {
    /// Load options from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mode = lookup("DYN53_MODE").unwrap_or_else(|| "live".to_string());
        let dry_run = match mode.trim().to_lowercase().as_str() {
            "" | "live" => false,
            "dry-run" => true,
            other => anyhow::bail!(
                "DYN53_MODE '{}' is not valid. Valid modes: live, dry-run",
                other
            ),
        };

        Ok(Self {
            props_path: lookup("DYN53_PROPS")
                .unwrap_or_else(|| dyn53_core::config::DEFAULT_PROPERTIES_FILE.to_string())
                .into(),
            log_file: lookup("DYN53_LOG_FILE")
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
                .into(),
            log_level: lookup("DYN53_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            dry_run,
        })
    }

    /// Validate the options
    fn validate(&self) -> Result<()> {
        self.level()?;

        if self.log_file.as_os_str().is_empty() {
            anyhow::bail!("DYN53_LOG_FILE cannot be empty");
        }

        if let Some(parent) = self.log_file.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            anyhow::bail!(
                "Log directory does not exist: {}. Create it first: mkdir -p {}",
                parent.display(),
                parent.display()
            );
        }

        Ok(())
    }

    fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "DYN53_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

/// Operator-facing summary of a cycle
fn summary(outcome: &CycleOutcome) -> String {
    match outcome {
        CycleOutcome::Updated {
            hostname,
            new_ip,
            dry_run: false,
            ..
        } => format!("IP address switched for {hostname} new address: {new_ip}"),
        CycleOutcome::Updated {
            hostname,
            new_ip,
            dry_run: true,
            ..
        } => format!("[DRY-RUN] IP address for {hostname} would switch to: {new_ip}"),
        CycleOutcome::Unchanged { hostname, .. } => {
            format!("The IP address for {hostname} did not change.")
        }
    }
}

fn main() -> ExitCode {
    let options = match Options::from_env().and_then(|o| o.validate().map(|_| o)) {
        Ok(options) => options,
        Err(e) => {
            println!("An error occurred while checking a dynamic IP address.");
            println!("{:#}", e);
            return Dyn53ExitCode::Failure.into();
        }
    };

    // validate() already checked the level
    let level = options.level().unwrap_or(Level::INFO);
    if let Err(e) = logging::init(&options.log_file, level) {
        println!("An error occurred while checking a dynamic IP address.");
        println!("{:#}", e);
        return Dyn53ExitCode::Failure.into();
    }

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
        .and_then(|rt| rt.block_on(run(&options)));

    match result {
        Ok(outcome) => {
            let msg = summary(&outcome);
            info!("{}", msg);
            println!("{}", msg);
            Dyn53ExitCode::Success.into()
        }
        Err(e) => {
            error!("Error during execution.");
            error!("{:?}", e);
            println!("An error occurred while checking a dynamic IP address.");
            println!("{:#}", e);
            Dyn53ExitCode::Failure.into()
        }
    }
}

/// Run one cycle
async fn run(options: &Options) -> Result<CycleOutcome> {
    let config = Dyn53Config::load(&options.props_path)?;
    info!("Checking {} (properties: {})", config.hostname, options.props_path.display());

    let ip_source = HttpIpSource::from_config(&config.ip_service)?;
    let provider = route53_provider(&config, options.dry_run);

    let engine = Dyn53Engine::new(
        Box::new(SystemResolver::new()),
        Box::new(ip_source),
        Box::new(provider),
        config.hostname.clone(),
    )?;

    Ok(engine.run_once().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::Ipv4Addr;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let options = Options::from_lookup(lookup(&[])).unwrap();
        assert_eq!(options.props_path, PathBuf::from("dyn53.props"));
        assert_eq!(options.log_file, PathBuf::from("log/dyn53.log"));
        assert_eq!(options.level().unwrap(), Level::INFO);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_dry_run_mode() {
        let options = Options::from_lookup(lookup(&[("DYN53_MODE", "DRY-RUN")])).unwrap();
        assert!(options.dry_run);
        assert!(Options::from_lookup(lookup(&[("DYN53_MODE", "sometimes")])).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let options = Options::from_lookup(lookup(&[("DYN53_LOG_LEVEL", "loud")])).unwrap();
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_log_directory_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").join("dyn53.log");
        let present = dir.path().join("dyn53.log");

        let options = Options::from_lookup(lookup(&[(
            "DYN53_LOG_FILE",
            missing.to_str().unwrap(),
        )]))
        .unwrap();
        assert!(options.validate().is_err());

        let options = Options::from_lookup(lookup(&[(
            "DYN53_LOG_FILE",
            present.to_str().unwrap(),
        )]))
        .unwrap();
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_summary_messages() {
        let updated = CycleOutcome::Updated {
            hostname: "home.example.com".to_string(),
            previous_ip: Ipv4Addr::new(198, 51, 100, 1),
            new_ip: Ipv4Addr::new(203, 0, 113, 7),
            dry_run: false,
        };
        assert_eq!(
            summary(&updated),
            "IP address switched for home.example.com new address: 203.0.113.7"
        );

        let dry_run = CycleOutcome::Updated {
            hostname: "home.example.com".to_string(),
            previous_ip: Ipv4Addr::new(198, 51, 100, 1),
            new_ip: Ipv4Addr::new(203, 0, 113, 7),
            dry_run: true,
        };
        assert_eq!(
            summary(&dry_run),
            "[DRY-RUN] IP address for home.example.com would switch to: 203.0.113.7"
        );

        let unchanged = CycleOutcome::Unchanged {
            hostname: "home.example.com".to_string(),
            current_ip: Ipv4Addr::new(203, 0, 113, 7),
        };
        assert_eq!(
            summary(&unchanged),
            "The IP address for home.example.com did not change."
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Dyn53ExitCode::Success as u8, 0);
        assert_eq!(Dyn53ExitCode::Failure as u8, 1);
    }

    #[tokio::test]
    async fn test_run_without_properties_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = Options {
            props_path: dir.path().join("dyn53.props"),
            log_file: dir.path().join("dyn53.log"),
            log_level: "info".to_string(),
            dry_run: false,
        };

        let err = run(&options).await.unwrap_err();
        assert!(format!("{:#}", err).contains("is required and was not found."));
    }
}
