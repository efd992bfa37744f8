//! brdomain CLI Application
//!
//! Checks whether a domain under a Brazilian TLD is available for
//! registration by querying the Registro.br availability endpoint.
//! This binary is a thin layer over the brdomain-lib library.

mod ui;

use brdomain_lib::{
    load_env_config, parse_timeout_string, validate_endpoint, CheckConfig, ConfigManager,
    DomainCheckError, DomainChecker, EnvConfig, FileConfig, TldRegistry,
};
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use std::process;
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for brdomain
#[derive(Parser, Debug)]
#[command(name = "brdomain")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check whether a .br domain is available for registration")]
#[command(
    long_about = "Check whether a .br domain is available for registration.\n\nThe domain is validated locally against the supported Registro.br extensions and hostname rules before a single lookup request is made."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domain to check, e.g. meusite.com.br
    #[arg(value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// List the supported extensions and exit
    #[arg(long = "list-tlds")]
    pub list_tlds: bool,

    /// Use a specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Request timeout (e.g. 5s, 30s, 1m)
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Configuration")]
    pub timeout: Option<String>,

    /// Base URL of the availability endpoint
    #[arg(long = "endpoint", value_name = "URL", help_heading = "Configuration")]
    pub endpoint: Option<String>,

    /// Show debug logging on stderr
    #[arg(short = 'v', long = "verbose", help_heading = "Output")]
    pub verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        debug!(error = %e, "check failed");
        ui::print_error(&e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,brdomain=debug,brdomain_lib=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}

async fn run(args: Args) -> Result<(), DomainCheckError> {
    let registry = TldRegistry::builtin()?;

    if args.list_tlds {
        ui::print_tlds(registry);
        return Ok(());
    }

    let input = match args.domain.as_deref() {
        Some(domain) if !domain.trim().is_empty() => domain,
        _ => return Err(DomainCheckError::Usage),
    };

    let config = build_config(&args)?;
    debug!(endpoint = %config.endpoint, timeout = ?config.timeout, "resolved configuration");

    let checker = DomainChecker::with_registry(config, registry)?;
    let parts = checker.prepare(input)?;

    let spinner = ui::Spinner::start(&parts.fqdn);
    let lookup = checker.lookup(&parts).await;
    if let Some(spinner) = spinner {
        spinner.stop().await;
    }

    let result = lookup?;
    ui::print_result(&result, &parts, registry);
    Ok(())
}

/// Resolve the effective configuration: file < environment < CLI.
fn build_config(args: &Args) -> Result<CheckConfig, DomainCheckError> {
    let env_config = load_env_config();
    let config_manager = ConfigManager::new();

    // Step 1: an explicit file replaces discovery
    let explicit_path = args.config.as_ref().or(env_config.config.as_ref());
    let file_config = match explicit_path {
        Some(path) => {
            debug!(%path, "using explicit config file");
            config_manager.load_file(path)?
        }
        None => config_manager.discover_and_load(),
    };
    let config = merge_file_config_into_check_config(CheckConfig::default(), file_config);

    // Step 2: BRDOMAIN_* environment variables
    let config = apply_environment_config(config, &env_config);

    // Step 3: CLI arguments (highest precedence)
    apply_cli_args_to_config(config, args)
}

/// Merge FileConfig into CheckConfig
fn merge_file_config_into_check_config(
    mut config: CheckConfig,
    file_config: FileConfig,
) -> CheckConfig {
    if let Some(defaults) = file_config.defaults {
        if let Some(secs) = defaults.timeout.as_deref().and_then(parse_timeout_string) {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(endpoint) = defaults.endpoint {
            config.endpoint = endpoint;
        }
    }

    config
}

/// Apply already validated environment values.
fn apply_environment_config(mut config: CheckConfig, env_config: &EnvConfig) -> CheckConfig {
    if let Some(secs) = env_config.timeout.as_deref().and_then(parse_timeout_string) {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(endpoint) = &env_config.endpoint {
        config.endpoint = endpoint.clone();
    }

    config
}

/// Apply CLI arguments to config (highest precedence).
///
/// Unlike file and environment values, a bad CLI value is an error.
fn apply_cli_args_to_config(
    mut config: CheckConfig,
    args: &Args,
) -> Result<CheckConfig, DomainCheckError> {
    if let Some(timeout_str) = &args.timeout {
        let secs = parse_timeout_string(timeout_str).ok_or_else(|| {
            DomainCheckError::config(format!(
                "Invalid timeout '{}'. Use format like '5s', '30s', '2m'",
                timeout_str
            ))
        })?;
        config.timeout = Duration::from_secs(secs);
    }

    if let Some(endpoint) = &args.endpoint {
        validate_endpoint(endpoint)?;
        config.endpoint = endpoint.trim().to_string();
    }

    if config.timeout > Duration::from_secs(120) {
        warn!(timeout = ?config.timeout, "unusually long request timeout");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brdomain_lib::DefaultsConfig;

    fn create_test_args() -> Args {
        Args {
            domain: None,
            list_tlds: false,
            config: None,
            timeout: None,
            endpoint: None,
            verbose: false,
        }
    }

    fn file_config(timeout: Option<&str>, endpoint: Option<&str>) -> FileConfig {
        FileConfig {
            defaults: Some(DefaultsConfig {
                timeout: timeout.map(String::from),
                endpoint: endpoint.map(String::from),
            }),
        }
    }

    #[test]
    fn test_args_parse_domain_and_flags() {
        let args = Args::try_parse_from([
            "brdomain",
            "meusite.com.br",
            "--timeout",
            "3s",
            "--endpoint",
            "http://127.0.0.1:8080/",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.domain.as_deref(), Some("meusite.com.br"));
        assert_eq!(args.timeout.as_deref(), Some("3s"));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_domain_is_optional() {
        let args = Args::try_parse_from(["brdomain"]).unwrap();
        assert!(args.domain.is_none());
        assert!(!args.list_tlds);
    }

    #[test]
    fn test_file_config_applied() {
        let config = merge_file_config_into_check_config(
            CheckConfig::default(),
            file_config(Some("30s"), Some("http://file/")),
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.endpoint, "http://file/");
    }

    #[test]
    fn test_empty_file_config_keeps_defaults() {
        let config =
            merge_file_config_into_check_config(CheckConfig::default(), FileConfig::default());
        assert_eq!(config, CheckConfig::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let config = merge_file_config_into_check_config(
            CheckConfig::default(),
            file_config(Some("30s"), Some("http://file/")),
        );
        let env_config = EnvConfig {
            timeout: Some("5s".to_string()),
            endpoint: None,
            config: None,
        };

        let config = apply_environment_config(config, &env_config);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://file/");
    }

    #[test]
    fn test_cli_overrides_env() {
        let env_config = EnvConfig {
            timeout: Some("5s".to_string()),
            endpoint: Some("http://env/".to_string()),
            config: None,
        };
        let config = apply_environment_config(CheckConfig::default(), &env_config);

        let mut args = create_test_args();
        args.timeout = Some("1m".to_string());
        let config = apply_cli_args_to_config(config, &args).unwrap();

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.endpoint, "http://env/");
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        let mut args = create_test_args();
        args.timeout = Some("soon".to_string());
        assert!(matches!(
            apply_cli_args_to_config(CheckConfig::default(), &args),
            Err(DomainCheckError::ConfigError { .. })
        ));

        let mut args = create_test_args();
        args.endpoint = Some("registro.br".to_string());
        assert!(matches!(
            apply_cli_args_to_config(CheckConfig::default(), &args),
            Err(DomainCheckError::ConfigError { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_without_domain_is_usage_error() {
        let err = run(create_test_args()).await.unwrap_err();
        assert!(matches!(err, DomainCheckError::Usage));

        let mut args = create_test_args();
        args.domain = Some("   ".to_string());
        let err = run(args).await.unwrap_err();
        assert!(matches!(err, DomainCheckError::Usage));
    }
}
