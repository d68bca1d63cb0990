use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::underwriting::{FundParameters, ParameterError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub fund: FundConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let parameters_path = env::var("FUND_PARAMETERS_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            fund: FundConfig { parameters_path },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the initial fund parameters come from.
#[derive(Debug, Clone, Default)]
pub struct FundConfig {
    /// JSON file holding [`FundParameters`]; built-in defaults apply when unset.
    pub parameters_path: Option<PathBuf>,
}

impl FundConfig {
    pub fn load_parameters(&self) -> Result<FundParameters, ConfigError> {
        match &self.parameters_path {
            Some(path) => load_fund_parameters(path),
            None => Ok(FundParameters::default()),
        }
    }
}

/// Read and validate fund parameters from a JSON file. Missing fields take defaults.
pub fn load_fund_parameters(path: &Path) -> Result<FundParameters, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::FundParametersRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parameters: FundParameters =
        serde_json::from_str(&raw).map_err(|source| ConfigError::FundParametersParse {
            path: path.to_path_buf(),
            source,
        })?;
    parameters
        .validate()
        .map_err(ConfigError::InvalidFundParameters)?;
    Ok(parameters)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    FundParametersRead {
        path: PathBuf,
        source: std::io::Error,
    },
    FundParametersParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidFundParameters(ParameterError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::FundParametersRead { path, .. } => {
                write!(f, "unable to read fund parameters from {}", path.display())
            }
            ConfigError::FundParametersParse { path, .. } => {
                write!(f, "fund parameters in {} are not valid JSON", path.display())
            }
            ConfigError::InvalidFundParameters(err) => {
                write!(f, "fund parameters rejected: {err}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::FundParametersRead { source, .. } => Some(source),
            ConfigError::FundParametersParse { source, .. } => Some(source),
            ConfigError::InvalidFundParameters(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("FUND_PARAMETERS_PATH");
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("zone-underwriter-{}-{name}", std::process::id()));
        fs::write(&path, contents).expect("scratch file written");
        path
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.fund.parameters_path.is_none());
        assert_eq!(
            config.fund.load_parameters().expect("defaults"),
            FundParameters::default()
        );
    }

    #[test]
    fn rejects_non_numeric_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");
        let error = AppConfig::load().expect_err("port must parse");
        assert!(matches!(error, ConfigError::InvalidPort));
        env::remove_var("APP_PORT");
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        env::remove_var("APP_HOST");
    }

    #[test]
    fn fund_parameters_file_overrides_selected_fields() {
        let path = scratch_file(
            "partial.json",
            r#"{ "max_ltv": 60.0, "zone_allocation": { "green": 80.0, "orange": 20.0, "red": 0.0 } }"#,
        );
        let parameters = load_fund_parameters(&path).expect("parameters load");
        assert_eq!(parameters.max_ltv, 60.0);
        assert_eq!(parameters.zone_allocation.amber, 20.0);
        assert_eq!(parameters.max_combined_ltv, 85.0);
        fs::remove_file(path).ok();
    }

    #[test]
    fn fund_parameters_file_is_validated() {
        let path = scratch_file(
            "inverted.json",
            r#"{ "min_property_value": 6000000.0, "max_property_value": 5000000.0 }"#,
        );
        match load_fund_parameters(&path) {
            Err(ConfigError::InvalidFundParameters(ParameterError::InvertedPropertyBounds {
                ..
            })) => {}
            other => panic!("expected inverted bounds error, got {other:?}"),
        }
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_fund_parameters_file_reports_path() {
        let path = PathBuf::from("/nonexistent/fund-parameters.json");
        let error = load_fund_parameters(&path).expect_err("file is missing");
        assert!(error.to_string().contains("/nonexistent/fund-parameters.json"));
    }
}
