//! Configuration module
//!
//! Settings are read once from the environment at process start and passed into
//! the handlers explicitly. Issuer and worker parameters are kept optional here
//! and checked on every invocation, so a misconfigured deployment answers each
//! request with a configuration error instead of refusing to boot.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::MAX_DIMENSION;
use crate::error::AppError;
use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 4000;

/// Deployable pieces of the pipeline; a process can mount either or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Issuer,
    Worker,
}

impl FromStr for Component {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "issuer" => Ok(Component::Issuer),
            "worker" => Ok(Component::Worker),
            other => Err(anyhow::anyhow!("Invalid component: {}", other)),
        }
    }
}

/// Upload-URL issuer parameters.
#[derive(Clone, Debug, Default)]
pub struct IssuerConfig {
    pub source_bucket: Option<String>,
    pub destination_bucket: Option<String>,
    pub allowed_origin: Option<String>,
}

/// Issuer parameters once all three are known to be present.
#[derive(Clone, Copy, Debug)]
pub struct IssuerSettings<'a> {
    pub source_bucket: &'a str,
    pub destination_bucket: &'a str,
    pub allowed_origin: &'a str,
}

impl IssuerConfig {
    pub fn from_env() -> Self {
        Self {
            source_bucket: non_empty_var("SOURCE_BUCKET"),
            destination_bucket: non_empty_var("DESTINATION_BUCKET"),
            allowed_origin: non_empty_var("ALLOWED_ORIGIN"),
        }
    }

    pub fn settings(&self) -> Result<IssuerSettings<'_>, AppError> {
        match (
            self.source_bucket.as_deref(),
            self.destination_bucket.as_deref(),
            self.allowed_origin.as_deref(),
        ) {
            (Some(source_bucket), Some(destination_bucket), Some(allowed_origin)) => {
                Ok(IssuerSettings {
                    source_bucket,
                    destination_bucket,
                    allowed_origin,
                })
            }
            _ => Err(AppError::Configuration(
                "Missing environment variables (SOURCE_BUCKET, DESTINATION_BUCKET, ALLOWED_ORIGIN)"
                    .to_string(),
            )),
        }
    }

    /// Origin for the CORS header; `*` when unconfigured so errors stay readable.
    pub fn cors_origin(&self) -> &str {
        self.allowed_origin.as_deref().unwrap_or("*")
    }
}

/// Resize worker parameters.
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    pub destination_bucket: Option<String>,
    /// Directory for transient downloads and resize candidates.
    pub temp_dir: PathBuf,
    pub max_dimension: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            destination_bucket: None,
            temp_dir: env::temp_dir(),
            max_dimension: MAX_DIMENSION,
        }
    }
}

impl WorkerConfig {
    pub fn from_env() -> Self {
        Self {
            destination_bucket: non_empty_var("DESTINATION_BUCKET_NAME"),
            temp_dir: non_empty_var("RESIZER_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            max_dimension: MAX_DIMENSION,
        }
    }

    pub fn destination_bucket(&self) -> Result<&str, AppError> {
        self.destination_bucket.as_deref().ok_or_else(|| {
            AppError::Configuration("DESTINATION_BUCKET_NAME not set".to_string())
        })
    }
}

/// Storage client settings. Validated at start by the storage factory.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, LocalStack, ...)
    pub endpoint: Option<String>,
    pub local_path: Option<String>,
    pub local_base_url: Option<String>,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let backend = match non_empty_var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::S3,
        };

        Ok(Self {
            backend,
            region: non_empty_var("S3_REGION").or_else(|| non_empty_var("AWS_REGION")),
            endpoint: non_empty_var("S3_ENDPOINT"),
            local_path: non_empty_var("LOCAL_STORAGE_PATH"),
            local_base_url: non_empty_var("LOCAL_STORAGE_BASE_URL"),
        })
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub components: Vec<Component>,
    pub issuer: IssuerConfig,
    pub worker: WorkerConfig,
    pub storage: StorageConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let server_port = match non_empty_var("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let components = non_empty_var("RESIZER_COMPONENTS")
            .unwrap_or_else(|| "issuer,worker".to_string())
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(Component::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        if components.is_empty() {
            return Err(anyhow::anyhow!(
                "RESIZER_COMPONENTS must name at least one of: issuer, worker"
            ));
        }

        Ok(Self {
            server_port,
            environment,
            components,
            issuer: IssuerConfig::from_env(),
            worker: WorkerConfig::from_env(),
            storage: StorageConfig::from_env()?,
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }

    pub fn serves(&self, component: Component) -> bool {
        self.components.contains(&component)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(source: Option<&str>, dest: Option<&str>, origin: Option<&str>) -> IssuerConfig {
        IssuerConfig {
            source_bucket: source.map(String::from),
            destination_bucket: dest.map(String::from),
            allowed_origin: origin.map(String::from),
        }
    }

    #[test]
    fn test_issuer_settings_complete() {
        let config = issuer(Some("src"), Some("dst"), Some("https://app.example"));
        let settings = config.settings().unwrap();
        assert_eq!(settings.source_bucket, "src");
        assert_eq!(settings.destination_bucket, "dst");
        assert_eq!(config.cors_origin(), "https://app.example");
    }

    #[test]
    fn test_issuer_settings_missing_any() {
        for config in [
            issuer(None, Some("dst"), Some("o")),
            issuer(Some("src"), None, Some("o")),
            issuer(Some("src"), Some("dst"), None),
            IssuerConfig::default(),
        ] {
            assert!(matches!(config.settings(), Err(AppError::Configuration(_))));
        }
    }

    #[test]
    fn test_cors_origin_falls_back_to_wildcard() {
        let config = issuer(Some("src"), Some("dst"), None);
        assert_eq!(config.cors_origin(), "*");
    }

    #[test]
    fn test_worker_destination_required() {
        let config = WorkerConfig::default();
        assert!(matches!(
            config.destination_bucket(),
            Err(AppError::Configuration(_))
        ));

        let config = WorkerConfig {
            destination_bucket: Some("dst".into()),
            ..WorkerConfig::default()
        };
        assert_eq!(config.destination_bucket().unwrap(), "dst");
        assert_eq!(config.max_dimension, 256);
    }

    #[test]
    fn test_component_parse() {
        assert_eq!("Issuer".parse::<Component>().unwrap(), Component::Issuer);
        assert_eq!(" worker ".parse::<Component>().unwrap(), Component::Worker);
        assert!("scheduler".parse::<Component>().is_err());
    }
}
