//! [`Config`]-related definitions.

use common::{Currency, Unit};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use http::{
    header::{self, HeaderValue, InvalidHeaderValue},
    Method,
};
use serde::Deserialize;
use service::infra::memory;
use smart_default::SmartDefault;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Snapshot configuration.
    pub snapshot: Snapshot,

    /// Service configuration.
    pub service: Service,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    ///
    /// `*` allows any origin.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

impl Cors {
    /// Builds the [`CorsLayer`] letting the [`Cors::origins`] read the API.
    ///
    /// # Errors
    ///
    /// If any of the [`Cors::origins`] is not a valid header value.
    pub fn layer(&self) -> Result<CorsLayer, InvalidHeaderValue> {
        let origin = if self.origins.iter().any(|o| o == "*") {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(
                self.origins
                    .iter()
                    .map(|o| o.parse::<HeaderValue>())
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };

        Ok(CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(origin))
    }
}

/// Snapshot configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Snapshot {
    /// Path to the JSON snapshot file to serve.
    #[default("snapshot.json".to_owned())]
    pub path: String,

    /// [`Currency`] of the amounts, unless the snapshot specifies one.
    #[default(Currency::Try)]
    pub currency: Currency,

    /// [`Unit`] of the amounts, unless the snapshot specifies one.
    #[default(Unit::Minor)]
    pub unit: Unit,
}

impl From<&Snapshot> for memory::Config {
    fn from(value: &Snapshot) -> Self {
        let Snapshot {
            path: _,
            currency,
            unit,
        } = value;
        Self {
            currency: *currency,
            unit: *unit,
        }
    }
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Report memoization configuration.
    pub memo: Memo,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            memo: Memo { capacity },
        } = value;
        Self {
            memo: service::memo::Config { capacity },
        }
    }
}

/// Report memoization configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Memo {
    /// Maximum number of reports kept at once.
    ///
    /// Zero disables memoization.
    #[default(64)]
    pub capacity: usize,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
