//! Container-engine client wiring.
//!
//! The engine client is registered as a named singleton. Its constructor pulls
//! the shared [`AppConfig`] from the same container, so the first `get` of
//! [`ENGINE_CLIENT`] resolves the configuration transitively.

use crate::config::{AppConfig, EngineConfig, APP_CONFIG};
use crate::container::{service_name_of, ContainerError, Lookup, ServiceConstructorMap, ServiceName};
use bollard::{ClientVersion, Docker, API_DEFAULT_VERSION};
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Container name of the engine client.
pub static ENGINE_CLIENT: Lazy<ServiceName> = Lazy::new(service_name_of::<Docker>);

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unsupported engine host '{0}', expected unix://, tcp:// or http://")]
    UnsupportedHost(String),
    #[error("engine request failed: {0}")]
    Client(#[from] bollard::errors::Error),
}

/// Where to reach the engine, parsed from [`EngineConfig::host`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEndpoint {
    /// `DOCKER_HOST`, then the platform default socket.
    Defaults,
    Unix(String),
    Http(String),
}

impl EngineEndpoint {
    pub fn parse(host: Option<&str>) -> Result<Self, EngineError> {
        let Some(host) = host.map(str::trim) else {
            return Ok(EngineEndpoint::Defaults);
        };

        if let Some(path) = host.strip_prefix("unix://") {
            if !path.is_empty() {
                return Ok(EngineEndpoint::Unix(path.to_string()));
            }
        } else if let Some(addr) = host
            .strip_prefix("tcp://")
            .or_else(|| host.strip_prefix("http://"))
        {
            if !addr.is_empty() {
                return Ok(EngineEndpoint::Http(format!("tcp://{addr}")));
            }
        }

        Err(EngineError::UnsupportedHost(host.to_string()))
    }
}

/// Connect according to the config. No request is sent until the client is used.
pub fn connect(config: &EngineConfig) -> Result<Docker, EngineError> {
    let timeout = config.timeout_secs;
    let client = match EngineEndpoint::parse(config.host.as_deref())? {
        EngineEndpoint::Defaults => {
            Docker::connect_with_defaults()?.with_timeout(Duration::from_secs(timeout))
        }
        #[cfg(unix)]
        EngineEndpoint::Unix(path) => Docker::connect_with_unix(&path, timeout, API_DEFAULT_VERSION)?,
        #[cfg(not(unix))]
        EngineEndpoint::Unix(path) => return Err(EngineError::UnsupportedHost(format!("unix://{path}"))),
        EngineEndpoint::Http(addr) => Docker::connect_with_http(&addr, timeout, API_DEFAULT_VERSION)?,
    };
    Ok(client)
}

/// Constructors contributed by this module. Requires [`APP_CONFIG`] to be registered.
pub fn constructors() -> ServiceConstructorMap {
    let mut map = ServiceConstructorMap::new();
    map.register(ENGINE_CLIENT.clone(), |lookup| {
        let config = lookup.get_as::<AppConfig>(APP_CONFIG.as_str())?;
        Ok(connect(&config.engine)?)
    });
    map
}

/// Typed accessor for the engine client.
///
/// Constructors are synchronous, so the shared client is pinned to
/// `API_DEFAULT_VERSION`. Call [`negotiate`] for a client speaking the
/// engine's API version, as [`probe`] does.
pub fn client_from(lookup: &impl Lookup) -> Result<Arc<Docker>, ContainerError> {
    lookup.get_as::<Docker>(ENGINE_CLIENT.as_str())
}

/// Engine facts reported by a successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInfo {
    pub version: String,
    pub api_version: String,
    /// API version the client settled on after negotiation.
    pub negotiated_api_version: String,
    pub os: String,
    pub arch: String,
}

pub fn format_api_version(version: &ClientVersion) -> String {
    format!("{}.{}", version.major_version, version.minor_version)
}

/// Copy of `client` downgraded to the engine's API version when the engine is older.
pub async fn negotiate(client: &Docker) -> Result<Docker, EngineError> {
    Ok(client.clone().negotiate_version().await?)
}

/// Negotiate the API version, then ping the engine and read its version.
pub async fn probe(client: &Docker) -> Result<EngineInfo, EngineError> {
    let client = negotiate(client).await?;
    client.ping().await?;
    let version = client.version().await?;
    Ok(EngineInfo {
        version: version.version.unwrap_or_default(),
        api_version: version.api_version.unwrap_or_default(),
        negotiated_api_version: format_api_version(&client.client_version()),
        os: version.os.unwrap_or_default(),
        arch: version.arch.unwrap_or_default(),
    })
}
