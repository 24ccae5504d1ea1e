//! Process startup: register every service once, then hand out singletons.

use crate::config::{AppConfig, APP_CONFIG};
use crate::container::{Container, ServiceConstructorMap};
use crate::engine::{self, EngineInfo};
use crate::errors::AppError;
use tracing::info;

/// All service constructors of the application.
pub fn service_constructors(config: &AppConfig) -> ServiceConstructorMap {
    let mut constructors = ServiceConstructorMap::new();
    constructors.register_instance(APP_CONFIG.clone(), config.clone());
    constructors.extend(engine::constructors());
    constructors
}

pub fn build_container(config: &AppConfig) -> Container {
    Container::with_constructors(service_constructors(config))
}

/// Wire the container, resolve the engine client and probe the engine.
pub async fn run(config: &AppConfig) -> Result<EngineInfo, AppError> {
    let container = build_container(config);
    info!(services = ?container.service_names(), "service container ready");

    let client = engine::client_from(&container)?;
    let engine_info = engine::probe(&client).await?;
    info!(
        version = %engine_info.version,
        api_version = %engine_info.api_version,
        negotiated_api_version = %engine_info.negotiated_api_version,
        os = %engine_info.os,
        arch = %engine_info.arch,
        "container engine reachable"
    );

    Ok(engine_info)
}
