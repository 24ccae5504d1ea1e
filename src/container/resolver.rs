//! 按需构造的解析逻辑
//!
//! `Resolver` 同时是交给构造函数的查找能力：构造函数通过它请求自身依赖，
//! 依赖按深度优先递归解析。容器不做循环检测，构造函数直接或间接依赖自身
//! 会在自己的实例槽上永久阻塞。

use super::error::ContainerError;
use super::name::ServiceName;
use super::record::{Instance, ServiceRecord};
use super::registry::Registry;
use super::stats::InnerStats;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// 按名称查找服务的能力
pub trait Lookup {
    /// 获取服务实例，必要时构造
    fn get(&self, name: &str) -> Result<Instance, ContainerError>;

    /// 获取服务并向下转型为具体类型
    fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, ContainerError>
    where
        Self: Sized,
    {
        self.get(name)?
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                name: ServiceName::from(name),
                expected: std::any::type_name::<T>(),
            })
    }
}

/// 服务解析器
pub struct Resolver<'a> {
    registry: &'a RwLock<Registry>,
    stats: &'a InnerStats,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(registry: &'a RwLock<Registry>, stats: &'a InnerStats) -> Self {
        Self { registry, stats }
    }

    /// 解析服务：已构造则直接返回缓存实例，否则调用构造函数恰好一次
    pub fn resolve(&self, name: &str) -> Result<Instance, ContainerError> {
        self.stats.resolution();

        // 读锁只在克隆记录时持有，构造期间不占用注册表
        let record = self.registry.read().record(name);
        let Some(record) = record else {
            self.stats.unknown();
            debug!(service = name, "service not registered");
            return Err(ContainerError::UnknownService(ServiceName::from(name)));
        };

        if let Some(instance) = record.instance() {
            self.stats.hit();
            trace!(service = name, "service cache hit");
            return Ok(Arc::clone(instance));
        }

        self.stats.miss();
        let instance = record.get_or_try_construct(|| self.construct(name, &record))?;
        Ok(Arc::clone(instance))
    }

    fn construct(&self, name: &str, record: &ServiceRecord) -> Result<Instance, ContainerError> {
        let service_type = record.factory().service_type_name();
        let started = Instant::now();
        debug!(service = name, service_type, "constructing service");

        match record.factory().create(self) {
            Ok(instance) => {
                self.stats.constructed();
                info!(
                    service = name,
                    service_type,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "service constructed"
                );
                Ok(instance)
            }
            Err(source) => {
                self.stats.failed();
                warn!(
                    service = name,
                    service_type,
                    error = %source,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "service construction failed"
                );
                Err(ContainerError::ConstructionFailed {
                    name: ServiceName::from(name),
                    source,
                })
            }
        }
    }
}

impl Lookup for Resolver<'_> {
    fn get(&self, name: &str) -> Result<Instance, ContainerError> {
        self.resolve(name)
    }
}
