//! 依赖注入容器
//!
//! 按名称注册构造函数，首次请求时构造并缓存为单例。构造函数可以通过
//! [`Resolver`] 递归请求同一容器中的其它服务。
//!
//! - 注册表整体由读写锁保护：`update` 独占，`get` 只在查找记录时共享
//! - 每条记录的实例槽是一个 `OnceCell`，保证并发首次请求时只构造一次
//! - 构造失败不会被缓存，下一次 `get` 会重试

mod error;
mod name;
mod record;
mod registry;
mod resolver;
mod stats;

pub use error::{ConstructError, ContainerError};
pub use name::{service_name_of, ServiceName};
pub use record::{FnServiceFactory, Instance, InstanceFactory, ServiceFactory, ServiceRecord};
pub use registry::{Registry, ServiceConstructorMap};
pub use resolver::{Lookup, Resolver};
pub use stats::ContainerStats;

use parking_lot::RwLock;
use stats::InnerStats;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 服务容器
///
/// 克隆开销很小，所有克隆共享同一个注册表和统计信息，可以直接交给工作线程。
#[derive(Clone, Default)]
pub struct Container {
    registry: Arc<RwLock<Registry>>,
    stats: Arc<InnerStats>,
}

impl Container {
    /// 创建空容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建容器并注册初始构造函数
    pub fn with_constructors(constructors: ServiceConstructorMap) -> Self {
        let container = Self::new();
        container.update(constructors);
        container
    }

    /// 批量插入或替换服务构造函数
    ///
    /// 被替换的名称会回到未构造状态，下一次 `get` 调用新的构造函数。
    /// 正在进行中的解析仍然使用旧记录完成。
    pub fn update(&self, constructors: ServiceConstructorMap) {
        let written = self.registry.write().update(constructors);
        debug!(services = written, "service registry updated");
    }

    /// 获取服务实例
    pub fn get(&self, name: &str) -> Result<Instance, ContainerError> {
        self.resolver().resolve(name)
    }

    /// 获取服务并向下转型为具体类型
    pub fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, ContainerError> {
        <Self as Lookup>::get_as::<T>(self, name)
    }

    /// 借用容器的解析器
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.registry, &self.stats)
    }

    /// 检查服务是否已注册
    pub fn contains(&self, name: &str) -> bool {
        self.registry.read().contains(name)
    }

    /// 检查服务是否已构造
    pub fn is_constructed(&self, name: &str) -> bool {
        self.registry
            .read()
            .record(name)
            .is_some_and(|record| record.is_constructed())
    }

    pub fn service_names(&self) -> Vec<ServiceName> {
        self.registry.read().names()
    }

    /// 获取容器统计信息
    pub fn stats(&self) -> ContainerStats {
        self.stats.snapshot()
    }

    /// 获取缓存命中率
    pub fn cache_hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }
}

impl Lookup for Container {
    fn get(&self, name: &str) -> Result<Instance, ContainerError> {
        Container::get(self, name)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("services", &self.service_names())
            .field("stats", &self.stats())
            .finish()
    }
}
