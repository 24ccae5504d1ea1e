//! 服务注册表
//!
//! 名称到服务记录的映射，由 [`Container`](super::Container) 独占持有。

use super::error::ConstructError;
use super::name::ServiceName;
use super::record::{FnServiceFactory, InstanceFactory, ServiceFactory, ServiceRecord};
use super::resolver::Resolver;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 待注册的构造函数集合，通过 `Container::update` 批量生效
#[derive(Default)]
pub struct ServiceConstructorMap {
    entries: HashMap<ServiceName, Box<dyn ServiceFactory>>,
}

impl ServiceConstructorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册服务构造函数
    ///
    /// 构造函数通过传入的 [`Resolver`] 获取其它服务。同名的后一次注册覆盖前一次。
    pub fn register<T, F>(&mut self, name: impl Into<ServiceName>, factory: F) -> &mut Self
    where
        F: Fn(&Resolver<'_>) -> Result<T, ConstructError> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        self.register_factory(name, Box::new(FnServiceFactory::<F, T>::new(factory)))
    }

    /// 注册已构造好的实例
    pub fn register_instance<T>(&mut self, name: impl Into<ServiceName>, value: T) -> &mut Self
    where
        T: Send + Sync + 'static,
    {
        self.register_factory(name, Box::new(InstanceFactory::new(Arc::new(value))))
    }

    pub fn register_factory(
        &mut self,
        name: impl Into<ServiceName>,
        factory: Box<dyn ServiceFactory>,
    ) -> &mut Self {
        self.entries.insert(name.into(), factory);
        self
    }

    /// 合并另一组构造函数，`other` 中的同名条目优先
    pub fn extend(&mut self, other: ServiceConstructorMap) -> &mut Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for ServiceConstructorMap {
    type Item = (ServiceName, Box<dyn ServiceFactory>);
    type IntoIter = std::collections::hash_map::IntoIter<ServiceName, Box<dyn ServiceFactory>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Debug for ServiceConstructorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().map(ServiceName::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ServiceConstructorMap")
            .field("names", &names)
            .finish()
    }
}

/// 服务注册表
#[derive(Debug, Default)]
pub struct Registry {
    records: HashMap<ServiceName, Arc<ServiceRecord>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或替换记录，返回本次写入的条目数。
    ///
    /// 被替换的名称会丢弃已缓存的实例；仍持有旧记录的调用方不受影响。
    pub fn update(&mut self, constructors: ServiceConstructorMap) -> usize {
        let count = constructors.len();
        for (name, factory) in constructors {
            self.records
                .insert(name, Arc::new(ServiceRecord::new(factory)));
        }
        count
    }

    pub fn record(&self, name: &str) -> Option<Arc<ServiceRecord>> {
        self.records.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// 按字典序返回所有已注册名称
    pub fn names(&self) -> Vec<ServiceName> {
        let mut names: Vec<_> = self.records.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
