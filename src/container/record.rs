//! 服务记录
//!
//! 每个注册的名称对应一条记录：构造函数加上一个只写一次的实例槽。

use super::error::ConstructError;
use super::resolver::Resolver;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 构造完成的服务实例，所有调用方共享同一份分配
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 服务工厂trait
pub trait ServiceFactory: Send + Sync {
    /// 创建服务实例，`lookup` 用于解析自身依赖
    fn create(&self, lookup: &Resolver<'_>) -> Result<Instance, ConstructError>;

    /// 获取服务类型名称（用于日志和错误信息）
    fn service_type_name(&self) -> &'static str;
}

/// 函数式服务工厂
pub struct FnServiceFactory<F, T> {
    factory_fn: F,
    _phantom: PhantomData<fn() -> T>,
}

impl<F, T> FnServiceFactory<F, T> {
    pub fn new(factory_fn: F) -> Self {
        Self {
            factory_fn,
            _phantom: PhantomData,
        }
    }
}

impl<F, T> ServiceFactory for FnServiceFactory<F, T>
where
    F: Fn(&Resolver<'_>) -> Result<T, ConstructError> + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    fn create(&self, lookup: &Resolver<'_>) -> Result<Instance, ConstructError> {
        let service = (self.factory_fn)(lookup)?;
        Ok(Arc::new(service))
    }

    fn service_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// 预先构造好的实例，每次"构造"都返回同一个 Arc
pub struct InstanceFactory {
    instance: Instance,
    type_name: &'static str,
}

impl InstanceFactory {
    pub fn new<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            instance: value,
            type_name: std::any::type_name::<T>(),
        }
    }
}

impl ServiceFactory for InstanceFactory {
    fn create(&self, _lookup: &Resolver<'_>) -> Result<Instance, ConstructError> {
        Ok(Arc::clone(&self.instance))
    }

    fn service_type_name(&self) -> &'static str {
        self.type_name
    }
}

/// 服务记录：Unconstructed -> Constructed，之后不再变化
pub struct ServiceRecord {
    factory: Box<dyn ServiceFactory>,
    instance: OnceCell<Instance>,
}

impl ServiceRecord {
    pub fn new(factory: Box<dyn ServiceFactory>) -> Self {
        Self {
            factory,
            instance: OnceCell::new(),
        }
    }

    pub fn factory(&self) -> &dyn ServiceFactory {
        self.factory.as_ref()
    }

    /// 已构造的实例（若有）
    pub fn instance(&self) -> Option<&Instance> {
        self.instance.get()
    }

    pub fn is_constructed(&self) -> bool {
        self.instance.get().is_some()
    }

    /// 获取实例，必要时调用 `construct`。
    ///
    /// 同一记录上的并发调用会阻塞到第一个调用完成；构造失败不会写入槽位，
    /// 等待中的调用方会自行重试。
    pub fn get_or_try_construct<E>(
        &self,
        construct: impl FnOnce() -> Result<Instance, E>,
    ) -> Result<&Instance, E> {
        self.instance.get_or_try_init(construct)
    }
}

impl fmt::Debug for ServiceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRecord")
            .field("service_type", &self.factory.service_type_name())
            .field("constructed", &self.is_constructed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record_for(value: u32) -> ServiceRecord {
        ServiceRecord::new(Box::new(InstanceFactory::new(Arc::new(value))))
    }

    #[test]
    fn test_record_starts_unconstructed() {
        let record = record_for(7);

        assert!(!record.is_constructed());
        assert!(record.instance().is_none());
        assert_eq!(record.factory().service_type_name(), "u32");
    }

    #[test]
    fn test_record_is_filled_once() {
        let record = record_for(7);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let instance = record
                .get_or_try_construct(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<Instance, ()>(Arc::new(7u32))
                })
                .unwrap();
            assert_eq!(instance.downcast_ref::<u32>(), Some(&7));
        }

        assert!(record.is_constructed());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_construction_leaves_record_empty() {
        let record = record_for(7);

        let result = record.get_or_try_construct(|| Err::<Instance, &str>("boom"));
        assert_eq!(result.err(), Some("boom"));
        assert!(!record.is_constructed());

        let instance = record
            .get_or_try_construct(|| Ok::<Instance, &str>(Arc::new(8u32)))
            .unwrap();
        assert_eq!(instance.downcast_ref::<u32>(), Some(&8));
    }
}
