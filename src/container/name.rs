//! 服务名称
//!
//! 容器中的服务以字符串名称作为键。名称通常由服务类型推导而来，
//! 但容器本身不限制命名方式，任何调用方提供的唯一字符串都合法。

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// 服务名称 - 容器内唯一的不透明标识符
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceName(Arc<str>);

impl ServiceName {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ServiceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ServiceName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&ServiceName> for ServiceName {
    fn from(name: &ServiceName) -> Self {
        name.clone()
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 由类型推导服务名称（完整的类型路径）
///
/// ```
/// use wirebox::container::service_name_of;
///
/// let name = service_name_of::<String>();
/// assert_eq!(name.as_str(), "alloc::string::String");
/// ```
pub fn service_name_of<T: ?Sized + 'static>() -> ServiceName {
    ServiceName::new(std::any::type_name::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Clock;

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(ServiceName::from("clock"), 1);

        assert_eq!(map.get("clock"), Some(&1));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn test_name_from_type_is_deterministic() {
        let first = service_name_of::<Clock>();
        let second = service_name_of::<Clock>();

        assert_eq!(first, second);
        assert!(first.as_str().ends_with("Clock"));
        assert_ne!(first, service_name_of::<String>());
    }
}
