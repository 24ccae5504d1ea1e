use super::name::ServiceName;
use thiserror::Error;

/// 构造函数返回的错误类型
pub type ConstructError = Box<dyn std::error::Error + Send + Sync>;

/// 容器错误类型
#[derive(Debug, Error)]
pub enum ContainerError {
    /// 服务未注册
    #[error("Service not registered: {0}")]
    UnknownService(ServiceName),

    /// 服务创建失败
    #[error("Service creation failed for '{name}'")]
    ConstructionFailed {
        name: ServiceName,
        #[source]
        source: ConstructError,
    },

    /// 类型转换失败
    #[error("Type cast failed for '{name}': expected {expected}")]
    TypeMismatch {
        name: ServiceName,
        expected: &'static str,
    },
}

impl ContainerError {
    /// 出错的服务名称
    pub fn service_name(&self) -> &ServiceName {
        match self {
            ContainerError::UnknownService(name)
            | ContainerError::ConstructionFailed { name, .. }
            | ContainerError::TypeMismatch { name, .. } => name,
        }
    }
}
