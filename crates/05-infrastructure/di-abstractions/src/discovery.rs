//! 按名称解析实现类的抽象接口
//!
//! 没有运行时按字符串加载类型的能力，名称到实现类的映射由显式注册提供

use crate::factory::ImplementationDescriptor;
use di_common::ComponentType;
use thiserror::Error;

/// 类型解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeResolutionError {
    #[error("未找到名称为 {name} 的实现类")]
    NotFound { name: String },

    #[error("{name} 不能赋值给 {component}")]
    NotAssignable {
        name: String,
        component: ComponentType,
    },
}

/// 类型解析器 trait
///
/// 根据限定名称查找实现类，并确认它可以赋值给目标组件类型。
pub trait TypeResolver {
    /// 查找可以绑定到组件类型 `I` 的实现类
    fn resolve_implementation<I>(
        &self,
        name: &str,
    ) -> Result<ImplementationDescriptor<I>, TypeResolutionError>
    where
        I: ?Sized + Send + Sync + 'static;

    /// 检查名称是否已注册
    fn contains(&self, name: &str) -> bool;
}
