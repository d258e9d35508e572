//! Provider 抽象接口

use crate::resolver::{ComponentResolver, Instance, ResolveContext};
use di_common::{ComponentType, DependencyResult};
use std::fmt;

/// Provider 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// 预先构建的实例
    Constant,
    /// 通过选定的构造器构建
    ConstructorInjected,
    /// 调用持有者组件上的注入方法得到
    MethodInjected,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constant => "constant",
            Self::ConstructorInjected => "constructor",
            Self::MethodInjected => "method",
        };
        f.write_str(name)
    }
}

/// Provider trait
///
/// 多态的解析单元。`dependencies` 只描述声明的依赖，供验证器静态遍历；
/// `provide` 通过解析器递归解析依赖并产出实例。
pub trait Provider: Send + Sync {
    /// 产出组件实例
    fn provide(
        &self,
        resolver: &dyn ComponentResolver,
        context: &ResolveContext,
    ) -> DependencyResult<Instance>;

    /// 声明的依赖类型列表（有序，允许重复）
    fn dependencies(&self) -> Vec<ComponentType>;

    /// Provider 类型
    fn kind(&self) -> ProviderKind;
}
