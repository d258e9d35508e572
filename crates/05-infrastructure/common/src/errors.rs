//! 错误类型定义

use crate::metadata::ComponentType;
use std::collections::BTreeSet;
use thiserror::Error;

/// 依赖注入错误类型
///
/// 所有变体都表示配置缺陷而非瞬时故障，不应重试。
#[derive(Error, Debug)]
pub enum DependencyError {
    /// 实现类的构造方式不合法，或按名称绑定的类型无法解析、不是目标类型的子类型
    #[error("组件不合法: {component} <- {implementation}, 原因: {reason}")]
    IllegalComponent {
        component: String,
        implementation: String,
        reason: String,
    },

    /// 声明的依赖类型没有绑定
    #[error("依赖未找到: {component} 需要 {dependency}")]
    DependencyNotFound {
        dependency: ComponentType,
        component: ComponentType,
    },

    /// 检测到循环依赖（直接或间接）
    #[error("检测到循环依赖: {}", join_components(.components))]
    CyclicDependenciesFound { components: BTreeSet<ComponentType> },

    /// 组件工厂或注入方法执行失败
    #[error("组件创建失败: {component}, 原因: {source}")]
    ComponentCreationFailed {
        component: ComponentType,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DependencyError {
    /// 创建组件不合法错误
    pub fn illegal_component(
        component: impl Into<String>,
        implementation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::IllegalComponent {
            component: component.into(),
            implementation: implementation.into(),
            reason: reason.into(),
        }
    }

    /// 创建依赖未找到错误
    pub fn dependency_not_found(dependency: ComponentType, component: ComponentType) -> Self {
        Self::DependencyNotFound {
            dependency,
            component,
        }
    }

    /// 创建循环依赖错误，重复的类型会被合并
    pub fn cyclic(components: impl IntoIterator<Item = ComponentType>) -> Self {
        Self::CyclicDependenciesFound {
            components: components.into_iter().collect(),
        }
    }

    /// 创建组件创建失败错误
    pub fn creation_failed(
        component: ComponentType,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ComponentCreationFailed {
            component,
            source: source.into(),
        }
    }

    /// 循环依赖涉及的组件类型
    pub fn cyclic_components(&self) -> Option<&BTreeSet<ComponentType>> {
        match self {
            Self::CyclicDependenciesFound { components } => Some(components),
            _ => None,
        }
    }

    /// 是否为组件不合法错误
    pub fn is_illegal_component(&self) -> bool {
        matches!(self, Self::IllegalComponent { .. })
    }
}

fn join_components(components: &BTreeSet<ComponentType>) -> String {
    components
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 容器配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
