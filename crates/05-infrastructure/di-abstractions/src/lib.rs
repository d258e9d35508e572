//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义绑定注册、依赖验证和组件解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ComponentRegistry`] - 绑定注册表接口
//! - [`Provider`] - 组件解析单元
//! - [`ComponentResolver`] - 统一的按类型查找契约
//! - [`DependencyValidator`] - 整图依赖验证
//! - [`ImplementationDescriptor`] - 实现类的显式构造描述
//! - [`TypeResolver`] - 按名称查找实现类

pub mod container;
pub mod discovery;
pub mod factory;
pub mod provider;
pub mod registry;
pub mod resolver;

pub use container::*;
pub use discovery::*;
pub use factory::*;
pub use provider::*;
pub use registry::*;
pub use resolver::*;

pub use di_common::{ComponentType, DependencyError, DependencyResult};
