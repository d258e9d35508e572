//! # DI Common
//!
//! 这个 crate 提供了 IoC 容器各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`ComponentType`] - 组件类型标识，作为绑定注册表的键
//! - [`DependencyError`] - 绑定、验证和解析阶段的错误
//! - [`ConfigError`] - 容器配置加载错误
//!
//! ## 设计原则
//!
//! - 错误携带结构化数据，而不仅仅是消息
//! - 组件类型既可以是 trait object（`dyn Trait`），也可以是具体类型

pub mod errors;
pub mod metadata;

pub use errors::*;
pub use metadata::*;
