//! # 依赖注入具体实现
//!
//! 提供上下文配置（绑定注册表）、三种 Provider、组件上下文、类型目录
//! 以及基于 config crate 的容器配置加载。
//!
//! ## 使用方式
//!
//! ```rust
//! use di_impl::{ComponentContext, ComponentRegistry, ContainerBuilder, ContextConfig};
//! use std::sync::Arc;
//!
//! trait Greeting: Send + Sync {
//!     fn text(&self) -> &str;
//! }
//!
//! struct Hello;
//! impl Greeting for Hello {
//!     fn text(&self) -> &str {
//!         "hello"
//!     }
//! }
//!
//! let mut config = ContextConfig::new();
//! config.bind_instance(Arc::new(Hello) as Arc<dyn Greeting>);
//!
//! let context = config.context().unwrap();
//! let greeting = context.get::<dyn Greeting>().unwrap().unwrap();
//! assert_eq!(greeting.text(), "hello");
//! ```

mod catalog;
mod context;
mod providers;
mod registry;
mod settings;

pub use catalog::TypeCatalog;
pub use context::{ComponentProvider, Context};
pub use providers::{ConstantProvider, ConstructorInjectionProvider, MethodInjectionProvider};
pub use registry::ContextConfig;
pub use settings::{BindingSettings, ContainerSettings, DEFAULT_CONFIG_FILE, ENV_PREFIX};

pub use di_abstractions::{
    Arguments, BindingInfo, ComponentContext, ComponentRegistry, ComponentResolver,
    ConstructorDescriptor, ContainerBuilder, DefaultDependencyValidator, DependencyGraphNode,
    DependencyValidator, ImplementationDescriptor, Injectable, InjectionMethod, Instance,
    Provider, ProviderKind, ResolveContext, TypeResolutionError, TypeResolver,
};
pub use di_common::{ComponentType, ConfigError, ConfigResult, DependencyError, DependencyResult};
