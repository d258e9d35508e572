//! 类型目录实现
//!
//! 名称到实现类的显式映射，替代运行时按字符串加载类型

use crate::registry::ContextConfig;
use di_abstractions::{ComponentRegistry, ImplementationDescriptor, TypeResolutionError, TypeResolver};
use di_common::{ComponentType, DependencyResult};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 实现类工厂
type ImplementationFactory<I> = Arc<dyn Fn() -> ImplementationDescriptor<I> + Send + Sync>;

/// 按名称绑定组件的函数
pub(crate) type ComponentBinder =
    fn(&mut ContextConfig, &TypeCatalog, &str) -> DependencyResult<()>;

/// 类型目录
///
/// 一个实现名称可以登记为多个组件类型的实现，登记过的组件类型即视为可赋值。
#[derive(Default)]
pub struct TypeCatalog {
    /// 实现名称 -> (组件类型 -> 实现类工厂)
    implementations: HashMap<String, HashMap<ComponentType, Box<dyn Any + Send + Sync>>>,
    /// 组件名称 -> 绑定函数
    components: HashMap<String, ComponentBinder>,
}

impl TypeCatalog {
    /// 创建新的类型目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记实现类，声明它可以赋值给组件类型 `I`
    pub fn register<I, F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> ImplementationDescriptor<I> + Send + Sync + 'static,
    {
        let name = name.into();
        let component = ComponentType::of::<I>();
        debug!("登记实现类: {} -> {}", name, component);

        let factory: ImplementationFactory<I> = Arc::new(factory);
        self.implementations
            .entry(name)
            .or_default()
            .insert(component, Box::new(factory));
        self
    }

    /// 登记组件类型的名称，供配置文件引用
    pub fn register_component<I>(&mut self, name: impl Into<String>) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("登记组件名称: {} -> {}", name, ComponentType::of::<I>());
        self.components
            .insert(name, bind_component::<I> as ComponentBinder);
        self
    }

    /// 名称登记的所有组件类型
    pub fn assignable_to(&self, name: &str) -> Vec<ComponentType> {
        let mut components: Vec<ComponentType> = self
            .implementations
            .get(name)
            .map(|views| views.keys().copied().collect())
            .unwrap_or_default();
        components.sort();
        components
    }

    pub(crate) fn component_binder(&self, name: &str) -> Option<ComponentBinder> {
        self.components.get(name).copied()
    }
}

fn bind_component<I>(
    config: &mut ContextConfig,
    catalog: &TypeCatalog,
    implementation: &str,
) -> DependencyResult<()>
where
    I: ?Sized + Send + Sync + 'static,
{
    config.bind_by_name::<I, _>(catalog, implementation)
}

impl TypeResolver for TypeCatalog {
    fn resolve_implementation<I>(
        &self,
        name: &str,
    ) -> Result<ImplementationDescriptor<I>, TypeResolutionError>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let component = ComponentType::of::<I>();
        let views = self
            .implementations
            .get(name)
            .ok_or_else(|| TypeResolutionError::NotFound {
                name: name.to_string(),
            })?;

        let factory = views
            .get(&component)
            .and_then(|factory| factory.downcast_ref::<ImplementationFactory<I>>())
            .ok_or_else(|| TypeResolutionError::NotAssignable {
                name: name.to_string(),
                component,
            })?;

        Ok(factory())
    }

    fn contains(&self, name: &str) -> bool {
        self.implementations.contains_key(name)
    }
}

impl std::fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("implementations", &self.implementations.keys().collect::<Vec<_>>())
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}
