//! Provider 实现
//!
//! 常量、构造器注入和方法注入三种解析单元

use di_abstractions::{
    resolve_arguments, ComponentResolver, ConstructorDescriptor, InjectionMethod, Instance,
    Provider, ProviderKind, ResolveContext,
};
use di_common::{ComponentType, DependencyError, DependencyResult};
use std::sync::Arc;
use tracing::debug;

/// 常量 Provider
///
/// 每次解析都返回同一个实例。
pub struct ConstantProvider<I: ?Sized> {
    instance: Arc<I>,
}

impl<I: ?Sized> ConstantProvider<I> {
    pub fn new(instance: Arc<I>) -> Self {
        Self { instance }
    }
}

impl<I> Provider for ConstantProvider<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    fn provide(
        &self,
        _resolver: &dyn ComponentResolver,
        _context: &ResolveContext,
    ) -> DependencyResult<Instance> {
        Ok(Instance::new(Arc::clone(&self.instance)))
    }

    fn dependencies(&self) -> Vec<ComponentType> {
        Vec::new()
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Constant
    }
}

/// 构造器注入 Provider
pub struct ConstructorInjectionProvider<I: ?Sized> {
    /// 绑定的组件类型
    component: ComponentType,
    /// 实现名称
    implementation: String,
    /// 选定的构造器
    constructor: ConstructorDescriptor<I>,
}

impl<I> ConstructorInjectionProvider<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    pub fn new(implementation: impl Into<String>, constructor: ConstructorDescriptor<I>) -> Self {
        Self {
            component: ComponentType::of::<I>(),
            implementation: implementation.into(),
            constructor,
        }
    }
}

impl<I> Provider for ConstructorInjectionProvider<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    fn provide(
        &self,
        resolver: &dyn ComponentResolver,
        context: &ResolveContext,
    ) -> DependencyResult<Instance> {
        let context = context.enter(self.component)?;
        debug!(
            "构造组件: {} <- {} (深度 {})",
            self.component,
            self.implementation,
            context.depth()
        );

        let mut arguments =
            resolve_arguments(resolver, &context, self.component, self.constructor.parameters())?;
        let instance = self.constructor.construct(&mut arguments)?;
        Ok(Instance::new(instance))
    }

    fn dependencies(&self) -> Vec<ComponentType> {
        self.constructor.parameters().to_vec()
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::ConstructorInjected
    }
}

/// 方法注入 Provider
///
/// 先解析持有者组件，再在其上调用注入方法。持有者不计入声明的依赖。
pub struct MethodInjectionProvider<H: ?Sized> {
    /// 持有者组件类型
    holder: ComponentType,
    /// 注入方法
    method: InjectionMethod<H>,
}

impl<H> MethodInjectionProvider<H>
where
    H: ?Sized + Send + Sync + 'static,
{
    pub fn new(method: InjectionMethod<H>) -> Self {
        Self {
            holder: ComponentType::of::<H>(),
            method,
        }
    }
}

impl<H> Provider for MethodInjectionProvider<H>
where
    H: ?Sized + Send + Sync + 'static,
{
    fn provide(
        &self,
        resolver: &dyn ComponentResolver,
        context: &ResolveContext,
    ) -> DependencyResult<Instance> {
        let produces = self.method.produces();
        let context = context.enter(produces)?;
        debug!(
            "调用注入方法: {}::{} -> {}",
            self.holder,
            self.method.name(),
            produces
        );

        let holder = resolver
            .resolve_component(self.holder, &context)?
            .ok_or_else(|| DependencyError::dependency_not_found(self.holder, produces))?
            .downcast::<H>()
            .ok_or_else(|| {
                DependencyError::creation_failed(produces, format!("持有者 {} 类型不一致", self.holder))
            })?;

        let mut arguments = resolve_arguments(resolver, &context, produces, self.method.parameters())?;
        self.method.invoke(&holder, &mut arguments)
    }

    fn dependencies(&self) -> Vec<ComponentType> {
        self.method.parameters().to_vec()
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::MethodInjected
    }
}
