//! 组件上下文实现

use crate::registry::Providers;
use di_abstractions::{ComponentResolver, Instance, Provider, ResolveContext};
use di_common::{ComponentType, DependencyError, DependencyResult};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// 组件上下文
///
/// 通过验证的绑定快照之上的只读门面。外部调用和 Provider 内部的递归解析
/// 都经过同一个 [`ComponentResolver::resolve_component`]。
#[derive(Clone)]
pub struct Context {
    providers: Arc<Providers>,
}

impl Context {
    pub(crate) fn new(providers: Providers) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }

    /// 获取组件的延迟 Provider，未绑定时返回 `None`
    pub fn get_provider<I>(&self) -> Option<ComponentProvider<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let component = ComponentType::of::<I>();
        self.providers.get(&component).map(|provider| ComponentProvider {
            context: self.clone(),
            provider: Arc::clone(provider),
            _component: PhantomData,
        })
    }

    /// 已绑定的组件数量
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// 是否没有任何绑定
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ComponentResolver for Context {
    fn resolve_component(
        &self,
        component: ComponentType,
        context: &ResolveContext,
    ) -> DependencyResult<Option<Instance>> {
        let Some(provider) = self.providers.get(&component) else {
            debug!("组件未绑定: {}", component);
            return Ok(None);
        };
        provider.provide(self, context).map(Some)
    }

    fn can_resolve(&self, component: ComponentType) -> bool {
        self.providers.contains_key(&component)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("components", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// 组件的延迟 Provider
///
/// 持有上下文，每次调用 [`ComponentProvider::get`] 都按绑定重新解析。
pub struct ComponentProvider<I: ?Sized> {
    context: Context,
    provider: Arc<dyn Provider>,
    _component: PhantomData<fn() -> Arc<I>>,
}

impl<I> ComponentProvider<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    /// 解析组件实例
    pub fn get(&self) -> DependencyResult<Arc<I>> {
        self.provider
            .provide(&self.context, &ResolveContext::new())?
            .downcast::<I>()
            .ok_or_else(|| {
                DependencyError::creation_failed(
                    ComponentType::of::<I>(),
                    "实例类型与绑定的组件类型不一致",
                )
            })
    }
}

impl<I: ?Sized> Clone for ComponentProvider<I> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            provider: Arc::clone(&self.provider),
            _component: PhantomData,
        }
    }
}
