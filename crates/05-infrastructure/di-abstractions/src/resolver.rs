//! 组件解析器抽象接口
//!
//! 提供统一的按类型查找契约，外部调用和 Provider 内部的递归解析都经过这里

use crate::factory::Arguments;
use di_common::{ComponentType, DependencyError, DependencyResult};
use std::any::Any;
use std::sync::Arc;

/// 类型擦除的组件实例
///
/// 内部持有 `Arc<I>`，`I` 可以是 `dyn Trait`。
pub struct Instance(Box<dyn Any + Send + Sync>);

impl Instance {
    /// 包装组件实例
    pub fn new<I>(instance: Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Self(Box::new(instance))
    }

    /// 还原为具体的组件类型
    pub fn downcast<I>(self) -> Option<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.0.downcast::<Arc<I>>().ok().map(|instance| *instance)
    }

    /// 检查实例是否为指定组件类型
    pub fn is<I>(&self) -> bool
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.0.is::<Arc<I>>()
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Instance(<erased>)")
    }
}

/// 组件解析器 trait
///
/// 负责按组件类型查找 Provider 并创建实例。未绑定的类型返回 `Ok(None)`，不是错误。
pub trait ComponentResolver: Send + Sync {
    /// 在给定解析上下文中解析组件
    fn resolve_component(
        &self,
        component: ComponentType,
        context: &ResolveContext,
    ) -> DependencyResult<Option<Instance>>;

    /// 检查是否可以解析指定类型
    fn can_resolve(&self, component: ComponentType) -> bool;
}

/// 解析上下文
///
/// 记录当前解析链，用于检测循环依赖。上下文按值向下传递，
/// 每一层得到自己的副本，退出时无需复原。
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<ComponentType>,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 进入组件解析，返回包含该组件的新上下文
    ///
    /// 组件已在解析链上时返回循环依赖错误，涉及的类型为链上从该组件首次出现处开始的部分。
    pub fn enter(&self, component: ComponentType) -> DependencyResult<ResolveContext> {
        if let Some(position) = self.resolution_chain.iter().position(|c| *c == component) {
            return Err(DependencyError::cyclic(
                self.resolution_chain[position..].iter().copied(),
            ));
        }

        let mut resolution_chain = Vec::with_capacity(self.resolution_chain.len() + 1);
        resolution_chain.extend_from_slice(&self.resolution_chain);
        resolution_chain.push(component);
        Ok(Self { resolution_chain })
    }

    /// 当前解析链
    pub fn chain(&self) -> &[ComponentType] {
        &self.resolution_chain
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }
}

/// 按顺序解析参数列表
///
/// 任一参数未绑定时返回 `DependencyNotFound(parameter, component)`；
/// 嵌套解析产生的其他错误原样向上传播。
pub fn resolve_arguments(
    resolver: &dyn ComponentResolver,
    context: &ResolveContext,
    component: ComponentType,
    parameters: &[ComponentType],
) -> DependencyResult<Arguments> {
    let mut values = Vec::with_capacity(parameters.len());
    for &parameter in parameters {
        let instance = resolver
            .resolve_component(parameter, context)?
            .ok_or_else(|| DependencyError::dependency_not_found(parameter, component))?;
        values.push((parameter, instance));
    }
    Ok(Arguments::new(component, values))
}
