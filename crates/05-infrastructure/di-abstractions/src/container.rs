//! 依赖注入容器抽象接口
//!
//! 提供上下文（解析门面）和容器构建的核心抽象

use crate::registry::ComponentRegistry;
use crate::resolver::{ComponentResolver, ResolveContext};
use di_common::{ComponentType, DependencyError, DependencyResult};
use std::sync::Arc;

/// 容器构建器 trait
///
/// 在配置阶段结束时运行整图验证，验证失败时不会产生可用的上下文。
pub trait ContainerBuilder: ComponentRegistry {
    /// 关联的上下文类型
    type Context: ComponentResolver;

    /// 验证依赖关系并构建上下文
    fn context(&self) -> DependencyResult<Self::Context>;
}

/// 组件上下文 trait
///
/// 为所有解析器提供按类型获取组件的便捷方法。
pub trait ComponentContext: ComponentResolver {
    /// 获取组件，未绑定时返回 `Ok(None)`
    fn get<I>(&self) -> DependencyResult<Option<Arc<I>>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let component = ComponentType::of::<I>();
        match self.resolve_component(component, &ResolveContext::new())? {
            Some(instance) => instance.downcast::<I>().map(Some).ok_or_else(|| {
                DependencyError::creation_failed(component, "实例类型与绑定的组件类型不一致")
            }),
            None => Ok(None),
        }
    }

    /// 检查组件是否已绑定
    fn contains<I>(&self) -> bool
    where
        I: ?Sized + 'static,
    {
        self.can_resolve(ComponentType::of::<I>())
    }
}

impl<R: ComponentResolver + ?Sized> ComponentContext for R {}
