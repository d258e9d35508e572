//! 绑定注册表实现

use crate::catalog::TypeCatalog;
use crate::context::Context;
use crate::providers::{ConstantProvider, ConstructorInjectionProvider, MethodInjectionProvider};
use crate::settings::ContainerSettings;
use di_abstractions::{
    BindingInfo, ComponentRegistry, ContainerBuilder, DefaultDependencyValidator,
    DependencyGraphNode, DependencyValidator, ImplementationDescriptor, Provider,
};
use di_common::{ComponentType, DependencyError, DependencyResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 绑定表类型
pub(crate) type Providers = BTreeMap<ComponentType, Arc<dyn Provider>>;

/// 上下文配置
///
/// 配置阶段的绑定注册表。`context()` 会对整图做一次验证，并把当前绑定
/// 快照到新的上下文中，之后的绑定不会影响已经构建的上下文。
pub struct ContextConfig {
    /// 组件绑定
    providers: Providers,
    /// 依赖验证器
    validator: Box<dyn DependencyValidator>,
}

impl ContextConfig {
    /// 创建新的上下文配置
    pub fn new() -> Self {
        Self::with_validator(DefaultDependencyValidator)
    }

    /// 使用自定义验证器创建上下文配置
    pub fn with_validator<V: DependencyValidator + 'static>(validator: V) -> Self {
        Self {
            providers: BTreeMap::new(),
            validator: Box::new(validator),
        }
    }

    /// 检查组件是否已绑定
    pub fn is_bound_to<I: ?Sized + 'static>(&self) -> bool {
        self.providers.contains_key(&ComponentType::of::<I>())
    }

    /// 应用配置中声明的按名称绑定
    ///
    /// 全部成功或全部不生效：任一条目失败时恢复到应用前的绑定。
    pub fn bind_settings(
        &mut self,
        settings: &ContainerSettings,
        catalog: &TypeCatalog,
    ) -> DependencyResult<()> {
        let staged = self.providers.clone();
        if let Err(e) = self.apply_settings(settings, catalog) {
            warn!("应用配置绑定失败，已恢复原有绑定: {}", e);
            self.providers = staged;
            return Err(e);
        }

        info!("应用配置绑定完成，共 {} 个", settings.bindings.len());
        Ok(())
    }

    fn apply_settings(
        &mut self,
        settings: &ContainerSettings,
        catalog: &TypeCatalog,
    ) -> DependencyResult<()> {
        for binding in &settings.bindings {
            let binder = catalog.component_binder(&binding.component).ok_or_else(|| {
                DependencyError::illegal_component(
                    binding.component.as_str(),
                    binding.implementation.as_str(),
                    "组件名称未在类型目录中注册",
                )
            })?;
            binder(self, catalog, &binding.implementation)?;
        }
        Ok(())
    }

    fn insert(&mut self, component: ComponentType, provider: Arc<dyn Provider>) {
        if self.providers.insert(component, provider).is_some() {
            warn!("组件 {} 已绑定，新的绑定将覆盖旧的绑定", component);
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry for ContextConfig {
    fn bind_instance<I>(&mut self, instance: Arc<I>)
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let component = ComponentType::of::<I>();
        info!("绑定实例: {}", component);
        self.insert(component, Arc::new(ConstantProvider::new(instance)));
    }

    fn bind_class<I>(&mut self, implementation: ImplementationDescriptor<I>) -> DependencyResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let component = ComponentType::of::<I>();
        let constructor = implementation.select_constructor().map_err(|reason| {
            warn!("实现类不合法: {} <- {}, {}", component, implementation.name(), reason);
            DependencyError::illegal_component(component.to_string(), implementation.name(), reason)
        })?;

        info!("绑定实现类: {} <- {}", component, implementation.name());
        self.insert(
            component,
            Arc::new(ConstructorInjectionProvider::new(implementation.name(), constructor)),
        );

        for method in implementation.injection_methods() {
            debug!("绑定注入方法: {}::{} -> {}", component, method.name(), method.produces());
            self.insert(
                method.produces(),
                Arc::new(MethodInjectionProvider::new(method.clone())),
            );
        }

        Ok(())
    }

    fn is_bound(&self, component: ComponentType) -> bool {
        self.providers.contains_key(&component)
    }

    fn bindings(&self) -> Vec<BindingInfo> {
        self.providers
            .iter()
            .map(|(component, provider)| BindingInfo {
                component: *component,
                kind: provider.kind(),
                dependencies: provider.dependencies(),
            })
            .collect()
    }
}

impl ContainerBuilder for ContextConfig {
    type Context = Context;

    fn context(&self) -> DependencyResult<Context> {
        let graph: Vec<DependencyGraphNode> =
            self.bindings().iter().map(DependencyGraphNode::from).collect();
        info!("验证依赖关系: {} 个绑定", graph.len());

        self.validator.validate(&graph).map_err(|e| {
            warn!("依赖验证失败: {}", e);
            e
        })?;

        Ok(Context::new(self.providers.clone()))
    }
}
