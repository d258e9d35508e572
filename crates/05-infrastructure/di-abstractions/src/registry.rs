//! 绑定注册表抽象接口

use crate::discovery::TypeResolver;
use crate::factory::ImplementationDescriptor;
use crate::provider::ProviderKind;
use di_common::{ComponentType, DependencyError, DependencyResult};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// 绑定注册表 trait
///
/// 配置阶段使用：每个组件类型至多一个绑定，后绑定的覆盖先绑定的。
pub trait ComponentRegistry {
    /// 绑定预先构建的实例
    fn bind_instance<I>(&mut self, instance: Arc<I>)
    where
        I: ?Sized + Send + Sync + 'static;

    /// 绑定实现类，构造器不合法时返回 `IllegalComponent`
    fn bind_class<I>(&mut self, implementation: ImplementationDescriptor<I>) -> DependencyResult<()>
    where
        I: ?Sized + Send + Sync + 'static;

    /// 按名称绑定实现类
    fn bind_by_name<I, R>(&mut self, resolver: &R, name: &str) -> DependencyResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
        R: TypeResolver,
    {
        let implementation = resolver.resolve_implementation::<I>(name).map_err(|e| {
            DependencyError::illegal_component(ComponentType::of::<I>().to_string(), name, e.to_string())
        })?;
        self.bind_class(implementation)
    }

    /// 检查组件是否已绑定
    fn is_bound(&self, component: ComponentType) -> bool;

    /// 获取所有绑定信息
    fn bindings(&self) -> Vec<BindingInfo>;
}

/// 绑定信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingInfo {
    /// 组件类型
    pub component: ComponentType,
    /// Provider 类型
    pub kind: ProviderKind,
    /// 声明的依赖
    pub dependencies: Vec<ComponentType>,
}

/// 依赖图节点
#[derive(Debug, Clone)]
pub struct DependencyGraphNode {
    /// 组件类型
    pub component: ComponentType,
    /// 依赖的组件类型列表
    pub dependencies: Vec<ComponentType>,
}

impl From<&BindingInfo> for DependencyGraphNode {
    fn from(binding: &BindingInfo) -> Self {
        Self {
            component: binding.component,
            dependencies: binding.dependencies.clone(),
        }
    }
}

/// 依赖验证器
pub trait DependencyValidator: Send + Sync {
    /// 验证依赖图中没有缺失和循环依赖
    fn validate(&self, graph: &[DependencyGraphNode]) -> DependencyResult<()>;
}

/// 默认依赖验证器
///
/// 从每个节点出发做深度优先遍历，维护有序的访问路径。
#[derive(Debug, Default)]
pub struct DefaultDependencyValidator;

impl DependencyValidator for DefaultDependencyValidator {
    fn validate(&self, graph: &[DependencyGraphNode]) -> DependencyResult<()> {
        let nodes: HashMap<ComponentType, &[ComponentType]> = graph
            .iter()
            .map(|node| (node.component, node.dependencies.as_slice()))
            .collect();

        let mut verified = HashSet::new();
        for node in graph {
            let mut visiting = vec![node.component];
            self.dfs_check(node.component, &nodes, &mut visiting, &mut verified)?;
        }

        Ok(())
    }
}

impl DefaultDependencyValidator {
    fn dfs_check(
        &self,
        current: ComponentType,
        nodes: &HashMap<ComponentType, &[ComponentType]>,
        visiting: &mut Vec<ComponentType>,
        verified: &mut HashSet<ComponentType>,
    ) -> DependencyResult<()> {
        if verified.contains(&current) {
            return Ok(());
        }

        let dependencies = nodes.get(&current).copied().unwrap_or_default();
        for &dependency in dependencies {
            if !nodes.contains_key(&dependency) {
                return Err(DependencyError::dependency_not_found(dependency, current));
            }
            if let Some(position) = visiting.iter().position(|c| *c == dependency) {
                return Err(DependencyError::cyclic(visiting[position..].iter().copied()));
            }
            visiting.push(dependency);
            self.dfs_check(dependency, nodes, visiting, verified)?;
            visiting.pop();
        }

        // 子图无缺失、无循环，后续遍历可直接跳过
        verified.insert(current);
        Ok(())
    }
}
