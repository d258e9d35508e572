//! 组件构造描述抽象
//!
//! 以显式声明的方式描述实现类的构造方式：每个构造器携带有序的依赖类型列表
//! 和构造闭包，注入方法携带产出类型、依赖列表和调用闭包。

use crate::resolver::Instance;
use di_common::{ComponentType, DependencyError, DependencyResult};
use std::sync::Arc;

/// 构造闭包类型
pub type ConstructorFn<I> =
    Arc<dyn Fn(&mut Arguments) -> DependencyResult<Arc<I>> + Send + Sync>;

/// 注入方法闭包类型
pub type InjectionMethodFn<H> =
    Arc<dyn Fn(&H, &mut Arguments) -> DependencyResult<Instance> + Send + Sync>;

/// 已解析的参数列表
///
/// 参数按声明顺序排列，构造闭包通过 [`Arguments::next`] 依次取出。
pub struct Arguments {
    /// 正在构造的组件
    component: ComponentType,
    /// 剩余参数
    values: std::vec::IntoIter<(ComponentType, Instance)>,
}

impl Arguments {
    /// 创建参数列表
    pub fn new(component: ComponentType, values: Vec<(ComponentType, Instance)>) -> Self {
        Self {
            component,
            values: values.into_iter(),
        }
    }

    /// 创建空参数列表
    pub fn empty(component: ComponentType) -> Self {
        Self::new(component, Vec::new())
    }

    /// 取出下一个参数
    pub fn next<T>(&mut self) -> DependencyResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let requested = ComponentType::of::<T>();
        let Some((declared, instance)) = self.values.next() else {
            return Err(DependencyError::creation_failed(
                self.component,
                format!("参数不足: 读取 {requested} 时已没有剩余参数"),
            ));
        };

        instance.downcast::<T>().ok_or_else(|| {
            DependencyError::creation_failed(
                self.component,
                format!("参数类型不匹配: 声明为 {declared}, 读取为 {requested}"),
            )
        })
    }

    /// 剩余参数数量
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// 正在构造的组件
    pub fn component(&self) -> ComponentType {
        self.component
    }
}

/// 构造器描述
pub struct ConstructorDescriptor<I: ?Sized> {
    /// 是否标记为注入构造器
    injectable: bool,
    /// 有序的参数类型列表
    parameters: Vec<ComponentType>,
    /// 构造闭包
    factory: ConstructorFn<I>,
}

impl<I> ConstructorDescriptor<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    /// 创建标记为注入的构造器
    pub fn inject<F>(parameters: Vec<ComponentType>, factory: F) -> Self
    where
        F: Fn(&mut Arguments) -> DependencyResult<Arc<I>> + Send + Sync + 'static,
    {
        Self {
            injectable: true,
            parameters,
            factory: Arc::new(factory),
        }
    }

    /// 创建未标记的构造器
    pub fn plain<F>(parameters: Vec<ComponentType>, factory: F) -> Self
    where
        F: Fn(&mut Arguments) -> DependencyResult<Arc<I>> + Send + Sync + 'static,
    {
        Self {
            injectable: false,
            parameters,
            factory: Arc::new(factory),
        }
    }

    /// 创建未标记的无参构造器
    pub fn no_args<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<I> + Send + Sync + 'static,
    {
        Self::plain(Vec::new(), move |_| Ok(factory()))
    }

    /// 是否标记为注入构造器
    pub fn is_injectable(&self) -> bool {
        self.injectable
    }

    /// 有序的参数类型列表
    pub fn parameters(&self) -> &[ComponentType] {
        &self.parameters
    }

    /// 使用已解析的参数构造实例
    pub fn construct(&self, arguments: &mut Arguments) -> DependencyResult<Arc<I>> {
        (self.factory)(arguments)
    }

    /// 将产出转换为另一种组件类型，通常用于 `Arc<Impl>` 到 `Arc<dyn Trait>` 的转换
    pub fn map<J, F>(self, cast: F) -> ConstructorDescriptor<J>
    where
        J: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<I>) -> Arc<J> + Send + Sync + 'static,
    {
        let factory = self.factory;
        ConstructorDescriptor {
            injectable: self.injectable,
            parameters: self.parameters,
            factory: Arc::new(move |arguments: &mut Arguments| factory(arguments).map(&cast)),
        }
    }
}

impl<I: ?Sized> Clone for ConstructorDescriptor<I> {
    fn clone(&self) -> Self {
        Self {
            injectable: self.injectable,
            parameters: self.parameters.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<I: ?Sized> std::fmt::Debug for ConstructorDescriptor<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("injectable", &self.injectable)
            .field("parameters", &self.parameters)
            .field("factory", &"<function>")
            .finish()
    }
}

/// 注入方法描述
///
/// 注入方法定义在持有者组件上，调用后产出另一种组件类型的实例。
pub struct InjectionMethod<H: ?Sized> {
    /// 方法名称
    name: String,
    /// 产出的组件类型
    produces: ComponentType,
    /// 有序的参数类型列表
    parameters: Vec<ComponentType>,
    /// 调用闭包
    invoke: InjectionMethodFn<H>,
}

impl<H> InjectionMethod<H>
where
    H: ?Sized + Send + Sync + 'static,
{
    /// 创建注入方法，产出类型由闭包返回值推断
    pub fn new<P, F>(name: impl Into<String>, parameters: Vec<ComponentType>, method: F) -> Self
    where
        P: ?Sized + Send + Sync + 'static,
        F: Fn(&H, &mut Arguments) -> DependencyResult<Arc<P>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            produces: ComponentType::of::<P>(),
            parameters,
            invoke: Arc::new(move |holder: &H, arguments: &mut Arguments| {
                method(holder, arguments).map(Instance::new)
            }),
        }
    }

    /// 方法名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 产出的组件类型
    pub fn produces(&self) -> ComponentType {
        self.produces
    }

    /// 有序的参数类型列表
    pub fn parameters(&self) -> &[ComponentType] {
        &self.parameters
    }

    /// 在持有者实例上调用方法
    pub fn invoke(&self, holder: &H, arguments: &mut Arguments) -> DependencyResult<Instance> {
        (self.invoke)(holder, arguments)
    }
}

impl<H: ?Sized> Clone for InjectionMethod<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            produces: self.produces,
            parameters: self.parameters.clone(),
            invoke: Arc::clone(&self.invoke),
        }
    }
}

impl<H: ?Sized> std::fmt::Debug for InjectionMethod<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectionMethod")
            .field("name", &self.name)
            .field("produces", &self.produces)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// 实现类描述
///
/// 替代运行时反射：构造器、注入标记和注入方法都在这里显式声明。
pub struct ImplementationDescriptor<I: ?Sized> {
    /// 实现名称
    name: String,
    /// 所有构造器
    constructors: Vec<ConstructorDescriptor<I>>,
    /// 注入方法
    injection_methods: Vec<InjectionMethod<I>>,
}

impl<I> ImplementationDescriptor<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    /// 创建新的实现类描述
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructors: Vec::new(),
            injection_methods: Vec::new(),
        }
    }

    /// 由 [`Injectable`] 类型创建实现类描述
    pub fn injectable<T, F>(cast: F) -> Self
    where
        T: Injectable,
        F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
    {
        Self::new(ComponentType::of::<T>().short_name())
            .with_constructor(T::injectable_constructor().map(cast))
    }

    /// 添加构造器
    pub fn with_constructor(mut self, constructor: ConstructorDescriptor<I>) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// 添加注入方法
    pub fn with_injection_method(mut self, method: InjectionMethod<I>) -> Self {
        self.injection_methods.push(method);
        self
    }

    /// 实现名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 所有构造器
    pub fn constructors(&self) -> &[ConstructorDescriptor<I>] {
        &self.constructors
    }

    /// 注入方法
    pub fn injection_methods(&self) -> &[InjectionMethod<I>] {
        &self.injection_methods
    }

    /// 选择构造器
    ///
    /// 多于一个注入构造器时不合法；恰好一个时选中它；没有注入构造器时必须存在无参构造器。
    pub fn select_constructor(&self) -> Result<ConstructorDescriptor<I>, String> {
        let mut injectable = self.constructors.iter().filter(|c| c.is_injectable());
        match (injectable.next(), injectable.next()) {
            (Some(_), Some(_)) => Err(format!(
                "存在 {} 个注入构造器",
                self.constructors.iter().filter(|c| c.is_injectable()).count()
            )),
            (Some(constructor), None) => Ok(constructor.clone()),
            (None, _) => self
                .constructors
                .iter()
                .find(|c| c.parameters().is_empty())
                .cloned()
                .ok_or_else(|| "没有注入构造器，也没有无参构造器".to_string()),
        }
    }
}

impl<I: ?Sized> std::fmt::Debug for ImplementationDescriptor<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImplementationDescriptor")
            .field("name", &self.name)
            .field("constructors", &self.constructors)
            .field("injection_methods", &self.injection_methods)
            .finish()
    }
}

/// 可注入组件 trait
///
/// 通常由 `#[derive(Injectable)]` 生成：标记 `#[inject]` 的字段按声明顺序成为依赖。
pub trait Injectable: Send + Sync + Sized + 'static {
    /// 注入构造器
    fn injectable_constructor() -> ConstructorDescriptor<Self>;
}
