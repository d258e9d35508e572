//! 依赖注入实现的集成测试

use component_macros::Injectable;
use di_impl::{
    ComponentContext, ComponentRegistry, ComponentType, ConstructorDescriptor, ContainerBuilder,
    ContainerSettings, Context, ContextConfig, DependencyError, DependencyResult,
    ImplementationDescriptor, InjectionMethod, ProviderKind, TypeCatalog,
};
use rstest::rstest;
use std::marker::PhantomData;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub trait Component: Send + Sync {}
pub trait Dependency: Send + Sync {}
pub trait AnotherDependency: Send + Sync {}

/// 依赖一个组件的通用实现
#[derive(Injectable)]
pub struct Wired<T: ?Sized + Send + Sync + 'static> {
    #[inject]
    target: Arc<T>,
}

impl<T: ?Sized + Send + Sync + 'static> Component for Wired<T> {}
impl<T: ?Sized + Send + Sync + 'static> Dependency for Wired<T> {}
impl<T: ?Sized + Send + Sync + 'static> AnotherDependency for Wired<T> {}

/// 没有依赖的叶子组件
struct Leaf;

impl Component for Leaf {}
impl Dependency for Leaf {}
impl AnotherDependency for Leaf {}

/// 注入方式
#[derive(Debug, Clone, Copy)]
enum Mechanism {
    Constructor,
    Field,
    Method,
}

/// 方法注入的持有者
struct Injections<A: ?Sized, B: ?Sized>(PhantomData<fn() -> (Box<A>, Box<B>)>);

fn as_component<T: ?Sized + Send + Sync + 'static>(wired: Arc<Wired<T>>) -> Arc<dyn Component> {
    wired
}

fn as_dependency<T: ?Sized + Send + Sync + 'static>(wired: Arc<Wired<T>>) -> Arc<dyn Dependency> {
    wired
}

fn as_another<T: ?Sized + Send + Sync + 'static>(
    wired: Arc<Wired<T>>,
) -> Arc<dyn AnotherDependency> {
    wired
}

/// 以指定的注入方式绑定 `A`，它依赖 `B`
fn bind_requiring<A, B>(
    config: &mut ContextConfig,
    mechanism: Mechanism,
    cast: fn(Arc<Wired<B>>) -> Arc<A>,
) where
    A: ?Sized + Send + Sync + 'static,
    B: ?Sized + Send + Sync + 'static,
{
    let result = match mechanism {
        Mechanism::Constructor => config.bind_class(
            ImplementationDescriptor::<A>::new("ConstructorInjection").with_constructor(
                ConstructorDescriptor::inject(vec![ComponentType::of::<B>()], move |arguments| {
                    Ok(cast(Arc::new(Wired {
                        target: arguments.next::<B>()?,
                    })))
                }),
            ),
        ),
        Mechanism::Field => {
            config.bind_class(ImplementationDescriptor::injectable::<Wired<B>, _>(cast))
        }
        Mechanism::Method => config.bind_class(
            ImplementationDescriptor::<Injections<A, B>>::new("InjectionMethods")
                .with_constructor(ConstructorDescriptor::no_args(|| {
                    Arc::new(Injections(PhantomData))
                }))
                .with_injection_method(InjectionMethod::new(
                    "provide",
                    vec![ComponentType::of::<B>()],
                    move |_: &Injections<A, B>, arguments| {
                        Ok(cast(Arc::new(Wired {
                            target: arguments.next::<B>()?,
                        })))
                    },
                )),
        ),
    };
    result.unwrap();
}

fn assert_dependency_not_found(
    result: DependencyResult<Context>,
    expected_dependency: ComponentType,
    expected_component: ComponentType,
) {
    match result {
        Err(DependencyError::DependencyNotFound {
            dependency,
            component,
        }) => {
            assert_eq!(dependency, expected_dependency);
            assert_eq!(component, expected_component);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("context should not be built"),
    }
}

fn assert_cyclic(result: DependencyResult<Context>, expected: &[ComponentType]) {
    let error = result.err().unwrap();
    let components = error.cyclic_components().unwrap();
    assert_eq!(components.len(), expected.len());
    for component in expected {
        assert!(components.contains(component), "missing {component}");
    }
}

mod type_binding {
    use super::*;

    #[test]
    fn should_bind_type_to_a_specific_instance() {
        init_test_logger();
        let instance: Arc<dyn Component> = Arc::new(Leaf);

        let mut config = ContextConfig::new();
        config.bind_instance(Arc::clone(&instance));

        let context = config.context().unwrap();
        for _ in 0..3 {
            let resolved = context.get::<dyn Component>().unwrap().unwrap();
            assert!(Arc::ptr_eq(&resolved, &instance));
        }
    }

    #[rstest]
    fn should_bind_type_to_an_injectable_component(
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] mechanism: Mechanism,
    ) {
        init_test_logger();
        let dependency: Arc<dyn Dependency> = Arc::new(Leaf);

        let mut config = ContextConfig::new();
        config.bind_instance(Arc::clone(&dependency));
        bind_requiring::<Wired<dyn Dependency>, dyn Dependency>(&mut config, mechanism, |w| w);

        let context = config.context().unwrap();
        let component = context.get::<Wired<dyn Dependency>>().unwrap().unwrap();
        assert!(Arc::ptr_eq(&component.target, &dependency));
    }

    #[rstest]
    fn should_create_new_instance_on_each_get(
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] mechanism: Mechanism,
    ) {
        let mut config = ContextConfig::new();
        config.bind_instance(Arc::new(Leaf) as Arc<dyn Dependency>);
        bind_requiring::<dyn Component, dyn Dependency>(&mut config, mechanism, as_component);

        let context = config.context().unwrap();
        let first = context.get::<dyn Component>().unwrap().unwrap();
        let second = context.get::<dyn Component>().unwrap().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn should_return_empty_if_component_not_defined() {
        let context = ContextConfig::new().context().unwrap();

        assert!(context.get::<dyn Component>().unwrap().is_none());
        assert!(!context.contains::<dyn Component>());
        assert!(context.is_empty());
    }

    #[test]
    fn should_retrieve_component_through_provider_handle() {
        let mut config = ContextConfig::new();
        config.bind_instance(Arc::new(Leaf) as Arc<dyn Dependency>);
        bind_requiring::<dyn Component, dyn Dependency>(
            &mut config,
            Mechanism::Constructor,
            as_component,
        );

        let context = config.context().unwrap();
        let provider = context.get_provider::<dyn Component>().unwrap();
        assert!(!Arc::ptr_eq(&provider.get().unwrap(), &provider.get().unwrap()));
        assert!(context.get_provider::<dyn AnotherDependency>().is_none());
    }

    #[test]
    fn should_bind_dependency_produced_by_injection_method() {
        let mut config = ContextConfig::new();
        config.bind_instance(Arc::new(Leaf) as Arc<dyn AnotherDependency>);
        bind_requiring::<dyn Dependency, dyn AnotherDependency>(
            &mut config,
            Mechanism::Method,
            as_dependency,
        );
        bind_requiring::<dyn Component, dyn Dependency>(
            &mut config,
            Mechanism::Constructor,
            as_component,
        );

        let method_binding = config
            .bindings()
            .into_iter()
            .find(|binding| binding.component == ComponentType::of::<dyn Dependency>())
            .unwrap();
        assert_eq!(method_binding.kind, ProviderKind::MethodInjected);
        assert_eq!(
            method_binding.dependencies,
            vec![ComponentType::of::<dyn AnotherDependency>()]
        );

        let context = config.context().unwrap();
        assert!(context.get::<dyn Component>().unwrap().is_some());
    }

    #[test]
    fn should_resolve_concurrently_from_shared_context() {
        let mut config = ContextConfig::new();
        config.bind_instance(Arc::new(Leaf) as Arc<dyn AnotherDependency>);
        bind_requiring::<dyn Dependency, dyn AnotherDependency>(
            &mut config,
            Mechanism::Field,
            as_dependency,
        );
        bind_requiring::<dyn Component, dyn Dependency>(&mut config, Mechanism::Method, as_component);
        let context = config.context().unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..16 {
                        assert!(context.get::<dyn Component>().unwrap().is_some());
                    }
                });
            }
        });
    }
}

mod bind_by_name {
    use super::*;

    fn catalog() -> TypeCatalog {
        let mut catalog = TypeCatalog::new();
        catalog
            .register::<dyn AnotherDependency, _>("demo.Leaf", || {
                ImplementationDescriptor::new("Leaf").with_constructor(ConstructorDescriptor::no_args(
                    || Arc::new(Leaf) as Arc<dyn AnotherDependency>,
                ))
            })
            .register::<dyn Dependency, _>("demo.DependencyWithNestedDependency", || {
                ImplementationDescriptor::injectable::<Wired<dyn AnotherDependency>, _>(
                    as_dependency,
                )
            })
            .register_component::<dyn Dependency>("Dependency")
            .register_component::<dyn AnotherDependency>("AnotherDependency");
        catalog
    }

    #[test]
    fn should_bind_type_by_name() {
        let catalog = catalog();
        let mut config = ContextConfig::new();
        config
            .bind_by_name::<dyn AnotherDependency, _>(&catalog, "demo.Leaf")
            .unwrap();
        config
            .bind_by_name::<dyn Dependency, _>(&catalog, "demo.DependencyWithNestedDependency")
            .unwrap();

        let context = config.context().unwrap();
        assert!(context.get::<dyn Dependency>().unwrap().is_some());
    }

    #[test]
    fn should_throw_exception_if_name_is_not_a_subtype() {
        let mut config = ContextConfig::new();
        let error = config
            .bind_by_name::<dyn Component, _>(&catalog(), "demo.Leaf")
            .unwrap_err();

        assert!(error.is_illegal_component());
        assert!(!config.is_bound_to::<dyn Component>());
    }

    #[test]
    fn should_throw_exception_if_name_can_not_be_resolved() {
        let mut config = ContextConfig::new();
        let error = config
            .bind_by_name::<dyn Component, _>(&catalog(), "demo.NotExist")
            .unwrap_err();

        match error {
            DependencyError::IllegalComponent { implementation, .. } => {
                assert_eq!(implementation, "demo.NotExist");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn should_bind_from_settings() {
        let settings = ContainerSettings::from_toml_str(
            r#"
            [[bindings]]
            component = "Dependency"
            implementation = "demo.DependencyWithNestedDependency"

            [[bindings]]
            component = "AnotherDependency"
            implementation = "demo.Leaf"
            "#,
        )
        .unwrap();

        let mut config = ContextConfig::new();
        config.bind_settings(&settings, &catalog()).unwrap();

        assert!(config.is_bound_to::<dyn Dependency>());
        assert!(config.is_bound_to::<dyn AnotherDependency>());
        assert!(config.context().unwrap().get::<dyn Dependency>().unwrap().is_some());
    }

    #[test]
    fn should_reject_settings_with_unknown_component_name() {
        let settings = ContainerSettings::from_toml_str(
            r#"
            [[bindings]]
            component = "Component"
            implementation = "demo.Leaf"
            "#,
        )
        .unwrap();

        let error = ContextConfig::new()
            .bind_settings(&settings, &catalog())
            .unwrap_err();
        assert!(error.is_illegal_component());
    }
}

mod constructor_selection {
    use super::*;

    fn requiring_dependency(arguments: &mut di_impl::Arguments) -> DependencyResult<Arc<dyn Component>> {
        Ok(Arc::new(Wired {
            target: arguments.next::<dyn Dependency>()?,
        }))
    }

    #[test]
    fn should_throw_exception_if_multi_inject_constructors_provided() {
        let descriptor = ImplementationDescriptor::<dyn Component>::new("ComponentWithMultiInjectConstructors")
            .with_constructor(ConstructorDescriptor::inject(
                vec![ComponentType::of::<dyn Dependency>()],
                requiring_dependency,
            ))
            .with_constructor(ConstructorDescriptor::inject(Vec::new(), |_| {
                Ok(Arc::new(Leaf) as Arc<dyn Component>)
            }));

        let mut config = ContextConfig::new();
        assert!(config.bind_class(descriptor).unwrap_err().is_illegal_component());
        assert!(!config.is_bound_to::<dyn Component>());
    }

    #[test]
    fn should_throw_exception_if_no_inject_nor_default_constructor_provided() {
        let descriptor = ImplementationDescriptor::<dyn Component>::new("ComponentWithNoInjectNorDefaultConstructor")
            .with_constructor(ConstructorDescriptor::plain(
                vec![ComponentType::of::<dyn Dependency>()],
                requiring_dependency,
            ));

        let error = ContextConfig::new().bind_class(descriptor).unwrap_err();
        assert!(error.is_illegal_component());
    }

    #[test]
    fn should_bind_type_to_a_class_with_default_constructor() {
        let mut config = ContextConfig::new();
        config
            .bind_class(
                ImplementationDescriptor::<dyn Component>::new("ComponentWithDefaultConstructor")
                    .with_constructor(ConstructorDescriptor::plain(
                        vec![ComponentType::of::<dyn Dependency>()],
                        requiring_dependency,
                    ))
                    .with_constructor(ConstructorDescriptor::no_args(|| {
                        Arc::new(Leaf) as Arc<dyn Component>
                    })),
            )
            .unwrap();

        let binding = &config.bindings()[0];
        assert_eq!(binding.kind, ProviderKind::ConstructorInjected);
        assert!(binding.dependencies.is_empty());

        let context = config.context().unwrap();
        assert!(context.get::<dyn Component>().unwrap().is_some());
    }
}

mod dependency_check {
    use super::*;

    #[rstest]
    fn should_throw_exception_if_dependency_not_found(
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] mechanism: Mechanism,
    ) {
        init_test_logger();
        let mut config = ContextConfig::new();
        bind_requiring::<dyn Component, dyn Dependency>(&mut config, mechanism, as_component);

        assert_dependency_not_found(
            config.context(),
            ComponentType::of::<dyn Dependency>(),
            ComponentType::of::<dyn Component>(),
        );
    }

    #[rstest]
    fn should_throw_exception_if_transitive_dependency_not_found(
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] component: Mechanism,
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] dependency: Mechanism,
    ) {
        let mut config = ContextConfig::new();
        bind_requiring::<dyn Component, dyn Dependency>(&mut config, component, as_component);
        bind_requiring::<dyn Dependency, dyn AnotherDependency>(&mut config, dependency, as_dependency);

        assert_dependency_not_found(
            config.context(),
            ComponentType::of::<dyn AnotherDependency>(),
            ComponentType::of::<dyn Dependency>(),
        );
    }

    #[rstest]
    fn should_throw_exception_if_cyclic_dependencies_found(
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] component: Mechanism,
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] dependency: Mechanism,
    ) {
        init_test_logger();
        let mut config = ContextConfig::new();
        bind_requiring::<dyn Component, dyn Dependency>(&mut config, component, as_component);
        bind_requiring::<dyn Dependency, dyn Component>(&mut config, dependency, as_dependency);

        assert_cyclic(
            config.context(),
            &[
                ComponentType::of::<dyn Component>(),
                ComponentType::of::<dyn Dependency>(),
            ],
        );
    }

    #[rstest]
    fn should_throw_exception_if_transitive_cyclic_dependencies_found(
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] component: Mechanism,
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] dependency: Mechanism,
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] another: Mechanism,
    ) {
        let mut config = ContextConfig::new();
        bind_requiring::<dyn Component, dyn Dependency>(&mut config, component, as_component);
        bind_requiring::<dyn Dependency, dyn AnotherDependency>(&mut config, dependency, as_dependency);
        bind_requiring::<dyn AnotherDependency, dyn Component>(&mut config, another, as_another);

        assert_cyclic(
            config.context(),
            &[
                ComponentType::of::<dyn Component>(),
                ComponentType::of::<dyn Dependency>(),
                ComponentType::of::<dyn AnotherDependency>(),
            ],
        );
    }

    #[test]
    fn should_not_report_lead_in_components_as_part_of_cycle() {
        let mut config = ContextConfig::new();
        config.bind_instance(Arc::new(Leaf) as Arc<dyn Component>);
        bind_requiring::<dyn AnotherDependency, dyn Dependency>(
            &mut config,
            Mechanism::Constructor,
            as_another,
        );
        bind_requiring::<dyn Dependency, dyn Dependency>(
            &mut config,
            Mechanism::Constructor,
            as_dependency,
        );

        assert_cyclic(config.context(), &[ComponentType::of::<dyn Dependency>()]);
    }

    #[rstest]
    fn should_pass_with_distinct_dependencies(
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] component: Mechanism,
        #[values(Mechanism::Constructor, Mechanism::Field, Mechanism::Method)] dependency: Mechanism,
    ) {
        let mut config = ContextConfig::new();
        config.bind_instance(Arc::new(Leaf) as Arc<dyn AnotherDependency>);
        bind_requiring::<dyn Component, dyn Dependency>(&mut config, component, as_component);
        bind_requiring::<dyn Dependency, dyn AnotherDependency>(&mut config, dependency, as_dependency);

        let context = config.context().unwrap();
        assert!(context.get::<dyn Component>().unwrap().is_some());
    }
}

mod end_to_end {
    use super::*;

    pub trait Something: Send + Sync {
        fn dependency(&self) -> &Arc<dyn Dependency>;
    }

    struct ConstructorInjectedImpl {
        dependency: Arc<dyn Dependency>,
    }

    impl Something for ConstructorInjectedImpl {
        fn dependency(&self) -> &Arc<dyn Dependency> {
            &self.dependency
        }
    }

    #[test]
    fn should_wire_constructor_injected_implementation() {
        let dependency: Arc<dyn Dependency> = Arc::new(Leaf);

        let mut config = ContextConfig::new();
        config.bind_instance(Arc::clone(&dependency));
        config
            .bind_class(
                ImplementationDescriptor::<dyn Something>::new("ConstructorInjectedImpl")
                    .with_constructor(ConstructorDescriptor::inject(
                        vec![ComponentType::of::<dyn Dependency>()],
                        |arguments| {
                            Ok(Arc::new(ConstructorInjectedImpl {
                                dependency: arguments.next::<dyn Dependency>()?,
                            }) as Arc<dyn Something>)
                        },
                    )),
            )
            .unwrap();

        let context = config.context().unwrap();
        let something = context.get::<dyn Something>().unwrap().unwrap();
        assert!(Arc::ptr_eq(something.dependency(), &dependency));
    }

    #[test]
    fn should_fail_validation_for_missing_constructor_dependency() {
        let mut config = ContextConfig::new();
        config
            .bind_class(
                ImplementationDescriptor::<dyn Component>::new("MissingDependencyConstructor")
                    .with_constructor(ConstructorDescriptor::inject(
                        vec![ComponentType::of::<dyn Dependency>()],
                        |arguments| {
                            Ok(Arc::new(Wired {
                                target: arguments.next::<dyn Dependency>()?,
                            }) as Arc<dyn Component>)
                        },
                    )),
            )
            .unwrap();

        assert_dependency_not_found(
            config.context(),
            ComponentType::of::<dyn Dependency>(),
            ComponentType::of::<dyn Component>(),
        );
    }
}
