//! Greeter composition through the public facade

use crate::common::*;
use std::sync::Arc;

#[test]
fn test_greeter_uses_registered_services() {
    init_tracing();
    let (registry, clock, logger) = greeter_registry();

    let composer = ServiceComposer::<dyn Greeter>::new(registry);
    let greeter = composer.implementation().unwrap();

    assert_eq!(addr(&greeter.clock()), addr(&clock));
    assert_eq!(addr(&greeter.logger()), addr(&logger));

    greet(greeter.as_ref(), "ada");
    greet(greeter.as_ref(), "grace");
    assert_eq!(logger.lines(), vec!["[0] hello, ada", "[1] hello, grace"]);
}

#[test]
fn test_implementation_is_memoized() {
    let (registry, _, _) = greeter_registry();
    let composer = ServiceComposer::<dyn Greeter>::new(registry);

    assert!(!composer.is_composed());
    let first = composer.implementation().unwrap();
    let second = composer.implementation().unwrap();
    assert!(composer.is_composed());
    assert_eq!(addr(&first), addr(&second));
}

#[test]
fn test_separate_composers_build_separate_instances() {
    let (registry, clock, _) = greeter_registry();

    let a = ServiceComposer::<dyn Greeter>::new(registry.clone())
        .implementation()
        .unwrap();
    let b = ServiceComposer::<dyn Greeter>::new(registry)
        .implementation()
        .unwrap();

    assert_ne!(addr(&a), addr(&b));
    // Instance bindings are shared
    assert_eq!(addr(&a.clock()), addr(&clock));
    assert_eq!(addr(&b.clock()), addr(&clock));

    let layout = TypeSynthesizer::global()
        .cached(&TypeRef::interface::<dyn Greeter>())
        .unwrap();
    assert_eq!(layout.name(), "GreeterInstance");
    assert_eq!(layout.len(), 2);
}

#[test]
fn test_setter_replaces_only_that_instance() {
    let (registry, _, original) = greeter_registry();

    let a = ServiceComposer::<dyn Greeter>::new(registry.clone())
        .compose()
        .unwrap();
    let b = ServiceComposer::<dyn Greeter>::new(registry)
        .compose()
        .unwrap();

    let replacement = Arc::new(MemoryLogger::default());
    a.set_logger(replacement.clone());
    greet(a.as_ref(), "a");
    greet(b.as_ref(), "b");

    assert_eq!(replacement.lines().len(), 1);
    assert_eq!(original.lines().len(), 1);
    assert!(original.lines()[0].ends_with("hello, b"));
}

#[test]
fn test_singleton_factory_is_shared_by_composers() {
    let registry = Arc::new(ServiceRegistry::new());
    registry.register_singleton::<dyn Clock, _>(|| Arc::new(ManualClock::starting_at(100)));
    registry.register_instance::<dyn Logger>(Arc::new(MemoryLogger::default()));

    let a = ServiceComposer::<dyn Greeter>::new(registry.clone())
        .compose()
        .unwrap();
    let b = ServiceComposer::<dyn Greeter>::new(registry)
        .compose()
        .unwrap();

    assert_eq!(addr(&a.clock()), addr(&b.clock()));
    assert_eq!(a.clock().now(), 100);
    assert_eq!(b.clock().now(), 101);
}
