//! Failure reporting: missing bindings, broken factories, retry after fix

use crate::common::*;
use std::sync::Arc;

#[test]
fn test_missing_logger_is_named() {
    let registry = Arc::new(ServiceRegistry::new());
    registry.register_instance::<dyn Clock>(Arc::new(ManualClock::default()));

    let err = ServiceComposer::<dyn Greeter>::new(registry)
        .implementation()
        .unwrap_err();

    assert_eq!(err.missing_capabilities(), &[TypeRef::interface::<dyn Logger>()]);
    assert_eq!(
        err.to_string(),
        "cannot compose Greeter: unresolved capabilities [Logger]"
    );
    assert!(err.is_configuration_error());
    assert!(!err.is_defect());
}

#[test]
fn test_empty_registry_lists_every_capability() {
    let registry = Arc::new(ServiceRegistry::new());

    let err = ServiceComposer::<dyn Greeter>::new(registry)
        .compose()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot compose Greeter: unresolved capabilities [Clock, Logger]"
    );
}

#[test]
fn test_failure_is_not_memoized() {
    let registry = Arc::new(ServiceRegistry::new());
    registry.register_instance::<dyn Clock>(Arc::new(ManualClock::default()));
    let composer = ServiceComposer::<dyn Greeter>::new(registry.clone());

    assert!(composer.implementation().is_err());
    assert!(!composer.is_composed());

    registry.register_instance::<dyn Logger>(Arc::new(MemoryLogger::default()));
    let greeter = composer.implementation().unwrap();
    assert_eq!(addr(&greeter), addr(&composer.implementation().unwrap()));
}

#[test]
fn test_factory_failure_surfaces_as_registry_error() {
    let registry = Arc::new(ServiceRegistry::new());
    registry.register_instance::<dyn Clock>(Arc::new(ManualClock::default()));
    registry.register_factory::<dyn Logger, _>(Lifetime::Singleton, || {
        Err("log directory is read-only".to_string())
    });

    let err = ServiceComposer::<dyn Greeter>::new(registry)
        .compose()
        .unwrap_err();

    match err {
        ComposeError::Registry(inner) => {
            assert!(inner.to_string().contains("log directory is read-only"));
        }
        other => panic!("expected registry error, got {other}"),
    }
}

#[test]
fn test_missing_binding_wins_over_factory_failure() {
    let registry = Arc::new(ServiceRegistry::new());
    registry.register_factory::<dyn Logger, _>(Lifetime::Transient, || Err("down".to_string()));

    let err = ServiceComposer::<dyn Greeter>::new(registry)
        .compose()
        .unwrap_err();
    assert_eq!(err.missing_capabilities(), &[TypeRef::interface::<dyn Clock>()]);
}
