//! Registry lifetimes as seen by composed instances

use crate::common::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_transient_bindings_give_each_instance_its_own_service() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = built.clone();

    let registry = Arc::new(ServiceRegistry::new());
    registry.register_transient::<dyn Clock, _>(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Arc::new(ManualClock::default())
    });
    registry.register_instance::<dyn Logger>(Arc::new(MemoryLogger::default()));

    let a = ServiceComposer::<dyn Greeter>::new(registry.clone())
        .compose()
        .unwrap();
    let b = ServiceComposer::<dyn Greeter>::new(registry.clone())
        .compose()
        .unwrap();

    assert_ne!(addr(&a.clock()), addr(&b.clock()));
    assert_eq!(built.load(Ordering::SeqCst), 2);
    assert_eq!(registry.lifetime_of(&TypeRef::interface::<dyn Clock>()), Some(Lifetime::Transient));
}

#[test]
fn test_unregister_then_reregister() {
    let (registry, _, _) = greeter_registry();
    assert_eq!(registry.len(), 2);

    assert!(registry.unregister::<dyn Logger>());
    assert!(!registry.unregister::<dyn Logger>());
    assert!(ServiceComposer::<dyn Greeter>::new(registry.clone())
        .compose()
        .is_err());

    let logger = Arc::new(MemoryLogger::default());
    registry.register_instance::<dyn Logger>(logger.clone());
    let greeter = ServiceComposer::<dyn Greeter>::new(registry)
        .compose()
        .unwrap();
    assert_eq!(addr(&greeter.logger()), addr(&logger));
}
