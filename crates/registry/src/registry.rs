//! Service registry
//!
//! `ServiceRegistry` maps capability types to bindings. The map is a
//! `DashMap` keyed by `TypeId`, so concurrent resolutions only contend on
//! a shard read lock, and registration can happen while other threads
//! resolve.
//!
//! # Keys
//!
//! Keys are shape-agnostic: a binding is found by `TypeId` alone, so a
//! `TypeRef::concrete::<u32>()` lookup finds a `register_instance::<u32>`
//! binding. The generic registration methods cannot tell a trait object
//! from a concrete type, and record every key as interface-shaped.
//!
//! # Thread Safety
//!
//! All methods take `&self`. Factories run after the map guard has been
//! released, so a factory may itself resolve from the same registry.

use std::any::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tessera_core::{RegistryError, ServiceHandle, ServiceProvider, TypeRef};
use tracing::debug;

use crate::binding::{Binding, Factory, Lifetime};

struct Registration {
    capability: TypeRef,
    binding: Binding,
}

/// In-memory registry of services keyed by capability type
#[derive(Default)]
pub struct ServiceRegistry {
    bindings: DashMap<TypeId, Registration>,
    lookups: AtomicU64,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a pre-built service to capability `S`
    ///
    /// Replaces any existing binding for `S`.
    pub fn register_instance<S>(&self, service: Arc<S>)
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.insert(TypeRef::interface::<S>(), Binding::Instance(ServiceHandle::new(service)));
    }

    /// Bind capability `S` to a factory that runs once, on first resolution
    pub fn register_singleton<S, F>(&self, factory: F)
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<S> + Send + Sync + 'static,
    {
        self.register_factory::<S, _>(Lifetime::Singleton, move || Ok(factory()));
    }

    /// Bind capability `S` to a factory that runs on every resolution
    pub fn register_transient<S, F>(&self, factory: F)
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<S> + Send + Sync + 'static,
    {
        self.register_factory::<S, _>(Lifetime::Transient, move || Ok(factory()));
    }

    /// Bind capability `S` to a fallible factory
    ///
    /// A factory error surfaces as `RegistryError::Factory`. A failed
    /// singleton is not cached; the next resolution tries again.
    pub fn register_factory<S, F>(&self, lifetime: Lifetime, factory: F)
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn() -> Result<Arc<S>, String> + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move || factory().map(ServiceHandle::new::<S>));
        let binding = match lifetime {
            Lifetime::Singleton => Binding::singleton(factory),
            Lifetime::Transient => Binding::Transient(factory),
        };
        self.insert(TypeRef::interface::<S>(), binding);
    }

    fn insert(&self, capability: TypeRef, binding: Binding) {
        let lifetime = binding.lifetime();
        let replaced = self
            .bindings
            .insert(
                capability.type_id(),
                Registration {
                    capability,
                    binding,
                },
            )
            .is_some();
        debug!(
            target: "tessera::registry",
            capability = capability.name(),
            ?lifetime,
            replaced,
            "Registered service"
        );
    }

    /// Remove the binding for capability `S`, returning true if one existed
    pub fn unregister<S: ?Sized + 'static>(&self) -> bool {
        self.unregister_type(&TypeRef::interface::<S>())
    }

    /// Remove the binding for `capability`, returning true if one existed
    pub fn unregister_type(&self, capability: &TypeRef) -> bool {
        let removed = self.bindings.remove(&capability.type_id()).is_some();
        if removed {
            debug!(target: "tessera::registry", capability = capability.name(), "Unregistered service");
        }
        removed
    }

    /// Resolve capability `S` to its typed service
    ///
    /// # Errors
    ///
    /// Same as [`ServiceProvider::resolve`].
    pub fn get<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<S>, RegistryError> {
        let capability = TypeRef::interface::<S>();
        let handle = self.resolve(&capability)?;
        handle.downcast::<S>().ok_or(RegistryError::TypeMismatch {
            expected: capability,
            actual: handle.type_name(),
        })
    }

    /// Binding rule for `capability`, if registered
    pub fn lifetime_of(&self, capability: &TypeRef) -> Option<Lifetime> {
        self.bindings
            .get(&capability.type_id())
            .map(|r| r.binding.lifetime())
    }

    /// Every registered capability type (unordered)
    ///
    /// Each key is reported as interface-shaped, whatever `S` it was
    /// registered with; only `TypeId` and name are meaningful here.
    pub fn capabilities(&self) -> Vec<TypeRef> {
        self.bindings.iter().map(|r| r.capability).collect()
    }

    /// Number of registered capabilities
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of `resolve` calls served since creation or the last reset
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Reset the lookup counter
    pub fn reset_lookup_count(&self) {
        self.lookups.store(0, Ordering::Relaxed);
    }
}

impl ServiceProvider for ServiceRegistry {
    fn resolve(&self, capability: &TypeRef) -> Result<ServiceHandle, RegistryError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);

        // Clone the binding out so the shard guard is dropped before any factory runs
        let binding = self
            .bindings
            .get(&capability.type_id())
            .map(|r| r.binding.clone())
            .ok_or(RegistryError::NotFound(*capability))?;

        binding.produce(capability)
    }

    fn contains(&self, capability: &TypeRef) -> bool {
        self.bindings.contains_key(&capability.type_id())
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("capabilities", &self.capabilities())
            .field("lookups", &self.lookup_count())
            .finish()
    }
}
