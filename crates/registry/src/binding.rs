//! Binding rules
//!
//! A binding decides how a registered capability turns into a service
//! handle on each resolution. Bindings are cheap to clone so the registry
//! can release its map guard before running user factories.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tessera_core::{RegistryError, ServiceHandle, TypeRef};

/// Factory producing a service handle, or a failure description
pub(crate) type Factory = Arc<dyn Fn() -> Result<ServiceHandle, String> + Send + Sync>;

/// How long a resolved service lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// One instance shared by every resolution
    Singleton,
    /// A new instance on every resolution
    Transient,
}

#[derive(Clone)]
pub(crate) enum Binding {
    Instance(ServiceHandle),
    Singleton {
        factory: Factory,
        cell: Arc<OnceCell<ServiceHandle>>,
    },
    Transient(Factory),
}

impl Binding {
    pub(crate) fn singleton(factory: Factory) -> Self {
        Binding::Singleton {
            factory,
            cell: Arc::new(OnceCell::new()),
        }
    }

    pub(crate) fn lifetime(&self) -> Lifetime {
        match self {
            Binding::Instance(_) | Binding::Singleton { .. } => Lifetime::Singleton,
            Binding::Transient(_) => Lifetime::Transient,
        }
    }

    /// Produce the handle for one resolution
    ///
    /// A failing singleton factory leaves the cell empty, so the next
    /// resolution runs the factory again.
    pub(crate) fn produce(&self, capability: &TypeRef) -> Result<ServiceHandle, RegistryError> {
        let handle = match self {
            Binding::Instance(handle) => handle.clone(),
            Binding::Singleton { factory, cell } => cell
                .get_or_try_init(|| factory())
                .map_err(|reason| factory_error(capability, reason))?
                .clone(),
            Binding::Transient(factory) => {
                factory().map_err(|reason| factory_error(capability, reason))?
            }
        };

        if handle.type_id() != capability.type_id() {
            return Err(RegistryError::TypeMismatch {
                expected: *capability,
                actual: handle.type_name(),
            });
        }
        Ok(handle)
    }
}

fn factory_error(capability: &TypeRef, reason: String) -> RegistryError {
    RegistryError::Factory {
        capability: *capability,
        reason,
    }
}
