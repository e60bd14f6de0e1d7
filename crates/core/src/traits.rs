//! Registry abstraction
//!
//! The composition engine never owns a registry; it consumes one through
//! `ServiceProvider`. Any container that can map a capability type to a
//! service instance (and say "not found" distinctly) can back composition.
//!
//! Thread safety: providers are shared between composers and threads, so
//! `resolve` must be safe to call concurrently (requires Send + Sync).

use std::sync::Arc;

use crate::contract::{ServiceHandle, TypeRef};
use crate::error::RegistryError;

/// Resolves capability types to service instances
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tessera_core::{RegistryError, ServiceHandle, ServiceProvider, TypeRef};
///
/// trait Clock: Send + Sync {}
/// struct Fixed;
/// impl Clock for Fixed {}
///
/// struct OnlyClocks(Arc<dyn Clock>);
///
/// impl ServiceProvider for OnlyClocks {
///     fn resolve(&self, capability: &TypeRef) -> Result<ServiceHandle, RegistryError> {
///         if capability.is::<dyn Clock>() {
///             Ok(ServiceHandle::new(self.0.clone()))
///         } else {
///             Err(RegistryError::NotFound(*capability))
///         }
///     }
/// }
///
/// let provider = OnlyClocks(Arc::new(Fixed));
/// assert!(provider.resolve(&TypeRef::interface::<dyn Clock>()).is_ok());
/// ```
pub trait ServiceProvider: Send + Sync {
    /// Resolve the service bound to `capability`
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` when no binding exists. Other
    /// variants report a binding that exists but could not be produced.
    fn resolve(&self, capability: &TypeRef) -> Result<ServiceHandle, RegistryError>;

    /// True if a binding exists for `capability`
    ///
    /// The default implementation resolves and discards the service.
    fn contains(&self, capability: &TypeRef) -> bool {
        self.resolve(capability).is_ok()
    }
}

impl<P: ServiceProvider + ?Sized> ServiceProvider for Arc<P> {
    fn resolve(&self, capability: &TypeRef) -> Result<ServiceHandle, RegistryError> {
        (**self).resolve(capability)
    }

    fn contains(&self, capability: &TypeRef) -> bool {
        (**self).contains(capability)
    }
}

impl<P: ServiceProvider + ?Sized> ServiceProvider for &P {
    fn resolve(&self, capability: &TypeRef) -> Result<ServiceHandle, RegistryError> {
        (**self).resolve(capability)
    }

    fn contains(&self, capability: &TypeRef) -> bool {
        (**self).contains(capability)
    }
}
