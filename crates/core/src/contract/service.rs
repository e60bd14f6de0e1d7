//! Type-erased service handles
//!
//! Registries hand services to the engine as `ServiceHandle`s. A handle
//! wraps an `Arc<S>` for the capability type `S` (usually `dyn Trait`)
//! behind `dyn Any`, so handles for unrelated capabilities can share one
//! container while still downcasting back to the exact `Arc<S>`.
//!
//! Cloning a handle clones the outer `Arc`; the service itself is shared.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use super::type_ref::short_type_name;

/// A shareable service instance tagged with its capability type
#[derive(Clone)]
pub struct ServiceHandle {
    type_id: TypeId,
    type_name: &'static str,
    // Address of the service itself, for identity checks
    addr: usize,
    value: Arc<dyn Any + Send + Sync>,
}

impl ServiceHandle {
    /// Wrap a service for capability type `S`
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tessera_core::ServiceHandle;
    ///
    /// trait Clock: Send + Sync {
    ///     fn now(&self) -> u64;
    /// }
    /// struct Fixed;
    /// impl Clock for Fixed {
    ///     fn now(&self) -> u64 { 7 }
    /// }
    ///
    /// let clock: Arc<dyn Clock> = Arc::new(Fixed);
    /// let handle = ServiceHandle::new(clock);
    /// assert_eq!(handle.downcast::<dyn Clock>().unwrap().now(), 7);
    /// ```
    pub fn new<S: ?Sized + Send + Sync + 'static>(service: Arc<S>) -> Self {
        let addr = Arc::as_ptr(&service) as *const () as usize;
        Self {
            type_id: TypeId::of::<S>(),
            type_name: short_type_name::<S>(),
            addr,
            value: Arc::new(service),
        }
    }

    /// `TypeId` of the capability type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Short name of the capability type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True if the handle holds a service for capability type `S`
    pub fn is<S: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<S>()
    }

    /// Recover the typed service, or `None` if `S` is not the capability type
    pub fn downcast<S: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<S>> {
        self.value.downcast_ref::<Arc<S>>().cloned()
    }

    /// True if both handles point at the same service instance
    pub fn same_service(&self, other: &ServiceHandle) -> bool {
        self.type_id == other.type_id && self.addr == other.addr
    }

    /// True if this handle wraps exactly `service`
    pub fn is_service<S: ?Sized + 'static>(&self, service: &Arc<S>) -> bool {
        self.is::<S>() && self.addr == Arc::as_ptr(service) as *const () as usize
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("type", &self.type_name)
            .field("addr", &format_args!("{:#x}", self.addr))
            .finish()
    }
}
