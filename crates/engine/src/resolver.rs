//! Service resolution
//!
//! Thin adapter over a `ServiceProvider`. It looks services up by slot
//! *type* (never by slot name), verifies the provider returned the type
//! it was asked for, and turns "not found" into `UnresolvedCapability`.
//!
//! `resolve_all` does not stop at the first missing binding: it walks every
//! slot and reports the complete set of missing capability types at once.

use tessera_core::{
    CapabilitySlot, ComposeError, ComposeResult, RegistryError, ResolvedSlot, ServiceHandle,
    ServiceProvider, TypeRef,
};
use tracing::{debug, warn};

/// Resolves capability slots of one contract against a provider
pub struct ServiceResolver<'a> {
    provider: &'a dyn ServiceProvider,
    contract: &'static str,
}

impl<'a> ServiceResolver<'a> {
    /// Resolver for the contract named `contract`
    pub fn new(provider: &'a dyn ServiceProvider, contract: &'static str) -> Self {
        Self { provider, contract }
    }

    /// Resolve one capability type
    ///
    /// # Errors
    ///
    /// - `UnresolvedCapability` if the provider has no binding
    /// - `Registry` if the binding exists but failed, or returned the
    ///   wrong capability type
    pub fn resolve(&self, slot_type: &TypeRef) -> ComposeResult<ServiceHandle> {
        match self.lookup(slot_type) {
            Ok(handle) => Ok(handle),
            Err(RegistryError::NotFound(reported)) => {
                self.note_reported(slot_type, &reported);
                Err(ComposeError::UnresolvedCapability {
                    contract: self.contract,
                    missing: vec![*slot_type],
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Resolve every slot, collecting all failures before giving up
    ///
    /// Missing bindings take precedence over other registry failures: if
    /// any slot is unbound the error is `UnresolvedCapability` listing every
    /// missing type once, in slot order.
    pub fn resolve_all(&self, slots: &[CapabilitySlot]) -> ComposeResult<Vec<ResolvedSlot>> {
        let mut resolved = Vec::with_capacity(slots.len());
        let mut missing: Vec<TypeRef> = Vec::new();
        let mut failure: Option<RegistryError> = None;

        for slot in slots {
            match self.lookup(slot.slot_type()) {
                Ok(service) => {
                    debug!(
                        target: "tessera::engine",
                        contract = self.contract,
                        slot = slot.name(),
                        capability = slot.slot_type().name(),
                        "Resolved slot"
                    );
                    resolved.push(ResolvedSlot::new(slot.clone(), service));
                }
                Err(RegistryError::NotFound(reported)) => {
                    self.note_reported(slot.slot_type(), &reported);
                    if !missing.contains(slot.slot_type()) {
                        missing.push(*slot.slot_type());
                    }
                }
                Err(err) => {
                    if failure.is_none() {
                        failure = Some(err);
                    }
                }
            }
        }

        if !missing.is_empty() {
            warn!(
                target: "tessera::engine",
                contract = self.contract,
                missing = %missing.iter().map(TypeRef::name).collect::<Vec<_>>().join(", "),
                "Unresolved capabilities"
            );
            return Err(ComposeError::UnresolvedCapability {
                contract: self.contract,
                missing,
            });
        }
        if let Some(err) = failure {
            warn!(target: "tessera::engine", contract = self.contract, error = %err, "Registry failure");
            return Err(err.into());
        }
        Ok(resolved)
    }

    // The error always names the slot type; a provider may report a deeper one
    fn note_reported(&self, slot_type: &TypeRef, reported: &TypeRef) {
        if reported != slot_type {
            debug!(
                target: "tessera::engine",
                contract = self.contract,
                capability = slot_type.name(),
                reported = reported.name(),
                "Provider reported a different missing type"
            );
        }
    }

    fn lookup(&self, slot_type: &TypeRef) -> Result<ServiceHandle, RegistryError> {
        let handle = self.provider.resolve(slot_type)?;
        if handle.type_id() != slot_type.type_id() {
            return Err(RegistryError::TypeMismatch {
                expected: *slot_type,
                actual: handle.type_name(),
            });
        }
        Ok(handle)
    }
}
