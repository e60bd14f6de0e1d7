//! Capability slots
//!
//! A `CapabilitySlot` is a contract member selected for composition. A
//! `ResolvedSlot` pairs it with the service the registry returned and only
//! lives for the duration of one composition call.

use std::fmt;

use super::{ServiceHandle, TypeRef};

/// One named, interface-typed member of a contract
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapabilitySlot {
    name: String,
    slot_type: TypeRef,
}

impl CapabilitySlot {
    /// Create a slot
    pub fn new(name: impl Into<String>, slot_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            slot_type,
        }
    }

    /// Slot name (the accessor name on the contract)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capability type the slot holds
    pub fn slot_type(&self) -> &TypeRef {
        &self.slot_type
    }
}

impl fmt::Display for CapabilitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.slot_type)
    }
}

/// A capability slot paired with its resolved service
#[derive(Debug, Clone)]
pub struct ResolvedSlot {
    /// The slot being bound
    pub slot: CapabilitySlot,
    /// Service resolved for the slot's type
    pub service: ServiceHandle,
}

impl ResolvedSlot {
    /// Pair a slot with a service
    pub fn new(slot: CapabilitySlot, service: ServiceHandle) -> Self {
        Self { slot, service }
    }
}
