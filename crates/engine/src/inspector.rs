//! Contract inspection
//!
//! Turns a `ContractDescriptor` into the ordered list of capability slots
//! the rest of the pipeline works on. Inspection is a pure function of the
//! descriptor: inspecting the same contract twice yields the same slots.
//!
//! A member becomes a slot when it is a property with both accessors whose
//! type is interface-shaped. Everything else is left out here; whether that
//! is acceptable is decided later by the synthesizer.

use tessera_core::{CapabilitySlot, ComposeError, ComposeResult, ContractDescriptor, MemberDescriptor};
use tracing::debug;

/// Fail with `NotAContract` unless the descriptor is interface-shaped
pub fn ensure_contract(contract: &ContractDescriptor) -> ComposeResult<()> {
    if contract.is_interface() {
        Ok(())
    } else {
        Err(ComposeError::NotAContract {
            name: contract.name(),
        })
    }
}

/// Capability slots of a contract, in declaration order
///
/// # Errors
///
/// Returns `NotAContract` if the contract type is not interface-shaped.
pub fn inspect(contract: &ContractDescriptor) -> ComposeResult<Vec<CapabilitySlot>> {
    ensure_contract(contract)?;

    let slots: Vec<CapabilitySlot> = contract
        .members()
        .iter()
        .filter(|m| m.is_capability())
        .filter_map(|m| {
            m.property_type()
                .map(|ty| CapabilitySlot::new(m.name.clone(), *ty))
        })
        .collect();

    debug!(
        target: "tessera::engine",
        contract = contract.name(),
        slots = slots.len(),
        excluded = contract.members().len() - slots.len(),
        "Inspected contract"
    );
    Ok(slots)
}

/// Members of a contract that inspection does not turn into slots
pub fn excluded_members(contract: &ContractDescriptor) -> Vec<&MemberDescriptor> {
    contract
        .members()
        .iter()
        .filter(|m| !m.is_capability())
        .collect()
}
