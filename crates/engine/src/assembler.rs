//! Instance assembly
//!
//! Instantiates a synthesized type with every field empty, then calls the
//! setter matching each resolved slot's name. Nothing is returned until the
//! instance is sealed, which requires every field to hold a service.

use std::sync::Arc;

use tessera_core::{ComposeResult, ResolvedSlot};
use tracing::debug;

use crate::instance::{ComposedInstance, UnboundInstance};
use crate::synthesizer::SynthesizedType;

/// Instantiate `ty` and bind every resolved slot by name
///
/// # Errors
///
/// - `SlotBindingMismatch` if a resolved slot has no accessor on `ty`, or a
///   field of `ty` received no service
/// - `SlotTypeMismatch` if a service does not have its field's type
pub fn assemble(
    ty: Arc<SynthesizedType>,
    resolved: Vec<ResolvedSlot>,
) -> ComposeResult<ComposedInstance> {
    let mut instance = UnboundInstance::new(ty.clone());

    for ResolvedSlot { slot, service } in resolved {
        instance.bind(slot.name(), service)?;
        debug!(
            target: "tessera::engine",
            type_name = ty.name(),
            slot = slot.name(),
            "Bound slot"
        );
    }

    instance.seal()
}
