//! Type synthesis
//!
//! A `SynthesizedType` is the concrete implementation of a contract: one
//! backing field and one accessor pair per capability slot. Instead of
//! emitting a new nominal type per call, the layout is a table from slot
//! name to field index; `ComposedInstance` stores services in that order.
//!
//! ## Completeness
//!
//! Before any layout is built, member names must be unique and every
//! contract member must be covered by a slot. A repeated name or an
//! uncovered member means the synthesized type would not satisfy the
//! contract, and the caller gets `IncompleteContract` naming the member:
//!
//! | Uncovered member | strict_members = true | strict_members = false |
//! |------------------|-----------------------|------------------------|
//! | Method | error | error |
//! | Interface-typed property | error | error |
//! | Value property | error | left unimplemented, warned |
//!
//! ## Caching
//!
//! Layouts are cached per contract `TypeId`. The process-wide synthesizer
//! (`TypeSynthesizer::global()`) is append-only: a layout is built once,
//! under the map's shard write lock, and shared by every later composition
//! of the same contract.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tessera_core::{
    CapabilitySlot, ComposeError, ComposeResult, ContractDescriptor, MemberKind, TypeRef,
};
use tracing::{info, warn};

use crate::composer::ComposerConfig;

/// Backing field and accessor pair for one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    slot: CapabilitySlot,
    field_name: String,
    index: usize,
}

impl FieldLayout {
    /// The slot this field implements
    pub fn slot(&self) -> &CapabilitySlot {
        &self.slot
    }

    /// Accessor name (same as the slot name)
    pub fn name(&self) -> &str {
        self.slot.name()
    }

    /// Declared field type
    pub fn slot_type(&self) -> &TypeRef {
        self.slot.slot_type()
    }

    /// Private backing field name, `_<lowercased slot name>`
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Storage position inside a composed instance
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Runtime implementation of a contract
#[derive(Debug)]
pub struct SynthesizedType {
    contract: TypeRef,
    name: String,
    fields: Vec<FieldLayout>,
    by_name: HashMap<String, usize>,
}

impl SynthesizedType {
    fn layout(contract: &ContractDescriptor, slots: &[CapabilitySlot]) -> Self {
        let fields: Vec<FieldLayout> = slots
            .iter()
            .enumerate()
            .map(|(index, slot)| FieldLayout {
                slot: slot.clone(),
                field_name: format!("_{}", slot.name().to_lowercase()),
                index,
            })
            .collect();
        let by_name = fields
            .iter()
            .map(|f| (f.name().to_string(), f.index))
            .collect();

        Self {
            contract: *contract.contract(),
            name: format!("{}Instance", contract.name()),
            fields,
            by_name,
        }
    }

    /// Contract this type implements
    pub fn contract(&self) -> &TypeRef {
        &self.contract
    }

    /// Type name, `<Contract>Instance`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in slot order
    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    /// Field implementing the accessor `name`
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the contract has no capability slots
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Slots implemented by this type, in order
    pub fn slots(&self) -> impl Iterator<Item = &CapabilitySlot> {
        self.fields.iter().map(|f| &f.slot)
    }

    /// Verify this layout implements exactly `slots`
    ///
    /// # Errors
    ///
    /// `SlotBindingMismatch` naming the first slot that differs.
    pub fn conforms_to(&self, slots: &[CapabilitySlot]) -> ComposeResult<()> {
        for (i, slot) in slots.iter().enumerate() {
            if self.fields.get(i).map(|f| &f.slot) != Some(slot) {
                return Err(ComposeError::SlotBindingMismatch {
                    name: slot.name().to_string(),
                });
            }
        }
        if let Some(extra) = self.fields.get(slots.len()) {
            return Err(ComposeError::SlotBindingMismatch {
                name: extra.name().to_string(),
            });
        }
        Ok(())
    }
}

static GLOBAL_SYNTHESIZER: Lazy<Arc<TypeSynthesizer>> =
    Lazy::new(|| Arc::new(TypeSynthesizer::new()));

/// Builds and caches synthesized types
#[derive(Debug, Default)]
pub struct TypeSynthesizer {
    types: DashMap<TypeId, Arc<SynthesizedType>>,
}

impl TypeSynthesizer {
    /// Synthesizer with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide synthesizer shared by default composers
    pub fn global() -> Arc<TypeSynthesizer> {
        GLOBAL_SYNTHESIZER.clone()
    }

    /// Synthesize (or fetch from cache) the implementation of `contract`
    ///
    /// # Errors
    ///
    /// - `IncompleteContract` if a member is not covered by `slots`, or a
    ///   slot name repeats
    /// - `SlotBindingMismatch` if a slot does not match its declared member,
    ///   or the cached layout for this contract differs from `slots`
    pub fn synthesize(
        &self,
        contract: &ContractDescriptor,
        slots: &[CapabilitySlot],
        config: &ComposerConfig,
    ) -> ComposeResult<Arc<SynthesizedType>> {
        check_complete(contract, slots, config.strict_members)?;

        if !config.cache_types {
            return Ok(Arc::new(SynthesizedType::layout(contract, slots)));
        }

        let key = contract.contract().type_id();
        let ty = match self.get(&key) {
            Some(ty) => ty,
            None => self
                .types
                .entry(key)
                .or_insert_with(|| {
                    let ty = SynthesizedType::layout(contract, slots);
                    info!(
                        target: "tessera::engine",
                        contract = contract.name(),
                        type_name = ty.name(),
                        fields = ty.len(),
                        "Synthesized contract type"
                    );
                    Arc::new(ty)
                })
                .value()
                .clone(),
        };

        ty.conforms_to(slots)?;
        Ok(ty)
    }

    fn get(&self, key: &TypeId) -> Option<Arc<SynthesizedType>> {
        self.types.get(key).map(|t| t.value().clone())
    }

    /// Cached layout for `contract`, if one was synthesized
    pub fn cached(&self, contract: &TypeRef) -> Option<Arc<SynthesizedType>> {
        self.get(&contract.type_id())
    }

    /// Number of cached layouts
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if nothing has been synthesized
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn check_complete(
    contract: &ContractDescriptor,
    slots: &[CapabilitySlot],
    strict: bool,
) -> ComposeResult<()> {
    let mut declared_names: HashSet<&str> = HashSet::with_capacity(contract.members().len());
    for member in contract.members() {
        if !declared_names.insert(member.name.as_str()) {
            return Err(ComposeError::IncompleteContract {
                contract: contract.name(),
                member: member.name.clone(),
            });
        }
    }

    let mut covered: HashSet<&str> = HashSet::with_capacity(slots.len());
    for slot in slots {
        if !covered.insert(slot.name()) {
            return Err(ComposeError::IncompleteContract {
                contract: contract.name(),
                member: slot.name().to_string(),
            });
        }
        let declared = contract
            .member(slot.name())
            .and_then(|m| m.property_type());
        if declared != Some(slot.slot_type()) {
            return Err(ComposeError::SlotBindingMismatch {
                name: slot.name().to_string(),
            });
        }
    }

    for member in contract.members() {
        if member.is_capability() && covered.contains(member.name.as_str()) {
            continue;
        }
        match &member.kind {
            MemberKind::Property { ty, .. } if !ty.is_interface() && !strict => {
                warn!(
                    target: "tessera::engine",
                    contract = contract.name(),
                    member = member.name.as_str(),
                    "Value member left unimplemented"
                );
            }
            _ => {
                return Err(ComposeError::IncompleteContract {
                    contract: contract.name(),
                    member: member.name.clone(),
                })
            }
        }
    }
    Ok(())
}
