//! Composition engine for Tessera
//!
//! This crate turns a contract into a live object:
//! - Inspector: capability slots of a contract descriptor
//! - Resolver: slot lookups against a `ServiceProvider`
//! - Synthesizer: per-contract field layouts, cached process-wide
//! - Assembler: instantiation and by-name slot binding
//! - Composer / ServiceComposer: the pipeline and its memoized typed facade
//!
//! The engine never owns a registry. It is handed one as
//! `Arc<dyn ServiceProvider>` and only ever calls `resolve`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assembler;
pub mod composer;
pub mod inspector;
pub mod instance;
pub mod resolver;
pub mod synthesizer;
mod typed;

pub use composer::{Composer, ComposerConfig, ServiceComposer, CONFIG_FILE_NAME};
pub use instance::{Composed, ComposedInstance};
pub use resolver::ServiceResolver;
pub use synthesizer::{FieldLayout, SynthesizedType, TypeSynthesizer};
pub use typed::Contract;

// Re-exported for `contract!` expansions and downstream convenience
pub use tessera_core::{
    CapabilitySlot, ComposeError, ComposeResult, ContractDescriptor, MemberDescriptor,
    MemberKind, RegistryError, ResolvedSlot, ServiceHandle, ServiceProvider, TypeRef, TypeShape,
};
