//! Core types and traits for Tessera
//!
//! This crate defines the foundational types shared by the registry and the
//! composition engine:
//! - TypeRef: Identity and shape (interface or concrete) of a type
//! - ContractDescriptor: Declared members of a contract
//! - CapabilitySlot / ResolvedSlot: Slots selected for composition
//! - ServiceHandle: Type-erased, shareable service instance
//! - ServiceProvider: The registry contract consumed by the engine
//! - Error: ComposeError and RegistryError

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod error;
pub mod traits;

pub use contract::{
    short_type_name, CapabilitySlot, ContractDescriptor, MemberDescriptor, MemberKind,
    ResolvedSlot, ServiceHandle, TypeRef, TypeShape,
};
pub use error::{ComposeError, ComposeResult, RegistryError};
pub use traits::ServiceProvider;
