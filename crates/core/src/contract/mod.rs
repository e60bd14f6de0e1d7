//! Contract model
//!
//! A contract is an interface-shaped type whose members are capability
//! slots. This module holds the descriptors the engine works from instead
//! of runtime reflection:
//!
//! 1. **Identity**: every type the engine reasons about is a `TypeRef`
//! 2. **Shape**: a contract lists its members in a `ContractDescriptor`
//! 3. **Selection**: members chosen for composition become `CapabilitySlot`s
//! 4. **Binding**: a slot paired with its service is a `ResolvedSlot`
//!
//! ## Module Structure
//!
//! - `type_ref`: Type identity and shape
//! - `descriptor`: Contract and member descriptors
//! - `slot`: Capability slots and resolved slots
//! - `service`: Type-erased service handles
//!
//! ## Usage
//!
//! ```
//! use tessera_core::contract::{ContractDescriptor, MemberDescriptor, TypeRef};
//!
//! trait Clock: Send + Sync {}
//! trait Greeter: Send + Sync {}
//!
//! let greeter = ContractDescriptor::new(TypeRef::interface::<dyn Greeter>())
//!     .with_member(MemberDescriptor::property("clock", TypeRef::interface::<dyn Clock>()));
//!
//! assert!(greeter.is_interface());
//! assert_eq!(greeter.members().len(), 1);
//! ```

pub mod descriptor;
pub mod service;
pub mod slot;
pub mod type_ref;

// Re-exports
pub use descriptor::{ContractDescriptor, MemberDescriptor, MemberKind};
pub use service::ServiceHandle;
pub use slot::{CapabilitySlot, ResolvedSlot};
pub use type_ref::{short_type_name, TypeRef, TypeShape};
