//! Tessera - runtime composition of contract objects
//!
//! A contract is a trait whose members are capability slots: a getter and
//! setter pair typed as another service trait. Tessera resolves every slot
//! from a service registry, synthesizes (and caches) a field layout for the
//! contract, and hands back an `Arc<dyn Contract>` backed by that layout.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tessera::{contract, ServiceComposer, ServiceRegistry};
//!
//! pub trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//! pub trait Logger: Send + Sync {
//!     fn log(&self, line: &str);
//! }
//!
//! struct Fixed;
//! impl Clock for Fixed {
//!     fn now(&self) -> u64 { 42 }
//! }
//! struct Silent;
//! impl Logger for Silent {
//!     fn log(&self, _line: &str) {}
//! }
//!
//! contract! {
//!     pub trait Greeter {
//!         clock, set_clock: dyn Clock;
//!         logger, set_logger: dyn Logger;
//!     }
//! }
//!
//! let registry = Arc::new(ServiceRegistry::new());
//! registry.register_instance::<dyn Clock>(Arc::new(Fixed));
//! registry.register_instance::<dyn Logger>(Arc::new(Silent));
//!
//! let composer = ServiceComposer::<dyn Greeter>::new(registry);
//! let greeter = composer.implementation()?;
//! greeter.logger().log("hello");
//! assert_eq!(greeter.clock().now(), 42);
//! # Ok::<(), tessera::ComposeError>(())
//! ```
//!
//! # Architecture
//!
//! - `tessera-core`: type references, contract descriptors, errors and the
//!   `ServiceProvider` seam
//! - `tessera-registry`: the in-memory `ServiceRegistry`
//! - `tessera-engine`: inspection, resolution, synthesis, assembly and the
//!   memoizing `ServiceComposer`

pub use tessera_engine::contract;
pub use tessera_engine::{
    Composed, ComposedInstance, Composer, ComposerConfig, Contract, FieldLayout, ServiceComposer,
    ServiceResolver, SynthesizedType, TypeSynthesizer, CONFIG_FILE_NAME,
};

pub use tessera_core::{
    CapabilitySlot, ComposeError, ComposeResult, ContractDescriptor, MemberDescriptor, MemberKind,
    RegistryError, ResolvedSlot, ServiceHandle, ServiceProvider, TypeRef, TypeShape,
};

pub use tessera_registry::{Lifetime, ServiceRegistry};
