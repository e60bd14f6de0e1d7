//! In-memory service registry
//!
//! Reference implementation of the `ServiceProvider` contract consumed by
//! the composition engine. Services are bound by capability type, usually
//! a trait object such as `dyn Clock`, with one of three binding rules:
//!
//! - **Instance**: a pre-built service, shared by every resolution
//! - **Singleton**: built by a factory on first resolution, then shared
//! - **Transient**: built by a factory on every resolution
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use tessera_core::{ServiceProvider, TypeRef};
//! use tessera_registry::ServiceRegistry;
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//! struct Fixed;
//! impl Clock for Fixed {
//!     fn now(&self) -> u64 { 42 }
//! }
//!
//! let registry = ServiceRegistry::new();
//! registry.register_instance::<dyn Clock>(Arc::new(Fixed));
//!
//! let clock = registry.get::<dyn Clock>().unwrap();
//! assert_eq!(clock.now(), 42);
//! assert!(registry.contains(&TypeRef::interface::<dyn Clock>()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binding;
pub mod registry;

pub use binding::Lifetime;
pub use registry::ServiceRegistry;
