//! Typed contracts
//!
//! A contract is a trait whose members are capability accessors. The
//! `Contract` trait links such a trait (as `dyn Trait`) to its descriptor
//! and tells the engine how to expose a composed instance as `Arc<dyn Trait>`.
//!
//! The `contract!` macro writes all three pieces from one declaration:
//!
//! 1. the contract trait, with a getter and setter per slot
//! 2. `impl Contract for dyn Trait` with the matching descriptor
//! 3. `impl Trait for Composed<dyn Trait>` reading and writing slots
//!
//! It also gives `dyn Trait` a `Debug` impl so composition results can be
//! printed and unwrapped.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use tessera_engine::{contract, ServiceComposer};
//! use tessera_registry::ServiceRegistry;
//!
//! pub trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//! pub trait Logger: Send + Sync {
//!     fn log(&self, line: &str) -> String;
//! }
//!
//! contract! {
//!     /// Everything a greeting needs
//!     pub trait Greeter {
//!         clock, set_clock: dyn Clock;
//!         logger, set_logger: dyn Logger;
//!     }
//! }
//!
//! struct Fixed;
//! impl Clock for Fixed {
//!     fn now(&self) -> u64 { 9 }
//! }
//! struct Echo;
//! impl Logger for Echo {
//!     fn log(&self, line: &str) -> String { line.to_string() }
//! }
//!
//! let registry = Arc::new(ServiceRegistry::new());
//! registry.register_instance::<dyn Clock>(Arc::new(Fixed));
//! registry.register_instance::<dyn Logger>(Arc::new(Echo));
//!
//! let composer = ServiceComposer::<dyn Greeter>::new(registry);
//! let greeter = composer.implementation().unwrap();
//! assert_eq!(greeter.clock().now(), 9);
//! assert_eq!(greeter.logger().log("hi"), "hi");
//! ```

use std::sync::Arc;

use tessera_core::ContractDescriptor;

use crate::instance::Composed;

/// A type the engine can compose
///
/// Implemented for `dyn Trait` by `contract!`. Hand-written
/// implementations must describe exactly the accessors that `bind`'s
/// result reads.
pub trait Contract: Send + Sync + 'static {
    /// Declared shape of the contract
    fn descriptor() -> ContractDescriptor;

    /// Expose a composed instance as the contract type
    fn bind(instance: Arc<Composed<Self>>) -> Arc<Self>;
}

/// Declare a contract trait and its composition glue
///
/// Each slot line is `getter, setter: dyn Capability;`. Capability traits
/// must be `Send + Sync` (usually as supertraits).
#[macro_export]
macro_rules! contract {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident {
            $(
                $(#[$slot_meta:meta])*
                $slot:ident, $setter:ident : dyn $($capability:ident)::+;
            )*
        }
    ) => {
        $(#[$meta])*
        $vis trait $name: Send + Sync {
            $(
                $(#[$slot_meta])*
                fn $slot(&self) -> ::std::sync::Arc<dyn $($capability)::+>;

                #[doc = concat!("Replace the `", stringify!($slot), "` service")]
                fn $setter(&self, service: ::std::sync::Arc<dyn $($capability)::+>);
            )*
        }

        impl $crate::Contract for dyn $name {
            fn descriptor() -> $crate::ContractDescriptor {
                $crate::ContractDescriptor::new($crate::TypeRef::interface::<dyn $name>())
                    $(
                        .with_member($crate::MemberDescriptor::property(
                            stringify!($slot),
                            $crate::TypeRef::interface::<dyn $($capability)::+>(),
                        ))
                    )*
            }

            fn bind(
                instance: ::std::sync::Arc<$crate::Composed<Self>>,
            ) -> ::std::sync::Arc<Self> {
                instance
            }
        }

        impl ::std::fmt::Debug for dyn $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }

        impl $name for $crate::Composed<dyn $name> {
            $(
                fn $slot(&self) -> ::std::sync::Arc<dyn $($capability)::+> {
                    self.bound::<dyn $($capability)::+>(stringify!($slot))
                }

                fn $setter(&self, service: ::std::sync::Arc<dyn $($capability)::+>) {
                    self.rebind::<dyn $($capability)::+>(stringify!($slot), service)
                }
            )*
        }
    };
}
