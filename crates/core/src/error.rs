//! Error types for Tessera
//!
//! This module defines the error taxonomy shared by the registry and the
//! composition engine. We use `thiserror` for automatic `Display` and
//! `Error` trait implementations.
//!
//! Composition is all-or-nothing: every variant of `ComposeError` aborts a
//! composition before an instance is handed to the caller. None of them are
//! transient, so nothing in the engine retries.

use crate::contract::TypeRef;
use thiserror::Error;

/// Result type alias for composition operations
pub type ComposeResult<T> = std::result::Result<T, ComposeError>;

/// Failures reported by a `ServiceProvider`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No binding exists for the capability type
    #[error("no service registered for {0}")]
    NotFound(TypeRef),

    /// The registry returned a service of a different capability type
    #[error("registry returned {actual} when {expected} was requested")]
    TypeMismatch {
        /// Requested capability type
        expected: TypeRef,
        /// Name of the type actually returned
        actual: &'static str,
    },

    /// A service factory failed to produce an instance
    #[error("factory for {capability} failed: {reason}")]
    Factory {
        /// Capability type being built
        capability: TypeRef,
        /// Factory failure description
        reason: String,
    },
}

/// Error types for contract composition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// The composition target is not an interface-shaped type
    #[error("{name} is not a contract: composition targets must be interface-shaped")]
    NotAContract {
        /// Name of the rejected type
        name: &'static str,
    },

    /// One or more capability slots have no registry binding
    #[error("cannot compose {contract}: unresolved capabilities [{}]", join_names(.missing))]
    UnresolvedCapability {
        /// Contract being composed
        contract: &'static str,
        /// Every missing capability type, in slot declaration order
        missing: Vec<TypeRef>,
    },

    /// The contract declares a member the synthesized type cannot satisfy
    #[error("cannot synthesize {contract}: member `{member}` cannot be implemented")]
    IncompleteContract {
        /// Contract being synthesized
        contract: &'static str,
        /// Offending member
        member: String,
    },

    /// Inspection and assembly disagree about a slot
    #[error("slot binding mismatch for `{name}`")]
    SlotBindingMismatch {
        /// Slot name
        name: String,
    },

    /// A slot was accessed with the wrong capability type
    #[error("slot `{name}` holds {expected}, not {actual}")]
    SlotTypeMismatch {
        /// Slot name
        name: String,
        /// Declared slot type
        expected: &'static str,
        /// Type used for the access
        actual: &'static str,
    },

    /// Non "not found" registry failure
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Configuration could not be read, parsed or written
    #[error("configuration error: {0}")]
    Config(String),
}

impl ComposeError {
    /// True for errors the caller fixes by changing types or registrations
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ComposeError::NotAContract { .. }
                | ComposeError::UnresolvedCapability { .. }
                | ComposeError::IncompleteContract { .. }
                | ComposeError::Config(_)
        )
    }

    /// True for internal consistency failures
    pub fn is_defect(&self) -> bool {
        matches!(self, ComposeError::SlotBindingMismatch { .. })
    }

    /// Missing capability types, empty unless `UnresolvedCapability`
    pub fn missing_capabilities(&self) -> &[TypeRef] {
        match self {
            ComposeError::UnresolvedCapability { missing, .. } => missing,
            _ => &[],
        }
    }
}

fn join_names(types: &[TypeRef]) -> String {
    types
        .iter()
        .map(TypeRef::name)
        .collect::<Vec<_>>()
        .join(", ")
}
