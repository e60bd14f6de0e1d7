//! Contract and member descriptors
//!
//! A `ContractDescriptor` is the explicit, declarative description of a
//! contract's shape. It is produced once per contract (by hand or by the
//! engine's `contract!` macro) and is never mutated after construction.
//!
//! ## Members
//!
//! | Kind | Becomes a capability slot when |
//! |------|--------------------------------|
//! | Property | readable, writable and typed by an interface |
//! | Method | never |

use super::TypeRef;

/// What kind of member a contract declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// Named value with accessors
    Property {
        /// Declared type of the property
        ty: TypeRef,
        /// Has a getter
        readable: bool,
        /// Has a setter
        writable: bool,
    },

    /// Behavioral member; composition never implements these
    Method,
}

/// One declared member of a contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Member name, unique within its contract
    pub name: String,
    /// Member kind
    pub kind: MemberKind,
}

impl MemberDescriptor {
    /// Property with both accessors
    pub fn property(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property {
                ty,
                readable: true,
                writable: true,
            },
        }
    }

    /// Property with a getter only
    pub fn read_only(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property {
                ty,
                readable: true,
                writable: false,
            },
        }
    }

    /// Method member
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
        }
    }

    /// Declared property type, `None` for methods
    pub fn property_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            MemberKind::Property { ty, .. } => Some(ty),
            MemberKind::Method => None,
        }
    }

    /// True for a property with both a getter and a setter
    pub fn has_accessor_pair(&self) -> bool {
        matches!(
            self.kind,
            MemberKind::Property {
                readable: true,
                writable: true,
                ..
            }
        )
    }

    /// True if this member qualifies as a capability slot
    pub fn is_capability(&self) -> bool {
        self.has_accessor_pair()
            && self
                .property_type()
                .map(TypeRef::is_interface)
                .unwrap_or(false)
    }
}

/// Declared shape of a contract
///
/// Identity is the contract's `TypeRef`; members keep declaration order.
#[derive(Debug, Clone)]
pub struct ContractDescriptor {
    contract: TypeRef,
    members: Vec<MemberDescriptor>,
}

impl ContractDescriptor {
    /// Descriptor with no members
    pub fn new(contract: TypeRef) -> Self {
        Self {
            contract,
            members: Vec::new(),
        }
    }

    /// Append a member (builder style)
    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// The contract type itself
    pub fn contract(&self) -> &TypeRef {
        &self.contract
    }

    /// Contract display name
    pub fn name(&self) -> &'static str {
        self.contract.name()
    }

    /// Members in declaration order
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Look up a member by name
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }

    /// True if the contract type is interface-shaped
    pub fn is_interface(&self) -> bool {
        self.contract.is_interface()
    }
}
