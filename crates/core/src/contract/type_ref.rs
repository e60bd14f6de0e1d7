//! Type identity and shape
//!
//! `TypeRef` replaces reflection over a type: it carries the `TypeId` that
//! identifies the type, a short display name, and whether the type is
//! interface-shaped (a trait object) or concrete.
//!
//! Two `TypeRef`s are equal when their `TypeId`s are equal. Name and shape
//! are descriptive only.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Whether a type is interface-shaped or concrete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A type with member declarations only (`dyn Trait`)
    Interface,
    /// Any other type (structs, enums, primitives)
    Concrete,
}

/// Identity of a type as seen by the composition engine
#[derive(Clone, Copy)]
pub struct TypeRef {
    type_id: TypeId,
    name: &'static str,
    shape: TypeShape,
}

impl TypeRef {
    /// Reference an interface-shaped type, usually `dyn Trait`
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: short_type_name::<T>(),
            shape: TypeShape::Interface,
        }
    }

    /// Reference a concrete type
    pub fn concrete<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: short_type_name::<T>(),
            shape: TypeShape::Concrete,
        }
    }

    /// Override the display name (the identity is unchanged)
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// The `TypeId` identifying this type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Short display name, e.g. `Clock` for `dyn my_app::Clock`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared shape
    pub fn shape(&self) -> TypeShape {
        self.shape
    }

    /// True if the type is interface-shaped
    pub fn is_interface(&self) -> bool {
        self.shape == TypeShape::Interface
    }

    /// True if this reference identifies `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Short name of a type: the last path segment, without a leading `dyn `
///
/// Generic types keep their full name, since stripping the path from
/// `Arc<dyn a::B>` would produce something misleading.
pub fn short_type_name<T: ?Sized + 'static>() -> &'static str {
    let full = type_name::<T>();
    let stripped = full.strip_prefix("dyn ").unwrap_or(full);
    if stripped.contains('<') || stripped.contains(' ') {
        return full;
    }
    stripped.rsplit("::").next().unwrap_or(stripped)
}
