//! Composed instances
//!
//! A `ComposedInstance` is one instantiation of a `SynthesizedType`: a cell
//! per field, each holding the service bound to that slot. Accessors have
//! plain store/retrieve semantics; a setter only checks that the new
//! service has the slot's declared capability type.
//!
//! Instances are built through `UnboundInstance`, which starts with every
//! field empty and refuses to seal until each one is bound. Only sealed
//! instances leave the engine, so a partially-wired instance is never
//! observable.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use tessera_core::{short_type_name, ComposeError, ComposeResult, ServiceHandle};

use crate::synthesizer::{FieldLayout, SynthesizedType};

/// An instance of a synthesized type with every slot bound
pub struct ComposedInstance {
    ty: Arc<SynthesizedType>,
    slots: Vec<RwLock<ServiceHandle>>,
}

impl ComposedInstance {
    /// The synthesized type this instance instantiates
    pub fn synthesized_type(&self) -> &Arc<SynthesizedType> {
        &self.ty
    }

    /// Name of the synthesized type
    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// Slot (accessor) names in declaration order
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.ty.fields().iter().map(FieldLayout::name)
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the contract has no capability slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn field(&self, name: &str) -> ComposeResult<&FieldLayout> {
        self.ty
            .field(name)
            .ok_or_else(|| ComposeError::SlotBindingMismatch {
                name: name.to_string(),
            })
    }

    /// Type-erased service currently bound to `name`
    pub fn handle(&self, name: &str) -> ComposeResult<ServiceHandle> {
        let field = self.field(name)?;
        Ok(self.slots[field.index()].read().clone())
    }

    /// Read the service bound to `name` as capability type `S`
    ///
    /// # Errors
    ///
    /// - `SlotBindingMismatch` if the type has no accessor `name`
    /// - `SlotTypeMismatch` if `S` is not the slot's capability type
    pub fn get<S: ?Sized + Send + Sync + 'static>(&self, name: &str) -> ComposeResult<Arc<S>> {
        let handle = self.handle(name)?;
        handle
            .downcast::<S>()
            .ok_or_else(|| ComposeError::SlotTypeMismatch {
                name: name.to_string(),
                expected: handle.type_name(),
                actual: short_type_name::<S>(),
            })
    }

    /// Replace the service bound to `name`
    ///
    /// # Errors
    ///
    /// Same as [`ComposedInstance::get`]; the slot is unchanged on error.
    pub fn set<S: ?Sized + Send + Sync + 'static>(
        &self,
        name: &str,
        service: Arc<S>,
    ) -> ComposeResult<()> {
        let field = self.field(name)?;
        if !field.slot_type().is::<S>() {
            return Err(ComposeError::SlotTypeMismatch {
                name: name.to_string(),
                expected: field.slot_type().name(),
                actual: short_type_name::<S>(),
            });
        }
        *self.slots[field.index()].write() = ServiceHandle::new(service);
        Ok(())
    }
}

impl fmt::Debug for ComposedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.ty.name());
        for (field, slot) in self.ty.fields().iter().zip(&self.slots) {
            s.field(field.name(), &*slot.read());
        }
        s.finish()
    }
}

/// Instance under assembly; every field starts empty
pub(crate) struct UnboundInstance {
    ty: Arc<SynthesizedType>,
    slots: Vec<Option<ServiceHandle>>,
}

impl UnboundInstance {
    pub(crate) fn new(ty: Arc<SynthesizedType>) -> Self {
        let slots = vec![None; ty.len()];
        Self { ty, slots }
    }

    /// Store `service` in the field behind accessor `name`
    pub(crate) fn bind(&mut self, name: &str, service: ServiceHandle) -> ComposeResult<()> {
        let (index, expected) = match self.ty.field(name) {
            Some(field) => (field.index(), *field.slot_type()),
            None => {
                return Err(ComposeError::SlotBindingMismatch {
                    name: name.to_string(),
                })
            }
        };
        if service.type_id() != expected.type_id() {
            return Err(ComposeError::SlotTypeMismatch {
                name: name.to_string(),
                expected: expected.name(),
                actual: service.type_name(),
            });
        }
        self.slots[index] = Some(service);
        Ok(())
    }

    /// Finish assembly; fails if any field is still empty
    pub(crate) fn seal(self) -> ComposeResult<ComposedInstance> {
        let UnboundInstance { ty, slots } = self;
        let mut bound = Vec::with_capacity(slots.len());
        for (field, slot) in ty.fields().iter().zip(slots) {
            match slot {
                Some(handle) => bound.push(RwLock::new(handle)),
                None => {
                    return Err(ComposeError::SlotBindingMismatch {
                        name: field.name().to_string(),
                    })
                }
            }
        }
        Ok(ComposedInstance { ty, slots: bound })
    }
}

/// A composed instance tagged with the contract it implements
///
/// `contract!` implements the contract trait for `Composed<dyn Trait>`, so
/// an `Arc<Composed<dyn Trait>>` coerces to `Arc<dyn Trait>`.
pub struct Composed<C: ?Sized> {
    instance: ComposedInstance,
    _contract: PhantomData<fn() -> Box<C>>,
}

impl<C: ?Sized> Composed<C> {
    pub(crate) fn new(instance: ComposedInstance) -> Self {
        Self {
            instance,
            _contract: PhantomData,
        }
    }

    /// The untyped instance
    pub fn instance(&self) -> &ComposedInstance {
        &self.instance
    }

    /// Read a slot whose type was fixed at synthesis
    ///
    /// # Panics
    ///
    /// Panics if `name`/`S` do not match the synthesized layout. Assembly
    /// and `set` both enforce the layout, so this only fires on a broken
    /// `Contract` implementation.
    #[doc(hidden)]
    pub fn bound<S: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Arc<S> {
        match self.instance.get::<S>(name) {
            Ok(service) => service,
            Err(e) => panic!("{} violates its layout: {}", self.instance.type_name(), e),
        }
    }

    /// Write a slot whose type was fixed at synthesis
    ///
    /// # Panics
    ///
    /// Same conditions as [`Composed::bound`].
    #[doc(hidden)]
    pub fn rebind<S: ?Sized + Send + Sync + 'static>(&self, name: &str, service: Arc<S>) {
        if let Err(e) = self.instance.set::<S>(name, service) {
            panic!("{} violates its layout: {}", self.instance.type_name(), e);
        }
    }
}

impl<C: ?Sized> Deref for Composed<C> {
    type Target = ComposedInstance;

    fn deref(&self) -> &ComposedInstance {
        &self.instance
    }
}

impl<C: ?Sized> fmt::Debug for Composed<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.instance.fmt(f)
    }
}
