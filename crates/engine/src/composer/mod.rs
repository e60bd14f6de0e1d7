//! Composition orchestration
//!
//! `Composer` runs the pipeline for one contract descriptor:
//!
//! 1. **Check**: the contract must be interface-shaped (before any lookup)
//! 2. **Inspect**: collect capability slots
//! 3. **Resolve**: look every slot up, reporting all missing types at once
//! 4. **Synthesize**: fetch or build the contract's layout
//! 5. **Assemble**: instantiate and bind by slot name
//!
//! `ServiceComposer<C>` wraps a `Composer` for one typed contract and
//! memoizes the first successful result, so `implementation()` always
//! returns the same instance.

pub mod config;

pub use config::{ComposerConfig, CONFIG_FILE_NAME};

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tessera_core::{ComposeResult, ContractDescriptor, ServiceProvider};
use tracing::info;

use crate::assembler::assemble;
use crate::typed::Contract;
use crate::inspector::{ensure_contract, inspect};
use crate::instance::{Composed, ComposedInstance};
use crate::resolver::ServiceResolver;
use crate::synthesizer::TypeSynthesizer;

/// Untyped composition engine
///
/// Holds the registry handle, configuration and the synthesizer whose type
/// cache it uses (the process-wide one unless replaced).
#[derive(Clone)]
pub struct Composer {
    provider: Arc<dyn ServiceProvider>,
    config: ComposerConfig,
    synthesizer: Arc<TypeSynthesizer>,
}

impl Composer {
    /// Composer with default configuration and the global type cache
    pub fn new(provider: Arc<dyn ServiceProvider>) -> Self {
        Self::with_config(provider, ComposerConfig::default())
    }

    /// Composer with explicit configuration and the global type cache
    pub fn with_config(provider: Arc<dyn ServiceProvider>, config: ComposerConfig) -> Self {
        Self {
            provider,
            config,
            synthesizer: TypeSynthesizer::global(),
        }
    }

    /// Use a private synthesizer instead of the global one
    pub fn with_synthesizer(mut self, synthesizer: Arc<TypeSynthesizer>) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Registry handle
    pub fn provider(&self) -> &Arc<dyn ServiceProvider> {
        &self.provider
    }

    /// Synthesizer whose cache this composer uses
    pub fn synthesizer(&self) -> &Arc<TypeSynthesizer> {
        &self.synthesizer
    }

    /// Compose an instance of `contract`
    ///
    /// Every call produces a new instance; layouts are shared through the
    /// type cache when `cache_types` is on.
    ///
    /// # Errors
    ///
    /// - `NotAContract` before any registry lookup
    /// - `UnresolvedCapability` listing every missing slot type
    /// - `Registry` for failing bindings
    /// - `IncompleteContract` if the contract cannot be implemented
    /// - `SlotBindingMismatch` on inspection/assembly disagreement
    pub fn compose_descriptor(
        &self,
        contract: &ContractDescriptor,
    ) -> ComposeResult<ComposedInstance> {
        ensure_contract(contract)?;

        let slots = inspect(contract)?;
        let resolved =
            ServiceResolver::new(self.provider.as_ref(), contract.name()).resolve_all(&slots)?;
        let ty = self.synthesizer.synthesize(contract, &slots, &self.config)?;
        let instance = assemble(ty, resolved)?;

        info!(
            target: "tessera::engine",
            contract = contract.name(),
            type_name = instance.type_name(),
            slots = instance.len(),
            "Composed contract"
        );
        Ok(instance)
    }

    /// Compose `C` without memoization
    pub fn compose<C: ?Sized + Contract>(&self) -> ComposeResult<Arc<C>> {
        let instance = self.compose_descriptor(&C::descriptor())?;
        Ok(C::bind(Arc::new(Composed::new(instance))))
    }
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("config", &self.config)
            .field("cached_types", &self.synthesizer.len())
            .finish()
    }
}

/// Typed, memoizing entry point for one contract
///
/// The first successful `compose()` is stored; later calls (from any
/// thread) return the identical `Arc`. Concurrent first calls block until
/// one composition finishes. Failures are not stored, so registering the
/// missing services and calling again works.
pub struct ServiceComposer<C: ?Sized + Contract> {
    composer: Composer,
    implementation: OnceCell<Arc<C>>,
}

impl<C: ?Sized + Contract> ServiceComposer<C> {
    /// Composer for `C` over `provider` with default configuration
    pub fn new(provider: Arc<dyn ServiceProvider>) -> Self {
        Self::from_composer(Composer::new(provider))
    }

    /// Composer for `C` with explicit configuration
    pub fn with_config(provider: Arc<dyn ServiceProvider>, config: ComposerConfig) -> Self {
        Self::from_composer(Composer::with_config(provider, config))
    }

    /// Wrap an existing untyped composer
    pub fn from_composer(composer: Composer) -> Self {
        Self {
            composer,
            implementation: OnceCell::new(),
        }
    }

    /// The composed contract, built on first use
    pub fn compose(&self) -> ComposeResult<Arc<C>> {
        self.implementation
            .get_or_try_init(|| self.composer.compose::<C>())
            .map(Arc::clone)
    }

    /// The composed contract, built on first use (same as `compose`)
    pub fn implementation(&self) -> ComposeResult<Arc<C>> {
        self.compose()
    }

    /// True once a composition has succeeded
    pub fn is_composed(&self) -> bool {
        self.implementation.get().is_some()
    }

    /// Underlying untyped composer
    pub fn composer(&self) -> &Composer {
        &self.composer
    }
}

impl<C: ?Sized + Contract> fmt::Debug for ServiceComposer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceComposer")
            .field("contract", &C::descriptor().name())
            .field("composed", &self.is_composed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tessera_core::{
        ComposeError, MemberDescriptor, RegistryError, ServiceHandle, TypeRef,
    };
    use tessera_registry::ServiceRegistry;

    pub trait Clock: Send + Sync {
        fn now(&self) -> u64;
    }
    pub trait Logger: Send + Sync {}

    crate::contract! {
        pub trait Greeter {
            clock, set_clock: dyn Clock;
            logger, set_logger: dyn Logger;
        }
    }

    struct FixedClock(u64);
    impl Clock for FixedClock {
        fn now(&self) -> u64 {
            self.0
        }
    }
    struct Quiet;
    impl Logger for Quiet {}

    /// Provider that counts lookups and always fails
    #[derive(Default)]
    struct CountingEmpty(AtomicUsize);

    impl ServiceProvider for CountingEmpty {
        fn resolve(&self, capability: &TypeRef) -> Result<ServiceHandle, RegistryError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(RegistryError::NotFound(*capability))
        }
    }

    fn full_registry() -> Arc<ServiceRegistry> {
        let registry = Arc::new(ServiceRegistry::new());
        registry.register_instance::<dyn Clock>(Arc::new(FixedClock(3)));
        registry.register_instance::<dyn Logger>(Arc::new(Quiet));
        registry
    }

    #[test]
    fn test_compose_descriptor_rejects_concrete_without_lookups() {
        struct Plain;
        let provider = Arc::new(CountingEmpty::default());
        let composer = Composer::new(provider.clone());
        let descriptor = ContractDescriptor::new(TypeRef::concrete::<Plain>())
            .with_member(MemberDescriptor::property("clock", TypeRef::interface::<dyn Clock>()));

        let err = composer.compose_descriptor(&descriptor).unwrap_err();
        assert_eq!(err, ComposeError::NotAContract { name: "Plain" });
        assert_eq!(provider.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_compose_unmemoized_builds_new_instances() {
        let composer = Composer::new(full_registry())
            .with_synthesizer(Arc::new(TypeSynthesizer::new()));
        let a = composer.compose::<dyn Greeter>().unwrap();
        let b = composer.compose::<dyn Greeter>().unwrap();
        assert_ne!(
            Arc::as_ptr(&a) as *const () as usize,
            Arc::as_ptr(&b) as *const () as usize
        );
        assert_eq!(composer.synthesizer().len(), 1);
    }

    #[test]
    fn test_service_composer_memoizes() {
        let composer = ServiceComposer::<dyn Greeter>::new(full_registry());
        assert!(!composer.is_composed());
        let a = composer.implementation().unwrap();
        let b = composer.compose().unwrap();
        assert!(composer.is_composed());
        assert_eq!(
            Arc::as_ptr(&a) as *const () as usize,
            Arc::as_ptr(&b) as *const () as usize
        );
        assert_eq!(a.clock().now(), 3);
    }

    #[test]
    fn test_failure_is_not_memoized() {
        let registry = Arc::new(ServiceRegistry::new());
        registry.register_instance::<dyn Clock>(Arc::new(FixedClock(1)));
        let composer = ServiceComposer::<dyn Greeter>::new(registry.clone());

        let err = composer.compose().unwrap_err();
        assert_eq!(err.missing_capabilities(), &[TypeRef::interface::<dyn Logger>()]);
        assert!(!composer.is_composed());

        registry.register_instance::<dyn Logger>(Arc::new(Quiet));
        assert!(composer.compose().is_ok());
    }

    #[test]
    fn test_debug_output() {
        let composer = ServiceComposer::<dyn Greeter>::new(full_registry());
        let rendered = format!("{:?}", composer);
        assert!(rendered.contains("Greeter"));
        assert!(rendered.contains("composed: false"));
    }
}
