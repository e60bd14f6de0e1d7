//! Shared test utilities for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Once};

use parking_lot::Mutex;
pub use tessera::{
    contract, ComposeError, Composer, ComposerConfig, Lifetime, ServiceComposer, ServiceRegistry,
    TypeRef, TypeSynthesizer,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a test tracing subscriber once per process.
///
/// Output goes through the test writer, so it only shows for failing tests.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// ============================================================================
// Services
// ============================================================================

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

pub trait Logger: Send + Sync {
    fn log(&self, line: &str);
    fn lines(&self) -> Vec<String>;
}

pub trait Mailer: Send + Sync {
    fn send(&self, to: &str) -> bool;
}

/// Clock that advances by one on every read
#[derive(Default)]
pub struct ManualClock {
    ticks: AtomicU64,
}

impl ManualClock {
    pub fn starting_at(tick: u64) -> Self {
        Self {
            ticks: AtomicU64::new(tick),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::SeqCst)
    }
}

/// Logger that keeps every line in memory
#[derive(Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl Logger for MemoryLogger {
    fn log(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }

    fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

pub struct NoopMailer;

impl Mailer for NoopMailer {
    fn send(&self, _to: &str) -> bool {
        true
    }
}

// ============================================================================
// Contracts
// ============================================================================

contract! {
    /// A greeter composed from a clock and a logger
    pub trait Greeter {
        /// Time source
        clock, set_clock: dyn Clock;
        /// Output sink
        logger, set_logger: dyn Logger;
    }
}

/// Greet through a composed greeter, stamping the line with the clock
pub fn greet(greeter: &dyn Greeter, name: &str) {
    let line = format!("[{}] hello, {}", greeter.clock().now(), name);
    greeter.logger().log(&line);
}

// ============================================================================
// Registry helpers
// ============================================================================

/// Registry with a clock and logger bound as instances
pub fn greeter_registry() -> (Arc<ServiceRegistry>, Arc<ManualClock>, Arc<MemoryLogger>) {
    let registry = Arc::new(ServiceRegistry::new());
    let clock = Arc::new(ManualClock::default());
    let logger = Arc::new(MemoryLogger::default());
    registry.register_instance::<dyn Clock>(clock.clone());
    registry.register_instance::<dyn Logger>(logger.clone());
    (registry, clock, logger)
}

/// Address of the data behind an `Arc`, ignoring any vtable
pub fn addr<T: ?Sized>(arc: &Arc<T>) -> usize {
    Arc::as_ptr(arc) as *const () as usize
}

/// A composer with its own synthesizer, isolated from the global cache
pub fn isolated_composer(registry: Arc<ServiceRegistry>, config: ComposerConfig) -> Composer {
    Composer::with_config(registry, config).with_synthesizer(Arc::new(TypeSynthesizer::new()))
}
