//! Composition Comprehensive Test Suite
//!
//! End-to-end tests through the `tessera` facade: registry setup, typed
//! composition, memoization, failure reporting and configuration.
//!
//! ## Test Tier Structure
//!
//! - **Tier 1: Core Behavior** (fast, must pass)
//!   Greeter composition, error reporting, registry lifetimes.
//!
//! - **Tier 2: Configuration** (filesystem)
//!   Loading and writing `tessera.toml`.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test composition_comprehensive
//! ```

#[path = "../common/mod.rs"]
mod common;

// Tier 1: Core Behavior
mod error_reporting_tests;
mod greeter_tests;
mod lifetime_tests;

// Tier 2: Configuration
mod config_tests;
