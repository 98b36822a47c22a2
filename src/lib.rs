//! `FreelanceBuddy` - A freelancer business-management core
//!
//! This crate provides the embeddable core of a freelancer tracker:
//! clients, projects, time entries, and invoices persisted through an
//! injected key-value store, with single-running-timer enforcement,
//! frozen invoice totals, and derived dashboard statistics.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::must_use_candidate,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Configuration management and logging setup
pub mod config;
/// Core business logic - timer engine, invoice aggregator, statistics
pub mod core;
/// Persisted data models and their input/update structs
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Entity repositories over the key-value store
pub mod repo;
/// The key-value persistence boundary and its backends
pub mod storage;
/// The four repositories loaded from one shared store
pub mod workspace;

#[cfg(test)]
pub mod test_utils;
