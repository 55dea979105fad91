//! Common utilities and abstractions for services

/// Stream helpers for property-backed structs
pub mod macros;
/// Reactive property system for fine-grained state updates
pub mod property;

pub use property::Property;
