//! Domain model for campaigns and their contributors.
//!
//! # Responsibility
//! - Define the records persisted by the Campaign Registry and Contributor Ledger.
//! - Own structural validation of externally supplied identifiers.
//!
//! # Invariants
//! - Numeric keys are assigned by the store and never reused.
//! - A contributor belongs to exactly one campaign for its whole lifetime.

pub mod campaign;
pub mod identifier;
