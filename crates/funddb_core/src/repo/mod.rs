//! Repository layer for the Campaign Registry and Contributor Ledger.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Contributor access always goes through campaign resolution; the
//!   registry never queries contributors.
//! - Repository APIs return `CampaignNotFound` distinctly from store faults.

pub mod campaign_repo;
pub mod contributor_repo;
