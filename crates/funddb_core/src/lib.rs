//! Core domain logic for the campaign/contributor ledger.
//! This crate is the single source of truth for the registry and ledger
//! invariants; transports only translate to and from its types.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbResult, Store};
pub use logging::{
    default_log_level, init_logging, logging_status, sanitize_log_field, LogTarget,
};
pub use model::campaign::{Campaign, CampaignId, Contributor, ContributorId, NewContributor};
pub use model::identifier::{validate_identifier, ValidationError, MAX_IDENTIFIER_LEN};
pub use repo::campaign_repo::{
    CampaignRepository, RepoError, RepoResult, SqliteCampaignRepository,
};
pub use repo::contributor_repo::{ContributorRepository, SqliteContributorRepository};
pub use service::campaign_service::CampaignService;
pub use service::contributor_service::ContributorService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
