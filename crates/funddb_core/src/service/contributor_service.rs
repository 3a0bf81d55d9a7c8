//! Contributor Ledger use-case service.
//!
//! # Responsibility
//! - Provide contributor create/delete/list entry points.
//! - Derive the refundability predicate.
//!
//! # Invariants
//! - Refundability is recomputed on every call; nothing is cached.
//! - Deleting zero rows is success, not an error.
//! - Caller-supplied identifiers are logged through `sanitize_log_field`.

use crate::logging::sanitize_log_field;
use crate::model::campaign::{Contributor, NewContributor};
use crate::repo::campaign_repo::RepoResult;
use crate::repo::contributor_repo::ContributorRepository;
use log::{debug, info, warn};

/// Use-case wrapper for contributor operations scoped to a campaign.
pub struct ContributorService<R: ContributorRepository> {
    repo: R,
}

impl<R: ContributorRepository> ContributorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a contributor under the campaign identified by `campaign_pda`.
    ///
    /// Returns the stored record including the resolved `campaign_id`.
    pub fn create_contributor(
        &self,
        campaign_pda: &str,
        contributor: &NewContributor,
    ) -> RepoResult<Contributor> {
        let result = self.repo.create_contributor(campaign_pda, contributor);
        match &result {
            Ok(created) => info!(
                "event=contributor_create module=ledger status=ok campaign_pda={} campaign_id={} contributor_id={}",
                sanitize_log_field(campaign_pda),
                created.campaign_id,
                created.id
            ),
            Err(err) => warn!(
                "event=contributor_create module=ledger status=error campaign_pda={} error={}",
                sanitize_log_field(campaign_pda),
                sanitize_log_field(&err.to_string())
            ),
        }
        result
    }

    /// Deletes every contributor with `pk` in the campaign.
    ///
    /// Returns how many rows were removed, which may be zero.
    pub fn delete_contributor(&self, campaign_pda: &str, pk: &str) -> RepoResult<usize> {
        let result = self.repo.delete_contributors(campaign_pda, pk);
        match &result {
            Ok(removed) => info!(
                "event=contributor_delete module=ledger status=ok campaign_pda={} pk={} removed={}",
                sanitize_log_field(campaign_pda),
                sanitize_log_field(pk),
                removed
            ),
            Err(err) => warn!(
                "event=contributor_delete module=ledger status=error campaign_pda={} error={}",
                sanitize_log_field(campaign_pda),
                sanitize_log_field(&err.to_string())
            ),
        }
        result
    }

    /// Lists the campaign's contributors in insertion order.
    pub fn list_contributors(&self, campaign_pda: &str) -> RepoResult<Vec<Contributor>> {
        let contributors = self.repo.list_contributors(campaign_pda)?;
        debug!(
            "event=contributor_list module=ledger status=ok campaign_pda={} count={}",
            sanitize_log_field(campaign_pda),
            contributors.len()
        );
        Ok(contributors)
    }

    /// Returns whether the campaign has at least one contributor.
    pub fn is_refundable(&self, campaign_pda: &str) -> RepoResult<bool> {
        let count = self.repo.count_contributors(campaign_pda)?;
        debug!(
            "event=refundable_check module=ledger status=ok campaign_pda={} contributors={}",
            sanitize_log_field(campaign_pda),
            count
        );
        Ok(count > 0)
    }
}
