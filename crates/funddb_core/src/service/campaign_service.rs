//! Campaign Registry use-case service.

use crate::logging::sanitize_log_field;
use crate::model::campaign::{Campaign, CampaignId};
use crate::repo::campaign_repo::{CampaignRepository, RepoResult};
use log::{info, warn};

/// Use-case wrapper for campaign creation and resolution.
pub struct CampaignService<R: CampaignRepository> {
    repo: R,
}

impl<R: CampaignRepository> CampaignService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a campaign with the caller-chosen `pda`.
    ///
    /// Duplicate `pda` values are accepted and produce distinct rows; only
    /// the first created row is ever resolved afterwards.
    pub fn create_campaign(&self, pda: &str) -> RepoResult<Campaign> {
        match self.repo.create_campaign(pda) {
            Ok(campaign) => {
                info!(
                    "event=campaign_create module=registry status=ok campaign_id={} pda={}",
                    campaign.id,
                    sanitize_log_field(&campaign.pda)
                );
                Ok(campaign)
            }
            Err(err) => {
                warn!(
                    "event=campaign_create module=registry status=error pda={} error={}",
                    sanitize_log_field(pda),
                    sanitize_log_field(&err.to_string())
                );
                Err(err)
            }
        }
    }

    /// Resolves `pda` to the internal campaign key.
    pub fn resolve(&self, pda: &str) -> RepoResult<CampaignId> {
        self.repo.resolve_campaign_id(pda)
    }

    /// Loads the campaign that `pda` resolves to, if any.
    pub fn get_campaign(&self, pda: &str) -> RepoResult<Option<Campaign>> {
        self.repo.get_campaign(pda)
    }
}
