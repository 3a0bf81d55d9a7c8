//! Campaign and contributor records.
//!
//! # Responsibility
//! - Define the canonical shapes returned by repositories and the transport.
//!
//! # Invariants
//! - `Campaign::pda` is the only lookup key for contributor-scoped operations.
//! - `Contributor::campaign_id` is set once at creation and never updated.

use serde::{Deserialize, Serialize};

/// Store-assigned key of a campaign row.
pub type CampaignId = i64;

/// Store-assigned key of a contributor row.
pub type ContributorId = i64;

/// Crowdfunding campaign identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Internal key. Never used as a lookup key by contributor operations.
    pub id: CampaignId,
    /// Caller-chosen external identifier.
    pub pda: String,
}

/// Contributor record scoped to one campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub id: ContributorId,
    /// External identifier of the contributor record itself.
    pub pda: String,
    /// Public-key-like identifier, used as the deletion key within a campaign.
    pub pk: String,
    /// Key of the owning campaign, resolved from the campaign `pda` at creation.
    pub campaign_id: CampaignId,
}

/// Input for creating a contributor under a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContributor {
    pub pda: String,
    pub pk: String,
}

impl NewContributor {
    pub fn new(pda: impl Into<String>, pk: impl Into<String>) -> Self {
        Self {
            pda: pda.into(),
            pk: pk.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Campaign, Contributor};
    use serde_json::json;

    #[test]
    fn records_serialize_with_wire_field_names() {
        let campaign = Campaign {
            id: 1,
            pda: "camp1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&campaign).unwrap(),
            json!({"id": 1, "pda": "camp1"})
        );

        let contributor = Contributor {
            id: 7,
            pda: "c1".to_string(),
            pk: "pubkey1".to_string(),
            campaign_id: 1,
        };
        assert_eq!(
            serde_json::to_value(&contributor).unwrap(),
            json!({"id": 7, "pda": "c1", "pk": "pubkey1", "campaign_id": 1})
        );
    }
}
