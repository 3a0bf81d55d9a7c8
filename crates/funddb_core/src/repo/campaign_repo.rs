//! Campaign Registry contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create campaign identities and resolve a campaign `pda` to its key.
//! - Define the repository error shared by every persistence path.
//!
//! # Invariants
//! - Write paths validate the external identifier before SQL mutations.
//! - `campaigns.pda` is not unique; resolution always picks the first
//!   created row (lowest `id`).

use crate::db::DbError;
use crate::model::campaign::{Campaign, CampaignId};
use crate::model::identifier::{validate_identifier, ValidationError};
use rusqlite::{Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for campaign and contributor persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// No campaign row matches the given `pda`.
    CampaignNotFound(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::CampaignNotFound(pda) => write!(f, "campaign not found: {pda}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::CampaignNotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Campaign Registry persistence contract.
pub trait CampaignRepository {
    /// Inserts a campaign and returns it with the store-assigned key.
    fn create_campaign(&self, pda: &str) -> RepoResult<Campaign>;
    /// Resolves `pda` to the key of the first created matching campaign.
    fn resolve_campaign_id(&self, pda: &str) -> RepoResult<CampaignId>;
    /// Loads the first created campaign with `pda`, if any.
    fn get_campaign(&self, pda: &str) -> RepoResult<Option<Campaign>>;
}

/// SQLite-backed Campaign Registry.
pub struct SqliteCampaignRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCampaignRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CampaignRepository for SqliteCampaignRepository<'_> {
    fn create_campaign(&self, pda: &str) -> RepoResult<Campaign> {
        validate_identifier("pda", pda)?;

        self.conn
            .execute("INSERT INTO campaigns (pda) VALUES (?1);", [pda])?;

        Ok(Campaign {
            id: self.conn.last_insert_rowid(),
            pda: pda.to_string(),
        })
    }

    fn resolve_campaign_id(&self, pda: &str) -> RepoResult<CampaignId> {
        self.get_campaign(pda)?
            .map(|campaign| campaign.id)
            .ok_or_else(|| RepoError::CampaignNotFound(pda.to_string()))
    }

    fn get_campaign(&self, pda: &str) -> RepoResult<Option<Campaign>> {
        let campaign = self
            .conn
            .query_row(
                "SELECT id, pda
                 FROM campaigns
                 WHERE pda = ?1
                 ORDER BY id ASC
                 LIMIT 1;",
                [pda],
                |row| {
                    Ok(Campaign {
                        id: row.get("id")?,
                        pda: row.get("pda")?,
                    })
                },
            )
            .optional()?;

        Ok(campaign)
    }
}
