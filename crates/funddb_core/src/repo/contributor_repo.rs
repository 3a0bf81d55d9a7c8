//! Contributor Ledger contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create, delete and list contributor rows scoped to one campaign.
//! - Count contributors for the refundability predicate.
//!
//! # Invariants
//! - Every operation resolves the campaign `pda` through the Campaign Registry
//!   first and fails with `CampaignNotFound` when it does not resolve.
//! - Resolution and the dependent statement run in one transaction.
//! - `campaign_id` is written once at insert and never updated.

use crate::model::campaign::{CampaignId, Contributor, NewContributor};
use crate::model::identifier::validate_identifier;
use crate::repo::campaign_repo::{
    CampaignRepository, RepoError, RepoResult, SqliteCampaignRepository,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

/// Contributor Ledger persistence contract.
pub trait ContributorRepository {
    /// Inserts a contributor under the campaign resolved from `campaign_pda`.
    fn create_contributor(
        &self,
        campaign_pda: &str,
        contributor: &NewContributor,
    ) -> RepoResult<Contributor>;
    /// Removes every contributor with `pk` in the campaign; returns the count.
    fn delete_contributors(&self, campaign_pda: &str, pk: &str) -> RepoResult<usize>;
    /// Lists contributors of the campaign in insertion order.
    fn list_contributors(&self, campaign_pda: &str) -> RepoResult<Vec<Contributor>>;
    /// Counts contributors of the campaign.
    fn count_contributors(&self, campaign_pda: &str) -> RepoResult<u64>;
}

/// SQLite-backed Contributor Ledger.
pub struct SqliteContributorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContributorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Opens a transaction and resolves the campaign key inside it.
    fn begin_scoped(
        &self,
        campaign_pda: &str,
        behavior: TransactionBehavior,
    ) -> RepoResult<(Transaction<'conn>, CampaignId)> {
        let tx = Transaction::new_unchecked(self.conn, behavior)?;
        let campaign_id = SqliteCampaignRepository::new(&tx).resolve_campaign_id(campaign_pda)?;
        Ok((tx, campaign_id))
    }
}

impl ContributorRepository for SqliteContributorRepository<'_> {
    fn create_contributor(
        &self,
        campaign_pda: &str,
        contributor: &NewContributor,
    ) -> RepoResult<Contributor> {
        validate_identifier("pda", &contributor.pda)?;
        validate_identifier("pk", &contributor.pk)?;

        let (tx, campaign_id) = self.begin_scoped(campaign_pda, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO contributors (pda, pk, campaign_id) VALUES (?1, ?2, ?3);",
            params![contributor.pda, contributor.pk, campaign_id],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Contributor {
            id,
            pda: contributor.pda.clone(),
            pk: contributor.pk.clone(),
            campaign_id,
        })
    }

    fn delete_contributors(&self, campaign_pda: &str, pk: &str) -> RepoResult<usize> {
        let (tx, campaign_id) = self.begin_scoped(campaign_pda, TransactionBehavior::Immediate)?;
        let removed = tx.execute(
            "DELETE FROM contributors WHERE pk = ?1 AND campaign_id = ?2;",
            params![pk, campaign_id],
        )?;
        tx.commit()?;
        Ok(removed)
    }

    fn list_contributors(&self, campaign_pda: &str) -> RepoResult<Vec<Contributor>> {
        let (tx, campaign_id) = self.begin_scoped(campaign_pda, TransactionBehavior::Deferred)?;

        let contributors = {
            let mut stmt = tx.prepare(
                "SELECT id, pda, pk, campaign_id
                 FROM contributors
                 WHERE campaign_id = ?1
                 ORDER BY id ASC;",
            )?;
            let mut rows = stmt.query([campaign_id])?;
            let mut contributors = Vec::new();
            while let Some(row) = rows.next()? {
                contributors.push(parse_contributor_row(row)?);
            }
            contributors
        };

        tx.commit()?;
        Ok(contributors)
    }

    fn count_contributors(&self, campaign_pda: &str) -> RepoResult<u64> {
        let (tx, campaign_id) = self.begin_scoped(campaign_pda, TransactionBehavior::Deferred)?;
        let count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM contributors WHERE campaign_id = ?1;",
            [campaign_id],
            |row| row.get(0),
        )?;
        tx.commit()?;

        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative contributor count {count}")))
    }
}

fn parse_contributor_row(row: &Row<'_>) -> RepoResult<Contributor> {
    Ok(Contributor {
        id: row.get("id")?,
        pda: row.get("pda")?,
        pk: row.get("pk")?,
        campaign_id: row.get("campaign_id")?,
    })
}
