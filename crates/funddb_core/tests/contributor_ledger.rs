use funddb_core::db::open_db_in_memory;
use funddb_core::{
    CampaignRepository, Contributor, ContributorRepository, ContributorService, NewContributor,
    RepoError, SqliteCampaignRepository, SqliteContributorRepository, Store,
};
use rusqlite::Connection;

fn seeded_campaigns(pdas: &[&str]) -> Connection {
    let conn = open_db_in_memory().unwrap();
    {
        let registry = SqliteCampaignRepository::new(&conn);
        for pda in pdas {
            registry.create_campaign(pda).unwrap();
        }
    }
    conn
}

#[test]
fn fresh_campaign_has_no_contributors_and_is_not_refundable() {
    let conn = seeded_campaigns(&["camp1"]);
    let service = ContributorService::new(SqliteContributorRepository::new(&conn));

    assert!(service.list_contributors("camp1").unwrap().is_empty());
    assert!(!service.is_refundable("camp1").unwrap());
}

#[test]
fn create_list_refund_delete_walkthrough() {
    let conn = seeded_campaigns(&["camp1"]);
    let service = ContributorService::new(SqliteContributorRepository::new(&conn));

    let created = service
        .create_contributor("camp1", &NewContributor::new("c1", "pubkey1"))
        .unwrap();
    assert_eq!(
        created,
        Contributor {
            id: 1,
            pda: "c1".to_string(),
            pk: "pubkey1".to_string(),
            campaign_id: 1,
        }
    );

    assert_eq!(service.list_contributors("camp1").unwrap(), vec![created]);
    assert!(service.is_refundable("camp1").unwrap());

    assert_eq!(service.delete_contributor("camp1", "pubkey1").unwrap(), 1);
    assert!(service.list_contributors("camp1").unwrap().is_empty());
    assert!(!service.is_refundable("camp1").unwrap());
}

#[test]
fn create_under_unknown_campaign_fails_without_writing() {
    let conn = seeded_campaigns(&["camp1"]);
    let repo = SqliteContributorRepository::new(&conn);

    let err = repo
        .create_contributor("nope", &NewContributor::new("c1", "pubkey1"))
        .unwrap_err();
    assert!(matches!(err, RepoError::CampaignNotFound(ref pda) if pda == "nope"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM contributors;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn every_operation_reports_unresolved_campaign() {
    let conn = seeded_campaigns(&[]);
    let repo = SqliteContributorRepository::new(&conn);

    assert!(matches!(
        repo.delete_contributors("ghost", "pk").unwrap_err(),
        RepoError::CampaignNotFound(_)
    ));
    assert!(matches!(
        repo.list_contributors("ghost").unwrap_err(),
        RepoError::CampaignNotFound(_)
    ));
    assert!(matches!(
        repo.count_contributors("ghost").unwrap_err(),
        RepoError::CampaignNotFound(_)
    ));
}

#[test]
fn created_contributor_references_resolved_campaign() {
    let conn = seeded_campaigns(&["alpha", "beta", "gamma"]);
    let registry = SqliteCampaignRepository::new(&conn);
    let ledger = SqliteContributorRepository::new(&conn);

    for pda in ["alpha", "beta", "gamma"] {
        let created = ledger
            .create_contributor(pda, &NewContributor::new("c", "pk"))
            .unwrap();
        assert_eq!(created.campaign_id, registry.resolve_campaign_id(pda).unwrap());
    }
}

#[test]
fn contributors_are_isolated_per_campaign() {
    let conn = seeded_campaigns(&["campA", "campB"]);
    let service = ContributorService::new(SqliteContributorRepository::new(&conn));

    service
        .create_contributor("campA", &NewContributor::new("c1", "shared_pk"))
        .unwrap();

    assert!(service.list_contributors("campB").unwrap().is_empty());
    assert!(!service.is_refundable("campB").unwrap());

    assert_eq!(service.delete_contributor("campB", "shared_pk").unwrap(), 0);
    assert_eq!(service.list_contributors("campA").unwrap().len(), 1);
}

#[test]
fn list_preserves_insertion_order() {
    let conn = seeded_campaigns(&["camp1"]);
    let repo = SqliteContributorRepository::new(&conn);

    for (pda, pk) in [("c3", "pk_c"), ("c1", "pk_a"), ("c2", "pk_b")] {
        repo.create_contributor("camp1", &NewContributor::new(pda, pk))
            .unwrap();
    }

    let listed: Vec<String> = repo
        .list_contributors("camp1")
        .unwrap()
        .into_iter()
        .map(|contributor| contributor.pda)
        .collect();
    assert_eq!(listed, vec!["c3", "c1", "c2"]);
}

#[test]
fn delete_is_idempotent_and_removes_all_duplicates() {
    let conn = seeded_campaigns(&["camp1"]);
    let service = ContributorService::new(SqliteContributorRepository::new(&conn));

    service
        .create_contributor("camp1", &NewContributor::new("c1", "dup"))
        .unwrap();
    service
        .create_contributor("camp1", &NewContributor::new("c2", "dup"))
        .unwrap();
    service
        .create_contributor("camp1", &NewContributor::new("c3", "keep"))
        .unwrap();

    assert_eq!(service.delete_contributor("camp1", "dup").unwrap(), 2);
    assert_eq!(service.delete_contributor("camp1", "dup").unwrap(), 0);
    assert_eq!(service.delete_contributor("camp1", "never").unwrap(), 0);

    let remaining = service.list_contributors("camp1").unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].pk, "keep");
}

#[test]
fn refundability_stays_true_until_last_contributor_removed() {
    let conn = seeded_campaigns(&["camp1"]);
    let service = ContributorService::new(SqliteContributorRepository::new(&conn));

    service
        .create_contributor("camp1", &NewContributor::new("c1", "pk1"))
        .unwrap();
    assert!(service.is_refundable("camp1").unwrap());

    service
        .create_contributor("camp1", &NewContributor::new("c2", "pk2"))
        .unwrap();
    assert!(service.is_refundable("camp1").unwrap());

    service.delete_contributor("camp1", "pk1").unwrap();
    assert!(service.is_refundable("camp1").unwrap());

    service.delete_contributor("camp1", "pk2").unwrap();
    assert!(!service.is_refundable("camp1").unwrap());
}

#[test]
fn contributor_keys_are_not_reused_after_delete() {
    let conn = seeded_campaigns(&["camp1"]);
    let repo = SqliteContributorRepository::new(&conn);

    let first = repo
        .create_contributor("camp1", &NewContributor::new("c1", "pk1"))
        .unwrap();
    repo.delete_contributors("camp1", "pk1").unwrap();
    let second = repo
        .create_contributor("camp1", &NewContributor::new("c2", "pk2"))
        .unwrap();

    assert!(second.id > first.id);
}

#[test]
fn duplicate_campaign_pda_scopes_to_first_created_row() {
    let conn = seeded_campaigns(&["dup", "dup"]);
    let repo = SqliteContributorRepository::new(&conn);

    let created = repo
        .create_contributor("dup", &NewContributor::new("c1", "pk1"))
        .unwrap();
    assert_eq!(created.campaign_id, 1);
}

#[test]
fn create_rejects_malformed_contributor_fields() {
    let conn = seeded_campaigns(&["camp1"]);
    let repo = SqliteContributorRepository::new(&conn);

    let err = repo
        .create_contributor("camp1", &NewContributor::new("", "pk1"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = repo
        .create_contributor("camp1", &NewContributor::new("c1", "pk 1"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn store_handle_serves_ledger_operations() {
    let store = Store::open_in_memory().unwrap();

    store
        .with_conn(|conn| SqliteCampaignRepository::new(conn).create_campaign("camp1"))
        .unwrap();
    let created = store
        .with_conn(|conn| {
            SqliteContributorRepository::new(conn)
                .create_contributor("camp1", &NewContributor::new("c1", "pk1"))
        })
        .unwrap();
    assert_eq!(created.campaign_id, 1);

    let refundable = store
        .with_conn(|conn| {
            ContributorService::new(SqliteContributorRepository::new(conn)).is_refundable("camp1")
        })
        .unwrap();
    assert!(refundable);
}
