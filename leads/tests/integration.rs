//! Integration tests for the coordinators over the in-memory store
//!
//! End-to-end write flows: create with audit, optimistic-concurrency
//! update, authorization ordering, and all-or-nothing import.

mod common;

use common::{TestFixtures, TestHarness};
use leads::core::csv;
use leads::{
    ImportCoordinator, LeadError, LeadFilter, MockRateLimiter, MockRecordStore, RecordStore,
    UpdateCoordinator,
};
use shared::{ChangeSet, LeadField, LeadId, Status};
use std::sync::Arc;

#[tokio::test]
async fn create_persists_lead_and_create_history() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();

    let lead = harness.seed_lead(&agent).await;

    let stored = harness.store.find_by_id(lead.id).await.unwrap().unwrap();
    assert_eq!(stored.owner_id, agent.id);
    assert_eq!(stored.fields.status, Status::New);

    let history = harness.store.query_history(lead.id, 10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].diff, ChangeSet::Created);
    assert_eq!(history[0].changed_by, agent.id);
}

#[tokio::test]
async fn update_with_matching_token_succeeds_and_audits_changes() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();
    let lead = harness.seed_lead(&agent).await;

    let mut input = TestFixtures::update_input(lead.updated_at.timestamp_millis());
    input.phone = Some("9123456780".to_string());
    input.status = Some("Contacted".to_string());

    let updated = harness
        .update
        .update(&agent, TestFixtures::ORIGIN, lead.id, &input)
        .await
        .expect("update should succeed");

    assert!(
        updated.updated_at > lead.updated_at,
        "new version token must be strictly greater"
    );
    assert_eq!(updated.fields.phone, "9123456780");

    let history = harness.store.query_history(lead.id, 10).await.unwrap();
    assert_eq!(history.len(), 2, "exactly one new entry per mutation");
    let ChangeSet::Fields(changes) = &history[0].diff else {
        panic!("update entry must carry a field diff");
    };
    let changed: Vec<LeadField> = changes.keys().copied().collect();
    assert_eq!(changed, vec![LeadField::Phone, LeadField::Status]);
    assert_eq!(changes[&LeadField::Status].to.as_deref(), Some("Contacted"));
}

#[tokio::test]
async fn update_without_changes_records_empty_diff() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();
    let lead = harness.seed_lead(&agent).await;

    let input = TestFixtures::update_input(lead.updated_at.timestamp_millis());
    harness
        .update
        .update(&agent, TestFixtures::ORIGIN, lead.id, &input)
        .await
        .unwrap();

    let history = harness.store.query_history(lead.id, 10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].diff, ChangeSet::Fields(Default::default()));
}

#[tokio::test]
async fn stale_token_conflicts_without_mutation_or_history() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();
    let lead = harness.seed_lead(&agent).await;

    let mut input = TestFixtures::update_input(lead.updated_at.timestamp_millis() - 1);
    input.phone = Some("9123456780".to_string());

    let err = harness
        .update
        .update(&agent, TestFixtures::ORIGIN, lead.id, &input)
        .await
        .unwrap_err();
    assert!(matches!(err, LeadError::Conflict));

    let stored = harness.store.find_by_id(lead.id).await.unwrap().unwrap();
    assert_eq!(stored.fields.phone, lead.fields.phone, "no mutation on conflict");
    assert_eq!(stored.updated_at, lead.updated_at);
    assert_eq!(harness.store.query_history(lead.id, 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn second_of_two_competing_updates_loses() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();
    let lead = harness.seed_lead(&agent).await;
    let token = lead.updated_at.timestamp_millis();

    let first = harness
        .update
        .update(&agent, TestFixtures::ORIGIN, lead.id, &TestFixtures::update_input(token))
        .await;
    assert!(first.is_ok());

    // Same token again: the first update already advanced it.
    let second = harness
        .update
        .update(&agent, TestFixtures::ORIGIN, lead.id, &TestFixtures::update_input(token))
        .await;
    assert!(matches!(second.unwrap_err(), LeadError::Conflict));
}

#[tokio::test]
async fn non_owner_is_forbidden_even_with_stale_token() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();
    let intruder = TestFixtures::other_agent();
    let lead = harness.seed_lead(&agent).await;

    // Stale token on purpose: authorization is checked before the
    // version comparison, so Forbidden must win.
    let input = TestFixtures::update_input(lead.updated_at.timestamp_millis() - 1);
    let err = harness
        .update
        .update(&intruder, TestFixtures::ORIGIN, lead.id, &input)
        .await
        .unwrap_err();
    assert!(matches!(err, LeadError::Forbidden));
}

#[tokio::test]
async fn admin_may_update_any_lead() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();
    let admin = TestFixtures::admin();
    let lead = harness.seed_lead(&agent).await;

    let mut input = TestFixtures::update_input(lead.updated_at.timestamp_millis());
    input.notes = Some("reviewed by admin".to_string());

    let updated = harness
        .update
        .update(&admin, TestFixtures::ORIGIN, lead.id, &input)
        .await
        .expect("admin update should succeed");
    assert_eq!(updated.owner_id, agent.id, "ownership never changes");
}

#[tokio::test]
async fn missing_lead_reports_not_found() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();

    let err = harness
        .update
        .update(
            &agent,
            TestFixtures::ORIGIN,
            LeadId::new(),
            &TestFixtures::update_input(0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LeadError::NotFound { .. }));
}

#[tokio::test]
async fn absent_status_retains_stored_value() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();
    let lead = harness.seed_lead(&agent).await;

    // Move status off the default first.
    let mut promote = TestFixtures::update_input(lead.updated_at.timestamp_millis());
    promote.status = Some("Qualified".to_string());
    let promoted = harness
        .update
        .update(&agent, TestFixtures::ORIGIN, lead.id, &promote)
        .await
        .unwrap();

    let input = TestFixtures::update_input(promoted.updated_at.timestamp_millis());
    let updated = harness
        .update
        .update(&agent, TestFixtures::ORIGIN, lead.id, &input)
        .await
        .unwrap();
    assert_eq!(updated.fields.status, Status::Qualified);
}

#[tokio::test]
async fn rate_limited_update_touches_nothing() {
    let mut limiter = MockRateLimiter::new();
    limiter.expect_allow().return_const(false);
    // No expectations on the store: any call would fail the test.
    let store = MockRecordStore::new();
    let coordinator = UpdateCoordinator::new(Arc::new(store), Arc::new(limiter));

    let err = coordinator
        .update(
            &TestFixtures::agent(),
            TestFixtures::ORIGIN,
            LeadId::new(),
            &TestFixtures::update_input(0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LeadError::RateLimited { .. }));
}

#[tokio::test]
async fn import_over_cap_fails_fast() {
    let harness = TestHarness::new();
    let rows = TestFixtures::import_rows(201);

    let err = harness
        .import
        .import(&TestFixtures::agent(), &rows)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LeadError::BatchTooLarge { rows: 201, max: 200 }
    ));
    assert_eq!(harness.store.history_len().await, 0);
    assert!(harness
        .store
        .query(LeadFilter::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn one_bad_row_rejects_whole_batch_with_row_numbers() {
    let harness = TestHarness::new();
    let mut rows = TestFixtures::import_rows(6);
    rows[3].phone = Some("123".to_string());

    let err = harness
        .import
        .import(&TestFixtures::agent(), &rows)
        .await
        .unwrap_err();
    let LeadError::ImportRejected { errors } = err else {
        panic!("expected ImportRejected");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, 5, "1-based plus header offset");
    assert!(errors[0].message.contains("phone"));

    assert!(harness
        .store
        .query(LeadFilter::default())
        .await
        .unwrap()
        .is_empty());
    assert_eq!(harness.store.history_len().await, 0);
}

#[tokio::test]
async fn clean_import_inserts_leads_and_import_history() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();
    let rows = TestFixtures::import_rows(5);

    let inserted = harness.import.import(&agent, &rows).await.unwrap();
    assert_eq!(inserted, 5);

    let leads = harness.store.query(LeadFilter::default()).await.unwrap();
    assert_eq!(leads.len(), 5);
    for lead in &leads {
        assert_eq!(lead.owner_id, agent.id);
        assert_eq!(lead.fields.status, Status::New);
        let history = harness.store.query_history(lead.id, 10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].diff, ChangeSet::Imported);
    }
}

#[tokio::test]
async fn rejected_import_leaves_mock_store_untouched() {
    // MockRecordStore with no expectations: any persistence call panics.
    let coordinator = ImportCoordinator::new(Arc::new(MockRecordStore::new()));
    let mut rows = TestFixtures::import_rows(3);
    rows[0].city = Some("Gotham".to_string());

    let err = coordinator
        .import(&TestFixtures::agent(), &rows)
        .await
        .unwrap_err();
    assert!(matches!(err, LeadError::ImportRejected { .. }));
}

#[tokio::test]
async fn csv_text_flows_through_import() {
    let harness = TestHarness::new();
    let text = "fullName,phone,city,propertyType,bhk,purpose,timeline,source,tags\n\
                Asha Rao,9876543210,Mohali,Apartment,3,Buy,0-3m,Website,\"hot,nri\"\n\
                Ravi Kumar,9876500000,Panchkula,Plot,,Buy,>6m,Referral,\n";

    let rows = csv::parse_rows(text).unwrap();
    let inserted = harness
        .import
        .import(&TestFixtures::agent(), &rows)
        .await
        .unwrap();
    assert_eq!(inserted, 2);

    let leads = harness.store.query(LeadFilter::default()).await.unwrap();
    let asha = leads
        .iter()
        .find(|l| l.fields.full_name == "Asha Rao")
        .unwrap();
    assert_eq!(asha.fields.tags, Some(vec!["hot".into(), "nri".into()]));
}

#[tokio::test]
async fn query_filters_and_orders_most_recent_first() {
    let harness = TestHarness::new();
    let agent = TestFixtures::agent();
    let first = harness.seed_lead(&agent).await;

    let mut input = TestFixtures::update_input(first.updated_at.timestamp_millis());
    input.status = Some("Visited".to_string());
    harness
        .update
        .update(&agent, TestFixtures::ORIGIN, first.id, &input)
        .await
        .unwrap();

    let rows = TestFixtures::import_rows(2);
    harness.import.import(&agent, &rows).await.unwrap();

    let all = harness.store.query(LeadFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));

    let visited = harness
        .store
        .query(LeadFilter {
            status: Some(Status::Visited),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(visited.len(), 1);
    assert_eq!(visited[0].id, first.id);

    let by_name = harness
        .store
        .query(LeadFilter {
            q: Some("asha".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
}
