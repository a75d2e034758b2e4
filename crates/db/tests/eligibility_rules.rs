//! Integration tests for the carrier eligibility rule store.
//!
//! Exercises the repository against a real database:
//! - Create, read back, update and delete
//! - Wildcards stored as NULL and returned as `ANY` (`ALL` for customers)
//! - Listing filters, ordering and pagination
//! - Match-time loading scoped to carrier and company

use freight_core::eligibility::normalize::{normalize_rule, NormalizedRule, RuleInput};
use freight_core::scope::Scope;
use freight_core::search::{PageRequest, RawRuleFilter, RuleFilter, StatusFilter};
use freight_core::types::DbId;
use freight_db::repositories::{CarrierRepo, CompanyRepo, CustomerRepo, EligibilityRuleRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    carrier_id: DbId,
    company_id: DbId,
    customer_id: DbId,
}

async fn seed(pool: &PgPool) -> Fixture {
    let carrier = CarrierRepo::create(pool, "Northern Freight", &["GROUND".to_string()])
        .await
        .unwrap();
    let company = CompanyRepo::create(pool, "Acme Shipping").await.unwrap();
    let customer = CustomerRepo::create(pool, company.id, "Globex").await.unwrap();
    Fixture {
        carrier_id: carrier.id,
        company_id: company.id,
        customer_id: customer.id,
    }
}

fn rule(fx: &Fixture) -> NormalizedRule {
    normalize_rule(&RuleInput {
        carrier_id: Some(fx.carrier_id),
        company_id: Some(fx.company_id),
        from_country: Some("CA".to_string()),
        to_country: Some("US".to_string()),
        ..Default::default()
    })
    .unwrap()
}

fn all_rules() -> RuleFilter {
    RuleFilter::default()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_rule_with_names(pool: PgPool) {
    let fx = seed(&pool).await;
    let input = NormalizedRule {
        customer_id: Scope::Exact(fx.customer_id),
        service_code: Scope::Exact("GROUND".to_string()),
        from_state: Scope::Exact("ON".to_string()),
        exclude: true,
        ..rule(&fx)
    };

    let created = EligibilityRuleRepo::create(&pool, &input).await.unwrap();

    assert!(created.rule.id > 0);
    assert_eq!(created.rule.carrier_id, fx.carrier_id);
    assert_eq!(created.rule.customer_id, Scope::Exact(fx.customer_id));
    assert_eq!(created.rule.from_state, Scope::Exact("ON".to_string()));
    assert_eq!(created.rule.to_state, Scope::Any);
    assert!(created.rule.exclude);
    assert_eq!(created.carrier_name, "Northern Freight");
    assert_eq!(created.company_name, "Acme Shipping");
    assert_eq!(created.customer_name.as_deref(), Some("Globex"));
    assert_eq!(created.service_name.as_deref(), Some("Ground"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wildcards_are_stored_as_null(pool: PgPool) {
    let fx = seed(&pool).await;
    let created = EligibilityRuleRepo::create(&pool, &rule(&fx)).await.unwrap();

    let (customer_id, from_city): (Option<i64>, Option<String>) = sqlx::query_as(
        "SELECT customer_id, from_city FROM carrier_eligibility_rules WHERE id = $1",
    )
    .bind(created.rule.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(customer_id, None);
    assert_eq!(from_city, None);

    let json = serde_json::to_value(&created).unwrap();
    assert_eq!(json["customer_id"], "ALL");
    assert_eq!(json["from_city"], "ANY");
    assert_eq!(json["customer_name"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_id_returns_none_for_missing(pool: PgPool) {
    let found = EligibilityRuleRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_fields_and_keeps_carrier(pool: PgPool) {
    let fx = seed(&pool).await;
    let created = EligibilityRuleRepo::create(&pool, &rule(&fx)).await.unwrap();

    let replacement = NormalizedRule {
        to_country: "MX".to_string(),
        to_city: Scope::Exact("Monterrey".to_string()),
        exclude: true,
        ..rule(&fx)
    };
    let updated = EligibilityRuleRepo::update(&pool, created.rule.id, &replacement)
        .await
        .unwrap()
        .expect("rule should exist");

    assert_eq!(updated.rule.id, created.rule.id);
    assert_eq!(updated.rule.carrier_id, fx.carrier_id);
    assert_eq!(updated.rule.to_country, "MX");
    assert_eq!(updated.rule.to_city, Scope::Exact("Monterrey".to_string()));
    assert!(updated.rule.exclude);
    assert_eq!(updated.rule.created_at, created.rule.created_at);
    assert!(updated.rule.updated_at >= created.rule.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_rule_returns_none(pool: PgPool) {
    let fx = seed(&pool).await;
    let result = EligibilityRuleRepo::update(&pool, 424_242, &rule(&fx))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_rule_from_listing(pool: PgPool) {
    let fx = seed(&pool).await;
    let created = EligibilityRuleRepo::create(&pool, &rule(&fx)).await.unwrap();

    assert!(EligibilityRuleRepo::delete(&pool, created.rule.id).await.unwrap());
    assert!(!EligibilityRuleRepo::delete(&pool, created.rule.id).await.unwrap());

    let page = EligibilityRuleRepo::list(
        &pool,
        fx.carrier_id,
        &all_rules(),
        PageRequest::new(None, None),
    )
    .await
    .unwrap();
    assert!(page.rules.is_empty());
    assert_eq!(page.total_count, 0);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_orders_newest_first_and_paginates(pool: PgPool) {
    let fx = seed(&pool).await;
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(EligibilityRuleRepo::create(&pool, &rule(&fx)).await.unwrap().rule.id);
    }

    let first = EligibilityRuleRepo::list(
        &pool,
        fx.carrier_id,
        &all_rules(),
        PageRequest::new(Some(0), Some(2)),
    )
    .await
    .unwrap();
    assert_eq!(first.total_count, 5);
    let first_ids: Vec<DbId> = first.rules.iter().map(|r| r.rule.id).collect();
    assert_eq!(first_ids, vec![ids[4], ids[3]]);

    let last = EligibilityRuleRepo::list(
        &pool,
        fx.carrier_id,
        &all_rules(),
        PageRequest::new(Some(2), Some(2)),
    )
    .await
    .unwrap();
    assert_eq!(last.total_count, 5);
    assert_eq!(last.rules.len(), 1);
    assert_eq!(last.rules[0].rule.id, ids[0]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_scoped_to_carrier(pool: PgPool) {
    let fx = seed(&pool).await;
    let other = CarrierRepo::create(&pool, "Southern Freight", &[]).await.unwrap();
    EligibilityRuleRepo::create(&pool, &rule(&fx)).await.unwrap();
    EligibilityRuleRepo::create(
        &pool,
        &NormalizedRule {
            carrier_id: other.id,
            ..rule(&fx)
        },
    )
    .await
    .unwrap();

    let page = EligibilityRuleRepo::list(
        &pool,
        other.id,
        &all_rules(),
        PageRequest::new(None, None),
    )
    .await
    .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.rules[0].rule.carrier_id, other.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_total_agrees_with_page_during_concurrent_inserts(pool: PgPool) {
    let fx = seed(&pool).await;
    let writer = {
        let pool = pool.clone();
        let input = rule(&fx);
        tokio::spawn(async move {
            for _ in 0..40 {
                EligibilityRuleRepo::create(&pool, &input).await.unwrap();
            }
        })
    };

    for _ in 0..40 {
        let page = EligibilityRuleRepo::list(
            &pool,
            fx.carrier_id,
            &all_rules(),
            PageRequest::new(Some(0), Some(100)),
        )
        .await
        .unwrap();
        assert_eq!(
            page.total_count,
            page.rules.len() as i64,
            "a page holding every rule must report the same total"
        );
    }
    writer.await.unwrap();

    let done = EligibilityRuleRepo::list(
        &pool,
        fx.carrier_id,
        &all_rules(),
        PageRequest::new(Some(0), Some(100)),
    )
    .await
    .unwrap();
    assert_eq!(done.total_count, 40);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_status_customer_and_search(pool: PgPool) {
    let fx = seed(&pool).await;
    EligibilityRuleRepo::create(&pool, &rule(&fx)).await.unwrap();
    let excluded = EligibilityRuleRepo::create(
        &pool,
        &NormalizedRule {
            customer_id: Scope::Exact(fx.customer_id),
            to_city: Scope::Exact("Buffalo".to_string()),
            exclude: true,
            ..rule(&fx)
        },
    )
    .await
    .unwrap();

    let only_excluded = RuleFilter {
        status: StatusFilter::Excluded,
        ..Default::default()
    };
    let page = EligibilityRuleRepo::list(&pool, fx.carrier_id, &only_excluded, PageRequest::new(None, None))
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.rules[0].rule.id, excluded.rule.id);

    let by_customer = RuleFilter {
        customer_id: Some(fx.customer_id),
        ..Default::default()
    };
    let page = EligibilityRuleRepo::list(&pool, fx.carrier_id, &by_customer, PageRequest::new(None, None))
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);

    let by_search = RuleFilter {
        search_term: Some("buff".to_string()),
        ..Default::default()
    };
    let page = EligibilityRuleRepo::list(&pool, fx.carrier_id, &by_search, PageRequest::new(None, None))
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.rules[0].rule.id, excluded.rule.id);

    let sentinels = RuleFilter::parse(&RawRuleFilter {
        filter_customer: Some("ALL"),
        filter_business: Some("SYSTEM"),
        filter_service: Some("ALL"),
        filter_status: Some("ALL"),
        ..Default::default()
    })
    .unwrap();
    let page = EligibilityRuleRepo::list(&pool, fx.carrier_id, &sentinels, PageRequest::new(None, None))
        .await
        .unwrap();
    assert_eq!(page.total_count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_term_wildcards_match_literally(pool: PgPool) {
    let fx = seed(&pool).await;
    EligibilityRuleRepo::create(&pool, &rule(&fx)).await.unwrap();

    let filter = RuleFilter {
        search_term: Some("%".to_string()),
        ..Default::default()
    };
    let page = EligibilityRuleRepo::list(&pool, fx.carrier_id, &filter, PageRequest::new(None, None))
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);
}

// ---------------------------------------------------------------------------
// Match-time loading
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_for_match_returns_carrier_company_rules(pool: PgPool) {
    let fx = seed(&pool).await;
    let other_company = CompanyRepo::create(&pool, "Initech").await.unwrap();
    let mine = EligibilityRuleRepo::create(&pool, &rule(&fx)).await.unwrap();
    EligibilityRuleRepo::create(
        &pool,
        &NormalizedRule {
            company_id: other_company.id,
            ..rule(&fx)
        },
    )
    .await
    .unwrap();

    let rules = EligibilityRuleRepo::list_for_match(&pool, fx.carrier_id, fx.company_id)
        .await
        .unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].id, mine.rule.id);
    assert_eq!(rules[0].from_country, "CA");
    assert_eq!(rules[0].from_state, Scope::Any);
}
