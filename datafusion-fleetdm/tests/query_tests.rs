//! End-to-end SQL over the Fleet tables against a mock Fleet server

use datafusion::arrow::array::{Array, BooleanArray, Int64Array, StringArray, TimestampMicrosecondArray};
use datafusion::arrow::compute::concat_batches;
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::physical_plan::displayable;
use datafusion::prelude::*;
use datafusion_fleetdm::{FleetCatalog, FleetConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fleet_config(server: &MockServer) -> FleetConfig {
    FleetConfig::builder()
        .server_url(server.uri())
        .api_token("test-token")
        .build()
}

fn context(server: &MockServer) -> SessionContext {
    let config = SessionConfig::new()
        .with_target_partitions(1)
        .with_default_catalog_and_schema("fleet", "default");
    let ctx = SessionContext::new_with_config(config);
    ctx.register_catalog("fleet", Arc::new(FleetCatalog::new(fleet_config(server))));
    ctx
}

async fn run(ctx: &SessionContext, sql: &str) -> Vec<RecordBatch> {
    ctx.sql(sql)
        .await
        .expect("Failed to create DataFrame")
        .collect()
        .await
        .expect("Failed to collect results")
}

fn total_rows(batches: &[RecordBatch]) -> usize {
    batches.iter().map(|b| b.num_rows()).sum()
}

fn single_batch(batches: &[RecordBatch]) -> RecordBatch {
    concat_batches(&batches[0].schema(), batches).unwrap()
}

fn strings(batch: &RecordBatch, column: usize) -> Vec<Option<String>> {
    let array = batch.column(column).as_any().downcast_ref::<StringArray>().unwrap();
    (0..array.len())
        .map(|i| (!array.is_null(i)).then(|| array.value(i).to_string()))
        .collect()
}

fn ints(batch: &RecordBatch, column: usize) -> Vec<Option<i64>> {
    let array = batch.column(column).as_any().downcast_ref::<Int64Array>().unwrap();
    (0..array.len())
        .map(|i| (!array.is_null(i)).then(|| array.value(i)))
        .collect()
}

fn hosts(ids: std::ops::RangeInclusive<u64>) -> Value {
    let hosts: Vec<_> = ids
        .map(|id| json!({"id": id, "hostname": format!("host-{}", id), "status": "online"}))
        .collect();
    json!({ "hosts": hosts })
}

#[tokio::test]
async fn test_limit_stops_after_first_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/hosts"))
        .and(query_param("page", "0"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hosts(1..=100)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/hosts"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hosts(101..=200)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server);
    let results = run(&ctx, "SELECT id, hostname, server_url FROM fleetdm_host LIMIT 5").await;

    assert_eq!(total_rows(&results), 5);
    let batch = single_batch(&results);
    assert_eq!(batch.num_columns(), 3);
    assert_eq!(strings(&batch, 2)[0].as_deref(), Some(mock_server.uri().as_str()));
}

#[tokio::test]
async fn test_pages_until_short_page() {
    let mock_server = MockServer::start().await;

    let activity = |id: u64| json!({"id": id, "type": "created_user", "details": {"user_id": id}});
    let full_page: Vec<_> = (1..=50).map(activity).collect();
    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/activities"))
        .and(query_param("page", "0"))
        .and(query_param("per_page", "50"))
        .and(query_param("order_key", "id"))
        .and(query_param("order_direction", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "activities": full_page,
            "meta": {"has_next_results": true}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/activities"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "activities": [activity(51), activity(52)],
            "meta": {"has_next_results": false}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server);
    let results = run(&ctx, "SELECT COUNT(*) FROM fleetdm_activity").await;

    let batch = single_batch(&results);
    assert_eq!(ints(&batch, 0), vec![Some(52)]);
}

#[tokio::test]
async fn test_app_store_fan_out_over_teams() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "teams": [
                {"id": 1, "name": "Workstations"},
                {"id": 2, "name": "Servers"},
                {"id": 3, "name": "Mobile"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    for (team_id, apps) in [(1, vec!["111"]), (2, vec![]), (3, vec!["311", "312"])] {
        let apps: Vec<_> = apps
            .into_iter()
            .map(|id| json!({"app_store_id": id, "name": format!("app-{}", id), "platform": "ios"}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/v1/fleet/software/app_store_apps"))
            .and(query_param("team_id", team_id.to_string()))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"app_store_apps": apps})))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let ctx = context(&mock_server);
    let results = run(
        &ctx,
        "SELECT app_store_id, team_id, team_name FROM fleetdm_app_store_app ORDER BY app_store_id",
    )
    .await;

    let batch = single_batch(&results);
    assert_eq!(batch.num_rows(), 3);
    assert_eq!(
        strings(&batch, 0),
        vec![Some("111".to_string()), Some("311".to_string()), Some("312".to_string())]
    );
    assert_eq!(ints(&batch, 1), vec![Some(1), Some(3), Some(3)]);
    assert_eq!(
        strings(&batch, 2),
        vec![
            Some("Workstations".to_string()),
            Some("Mobile".to_string()),
            Some("Mobile".to_string())
        ]
    );
}

#[tokio::test]
async fn test_app_store_with_team_predicate_skips_team_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teams": []})))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/software/app_store_apps"))
        .and(query_param("team_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app_store_apps": [{"app_store_id": "409183694", "name": "Keynote"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server);
    let results = run(
        &ctx,
        "SELECT name, team_id, team_name FROM fleetdm_app_store_app WHERE team_id = 2",
    )
    .await;

    let batch = single_batch(&results);
    assert_eq!(strings(&batch, 0), vec![Some("Keynote".to_string())]);
    assert_eq!(ints(&batch, 1), vec![Some(2)]);
    assert_eq!(strings(&batch, 2), vec![None]);
}

#[tokio::test]
async fn test_unauthorized_fails_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/users"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"message":"Authentication required"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server);
    let err = ctx
        .sql("SELECT * FROM fleetdm_user")
        .await
        .expect("Failed to create DataFrame")
        .collect()
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("401"), "unexpected error: {}", msg);
    assert!(msg.contains("Authentication required"), "unexpected error: {}", msg);
}

#[tokio::test]
async fn test_absent_timestamps_and_json_are_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {
                    "id": 1,
                    "name": "Admin",
                    "created_at": "2024-01-15T10:30:00Z",
                    "updated_at": "0001-01-01T00:00:00Z",
                    "teams": [{"id": 3, "name": "Servers", "role": "observer"}]
                },
                {"id": 2, "name": "Robot", "api_only": true, "created_at": "", "teams": null}
            ]
        })))
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server);
    let results = run(
        &ctx,
        "SELECT id, created_at, updated_at, teams, api_only FROM fleetdm_user ORDER BY id",
    )
    .await;
    let batch = single_batch(&results);

    let created = batch
        .column(1)
        .as_any()
        .downcast_ref::<TimestampMicrosecondArray>()
        .unwrap();
    assert_eq!(created.value(0), 1_705_314_600_000_000);
    assert!(created.is_null(1));
    assert!(batch.column(2).is_null(0));

    let teams = strings(&batch, 3);
    let first: Value = serde_json::from_str(teams[0].as_deref().unwrap()).unwrap();
    assert_eq!(first[0]["name"], "Servers");
    assert_eq!(teams[1], None);

    let api_only = batch.column(4).as_any().downcast_ref::<BooleanArray>().unwrap();
    assert!(api_only.is_null(0));
    assert!(api_only.value(1));
}

#[tokio::test]
async fn test_host_detail_hydrates_only_for_detail_columns() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/hosts"))
        .and(query_param("order_key", "id"))
        .and(query_param("order_direction", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hosts(1..=2)))
        .expect(2)
        .mount(&mock_server)
        .await;
    for id in 1..=2u64 {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/fleet/hosts/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "host": {
                    "id": id,
                    "hostname": format!("host-{}", id),
                    "disk_encryption_enabled": id == 1,
                    "software": [{"id": 10 + id, "name": "curl"}],
                    "geolocation": null
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let ctx = context(&mock_server);

    // Base columns only: one list request, no detail requests yet.
    let results = run(&ctx, "SELECT id, hostname FROM fleetdm_host_detail").await;
    assert_eq!(total_rows(&results), 2);

    let results = run(
        &ctx,
        "SELECT id, software, disk_encryption_enabled, geolocation FROM fleetdm_host_detail ORDER BY id",
    )
    .await;
    let batch = single_batch(&results);
    let software = strings(&batch, 1);
    assert!(software[0].as_deref().unwrap().contains("\"curl\""));
    let encrypted = batch.column(2).as_any().downcast_ref::<BooleanArray>().unwrap();
    assert!(encrypted.value(0));
    assert!(!encrypted.value(1));
    assert_eq!(strings(&batch, 3), vec![None, None]);
}

#[tokio::test]
async fn test_host_lookup_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/hosts/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "host": {"id": 7, "hostname": "build-agent", "team_id": 2}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/hosts/8"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Resource Not Found"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/hosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hosts(1..=3)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server);
    let results = run(&ctx, "SELECT hostname, team_id FROM fleetdm_host WHERE id = 7").await;
    let batch = single_batch(&results);
    assert_eq!(strings(&batch, 0), vec![Some("build-agent".to_string())]);
    assert_eq!(ints(&batch, 1), vec![Some(2)]);

    let results = run(&ctx, "SELECT hostname FROM fleetdm_host WHERE id = 8").await;
    assert_eq!(total_rows(&results), 0);
}

#[tokio::test]
async fn test_predicates_become_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/software/titles"))
        .and(query_param("order_key", "hosts_count"))
        .and(query_param("order_direction", "desc"))
        .and(query_param("min_cvss_score", "7"))
        .and(query_param("vulnerable", "true"))
        .and(query_param("team_id", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "software_titles": [
                {"id": 1, "name": "Google Chrome", "hosts_count": 40, "versions_count": 3},
                {"id": 2, "name": "zoom.us", "hosts_count": 12, "versions_count": 1}
            ],
            "count": 2,
            "meta": {"has_next_results": false, "has_previous_results": false}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server);
    let results = run(
        &ctx,
        "SELECT name, min_cvss_score, vulnerable_only FROM fleetdm_software_title \
         WHERE min_cvss_score = 7 AND team_id = 0",
    )
    .await;

    let batch = single_batch(&results);
    assert_eq!(
        strings(&batch, 0),
        vec![Some("Google Chrome".to_string()), Some("zoom.us".to_string())]
    );
    assert_eq!(ints(&batch, 1), vec![Some(7), Some(7)]);
    assert!(batch.column(2).is_null(0));
}

#[tokio::test]
async fn test_boolean_predicate_and_renamed_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/software"))
        .and(query_param("vulnerable", "true"))
        .and(query_param_is_missing("vulnerable_only"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "software": [{
                "id": 9,
                "name": "openssl",
                "version": "1.1.1",
                "vulnerabilities": [{"cve": "CVE-2023-0286", "cvss_score": 7.4}]
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server);
    let results = run(
        &ctx,
        "SELECT name, vulnerabilities FROM fleetdm_software WHERE vulnerable_only",
    )
    .await;

    let batch = single_batch(&results);
    assert_eq!(strings(&batch, 0), vec![Some("openssl".to_string())]);
    let vulnerabilities: Value = serde_json::from_str(strings(&batch, 1)[0].as_deref().unwrap()).unwrap();
    assert_eq!(vulnerabilities[0]["cve"], "CVE-2023-0286");
}

#[tokio::test]
async fn test_carves_send_fixed_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fleet/carves"))
        .and(query_param("expired", "true"))
        .and(query_param("order_key", "id"))
        .and(query_param("order_direction", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "carves": [{"id": 3, "host_id": 1, "name": "carve-3", "expired": true}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server);
    let results = run(&ctx, "SELECT id, expired FROM fleetdm_carve").await;
    assert_eq!(total_rows(&results), 1);
}

#[tokio::test]
async fn test_plan_shows_pushed_predicates() {
    let mock_server = MockServer::start().await;
    let ctx = context(&mock_server);

    let df = ctx
        .sql("SELECT hostname FROM fleetdm_host WHERE team_id = 3 AND hostname LIKE 'mbp%'")
        .await
        .unwrap();
    let plan = df.create_physical_plan().await.unwrap();
    let rendered = displayable(plan.as_ref()).indent(true).to_string();

    assert!(rendered.contains("FleetExec: table=fleetdm_host, quals=[team_id=3]"), "{}", rendered);
    assert!(rendered.contains("FilterExec"), "{}", rendered);
}
