//! End-to-end pipeline behaviour over untyped JSON records.

use chrono::{DateTime, FixedOffset, NaiveDate};
use crm_seeker::{
    achievement_bucket, query, sort_records, temporal_sort_rule, Bucket, Classifier, FilterSpec,
    PageSpec, Query, Schema, SortSpec,
};
use serde_json::{json, Value as Json};

// ============================================================================
// Test helpers
// ============================================================================

fn at(raw: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(raw).unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn titles(slice: &[&Json]) -> Vec<String> {
    slice
        .iter()
        .map(|r| r["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn calendar_schema() -> Schema {
    Schema::new("calendar_event", "start")
        .range_end("end")
        .search_fields(["title", "description"])
        .classifier(Classifier::Temporal)
}

fn targets_schema() -> Schema {
    Schema::new("target", "month")
        .search_fields(["member"])
        .status_field("pct")
        .classifier(Classifier::Achievement)
        .default_sort("member")
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn identical_arguments_give_identical_results() {
    let records = vec![
        json!({ "title": "b", "start": "2024-01-02" }),
        json!({ "title": "a", "start": "2024-01-02" }),
        json!({ "title": "c", "start": "2024-01-01" }),
    ];
    let schema = calendar_schema();
    let filter = FilterSpec::new().search("");
    let sort = SortSpec::asc("start");
    let page = PageSpec::first(2).unwrap();
    let now = at("2024-01-05T00:00:00Z");

    let first = query(&records, &schema, &filter, &sort, &page, &now);
    let second = query(&records, &schema, &filter, &sort, &page, &now);
    assert_eq!(first, second);
    assert_eq!(titles(&first.slice), ["c", "b"]);
}

#[test]
fn same_day_window_includes_start_only_record() {
    let records = vec![json!({ "title": "Standup", "start": "2024-05-10T08:00" })];
    let day = ymd(2024, 5, 10);

    let result = Query::new(&calendar_schema())
        .date_from(day)
        .date_to(day)
        .run(&records, &at("2024-05-01T00:00:00Z"));

    assert_eq!(titles(&result.slice), ["Standup"]);
}

#[test]
fn end_sort_with_null_end_matches_start_sort() {
    let records = vec![
        json!({ "title": "x", "start": "2024-01-01", "end": null }),
        json!({ "title": "y", "start": "2024-03-01", "end": null }),
        json!({ "title": "z", "start": "2024-02-01", "end": null }),
    ];
    let refs: Vec<&Json> = records.iter().collect();
    let schema = calendar_schema();
    let zone = FixedOffset::east_opt(0).unwrap();

    let by_end = sort_records(&refs, &schema, &SortSpec::desc("end"), &zone);
    let by_start = sort_records(&refs, &schema, &SortSpec::desc("start"), &zone);
    assert_eq!(titles(&by_end), titles(&by_start));
    assert_eq!(titles(&by_end), ["y", "z", "x"]);
}

#[test]
fn search_is_or_across_declared_fields() {
    let records = vec![
        json!({ "title": "Renewal call", "description": "" }),
        json!({ "title": "Lunch", "description": "talk about renewal" }),
        json!({ "title": "Gym", "description": "leg day" }),
    ];

    let result = Query::new(&calendar_schema())
        .search("RENEWAL")
        .order_asc("title")
        .run(&records, &at("2024-01-01T00:00:00Z"));

    assert_eq!(titles(&result.slice), ["Lunch", "Renewal call"]);
}

#[test]
fn achievement_buckets_are_exclusive_with_closed_boundaries() {
    for p in [-10.0, 0.0, 49.9, 50.0, 75.0, 99.99, 100.0, 250.0] {
        let bucket = achievement_bucket(p);
        let hits = [Bucket::Over, Bucket::Partial, Bucket::Under]
            .iter()
            .filter(|b| **b == bucket)
            .count();
        assert_eq!(hits, 1, "p = {p}");
    }
    assert_eq!(achievement_bucket(100.0), Bucket::Over);
    assert_eq!(achievement_bucket(50.0), Bucket::Partial);
}

#[test]
fn achievement_filter_over_target_rows() {
    let records = vec![
        json!({ "member": "Ana", "pct": 120 }),
        json!({ "member": "Bo", "pct": 50 }),
        json!({ "member": "Cy", "pct": "49.5" }),
        json!({ "member": "Di", "pct": null }),
        json!({ "member": "Ed", "pct": 100 }),
    ];
    let schema = targets_schema();
    let now = at("2024-01-01T00:00:00Z");

    let over = Query::new(&schema).bucket(Bucket::Over).run(&records, &now);
    let partial = Query::new(&schema).bucket(Bucket::Partial).run(&records, &now);
    let under = Query::new(&schema).bucket(Bucket::Under).run(&records, &now);
    let all = Query::new(&schema).run(&records, &now);

    let members = |slice: &[&Json]| -> Vec<String> {
        slice
            .iter()
            .map(|r| r["member"].as_str().unwrap_or_default().to_string())
            .collect()
    };
    assert_eq!(members(&over.slice), ["Ana", "Ed"]);
    assert_eq!(members(&partial.slice), ["Bo"]);
    assert_eq!(members(&under.slice), ["Cy"]);
    assert_eq!(all.total_count, 5);
}

#[test]
fn ended_scenario_alpha_beta() {
    let records = vec![
        json!({ "title": "Alpha", "end": "2024-06-01" }),
        json!({ "title": "Beta", "end": "2024-06-03" }),
    ];
    let schema = Schema::new("event", "start")
        .range_end("end")
        .classifier(Classifier::Temporal);
    let now = at("2024-06-02T00:00:00Z");
    let sort = temporal_sort_rule(&schema, &Bucket::Ended).unwrap();
    assert_eq!(sort, SortSpec::desc("end"));

    let result = query(
        &records,
        &schema,
        &FilterSpec::new().bucket(Bucket::Ended),
        &sort,
        &PageSpec::first(5).unwrap(),
        &now,
    );

    assert_eq!(titles(&result.slice), ["Alpha"]);
    assert_eq!(result.total_count, 1);
    assert_eq!(result.total_pages, 1);
}

#[test]
fn upcoming_rule_sorts_soonest_first() {
    let records = vec![
        json!({ "title": "Later", "start": "2024-07-01" }),
        json!({ "title": "Done", "start": "2024-05-01" }),
        json!({ "title": "Soon", "start": "2024-06-05" }),
    ];
    let schema = calendar_schema();
    let sort = temporal_sort_rule(&schema, &Bucket::Upcoming).unwrap();

    let result = Query::new(&schema)
        .bucket(Bucket::Upcoming)
        .sort(sort)
        .run(&records, &at("2024-06-02T00:00:00Z"));

    assert_eq!(titles(&result.slice), ["Soon", "Later"]);
}

// ============================================================================
// Totality
// ============================================================================

#[test]
fn malformed_records_never_panic() {
    let records = vec![
        json!(null),
        json!([1, 2, 3]),
        json!("just a string"),
        json!({ "title": 42, "start": { "nested": true }, "end": [] }),
        json!({ "title": "ok", "start": "2024-01-01" }),
    ];
    let schema = calendar_schema();
    let now = at("2024-06-02T00:00:00Z");

    let result = Query::new(&schema)
        .search("o")
        .date_from(ymd(2023, 1, 1))
        .bucket(Bucket::Ended)
        .order_desc("end")
        .page(PageSpec::new(2, 1).unwrap())
        .run(&records, &now);
    assert_eq!(titles(&result.slice), ["ok"]);

    // Sorting alone keeps every record, unreadable ones last
    let everything = Query::new(&schema)
        .order_asc("start")
        .run(&records, &now);
    assert_eq!(everything.total_count, 5);
    assert_eq!(everything.slice[0]["title"], "ok");
}

#[test]
fn out_of_range_page_returns_empty_slice_with_totals() {
    let records: Vec<Json> = (0..7)
        .map(|i| json!({ "title": format!("t{i}"), "start": "2024-01-01" }))
        .collect();

    let result = Query::new(&calendar_schema())
        .page(PageSpec::new(3, 9).unwrap())
        .run(&records, &at("2024-01-01T00:00:00Z"));

    assert!(result.is_empty());
    assert_eq!(result.total_count, 7);
    assert_eq!(result.total_pages, 3);
}
