use chrono::NaiveDate;
use worklog_cli::cli::reports::build_monthly_report;
use worklog_cli::metrics::{
    aggregate_by_category, aggregate_nda_breakdown, aggregate_squad, aggregate_team,
    classify_nda_subtype, compute_advanced_kpis, summarize_tickets, KpiSet, NdaType,
    DEFAULT_NDA_RULES,
};
use worklog_cli::models::{ActivityCategory, WorkLogRecord};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn record(
    issue_key: &str,
    author: &str,
    d: u32,
    hours: f64,
    category: ActivityCategory,
    summary: &str,
) -> WorkLogRecord {
    WorkLogRecord::new(issue_key, author, day(d), hours, category).with_summary(summary)
}

fn sample_month() -> Vec<WorkLogRecord> {
    vec![
        record("QA-10", "Alice Rossi", 2, 6.0, ActivityCategory::Development, "Implement fixtures"),
        record("QA-10", "Alice Rossi", 3, 2.0, ActivityCategory::Development, "Implement fixtures"),
        record("QA-11", "Bob Neri", 3, 4.0, ActivityCategory::Testing, "Regression analysis"),
        record("QA-12", "Bob Neri", 4, 3.5, ActivityCategory::Testing, "Release review"),
        record("OPS-3", "Carla Bianchi", 5, 8.0, ActivityCategory::NonDevelopment, "Holiday"),
        record("QA-13", "Carla Bianchi", 6, 1.5, ActivityCategory::NonDevelopment, "Sprint retro"),
    ]
}

#[test]
fn test_distribution_percentages_sum_to_hundred_for_nonempty_sets() {
    for records in [sample_month(), sample_month()[..2].to_vec()] {
        let rows = aggregate_by_category(&records);
        assert!(!rows.is_empty());
        let sum: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 0.01, "sum was {sum}");
    }
}

#[test]
fn test_empty_kpis_are_zero_for_any_working_days() {
    for working_days in [1, 20, 31] {
        assert_eq!(compute_advanced_kpis(&[], working_days), KpiSet::default());
    }
}

#[test]
fn test_classification_order_review_beats_holiday() {
    let rec = record(
        "QA-1",
        "Alice Rossi",
        2,
        1.0,
        ActivityCategory::NonDevelopment,
        "review before holiday",
    );
    assert_eq!(classify_nda_subtype(&rec, DEFAULT_NDA_RULES), NdaType::CodeReview);
}

#[test]
fn test_aggregates_are_idempotent_over_immutable_input() {
    let records = sample_month();

    assert_eq!(aggregate_by_category(&records), aggregate_by_category(&records));
    assert_eq!(
        aggregate_nda_breakdown(&records, DEFAULT_NDA_RULES),
        aggregate_nda_breakdown(&records, DEFAULT_NDA_RULES)
    );
    assert_eq!(aggregate_squad(&records), aggregate_squad(&records));
    assert_eq!(aggregate_team(&records), aggregate_team(&records));
    assert_eq!(summarize_tickets(&records), summarize_tickets(&records));
    assert_eq!(
        compute_advanced_kpis(&records, 20),
        compute_advanced_kpis(&records, 20)
    );
}

#[test]
fn test_man_day_worked_example() {
    // 2 authors, 20 working days, NDA hours summing to 16.
    let records = vec![
        record("QA-1", "Alice Rossi", 2, 10.0, ActivityCategory::NonDevelopment, "Vacation"),
        record("QA-2", "Bob Neri", 3, 6.0, ActivityCategory::NonDevelopment, "Sick leave"),
        record("QA-3", "Bob Neri", 4, 8.0, ActivityCategory::Development, "Feature work"),
    ];

    let kpis = compute_advanced_kpis(&records, 20);
    assert_eq!(kpis.total_md, 40.0);
    assert_eq!(kpis.nda_md, 2.0);
    assert_eq!(kpis.available_md, 38.0);
    assert_eq!(kpis.ratio_available_total, 95.0);
}

#[test]
fn test_two_record_distribution_and_nda_breakdown() {
    let records = vec![
        record("QA-1", "Alice Rossi", 2, 8.0, ActivityCategory::Development, "Feature work"),
        record(
            "QA-2",
            "Alice Rossi",
            3,
            8.0,
            ActivityCategory::NonDevelopment,
            "Sprint retrospective",
        ),
    ];

    let distribution = aggregate_by_category(&records);
    assert_eq!(distribution.len(), 2);
    assert!(distribution.iter().all(|row| row.percentage == 50.0));

    let breakdown = aggregate_nda_breakdown(&records, DEFAULT_NDA_RULES);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].nda_type, NdaType::Ceremonies);
    assert_eq!(breakdown[0].hours, 8.0);
    assert_eq!(breakdown[0].percentage, 100.0);
}

#[test]
fn test_squad_table_worked_example() {
    let records = vec![
        record("ABC-1", "Alice Rossi", 2, 5.0, ActivityCategory::Development, "Work"),
        record("XYZ-2", "Alice Rossi", 3, 15.0, ActivityCategory::Development, "Work"),
    ];

    let squads = aggregate_squad(&records);
    assert_eq!(squads[0].project_key, "XYZ");
    assert_eq!(squads[0].man_days, 1.875);
    assert_eq!(squads[0].percentage, 75.0);
    assert_eq!(squads[1].project_key, "ABC");
    assert_eq!(squads[1].man_days, 0.625);
    assert_eq!(squads[1].percentage, 25.0);
}

#[test]
fn test_on_demand_md_ignores_category() {
    for category in [
        ActivityCategory::Development,
        ActivityCategory::Testing,
        ActivityCategory::NonDevelopment,
    ] {
        let records = vec![record(
            "QA-1",
            "Alice Rossi",
            2,
            8.0,
            category,
            "On-Demand support ticket",
        )];
        let kpis = compute_advanced_kpis(&records, 20);
        assert_eq!(kpis.on_demand_md, 1.0, "category: {category}");
    }
}

#[test]
fn test_monthly_report_assembles_all_tables() {
    let records = sample_month();
    let report = build_monthly_report(&records, 2026, 3, 21);

    assert_eq!(report.record_count, 6);
    assert_eq!(report.total_hours, 25.0);
    assert_eq!(report.working_days, 21);
    assert_eq!(report.distribution.len(), 3);
    assert_eq!(report.nda_breakdown.len(), 2);
    assert_eq!(report.squads.len(), 2);
    assert_eq!(report.team.len(), 3);
    assert_eq!(report.tickets.unique_tickets, 5);
    assert_eq!(report.daily.len(), 5);
    assert_eq!(report.kpis.unique_authors, 3);
    assert_eq!(report.quality.completion_rate, 85.0);
}

#[test]
fn test_empty_month_report_is_safe_everywhere() {
    let report = build_monthly_report(&[], 2026, 3, 20);

    assert_eq!(report.record_count, 0);
    assert!(report.distribution.is_empty());
    assert!(report.nda_breakdown.is_empty());
    assert!(report.squads.is_empty());
    assert!(report.team.is_empty());
    assert!(report.daily.is_empty());
    assert_eq!(report.tickets.avg_hours_per_ticket, 0.0);
    assert_eq!(report.kpis, KpiSet::default());
    assert_eq!(report.quality.consistency_score, 0.0);
    assert_eq!(report.da_nda.da_nda_ratio, None);
}
