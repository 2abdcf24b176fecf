use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::metrics::{
    aggregate_by_category, aggregate_daily, aggregate_nda_breakdown, aggregate_squad,
    aggregate_team, compute_advanced_kpis, da_nda_summary, quality_indicators, summarize_tickets,
    CategoryRow, DaNdaSummary, DailyRow, KpiSet, NdaRow, QualityScores, SquadRow, TeamRow,
    TicketSummary, DEFAULT_NDA_RULES,
};
use crate::models::WorkLogRecord;

/// Every table and KPI for one month, computed in one pass over the records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub working_days: u32,
    pub record_count: usize,
    pub total_hours: f64,
    pub distribution: Vec<CategoryRow>,
    pub nda_breakdown: Vec<NdaRow>,
    pub kpis: KpiSet,
    pub squads: Vec<SquadRow>,
    pub team: Vec<TeamRow>,
    pub tickets: TicketSummary,
    pub quality: QualityScores,
    pub daily: Vec<DailyRow>,
    pub da_nda: DaNdaSummary,
}

pub fn build_monthly_report(
    records: &[WorkLogRecord],
    year: i32,
    month: u32,
    working_days: u32,
) -> MonthlyReport {
    MonthlyReport {
        year,
        month,
        working_days,
        record_count: records.len(),
        total_hours: records.iter().map(|r| r.time_spent_hours).sum(),
        distribution: aggregate_by_category(records),
        nda_breakdown: aggregate_nda_breakdown(records, DEFAULT_NDA_RULES),
        kpis: compute_advanced_kpis(records, working_days),
        squads: aggregate_squad(records),
        team: aggregate_team(records),
        tickets: summarize_tickets(records),
        quality: quality_indicators(records),
        daily: aggregate_daily(records),
        da_nda: da_nda_summary(records),
    }
}

pub fn export_json(report: &MonthlyReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// CSV export of the flat work-log entries, one row per logged time entry.
pub fn export_csv(records: &[WorkLogRecord], output_path: &Path) -> Result<()> {
    use std::fs::File;
    use std::io::Write;

    let mut file = File::create(output_path)?;

    writeln!(file, "Date,Author,Issue Key,Project,Category,Hours")?;
    for record in records {
        writeln!(
            file,
            "{},{},{},{},{},{:.2}",
            record.date,
            record.author,
            record.issue_key,
            record.project_key,
            record.category,
            record.time_spent_hours
        )?;
    }

    Ok(())
}

pub fn print_report(report: &MonthlyReport) {
    println!(
        "QA Work Log Report - {} {}",
        month_name(report.month),
        report.year
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "⏱️  {:.1}h across {} entries, {} tickets, {} contributors",
        report.total_hours,
        report.record_count,
        report.tickets.unique_tickets,
        report.kpis.unique_authors
    );
    println!();

    if report.record_count == 0 {
        println!("No work logs found in this period");
        return;
    }

    println!("📊 KPI Overview ({} working days):", report.working_days);
    println!(
        "   Total {:.2} MD | Available {:.2} MD | Logged {:.2} MD | Delivered {:.2} MD | NDA {:.2} MD",
        report.kpis.total_md,
        report.kpis.available_md,
        report.kpis.logged_md,
        report.kpis.delivered_md,
        report.kpis.nda_md
    );
    println!(
        "   Available/Total {:.2}% | Logged/Available {:.2}% | Logged/Total {:.2}%",
        report.kpis.ratio_available_total,
        report.kpis.ratio_logged_available,
        report.kpis.ratio_logged_total
    );
    println!(
        "   Delivered/Total {:.2}% | On Demand/Available {:.2}% ({:.2} MD on demand)",
        report.kpis.ratio_delivered_total,
        report.kpis.ratio_on_demand_available,
        report.kpis.on_demand_md
    );
    match report.da_nda.da_nda_ratio {
        Some(ratio) => println!("   DA:NDA ratio {:.2}:1", ratio),
        None => println!("   DA:NDA ratio N/A"),
    }
    println!();

    println!("📈 Activity Distribution:");
    for row in &report.distribution {
        println!(
            "   {} - {:.1}h ({} tasks, {:.2}%)",
            row.category, row.total_hours, row.task_count, row.percentage
        );
    }
    println!();

    if !report.nda_breakdown.is_empty() {
        println!("🔴 NDA Breakdown:");
        for row in &report.nda_breakdown {
            println!(
                "   {} - {:.1}h ({} tickets, {:.2}%)",
                row.nda_type, row.hours, row.tickets, row.percentage
            );
        }
        println!();
    }

    println!("👥 Squads:");
    for row in &report.squads {
        println!(
            "   {} - {:.2} MD ({:.1}h, {} tickets, {} contributors, {:.2}%)",
            row.project_key, row.man_days, row.total_hours, row.tickets, row.contributors,
            row.percentage
        );
    }
    println!();

    println!("🧑‍💻 Team Overview:");
    for row in &report.team {
        println!(
            "   {} - {:.1}h ({} tickets, avg {:.2}h/ticket, {:.2}%)",
            row.author, row.total_hours, row.tickets, row.avg_hours_per_ticket, row.percentage
        );
    }
    println!();

    println!(
        "🎫 Tickets: {} entries | {} unique | avg {:.2}h/ticket",
        report.tickets.total_entries,
        report.tickets.unique_tickets,
        report.tickets.avg_hours_per_ticket
    );
    println!(
        "💎 Quality: consistency {:.1}% | balance {:.1}% | completion {:.1}%",
        report.quality.consistency_score,
        report.quality.distribution_balance,
        report.quality.completion_rate
    );
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityCategory;
    use chrono::NaiveDate;

    #[test]
    fn test_build_report_on_empty_records() {
        let report = build_monthly_report(&[], 2026, 3, 20);
        assert_eq!(report.record_count, 0);
        assert_eq!(report.total_hours, 0.0);
        assert!(report.distribution.is_empty());
        assert_eq!(report.kpis, KpiSet::default());
    }

    #[test]
    fn test_csv_export_writes_one_row_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worklogs.csv");

        let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let records = vec![
            WorkLogRecord::new("QA-1", "Alice Rossi", date, 2.5, ActivityCategory::Testing)
                .with_summary("Regression run"),
        ];

        export_csv(&records, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2026-03-04,Alice Rossi,QA-1,QA,Testing Activities,2.50");
    }

    #[test]
    fn test_json_export_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let records =
            vec![WorkLogRecord::new("QA-1", "Alice Rossi", date, 8.0, ActivityCategory::Development)];
        let report = build_monthly_report(&records, 2026, 3, 20);

        export_json(&report, &path).unwrap();
        let loaded: MonthlyReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.record_count, 1);
        assert_eq!(loaded.kpis, report.kpis);
    }
}
