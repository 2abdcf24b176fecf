//! The metrics engine: pure functions turning one month of work-log records
//! into the report tables and KPI figures. No I/O, no shared state; every
//! function returns an empty/zero result for an empty record set.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::metrics::classify::{classify_nda_subtype, NdaRule};
use crate::metrics::tables::{
    CategoryRow, DaNdaSummary, DailyRow, KpiSet, NdaRow, QualityScores, SquadRow, TeamRow,
    TicketSummary,
};
use crate::models::{ActivityCategory, WorkLogRecord};

pub const HOURS_PER_MAN_DAY: f64 = 8.0;

/// Fixed discount applied to logged effort when reporting delivered man-days.
const DELIVERY_DISCOUNT: f64 = 0.9;

/// On-demand work is detected on the summary alone, independent of category.
const ON_DEMAND_KEYWORDS: &[&str] = &["on demand", "ondemand", "on-demand"];

/// Completion rate is a reporting constant, not derived from work logs.
const COMPLETION_RATE: f64 = 85.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percentage_of(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        round2(part / total * 100.0)
    } else {
        0.0
    }
}

/// Hours summed and records counted per activity category, with each row's
/// share of the grand total. Sorted descending by hours; rows only exist for
/// categories that actually occur.
pub fn aggregate_by_category(records: &[WorkLogRecord]) -> Vec<CategoryRow> {
    let mut groups: HashMap<ActivityCategory, (f64, usize)> = HashMap::new();
    for record in records {
        let entry = groups.entry(record.category).or_insert((0.0, 0));
        entry.0 += record.time_spent_hours;
        entry.1 += 1;
    }

    let total_hours: f64 = groups.values().map(|(hours, _)| hours).sum();

    let mut rows: Vec<CategoryRow> = groups
        .into_iter()
        .map(|(category, (hours, count))| CategoryRow {
            category,
            total_hours: hours,
            task_count: count,
            percentage: percentage_of(hours, total_hours),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_hours
            .partial_cmp(&a.total_hours)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.to_string().cmp(&b.category.to_string()))
    });
    rows
}

/// Per-sub-type breakdown of Non-Development records: hours, unique tickets
/// and share of the NDA-only total. Empty when the month has no NDA records.
pub fn aggregate_nda_breakdown(records: &[WorkLogRecord], rules: &[NdaRule]) -> Vec<NdaRow> {
    let mut groups: HashMap<_, (f64, HashSet<&str>)> = HashMap::new();
    for record in records {
        if record.category != ActivityCategory::NonDevelopment {
            continue;
        }
        let subtype = classify_nda_subtype(record, rules);
        let entry = groups.entry(subtype).or_insert((0.0, HashSet::new()));
        entry.0 += record.time_spent_hours;
        entry.1.insert(record.issue_key.as_str());
    }

    let total_hours: f64 = groups.values().map(|(hours, _)| hours).sum();

    let mut rows: Vec<NdaRow> = groups
        .into_iter()
        .map(|(nda_type, (hours, tickets))| NdaRow {
            nda_type,
            hours,
            tickets: tickets.len(),
            percentage: percentage_of(hours, total_hours),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.hours
            .partial_cmp(&a.hours)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.nda_type.to_string().cmp(&b.nda_type.to_string()))
    });
    rows
}

/// Man-day availability and utilization figures for one month.
///
/// `working_days` is the caller-supplied number of working days in the month
/// (1-31). An empty record set yields an all-zero KpiSet regardless of it.
pub fn compute_advanced_kpis(records: &[WorkLogRecord], working_days: u32) -> KpiSet {
    if records.is_empty() {
        return KpiSet::default();
    }

    let unique_authors = records
        .iter()
        .map(|r| r.author.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_md = unique_authors as f64 * working_days as f64;

    let nda_hours: f64 = records
        .iter()
        .filter(|r| r.category == ActivityCategory::NonDevelopment)
        .map(|r| r.time_spent_hours)
        .sum();
    let nda_md = nda_hours / HOURS_PER_MAN_DAY;

    let available_md = total_md - nda_md;

    let dev_test_hours: f64 = records
        .iter()
        .filter(|r| {
            matches!(
                r.category,
                ActivityCategory::Development | ActivityCategory::Testing
            )
        })
        .map(|r| r.time_spent_hours)
        .sum();
    let logged_md = dev_test_hours / HOURS_PER_MAN_DAY;

    // Summary-only match, deliberately ignoring the category: on-demand hours
    // may also be counted inside logged_md or nda_md. Reported as-is.
    let on_demand_hours: f64 = records
        .iter()
        .filter(|r| {
            let summary = r.summary.to_lowercase();
            ON_DEMAND_KEYWORDS.iter().any(|kw| summary.contains(kw))
        })
        .map(|r| r.time_spent_hours)
        .sum();
    let on_demand_md = on_demand_hours / HOURS_PER_MAN_DAY;

    let delivered_md = logged_md * DELIVERY_DISCOUNT;

    let ratio = |num: f64, den: f64| if den > 0.0 { round2(num / den * 100.0) } else { 0.0 };

    KpiSet {
        unique_authors,
        total_md: round2(total_md),
        available_md: round2(available_md),
        logged_md: round2(logged_md),
        delivered_md: round2(delivered_md),
        nda_md: round2(nda_md),
        on_demand_md: round2(on_demand_md),
        ratio_available_total: ratio(available_md, total_md),
        ratio_logged_available: ratio(logged_md, available_md),
        ratio_logged_total: ratio(logged_md, total_md),
        ratio_delivered_total: ratio(delivered_md, total_md),
        ratio_on_demand_available: ratio(on_demand_md, available_md),
    }
}

/// Per-squad rollup keyed by project key: hours, unique tickets, unique
/// contributors, man-days and share of total man-days. Sorted descending by
/// man-days.
pub fn aggregate_squad(records: &[WorkLogRecord]) -> Vec<SquadRow> {
    let mut groups: HashMap<&str, (f64, HashSet<&str>, HashSet<&str>)> = HashMap::new();
    for record in records {
        let entry = groups
            .entry(record.project_key.as_str())
            .or_insert((0.0, HashSet::new(), HashSet::new()));
        entry.0 += record.time_spent_hours;
        entry.1.insert(record.issue_key.as_str());
        entry.2.insert(record.author.as_str());
    }

    let total_md: f64 = groups
        .values()
        .map(|(hours, _, _)| hours / HOURS_PER_MAN_DAY)
        .sum();

    let mut rows: Vec<SquadRow> = groups
        .into_iter()
        .map(|(project_key, (hours, tickets, authors))| {
            let man_days = hours / HOURS_PER_MAN_DAY;
            SquadRow {
                project_key: project_key.to_string(),
                total_hours: hours,
                tickets: tickets.len(),
                contributors: authors.len(),
                man_days,
                percentage: percentage_of(man_days, total_md),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.man_days
            .partial_cmp(&a.man_days)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.project_key.cmp(&b.project_key))
    });
    rows
}

/// Per-author rollup: hours, unique tickets, average hours per ticket and
/// share of total hours. Sorted descending by hours.
pub fn aggregate_team(records: &[WorkLogRecord]) -> Vec<TeamRow> {
    let mut groups: HashMap<&str, (f64, HashSet<&str>)> = HashMap::new();
    for record in records {
        let entry = groups
            .entry(record.author.as_str())
            .or_insert((0.0, HashSet::new()));
        entry.0 += record.time_spent_hours;
        entry.1.insert(record.issue_key.as_str());
    }

    let total_hours: f64 = groups.values().map(|(hours, _)| hours).sum();

    let mut rows: Vec<TeamRow> = groups
        .into_iter()
        .map(|(author, (hours, tickets))| TeamRow {
            author: author.to_string(),
            total_hours: hours,
            tickets: tickets.len(),
            avg_hours_per_ticket: if tickets.is_empty() {
                0.0
            } else {
                round2(hours / tickets.len() as f64)
            },
            percentage: percentage_of(hours, total_hours),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_hours
            .partial_cmp(&a.total_hours)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.author.cmp(&b.author))
    });
    rows
}

/// Entry count, unique ticket count and the mean of per-ticket hour sums.
pub fn summarize_tickets(records: &[WorkLogRecord]) -> TicketSummary {
    let mut per_ticket: HashMap<&str, f64> = HashMap::new();
    for record in records {
        *per_ticket.entry(record.issue_key.as_str()).or_insert(0.0) += record.time_spent_hours;
    }

    let unique_tickets = per_ticket.len();
    let avg_hours_per_ticket = if unique_tickets == 0 {
        0.0
    } else {
        round2(per_ticket.values().sum::<f64>() / unique_tickets as f64)
    };

    TicketSummary {
        total_entries: records.len(),
        unique_tickets,
        avg_hours_per_ticket,
    }
}

/// Hours and unique tickets per calendar day, ascending by date.
pub fn aggregate_daily(records: &[WorkLogRecord]) -> Vec<DailyRow> {
    let mut groups: HashMap<NaiveDate, (f64, HashSet<&str>)> = HashMap::new();
    for record in records {
        let entry = groups.entry(record.date).or_insert((0.0, HashSet::new()));
        entry.0 += record.time_spent_hours;
        entry.1.insert(record.issue_key.as_str());
    }

    let mut rows: Vec<DailyRow> = groups
        .into_iter()
        .map(|(date, (hours, tickets))| DailyRow {
            date,
            hours,
            tickets: tickets.len(),
        })
        .collect();

    rows.sort_by_key(|row| row.date);
    rows
}

/// Development vs non-development split. `da_nda_ratio` is None when there
/// are no NDA hours.
pub fn da_nda_summary(records: &[WorkLogRecord]) -> DaNdaSummary {
    if records.is_empty() {
        return DaNdaSummary::default();
    }

    let hours_for = |category: ActivityCategory| -> f64 {
        records
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.time_spent_hours)
            .sum()
    };

    let da_hours = hours_for(ActivityCategory::Development);
    let nda_hours = hours_for(ActivityCategory::NonDevelopment);
    let testing_hours = hours_for(ActivityCategory::Testing);
    let total_hours = da_hours + nda_hours + testing_hours;

    DaNdaSummary {
        da_hours: round2(da_hours),
        nda_hours: round2(nda_hours),
        testing_hours: round2(testing_hours),
        da_percentage: percentage_of(da_hours, total_hours),
        nda_percentage: percentage_of(nda_hours, total_hours),
        testing_percentage: percentage_of(testing_hours, total_hours),
        da_nda_ratio: if nda_hours > 0.0 {
            Some(round2(da_hours / nda_hours))
        } else {
            None
        },
        productivity_score: percentage_of(da_hours + testing_hours, total_hours),
    }
}

/// Day-to-day and category-to-category regularity scores.
///
/// Both use `max(0, (1 - stddev/mean) * 100)` over the group totals; a zero
/// mean or fewer than two groups scores 0. `completion_rate` is the fixed
/// reporting constant.
pub fn quality_indicators(records: &[WorkLogRecord]) -> QualityScores {
    if records.is_empty() {
        return QualityScores::default();
    }

    let daily_totals: Vec<f64> = aggregate_daily(records)
        .into_iter()
        .map(|row| row.hours)
        .collect();

    let category_totals: Vec<f64> = aggregate_by_category(records)
        .into_iter()
        .map(|row| row.total_hours)
        .collect();

    QualityScores {
        consistency_score: regularity_score(&daily_totals),
        distribution_balance: regularity_score(&category_totals),
        completion_rate: COMPLETION_RATE,
    }
}

fn regularity_score(totals: &[f64]) -> f64 {
    if totals.len() < 2 {
        return 0.0;
    }

    let mean = totals.iter().sum::<f64>() / totals.len() as f64;
    if mean <= 0.0 {
        return 0.0;
    }

    // Sample standard deviation (n - 1 in the denominator).
    let variance = totals
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (totals.len() - 1) as f64;
    let stddev = variance.sqrt();

    round2(((1.0 - stddev / mean) * 100.0).max(0.0))
}
