use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics::classify::NdaType;
use crate::models::ActivityCategory;

/// One row of the activity distribution: hours and record count per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: ActivityCategory,
    pub total_hours: f64,
    pub task_count: usize,
    pub percentage: f64,
}

/// One row of the NDA breakdown, restricted to Non-Development records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdaRow {
    pub nda_type: NdaType,
    pub hours: f64,
    pub tickets: usize,
    pub percentage: f64,
}

/// Man-day figures and utilization ratios for one month. 1 MD = 8 hours.
/// Every field is 0 for an empty record set; ratios substitute 0 on a zero
/// denominator instead of propagating infinity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub unique_authors: usize,
    pub total_md: f64,
    pub available_md: f64,
    pub logged_md: f64,
    pub delivered_md: f64,
    pub nda_md: f64,
    /// Hours whose summary mentions on-demand work, regardless of category.
    /// Can overlap with logged_md/nda_md; the dashboard reports it that way.
    pub on_demand_md: f64,
    pub ratio_available_total: f64,
    pub ratio_logged_available: f64,
    pub ratio_logged_total: f64,
    pub ratio_delivered_total: f64,
    pub ratio_on_demand_available: f64,
}

/// One row of the squad analysis, grouped by project key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadRow {
    pub project_key: String,
    pub total_hours: f64,
    pub tickets: usize,
    pub contributors: usize,
    pub man_days: f64,
    pub percentage: f64,
}

/// One row of the team overview, grouped by author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRow {
    pub author: String,
    pub total_hours: f64,
    pub tickets: usize,
    pub avg_hours_per_ticket: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub total_entries: usize,
    pub unique_tickets: usize,
    pub avg_hours_per_ticket: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityScores {
    pub consistency_score: f64,
    pub distribution_balance: f64,
    pub completion_rate: f64,
}

/// Hours logged per calendar day, ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub hours: f64,
    pub tickets: usize,
}

/// Development vs non-development split with the headline productivity score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaNdaSummary {
    pub da_hours: f64,
    pub nda_hours: f64,
    pub testing_hours: f64,
    pub da_percentage: f64,
    pub nda_percentage: f64,
    pub testing_percentage: f64,
    /// None when there are no NDA hours to divide by.
    pub da_nda_ratio: Option<f64>,
    pub productivity_score: f64,
}
