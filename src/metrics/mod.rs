pub mod classify;
pub mod engine;
pub mod tables;

pub use classify::{classify_nda_subtype, NdaRule, NdaType, DEFAULT_NDA_RULES};
pub use engine::{
    aggregate_by_category, aggregate_daily, aggregate_nda_breakdown, aggregate_squad,
    aggregate_team, compute_advanced_kpis, da_nda_summary, quality_indicators, summarize_tickets,
    HOURS_PER_MAN_DAY,
};
pub use tables::{
    CategoryRow, DaNdaSummary, DailyRow, KpiSet, NdaRow, QualityScores, SquadRow, TeamRow,
    TicketSummary,
};
