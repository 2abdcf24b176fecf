use serde::{Deserialize, Serialize};

use crate::models::WorkLogRecord;

/// Sub-types of Non-Development Activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NdaType {
    CodeReview,
    Ceremonies,
    Support,
    Duty,
    Regression,
    Testing,
    Maintenance,
    Holiday,
    Sickness,
    OnDemand,
    Other,
}

impl std::fmt::Display for NdaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NdaType::CodeReview => write!(f, "Code Review"),
            NdaType::Ceremonies => write!(f, "Ceremonies"),
            NdaType::Support => write!(f, "Support"),
            NdaType::Duty => write!(f, "Duty"),
            NdaType::Regression => write!(f, "Regression"),
            NdaType::Testing => write!(f, "Testing (Bugs + Migration)"),
            NdaType::Maintenance => write!(f, "Maintenance / Improvement"),
            NdaType::Holiday => write!(f, "Holiday"),
            NdaType::Sickness => write!(f, "Sickness"),
            NdaType::OnDemand => write!(f, "On Demand"),
            NdaType::Other => write!(f, "Other"),
        }
    }
}

/// One classification rule: a label and the keywords that select it.
#[derive(Debug, Clone, Copy)]
pub struct NdaRule {
    pub label: NdaType,
    pub keywords: &'static [&'static str],
}

/// The rule list the team reports against. Order matters: the first rule whose
/// keyword appears in the record text wins, so "code review during holiday"
/// counts as Code Review, not Holiday.
pub const DEFAULT_NDA_RULES: &[NdaRule] = &[
    NdaRule {
        label: NdaType::CodeReview,
        keywords: &["code review", "pr review", "pull request", "review"],
    },
    NdaRule {
        label: NdaType::Ceremonies,
        keywords: &[
            "ceremony",
            "standup",
            "daily",
            "retrospective",
            "retro",
            "planning",
            "refinement",
            "demo",
            "alignment",
        ],
    },
    NdaRule {
        label: NdaType::Support,
        keywords: &["support", "help", "assist"],
    },
    NdaRule {
        label: NdaType::Duty,
        keywords: &["duty", "on-call", "oncall"],
    },
    NdaRule {
        label: NdaType::Regression,
        keywords: &["regression", "smoke", "sanity"],
    },
    NdaRule {
        label: NdaType::Testing,
        keywords: &["bug", "testing", "test", "migration"],
    },
    NdaRule {
        label: NdaType::Maintenance,
        keywords: &["maintenance", "improvement", "refactor"],
    },
    NdaRule {
        label: NdaType::Holiday,
        keywords: &["holiday", "vacation", "pto"],
    },
    NdaRule {
        label: NdaType::Sickness,
        keywords: &["sick", "illness"],
    },
    NdaRule {
        label: NdaType::OnDemand,
        keywords: &["on demand", "ondemand", "on-demand"],
    },
];

/// Classify an NDA record into its sub-type by scanning the ordered rule list
/// against the lowercased summary + comment.
///
/// Matching is plain substring containment with no word boundaries, so a short
/// keyword can match inside an unrelated word ("test" inside "latest"). The
/// monthly reports have always been produced this way; keep it.
pub fn classify_nda_subtype(record: &WorkLogRecord, rules: &[NdaRule]) -> NdaType {
    let text = record.classification_text();

    for rule in rules {
        if rule.keywords.iter().any(|keyword| text.contains(keyword)) {
            return rule.label;
        }
    }

    NdaType::Other
}
