use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ids at or above this value are millisecond timestamps handed out to
/// unsaved drafts by older clients, never database keys.
pub const DRAFT_ID_THRESHOLD: i64 = 1_000_000_000_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Episodes per month.
    #[serde(default)]
    pub frequency: u32,
    /// Pain on a 0-10 scale.
    #[serde(default)]
    pub intensity: u32,
    /// Hours per episode.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub triggers: String,
    #[serde(default)]
    pub medication: String,
}

/// A follow-up record of the single-table flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub patient: String,
    pub date: String,
    #[serde(default)]
    pub kpis: Kpis,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub progress: u32,
    #[serde(default, alias = "ai_vote")]
    pub ai_vote: Option<String>,
    #[serde(default, alias = "ai_vote_reason", skip_serializing_if = "Option::is_none")]
    pub ai_vote_reason: Option<String>,
}

impl Session {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            id: None,
            patient: "New patient".to_string(),
            date: today.format("%Y-%m-%d").to_string(),
            kpis: Kpis::default(),
            diagnosis: String::new(),
            progress: 0,
            ai_vote: None,
            ai_vote_reason: None,
        }
    }

    /// Whether the record already exists on the backend and must be updated
    /// rather than created.
    pub fn is_persisted(&self) -> bool {
        matches!(self.id, Some(id) if id > 0 && id < DRAFT_ID_THRESHOLD)
    }

    /// Records which consultation the clinician accepted, and why.
    pub fn record_vote(&mut self, provider: &str, reason: &str) {
        self.ai_vote = Some(provider.to_string());
        self.ai_vote_reason = Some(reason.to_string()).filter(|r| !r.trim().is_empty());
    }
}
