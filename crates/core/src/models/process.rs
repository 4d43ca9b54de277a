use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessStatus {
    InAnalysis,
    Approved,
    Refused,
}

impl ProcessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::InAnalysis => "IN_ANALYSIS",
            ProcessStatus::Approved => "APPROVED",
            ProcessStatus::Refused => "REFUSED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IN_ANALYSIS" => Some(ProcessStatus::InAnalysis),
            "APPROVED" => Some(ProcessStatus::Approved),
            "REFUSED" => Some(ProcessStatus::Refused),
            _ => None,
        }
    }
}

/// An administrative request tracked through review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: Uuid,
    pub user_id: String,
    pub service_code: String,
    pub status: ProcessStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulableResponse {
    pub process_id: Uuid,
    pub status: ProcessStatus,
    pub schedulable: bool,
}
