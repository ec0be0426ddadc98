use serde::{Deserialize, Serialize};

use crate::model::Photo;

/// Status of an approved item. Meaningful only while the item sits in the
/// approved catalog; any status is reachable from any other by direct
/// assignment, there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    Available,
    Claimed,
    Returned,
    /// Old records wrote this as "Donated/Disposed".
    #[serde(alias = "Donated/Disposed")]
    Disposed,
}

impl Default for ItemStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Available" => Ok(ItemStatus::Available),
            "Claimed" => Ok(ItemStatus::Claimed),
            "Returned" => Ok(ItemStatus::Returned),
            "Disposed" | "Donated/Disposed" => Ok(ItemStatus::Disposed),
            other => Err(format!("unknown item status '{}'", other)),
        }
    }
}

/// A found-item record.
///
/// Lives in exactly one of two disjoint collections: `pendingItems`
/// (awaiting moderation) or `approvedItems` (the public catalog). Collection
/// membership is what signifies the life-cycle stage; the record itself
/// carries no pending/approved marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Opaque unique identifier, generated at creation, immutable.
    pub id: String,

    pub title: String,

    pub description: String,

    pub category: String,

    pub location_found: String,

    /// `YYYY-MM-DD`; defaults to the submission date when not supplied.
    pub date_found: String,

    /// Inlined encoded image. Required at submission.
    pub photo: Photo,

    #[serde(default)]
    pub status: ItemStatus,

    /// Username of the Finder who submitted the report. Survives approval.
    pub reported_by: String,

    /// RFC 3339 submission timestamp.
    pub created_at: String,

    /// Username of the moderator who approved the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,

    /// RFC 3339 approval timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
}

/// Input for submitting a found-item report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location_found: String,

    /// Defaults to the current date when omitted or blank.
    #[serde(default)]
    pub date_found: Option<String>,

    pub photo: Photo,

    /// The sole exception to the restricted-category ban.
    #[serde(default)]
    pub school_issued_computer: bool,
}
