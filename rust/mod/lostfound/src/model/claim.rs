use serde::{Deserialize, Serialize};

/// A claimant's assertion of ownership against an approved item.
///
/// The ledger is append-only: no operation edits or deletes a claim, and
/// many claims may reference one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: String,

    /// Id of the approved item the claim is filed against.
    pub item_id: String,

    /// Snapshot of the item's title at claim time. Kept denormalized so the
    /// ledger stays readable even if the item is later removed.
    pub item_title: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub details: String,

    /// Username of the claimant who filed it.
    pub submitted_by: String,

    /// RFC 3339 submission timestamp.
    pub submitted_at: String,
}

/// Input for filing a claim.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimInput {
    pub item_id: String,

    /// Defaults to the session username when blank.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    pub details: String,
}
