use lostfound_core::{new_id, now_rfc3339};

use crate::model::{Claim, ClaimInput, Item, Session};
use crate::service::{LostFoundService, WorkflowError, keys, norm_user, policy};

impl LostFoundService {
    /// File a claim against an approved item.
    ///
    /// The claim snapshots the item's title at filing time and is never
    /// edited or deleted afterward. The item's status is deliberately not
    /// checked — a claim may be filed even on a Disposed item; that matches
    /// the current product behavior and is flagged as an open question, not
    /// corrected here.
    pub fn file_claim(
        &self,
        session: Option<&Session>,
        input: ClaimInput,
    ) -> Result<Claim, WorkflowError> {
        let session = session
            .filter(|s| policy::can_claim(Some(*s)))
            .ok_or_else(|| WorkflowError::Auth("only claimants may file claims".into()))?;

        let approved: Vec<Item> = self.load_or(keys::APPROVED_ITEMS, Vec::new());
        let item = approved
            .iter()
            .find(|it| it.id == input.item_id)
            .ok_or_else(|| {
                WorkflowError::NotFound(format!("approved item '{}' not found", input.item_id))
            })?;

        let details = input.details.trim().to_string();
        if details.is_empty() {
            return Err(WorkflowError::Validation("claim details are required".into()));
        }

        let name = match input.name.trim() {
            "" => session.username.clone(),
            n => n.to_string(),
        };
        let email = input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        let claim = Claim {
            id: new_id(),
            item_id: item.id.clone(),
            item_title: item.title.clone(),
            name,
            email,
            details,
            submitted_by: session.username.clone(),
            submitted_at: now_rfc3339(),
        };

        let mut claims: Vec<Claim> = self.load_or(keys::CLAIMS, Vec::new());
        claims.push(claim.clone());
        self.save(keys::CLAIMS, &claims)?;

        tracing::info!(claim_id = %claim.id, item_id = %claim.item_id, "claim filed");
        Ok(claim)
    }

    /// All claims against one item, in ledger order.
    pub fn claims_for_item(&self, item_id: &str) -> Vec<Claim> {
        let claims: Vec<Claim> = self.load_or(keys::CLAIMS, Vec::new());
        claims.into_iter().filter(|c| c.item_id == item_id).collect()
    }

    /// All claims whose referenced approved item was reported by the given
    /// username. Scopes a Finder's view to claims on their own submissions.
    pub fn claims_reported_by(&self, username: &str) -> Vec<Claim> {
        let approved: Vec<Item> = self.load_or(keys::APPROVED_ITEMS, Vec::new());
        let claims: Vec<Claim> = self.load_or(keys::CLAIMS, Vec::new());
        let folded = norm_user(username);

        claims
            .into_iter()
            .filter(|c| {
                approved
                    .iter()
                    .find(|it| it.id == c.item_id)
                    .is_some_and(|it| norm_user(&it.reported_by) == folded)
            })
            .collect()
    }

    /// The full claim ledger in filing order. Moderator-only — every claim
    /// regardless of item or reporter.
    pub fn all_claims(&self, session: Option<&Session>) -> Result<Vec<Claim>, WorkflowError> {
        if !policy::can_moderate(session) {
            return Err(WorkflowError::Auth("only the admin may view the claim ledger".into()));
        }
        Ok(self.load_or(keys::CLAIMS, Vec::new()))
    }
}
