//! Authorization policy — pure predicates, no store access.

use crate::model::{Role, Session};

/// Only Finders may submit found-item reports.
pub fn can_report(session: Option<&Session>) -> bool {
    matches!(session, Some(s) if s.role == Role::Finder)
}

/// Only Claimants may file claims.
pub fn can_claim(session: Option<&Session>) -> bool {
    matches!(session, Some(s) if s.role == Role::Claimant)
}

/// Only the Admin may approve, reject, or set item status.
pub fn can_moderate(session: Option<&Session>) -> bool {
    matches!(session, Some(s) if s.role == Role::Admin)
}

/// School policy bars Finder-side posting of money and personal handheld
/// electronics. Matches on lower-cased, trimmed category text.
pub fn is_restricted_category(category: &str) -> bool {
    let c = category.trim().to_lowercase();
    if c.is_empty() {
        return false;
    }
    if c.contains("money") || c.contains("cash") {
        return true;
    }
    if c.contains("phone") || c.contains("handheld") {
        return true;
    }
    c.contains("personal") && c.contains("electronic")
}

/// A school-issued-computer flag is the sole exception to the
/// restricted-category ban.
pub fn may_submit_report(category: &str, school_issued_computer: bool) -> bool {
    !is_restricted_category(category) || school_issued_computer
}
