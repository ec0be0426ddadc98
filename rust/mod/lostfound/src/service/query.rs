use crate::model::{Item, Session};
use crate::service::{LostFoundService, WorkflowError, keys, norm_user, policy};

/// Category sentinel meaning "no category filter".
const ALL_CATEGORIES: &str = "all";

impl LostFoundService {
    /// Search the public catalog.
    ///
    /// Free text matches case-insensitively as a substring of the item's
    /// title, description and location taken together; an empty query
    /// matches everything. The category filter is an exact case-insensitive
    /// match, with "all" or blank meaning no filter. Both apply
    /// conjunctively and the catalog's newest-first order is preserved.
    pub fn search_catalog(&self, query: &str, category: &str) -> Vec<Item> {
        let q = query.trim().to_lowercase();
        let cat = category.trim().to_lowercase();
        let filter_cat = !cat.is_empty() && cat != ALL_CATEGORIES;

        let approved: Vec<Item> = self.load_or(keys::APPROVED_ITEMS, Vec::new());
        approved
            .into_iter()
            .filter(|it| {
                let hay = format!("{} {} {}", it.title, it.description, it.location_found)
                    .to_lowercase();
                let match_q = q.is_empty() || hay.contains(&q);
                let match_cat = !filter_cat || it.category.trim().to_lowercase() == cat;
                match_q && match_cat
            })
            .collect()
    }

    /// Everything a Finder can see of their own submissions: pending first,
    /// then approved. With `is_admin_view` the username filter is dropped.
    pub fn items_visible_to_finder(&self, username: &str, is_admin_view: bool) -> Vec<Item> {
        let mut items: Vec<Item> = self.load_or(keys::PENDING_ITEMS, Vec::new());
        let approved: Vec<Item> = self.load_or(keys::APPROVED_ITEMS, Vec::new());
        items.extend(approved);
        let folded = norm_user(username);

        items
            .into_iter()
            .filter(|it| is_admin_view || norm_user(&it.reported_by) == folded)
            .collect()
    }

    /// The moderation queue, newest first. Moderator-only.
    pub fn pending_items(&self, session: Option<&Session>) -> Result<Vec<Item>, WorkflowError> {
        if !policy::can_moderate(session) {
            return Err(WorkflowError::Auth("only the admin may view pending reports".into()));
        }
        Ok(self.load_or(keys::PENDING_ITEMS, Vec::new()))
    }
}
