use lostfound_core::{new_id, now_rfc3339, today};

use crate::model::{Item, ItemStatus, ReportInput, Session};
use crate::service::{LostFoundService, WorkflowError, keys, policy};

impl LostFoundService {
    /// Submit a found-item report. The new item enters the pending
    /// collection, newest first, and stays invisible to claimants until a
    /// moderator approves it.
    pub fn submit_report(
        &self,
        session: Option<&Session>,
        input: ReportInput,
    ) -> Result<Item, WorkflowError> {
        let session = session
            .filter(|s| policy::can_report(Some(*s)))
            .ok_or_else(|| WorkflowError::Auth("only finders may report items".into()))?;

        let title = input.title.trim().to_string();
        let description = input.description.trim().to_string();
        let category = input.category.trim().to_string();
        let location_found = input.location_found.trim().to_string();

        if title.is_empty() || description.is_empty() || category.is_empty() || location_found.is_empty()
        {
            return Err(WorkflowError::Validation(
                "title, description, category and location are required".into(),
            ));
        }
        if input.photo.is_empty() {
            return Err(WorkflowError::Validation("a photo is required".into()));
        }
        if !policy::may_submit_report(&category, input.school_issued_computer) {
            return Err(WorkflowError::Policy(
                "money, phones and personal handheld electronics cannot be posted; \
                 exception: school-issued computer"
                    .into(),
            ));
        }

        let date_found = match input.date_found.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => today(),
        };

        let item = Item {
            id: new_id(),
            title,
            description,
            category,
            location_found,
            date_found,
            photo: input.photo,
            status: ItemStatus::Available,
            reported_by: session.username.clone(),
            created_at: now_rfc3339(),
            approved_by: None,
            approved_at: None,
        };

        let mut pending: Vec<Item> = self.load_or(keys::PENDING_ITEMS, Vec::new());
        pending.insert(0, item.clone());
        self.save(keys::PENDING_ITEMS, &pending)?;

        tracing::info!(item_id = %item.id, reported_by = %item.reported_by, "report submitted");
        Ok(item)
    }

    /// Promote a pending item into the public catalog.
    ///
    /// Removes it from pending, stamps the approval fields, resets the
    /// status to Available and inserts it at the front of the catalog. On
    /// success the id lives only in the catalog.
    pub fn approve(&self, session: Option<&Session>, item_id: &str) -> Result<Item, WorkflowError> {
        let session = session
            .filter(|s| policy::can_moderate(Some(*s)))
            .ok_or_else(|| WorkflowError::Auth("only the admin may approve items".into()))?;

        let mut pending: Vec<Item> = self.load_or(keys::PENDING_ITEMS, Vec::new());
        let idx = pending
            .iter()
            .position(|it| it.id == item_id)
            .ok_or_else(|| WorkflowError::NotFound(format!("pending item '{}' not found", item_id)))?;

        let mut item = pending.remove(idx);
        item.approved_by = Some(session.username.clone());
        item.approved_at = Some(now_rfc3339());
        item.status = ItemStatus::Available;

        // Catalog first, queue second. If the second write fails the item
        // shows up in both collections until the approval is retried, which
        // beats losing it from both.
        let mut approved: Vec<Item> = self.load_or(keys::APPROVED_ITEMS, Vec::new());
        approved.insert(0, item.clone());
        self.save(keys::APPROVED_ITEMS, &approved)?;
        self.save(keys::PENDING_ITEMS, &pending)?;

        tracing::info!(item_id = %item.id, approved_by = %session.username, "item approved");
        Ok(item)
    }

    /// Drop a pending item. An id that is not pending (already moderated,
    /// or never existed) is a silent no-op so duplicate moderation actions
    /// stay harmless.
    pub fn reject(&self, session: Option<&Session>, item_id: &str) -> Result<(), WorkflowError> {
        if !policy::can_moderate(session) {
            return Err(WorkflowError::Auth("only the admin may reject items".into()));
        }

        let mut pending: Vec<Item> = self.load_or(keys::PENDING_ITEMS, Vec::new());
        let before = pending.len();
        pending.retain(|it| it.id != item_id);
        if pending.len() != before {
            self.save(keys::PENDING_ITEMS, &pending)?;
            tracing::info!(item_id, "item rejected");
        }
        Ok(())
    }

    /// Assign a catalog item's status directly. Any status is reachable
    /// from any other; there are no transition restrictions.
    pub fn set_status(
        &self,
        session: Option<&Session>,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<Item, WorkflowError> {
        if !policy::can_moderate(session) {
            return Err(WorkflowError::Auth("only the admin may set item status".into()));
        }

        let mut approved: Vec<Item> = self.load_or(keys::APPROVED_ITEMS, Vec::new());
        let item = approved
            .iter_mut()
            .find(|it| it.id == item_id)
            .ok_or_else(|| WorkflowError::NotFound(format!("approved item '{}' not found", item_id)))?;

        item.status = status;
        let updated = item.clone();
        self.save(keys::APPROVED_ITEMS, &approved)?;

        tracing::info!(item_id, status = ?updated.status, "item status updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::service::test_support::{report, session, test_service};

    #[test]
    fn submit_enters_pending_newest_first() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);

        let first = svc.submit_report(Some(&finder), report("Water Bottle", "Container")).unwrap();
        let second = svc.submit_report(Some(&finder), report("Scarf", "Clothing")).unwrap();

        assert_eq!(first.reported_by, "j.lee");
        let pending: Vec<Item> = svc.load_or(keys::PENDING_ITEMS, Vec::new());
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, second.id);
        assert_eq!(pending[1].id, first.id);
    }

    #[test]
    fn submit_requires_finder_role() {
        let svc = test_service();
        let claimant = session("m.doe", Role::Claimant);

        let err = svc.submit_report(Some(&claimant), report("Keys", "Keys")).unwrap_err();
        assert!(matches!(err, WorkflowError::Auth(_)));
        let err = svc.submit_report(None, report("Keys", "Keys")).unwrap_err();
        assert!(matches!(err, WorkflowError::Auth(_)));
    }

    #[test]
    fn submit_validates_required_fields() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);

        let mut input = report("Water Bottle", "Container");
        input.location_found = "   ".into();
        assert!(matches!(
            svc.submit_report(Some(&finder), input),
            Err(WorkflowError::Validation(_))
        ));

        let mut input = report("Water Bottle", "Container");
        input.photo = crate::model::Photo::from_encoded("");
        assert!(matches!(
            svc.submit_report(Some(&finder), input),
            Err(WorkflowError::Validation(_))
        ));
    }

    #[test]
    fn restricted_category_is_policy_error_and_writes_nothing() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);

        let err = svc.submit_report(Some(&finder), report("Phone", "iPhone")).unwrap_err();
        assert!(matches!(err, WorkflowError::Policy(_)));
        let pending: Vec<Item> = svc.load_or(keys::PENDING_ITEMS, Vec::new());
        assert!(pending.is_empty());
    }

    #[test]
    fn school_issued_flag_bypasses_policy() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);

        let mut input = report("Laptop", "Personal Electronics");
        input.school_issued_computer = true;
        svc.submit_report(Some(&finder), input).unwrap();
    }

    #[test]
    fn date_found_defaults_to_today() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);

        let item = svc.submit_report(Some(&finder), report("Scarf", "Clothing")).unwrap();
        assert_eq!(item.date_found, lostfound_core::today());

        let mut input = report("Hat", "Clothing");
        input.date_found = Some("2026-01-15".into());
        let item = svc.submit_report(Some(&finder), input).unwrap();
        assert_eq!(item.date_found, "2026-01-15");
    }

    #[test]
    fn approve_moves_between_disjoint_collections() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);
        let admin = session("admin", Role::Admin);

        let item = svc.submit_report(Some(&finder), report("Water Bottle", "Container")).unwrap();
        let approved_item = svc.approve(Some(&admin), &item.id).unwrap();

        assert_eq!(approved_item.status, ItemStatus::Available);
        assert_eq!(approved_item.approved_by.as_deref(), Some("admin"));
        assert!(approved_item.approved_at.is_some());
        assert_eq!(approved_item.reported_by, "j.lee");

        let pending: Vec<Item> = svc.load_or(keys::PENDING_ITEMS, Vec::new());
        let approved: Vec<Item> = svc.load_or(keys::APPROVED_ITEMS, Vec::new());
        assert!(pending.iter().all(|it| it.id != item.id));
        assert_eq!(approved.iter().filter(|it| it.id == item.id).count(), 1);
    }

    #[test]
    fn approve_keeps_item_reachable_when_queue_write_fails() {
        use std::sync::Arc;

        use lostfound_kv::{KVError, KVStore, MemoryStore};

        /// Shares a MemoryStore but refuses writes to one key.
        struct RefuseKey {
            inner: Arc<MemoryStore>,
            key: &'static str,
        }

        impl KVStore for RefuseKey {
            fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
                self.inner.get(key)
            }
            fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
                if key == self.key {
                    return Err(KVError::Storage("write refused".into()));
                }
                self.inner.set(key, value)
            }
            fn delete(&self, key: &str) -> Result<(), KVError> {
                self.inner.delete(key)
            }
        }

        let store = Arc::new(MemoryStore::new());
        let svc = crate::service::LostFoundService::new(store.clone());
        let finder = session("j.lee", Role::Finder);
        let admin = session("admin", Role::Admin);
        let item = svc.submit_report(Some(&finder), report("Scarf", "Clothing")).unwrap();

        let flaky = crate::service::LostFoundService::new(Arc::new(RefuseKey {
            inner: store,
            key: keys::PENDING_ITEMS,
        }));
        let err = flaky.approve(Some(&admin), &item.id).unwrap_err();
        assert!(matches!(err, WorkflowError::Storage(_)));

        // The catalog write already landed, so the item survives the failure
        // in both collections rather than vanishing. Retrying the approval
        // would clear the queue.
        let pending: Vec<Item> = svc.load_or(keys::PENDING_ITEMS, Vec::new());
        let approved: Vec<Item> = svc.load_or(keys::APPROVED_ITEMS, Vec::new());
        assert!(pending.iter().any(|it| it.id == item.id));
        assert!(approved.iter().any(|it| it.id == item.id));
    }

    #[test]
    fn approve_requires_admin_and_leaves_pending_alone() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);

        let item = svc.submit_report(Some(&finder), report("Scarf", "Clothing")).unwrap();
        let err = svc.approve(None, &item.id).unwrap_err();
        assert!(matches!(err, WorkflowError::Auth(_)));

        let pending: Vec<Item> = svc.load_or(keys::PENDING_ITEMS, Vec::new());
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn approve_unknown_id_is_not_found() {
        let svc = test_service();
        let admin = session("admin", Role::Admin);
        assert!(matches!(
            svc.approve(Some(&admin), "nope"),
            Err(WorkflowError::NotFound(_))
        ));
    }

    #[test]
    fn reject_removes_pending_item() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);
        let admin = session("admin", Role::Admin);

        let item = svc.submit_report(Some(&finder), report("Scarf", "Clothing")).unwrap();
        svc.reject(Some(&admin), &item.id).unwrap();

        let pending: Vec<Item> = svc.load_or(keys::PENDING_ITEMS, Vec::new());
        assert!(pending.is_empty());
    }

    #[test]
    fn reject_unknown_id_is_silent_noop() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);
        let admin = session("admin", Role::Admin);

        svc.submit_report(Some(&finder), report("Scarf", "Clothing")).unwrap();
        svc.reject(Some(&admin), "already-resolved").unwrap();

        let pending: Vec<Item> = svc.load_or(keys::PENDING_ITEMS, Vec::new());
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn set_status_mutates_in_place() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);
        let admin = session("admin", Role::Admin);

        let item = svc.submit_report(Some(&finder), report("Scarf", "Clothing")).unwrap();
        svc.approve(Some(&admin), &item.id).unwrap();

        let updated = svc.set_status(Some(&admin), &item.id, ItemStatus::Returned).unwrap();
        assert_eq!(updated.status, ItemStatus::Returned);

        // Available is re-enterable from any sub-state.
        let updated = svc.set_status(Some(&admin), &item.id, ItemStatus::Available).unwrap();
        assert_eq!(updated.status, ItemStatus::Available);
    }

    #[test]
    fn set_status_on_pending_item_is_not_found() {
        let svc = test_service();
        let finder = session("j.lee", Role::Finder);
        let admin = session("admin", Role::Admin);

        let item = svc.submit_report(Some(&finder), report("Scarf", "Clothing")).unwrap();
        assert!(matches!(
            svc.set_status(Some(&admin), &item.id, ItemStatus::Claimed),
            Err(WorkflowError::NotFound(_))
        ));
    }
}
