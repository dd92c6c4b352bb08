//! In-memory store for in-progress wizard drafts, keyed by the draft id the
//! client carries in a cookie. Drafts live only as long as the wizard is
//! open: they are discarded on cancel or successful submit and expire after
//! a TTL otherwise.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::wizard::FormDraft;

struct StoredDraft {
    draft: FormDraft,
    expires_at: Instant,
}

pub struct DraftStore {
    drafts: Mutex<HashMap<Uuid, StoredDraft>>,
    ttl: Duration,
}

impl DraftStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            drafts: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn create(&self, draft: FormDraft) -> Uuid {
        let id = Uuid::new_v4();
        let mut drafts = self.drafts.lock().unwrap();
        prune(&mut drafts);
        drafts.insert(
            id,
            StoredDraft {
                draft,
                expires_at: Instant::now() + self.ttl,
            },
        );
        id
    }

    pub fn get(&self, id: Uuid) -> Option<FormDraft> {
        let mut drafts = self.drafts.lock().unwrap();
        prune(&mut drafts);
        drafts.get(&id).map(|stored| stored.draft.clone())
    }

    /// Mutate a stored draft in place; refreshes its TTL. `None` when the
    /// draft is unknown or expired.
    pub fn update<R>(&self, id: Uuid, apply: impl FnOnce(&mut FormDraft) -> R) -> Option<R> {
        let mut drafts = self.drafts.lock().unwrap();
        prune(&mut drafts);
        let stored = drafts.get_mut(&id)?;
        stored.expires_at = Instant::now() + self.ttl;
        Some(apply(&mut stored.draft))
    }

    pub fn remove(&self, id: Uuid) -> Option<FormDraft> {
        self.drafts
            .lock()
            .unwrap()
            .remove(&id)
            .map(|stored| stored.draft)
    }
}

fn prune(drafts: &mut HashMap<Uuid, StoredDraft>) {
    let now = Instant::now();
    drafts.retain(|_, stored| stored.expires_at > now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardStep;

    #[test]
    fn stores_and_returns_drafts_by_id() {
        let store = DraftStore::new(Duration::from_secs(60));
        let id = store.create(FormDraft::with_email("max@example.com"));

        let draft = store.get(id).unwrap();
        assert_eq!(draft.fields().email, "max@example.com");
        assert_eq!(draft.step(), WizardStep::Identity);
        assert!(store.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn update_mutates_in_place() {
        let store = DraftStore::new(Duration::from_secs(60));
        let id = store.create(FormDraft::new());

        store
            .update(id, |draft| {
                draft.apply(crate::wizard::DraftPatch {
                    email: Some("max@example.com".into()),
                    ..Default::default()
                });
            })
            .unwrap();

        assert_eq!(store.get(id).unwrap().fields().email, "max@example.com");
    }

    #[test]
    fn remove_discards_the_draft() {
        let store = DraftStore::new(Duration::from_secs(60));
        let id = store.create(FormDraft::new());
        assert!(store.remove(id).is_some());
        assert!(store.get(id).is_none());
    }

    #[test]
    fn expired_drafts_are_pruned() {
        let store = DraftStore::new(Duration::ZERO);
        let id = store.create(FormDraft::new());
        assert!(store.get(id).is_none());
        assert!(store.update(id, |_| ()).is_none());
    }
}
