//! The entry store: single source of truth for entries and categories
//!
//! Every read and write goes through [`EntryStore`]. Mutations apply to the
//! in-memory state first and are then written to storage. If that write
//! fails the caller gets [`MemoirError::Persistence`], but the in-memory
//! change stays applied and visible to later reads. A later successful
//! mutation (or [`EntryStore::save`]) writes it out.
//!
//! Invariants are checked here, not by callers. The default category can
//! be neither renamed nor deleted.

use crate::domain::category::{
    Category, CategoryPatch, NewCategory, DEFAULT_CATEGORY_ID, DEFAULT_CATEGORY_NAME,
};
use crate::domain::entry::{Entry, EntryPatch, NewEntry};
use crate::domain::query;
use crate::domain::state::MemoirState;
use crate::error::{MemoirError, Result};
use crate::infrastructure::StateStorage;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use uuid::Uuid;

/// Source of the current time for timestamps
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// In-memory collection mirrored to a [`StateStorage`]
pub struct EntryStore<S: StateStorage, C: Clock = SystemClock> {
    state: MemoirState,
    storage: S,
    clock: C,
}

impl<S: StateStorage> EntryStore<S> {
    /// Rehydrate from storage, or start from the seed categories on first run.
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with_clock(storage, SystemClock)
    }
}

impl<S: StateStorage, C: Clock> EntryStore<S, C> {
    pub fn open_with_clock(storage: S, clock: C) -> Result<Self> {
        let state = match storage.load()? {
            Some(mut state) => {
                let repairs = state.repair();
                if repairs.restored_default {
                    warn!("event=store_repair detail=restored_default_category");
                }
                for id in &repairs.reassigned_entries {
                    warn!(
                        "event=store_repair detail=dangling_category entry={} category={}",
                        id, DEFAULT_CATEGORY_ID
                    );
                }
                info!(
                    "event=store_open status=rehydrated entries={} categories={} repaired={}",
                    state.entries.len(),
                    state.categories.len(),
                    !repairs.is_empty()
                );
                state
            }
            None => {
                info!("event=store_open status=seeded");
                MemoirState::seeded()
            }
        };

        Ok(EntryStore {
            state,
            storage,
            clock,
        })
    }

    // ---- entries ----

    /// Create an entry and return its id.
    pub fn add_entry(&mut self, new: NewEntry) -> Result<String> {
        require_text(&new.title, "Entry title")?;
        self.require_category(&new.category_id)?;

        let id = self.fresh_id(|state, id| state.entries.iter().any(|e| e.id == id));
        let entry = new.into_entry(id.clone(), self.clock.now());
        self.state.entries.push(entry);
        info!("event=entry_add id={}", id);

        self.persist_new(&id)?;
        Ok(id)
    }

    /// Merge `patch` into the entry with `id` and refresh `updated_at`.
    pub fn update_entry(&mut self, id: &str, patch: EntryPatch) -> Result<&Entry> {
        let index = self
            .entry_index(id)
            .ok_or_else(|| MemoirError::EntryNotFound(id.to_string()))?;
        if let Some(title) = &patch.title {
            require_text(title, "Entry title")?;
        }
        if let Some(category_id) = &patch.category_id {
            self.require_category(category_id)?;
        }

        let now = self.clock.now();
        self.state.entries[index].apply(patch, now);
        info!("event=entry_update id={}", id);

        self.persist()?;
        Ok(&self.state.entries[index])
    }

    /// Remove an entry. Returns `None`, and writes nothing, if it is absent.
    pub fn delete_entry(&mut self, id: &str) -> Result<Option<Entry>> {
        let Some(index) = self.entry_index(id) else {
            debug!("event=entry_delete id={} status=absent", id);
            return Ok(None);
        };

        let removed = self.state.entries.remove(index);
        info!("event=entry_delete id={}", id);

        self.persist()?;
        Ok(Some(removed))
    }

    pub fn get_entry_by_id(&self, id: &str) -> Option<&Entry> {
        self.state.entries.iter().find(|e| e.id == id)
    }

    /// Entries in `category_id`, in insertion order.
    pub fn get_entries_by_category(&self, category_id: &str) -> Vec<&Entry> {
        self.state
            .entries
            .iter()
            .filter(|e| e.category_id == category_id)
            .collect()
    }

    /// Entries carrying exactly `tag` (case-sensitive), in insertion order.
    pub fn get_entries_by_tag(&self, tag: &str) -> Vec<&Entry> {
        self.state.entries.iter().filter(|e| e.has_tag(tag)).collect()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.state.entries
    }

    /// Distinct tags across all entries, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        query::distinct_tags(&self.state.entries)
    }

    // ---- categories ----

    /// Create a category and return its id.
    pub fn add_category(&mut self, new: NewCategory) -> Result<String> {
        require_text(&new.name, "Category name")?;

        let id = self.fresh_id(|state, id| state.categories.iter().any(|c| c.id == id));
        self.state.categories.push(new.into_category(id.clone()));
        info!("event=category_add id={}", id);

        self.persist_new(&id)?;
        Ok(id)
    }

    /// Merge `patch` into the category with `id`.
    pub fn update_category(&mut self, id: &str, patch: CategoryPatch) -> Result<&Category> {
        let index = self
            .category_index(id)
            .ok_or_else(|| MemoirError::CategoryNotFound(id.to_string()))?;
        if let Some(name) = &patch.name {
            if id == DEFAULT_CATEGORY_ID {
                return Err(MemoirError::ProtectedCategory("renamed"));
            }
            require_text(name, "Category name")?;
        }

        self.state.categories[index].apply(patch);
        info!("event=category_update id={}", id);

        self.persist()?;
        Ok(&self.state.categories[index])
    }

    /// Delete a category, moving its entries to the default category.
    ///
    /// Reassignment and removal happen together before the single write,
    /// so no read can observe one without the other. Moved entries keep
    /// their `updated_at`.
    pub fn delete_category(&mut self, id: &str) -> Result<Category> {
        if id == DEFAULT_CATEGORY_ID {
            return Err(MemoirError::ProtectedCategory("deleted"));
        }
        let index = self
            .category_index(id)
            .ok_or_else(|| MemoirError::CategoryNotFound(id.to_string()))?;

        let mut moved = 0usize;
        for entry in self.state.entries.iter_mut().filter(|e| e.category_id == id) {
            entry.category_id = DEFAULT_CATEGORY_ID.to_string();
            moved += 1;
        }
        let removed = self.state.categories.remove(index);
        info!("event=category_delete id={} moved_entries={}", id, moved);

        self.persist()?;
        Ok(removed)
    }

    pub fn get_category_by_id(&self, id: &str) -> Option<&Category> {
        self.state.categories.iter().find(|c| c.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    /// Display name for a category id, "Uncategorized" when unknown.
    pub fn category_name(&self, id: &str) -> &str {
        self.get_category_by_id(id)
            .map(|c| c.name.as_str())
            .unwrap_or(DEFAULT_CATEGORY_NAME)
    }

    // ---- persistence ----

    /// Current state, as it would be written.
    pub fn state(&self) -> &MemoirState {
        &self.state
    }

    /// Write the current state again, e.g. after a failed save.
    pub fn save(&self) -> Result<()> {
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        match self.storage.save(&self.state) {
            Ok(()) => {
                debug!("event=store_save status=ok");
                Ok(())
            }
            Err(e) => {
                error!("event=store_save status=failed err={}", e);
                Err(match e {
                    MemoirError::Persistence(_) => e,
                    other => MemoirError::Persistence(other.to_string()),
                })
            }
        }
    }

    /// Persist after a create; a failure keeps the new id reachable.
    fn persist_new(&self, id: &str) -> Result<()> {
        self.persist().map_err(|e| MemoirError::Unsaved {
            id: id.to_string(),
            reason: match e {
                MemoirError::Persistence(reason) => reason,
                other => other.to_string(),
            },
        })
    }

    // ---- helpers ----

    fn entry_index(&self, id: &str) -> Option<usize> {
        self.state.entries.iter().position(|e| e.id == id)
    }

    fn category_index(&self, id: &str) -> Option<usize> {
        self.state.categories.iter().position(|c| c.id == id)
    }

    fn require_category(&self, id: &str) -> Result<()> {
        if self.get_category_by_id(id).is_some() {
            Ok(())
        } else {
            Err(MemoirError::CategoryNotFound(id.to_string()))
        }
    }

    fn fresh_id(&self, taken: impl Fn(&MemoirState, &str) -> bool) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !taken(&self.state, &id) {
                return id;
            }
        }
    }
}

fn require_text(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(MemoirError::Validation(format!("{} cannot be empty", what)))
    } else {
        Ok(())
    }
}
