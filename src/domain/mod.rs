//! Domain layer - Records, invariants and derived queries

pub mod category;
pub mod entry;
pub mod markdown;
pub mod query;
pub mod state;

pub use category::{Category, CategoryPatch, NewCategory, DEFAULT_CATEGORY_ID};
pub use entry::{Entry, EntryPatch, NewEntry};
pub use query::{EntryQuery, SortOrder};
pub use state::MemoirState;
