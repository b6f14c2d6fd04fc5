//! Category records and the reserved default bucket

use serde::{Deserialize, Serialize};

/// Id of the reserved "Uncategorized" category.
pub const DEFAULT_CATEGORY_ID: &str = "default";

/// Display name of the reserved category.
pub const DEFAULT_CATEGORY_NAME: &str = "Uncategorized";

/// A named grouping bucket for entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    /// The reserved fallback category.
    pub fn uncategorized() -> Self {
        Category::new(DEFAULT_CATEGORY_ID, DEFAULT_CATEGORY_NAME)
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_CATEGORY_ID
    }

    /// Merge the supplied fields into this category.
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = normalize_description(description);
        }
    }
}

/// Fields for creating a category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        NewCategory {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn into_category(self, id: String) -> Category {
        Category {
            id,
            name: self.name,
            description: self.description.and_then(normalize_description),
        }
    }
}

/// Partial update for a category; `None` leaves a field untouched.
///
/// An empty description clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

fn normalize_description(description: String) -> Option<String> {
    if description.trim().is_empty() {
        None
    } else {
        Some(description)
    }
}

/// Categories present on first run.
pub fn seed_categories() -> Vec<Category> {
    vec![
        Category::uncategorized(),
        Category::new("javascript", "JavaScript"),
        Category::new("python", "Python"),
        Category::new("react", "React"),
    ]
}
