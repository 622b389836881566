//! Section name to GanttPro id mapping for a single import.

use std::collections::HashMap;

use crate::models::RemoteId;

/// Sections created so far in one import pass.
///
/// Built left to right while tasks are submitted. The first registration of
/// a name is kept; later registrations of the same name are ignored.
#[derive(Debug, Default, Clone)]
pub struct SectionRegistry {
    sections: HashMap<String, RemoteId>,
}

impl SectionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a created section. Returns `false` if the name was already taken.
    pub fn register(&mut self, name: &str, id: RemoteId) -> bool {
        if self.sections.contains_key(name) {
            return false;
        }
        self.sections.insert(name.to_string(), id);
        true
    }

    /// Id of a previously created section.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&RemoteId> {
        self.sections.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
