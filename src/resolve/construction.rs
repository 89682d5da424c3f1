//! Construction-category lookup.

use crate::snapshot::{ConstructionRow, ReferenceSnapshot};

pub struct ConstructionResolver<'a> {
    snapshot: &'a ReferenceSnapshot,
}

impl<'a> ConstructionResolver<'a> {
    pub fn new(snapshot: &'a ReferenceSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn resolve(&self, construction_id: u32) -> Option<&'a ConstructionRow> {
        self.snapshot.construction(construction_id)
    }

    /// Category display name, or the placeholder used in reasons when the
    /// id resolves to nothing.
    pub fn name_or_unknown(&self, construction_id: u32) -> &'a str {
        self.resolve(construction_id)
            .map(|row| row.construction_name.as_str())
            .unwrap_or("不明")
    }

    /// True when the category's name contains any of the required keywords.
    pub fn name_matches(&self, construction_id: u32, keywords: &[String]) -> bool {
        match self.resolve(construction_id) {
            Some(row) => keywords
                .iter()
                .any(|keyword| row.construction_name.contains(keyword.as_str())),
            None => false,
        }
    }
}
