use std::collections::{BTreeMap, BTreeSet};

use crate::usecase::ports::authz::Authorizer;

/// Sections each role may edit. `*` grants every section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionTable {
    role: String,
    editable: BTreeMap<String, BTreeSet<String>>,
}

impl PermissionTable {
    pub fn new(role: impl Into<String>, editable: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            role: role.into(),
            editable: editable
                .into_iter()
                .map(|(role, sections)| (role, sections.into_iter().collect()))
                .collect(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

impl Authorizer for PermissionTable {
    fn can_edit(&self, section: &str) -> bool {
        self.editable
            .get(&self.role)
            .is_some_and(|sections| sections.contains("*") || sections.contains(section))
    }
}
