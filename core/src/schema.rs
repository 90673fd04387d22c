//! The **schema discoverer**.
//!
//! First of the two extraction passes: collects every tag name that occurs
//! below a host element. The result is the column set shared by all records
//! of one document.

use std::collections::BTreeSet;

use crate::document::Document;

/// Sorted set of field names found under the hosts of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnUniverse {
    names: BTreeSet<String>,
}

impl ColumnUniverse {
    pub fn discover(document: &Document) -> Self {
        let names = document
            .hosts()
            .flat_map(|host| host.descendants())
            .map(|node| node.tag.clone())
            .collect();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnUniverse {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
