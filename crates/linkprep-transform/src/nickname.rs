//! Nickname grouping.

use std::collections::HashMap;

use tracing::debug;

use crate::normalization::normalize_text;

/// Read-only map from a normalized name variant to its nickname group.
///
/// Built once from reference rows and then shared by reference across
/// workers. Keys and groups are normalized with [`normalize_text`].
///
/// Duplicate variants are resolved **last-write-wins**: a later row for the
/// same normalized variant replaces the earlier group, so the table depends
/// on row order. [`NicknameTable::overridden`] reports how many rows were
/// replaced.
#[derive(Debug, Clone, Default)]
pub struct NicknameTable {
    groups: HashMap<String, String>,
    overridden: usize,
}

impl NicknameTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the table from `(variant, group)` rows.
    ///
    /// Rows whose variant or group normalizes to an empty string are
    /// skipped.
    pub fn build<I, V, G>(entries: I) -> Self
    where
        I: IntoIterator<Item = (V, G)>,
        V: AsRef<str>,
        G: AsRef<str>,
    {
        let mut table = Self::default();
        for (variant, group) in entries {
            let variant = normalize_text(variant.as_ref());
            let group = normalize_text(group.as_ref());
            if variant.is_empty() || group.is_empty() {
                continue;
            }
            if let Some(previous) = table.groups.insert(variant.clone(), group) {
                table.overridden += 1;
                debug!(
                    variant = %variant,
                    previous_group = %previous,
                    "nickname variant overridden by a later row"
                );
            }
        }
        table
    }

    /// Group for `token`, if the table has one.
    pub fn group(&self, token: &str) -> Option<&str> {
        self.groups.get(&normalize_text(token)).map(String::as_str)
    }

    /// Group for `token`, falling back to the normalized token itself.
    ///
    /// Total: a name absent from the table is its own group.
    pub fn resolve(&self, token: &str) -> String {
        let key = normalize_text(token);
        match self.groups.get(&key) {
            Some(group) => group.clone(),
            None => key,
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of rows that replaced an earlier row for the same variant.
    pub fn overridden(&self) -> usize {
        self.overridden
    }
}

impl<V, G> FromIterator<(V, G)> for NicknameTable
where
    V: AsRef<str>,
    G: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (V, G)>>(iter: I) -> Self {
        Self::build(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_variant() {
        let table = NicknameTable::build([("bob", "robert"), ("Bobby", "Robert")]);
        assert_eq!(table.resolve("bob"), "robert");
        assert_eq!(table.resolve("BOBBY"), "robert");
        assert_eq!(table.group(" Bob "), Some("robert"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn unknown_token_is_its_own_group() {
        let table = NicknameTable::build([("bob", "robert")]);
        assert_eq!(table.resolve("Zelda"), "zelda");
        assert_eq!(table.group("zelda"), None);
        assert_eq!(NicknameTable::empty().resolve("  Ana  "), "ana");
    }

    #[test]
    fn last_write_wins() {
        let table = NicknameTable::build([("chris", "christopher"), ("chris", "christine")]);
        assert_eq!(table.resolve("chris"), "christine");
        assert_eq!(table.overridden(), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn skips_empty_rows() {
        let table: NicknameTable = [("", "robert"), ("bob", "  "), ("'", "x")]
            .into_iter()
            .collect();
        assert!(table.is_empty());
    }
}
