//! Raw and prepared record types.

use crate::fields::{
    COMPLETE, FAMILY, GIVEN, GIVEN_ALL_BUT_FINAL, GIVEN_ALL_BUT_FIRST, GIVEN_FINAL_INITIAL,
    GIVEN_FINAL_WORD, GIVEN_FIRST_WORD, GIVEN_MIDDLE_INITIAL, GIVEN_NICKNAME, MONTH, YEAR,
};

/// One source row as an ordered list of `(column, value)` pairs.
///
/// Column order is the source order and is preserved for passthrough
/// columns. An empty value is distinct from an absent column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from column/value pairs. A repeated column keeps its
    /// first position and its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.insert(name, value);
        }
        record
    }

    /// Zips a header row with a data row. Missing trailing cells become
    /// empty values so every header is present.
    pub fn from_row(headers: &[String], row: Vec<String>) -> Self {
        let mut cells = row.into_iter();
        let fields = headers
            .iter()
            .map(|name| (name.clone(), cells.next().unwrap_or_default()))
            .collect();
        Self { fields }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(key, _)| key == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Front and back decompositions of a normalized given name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GivenNameSegmentation {
    pub first_word: String,
    pub middle_initial: String,
    pub all_but_first: String,
    pub all_but_final: String,
    pub final_initial: String,
    pub final_word: String,
}

/// The twelve canonical prepared values of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedFields {
    pub given: String,
    pub family: String,
    pub month: String,
    pub year: String,
    pub complete: String,
    pub given_nickname: String,
    pub segmentation: GivenNameSegmentation,
}

impl PreparedFields {
    /// Canonical values paired with their output column names, in output order.
    pub fn into_pairs(self) -> [(&'static str, String); 12] {
        let segmentation = self.segmentation;
        [
            (GIVEN, self.given),
            (FAMILY, self.family),
            (MONTH, self.month),
            (YEAR, self.year),
            (COMPLETE, self.complete),
            (GIVEN_NICKNAME, self.given_nickname),
            (GIVEN_FIRST_WORD, segmentation.first_word),
            (GIVEN_MIDDLE_INITIAL, segmentation.middle_initial),
            (GIVEN_ALL_BUT_FIRST, segmentation.all_but_first),
            (GIVEN_ALL_BUT_FINAL, segmentation.all_but_final),
            (GIVEN_FINAL_INITIAL, segmentation.final_initial),
            (GIVEN_FINAL_WORD, segmentation.final_word),
        ]
    }
}

/// A prepared record: canonical columns first, then passthrough columns in
/// source order. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    fields: Vec<(String, String)>,
}

impl OutputRecord {
    pub fn assemble(prepared: PreparedFields, passthrough: Vec<(String, String)>) -> Self {
        let mut fields: Vec<(String, String)> = prepared
            .into_pairs()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        fields.extend(passthrough);
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
