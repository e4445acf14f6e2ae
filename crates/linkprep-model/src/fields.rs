//! Field names for source and prepared records.

use serde::{Deserialize, Serialize};

/// Default source column holding first and middle names.
pub const NAME_FIRST_MIDDLE: &str = "name_first_middle";
/// Default source column holding the last name.
pub const NAME_LAST: &str = "name_last";
/// Default source column holding the month of birth.
pub const MOB: &str = "mob";
/// Default source column holding the year of birth.
pub const YOB: &str = "yob";

pub const GIVEN: &str = "given";
pub const FAMILY: &str = "family";
pub const MONTH: &str = "month";
pub const YEAR: &str = "year";
pub const COMPLETE: &str = "complete";
pub const GIVEN_NICKNAME: &str = "given_nickname";
pub const GIVEN_FIRST_WORD: &str = "given_first_word";
pub const GIVEN_MIDDLE_INITIAL: &str = "given_middle_initial";
pub const GIVEN_ALL_BUT_FIRST: &str = "given_all_but_first";
pub const GIVEN_ALL_BUT_FINAL: &str = "given_all_but_final";
pub const GIVEN_FINAL_INITIAL: &str = "given_final_initial";
pub const GIVEN_FINAL_WORD: &str = "given_final_word";

/// Canonical output columns, in the order downstream hashing tools expect.
pub const OUTPUT_FIELDS: [&str; 12] = [
    GIVEN,
    FAMILY,
    MONTH,
    YEAR,
    COMPLETE,
    GIVEN_NICKNAME,
    GIVEN_FIRST_WORD,
    GIVEN_MIDDLE_INITIAL,
    GIVEN_ALL_BUT_FIRST,
    GIVEN_ALL_BUT_FINAL,
    GIVEN_FINAL_INITIAL,
    GIVEN_FINAL_WORD,
];

/// Returns true if `name` is one of the canonical output columns.
pub fn is_output_field(name: &str) -> bool {
    OUTPUT_FIELDS.contains(&name)
}

/// Source column names for the four required input roles.
///
/// Defaults to `name_first_middle`, `name_last`, `mob` and `yob`. Sources
/// with different headers can rename them through the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFields {
    pub given: String,
    pub family: String,
    pub month: String,
    pub year: String,
}

impl Default for InputFields {
    fn default() -> Self {
        Self {
            given: NAME_FIRST_MIDDLE.to_string(),
            family: NAME_LAST.to_string(),
            month: MOB.to_string(),
            year: YOB.to_string(),
        }
    }
}

impl InputFields {
    /// Required column names in role order (given, family, month, year).
    pub fn required(&self) -> [&str; 4] {
        [
            self.given.as_str(),
            self.family.as_str(),
            self.month.as_str(),
            self.year.as_str(),
        ]
    }

    /// Returns true if `name` is consumed by one of the required roles.
    pub fn is_required(&self, name: &str) -> bool {
        self.required().contains(&name)
    }
}
