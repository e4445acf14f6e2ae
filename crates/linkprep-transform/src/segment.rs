//! Front and back splits of a compound given name.
//!
//! Sources disagree on where a first name ends and a middle name begins
//! ("Mary Ann Lee" may be first "Mary Ann" or first "Mary"). Emitting both a
//! front split and a back split gives the linkage step a key for either
//! reading.

use linkprep_model::GivenNameSegmentation;

/// Splits an already-normalized given name on spaces.
///
/// | field            | tokens `[t1 .. tn]`   |
/// |------------------|-----------------------|
/// | `first_word`     | `t1`                  |
/// | `middle_initial` | first letter of `t2`  |
/// | `all_but_first`  | `t2 .. tn`            |
/// | `all_but_final`  | `t1 .. t(n-1)`        |
/// | `final_initial`  | first letter of `t(n-1)` |
/// | `final_word`     | `tn`                  |
///
/// Fields whose token does not exist are empty.
pub fn segment_given_name(given: &str) -> GivenNameSegmentation {
    let tokens: Vec<&str> = given.split_whitespace().collect();
    let Some((first, rest)) = tokens.split_first() else {
        return GivenNameSegmentation::default();
    };
    let Some((last, leading)) = tokens.split_last() else {
        return GivenNameSegmentation::default();
    };

    GivenNameSegmentation {
        first_word: (*first).to_string(),
        middle_initial: rest.first().copied().map(initial).unwrap_or_default(),
        all_but_first: rest.join(" "),
        all_but_final: leading.join(" "),
        final_initial: leading.last().copied().map(initial).unwrap_or_default(),
        final_word: (*last).to_string(),
    }
}

fn initial(token: &str) -> String {
    token.chars().next().map(String::from).unwrap_or_default()
}
