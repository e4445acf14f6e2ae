//! Column checks run before any record is transformed.

use std::path::Path;

use linkprep_model::{InputFields, is_output_field};

use crate::error::{IngestError, Result};

/// Checks that every column in `required` is present in `headers`.
///
/// Reports the first absent column in `required` order.
pub fn validate_required_fields<S: AsRef<str>>(
    headers: &[String],
    required: &[S],
    path: &Path,
) -> Result<()> {
    for column in required {
        let column = column.as_ref();
        if !headers.iter().any(|header| header == column) {
            return Err(IngestError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Rejects passthrough columns named like a prepared output column, which
/// would otherwise produce two columns with the same name.
pub fn validate_no_collisions(headers: &[String], fields: &InputFields, path: &Path) -> Result<()> {
    match headers
        .iter()
        .find(|header| !fields.is_required(header) && is_output_field(header))
    {
        Some(column) => Err(IngestError::ColumnCollision {
            column: column.clone(),
            path: path.to_path_buf(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn test_required_present() {
        let fields = InputFields::default();
        let cols = headers(&["id", "name_first_middle", "name_last", "mob", "yob"]);
        assert!(validate_required_fields(&cols, &fields.required(), Path::new("s.csv")).is_ok());
    }

    #[test]
    fn test_required_missing_reports_first() {
        let fields = InputFields::default();
        let cols = headers(&["name_first_middle", "name_last"]);
        let result = validate_required_fields(&cols, &fields.required(), Path::new("s.csv"));
        assert!(matches!(
            result,
            Err(IngestError::MissingColumn { column, .. }) if column == "mob"
        ));
    }

    #[test]
    fn test_collision() {
        let fields = InputFields::default();
        let cols = headers(&["name_first_middle", "given", "complete"]);
        let result = validate_no_collisions(&cols, &fields, Path::new("s.csv"));
        assert!(matches!(
            result,
            Err(IngestError::ColumnCollision { column, .. }) if column == "given"
        ));
    }

    #[test]
    fn test_required_column_may_use_output_name() {
        let fields = InputFields {
            year: "year".to_string(),
            ..InputFields::default()
        };
        let cols = headers(&["name_first_middle", "name_last", "mob", "year"]);
        assert!(validate_no_collisions(&cols, &fields, Path::new("s.csv")).is_ok());
    }
}
