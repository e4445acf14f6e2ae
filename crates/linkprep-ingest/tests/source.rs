use std::fs;
use std::path::PathBuf;

use linkprep_ingest::{
    IngestError, read_headers, read_nickname_rows, read_source_records, validate_no_collisions,
    validate_required_fields,
};
use linkprep_model::InputFields;

fn temp_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_source_names_with_passthrough_columns() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = temp_file(
        &dir,
        "source_names.csv",
        "record_id,name_first_middle,name_last,mob,yob,notes\n\
         1,Bob Allen,O'Brien,02,1985,\"moved, 2019\"\n\
         2,José,García,,1990,\n",
    );

    let table = read_source_records(&path).expect("read csv");
    assert_eq!(
        table.headers,
        vec!["record_id", "name_first_middle", "name_last", "mob", "yob", "notes"]
    );
    assert_eq!(table.records.len(), 2);
    assert_eq!(table.records[0].get("notes"), Some("moved, 2019"));
    assert_eq!(table.records[1].get("name_first_middle"), Some("José"));
    assert_eq!(table.records[1].get("mob"), Some(""));

    let fields = InputFields::default();
    validate_required_fields(&table.headers, &fields.required(), &table.path)
        .expect("required present");
    validate_no_collisions(&table.headers, &fields, &table.path).expect("no collisions");
}

#[test]
fn missing_required_column_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = temp_file(&dir, "source.csv", "name_first_middle,name_last,mob\nA,B,1\n");
    let headers = read_headers(&path).expect("headers");

    let error = validate_required_fields(&headers, &InputFields::default().required(), &path)
        .expect_err("yob missing");
    assert!(matches!(error, IngestError::MissingColumn { ref column, .. } if column == "yob"));
    assert!(error.to_string().contains("source.csv"));
}

#[test]
fn nickname_rows_keep_file_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = temp_file(
        &dir,
        "nickname_lookup.csv",
        "raw_name,name_group\nchris,christopher\nbob,robert\nchris,christine\n",
    );
    let rows = read_nickname_rows(&path).expect("rows");
    let variants: Vec<&str> = rows.iter().map(|(variant, _)| variant.as_str()).collect();
    assert_eq!(variants, vec!["chris", "bob", "chris"]);
    assert_eq!(rows[2].1, "christine");
}
