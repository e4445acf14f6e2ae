//! End-to-end record transformation scenarios.

use std::num::NonZeroUsize;

use linkprep_model::{InputFields, OUTPUT_FIELDS, RawRecord, TransformError};
use linkprep_transform::{NicknameTable, RecordTransformer, TransformOptions, YearRange, transform};

fn source(given: &str, family: &str, month: &str, year: &str) -> RawRecord {
    RawRecord::from_pairs([
        ("record_id", "r-1"),
        ("name_first_middle", given),
        ("name_last", family),
        ("mob", month),
        ("yob", year),
        ("site", "  North Campus "),
    ])
}

#[test]
fn bob_allen_obrien() {
    let table = NicknameTable::build([("bob", "robert")]);
    let result = transform(&source("Bob Allen", "O'Brien", "02", "1985"), &table)
        .expect("transform");
    let record = &result.record;

    assert_eq!(record.get("given"), Some("bob allen"));
    assert_eq!(record.get("family"), Some("obrien"));
    assert_eq!(record.get("month"), Some("2"));
    assert_eq!(record.get("year"), Some("1985"));
    assert_eq!(record.get("complete"), Some("bob allen obrien"));
    assert_eq!(record.get("given_nickname"), Some("robert"));
    assert_eq!(record.get("given_first_word"), Some("bob"));
    assert_eq!(record.get("given_middle_initial"), Some("a"));
    assert_eq!(record.get("given_all_but_first"), Some("allen"));
    assert_eq!(record.get("given_all_but_final"), Some("bob"));
    assert_eq!(record.get("given_final_initial"), Some("b"));
    assert_eq!(record.get("given_final_word"), Some("allen"));
    assert!(result.issues.is_empty());
}

#[test]
fn invalid_month_degrades_to_empty() {
    let table = NicknameTable::empty();
    let result = transform(&source("Ann", "Lee", "13", "1985"), &table).expect("transform");
    assert_eq!(result.record.get("month"), Some(""));
    assert_eq!(result.record.get("year"), Some("1985"));
    assert_eq!(result.record.get("given"), Some("ann"));
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].field(), "mob");
}

#[test]
fn missing_year_column_is_an_error() {
    let table = NicknameTable::empty();
    let raw = RawRecord::from_pairs([
        ("name_first_middle", "Ann"),
        ("name_last", "Lee"),
        ("mob", "4"),
    ]);
    let error = transform(&raw, &table).expect_err("missing yob");
    assert_eq!(
        error,
        TransformError::MissingField {
            field: "yob".to_string()
        }
    );
}

#[test]
fn empty_given_name() {
    let table = NicknameTable::build([("bob", "robert")]);
    let result = transform(&source("", "Van der Berg", "1", "1970"), &table).expect("transform");
    let record = &result.record;
    assert_eq!(record.get("given"), Some(""));
    assert_eq!(record.get("given_nickname"), Some(""));
    for field in &OUTPUT_FIELDS[6..] {
        assert_eq!(record.get(field), Some(""), "{field}");
    }
    assert_eq!(record.get("complete"), Some("van der berg"));
}

#[test]
fn empty_family_name() {
    let table = NicknameTable::empty();
    let result = transform(&source("Ann Marie", "", "", ""), &table).expect("transform");
    assert_eq!(result.record.get("complete"), Some("ann marie"));
}

#[test]
fn output_field_order_and_passthrough() {
    let table = NicknameTable::empty();
    let raw = source("Ann", "Lee", "4", "1990");
    let result = transform(&raw, &table).expect("transform");

    let names: Vec<&str> = result.record.names().collect();
    let mut expected: Vec<&str> = OUTPUT_FIELDS.to_vec();
    expected.extend(["record_id", "site"]);
    assert_eq!(names, expected);

    for (name, value) in raw.iter() {
        if ["name_first_middle", "name_last", "mob", "yob"].contains(&name) {
            continue;
        }
        assert_eq!(result.record.get(name), Some(value));
    }
    assert_eq!(result.record.get("site"), Some("  North Campus "));
}

#[test]
fn transform_is_deterministic() {
    let table = NicknameTable::build([("bob", "robert"), ("liz", "elizabeth")]);
    let raw = source("Liz Ann", "Ñúñez", "07", "1964");
    let first = transform(&raw, &table).expect("first");
    let second = transform(&raw, &table).expect("second");
    assert_eq!(first, second);
    assert_eq!(first.record.get("family"), Some("nunez"));
    assert_eq!(first.record.get("given_nickname"), Some("elizabeth"));
}

#[test]
fn custom_columns_and_year_range() {
    let table = NicknameTable::empty();
    let fields = InputFields {
        given: "first_name".to_string(),
        family: "last_name".to_string(),
        month: "birth_month".to_string(),
        year: "birth_year".to_string(),
    };
    let options = TransformOptions::new()
        .with_fields(fields)
        .with_year_range(YearRange::new(1902, 2009));
    let transformer = RecordTransformer::new(&table, options);

    let raw = RawRecord::from_pairs([
        ("first_name", "Zoë"),
        ("last_name", "Smith-Jones"),
        ("birth_month", "11"),
        ("birth_year", "2015"),
    ]);
    let result = transformer.transform(&raw).expect("transform");
    assert_eq!(result.record.get("given"), Some("zoe"));
    assert_eq!(result.record.get("family"), Some("smith jones"));
    assert_eq!(result.record.get("month"), Some("11"));
    assert_eq!(result.record.get("year"), Some(""));
    assert_eq!(result.record.len(), 12);

    let missing = RawRecord::from_pairs([("name_first_middle", "Ann")]);
    let error = transformer.transform(&missing).expect_err("missing");
    assert_eq!(
        error,
        TransformError::MissingField {
            field: "first_name".to_string()
        }
    );
}

#[test]
fn parallel_batch_keeps_order_and_isolates_failures() {
    let table = NicknameTable::build([("bob", "robert")]);
    let mut records: Vec<RawRecord> = (0..103)
        .map(|idx| source(&format!("Bob {idx}"), "Lee", "1", "1990"))
        .collect();
    records[50] = RawRecord::from_pairs([("name_first_middle", "Bob")]);

    let transformer = RecordTransformer::new(
        &table,
        TransformOptions::new().with_workers(NonZeroUsize::new(4)),
    );
    let results = transformer.transform_batch(&records);

    assert_eq!(results.len(), 103);
    for (idx, result) in results.iter().enumerate() {
        if idx == 50 {
            assert!(matches!(result, Err(TransformError::MissingField { field }) if field == "name_last"));
            continue;
        }
        let prepared = result.as_ref().expect("prepared");
        assert_eq!(prepared.record.get("given_final_word"), Some(idx.to_string().as_str()));
        assert_eq!(prepared.record.get("given_nickname"), Some("robert"));
    }
}

#[test]
fn spelling_variants_produce_the_same_keys() {
    let table = NicknameTable::empty();
    let sharp_s = transform(&source("Ævar", "Strauß", "5", "1960"), &table).expect("transform");
    let spelled = transform(&source("Aevar", "Strauss", "5", "1960"), &table).expect("transform");
    assert_eq!(sharp_s.record.get("complete"), Some("aevar strauss"));
    assert_eq!(sharp_s.record.get("complete"), spelled.record.get("complete"));
}

#[test]
fn self_listed_nickname_is_not_a_change() {
    let table = NicknameTable::build([("ann", "ann"), ("annie", "ann")]);
    let listed = transform(&source("Ann", "Lee", "", ""), &table).expect("transform");
    assert_eq!(listed.record.get("given_nickname"), Some("ann"));
    assert!(!listed.nickname_applied);

    let mapped = transform(&source("Annie", "Lee", "", ""), &table).expect("transform");
    assert_eq!(mapped.record.get("given_nickname"), Some("ann"));
    assert!(mapped.nickname_applied);
}

#[test]
fn passthrough_named_like_output_field_is_shadowed() {
    let table = NicknameTable::empty();
    let mut raw = source("Ann", "Lee", "", "");
    raw.insert("given", "kept as passthrough");
    let result = transform(&raw, &table).expect("transform");

    let givens: Vec<&str> = result
        .record
        .iter()
        .filter(|(name, _)| *name == "given")
        .map(|(_, value)| value)
        .collect();
    assert_eq!(givens, vec!["ann", "kept as passthrough"]);
    assert_eq!(result.record.get("given"), Some("ann"));
}
