use datalens::io::{from_json_records, read_csv_from_reader};
use datalens::{ColumnType, Dataset, Row, Value};

fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_dataset_construction() {
    let rows = vec![
        row(&[("name", "alice".into()), ("age", 30.into())]),
        row(&[("name", "bob".into()), ("age", 25.into())]),
    ];
    let ds = Dataset::new("people", rows, vec!["name".to_string(), "age".to_string()]);

    assert_eq!(ds.name(), "people");
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.column_count(), 2);
    assert!(ds.contains_column("age"));
    assert!(!ds.contains_column("height"));

    // Stats computed once at construction, in column order
    assert_eq!(ds.stats().len(), 2);
    assert_eq!(ds.stats()[0].name, "name");
    assert_eq!(ds.stats()[0].column_type, ColumnType::Categorical);
    assert_eq!(ds.stats()[1].column_type, ColumnType::Numeric);
}

#[test]
fn test_numeric_columns_subset() {
    let rows = vec![
        row(&[("label", "a".into()), ("x", 1.into()), ("y", 2.into())]),
        row(&[("label", "b".into()), ("x", 3.into()), ("y", 4.into())]),
    ];
    let columns = vec!["label".to_string(), "x".to_string(), "y".to_string()];
    let ds = Dataset::new("t", rows, columns);

    assert_eq!(ds.numeric_columns(), vec!["x".to_string(), "y".to_string()]);

    let matrix = ds.correlation_matrix();
    assert_eq!(matrix.len(), 4);
}

#[test]
fn test_column_values_reads_missing_as_null() {
    let rows = vec![
        row(&[("a", 1.into())]),
        row(&[]),
    ];
    let ds = Dataset::new("t", rows, vec!["a".to_string()]);

    let values = ds.column_values("a").unwrap();
    assert_eq!(values, vec![Value::Number(1.0), Value::Null]);
    assert!(ds.column_values("missing").is_none());
}

#[test]
fn test_empty_dataset_is_degenerate_not_an_error() {
    let ds = Dataset::new("empty", vec![], vec![]);
    assert_eq!(ds.row_count(), 0);
    assert!(ds.stats().is_empty());
    assert!(ds.numeric_columns().is_empty());
    assert!(ds.correlation_matrix().is_empty());
}

#[test]
fn test_csv_ingestion_end_to_end() {
    let csv = "\
product,units,price
widget,10,1.5
gadget,3,20
widget,7,1.5
";
    let ds = read_csv_from_reader(csv.as_bytes(), "sales").unwrap();
    assert_eq!(ds.columns(), &["product", "units", "price"]);
    assert_eq!(ds.row_count(), 3);

    let stats = ds.stats();
    assert_eq!(stats[0].column_type, ColumnType::Categorical);
    assert_eq!(stats[0].most_frequent.as_deref(), Some("widget"));
    assert_eq!(stats[1].column_type, ColumnType::Numeric);
    assert_eq!(stats[1].mean, Some(20.0 / 3.0));
    assert_eq!(ds.numeric_columns(), vec!["units".to_string(), "price".to_string()]);
}

#[test]
fn test_json_ingestion_end_to_end() {
    let json = r#"[
        {"city": "Tokyo", "temp": 22.5},
        {"city": "Oslo", "temp": null},
        {"city": "Tokyo", "temp": 18.0}
    ]"#;
    let ds = from_json_records(json, "weather").unwrap();
    assert_eq!(ds.columns(), &["city", "temp"]);

    let stats = ds.stats();
    assert_eq!(stats[1].column_type, ColumnType::Numeric);
    assert_eq!(stats[1].missing, 1);
    assert_eq!(stats[1].min, Some(18.0));
    assert_eq!(stats[1].max, Some(22.5));
}
