use datalens::{correlation_matrix, Row, Value};

fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn entry_value(matrix: &[datalens::CorrelationEntry], x: &str, y: &str) -> f64 {
    matrix
        .iter()
        .find(|e| e.x == x && e.y == y)
        .map(|e| e.value)
        .unwrap()
}

#[test]
fn test_perfectly_correlated_pair() {
    // A=[1,2,3], B=[2,4,6] -> corr(A,B) = 1.0
    let rows = vec![
        row(&[("a", 1.into()), ("b", 2.into())]),
        row(&[("a", 2.into()), ("b", 4.into())]),
        row(&[("a", 3.into()), ("b", 6.into())]),
    ];
    let matrix = correlation_matrix(&rows, &columns(&["a", "b"]));
    assert!((entry_value(&matrix, "a", "b") - 1.0).abs() < 1e-10);
}

#[test]
fn test_matrix_has_k_squared_ordered_entries() {
    let rows = vec![
        row(&[("a", 1.into()), ("b", 2.into()), ("c", 5.into())]),
        row(&[("a", 2.into()), ("b", 1.into()), ("c", 4.into())]),
    ];
    let cols = columns(&["a", "b", "c"]);
    let matrix = correlation_matrix(&rows, &cols);
    assert_eq!(matrix.len(), 9);

    // Row-major order over the column list, self-pairs included
    let pairs: Vec<(&str, &str)> = matrix.iter().map(|e| (e.x.as_str(), e.y.as_str())).collect();
    assert_eq!(pairs[0], ("a", "a"));
    assert_eq!(pairs[1], ("a", "b"));
    assert_eq!(pairs[3], ("b", "a"));
    assert_eq!(pairs[8], ("c", "c"));
}

#[test]
fn test_symmetry() {
    let rows = vec![
        row(&[("a", 1.into()), ("b", 9.into()), ("c", 2.into())]),
        row(&[("a", 4.into()), ("b", 3.into()), ("c", 2.5.into())]),
        row(&[("a", 2.into()), ("b", 7.into()), ("c", 1.into())]),
        row(&[("a", 8.into()), ("b", 2.into()), ("c", 6.into())]),
    ];
    let cols = columns(&["a", "b", "c"]);
    let matrix = correlation_matrix(&rows, &cols);
    for x in ["a", "b", "c"] {
        for y in ["a", "b", "c"] {
            assert_eq!(entry_value(&matrix, x, y), entry_value(&matrix, y, x));
        }
    }
}

#[test]
fn test_self_correlation() {
    let rows = vec![
        row(&[("varying", 1.into()), ("constant", 5.into())]),
        row(&[("varying", 2.into()), ("constant", 5.into())]),
        row(&[("varying", 3.into()), ("constant", 5.into())]),
    ];
    let cols = columns(&["varying", "constant"]);
    let matrix = correlation_matrix(&rows, &cols);

    // Nonzero variance: self-correlation is 1
    assert!((entry_value(&matrix, "varying", "varying") - 1.0).abs() < 1e-10);
    // Zero variance: self-correlation is 0, not 1 and not NaN
    assert_eq!(entry_value(&matrix, "constant", "constant"), 0.0);
    assert_eq!(entry_value(&matrix, "constant", "varying"), 0.0);
}

#[test]
fn test_unparsable_cells_substitute_zero() {
    // "oops" and the absent cell enter as 0.0, not excluded; with b = 2a
    // over the clean rows, the substitutions break perfect correlation
    let rows = vec![
        row(&[("a", 1.into()), ("b", 2.into())]),
        row(&[("a", "oops".into()), ("b", 4.into())]),
        row(&[("a", 3.into())]),
        row(&[("a", 4.into()), ("b", 8.into())]),
    ];
    let matrix = correlation_matrix(&rows, &columns(&["a", "b"]));
    let value = entry_value(&matrix, "a", "b");
    assert!(value.abs() <= 1.0);
    assert!((value - 1.0).abs() > 1e-6);
}

#[test]
fn test_sampling_uses_first_500_rows() {
    // First 500 rows perfectly correlated; rows past the cap would destroy
    // the correlation if they were read
    let mut rows: Vec<Row> = (0..500)
        .map(|i| row(&[("a", (i as f64).into()), ("b", (2.0 * i as f64).into())]))
        .collect();
    for i in 0..100 {
        rows.push(row(&[("a", (i as f64).into()), ("b", (-3.0 * i as f64).into())]));
    }
    let matrix = correlation_matrix(&rows, &columns(&["a", "b"]));
    assert!((entry_value(&matrix, "a", "b") - 1.0).abs() < 1e-10);
}

#[test]
fn test_empty_inputs() {
    let matrix = correlation_matrix(&[], &columns(&["a"]));
    assert_eq!(matrix.len(), 1);
    assert_eq!(matrix[0].value, 0.0);

    assert!(correlation_matrix(&[], &[]).is_empty());
}
