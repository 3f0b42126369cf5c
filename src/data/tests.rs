use super::*;

fn ten_samples() -> Dataset {
    let features = Matrix::from_vec(10, 2, (0..20).map(|v| v as f32).collect())
        .expect("Matrix creation should succeed with valid test data");
    Dataset::new(features, vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1])
        .expect("Dataset creation should succeed")
}

#[test]
fn test_dataset_rejects_label_count_mismatch() {
    let features = Matrix::from_vec(2, 1, vec![1.0, 2.0]).expect("valid matrix");
    let err = Dataset::new(features, vec![0]).expect_err("one label for two rows");
    assert!(matches!(err, AfinarError::DimensionMismatch { .. }));
}

#[test]
fn test_dataset_counts() {
    let data = ten_samples();
    assert_eq!(data.len(), 10);
    assert!(!data.is_empty());
    assert_eq!(data.n_features(), 2);
    assert_eq!(data.n_classes(), 2);
}

#[test]
fn test_subset_keeps_rows_aligned_with_labels() {
    let data = ten_samples();
    let subset = data.subset(&[3, 0]);
    assert_eq!(subset.labels, vec![1, 0]);
    assert_eq!(subset.features.row(0), &[6.0, 7.0]);
    assert_eq!(subset.features.row(1), &[0.0, 1.0]);
}

#[test]
fn test_train_test_split_basic() {
    let split = train_test_split(&ten_samples(), 0.2, 42).expect("Split should succeed");
    assert_eq!(split.train.len(), 8, "Training set should have 8 samples");
    assert_eq!(split.validation.len(), 2, "Validation set should have 2 samples");
    assert_eq!(split.train.n_features(), 2);
    assert!(split.validate().is_ok());
}

#[test]
fn test_train_test_split_reproducibility() {
    let data = ten_samples();
    let a = train_test_split(&data, 0.3, 7).expect("Split should succeed");
    let b = train_test_split(&data, 0.3, 7).expect("Split should succeed");
    assert_eq!(a, b);
}

#[test]
fn test_train_test_split_partitions_every_row_once() {
    let data = ten_samples();
    let split = train_test_split(&data, 0.4, 1).expect("Split should succeed");
    let mut firsts: Vec<i32> = split
        .train
        .features
        .as_slice()
        .chunks(2)
        .chain(split.validation.features.as_slice().chunks(2))
        .map(|row| row[0] as i32)
        .collect();
    firsts.sort_unstable();
    assert_eq!(firsts, (0..20).step_by(2).collect::<Vec<_>>());
}

#[test]
fn test_train_test_split_rejects_bad_test_size() {
    let data = ten_samples();
    for size in [0.0, 1.0, -0.5, f64::NAN] {
        assert!(matches!(
            train_test_split(&data, size, 0),
            Err(AfinarError::InvalidHyperparameter { .. })
        ));
    }
}

#[test]
fn test_train_test_split_rejects_empty_partition() {
    let features = Matrix::from_vec(2, 1, vec![1.0, 2.0]).expect("valid matrix");
    let data = Dataset::new(features, vec![0, 1]).expect("valid dataset");
    assert!(matches!(
        train_test_split(&data, 0.9, 0),
        Err(AfinarError::DataUnavailable { .. })
    ));
}

#[test]
fn test_train_test_split_rounds_holdout_up() {
    // 10 * 0.21 = 2.1 rows, and 10 * 0.01 still holds out one row.
    let data = ten_samples();
    let split = train_test_split(&data, 0.21, 0).expect("Split should succeed");
    assert_eq!(split.validation.len(), 3);
    assert_eq!(split.train.len(), 7);

    let split = train_test_split(&data, 0.01, 0).expect("Split should succeed");
    assert_eq!(split.validation.len(), 1);
    assert_eq!(split.train.len(), 9);
}

#[test]
fn test_split_validate_rejects_empty_validation() {
    let empty = Dataset::new(Matrix::zeros(0, 2), Vec::new()).expect("empty dataset");
    let split = DataSplit::new(ten_samples(), empty);
    let err = split.validate().expect_err("validation split is empty");
    assert!(matches!(err, AfinarError::DataUnavailable { .. }));
    assert!(err.to_string().contains("validation"));
}

#[test]
fn test_split_validate_rejects_width_mismatch() {
    let narrow = Dataset::new(
        Matrix::from_vec(2, 1, vec![1.0, 2.0]).expect("valid matrix"),
        vec![0, 1],
    )
    .expect("valid dataset");
    let split = DataSplit::new(ten_samples(), narrow);
    assert!(matches!(
        split.validate(),
        Err(AfinarError::DataUnavailable { .. })
    ));
}

#[test]
fn test_csv_numeric_labels() {
    let text = "x,y,label\n1.0,2.0,0\n3.0,4.0,2\n\n5.0,6.0,1\n";
    let data = Dataset::from_csv_str(text, true).expect("valid csv");
    assert_eq!(data.len(), 3);
    assert_eq!(data.labels, vec![0, 2, 1]);
    assert_eq!(data.features.row(2), &[5.0, 6.0]);
}

#[test]
fn test_csv_text_labels_indexed_by_first_appearance() {
    let text = "5.1,3.5,setosa\n7.0,3.2,versicolor\n4.9,3.0,setosa\n6.3,3.3,virginica\n";
    let data = Dataset::from_csv_str(text, false).expect("valid csv");
    assert_eq!(data.labels, vec![0, 1, 0, 2]);
    assert_eq!(data.n_classes(), 3);
}

#[test]
fn test_csv_ragged_row_reports_line() {
    let text = "a,b,label\n1,2,0\n1,0\n";
    let err = Dataset::from_csv_str(text, true).expect_err("ragged row");
    assert!(matches!(err, AfinarError::Parse { line: 3, .. }), "{err}");
}

#[test]
fn test_csv_non_numeric_feature_reports_line() {
    let err = Dataset::from_csv_str("1,2,0\nx,2,1\n", false).expect_err("bad feature");
    assert!(matches!(err, AfinarError::Parse { line: 2, .. }), "{err}");
}

#[test]
fn test_csv_quoted_label_may_contain_comma() {
    let text = "x,y,species\n1.0,2.0,\"setosa, wild\"\n3.0,4.0,versicolor\n5.0,6.0,\"setosa, wild\"\n";
    let data = Dataset::from_csv_str(text, true).expect("quoted field");
    assert_eq!(data.n_features(), 2);
    assert_eq!(data.labels, vec![0, 1, 0]);
}

#[test]
fn test_csv_leading_blank_lines_before_header() {
    let text = "\n\nx,y,label\n1.0,2.0,1\n3.0,4.0,0\n";
    let data = Dataset::from_csv_str(text, true).expect("blank lines skipped");
    assert_eq!(data.len(), 2);
    assert_eq!(data.labels, vec![1, 0]);
}

#[test]
fn test_csv_reader_source() {
    let text = "0.5,1\n1.5,0\n";
    let data = Dataset::from_csv_reader(std::io::Cursor::new(text), false).expect("reader");
    assert_eq!(data.features.row(1), &[1.5]);
}

#[test]
fn test_csv_header_only_is_unavailable() {
    let err = Dataset::from_csv_str("a,b,label\n", true).expect_err("no rows");
    assert!(matches!(err, AfinarError::DataUnavailable { .. }));
}

#[test]
fn test_load_csv_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "f,label\n0.5,1\n1.5,0\n").expect("write csv");
    let data = Dataset::load_csv(&path, true).expect("load csv");
    assert_eq!(data.labels, vec![1, 0]);
}

#[test]
fn test_load_csv_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Dataset::load_csv(dir.path().join("missing.csv"), true).expect_err("no file");
    assert!(matches!(err, AfinarError::Io(_)));
}
