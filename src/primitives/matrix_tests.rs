pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-6);
    assert!((m.get(1, 2) - 6.0).abs() < 1e-6);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0]);
    assert!(matches!(result, Err(AfinarError::DimensionMismatch { .. })));
}

#[test]
fn test_from_rows() {
    let m = Matrix::from_rows(&[vec![1.0_f32, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
        .expect("rows have equal length");
    assert_eq!(m.shape(), (3, 2));
    assert_eq!(m.row(2), &[5.0, 6.0]);
}

#[test]
fn test_from_rows_ragged() {
    let result = Matrix::from_rows(&[vec![1.0_f32, 2.0], vec![3.0]]);
    assert!(result.is_err());
}

#[test]
fn test_from_rows_empty() {
    let m = Matrix::<f32>::from_rows(&[]).expect("empty input is a 0x0 matrix");
    assert!(m.is_empty());
    assert_eq!(m.shape(), (0, 0));
}

#[test]
fn test_zeros() {
    let m = Matrix::<f32>::zeros(2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_row() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
    assert_eq!(m.row(1).len(), 3);
}

#[test]
fn test_select_rows_preserves_order() {
    let m = Matrix::from_vec(3, 2, vec![0.0_f32, 0.1, 1.0, 1.1, 2.0, 2.1])
        .expect("test data has correct dimensions: 3*2=6 elements");
    let picked = m.select_rows(&[2, 0]);
    assert_eq!(picked.shape(), (2, 2));
    assert_eq!(picked.row(0), &[2.0, 2.1]);
    assert_eq!(picked.row(1), &[0.0, 0.1]);
}
