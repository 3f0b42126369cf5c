use super::*;

fn two_clusters() -> (Matrix<f32>, Vec<usize>) {
    let x = Matrix::from_vec(
        6,
        2,
        vec![
            0.0, 0.0, // class 0
            0.0, 1.0, // class 0
            1.0, 0.0, // class 0
            5.0, 5.0, // class 1
            5.0, 6.0, // class 1
            6.0, 5.0, // class 1
        ],
    )
    .expect("6x2 matrix with 12 values");
    (x, vec![0, 0, 0, 1, 1, 1])
}

#[test]
fn test_knn_separates_clusters() {
    let (x, y) = two_clusters();
    let mut knn = KNearestNeighbors::new(3);
    knn.fit(&x, &y).expect("valid training data");
    assert!(knn.is_fitted());

    let test = Matrix::from_vec(2, 2, vec![0.5, 0.5, 5.5, 5.5]).expect("2x2 test matrix");
    assert_eq!(knn.predict(&test).expect("fitted"), vec![0, 1]);
}

#[test]
fn test_knn_k1_memorises_training_set() {
    let (x, y) = two_clusters();
    for metric in [
        DistanceMetric::Euclidean,
        DistanceMetric::Manhattan,
        DistanceMetric::Minkowski(3.0),
    ] {
        let mut knn = KNearestNeighbors::new(1).with_metric(metric);
        knn.fit(&x, &y).expect("valid training data");
        assert_eq!(knn.predict(&x).expect("fitted"), y, "{metric:?}");
    }
}

#[test]
fn test_distance_metrics() {
    let a = [0.0, 0.0];
    let b = [3.0, 4.0];
    assert!((DistanceMetric::Euclidean.distance(&a, &b) - 5.0).abs() < 1e-6);
    assert!((DistanceMetric::Manhattan.distance(&a, &b) - 7.0).abs() < 1e-6);
    assert!((DistanceMetric::Minkowski(2.0).distance(&a, &b) - 5.0).abs() < 1e-4);
}

#[test]
fn test_uniform_tie_goes_to_smallest_label() {
    // Two neighbours, one per class, equidistant from the query.
    let x = Matrix::from_vec(2, 1, vec![-1.0, 1.0]).expect("2x1 matrix");
    let mut knn = KNearestNeighbors::new(2);
    knn.fit(&x, &[1, 0]).expect("valid training data");
    let query = Matrix::from_vec(1, 1, vec![0.0]).expect("1x1 matrix");
    for _ in 0..20 {
        assert_eq!(knn.predict(&query).expect("fitted"), vec![0]);
    }
}

#[test]
fn test_distance_weighting_prefers_closer_neighbour() {
    // Class 1 has two far neighbours, class 0 one very close neighbour.
    let x = Matrix::from_vec(3, 1, vec![0.1, 3.0, 3.1]).expect("3x1 matrix");
    let y = [0, 1, 1];
    let query = Matrix::from_vec(1, 1, vec![0.0]).expect("1x1 matrix");

    let mut uniform = KNearestNeighbors::new(3);
    uniform.fit(&x, &y).expect("valid training data");
    assert_eq!(uniform.predict(&query).expect("fitted"), vec![1]);

    let mut weighted = KNearestNeighbors::new(3).with_weighting(Weighting::Distance);
    weighted.fit(&x, &y).expect("valid training data");
    assert_eq!(weighted.predict(&query).expect("fitted"), vec![0]);
}

#[test]
fn test_distance_weighting_exact_match_dominates() {
    let x = Matrix::from_vec(3, 1, vec![0.0, 0.001, 0.002]).expect("3x1 matrix");
    let mut knn = KNearestNeighbors::new(3).with_weighting(Weighting::Distance);
    knn.fit(&x, &[2, 1, 1]).expect("valid training data");
    let query = Matrix::from_vec(1, 1, vec![0.0]).expect("1x1 matrix");
    assert_eq!(knn.predict(&query).expect("fitted"), vec![2]);
}

#[test]
fn test_fit_rejects_k_larger_than_training_set() {
    let (x, y) = two_clusters();
    let mut knn = KNearestNeighbors::new(7);
    let err = knn.fit(&x, &y).expect_err("k > n");
    assert!(matches!(err, AfinarError::InvalidHyperparameter { .. }));
    assert!(!knn.is_fitted());
}

#[test]
fn test_fit_rejects_zero_k_and_bad_p() {
    let (x, y) = two_clusters();
    assert!(KNearestNeighbors::new(0).fit(&x, &y).is_err());
    assert!(KNearestNeighbors::new(1)
        .with_metric(DistanceMetric::Minkowski(0.5))
        .fit(&x, &y)
        .is_err());
}

#[test]
fn test_fit_rejects_label_mismatch() {
    let (x, _) = two_clusters();
    let err = KNearestNeighbors::new(1).fit(&x, &[0, 1]).expect_err("mismatch");
    assert!(matches!(err, AfinarError::DimensionMismatch { .. }));
}

#[test]
fn test_predict_requires_fit() {
    let (x, _) = two_clusters();
    assert!(KNearestNeighbors::new(1).predict(&x).is_err());
}

#[test]
fn test_predict_rejects_feature_mismatch() {
    let (x, y) = two_clusters();
    let mut knn = KNearestNeighbors::new(1);
    knn.fit(&x, &y).expect("valid training data");
    let wide = Matrix::from_vec(1, 3, vec![0.0, 0.0, 0.0]).expect("1x3 matrix");
    assert!(matches!(
        knn.predict(&wide),
        Err(AfinarError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_factory_reads_genes() {
    let genes = Genes::new()
        .with("n_neighbors", 7)
        .with("weights", "distance")
        .with("metric", "manhattan");
    let model = KnnFactory::new().build_model(&genes).expect("valid genes");
    assert_eq!(model.k(), 7);
    assert_eq!(model.weighting(), Weighting::Distance);
    assert_eq!(model.metric(), DistanceMetric::Manhattan);
    assert!(!model.is_fitted());
}

#[test]
fn test_factory_defaults_optional_genes() {
    let model = KnnFactory::new()
        .build_model(&Genes::new().with("n_neighbors", 3))
        .expect("valid genes");
    assert_eq!(model.weighting(), Weighting::Uniform);
    assert_eq!(model.metric(), DistanceMetric::Euclidean);
}

#[test]
fn test_factory_builds_minkowski_models() {
    let factory = KnnFactory::new();
    let genes = Genes::new()
        .with("n_neighbors", 3)
        .with("metric", "minkowski")
        .with("p", 3.0);
    let model = factory.build_model(&genes).expect("valid genes");
    assert_eq!(model.metric(), DistanceMetric::Minkowski(3.0));

    let genes = Genes::new().with("n_neighbors", 3).with("metric", "minkowski").with("p", 1);
    let model = factory.build_model(&genes).expect("integer p");
    assert_eq!(model.metric(), DistanceMetric::Minkowski(1.0));

    let genes = Genes::new().with("n_neighbors", 3).with("metric", "minkowski");
    let mut model = factory.build_model(&genes).expect("default p");
    assert_eq!(model.metric(), DistanceMetric::Minkowski(2.0));

    let (x, y) = two_clusters();
    model.fit(&x, &y).expect("p = 2 is valid");
    assert_eq!(model.predict(&x).expect("fitted"), y);
}

#[test]
fn test_factory_rejects_bad_genes() {
    let bad = [
        Genes::new(),
        Genes::new().with("n_neighbors", "five"),
        Genes::new().with("n_neighbors", 0),
        Genes::new().with("n_neighbors", -3),
        Genes::new().with("n_neighbors", 3).with("weights", "cubic"),
        Genes::new().with("n_neighbors", 3).with("weights", 1),
        Genes::new().with("n_neighbors", 3).with("metric", "cosine"),
        Genes::new().with("n_neighbors", 3).with("metric", "minkowski").with("p", 0.5),
        Genes::new().with("n_neighbors", 3).with("metric", "minkowski").with("p", "three"),
    ];
    for genes in bad {
        let err = KnnFactory::new().build_model(&genes).expect_err("invalid genes");
        assert!(
            matches!(err, AfinarError::Configuration { .. }),
            "{genes} gave {err}"
        );
    }
}
