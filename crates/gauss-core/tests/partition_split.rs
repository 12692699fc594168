use gauss_core::partition::{score_rows, ScoredPoint, MIN_SPLITTABLE};
use gauss_core::{best_split, recursive_partition, GaussError, Point, PointSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn points(rows: &[[f64; 2]]) -> PointSet {
    PointSet::new(rows.iter().map(|r| Point::new(r.to_vec())).collect()).unwrap()
}

fn features(rows: &[ScoredPoint]) -> Vec<Vec<f64>> {
    rows.iter().map(|r| r.point.features().to_vec()).collect()
}

const CLUSTER_A: [[f64; 2]; 5] = [[0.0, 0.0], [0.5, 0.2], [0.2, 0.6], [0.7, 0.5], [0.4, 0.1]];

fn cluster_b() -> Vec<[f64; 2]> {
    CLUSTER_A.iter().map(|[x, y]| [x + 10.0, y + 10.0]).collect()
}

#[test]
fn split_index_is_always_in_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for n in MIN_SPLITTABLE..=12 {
        let rows: Vec<Point> = (0..n)
            .map(|_| Point::new(vec![rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)]))
            .collect();
        let mut set = PointSet::new(rows).unwrap();
        score_rows(&mut set).unwrap();
        let split = best_split(&set).unwrap();
        assert!(split.index <= n - 2, "n={} index={}", n, split.index);
        assert!(split.gap.is_finite());
    }
}

#[test]
fn fewer_than_two_points_is_insufficient_data() {
    let one = points(&[[1.0, 2.0]]);
    assert!(matches!(best_split(&one), Err(GaussError::InsufficientData { len: 1 })));

    let none = PointSet::default();
    assert!(matches!(best_split(&none), Err(GaussError::InsufficientData { len: 0 })));
    assert!(matches!(
        recursive_partition(none, None),
        Err(GaussError::InsufficientData { len: 0 })
    ));
}

#[test]
fn ordered_tight_clusters_split_at_their_boundary() {
    let mut rows = CLUSTER_A.to_vec();
    rows.extend(cluster_b());
    let split = best_split(&points(&rows)).unwrap();
    assert_eq!(split.index, CLUSTER_A.len() - 1);
    assert!(split.gap > 40.0);
}

#[test]
fn mirrored_splits_tie_and_the_lower_index_wins() {
    // Both splits leave one singleton and one pair with the same covariance,
    // so the two gaps are bitwise equal.
    let set = points(&[[0.0, 0.0], [5.0, 5.0], [10.0, 10.0]]);
    let split = best_split(&set).unwrap();
    assert_eq!(split.index, 0);

    let line = PointSet::new(vec![Point::new(vec![-4.0]), Point::new(vec![0.0]), Point::new(vec![4.0])]).unwrap();
    let split = best_split(&line).unwrap();
    assert_eq!(split.index, 0);
    // whole = 32/3, each side leaves a pair with variance 4.
    assert!((split.gap - (32.0 / 3.0 - 4.0)).abs() < 1e-9, "{}", split.gap);
}

#[test]
fn far_point_is_separated_from_the_close_pair() {
    let groups = recursive_partition(points(&[[0.0, 0.0], [0.0, 1.0], [10.0, 10.0]]), None).unwrap();
    assert_eq!(groups.len(), 2);

    assert_eq!(features(&groups[0].points), vec![vec![0.0, 0.0], vec![0.0, 1.0]]);
    let gap = groups[0].gap.unwrap();
    assert!((gap - 42.194_444_444).abs() < 1e-6, "gap {}", gap);

    assert!(groups[1].is_terminal());
    assert_eq!(features(&groups[1].points), vec![vec![10.0, 10.0]]);
}

#[test]
fn entropy_ranking_peels_one_whole_cluster_first() {
    let b = cluster_b();
    let mut labeled: Vec<(Point, Option<String>)> = CLUSTER_A
        .iter()
        .map(|r| (Point::new(r.to_vec()), Some("a".to_string())))
        .collect();
    labeled.extend(b.iter().map(|r| (Point::new(r.to_vec()), Some("b".to_string()))));
    let set = PointSet::labeled(labeled).unwrap();

    let groups = recursive_partition(set, Some(2)).unwrap();
    assert_eq!(groups.len(), 2);

    let first: Vec<_> = groups[0].points.iter().map(|p| p.label.as_deref()).collect();
    assert_eq!(first, vec![Some("b"); 5]);
    let second: Vec<_> = groups[1].points.iter().map(|p| p.label.as_deref()).collect();
    assert_eq!(second, vec![Some("a"); 5]);
    assert!(groups[1].is_terminal());

    for g in &groups {
        assert!(g.points.windows(2).all(|w| w[0].score <= w[1].score));
    }
}

#[test]
fn unbounded_peeling_consumes_every_point() {
    let mut rows = CLUSTER_A.to_vec();
    rows.extend(cluster_b());
    let groups = recursive_partition(points(&rows), None).unwrap();

    let total: usize = groups.iter().map(|g| g.len()).sum();
    assert_eq!(total, rows.len());
    assert!(groups.iter().all(|g| !g.is_empty()));
    assert!(groups[..groups.len() - 1].iter().all(|g| g.gap.is_some()));
}

#[test]
fn singleton_is_one_terminal_group() {
    let groups = recursive_partition(points(&[[4.0, 2.0]]), None).unwrap();
    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_terminal());
    assert_eq!(groups[0].len(), 1);
}

#[test]
fn equal_scores_keep_input_order() {
    let labeled = ["x", "y", "z"]
        .iter()
        .map(|l| (Point::new(vec![1.0, 1.0]), Some(l.to_string())))
        .collect();
    let mut set = PointSet::labeled(labeled).unwrap();
    set.rescore().unwrap();
    let order: Vec<_> = set.rows().iter().map(|r| r.label.clone().unwrap()).collect();
    assert_eq!(order, vec!["x", "y", "z"]);
}
