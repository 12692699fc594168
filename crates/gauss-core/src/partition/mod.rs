// crates/gauss-core/src/partition/mod.rs
//
// Entropy-gap recursive partitioner.
//
// Working set -> self-entropy score per point -> stable ascending sort ->
// best contiguous split by information gap -> peel the leading block off as
// one group -> repeat on the remainder.
//
// Peeling policy: only the leading block is emitted, and it is never split
// again. The result is an ordered list of groups, not a tree.
//
// Labels ride along for reporting and never influence scores or splits.

use nalgebra::DMatrix;
use tracing::debug;

use crate::entropy::{self_entropy_of, stack_rows};
use crate::error::{GaussError, Result};
use crate::spectral::dispersion;

/// Smallest working set `best_split` accepts.
pub const MIN_SPLITTABLE: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    features: Vec<f64>,
}

impl Point {
    pub fn new(features: Vec<f64>) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn dim(&self) -> usize {
        self.features.len()
    }
}

impl AsRef<[f64]> for Point {
    fn as_ref(&self) -> &[f64] {
        &self.features
    }
}

impl From<Vec<f64>> for Point {
    fn from(features: Vec<f64>) -> Self {
        Self::new(features)
    }
}

#[derive(Clone, Debug)]
pub struct ScoredPoint {
    pub point: Point,
    /// Self-entropy against the working set it was last scored in.
    pub score: f64,
    pub label: Option<String>,
}

impl AsRef<[f64]> for ScoredPoint {
    fn as_ref(&self) -> &[f64] {
        self.point.features()
    }
}

/// Points sharing one dimension. After `rescore` the order is ascending by
/// score, ties in prior order.
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    rows: Vec<ScoredPoint>,
}

impl PointSet {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        Self::labeled(points.into_iter().map(|p| (p, None)).collect())
    }

    pub fn labeled(points: Vec<(Point, Option<String>)>) -> Result<Self> {
        if let Some((first, _)) = points.first() {
            let dim = first.dim();
            if let Some(i) = points.iter().position(|(p, _)| p.dim() != dim) {
                return Err(GaussError::Validation(format!(
                    "point {} has {} features, expected {}",
                    i,
                    points[i].0.dim(),
                    dim
                )));
            }
        }
        if let Some(i) = points.iter().position(|(p, _)| p.features().iter().any(|x| !x.is_finite())) {
            return Err(GaussError::Validation(format!("point {} has a non-finite feature", i)));
        }
        Ok(Self {
            rows: points
                .into_iter()
                .map(|(point, label)| ScoredPoint {
                    point,
                    score: 0.0,
                    label,
                })
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ScoredPoint] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ScoredPoint> {
        self.rows
    }

    pub fn features(&self) -> Result<DMatrix<f64>> {
        stack_rows(&self.rows)
    }

    /// Score every point against the current set and sort ascending.
    pub fn rescore(&mut self) -> Result<()> {
        score_rows(self)
    }

    fn split_off(&mut self, at: usize) -> PointSet {
        PointSet {
            rows: self.rows.split_off(at),
        }
    }
}

/// Each point is query, key and value in one self-entropy computation over
/// the whole current set. `sort_by` is stable, so equal scores keep order.
pub fn score_rows(set: &mut PointSet) -> Result<()> {
    if set.is_empty() {
        return Ok(());
    }
    let m = set.features()?;
    let scores = self_entropy_of(&m)?;
    for (row, score) in set.rows.iter_mut().zip(scores) {
        row.score = score;
    }
    set.rows.sort_by(|a, b| a.score.total_cmp(&b.score));
    Ok(())
}

/// Left block is `[0..=index]`, right block `[index+1..]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split {
    pub index: usize,
    pub gap: f64,
}

impl Split {
    pub fn left_len(&self) -> usize {
        self.index + 1
    }
}

/// Scan every contiguous split of the set in its current order and return
/// the one with the largest information gap
/// `dispersion(all) - (dispersion(left) + dispersion(right))`.
/// Ties keep the lowest index.
pub fn best_split(set: &PointSet) -> Result<Split> {
    let n = set.len();
    if n < MIN_SPLITTABLE {
        return Err(GaussError::InsufficientData { len: n });
    }

    let m = set.features()?;
    let whole = dispersion(&m);

    let mut best = Split {
        index: 0,
        gap: f64::NEG_INFINITY,
    };
    for i in 0..n - 1 {
        let left = dispersion(&m.rows(0, i + 1));
        let right = dispersion(&m.rows(i + 1, n - (i + 1)));
        let gap = whole - (left + right);
        if gap > best.gap {
            best = Split { index: i, gap };
        }
    }
    Ok(best)
}

/// One discovered group. `gap` is the information gap of the split that
/// peeled it; `None` marks the terminal remainder.
#[derive(Clone, Debug)]
pub struct Group {
    pub points: Vec<ScoredPoint>,
    pub gap: Option<f64>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.gap.is_none()
    }
}

/// Peel groups off the leading end until the remainder is empty or a single
/// point. With `max_groups = Some(m)`, the remainder is emitted whole as the
/// m-th group.
pub fn recursive_partition(mut working: PointSet, max_groups: Option<usize>) -> Result<Vec<Group>> {
    if working.is_empty() {
        return Err(GaussError::InsufficientData { len: 0 });
    }
    if max_groups == Some(0) {
        return Err(GaussError::Validation("max_groups must be >= 1".into()));
    }

    let mut groups: Vec<Group> = Vec::new();
    loop {
        working.rescore()?;

        if max_groups.is_some_and(|m| groups.len() + 1 >= m) {
            groups.push(terminal(working));
            break;
        }

        let split = match best_split(&working) {
            Ok(split) => split,
            Err(GaussError::InsufficientData { .. }) => {
                groups.push(terminal(working));
                break;
            }
            Err(e) => return Err(e),
        };

        let rest = working.split_off(split.left_len());
        debug!(
            group = groups.len(),
            index = split.index,
            gap = split.gap,
            peeled = working.len(),
            remaining = rest.len(),
            "peeled group"
        );
        groups.push(Group {
            points: working.into_rows(),
            gap: Some(split.gap),
        });

        if rest.is_empty() {
            break;
        }
        working = rest;
    }
    Ok(groups)
}

fn terminal(set: PointSet) -> Group {
    Group {
        points: set.into_rows(),
        gap: None,
    }
}
