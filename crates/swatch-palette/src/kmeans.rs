use std::sync::atomic::{AtomicBool, Ordering};

use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::KMeansConfig;
use crate::error::PaletteError;

/// Result of a k-means clustering.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansResult {
    /// The cluster centers.
    pub centroids: Vec<[f64; 3]>,
    /// The cluster of each point.
    pub labels: Vec<usize>,
    /// The total weight of the points assigned to each cluster.
    pub cluster_weights: Vec<f64>,
    /// Weighted sum of squared distances of points to their centroid.
    pub inertia: f64,
    /// Number of Lloyd iterations of the kept run.
    pub iterations: usize,
}

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the closest centroid; the first one wins ties.
fn nearest_centroid(point: &[f64; 3], centroids: &[[f64; 3]]) -> (usize, f64) {
    let mut best_idx = 0;
    let mut min_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(point, centroid);
        if dist < min_dist {
            min_dist = dist;
            best_idx = i;
        }
    }
    (best_idx, min_dist)
}

struct Assignment {
    labels: Vec<usize>,
    dists: Vec<f64>,
}

fn assign(points: &[[f64; 3]], centroids: &[[f64; 3]]) -> Assignment {
    let (labels, dists): (Vec<usize>, Vec<f64>) = points
        .par_iter()
        .map(|p| nearest_centroid(p, centroids))
        .unzip();
    Assignment { labels, dists }
}

/// Draw an index with probability proportional to its term.
///
/// Indices with a zero term are never drawn. `total` must be the positive
/// sum of the terms.
fn sample_index(terms: impl Iterator<Item = f64>, total: f64, rng: &mut StdRng) -> Option<usize> {
    let target = rng.random_range(0.0..1.0) * total;
    let mut acc = 0.0;
    let mut chosen = None;
    for (i, term) in terms.enumerate() {
        if term <= 0.0 {
            continue;
        }
        acc += term;
        chosen = Some(i);
        if acc > target {
            break;
        }
    }
    chosen
}

/// Computes centroids using the KMeans++ algorithm over weighted points.
fn kmeans_plusplus(
    points: &[[f64; 3]],
    weights: &[f64],
    k: usize,
    rng: &mut StdRng,
) -> Result<Vec<[f64; 3]>, PaletteError> {
    let degenerate = || {
        PaletteError::DegenerateInput(format!(
            "cannot seed {k} clusters from {} distinct colors",
            points.len()
        ))
    };

    let mut centroids = Vec::with_capacity(k);

    let total_weight: f64 = weights.iter().sum();
    let first = sample_index(weights.iter().copied(), total_weight, rng).ok_or_else(degenerate)?;
    centroids.push(points[first]);

    let mut distances: Vec<f64> = points
        .par_iter()
        .map(|p| squared_distance(p, &points[first]))
        .collect();

    for _ in 1..k {
        let terms = || distances.iter().zip(weights).map(|(d, w)| d * w);
        let total: f64 = terms().sum();
        if total <= 0.0 {
            return Err(degenerate());
        }

        let chosen = sample_index(terms(), total, rng).ok_or_else(degenerate)?;
        let centroid = points[chosen];
        centroids.push(centroid);

        distances
            .par_iter_mut()
            .zip(points.par_iter())
            .for_each(|(min_dist, point)| {
                let dist = squared_distance(point, &centroid);
                if dist < *min_dist {
                    *min_dist = dist;
                }
            });
    }

    Ok(centroids)
}

/// Move every centroid to the weighted mean of its points.
///
/// A cluster left without points takes over the point farthest from its own
/// centroid. Returns the largest centroid shift.
fn update_centroids(
    points: &[[f64; 3]],
    weights: &[f64],
    assignment: &mut Assignment,
    centroids: &mut [[f64; 3]],
) -> f64 {
    let k = centroids.len();
    let mut sums = vec![[0.0f64; 3]; k];
    let mut mass = vec![0.0f64; k];

    for ((point, w), &label) in points.iter().zip(weights).zip(&assignment.labels) {
        for c in 0..3 {
            sums[label][c] += w * point[c];
        }
        mass[label] += w;
    }

    for empty in 0..k {
        if mass[empty] > 0.0 {
            continue;
        }

        let farthest = assignment
            .dists
            .iter()
            .enumerate()
            .filter(|(i, _)| mass[assignment.labels[*i]] > weights[*i])
            .fold(None, |best: Option<(usize, f64)>, (i, &d)| match best {
                Some((_, best_d)) if d <= best_d => best,
                _ => Some((i, d)),
            });

        let Some((i, _)) = farthest else {
            continue;
        };

        log::debug!("cluster {} is empty, reseeding it with point {}", empty, i);

        let old = assignment.labels[i];
        for c in 0..3 {
            sums[old][c] -= weights[i] * points[i][c];
            sums[empty][c] = weights[i] * points[i][c];
        }
        mass[old] -= weights[i];
        mass[empty] = weights[i];
        assignment.labels[i] = empty;
        assignment.dists[i] = 0.0;
    }

    let mut shift = 0.0f64;
    for ((centroid, sum), m) in centroids.iter_mut().zip(&sums).zip(&mass) {
        if *m <= 0.0 {
            continue;
        }
        let updated = [sum[0] / m, sum[1] / m, sum[2] / m];
        shift = shift.max(squared_distance(centroid, &updated).sqrt());
        *centroid = updated;
    }

    shift
}

fn run_once(
    points: &[[f64; 3]],
    weights: &[f64],
    k: usize,
    config: &KMeansConfig,
    rng: &mut StdRng,
) -> Result<KMeansResult, PaletteError> {
    let mut centroids = kmeans_plusplus(points, weights, k, rng)?;
    let mut assignment = assign(points, &centroids);

    let mut iterations = 0;
    while iterations < config.max_iterations {
        iterations += 1;

        let shift = update_centroids(points, weights, &mut assignment, &mut centroids);
        let next = assign(points, &centroids);
        let stable = next.labels == assignment.labels;
        assignment = next;

        if stable || shift <= config.tolerance {
            break;
        }
    }

    let inertia = assignment
        .dists
        .iter()
        .zip(weights)
        .map(|(d, w)| d * w)
        .sum();

    let mut cluster_weights = vec![0.0; k];
    for (&label, w) in assignment.labels.iter().zip(weights) {
        cluster_weights[label] += w;
    }

    Ok(KMeansResult {
        centroids,
        labels: assignment.labels,
        cluster_weights,
        inertia,
        iterations,
    })
}

/// Partition weighted points into `k` clusters with Lloyd's algorithm.
///
/// Each restart seeds its centroids with k-means++ from its own random
/// generator and the run with the lowest inertia is kept; equal inertia
/// keeps the earliest restart. Restarts run in parallel and the point
/// assignment of each iteration is parallelized as well.
///
/// # Arguments
///
/// * `points` - Distinct points.
/// * `weights` - Positive weight of each point, e.g. a pixel count.
/// * `k` - The number of clusters.
/// * `config` - The clustering parameters.
/// * `cancel` - Checked before each restart and once all restarts finished.
///
/// # Errors
///
/// Returns [`PaletteError::InvalidConfig`] for a zero `k`, mismatched
/// weights or invalid parameters, [`PaletteError::DegenerateInput`] if there
/// are fewer points than clusters, and [`PaletteError::Cancelled`] once
/// `cancel` is set.
pub fn kmeans(
    points: &[[f64; 3]],
    weights: &[f64],
    k: usize,
    config: &KMeansConfig,
    cancel: &AtomicBool,
) -> Result<KMeansResult, PaletteError> {
    config.validate()?;

    if k == 0 {
        return Err(PaletteError::InvalidConfig(
            "the number of clusters must be positive".to_string(),
        ));
    }

    if points.len() != weights.len() {
        return Err(PaletteError::InvalidConfig(format!(
            "got {} points but {} weights",
            points.len(),
            weights.len()
        )));
    }

    if points.len() < k {
        return Err(PaletteError::DegenerateInput(format!(
            "cannot find {k} clusters among {} distinct colors",
            points.len()
        )));
    }

    let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());

    let runs = (0..config.restarts)
        .into_par_iter()
        .map(|restart| {
            if cancel.load(Ordering::Relaxed) {
                return Err(PaletteError::Cancelled);
            }

            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(restart as u64));
            let run = run_once(points, weights, k, config, &mut rng)?;

            log::debug!(
                "restart {}: inertia {:.4} after {} iterations",
                restart,
                run.inertia,
                run.iterations
            );

            Ok(run)
        })
        .collect::<Result<Vec<_>, PaletteError>>()?;

    if cancel.load(Ordering::Relaxed) {
        return Err(PaletteError::Cancelled);
    }

    let mut best: Option<KMeansResult> = None;
    for run in runs {
        match &best {
            Some(kept) if run.inertia >= kept.inertia => {}
            _ => best = Some(run),
        }
    }

    best.ok_or_else(|| PaletteError::InvalidConfig("no restart was run".to_string()))
}
