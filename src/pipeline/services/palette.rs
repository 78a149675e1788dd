use indexmap::IndexSet;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::ClusteringError;
use crate::pipeline::types::Rgb;

/// Synthesize a representative palette by k-means clustering the distinct
/// colors in RGB space.
///
/// Cluster count is `min(config.palette_size, distinct colors)`. Seeded
/// initialization and tie-breaking by lowest index keep the output identical
/// across runs for identical input.
pub fn synthesize_palette(
    colors: &IndexSet<Rgb>,
    config: &AnalysisConfig,
) -> Result<Vec<String>, ClusteringError> {
    if colors.is_empty() {
        return Err(ClusteringError::EmptyColorSet);
    }

    let points: Vec<[f64; 3]> = colors
        .iter()
        .map(|c| [f64::from(c.r), f64::from(c.g), f64::from(c.b)])
        .collect();
    let k = config.palette_size.min(points.len());

    let mut rng = StdRng::seed_from_u64(config.cluster_seed);
    let mut centroids: Vec<[f64; 3]> = rand::seq::index::sample(&mut rng, points.len(), k)
        .into_iter()
        .map(|index| points[index])
        .collect();

    let mut assignments = vec![0usize; points.len()];
    for iteration in 0..config.max_cluster_iterations {
        for (slot, point) in assignments.iter_mut().zip(&points) {
            *slot = nearest_centroid(point, &centroids);
        }

        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (&cluster, point) in assignments.iter().zip(&points) {
            for axis in 0..3 {
                sums[cluster][axis] += point[axis];
            }
            counts[cluster] += 1;
        }

        let mut converged = true;
        for cluster in 0..k {
            if counts[cluster] == 0 {
                // An emptied cluster keeps its previous centroid.
                continue;
            }
            let count = counts[cluster] as f64;
            let mean = [
                sums[cluster][0] / count,
                sums[cluster][1] / count,
                sums[cluster][2] / count,
            ];
            if mean != centroids[cluster] {
                centroids[cluster] = mean;
                converged = false;
            }
        }
        if converged {
            debug!("palette clustering converged after {} iterations", iteration + 1);
            break;
        }
    }

    let mut palette = Vec::with_capacity(k);
    for centroid in &centroids {
        let mut channels = [0u8; 3];
        for (slot, &value) in channels.iter_mut().zip(centroid) {
            if !value.is_finite() {
                return Err(ClusteringError::NonFiniteCentroid);
            }
            *slot = value.round().clamp(0.0, 255.0) as u8;
        }
        palette.push(Rgb::new(channels[0], channels[1], channels[2]).to_hex());
    }
    Ok(palette)
}

fn nearest_centroid(point: &[f64; 3], centroids: &[[f64; 3]]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    (0..3).map(|axis| (a[axis] - b[axis]).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(colors: &[Rgb]) -> IndexSet<Rgb> {
        colors.iter().copied().collect()
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn empty_set_cannot_be_clustered() {
        assert!(matches!(
            synthesize_palette(&set(&[]), &config()),
            Err(ClusteringError::EmptyColorSet)
        ));
    }

    #[test]
    fn palette_size_is_capped_by_distinct_colors() {
        let two = set(&[Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)]);
        assert_eq!(synthesize_palette(&two, &config()).unwrap().len(), 2);

        let many: IndexSet<Rgb> = (0u8..8).map(|i| Rgb::new(i * 30, i, 255 - i)).collect();
        assert_eq!(synthesize_palette(&many, &config()).unwrap().len(), 5);
    }

    #[test]
    fn single_color_palette_is_that_color() {
        let single = set(&[Rgb::new(170, 187, 204)]);
        assert_eq!(
            synthesize_palette(&single, &config()).unwrap(),
            vec!["#aabbcc"]
        );
    }

    #[test]
    fn well_separated_colors_survive_clustering_untouched() {
        let colors = set(&[Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)]);
        let mut palette = synthesize_palette(&colors, &config()).unwrap();
        palette.sort();
        assert_eq!(palette, vec!["#000000", "#ffffff"]);
    }

    #[test]
    fn identical_input_yields_identical_palette() {
        let colors: IndexSet<Rgb> = (0u8..20)
            .map(|i| Rgb::new(i.wrapping_mul(13), i.wrapping_mul(29), i.wrapping_mul(53)))
            .collect();
        let first = synthesize_palette(&colors, &config()).unwrap();
        let second = synthesize_palette(&colors, &config()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn palette_entries_are_lowercase_hex() {
        let colors = set(&[Rgb::new(171, 205, 239), Rgb::new(18, 52, 86)]);
        for entry in synthesize_palette(&colors, &config()).unwrap() {
            assert!(entry.starts_with('#'));
            assert_eq!(entry.len(), 7);
            assert!(entry[1..].bytes().all(|b| b.is_ascii_hexdigit()));
            assert_eq!(entry, entry.to_ascii_lowercase());
        }
    }
}
