//! K-means clustering in RGB space
//!
//! Lloyd's algorithm with three fixed policies:
//! - seeding picks `k` distinct sample positions uniformly at random (not k-means++)
//! - a cluster that receives no samples keeps its centroid for that round
//! - the loop always runs the configured number of rounds; there is no convergence test
//!
//! The random source is injected through [`cluster_with_rng`] so callers can seed it.

use log::debug;
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::conversion::Pixel;
use crate::error::{PaletteError, Result};
use crate::sampler::SampleSet;

pub use crate::config::DEFAULT_ITERATIONS;

/// A cluster center and the share of samples nearest to it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// Percentage (0..=100) of samples assigned in the final pass
    pub frequency: f64,
}

impl Centroid {
    fn seeded(pixel: Pixel) -> Self {
        Self {
            red: pixel.red,
            green: pixel.green,
            blue: pixel.blue,
            frequency: 0.0,
        }
    }

    pub fn color(&self) -> Pixel {
        Pixel::new(self.red, self.green, self.blue)
    }

    /// Euclidean distance to `pixel` in RGB space
    pub fn distance(&self, pixel: Pixel) -> f64 {
        (self.distance_squared(pixel) as f64).sqrt()
    }

    // Same ordering as `distance`, without the sqrt
    #[inline(always)]
    fn distance_squared(&self, pixel: Pixel) -> u32 {
        let dr = self.red as i32 - pixel.red as i32;
        let dg = self.green as i32 - pixel.green as i32;
        let db = self.blue as i32 - pixel.blue as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// Cluster `samples` into `k` colors using the thread RNG for seeding
pub fn cluster(samples: &SampleSet, k: usize, iterations: usize) -> Result<Vec<Centroid>> {
    cluster_with_rng(samples, k, iterations, &mut rand::rng())
}

/// Cluster `samples` into `k` colors, seeding centroids from `rng`.
///
/// Returns exactly `k` centroids sorted by descending frequency. Equal
/// frequencies keep their centroid index order.
pub fn cluster_with_rng<R: Rng + ?Sized>(
    samples: &SampleSet,
    k: usize,
    iterations: usize,
    rng: &mut R,
) -> Result<Vec<Centroid>> {
    let pixels = samples.pixels();
    if k < 1 || k > pixels.len() {
        return Err(PaletteError::InvalidK { k, samples: pixels.len() });
    }

    let mut centroids: Vec<Centroid> = index::sample(rng, pixels.len(), k)
        .into_iter()
        .map(|i| Centroid::seeded(pixels[i]))
        .collect();

    let mut assignments = vec![0usize; pixels.len()];

    for round in 0..iterations {
        assign(pixels, &centroids, &mut assignments);
        let empty = update(pixels, &mut centroids, &assignments);
        if empty > 0 {
            debug!("k-means round {round}: {empty} of {k} clusters received no samples");
        }
    }

    // Final pass against the frozen centroids
    assign(pixels, &centroids, &mut assignments);

    let mut counts = vec![0usize; k];
    for &cluster in &assignments {
        counts[cluster] += 1;
    }
    let total = pixels.len() as f64;
    for (centroid, &count) in centroids.iter_mut().zip(&counts) {
        centroid.frequency = count as f64 / total * 100.0;
    }

    debug!("k-means finished: {} samples, cluster sizes {:?}", pixels.len(), counts);

    // Stable sort: equal frequencies stay in index order
    centroids.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
    Ok(centroids)
}

/// Assignment step: nearest centroid per sample, ties go to the lowest index
fn assign(pixels: &[Pixel], centroids: &[Centroid], assignments: &mut [usize]) {
    for (pixel, slot) in pixels.iter().zip(assignments.iter_mut()) {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;
        for (idx, centroid) in centroids.iter().enumerate() {
            let dist = centroid.distance_squared(*pixel);
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }
        *slot = best_idx;
    }
}

/// Update step: move each centroid to the rounded channel mean of its members.
///
/// Empty clusters are left where they are. Returns how many were empty.
fn update(pixels: &[Pixel], centroids: &mut [Centroid], assignments: &[usize]) -> usize {
    let mut sums = vec![[0u64; 3]; centroids.len()];
    let mut counts = vec![0u64; centroids.len()];

    for (pixel, &cluster) in pixels.iter().zip(assignments) {
        sums[cluster][0] += pixel.red as u64;
        sums[cluster][1] += pixel.green as u64;
        sums[cluster][2] += pixel.blue as u64;
        counts[cluster] += 1;
    }

    let mut empty = 0;
    for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
        if count == 0 {
            empty += 1;
            continue;
        }
        let mean = |channel: u64| (channel as f64 / count as f64).round() as u8;
        centroid.red = mean(sum[0]);
        centroid.green = mean(sum[1]);
        centroid.blue = mean(sum[2]);
    }
    empty
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn samples(pixels: &[(u8, u8, u8)]) -> SampleSet {
        SampleSet::from_pixels(pixels.iter().map(|&(r, g, b)| Pixel::new(r, g, b)).collect())
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_two_color_split() {
        let set = samples(&[(255, 0, 0), (255, 0, 0), (0, 0, 255), (0, 0, 255)]);
        let centroids = cluster_with_rng(&set, 2, DEFAULT_ITERATIONS, &mut rng()).unwrap();

        assert_eq!(centroids.len(), 2);
        let mut colors: Vec<_> = centroids.iter().map(|c| (c.red, c.green, c.blue)).collect();
        colors.sort();
        assert_eq!(colors, vec![(0, 0, 255), (255, 0, 0)]);
        for c in &centroids {
            assert!((c.frequency - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_returns_exactly_k() {
        let pixels: Vec<(u8, u8, u8)> = (0..60u8).map(|i| (i * 4, 255 - i * 4, i)).collect();
        let set = samples(&pixels);
        for k in 1..=pixels.len() {
            let centroids = cluster_with_rng(&set, k, 5, &mut rng()).unwrap();
            assert_eq!(centroids.len(), k);
            let total: f64 = centroids.iter().map(|c| c.frequency).sum();
            assert!((total - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_sorted_by_frequency() {
        let mut pixels = vec![(10, 10, 10); 7];
        pixels.extend(vec![(240, 240, 240); 3]);
        let centroids = cluster_with_rng(&samples(&pixels), 2, DEFAULT_ITERATIONS, &mut rng()).unwrap();

        assert_eq!((centroids[0].red, centroids[0].frequency.round()), (10, 70.0));
        assert_eq!((centroids[1].red, centroids[1].frequency.round()), (240, 30.0));
    }

    #[test]
    fn test_k_equal_to_sample_count() {
        let set = samples(&[(0, 0, 0), (80, 0, 0), (0, 160, 0), (0, 0, 240), (255, 255, 255)]);
        let centroids = cluster_with_rng(&set, 5, DEFAULT_ITERATIONS, &mut rng()).unwrap();

        for c in &centroids {
            assert!((c.frequency - 20.0).abs() < 1e-9);
        }
        let mut colors: Vec<_> = centroids.iter().map(|c| (c.red, c.green, c.blue)).collect();
        colors.sort();
        assert_eq!(colors, vec![(0, 0, 0), (0, 0, 240), (0, 160, 0), (80, 0, 0), (255, 255, 255)]);
    }

    #[test]
    fn test_identical_samples_collapse_into_first_cluster() {
        let set = samples(&[(128, 128, 128); 9]);
        let centroids = cluster_with_rng(&set, 3, DEFAULT_ITERATIONS, &mut rng()).unwrap();

        assert!(centroids.iter().all(|c| c.color() == Pixel::new(128, 128, 128)));
        assert!((centroids[0].frequency - 100.0).abs() < 1e-9);
        assert_eq!(centroids[1].frequency, 0.0);
        assert_eq!(centroids[2].frequency, 0.0);
    }

    #[test]
    fn test_empty_cluster_keeps_position() {
        let pixels = [Pixel::new(0, 0, 0), Pixel::new(10, 0, 0), Pixel::new(250, 250, 250)];
        let mut centroids = vec![
            Centroid::seeded(Pixel::new(0, 0, 0)),
            Centroid::seeded(Pixel::new(100, 100, 100)),
            Centroid::seeded(Pixel::new(0, 0, 1)),
        ];
        let mut assignments = vec![0; pixels.len()];

        assign(&pixels, &centroids, &mut assignments);
        assert_eq!(assignments, vec![0, 0, 1]);

        let empty = update(&pixels, &mut centroids, &assignments);
        assert_eq!(empty, 1);
        assert_eq!(centroids[0].color(), Pixel::new(5, 0, 0));
        assert_eq!(centroids[1].color(), Pixel::new(250, 250, 250));
        assert_eq!(centroids[2].color(), Pixel::new(0, 0, 1));
    }

    #[test]
    fn test_ties_go_to_first_centroid() {
        let pixels = [Pixel::new(50, 50, 50)];
        let centroids = vec![
            Centroid::seeded(Pixel::new(40, 50, 50)),
            Centroid::seeded(Pixel::new(60, 50, 50)),
        ];
        let mut assignments = vec![9];
        assign(&pixels, &centroids, &mut assignments);
        assert_eq!(assignments, vec![0]);
    }

    #[test]
    fn test_same_seed_same_result() {
        let pixels: Vec<(u8, u8, u8)> = (0..200u32)
            .map(|i| ((i * 37 % 256) as u8, (i * 11 % 256) as u8, (i * 71 % 256) as u8))
            .collect();
        let set = samples(&pixels);
        let a = cluster_with_rng(&set, 6, DEFAULT_ITERATIONS, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = cluster_with_rng(&set, 6, DEFAULT_ITERATIONS, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_k() {
        let set = samples(&[(1, 2, 3), (4, 5, 6)]);
        assert!(matches!(
            cluster_with_rng(&set, 0, 10, &mut rng()),
            Err(PaletteError::InvalidK { k: 0, samples: 2 })
        ));
        assert!(matches!(
            cluster_with_rng(&set, 3, 10, &mut rng()),
            Err(PaletteError::InvalidK { k: 3, samples: 2 })
        ));
    }

    #[test]
    fn test_thread_rng_entry_point() {
        let set = samples(&[(30, 60, 90); 5]);
        let centroids = cluster(&set, 2, DEFAULT_ITERATIONS).unwrap();
        assert_eq!(centroids.len(), 2);
        assert!(centroids.iter().all(|c| c.color() == Pixel::new(30, 60, 90)));
    }

    #[test]
    fn test_distance() {
        let c = Centroid::seeded(Pixel::new(0, 0, 0));
        assert!((c.distance(Pixel::new(3, 4, 0)) - 5.0).abs() < 1e-12);
    }
}
