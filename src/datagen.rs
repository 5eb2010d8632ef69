//! Synthetic datasets for exercising the sorter.
//!
//! All generators draw from one seeded RNG so a whole catalog is reproducible
//! from a single `u64`. Values are `u32`: sizes and cluster offsets beyond
//! `u32::MAX` saturate there.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Sizes used for the small / medium / large families in [`DatasetGenerator::catalog`].
pub const CATALOG_SIZES: [usize; 3] = [10, 100, 1000];

/// Size of the distribution-shaped datasets in the catalog.
pub const CATALOG_SHAPED_SIZE: usize = 1000;

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Lower edge of the range cluster `i` draws its centre from.
fn cluster_base(i: usize) -> u32 {
    saturating_u32(i).saturating_mul(100)
}

pub struct DatasetGenerator<R = SmallRng> {
    rng: R,
}

impl DatasetGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DatasetGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// `size` values drawn uniformly from `start..=end`.
    pub fn random_range(&mut self, size: usize, start: u32, end: u32) -> Vec<u32> {
        let (low, high) = if start <= end { (start, end) } else { (end, start) };
        (0..size)
            .map(|_| self.rng.random_range(low..=high))
            .collect()
    }

    pub fn small(&mut self, size: usize) -> Vec<u32> {
        self.random_range(size, 0, 100)
    }

    pub fn medium(&mut self, size: usize) -> Vec<u32> {
        self.random_range(size, 0, 100)
    }

    pub fn large(&mut self, size: usize) -> Vec<u32> {
        self.random_range(size, 0, 1000)
    }

    /// `0, 1, .., size - 1`.
    pub fn uniform(&mut self, size: usize) -> Vec<u32> {
        (0..size).map(saturating_u32).collect()
    }

    pub fn random(&mut self, size: usize) -> Vec<u32> {
        self.random_range(size, 0, saturating_u32(size))
    }

    /// Shuffled repetitions of `1..=5`, with a random tail in the same range.
    pub fn specific_pattern(&mut self, size: usize) -> Vec<u32> {
        let mut data: Vec<u32> = (1..=5).cycle().take(size - size % 5).collect();
        let tail = self.random_range(size % 5, 1, 5);
        data.extend(tail);
        data.shuffle(&mut self.rng);
        data
    }

    /// Ascending half followed by a descending half, values in `0..=500`.
    pub fn gradual_change(&mut self, size: usize) -> Vec<u32> {
        let mut increase = self.random_range(size / 2, 0, 500);
        increase.sort_unstable();
        let mut decrease = self.random_range(size / 2, 0, 500);
        decrease.sort_unstable_by(|a, b| b.cmp(a));
        increase.extend(decrease);
        increase
    }

    /// Values packed around `clusters` random centres, shuffled. The
    /// remainder of `size / clusters` is filled uniformly. Zero clusters is
    /// treated as one.
    pub fn clustered(&mut self, size: usize, clusters: usize) -> Vec<u32> {
        let clusters = clusters.max(1);
        let cluster_size = size / clusters;
        let remainder = size % clusters;
        let mut data = Vec::with_capacity(size);
        for i in 0..clusters {
            let base = cluster_base(i);
            let centre = self.rng.random_range(base..=base.saturating_add(99));
            data.extend(self.random_range(cluster_size, centre, centre.saturating_add(10)));
        }
        data.extend(self.random_range(remainder, 0, cluster_base(clusters)));
        data.shuffle(&mut self.rng);
        data
    }

    /// A random pattern of `period` values in `0..=10`, tiled to `size` and
    /// shuffled.
    pub fn periodic(&mut self, size: usize, period: usize) -> Vec<u32> {
        let period = period.max(1);
        let pattern = self.random_range(period, 0, 10);
        let mut data: Vec<u32> = pattern.iter().copied().cycle().take(size).collect();
        data.shuffle(&mut self.rng);
        data
    }

    /// The named dataset collection, in a fixed order.
    pub fn catalog(&mut self) -> Vec<(String, Vec<u32>)> {
        let mut datasets = Vec::new();
        for size in CATALOG_SIZES {
            datasets.push((format!("Small_{size}"), self.small(size)));
            datasets.push((format!("Medium_{size}"), self.medium(size)));
            datasets.push((format!("Large_{size}"), self.large(size)));
        }
        let n = CATALOG_SHAPED_SIZE;
        datasets.push(("Uniform_Distribution".to_string(), self.uniform(n)));
        datasets.push(("Random_Distribution".to_string(), self.random(n)));
        datasets.push(("Specific_Pattern".to_string(), self.specific_pattern(n)));
        datasets.push(("Gradual_Change".to_string(), self.gradual_change(n)));
        datasets.push(("Clustered_Data".to_string(), self.clustered(n, 3)));
        datasets.push(("Periodic_Pattern".to_string(), self.periodic(n, 10)));
        datasets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_range_bounds() {
        let mut datasets = DatasetGenerator::from_seed(1);
        let data = datasets.random_range(500, 20, 30);
        assert_eq!(data.len(), 500);
        assert!(data.iter().all(|v| (20..=30).contains(v)));

        // Swapped bounds are accepted
        let data = datasets.random_range(50, 9, 3);
        assert!(data.iter().all(|v| (3..=9).contains(v)));
    }

    #[test]
    fn test_same_seed_same_data() {
        let a = DatasetGenerator::from_seed(42).catalog();
        let b = DatasetGenerator::from_seed(42).catalog();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform() {
        let mut datasets = DatasetGenerator::from_seed(0);
        assert_eq!(datasets.uniform(5), vec![0, 1, 2, 3, 4]);
        assert!(datasets.uniform(0).is_empty());
    }

    #[test]
    fn test_specific_pattern() {
        let mut datasets = DatasetGenerator::from_seed(3);
        let data = datasets.specific_pattern(1003);
        assert_eq!(data.len(), 1003);
        assert!(data.iter().all(|v| (1..=5).contains(v)));
        for value in 1..=5 {
            let count = data.iter().filter(|&&v| v == value).count();
            assert!(count >= 200, "value {} appears {} times", value, count);
        }
    }

    #[test]
    fn test_gradual_change_shape() {
        let mut datasets = DatasetGenerator::from_seed(5);
        let data = datasets.gradual_change(100);
        assert_eq!(data.len(), 100);
        let (up, down) = data.split_at(50);
        assert!(up.windows(2).all(|w| w[0] <= w[1]));
        assert!(down.windows(2).all(|w| w[0] >= w[1]));
        assert!(data.iter().all(|&v| v <= 500));

        // Odd sizes drop the last element, like the halves do
        assert_eq!(datasets.gradual_change(7).len(), 6);
    }

    #[test]
    fn test_clustered() {
        let mut datasets = DatasetGenerator::from_seed(11);
        let data = datasets.clustered(1000, 3);
        assert_eq!(data.len(), 1000);
        assert!(data.iter().all(|&v| v <= 309));
        assert_eq!(datasets.clustered(10, 0).len(), 10);
    }

    #[test]
    fn test_conversions_saturate() {
        assert_eq!(saturating_u32(7), 7);
        assert_eq!(cluster_base(3), 300);
        assert_eq!(cluster_base(50_000_000), u32::MAX);
        assert_eq!(saturating_u32(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_clustered_many_clusters() {
        let mut datasets = DatasetGenerator::from_seed(17);
        // More clusters than values: every value comes from the remainder
        let data = datasets.clustered(5, 8);
        assert_eq!(data.len(), 5);
        assert!(data.iter().all(|&v| v <= 800));
    }

    #[test]
    fn test_periodic() {
        let mut datasets = DatasetGenerator::from_seed(13);
        let data = datasets.periodic(1000, 10);
        assert_eq!(data.len(), 1000);
        assert!(data.iter().all(|&v| v <= 10));
        assert_eq!(datasets.periodic(3, 0).len(), 3);
    }

    #[test]
    fn test_catalog_names_and_sizes() {
        let catalog = DatasetGenerator::from_seed(0).catalog();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog[0].0, "Small_10");
        assert_eq!(catalog[0].1.len(), 10);
        assert_eq!(catalog[8].0, "Large_1000");
        assert_eq!(catalog[14].0, "Periodic_Pattern");
        assert!(catalog[9..].iter().all(|(_, data)| data.len() == 1000));
    }
}
