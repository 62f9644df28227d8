//! Random card ordering.
//!
//! Every round, and every team change, plays the cards in a fresh uniformly
//! random order. The order is a permutation of card indices produced by a
//! Fisher–Yates shuffle over a ChaCha8 stream.
//!
//! ```
//! use fishbowl::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut order = rng.shuffled_order(5);
//! order.sort_unstable();
//! assert_eq!(order, vec![0, 1, 2, 3, 4]);
//!
//! // Same seed, same order.
//! assert_eq!(GameRng::new(7).shuffled_order(10), GameRng::new(7).shuffled_order(10));
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seedable RNG used for card ordering.
///
/// Seeded engines are reproducible; unseeded ones draw a seed from the OS.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS randomness.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// A uniformly random permutation of `0..n`.
    #[must_use]
    pub fn shuffled_order(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        self.shuffle(&mut order);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..20 {
            assert_eq!(rng1.shuffled_order(12), rng2.shuffled_order(12));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..5).map(|_| rng1.shuffled_order(20)).collect();
        let seq2: Vec<_> = (0..5).map(|_| rng2.shuffled_order(20)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shuffled_order_is_permutation() {
        let mut rng = GameRng::new(42);
        for n in 0..30 {
            let mut order = rng.shuffled_order(n);
            assert_eq!(order.len(), n);
            order.sort_unstable();
            assert_eq!(order, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_shuffled_order_empty() {
        let mut rng = GameRng::new(42);
        assert!(rng.shuffled_order(0).is_empty());
    }

    #[test]
    fn test_every_permutation_reachable() {
        // 3! = 6 orders; 600 draws should hit each of them.
        let mut rng = GameRng::new(9);
        let mut seen = std::collections::HashMap::new();
        for _ in 0..600 {
            *seen.entry(rng.shuffled_order(3)).or_insert(0u32) += 1;
        }
        assert_eq!(seen.len(), 6);
        // Loose uniformity check: each order lands near 100.
        assert!(seen.values().all(|&count| (50..150).contains(&count)));
    }

    #[test]
    fn test_from_entropy_records_seed() {
        let rng = GameRng::from_entropy();
        let mut replay = GameRng::new(rng.seed());
        let mut original = rng.clone();
        assert_eq!(original.shuffled_order(8), replay.shuffled_order(8));
    }
}
