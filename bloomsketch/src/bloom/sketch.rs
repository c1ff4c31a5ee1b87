// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::hash::Hash;
use std::hash::Hasher;

use crate::error::Error;
use crate::hash::DEFAULT_UPDATE_SEED;
use crate::hash::XxHash64;

/// Smallest permitted bit count; the derivation clamps up to this.
pub const MIN_NUM_BITS: u64 = 1;
/// Largest permitted bit count; keeps the word count within `i32` range.
pub const MAX_NUM_BITS: u64 = i32::MAX as u64 * 64;
/// Smallest permitted number of hash rounds; the derivation clamps up to this.
pub const MIN_NUM_HASHES: u16 = 1;
/// Largest permitted number of hash rounds.
pub const MAX_NUM_HASHES: u16 = i16::MAX as u16;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (inserted items always return `true`)
/// - Tunable false positive rate
/// - Constant space usage
///
/// Construct with [`new()`](Self::new), which derives the optimal bit count
/// and number of hash rounds from the expected item count and target false
/// positive probability.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter {
    /// Hash seed for all hash rounds
    seed: u64,
    /// Number of hash rounds per operation (k)
    num_hashes: u16,
    /// Total number of bits in the filter (m)
    num_bits: u64,
    /// Count of bits set to 1 (for statistics)
    num_bits_set: u64,
    /// Bit array packed into u64 words
    /// Length = ceil(num_bits / 64)
    bit_array: Box<[u64]>,
}

impl BloomFilter {
    /// Creates a filter with optimal parameters for a target accuracy.
    ///
    /// Automatically calculates the optimal number of bits and hash rounds to
    /// achieve the desired false positive probability for a given number of
    /// items:
    ///
    /// ```text
    /// m = ceil(-n * ln(p) / ln(2)^2)
    /// k = ceil(m / n * ln(2))
    /// ```
    ///
    /// Both results are clamped to at least 1, so the boundary targets
    /// `fpp = 0.0` and `fpp = 1.0` still produce a usable filter.
    ///
    /// # Arguments
    ///
    /// - `expected_items`: Expected number of distinct items to be inserted
    /// - `fpp`: Target false positive probability (e.g., 0.01 for 1%)
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ErrorKind::InvalidParameter`] if
    /// `expected_items` is 0 or `fpp` is not in `[0.0, 1.0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// // Optimal for 10,000 items with 1% FPP
    /// let filter = BloomFilter::new(10_000, 0.01)?;
    /// assert!(BloomFilter::new(10_000, 1.01).is_err());
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn new(expected_items: u64, fpp: f64) -> Result<Self, Error> {
        Self::with_seed(expected_items, fpp, DEFAULT_UPDATE_SEED)
    }

    /// Creates a filter with a caller-chosen hash seed (default: 9001).
    ///
    /// Two filters derive the same bit positions for the same key only when
    /// their seeds match.
    ///
    /// # Errors
    ///
    /// Same conditions as [`new()`](Self::new).
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let filter = BloomFilter::with_seed(100, 0.01, 12345)?;
    /// assert_eq!(filter.seed(), 12345);
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn with_seed(expected_items: u64, fpp: f64, seed: u64) -> Result<Self, Error> {
        if expected_items == 0 {
            return Err(
                Error::invalid_parameter("expected_items must be greater than zero")
                    .with_context("expected_items", expected_items),
            );
        }
        // NaN fails the range check as well.
        if !(0.0..=1.0).contains(&fpp) {
            return Err(
                Error::invalid_parameter("fpp must be between zero and one")
                    .with_context("fpp", fpp),
            );
        }

        let num_bits = Self::suggest_num_bits(expected_items, fpp);
        let num_hashes = Self::suggest_num_hashes(expected_items, num_bits);
        let num_words = num_bits.div_ceil(64) as usize;

        Ok(BloomFilter {
            seed,
            num_hashes,
            num_bits,
            num_bits_set: 0,
            bit_array: vec![0u64; num_words].into_boxed_slice(),
        })
    }

    /// Suggests optimal number of bits given expected items and target FPP.
    ///
    /// Formula: `m = -n * ln(p) / (ln(2)^2)`
    /// where n = expected_items, p = fpp
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let bits = BloomFilter::suggest_num_bits(1000, 0.01);
    /// assert_eq!(bits, 9586);
    /// ```
    pub fn suggest_num_bits(expected_items: u64, fpp: f64) -> u64 {
        let n = expected_items as f64;
        // ln(0) diverges; the smallest positive double gives the largest
        // finite sizing, which the upper clamp then bounds.
        let p = fpp.max(f64::MIN_POSITIVE);
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;

        let bits = (-n * p.ln() / ln2_squared).ceil() as u64;

        bits.clamp(MIN_NUM_BITS, MAX_NUM_BITS)
    }

    /// Suggests optimal number of hash rounds given expected items and bit count.
    ///
    /// Formula: `k = (m/n) * ln(2)`
    /// where m = num_bits, n = expected_items
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let hashes = BloomFilter::suggest_num_hashes(1000, 9586);
    /// assert_eq!(hashes, 7); // Optimal k ≈ 6.64
    /// ```
    pub fn suggest_num_hashes(expected_items: u64, num_bits: u64) -> u16 {
        let m = num_bits as f64;
        let n = expected_items as f64;

        // Ceil to avoid selecting too few hash rounds.
        let k = (m / n * std::f64::consts::LN_2).ceil();
        k.clamp(f64::from(MIN_NUM_HASHES), f64::from(MAX_NUM_HASHES)) as u16
    }

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** inserted (or false positive)
    /// - `false`: Item was **definitely not** inserted
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01)?;
    /// filter.insert("apple");
    ///
    /// assert!(filter.contains(&"apple")); // true - was inserted (probably)
    /// assert!(!filter.contains(&"grape")); // false - never inserted
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn contains<T: Hash>(&self, item: &T) -> bool {
        if self.is_empty() {
            return false;
        }

        let (h0, h1) = self.compute_hash(item);
        self.check_bits(h0, h1)
    }

    /// Tests and inserts an item in a single operation.
    ///
    /// Returns whether the item was possibly already in the set before
    /// insertion. This is more efficient than calling `contains()` then
    /// `insert()` separately.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01)?;
    ///
    /// let was_present = filter.contains_and_insert(&"apple");
    /// assert!(!was_present); // First insertion
    ///
    /// let was_present = filter.contains_and_insert(&"apple");
    /// assert!(was_present); // Now it's in the set
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn contains_and_insert<T: Hash>(&mut self, item: &T) -> bool {
        let (h0, h1) = self.compute_hash(item);
        let was_present = self.check_bits(h0, h1);
        self.set_bits(h0, h1);
        was_present
    }

    /// Inserts an item into the filter.
    ///
    /// After insertion, `contains(item)` will always return `true` until the
    /// filter is reset. Insertion never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01)?;
    ///
    /// filter.insert("apple");
    /// filter.insert(42_u64);
    /// filter.insert([1, 2, 3]);
    ///
    /// assert!(filter.contains(&"apple"));
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn insert<T: Hash>(&mut self, item: T) {
        let (h0, h1) = self.compute_hash(&item);
        self.set_bits(h0, h1);
    }

    /// Inserts every item of an iterable into the filter.
    ///
    /// Items are inserted in iteration order; the final state is identical to
    /// calling [`insert()`](Self::insert) once per item.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01)?;
    /// filter.insert_many(["apple", "banana", "cherry"]);
    ///
    /// assert!(filter.contains(&"banana"));
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn insert_many<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Hash,
    {
        for item in items {
            self.insert(item);
        }
    }

    /// Tests every item of an iterable for membership.
    ///
    /// Returns one boolean per item, in iteration order;
    /// `result[i] == contains(&items[i])`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01)?;
    /// filter.insert("apple");
    ///
    /// let found = filter.contains_many(["apple", "grape"]);
    /// assert_eq!(found, vec![true, false]);
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn contains_many<I>(&self, items: I) -> Vec<bool>
    where
        I: IntoIterator,
        I::Item: Hash,
    {
        items
            .into_iter()
            .map(|item| self.contains(&item))
            .collect()
    }

    /// Resets the filter to its initial empty state.
    ///
    /// Clears all bits while preserving capacity, hash rounds, and seed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01)?;
    /// filter.insert("apple");
    /// assert!(!filter.is_empty());
    ///
    /// filter.reset();
    /// assert!(filter.is_empty());
    /// assert!(!filter.contains(&"apple"));
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn reset(&mut self) {
        self.bit_array.fill(0);
        self.num_bits_set = 0
    }

    /// Returns whether the filter is empty (no bits set).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    ///
    /// Useful for monitoring filter saturation.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the total number of bits in the filter (capacity).
    pub fn capacity(&self) -> u64 {
        self.num_bits
    }

    /// Returns the number of hash rounds used.
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Returns the hash seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// Values near 0.5 indicate the filter is approaching saturation.
    /// Values above 0.5 indicate degraded false positive rates.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.num_bits as f64
    }

    /// Estimates the current false positive probability.
    ///
    /// Uses the approximation: `load_factor^k`
    /// where:
    /// - load_factor = fraction of bits set (bits_used / capacity)
    /// - k = num_hashes
    ///
    /// This assumes uniform bit distribution.
    pub fn estimated_fpp(&self) -> f64 {
        let k = f64::from(self.num_hashes);
        let load = self.load_factor();

        // FPP ≈ load^k
        load.powf(k)
    }

    /// Computes the two base hash values using XXHash64.
    ///
    /// Uses a two-hash approach:
    /// - h0 = XXHash64(item, seed)
    /// - h1 = XXHash64(item, h0)
    fn compute_hash<T: Hash>(&self, item: &T) -> (u64, u64) {
        // First hash with the configured seed
        let mut hasher = XxHash64::with_seed(self.seed);
        item.hash(&mut hasher);
        let h0 = hasher.finish();

        // Second hash using h0 as the seed
        let mut hasher = XxHash64::with_seed(h0);
        item.hash(&mut hasher);
        let h1 = hasher.finish();

        (h0, h1)
    }

    /// Checks whether all k bits are set for the given hash values,
    /// short-circuiting on the first clear bit.
    fn check_bits(&self, h0: u64, h1: u64) -> bool {
        for i in 1..=self.num_hashes {
            let bit_index = self.compute_bit_index(h0, h1, i);
            if !self.get_bit(bit_index) {
                return false;
            }
        }
        true
    }

    /// Sets all k bits for the given hash values.
    fn set_bits(&mut self, h0: u64, h1: u64) {
        for i in 1..=self.num_hashes {
            let bit_index = self.compute_bit_index(h0, h1, i);
            self.set_bit(bit_index);
        }
    }

    /// Computes a bit index using double hashing (Kirsch-Mitzenmacher).
    ///
    /// Formula:
    /// ```text
    /// bit_index = ((h0 + i * h1) >> 1) % num_bits
    /// ```
    ///
    /// The round offset `i * h1` is combined with the hash before the modulus
    /// is applied, which keeps distinct rounds from collapsing onto the same
    /// position. The right shift by 1 improves bit distribution. The round
    /// index `i` is 1-based.
    fn compute_bit_index(&self, h0: u64, h1: u64, i: u16) -> u64 {
        let hash = h0.wrapping_add(u64::from(i).wrapping_mul(h1));
        (hash >> 1) % self.num_bits
    }

    /// Gets the value of a single bit.
    fn get_bit(&self, bit_index: u64) -> bool {
        let word_index = (bit_index >> 6) as usize; // Equivalent to bit_index / 64
        let bit_offset = bit_index & 63; // Equivalent to bit_index % 64
        let mask = 1u64 << bit_offset;
        (self.bit_array[word_index] & mask) != 0
    }

    /// Sets a single bit and updates the count if it wasn't already set.
    fn set_bit(&mut self, bit_index: u64) {
        let word_index = (bit_index >> 6) as usize; // Equivalent to bit_index / 64
        let bit_offset = bit_index & 63; // Equivalent to bit_index % 64
        let mask = 1u64 << bit_offset;

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BloomFilter;
    use crate::error::ErrorKind;

    #[test]
    fn test_parameter_derivation() {
        let filter = BloomFilter::new(1000, 0.01).unwrap();
        assert_eq!(filter.capacity(), 9586);
        assert_eq!(filter.num_hashes(), 7);
        assert_eq!(filter.seed(), 9001);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_parameter_suggestions() {
        assert_eq!(BloomFilter::suggest_num_bits(6, 0.01), 58);
        assert_eq!(BloomFilter::suggest_num_bits(12, 0.0001), 231);
        assert_eq!(BloomFilter::suggest_num_bits(1000, 0.01), 9586);

        assert_eq!(BloomFilter::suggest_num_hashes(6, 58), 7);
        assert_eq!(BloomFilter::suggest_num_hashes(12, 231), 14);
        assert_eq!(BloomFilter::suggest_num_hashes(1000, 9586), 7);
    }

    #[test]
    fn test_insert_and_contains() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();

        assert!(!filter.contains(&"apple"));
        filter.insert("apple");
        assert!(filter.contains(&"apple"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_contains_and_insert() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();

        let was_present = filter.contains_and_insert(&42_u64);
        assert!(!was_present);

        let was_present = filter.contains_and_insert(&42_u64);
        assert!(was_present);
    }

    #[test]
    fn test_contains_before_any_insert() {
        let filter = BloomFilter::new(100, 0.01).unwrap();
        assert!(!filter.contains(&"anything"));
        assert!(!filter.contains(&0_u64));
    }

    #[test]
    fn test_reset() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();
        filter.insert("test");
        assert!(!filter.is_empty());

        let capacity = filter.capacity();
        let num_hashes = filter.num_hashes();

        filter.reset();
        assert!(filter.is_empty());
        assert!(!filter.contains(&"test"));
        assert_eq!(filter.capacity(), capacity);
        assert_eq!(filter.num_hashes(), num_hashes);
    }

    #[test]
    fn test_statistics() {
        let mut filter = BloomFilter::new(1000, 0.01).unwrap();
        assert_eq!(filter.bits_used(), 0);
        assert_eq!(filter.load_factor(), 0.0);

        filter.insert("test");
        assert!(filter.bits_used() > 0);
        assert!(filter.bits_used() <= u64::from(filter.num_hashes()));
        assert!(filter.load_factor() > 0.0);
        assert!(filter.estimated_fpp() > 0.0);
    }

    #[test]
    fn test_invalid_expected_items() {
        let err = BloomFilter::new(0, 0.01).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(err.message(), "expected_items must be greater than zero");
    }

    #[test]
    fn test_invalid_fpp() {
        for fpp in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = BloomFilter::new(100, fpp).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
            assert_eq!(err.message(), "fpp must be between zero and one");
        }
    }

    #[test]
    fn test_boundary_fpp_zero() {
        // The most demanding valid target still sizes finitely.
        let filter = BloomFilter::new(1, 0.0).unwrap();
        assert!(filter.capacity() >= 1);
        assert!(filter.num_hashes() >= 1);
    }

    #[test]
    fn test_boundary_fpp_one() {
        // The least demanding valid target degenerates to a single bit.
        let filter = BloomFilter::new(6, 1.0).unwrap();
        assert_eq!(filter.capacity(), 1);
        assert_eq!(filter.num_hashes(), 1);
    }

    #[test]
    fn test_custom_seed_changes_positions() {
        let mut f1 = BloomFilter::with_seed(100, 0.01, 123).unwrap();
        let mut f2 = BloomFilter::with_seed(100, 0.01, 456).unwrap();

        f1.insert("a");
        f2.insert("a");

        // Same configuration, different seeds: the filters disagree on which
        // bits represent "a".
        assert_ne!(f1, f2);
    }
}
