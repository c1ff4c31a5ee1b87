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

//! Bloom Filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! an element is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If an item was inserted, `contains()` will always return `true`
//! - **Possible false positives**: `contains()` may return `true` for items never inserted
//! - **Fixed size**: The bit array is sized once at construction and never resizes
//! - **Linear space**: Size is proportional to the expected number of distinct items
//!
//! # Usage
//!
//! ```rust
//! use bloomsketch::bloom::BloomFilter;
//!
//! // Create a filter optimized for 1000 items with 1% false positive rate
//! let mut filter = BloomFilter::new(1000, 0.01)?;
//!
//! // Insert items
//! filter.insert("apple");
//! filter.insert("banana");
//! filter.insert(42_u64);
//!
//! // Check membership
//! assert!(filter.contains(&"apple")); // true - definitely inserted
//! assert!(!filter.contains(&"grape")); // false - never inserted (probably)
//!
//! // Get statistics
//! println!("Capacity: {} bits", filter.capacity());
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//! # Ok::<(), bloomsketch::error::Error>(())
//! ```
//!
//! # Parameter Derivation
//!
//! Construction takes the expected number of distinct items `n` and a target
//! false positive probability `p`, and derives the optimal bit count and number
//! of hash rounds:
//!
//! ```text
//! m = ceil(-n * ln(p) / ln(2)^2)
//! k = ceil(m / n * ln(2))
//! ```
//!
//! Both are clamped to at least 1, so even degenerate targets such as `p = 1.0`
//! produce a usable filter. Out-of-range parameters (`n = 0`, `p` outside
//! `[0.0, 1.0]`) are rejected with [`crate::error::ErrorKind::InvalidParameter`]
//! rather than silently clamped: a silently degenerate size would break the
//! false-positive contract the caller asked for.
//!
//! # Batch Operations
//!
//! Any finite iterable of hashable values can be inserted or queried in one
//! call:
//!
//! ```rust
//! # use bloomsketch::bloom::BloomFilter;
//! let mut filter = BloomFilter::new(100, 0.01)?;
//!
//! filter.insert_many(["a", "b", "c"]);
//! assert_eq!(filter.contains_many(["a", "b", "z"]), vec![true, true, false]);
//! # Ok::<(), bloomsketch::error::Error>(())
//! ```
//!
//! Batch calls are plain sequential loops over the per-item operations and
//! produce the identical final state and results.
//!
//! # Implementation Details
//!
//! - Uses XXHash64 for hashing
//! - Implements double hashing (Kirsch-Mitzenmacher method) for k hash rounds
//! - Bits packed efficiently in `u64` words
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"
//! - Kirsch and Mitzenmacher (2008). "Less Hashing, Same Performance: Building a Better Bloom
//!   Filter"

mod sketch;

pub use self::sketch::BloomFilter;
