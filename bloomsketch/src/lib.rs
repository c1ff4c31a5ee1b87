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

//! # Bloomsketch
//!
//! A Bloom filter library for probabilistic set membership testing.
//!
//! Given an expected number of distinct items and a target false positive
//! probability, [`bloom::BloomFilter`] sizes a fixed bit array and a number of
//! hash rounds so that membership queries answer either "definitely not
//! present" or "possibly present", with no false negatives and a bounded
//! false positive rate.
//!
//! ```rust
//! use bloomsketch::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1000, 0.01)?;
//! filter.insert("apple");
//!
//! assert!(filter.contains(&"apple"));
//! assert!(!filter.contains(&"grape"));
//! # Ok::<(), bloomsketch::error::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bloom;
pub mod error;

pub(crate) mod hash;
