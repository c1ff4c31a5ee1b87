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

use bloomsketch::bloom::BloomFilter;
use googletest::assert_that;
use googletest::prelude::le;
use googletest::prelude::near;

#[test]
fn test_small_filter_lifecycle() {
    let mut filter = BloomFilter::new(6, 0.01).unwrap();

    filter.insert("hello");
    filter.insert("world");

    assert!(filter.contains(&"hello"));
    assert!(filter.contains(&"world"));
    assert!(!filter.contains(&"nonexistent"));

    filter.reset();
    assert!(!filter.contains(&"hello"));
    assert!(!filter.contains(&"world"));
}

#[test]
fn test_batch_insert_and_query() {
    let mut filter = BloomFilter::new(12, 0.0001).unwrap();

    filter.insert_many(1_u64..=12);

    let found = filter.contains_many(1_u64..=12);
    assert_eq!(found.len(), 12);
    assert!(found.iter().all(|&b| b));

    assert!(!filter.contains(&13_u64));
}

#[test]
fn test_no_false_negatives() {
    let mut filter = BloomFilter::new(1000, 0.01).unwrap();

    for i in 0..1000_u64 {
        filter.insert(i);
    }

    for i in 0..1000_u64 {
        assert!(filter.contains(&i), "inserted value {i} reported absent");
    }
}

#[test]
fn test_repeated_queries_are_deterministic() {
    let mut filter = BloomFilter::new(100, 0.01).unwrap();
    filter.insert_many(["a", "b", "c"]);

    let first = filter.contains_many(["a", "b", "c", "d", "e"]);
    for _ in 0..10 {
        assert_eq!(filter.contains_many(["a", "b", "c", "d", "e"]), first);
    }
}

#[test]
fn test_batch_equivalence() {
    let mut batched = BloomFilter::new(100, 0.01).unwrap();
    let mut sequential = BloomFilter::new(100, 0.01).unwrap();

    let items: Vec<u64> = (0..50).collect();
    batched.insert_many(items.iter());
    for item in &items {
        sequential.insert(item);
    }

    assert_eq!(batched, sequential);

    let batch_results = batched.contains_many(0_u64..100);
    let single_results: Vec<bool> = (0_u64..100).map(|i| sequential.contains(&i)).collect();
    assert_eq!(batch_results, single_results);
}

#[test]
fn test_reset_clears_completely() {
    let mut filter = BloomFilter::new(1000, 0.01).unwrap();
    filter.insert_many(0_u64..1000);
    assert!(filter.bits_used() > 0);

    filter.reset();

    assert_eq!(filter.bits_used(), 0);
    let found = filter.contains_many(0_u64..1000);
    assert!(found.iter().all(|&b| !b));
}

#[test]
fn test_false_positive_rate_near_target() {
    let mut filter = BloomFilter::new(1000, 0.01).unwrap();
    filter.insert_many(0_u64..1000);

    // Probe 10,000 values that were never inserted.
    let false_positives = filter
        .contains_many(10_000_u64..20_000)
        .into_iter()
        .filter(|&b| b)
        .count();
    let observed_rate = false_positives as f64 / 10_000.0;

    assert_that!(observed_rate, le(0.03));
    assert_that!(filter.estimated_fpp(), near(0.01, 0.005));
}

#[test]
fn test_mixed_hashable_types() {
    let mut filter = BloomFilter::new(100, 0.01).unwrap();

    filter.insert("text");
    filter.insert(42_u64);
    filter.insert(vec![1, 2, 3]);
    filter.insert(('a', 7_i32));

    assert!(filter.contains(&"text"));
    assert!(filter.contains(&42_u64));
    assert!(filter.contains(&vec![1, 2, 3]));
    assert!(filter.contains(&('a', 7_i32)));
}

#[test]
fn test_saturated_filter_still_has_no_false_negatives() {
    // Overload a small filter well past its design point.
    let mut filter = BloomFilter::new(10, 0.1).unwrap();
    filter.insert_many(0_u64..1000);

    for i in 0..1000_u64 {
        assert!(filter.contains(&i));
    }
}
