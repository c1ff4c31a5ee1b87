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
use bloomsketch::error::Error;

fn main() -> Result<(), Error> {
    // Create a filter sized for 10,000 items at a 1% false positive rate
    let mut filter = BloomFilter::new(10_000, 0.01)?;

    println!("Created Bloom filter for 10,000 items at 1% FPP");
    println!("Capacity: {} bits", filter.capacity());
    println!("Hash rounds: {}", filter.num_hashes());

    // Add some values
    println!("\nInserting 10,000 unique integers...");
    filter.insert_many(0..10_000_u64);

    println!("Bits used: {}", filter.bits_used());
    println!("Load factor: {:.4}", filter.load_factor());
    println!("Estimated FPP: {:.4}%", filter.estimated_fpp() * 100.0);

    // Every inserted value is still reported present
    let found = filter.contains_many(0..10_000_u64);
    println!(
        "\nInserted values reported present: {}/10000",
        found.iter().filter(|&&b| b).count()
    );

    // Probe values that were never inserted
    let false_positives = filter
        .contains_many(100_000..110_000_u64)
        .into_iter()
        .filter(|&b| b)
        .count();
    println!(
        "False positives among 10,000 never-inserted values: {} ({:.2}%)",
        false_positives,
        false_positives as f64 / 100.0
    );

    // Different types
    println!("\nThe filter works with any hashable type:");
    filter.insert("hello");
    filter.insert(vec![1, 2, 3]);
    println!("contains(\"hello\"): {}", filter.contains(&"hello"));
    println!("contains([1, 2, 3]): {}", filter.contains(&vec![1, 2, 3]));

    // Reset and reuse
    filter.reset();
    println!("\nAfter reset, bits used: {}", filter.bits_used());
    println!("contains(\"hello\"): {}", filter.contains(&"hello"));

    Ok(())
}
