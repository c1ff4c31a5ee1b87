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

use std::hash::Hasher;

use byteorder::ByteOrder;
use byteorder::LE;

const P1: u64 = 0x9e3779b185ebca87;
const P2: u64 = 0xc2b2ae3d27d4eb4f;
const P3: u64 = 0x165667b19e3779f9;
const P4: u64 = 0x85ebca77c2b2ae63;
const P5: u64 = 0x27d4eb2f165667c5;

/// XXH64 is a fast, non-cryptographic, 64-bit hash function with good
/// dispersion and avalanche properties.
///
/// The state consumes input in 32-byte stripes; the remainder is buffered so
/// that repeated [`Hasher::write`] calls produce the same value as hashing the
/// concatenated input in one call.
#[derive(Debug)]
pub struct XxHash64 {
    seed: u64,
    v1: u64,
    v2: u64,
    v3: u64,
    v4: u64,
    total: u64,
    buf: [u8; 32],
    buf_len: usize,
}

impl XxHash64 {
    pub fn with_seed(seed: u64) -> Self {
        XxHash64 {
            seed,
            v1: seed.wrapping_add(P1).wrapping_add(P2),
            v2: seed.wrapping_add(P2),
            v3: seed,
            v4: seed.wrapping_sub(P1),
            total: 0,
            buf: [0; 32],
            buf_len: 0,
        }
    }

    #[inline]
    fn consume_stripe(&mut self, stripe: &[u8]) {
        self.v1 = round(self.v1, LE::read_u64(&stripe[0..8]));
        self.v2 = round(self.v2, LE::read_u64(&stripe[8..16]));
        self.v3 = round(self.v3, LE::read_u64(&stripe[16..24]));
        self.v4 = round(self.v4, LE::read_u64(&stripe[24..32]));

        // accumulate total length
        self.total += 32;
    }
}

impl Hasher for XxHash64 {
    fn finish(&self) -> u64 {
        let total = self.total + self.buf_len as u64;

        // An input shorter than one stripe never touches the accumulators.
        let mut h = if self.total > 0 {
            let mut h = self
                .v1
                .rotate_left(1)
                .wrapping_add(self.v2.rotate_left(7))
                .wrapping_add(self.v3.rotate_left(12))
                .wrapping_add(self.v4.rotate_left(18));
            h = merge_round(h, self.v1);
            h = merge_round(h, self.v2);
            h = merge_round(h, self.v3);
            merge_round(h, self.v4)
        } else {
            self.seed.wrapping_add(P5)
        };

        h = h.wrapping_add(total);

        // tail
        let mut tail = &self.buf[..self.buf_len];
        while tail.len() >= 8 {
            h ^= round(0, LE::read_u64(&tail[..8]));
            h = h.rotate_left(27).wrapping_mul(P1).wrapping_add(P4);
            tail = &tail[8..];
        }
        if tail.len() >= 4 {
            h ^= u64::from(LE::read_u32(&tail[..4])).wrapping_mul(P1);
            h = h.rotate_left(23).wrapping_mul(P2).wrapping_add(P3);
            tail = &tail[4..];
        }
        for &byte in tail {
            h ^= u64::from(byte).wrapping_mul(P5);
            h = h.rotate_left(11).wrapping_mul(P1);
        }

        avalanche(h)
    }

    fn write(&mut self, mut bytes: &[u8]) {
        if self.buf_len + bytes.len() < 32 {
            self.buf[self.buf_len..self.buf_len + bytes.len()].copy_from_slice(bytes);
            self.buf_len += bytes.len();
            return;
        }

        if self.buf_len != 0 {
            let wanted = 32 - self.buf_len;
            self.buf[self.buf_len..].copy_from_slice(&bytes[..wanted]);

            let stripe = self.buf;
            self.consume_stripe(&stripe);

            bytes = &bytes[wanted..];
            self.buf_len = 0;
        }

        // Number of full 256-bit stripes of 32 bytes.
        // Possible exclusion of a remainder of up to 31 bytes.
        let stripes = bytes.len() >> 5; // bytes / 32

        // Process the 256-bit stripes (the body) into the accumulators
        for i in 0..stripes {
            let lo = i << 5;
            self.consume_stripe(&bytes[lo..lo + 32]);
        }

        // remain bytes
        let len = bytes.len() % 32;
        if len > 0 {
            self.buf[0..len].copy_from_slice(&bytes[stripes << 5..]);
            self.buf_len = len;
        }
    }
}

#[inline]
fn round(acc: u64, lane: u64) -> u64 {
    acc.wrapping_add(lane.wrapping_mul(P2))
        .rotate_left(31)
        .wrapping_mul(P1)
}

#[inline]
fn merge_round(acc: u64, v: u64) -> u64 {
    (acc ^ round(0, v)).wrapping_mul(P1).wrapping_add(P4)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn avalanche(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(P2);
    h ^= h >> 29;
    h = h.wrapping_mul(P3);
    h ^ (h >> 32)
}
