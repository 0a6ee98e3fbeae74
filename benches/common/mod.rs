//! Shared data generators and constants for the benchmarks.
#![allow(dead_code)]

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use seedbloom::BloomFilter;

// DATA GENERATORS

/// Random alphanumeric string of `len` characters.
#[inline]
pub fn random_string(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// `count` independent random strings of length `len`.
pub fn generate_strings(count: usize, len: usize) -> Vec<String> {
    (0..count).map(|_| random_string(len)).collect()
}

/// URL-like strings, a typical crawler dedup workload.
pub fn generate_urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|_| format!("https://example.com/path/{}", random_string(16)))
        .collect()
}

/// Random u64 values.
pub fn generate_u64s(count: usize) -> Vec<u64> {
    let mut rng = thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}

/// Random 128-bit identifiers.
pub fn generate_uuids(count: usize) -> Vec<[u8; 16]> {
    let mut rng = thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}

// FILTER SETUP

/// Filter sized for `capacity` with the first `load` fraction of `items` added.
pub fn filled_filter(capacity: usize, fpr: f64, items: &[String], load: f64) -> BloomFilter {
    let filter = BloomFilter::new(capacity as i64, fpr).expect("valid benchmark parameters");
    let count = ((items.len() as f64) * load) as usize;
    filter
        .add_all(&items[..count])
        .expect("strings always encode");
    filter
}

// BENCHMARK CONSTANTS

/// Filter capacities, from L1-resident to RAM-resident bit arrays.
pub const SIZES: &[usize] = &[1_000, 10_000, 100_000, 1_000_000];

/// False positive rates; lower rates mean more hash functions per operation.
pub const FP_RATES: &[f64] = &[0.1, 0.01, 0.001, 0.0001];

/// Fractions of capacity inserted before measuring.
pub const LOAD_FACTORS: &[f64] = &[0.1, 0.5, 0.9];
