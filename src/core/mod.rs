//! Building blocks shared by the filter and its wrappers.
//!
//! ```text
//! core/
//! ├── bitvec.rs    - Lock-free, set-only bit vector
//! ├── params.rs    - Optimal m/k calculation and input validation
//! └── mod.rs       - This file
//! ```
//!
//! # Examples
//!
//! ## Parameter Calculation
//!
//! ```
//! use seedbloom::core::params::{optimal_bit_count, optimal_hash_count};
//!
//! let m = optimal_bit_count(10_000, 0.01).unwrap();
//! let k = optimal_hash_count(m, 10_000).unwrap();
//! assert_eq!((m, k), (95_851, 7));
//! ```
//!
//! ## Using BitVec Directly
//!
//! ```
//! use seedbloom::core::BitVec;
//!
//! let bv = BitVec::new(1000).expect("BitVec creation should succeed");
//! bv.set(42);
//! bv.set(999);
//!
//! assert!(bv.get(42));
//! assert!(!bv.get(43));
//! assert_eq!(bv.count_ones(), 2);
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod bitvec;
pub mod params;

pub use bitvec::BitVec;

pub use params::{
    calculate_filter_params, expected_fp_rate, optimal_bit_count, optimal_hash_count,
    validate_inputs, MAX_FILTER_BITS,
};
