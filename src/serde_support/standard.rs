//! serde support for [`BloomFilter`].
//!
//! Works with any serde format (JSON, bincode, CBOR, ...).
//!
//! # Format
//!
//! The filter is written through a versioned intermediate record:
//!
//! | Field            | Meaning                                          |
//! |------------------|--------------------------------------------------|
//! | `version`        | format version, currently 1                      |
//! | `size_bits`      | m                                                |
//! | `num_hashes`     | k                                                |
//! | `seeds`          | hasher seeds, always `0..k`                      |
//! | `expected_items` | n the filter was sized for (0 if unknown)        |
//! | `target_fpr`     | p the filter was sized for (0.0 if unknown)      |
//! | `bits`           | bit array bytes, least significant bit first     |
//!
//! Deserialization runs the same validation as [`BloomFilter::from_parts`], so a
//! deserialized filter is always well formed.
//!
//! # Examples
//!
//! ```
//! use seedbloom::BloomFilter;
//!
//! let filter = BloomFilter::new(1000, 0.01).unwrap();
//! filter.add("hello").unwrap();
//!
//! let json = serde_json::to_string(&filter).unwrap();
//! let restored: BloomFilter = serde_json::from_str(&json).unwrap();
//! assert!(restored.contains("hello").unwrap());
//! assert_eq!(restored.expected_items(), 1000);
//! ```

use crate::filter::BloomFilter;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialization format version.
const FORMAT_VERSION: u16 = 1;

#[derive(Serialize, Deserialize)]
struct BloomFilterSerde {
    version: u16,
    size_bits: usize,
    num_hashes: usize,
    seeds: Vec<u32>,
    expected_items: usize,
    target_fpr: f64,
    bits: Vec<u8>,
}

impl BloomFilterSerde {
    fn from_filter(filter: &BloomFilter) -> Self {
        Self {
            version: FORMAT_VERSION,
            size_bits: filter.size_bits(),
            num_hashes: filter.hash_count(),
            seeds: filter.seeds(),
            expected_items: filter.expected_items(),
            target_fpr: filter.target_fpr(),
            bits: filter.to_bit_bytes(),
        }
    }
}

impl Serialize for BloomFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        BloomFilterSerde::from_filter(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BloomFilter {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = BloomFilterSerde::deserialize(deserializer)?;

        if repr.version != FORMAT_VERSION {
            #[cfg(feature = "trace")]
            tracing::warn!(version = repr.version, "unsupported filter format version");

            return Err(de::Error::custom(format!(
                "Incompatible serialization version: expected {}, got {}",
                FORMAT_VERSION, repr.version
            )));
        }

        let filter = BloomFilter::from_parts(repr.size_bits, repr.num_hashes, &repr.seeds, &repr.bits)
            .map_err(de::Error::custom)?;

        Ok(filter.with_construction_inputs(repr.expected_items, repr.target_fpr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> BloomFilter {
        let filter = BloomFilter::new(500, 0.01).unwrap();
        for i in 0..250u32 {
            filter.add(&i).unwrap();
        }
        filter
    }

    #[test]
    fn test_json_roundtrip() {
        let filter = populated();
        let json = serde_json::to_string(&filter).unwrap();
        let restored: BloomFilter = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, filter);
        for i in 0..250u32 {
            assert!(restored.contains(&i).unwrap());
        }
    }

    #[test]
    fn test_bincode_roundtrip() {
        let filter = populated();
        let bytes = bincode::serialize(&filter).unwrap();
        let restored: BloomFilter = bincode::deserialize(&bytes).unwrap();

        assert_eq!(restored, filter);
        assert_eq!(restored.target_fpr(), 0.01);
    }

    #[test]
    fn test_json_fields() {
        let filter = BloomFilter::new(100, 0.8).unwrap();
        let value: serde_json::Value = serde_json::to_value(&filter).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["size_bits"], 47);
        assert_eq!(value["num_hashes"], 1);
        assert_eq!(value["seeds"], serde_json::json!([0]));
        assert_eq!(value["bits"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let filter = populated();
        let mut value = serde_json::to_value(&filter).unwrap();
        value["version"] = serde_json::json!(99);

        let err = serde_json::from_value::<BloomFilter>(value).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_rejects_inconsistent_parts() {
        let filter = populated();

        let mut wrong_seeds = serde_json::to_value(&filter).unwrap();
        wrong_seeds["seeds"][0] = serde_json::json!(5);
        assert!(serde_json::from_value::<BloomFilter>(wrong_seeds).is_err());

        let mut short_bits = serde_json::to_value(&filter).unwrap();
        short_bits["bits"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<BloomFilter>(short_bits).is_err());

        let mut zero_size = serde_json::to_value(&filter).unwrap();
        zero_size["size_bits"] = serde_json::json!(0);
        assert!(serde_json::from_value::<BloomFilter>(zero_size).is_err());
    }

    #[test]
    fn test_rejects_huge_size_with_empty_bits() {
        let json = format!(
            r#"{{"version":1,"size_bits":{},"num_hashes":1,"seeds":[0],"expected_items":1,"target_fpr":0.5,"bits":[]}}"#,
            crate::core::params::MAX_FILTER_BITS
        );
        let err = serde_json::from_str::<BloomFilter>(&json).unwrap_err();
        assert!(err.to_string().contains("needs 268435456 bytes, got 0"));
    }
}
