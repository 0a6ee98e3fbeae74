//! Persistence round trips and corruption handling.

use proptest::prelude::*;
use seedbloom::serde_support::binary;
use seedbloom::{BloomFilter, SeedBloomError};

fn populated(n: i64, p: f64, count: u32) -> BloomFilter {
    let filter = BloomFilter::new(n, p).unwrap();
    for i in 0..count {
        filter.add(&format!("key-{}", i)).unwrap();
    }
    filter
}

#[cfg(feature = "serde")]
#[test]
fn test_bincode_roundtrip_preserves_everything() {
    let filter = populated(1000, 0.01, 500);

    let bytes = bincode::serialize(&filter).unwrap();
    let restored: BloomFilter = bincode::deserialize(&bytes).unwrap();

    assert_eq!(restored, filter);
    assert_eq!(restored.expected_items(), 1000);
    assert_eq!(restored.target_fpr(), 0.01);
    for i in 0..500 {
        assert!(restored.contains(&format!("key-{}", i)).unwrap());
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_json_roundtrip_preserves_membership() {
    let filter = populated(200, 0.05, 100);

    let json = serde_json::to_string_pretty(&filter).unwrap();
    let restored: BloomFilter = serde_json::from_str(&json).unwrap();

    for i in 0..100 {
        assert!(restored.contains(&format!("key-{}", i)).unwrap());
    }
    assert_eq!(restored.count_set_bits(), filter.count_set_bits());
}

#[test]
fn test_binary_roundtrip_preserves_membership() {
    let filter = populated(1000, 0.01, 500);

    let bytes = binary::to_bytes(&filter);
    assert_eq!(bytes.len(), binary::encoded_len(9586, 7));

    let restored = binary::from_bytes(&bytes).unwrap();
    assert_eq!(restored.to_bit_bytes(), filter.to_bit_bytes());
    assert_eq!(restored.expected_items(), 0);
    for i in 0..500 {
        assert!(restored.contains(&format!("key-{}", i)).unwrap());
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_binary_and_serde_agree() {
    let filter = populated(300, 0.02, 150);

    let from_binary = binary::from_bytes(&binary::to_bytes(&filter)).unwrap();
    let from_serde: BloomFilter =
        bincode::deserialize(&bincode::serialize(&filter).unwrap()).unwrap();

    assert_eq!(from_binary.to_bit_bytes(), from_serde.to_bit_bytes());
    assert_eq!(from_binary.seeds(), from_serde.seeds());
}

#[cfg(feature = "serde")]
#[test]
fn test_truncated_bincode_rejected() {
    let filter = populated(100, 0.01, 10);
    let bytes = bincode::serialize(&filter).unwrap();

    let result: Result<BloomFilter, _> = bincode::deserialize(&bytes[..bytes.len() - 1]);
    assert!(result.is_err());
}

#[test]
fn test_flipped_padding_bit_rejected() {
    // 47 bits: the top bit of the sixth byte is padding.
    let filter = BloomFilter::new(100, 0.8).unwrap();
    let mut bytes = binary::to_bytes(&filter);
    let last = bytes.len() - 1;
    bytes[last] |= 0x80;

    assert!(matches!(
        binary::from_bytes(&bytes),
        Err(SeedBloomError::CorruptData { .. })
    ));
}

#[cfg(feature = "serde")]
#[test]
fn test_oversized_serde_record_rejected() {
    let json = r#"{"version":1,"size_bits":2147483647,"num_hashes":1,"seeds":[0],
        "expected_items":1,"target_fpr":0.5,"bits":[]}"#;
    let result: Result<BloomFilter, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn test_oversized_parts_rejected() {
    let err = BloomFilter::from_parts(i32::MAX as usize, 1, &[0], &[]).unwrap_err();
    assert!(matches!(err, SeedBloomError::CorruptData { .. }));
}

proptest! {
    #[test]
    fn binary_roundtrip_answers_identically(
        items in prop::collection::vec(any::<u32>(), 0..100),
        lookups in prop::collection::vec(any::<u32>(), 0..100),
    ) {
        let filter = BloomFilter::new(100, 0.05).unwrap();
        for item in &items {
            filter.add(item).unwrap();
        }

        let restored = binary::from_bytes(&binary::to_bytes(&filter)).unwrap();
        for lookup in items.iter().chain(lookups.iter()) {
            prop_assert_eq!(restored.contains(lookup).unwrap(), filter.contains(lookup).unwrap());
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let _ = binary::from_bytes(&bytes);
    }

    #[test]
    fn single_byte_corruption_detected_or_consistent(index in 0usize..24, value in any::<u8>()) {
        // 14-byte header, two seeds, two bytes of bits.
        let filter = BloomFilter::with_params(16, 2).unwrap();
        filter.add_bytes(b"x");
        let original = binary::to_bytes(&filter);
        prop_assert_eq!(original.len(), 24);
        prop_assume!(original[index] != value);

        let mut corrupted = original.clone();
        corrupted[index] = value;

        match binary::from_bytes(&corrupted) {
            // Only the bit count (when it still fits two bytes) and the bits themselves can
            // change without breaking the layout.
            Ok(restored) => {
                prop_assert!((6..10).contains(&index) || index >= 22);
                prop_assert_eq!(restored.hash_count(), 2);
            }
            Err(err) => {
                let corrupt = matches!(err, SeedBloomError::CorruptData { .. });
                prop_assert!(corrupt, "unexpected error kind: {:?}", err);
            }
        }
    }
}
