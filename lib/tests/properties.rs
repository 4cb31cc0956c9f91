//! Property tests for the wide arithmetic and both target rules.
//!
//! The reference product is computed with a 512-bit `uint` integer, wide
//! enough that `hash * difficulty` can never overflow it.

use powcheck::arith::{add_overflows, add_with_carry_overflows, multiply, WideProduct};
use powcheck::{check_hash_current, check_hash_legacy, Hash, CURRENT_RULE_SCALE};
use proptest::prelude::*;
use uint::construct_uint;

construct_uint! {
    pub struct U512(8);
}

fn reference_product(hash: &Hash, difficulty: u64) -> U512 {
    U512::from_big_endian(hash.as_bytes()) * U512::from(difficulty)
}

fn pow2(bits: usize) -> U512 {
    U512::one() << bits
}

/// Random hashes essentially never pass the current rule, so bias toward
/// hashes with a run of leading zero bytes.
fn arb_hash() -> impl Strategy<Value = Hash> {
    (0usize..=32, prop::array::uniform32(any::<u8>())).prop_map(|(zeros, mut bytes)| {
        bytes[..zeros].fill(0);
        Hash::from_bytes(bytes)
    })
}

fn arb_difficulty() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(0u64),
        Just(1u64),
        Just(u64::MAX),
        1u64..1_000_000u64,
        any::<u64>(),
    ]
}

proptest! {
    #[test]
    fn multiply_is_exact(a in any::<u64>(), b in any::<u64>()) {
        let (low, high) = multiply(a, b);
        let expected = u128::from(a) * u128::from(b);

        prop_assert_eq!(u128::from(low) | (u128::from(high) << 64), expected);
    }

    #[test]
    fn add_overflows_matches_wide_sum(a in any::<u64>(), b in any::<u64>()) {
        let wide = u128::from(a) + u128::from(b);

        prop_assert_eq!(add_overflows(a, b), wide > u128::from(u64::MAX));
    }

    #[test]
    fn add_with_carry_matches_wide_sum(a in any::<u64>(), b in any::<u64>(), carry in any::<bool>()) {
        let wide = u128::from(a) + u128::from(b) + u128::from(carry);

        prop_assert_eq!(add_with_carry_overflows(a, b, carry), wide > u128::from(u64::MAX));
    }

    #[test]
    fn wide_product_is_exact(hash in arb_hash(), difficulty in arb_difficulty()) {
        let product = WideProduct::new(&hash.limbs(), difficulty);
        let limbs = product.limbs();
        let expected = reference_product(&hash, difficulty);

        prop_assert_eq!(&limbs[..], &expected.0[..5]);
        prop_assert!(expected.0[5..].iter().all(|&limb| limb == 0));
    }

    #[test]
    fn legacy_matches_reference(hash in arb_hash(), difficulty in arb_difficulty()) {
        let expected = reference_product(&hash, difficulty) < pow2(256);

        prop_assert_eq!(check_hash_legacy(&hash, difficulty), expected);
    }

    #[test]
    fn current_matches_reference(hash in arb_hash(), difficulty in arb_difficulty()) {
        let expected = reference_product(&hash, difficulty) < pow2(216);

        prop_assert_eq!(check_hash_current(&hash, difficulty), expected);
    }

    #[test]
    fn easier_difficulty_keeps_acceptance(
        hash in arb_hash(),
        a in arb_difficulty(),
        b in arb_difficulty()
    ) {
        let (easy, hard) = if a <= b { (a, b) } else { (b, a) };

        if check_hash_legacy(&hash, hard) {
            prop_assert!(check_hash_legacy(&hash, easy));
        }
        if check_hash_current(&hash, hard) {
            prop_assert!(check_hash_current(&hash, easy));
        }
    }

    #[test]
    fn current_is_legacy_at_scaled_difficulty(
        hash in arb_hash(),
        difficulty in 0u64..(1u64 << 24)
    ) {
        prop_assert_eq!(
            check_hash_current(&hash, difficulty),
            check_hash_legacy(&hash, difficulty * CURRENT_RULE_SCALE)
        );
    }

    #[test]
    fn checks_are_pure(hash in arb_hash(), difficulty in arb_difficulty()) {
        prop_assert_eq!(check_hash_legacy(&hash, difficulty), check_hash_legacy(&hash, difficulty));
        prop_assert_eq!(check_hash_current(&hash, difficulty), check_hash_current(&hash, difficulty));
    }
}
