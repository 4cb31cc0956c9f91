// Consensus-critical. Every node must produce bit-identical results.
//! Extended-precision arithmetic over 64-bit limbs.
//!
//! The target checks never divide. They decide `hash * difficulty < 2^k` by
//! building the exact 320-bit product out of 128-bit partial products and
//! explicit carry propagation.

use crate::Difficulty;

/// Limbs in a hash (256 bits).
pub const HASH_LIMBS: usize = 4;

/// Limbs in a hash-by-difficulty product (320 bits).
pub const PRODUCT_LIMBS: usize = HASH_LIMBS + 1;

/// Exact 128-bit product of `a` and `b`, split into `(low, high)` 64-bit halves.
pub fn multiply(a: u64, b: u64) -> (u64, u64) {
    let product = u128::from(a) * u128::from(b);

    (product as u64, (product >> 64) as u64)
}

/// True iff `a + b` does not fit in 64 bits.
pub fn add_overflows(a: u64, b: u64) -> bool {
    a.overflowing_add(b).1
}

/// True iff `a + b + carry_in` does not fit in 64 bits.
///
/// `a + b == u64::MAX` with a carry in reaches exactly 2^64 and reports an
/// overflow even though `a + b` alone did not.
pub fn add_with_carry_overflows(a: u64, b: u64, carry_in: bool) -> bool {
    let (sum, first) = a.overflowing_add(b);
    let (_, second) = sum.overflowing_add(u64::from(carry_in));

    first | second
}

/// The exact product of a 256-bit hash and a 64-bit difficulty.
///
/// Limb 0 is least significant. Nothing is truncated: the top limb absorbs
/// the final carry, and `hash * difficulty < 2^320` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WideProduct([u64; PRODUCT_LIMBS]);

impl WideProduct {

    /// Schoolbook multiply of four hash limbs (least significant first) by one limb.
    pub fn new(hash_limbs: &[u64; HASH_LIMBS], difficulty: Difficulty) -> Self {

        let [h0, h1, h2, h3] = *hash_limbs;

        let (r0, high0) = multiply(h0, difficulty);
        let (low1, high1) = multiply(h1, difficulty);
        let (low2, high2) = multiply(h2, difficulty);
        let (low3, high3) = multiply(h3, difficulty);

        let carry1 = add_overflows(high0, low1);
        let r1 = high0.wrapping_add(low1);

        let carry2 = add_with_carry_overflows(high1, low2, carry1);
        let r2 = high1.wrapping_add(low2).wrapping_add(u64::from(carry1));

        let carry3 = add_with_carry_overflows(high2, low3, carry2);
        let r3 = high2.wrapping_add(low3).wrapping_add(u64::from(carry2));

        // the high half of a 64x64 product is at most 2^64 - 2, so the carry always fits
        let r4 = high3 + u64::from(carry3);

        WideProduct([r0, r1, r2, r3, r4])
    }

    pub fn limbs(&self) -> [u64; PRODUCT_LIMBS] {

        self.0
    }

    /// True iff the product is strictly less than `2^bits`.
    pub fn is_below_pow2(&self, bits: u32) -> bool {

        debug_assert!(bits as usize <= PRODUCT_LIMBS * 64);

        let word = bits as usize / 64;
        let shift = bits % 64;

        self.0.iter().enumerate().all(|(i, &limb)| {

            if i < word {
                true
            } else if i == word {
                limb >> shift == 0
            } else {
                limb == 0
            }
        })
    }
}
