// Consensus-critical. Every node must produce bit-identical results.
//! Proof-of-work target checks.
//!
//! Both rules accept a hash when `hash * difficulty` stays below a fixed
//! power of two:
//!
//! - legacy: `hash * difficulty < 2^256`, the rule blocks below the
//!   rule-change height were mined under
//! - current: `hash * difficulty < 2^216`, the production rule
//!
//! The two stay separate functions. Old blocks replay under the legacy rule
//! forever, so neither may be "fixed" in terms of the other.

use crate::arith::{add_overflows, add_with_carry_overflows, multiply, WideProduct};
use crate::sha256::Hash;
use crate::types::RuleEpoch;
use crate::{Difficulty, CURRENT_CEILING_BITS};


/// Accept iff `hash * difficulty < 2^256`.
///
/// A difficulty of zero accepts every hash.
pub fn check_hash_legacy(hash: &Hash, difficulty: Difficulty) -> bool {

    let [h0, h1, h2, h3] = hash.limbs();

    // top limb first, a random hash almost always overflows here

    let (top, high) = multiply(h3, difficulty);

    if high != 0 {

        return false;
    }

    let (_, cur) = multiply(h0, difficulty);

    let (low, high) = multiply(h1, difficulty);
    let carry = add_overflows(cur, low);
    let cur = high;

    let (low, high) = multiply(h2, difficulty);
    let carry = add_with_carry_overflows(cur, low, carry);

    // a carry out of limb 3 lands in limb 4
    !add_with_carry_overflows(high, top, carry)
}

/// Accept iff `hash * difficulty < 2^216`.
///
/// Equivalent to the legacy check at `difficulty * 2^40` whenever that
/// scaled difficulty fits in 64 bits. A difficulty of zero accepts every hash;
/// the all-ones hash is rejected at every non-zero difficulty.
pub fn check_hash_current(hash: &Hash, difficulty: Difficulty) -> bool {

    WideProduct::new(&hash.limbs(), difficulty).is_below_pow2(CURRENT_CEILING_BITS)
}

/// Run the check for the given rule epoch.
pub fn check_hash(hash: &Hash, difficulty: Difficulty, epoch: RuleEpoch) -> bool {

    match epoch {
        RuleEpoch::Legacy => check_hash_legacy(hash, difficulty),
        RuleEpoch::Current => check_hash_current(hash, difficulty),
    }
}
