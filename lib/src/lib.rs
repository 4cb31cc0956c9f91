use uint::construct_uint;   // uint : create large fixed size integer ( 256 bit)
use serde::{Serialize, Deserialize};

construct_uint!{

    #[derive(Serialize, Deserialize)]
    pub struct U256(4);
}

/// Units of required work. Larger values require rarer hashes.
pub type Difficulty = u64;

// the current rule folds a fixed 2^40 into the ceiling:
// check_hash_current(h, d) == check_hash_legacy(h, d * 2^40) whenever d * 2^40 fits

pub const CURRENT_RULE_SCALE: u64 = 1 << 40;

// hash * difficulty must stay below 2^LEGACY_CEILING_BITS under the legacy rule

pub const LEGACY_CEILING_BITS: u32 = 256;

// hash * difficulty must stay below 2^CURRENT_CEILING_BITS under the current rule

pub const CURRENT_CEILING_BITS: u32 = LEGACY_CEILING_BITS - CURRENT_RULE_SCALE.trailing_zeros();


pub mod arith;
pub mod check;
pub mod error;
pub mod sha256;
pub mod types;
pub mod util;

pub use check::{check_hash, check_hash_current, check_hash_legacy};
pub use error::PowError;
pub use sha256::Hash;
pub use types::{PowSchedule, RuleEpoch};


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u256_parses_alongside_crate_errors() {
        let scale = U256::from_dec_str("1099511627776").expect("decimal");
        assert_eq!(scale, U256::from(CURRENT_RULE_SCALE));
        assert!(U256::from_dec_str("not a number").is_err());
        assert_eq!(scale.trailing_zeros(), LEGACY_CEILING_BITS - CURRENT_CEILING_BITS);
    }
}
