use core::fmt;
use std::str::FromStr;

use crate::arith::HASH_LIMBS;
use crate::error::{PowError, Result};
use crate::U256;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha256::digest;


/// A 256-bit block hash. Byte 0 is the most significant byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; 32]);

impl Hash {

    // cbor-serialize the data and sha256 it
    // the consensus checks never pick a hash function; this is for tooling that needs one

    pub fn hash<T: Serialize>(data: &T) -> Result<Self> {

        let mut serialized: Vec<u8> = vec![];

        ciborium::into_writer(data, &mut serialized)
            .map_err(|e| PowError::Serialization(e.to_string()))?;

        digest(&serialized).parse()
    }

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {

        Hash(bytes)
    }

    pub const fn zero() -> Self {

        Hash([0; 32])
    }

    pub fn as_bytes(&self) -> &[u8; 32] {

        &self.0
    }

    /// The hash as four 64-bit limbs, least significant first.
    ///
    /// Limb 3 is bytes `0..8`, limb 0 is bytes `24..32`, each read big-endian.
    /// Both target checks go through this mapping.
    pub fn limbs(&self) -> [u64; HASH_LIMBS] {

        let mut limbs = [0u64; HASH_LIMBS];

        for (i, chunk) in self.0.chunks_exact(8).enumerate() {

            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);

            limbs[HASH_LIMBS - 1 - i] = u64::from_be_bytes(word);
        }

        limbs
    }

    pub fn to_u256(&self) -> U256 {

        U256::from_big_endian(&self.0)
    }

    // how far below 2^256 the hash sits, for reporting
    pub fn leading_zero_bits(&self) -> u32 {

        self.to_u256().leading_zeros()
    }
}

impl From<[u8; 32]> for Hash {

    fn from(bytes: [u8; 32]) -> Self {

        Hash(bytes)
    }
}

impl FromStr for Hash {

    type Err = PowError;

    fn from_str(s: &str) -> Result<Self> {

        let s = s.strip_prefix("0x").unwrap_or(s);

        let bytes = hex::decode(s)?;

        let bytes: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| PowError::InvalidHashLength(bytes.len()))?;

        Ok(Hash(bytes))
    }
}

impl fmt::Display for Hash {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {

        write!(f, "{}", hex::encode(self.0))
    }
}

impl Serialize for Hash {

    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {

        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash {

    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {

        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
