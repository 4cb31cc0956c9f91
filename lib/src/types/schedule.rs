use serde::{Deserialize, Serialize};
use tracing::trace;

use super::RuleEpoch;
use crate::check::check_hash;
use crate::sha256::Hash;
use crate::util::Saveable;
use crate::Difficulty;

use std::io::{
Error as IoError, ErrorKind as IoErrorKind, Read,
Result as IoResult, Write,
};


/// Maps block heights to the target rule they validate under.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowSchedule {

    current_rule_height: u64,
}

impl PowSchedule {

    pub fn new(current_rule_height: u64) -> Self {

        PowSchedule { current_rule_height }
    }

    // a chain that never switched to the current rule

    pub fn legacy_only() -> Self {

        PowSchedule::new(u64::MAX)
    }

    pub fn current_rule_height(&self) -> u64 {

        self.current_rule_height
    }

    pub fn rule_at(&self, height: u64) -> RuleEpoch {

        if height < self.current_rule_height {

            RuleEpoch::Legacy

        } else {

            RuleEpoch::Current
        }
    }

    /// Check a block hash under the rule active at `height`.
    pub fn check(&self, hash: &Hash, difficulty: Difficulty, height: u64) -> bool {

        let epoch = self.rule_at(height);
        let accepted = check_hash(hash, difficulty, epoch);

        trace!(height, difficulty, %epoch, %hash, accepted, "checked proof of work");

        accepted
    }
}

impl Default for PowSchedule {

    fn default() -> Self {

        PowSchedule::new(0)
    }
}


// save and load as CBOR via ciborium

impl Saveable for PowSchedule {

    fn load<I: Read>(reader: I) -> IoResult<Self> {

        ciborium::de::from_reader(reader).map_err(|_| {

            IoError::new(IoErrorKind::InvalidData, "failed to deserialize schedule")
        })
    }

    fn save<O: Write>(&self, writer: O) -> IoResult<()> {

        ciborium::ser::into_writer(self, writer).map_err(|_| {

            IoError::new(IoErrorKind::InvalidData, "failed to serialize schedule")
        })
    }
}
