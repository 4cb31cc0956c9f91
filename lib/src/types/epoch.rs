use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PowError;


/// Which target rule a block is validated under.
///
/// The rule changed once. Blocks below the rule-change height replay under
/// `Legacy`, everything from it onward under `Current`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RuleEpoch {

    Legacy,
    Current,
}

impl fmt::Display for RuleEpoch {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {

        match self {
            RuleEpoch::Legacy => write!(f, "legacy"),
            RuleEpoch::Current => write!(f, "current"),
        }
    }
}

impl FromStr for RuleEpoch {

    type Err = PowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {

        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(RuleEpoch::Legacy),
            "current" => Ok(RuleEpoch::Current),
            _ => Err(PowError::UnknownRule(s.to_owned())),
        }
    }
}
