mod epoch;
mod schedule;


pub use epoch::RuleEpoch;
pub use schedule::PowSchedule;
