// Core algorithm exports
pub mod decompose;
pub mod matcher;
pub mod overlap;
pub mod time;

pub use decompose::{chunk_slot, decompose, explode_weekdays};
pub use matcher::{Matcher, MatchResult, DEFAULT_CHUNK_MINUTES};
pub use overlap::match_slots;
pub use time::{before, earliest, intersect_weekdays, latest};
