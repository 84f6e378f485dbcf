//! Interview Slots - finds interview times a candidate and every interviewer share
//!
//! The core matching engine intersects weekly availability windows and
//! breaks the common windows into single-weekday, bookable slots.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{decompose, match_slots, Matcher, MatchResult};
pub use models::{Candidate, Interviewer, InterviewerSlots, Slot, SlotMatchingRequest, SlotRecord, TimeOfDay, Weekday};
pub use services::{find_common_slots, MatchError, RepositoryError, SlotRepository};
