// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, Interviewer, InterviewerSlots, ParseError, Party, Person, Slot, SlotRecord, TimeOfDay, Weekday};
pub use requests::{PersonPayload, SlotMatchingRequest, SlotPayload};
pub use responses::{ErrorResponse, HealthResponse, SlotMatchingResponse};
