use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Candidate, Interviewer, TimeOfDay, Weekday};

/// Request to find common availability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotMatchingRequest {
    pub candidate: Candidate,
    #[serde(default)]
    pub interviewers: Vec<Interviewer>,
}

/// Body for creating or renaming a candidate or interviewer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonPayload {
    #[validate(length(min = 1))]
    pub name: String,
}

/// Body for creating or replacing an availability slot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SlotPayload {
    #[validate(custom(function = "validate_time_of_day"))]
    #[serde(rename = "initial", alias = "initialTime")]
    pub initial_time: String,
    #[validate(custom(function = "validate_time_of_day"))]
    #[serde(rename = "final", alias = "finalTime")]
    pub final_time: String,
    #[serde(default)]
    pub weekdays: Vec<Weekday>,
}

fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    TimeOfDay::parse(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("time_of_day"))
}
