use thiserror::Error;
use crate::core::{Matcher, MatchResult};
use crate::models::{InterviewerSlots, ParseError, Party, Slot, SlotMatchingRequest, SlotRecord};
use crate::services::repository::{RepositoryError, SlotRepository};

/// Errors that abort a match computation
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn parse_records(records: &[SlotRecord]) -> Result<Vec<Slot>, ParseError> {
    records.iter().map(|record| Slot::try_from(record)).collect()
}

/// Fetch availability for everyone in `request` and run the matcher
///
/// Every slot record is parsed before matching starts, so one malformed
/// time anywhere fails the whole request instead of silently changing which
/// interviewers match. Repository failures are returned as-is, without retry.
pub async fn find_common_slots<R>(
    repository: &R,
    matcher: &Matcher,
    request: &SlotMatchingRequest,
) -> Result<MatchResult, MatchError>
where
    R: SlotRepository + ?Sized,
{
    let candidate_id = request.candidate.id;
    let candidate_records = repository.slots_for(Party::Candidate, candidate_id).await?;
    let candidate_slots = parse_records(&candidate_records)?;

    let mut interviewers = Vec::with_capacity(request.interviewers.len());
    for interviewer in &request.interviewers {
        let records = repository.slots_for(Party::Interviewer, interviewer.id).await?;
        interviewers.push(InterviewerSlots {
            interviewer_id: interviewer.id,
            slots: parse_records(&records)?,
        });
    }

    tracing::debug!(
        "Matching {} candidate slots for candidate {} against {} interviewers",
        candidate_slots.len(),
        candidate_id,
        interviewers.len()
    );

    Ok(matcher.find_slots(&candidate_slots, &interviewers))
}
