use chrono::Duration;
use crate::core::{decompose::decompose, overlap::match_slots};
use crate::models::{InterviewerSlots, Slot};

/// Default booking grain in minutes
pub const DEFAULT_CHUNK_MINUTES: i64 = 60;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub slots: Vec<Slot>,
    pub candidate_slots: usize,
    pub surviving_slots: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Fold each candidate slot across every interviewer
/// 2. Drop candidate slots some interviewer cannot meet
/// 3. Explode surviving windows per weekday
/// 4. Chunk each window into booking-grain slots
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    chunk: Duration,
}

impl Matcher {
    pub fn new(chunk: Duration) -> Self {
        Self { chunk }
    }

    /// Matcher with a chunk length in minutes
    ///
    /// Returns `None` unless `minutes` is positive and within chrono's range.
    pub fn with_chunk_minutes(minutes: i64) -> Option<Self> {
        Duration::try_minutes(minutes)
            .filter(|chunk| *chunk > Duration::zero())
            .map(Self::new)
    }

    pub fn chunk(&self) -> Duration {
        self.chunk
    }

    /// Narrow one candidate slot by every interviewer in turn
    ///
    /// Each interviewer slot is matched against the current accumulated
    /// window, and every success replaces it. When an interviewer owns several
    /// overlapping slots the last one to match in storage order wins.
    ///
    /// Returns `None` as soon as an interviewer has no matching slot. With no
    /// interviewers the candidate slot comes back unchanged.
    pub fn reduce(&self, candidate_slot: &Slot, interviewers: &[InterviewerSlots]) -> Option<Slot> {
        interviewers.iter().try_fold(candidate_slot.clone(), |accum, interviewer| {
            let narrowed = interviewer.slots.iter().fold(None, |last: Option<Slot>, slot| {
                let base = last.as_ref().unwrap_or(&accum);
                match_slots(base, slot).or(last)
            });

            if narrowed.is_none() {
                tracing::debug!(
                    "Candidate slot {:?} discarded: no overlap with interviewer {}",
                    candidate_slot.id,
                    interviewer.interviewer_id
                );
            }
            narrowed
        })
    }

    /// Common windows for every candidate slot, in candidate-slot order
    pub fn match_all(&self, candidate_slots: &[Slot], interviewers: &[InterviewerSlots]) -> Vec<Slot> {
        candidate_slots
            .iter()
            .filter_map(|slot| self.reduce(slot, interviewers))
            .collect()
    }

    /// Find bookable slots shared by a candidate and all interviewers
    ///
    /// # Arguments
    /// * `candidate_slots` - The candidate's availability, in storage order
    /// * `interviewers` - Each interviewer's availability, in request order
    ///
    /// # Returns
    /// MatchResult holding single-weekday slots no longer than the chunk length
    pub fn find_slots(&self, candidate_slots: &[Slot], interviewers: &[InterviewerSlots]) -> MatchResult {
        let common = self.match_all(candidate_slots, interviewers);
        let surviving_slots = common.len();

        MatchResult {
            slots: decompose(common, self.chunk),
            candidate_slots: candidate_slots.len(),
            surviving_slots,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_CHUNK_MINUTES))
    }
}
