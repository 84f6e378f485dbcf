//! Property-based tests for the matching engine using proptest.
//!
//! These check invariants that hold for any well-formed slots, not just the
//! hand-picked scenarios in `integration_tests.rs`.

use chrono::Duration;
use interview_slots::core::{decompose, match_slots, Matcher};
use interview_slots::models::{InterviewerSlots, Slot, TimeOfDay, Weekday};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_weekday() -> impl Strategy<Value = Weekday> {
    (0u8..7).prop_map(|n| Weekday::try_from(n).unwrap())
}

fn arb_weekdays() -> impl Strategy<Value = Vec<Weekday>> {
    prop::collection::vec(arb_weekday(), 1..5)
}

/// Slots with `initial < final`, on a one-minute grid
fn arb_slot() -> impl Strategy<Value = Slot> {
    (0u32..1439, 1u32..1440, arb_weekdays()).prop_map(|(start, len, weekdays)| {
        let end = (start + len).min(1439);
        Slot::new(minute(start), minute(end), weekdays)
    })
}

fn minute(m: u32) -> TimeOfDay {
    TimeOfDay::from_hms(m / 60, m % 60, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn disjoint_weekdays_never_match(a in arb_slot(), mut b in arb_slot()) {
        b.weekdays.retain(|day| !a.weekdays.contains(day));
        prop_assume!(!b.weekdays.is_empty());
        prop_assert!(match_slots(&a, &b).is_none());
    }

    #[test]
    fn disjoint_ranges_never_match(a in arb_slot(), gap in 0u32..60, weekdays in arb_weekdays()) {
        let start = a.final_time;
        let mut later = Slot::new(
            start.checked_add(Duration::minutes(gap as i64)).unwrap_or(start),
            TimeOfDay::from_hms(23, 59, 59).unwrap(),
            weekdays,
        );
        later.weekdays.extend(a.weekdays.iter().copied());
        prop_assert!(match_slots(&a, &later).is_none());
        prop_assert!(match_slots(&later, &a).is_none());
    }

    #[test]
    fn match_stays_inside_both_ranges(a in arb_slot(), b in arb_slot()) {
        if let Some(result) = match_slots(&a, &b) {
            prop_assert!(result.initial_time >= a.initial_time);
            prop_assert!(result.initial_time >= b.initial_time);
            prop_assert!(result.final_time <= a.final_time);
            prop_assert!(result.final_time <= b.final_time);
            prop_assert!(result.initial_time < result.final_time);
            prop_assert!(!result.weekdays.is_empty());
        }
    }

    #[test]
    fn decompose_emits_short_single_day_slots(slots in prop::collection::vec(arb_slot(), 0..6)) {
        for chunk in decompose(slots, Duration::hours(1)) {
            prop_assert!(chunk.initial_time < chunk.final_time);
            prop_assert!(chunk.span() <= Duration::hours(1));
            prop_assert_eq!(chunk.weekdays.len(), 1);
            prop_assert!(chunk.owner_id.is_none());
        }
    }

    #[test]
    fn decompose_covers_each_weekday_range(slot in arb_slot()) {
        let chunks = decompose(vec![slot.clone()], Duration::hours(1));
        let per_day = chunks.len() / slot.weekdays.len();
        prop_assert_eq!(per_day * slot.weekdays.len(), chunks.len());

        for (day, group) in slot.weekdays.iter().zip(chunks.chunks(per_day)) {
            prop_assert!(group.iter().all(|c| c.weekdays == vec![*day]));
            prop_assert_eq!(group[0].initial_time, slot.initial_time);
            prop_assert_eq!(group[group.len() - 1].final_time, slot.final_time);
            for pair in group.windows(2) {
                prop_assert_eq!(pair[0].final_time, pair[1].initial_time);
            }
        }
    }

    #[test]
    fn no_interviewers_is_identity_before_decomposition(slots in prop::collection::vec(arb_slot(), 0..6)) {
        let matcher = Matcher::default();
        let empty: Vec<InterviewerSlots> = Vec::new();
        prop_assert_eq!(matcher.match_all(&slots, &empty), slots);
    }
}
