use crate::core::time::{before, earliest, intersect_weekdays, latest};
use crate::models::Slot;

/// Common window of two slots, if any
///
/// Weekdays are intersected first; an empty intersection is no match. The
/// time ranges must then overlap as open intervals, so slots that only touch
/// at an endpoint do not match. The result takes the later start, the
/// earlier end and the common weekdays, and carries no id or owner.
pub fn match_slots(s1: &Slot, s2: &Slot) -> Option<Slot> {
    let weekdays = intersect_weekdays(&s1.weekdays, &s2.weekdays);
    if weekdays.is_empty() {
        return None;
    }

    let overlaps = before(s1.initial_time, s2.final_time) && before(s2.initial_time, s1.final_time);
    if !overlaps {
        return None;
    }

    Some(Slot::new(
        latest(s1.initial_time, s2.initial_time),
        earliest(s1.final_time, s2.final_time),
        weekdays,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeOfDay, Weekday};
    use Weekday::*;

    fn slot(initial: &str, fin: &str, weekdays: Vec<Weekday>) -> Slot {
        Slot::new(
            TimeOfDay::parse(initial).unwrap(),
            TimeOfDay::parse(fin).unwrap(),
            weekdays,
        )
    }

    #[test]
    fn test_overlapping_slots_tighten() {
        let a = slot("09:00:00", "11:00:00", vec![Monday, Wednesday]);
        let b = slot("10:00:00", "12:00:00", vec![Monday]);

        let result = match_slots(&a, &b).unwrap();
        assert_eq!(result, slot("10:00:00", "11:00:00", vec![Monday]));
    }

    #[test]
    fn test_touching_slots_do_not_match() {
        let a = slot("09:00:00", "10:00:00", vec![Monday]);
        let b = slot("10:00:00", "11:00:00", vec![Monday]);

        assert!(match_slots(&a, &b).is_none());
        assert!(match_slots(&b, &a).is_none());
    }

    #[test]
    fn test_shared_time_without_shared_weekday() {
        let a = slot("09:00:00", "17:00:00", vec![Monday]);
        let b = slot("09:00:00", "17:00:00", vec![Tuesday]);

        assert!(match_slots(&a, &b).is_none());
    }

    #[test]
    fn test_contained_slot() {
        let outer = slot("08:00:00", "18:00:00", vec![Friday]);
        let inner = slot("12:00:00", "12:30:00", vec![Friday]);

        assert_eq!(match_slots(&outer, &inner).unwrap(), inner);
        assert_eq!(match_slots(&inner, &outer).unwrap(), inner);
    }

    #[test]
    fn test_result_drops_owner_and_id() {
        let mut a = slot("09:00:00", "10:00:00", vec![Monday]);
        a.id = Some(1);
        a.owner_id = Some(7);
        let b = slot("09:00:00", "10:00:00", vec![Monday]);

        let result = match_slots(&a, &b).unwrap();
        assert_eq!(result.id, None);
        assert_eq!(result.owner_id, None);
    }
}
