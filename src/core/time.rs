use crate::models::{TimeOfDay, Weekday};

/// Strict less-than on time of day
#[inline]
pub fn before(a: TimeOfDay, b: TimeOfDay) -> bool {
    a < b
}

/// Later of two instants, picked with the strict comparator
#[inline]
pub fn latest(a: TimeOfDay, b: TimeOfDay) -> TimeOfDay {
    if before(a, b) { b } else { a }
}

/// Earlier of two instants, picked with the strict comparator
#[inline]
pub fn earliest(a: TimeOfDay, b: TimeOfDay) -> TimeOfDay {
    if before(a, b) { a } else { b }
}

/// Weekdays of `left` that also occur anywhere in `right`
///
/// Not a set intersection: order and multiplicity come from `left`, so
/// `[Mon, Mon, Tue] ∩ [Mon]` is `[Mon, Mon]`.
pub fn intersect_weekdays(left: &[Weekday], right: &[Weekday]) -> Vec<Weekday> {
    left.iter()
        .filter(|day| right.contains(day))
        .copied()
        .collect()
}
