use chrono::Duration;
use crate::core::time::before;
use crate::models::Slot;

/// Replace every multi-weekday slot with one slot per weekday
///
/// Weekday order is preserved; a slot with a single weekday passes through.
pub fn explode_weekdays(slots: Vec<Slot>) -> Vec<Slot> {
    let mut exploded = Vec::with_capacity(slots.len());

    for slot in slots {
        if slot.weekdays.len() <= 1 {
            exploded.push(slot);
            continue;
        }
        for &day in &slot.weekdays {
            exploded.push(Slot::new(slot.initial_time, slot.final_time, vec![day]));
        }
    }

    exploded
}

/// Split one slot into consecutive chunks no longer than `chunk`
///
/// Full-length chunks are emitted while `initial + chunk` strictly precedes
/// the end; the remainder (at most `chunk` long) closes the sequence. A step
/// that would cross midnight also closes the sequence. A non-positive
/// `chunk` leaves the slot whole.
pub fn chunk_slot(slot: &Slot, chunk: Duration) -> Vec<Slot> {
    if chunk <= Duration::zero() {
        return vec![Slot::new(slot.initial_time, slot.final_time, slot.weekdays.clone())];
    }

    let mut chunks = Vec::new();
    let mut initial = slot.initial_time;

    while let Some(next) = initial
        .checked_add(chunk)
        .filter(|&next| before(next, slot.final_time))
    {
        chunks.push(Slot::new(initial, next, slot.weekdays.clone()));
        initial = next;
    }
    chunks.push(Slot::new(initial, slot.final_time, slot.weekdays.clone()));

    chunks
}

/// Normalize matched windows into booking-grain slots
///
/// Weekday explosion runs first, then every resulting slot is chunked in
/// chronological order.
pub fn decompose(slots: Vec<Slot>, chunk: Duration) -> Vec<Slot> {
    explode_weekdays(slots)
        .iter()
        .flat_map(|slot| chunk_slot(slot, chunk))
        .collect()
}
