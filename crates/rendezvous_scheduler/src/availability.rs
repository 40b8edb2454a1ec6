// --- File: crates/rendezvous_scheduler/src/availability.rs ---
//! Free-window computation for a single selection.

use chrono::NaiveDate;
use rendezvous_common::models::{AvailabilitySlot, MeetingAssignment, TimeWindow};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::BTreeMap;

/// What a selection can still book on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayAvailability {
    /// Every slot on the date is taken. Serialized as `["unavailable"]`.
    Unavailable,
    /// Free windows, ordered by start time.
    Windows(Vec<TimeWindow>),
}

impl DayAvailability {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DayAvailability::Unavailable)
    }

    pub fn windows(&self) -> &[TimeWindow] {
        match self {
            DayAvailability::Unavailable => &[],
            DayAvailability::Windows(windows) => windows,
        }
    }
}

impl Serialize for DayAvailability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DayAvailability::Unavailable => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element("unavailable")?;
                seq.end()
            }
            DayAvailability::Windows(windows) => windows.serialize(serializer),
        }
    }
}

/// Maps every slot date to the slots not overlapped by a busy meeting.
///
/// `busy` holds the meetings that block the selection: those of other
/// selections sharing its investor or portfolio company. Dates with slots
/// but no free window map to [`DayAvailability::Unavailable`].
pub fn free_windows(
    slots: &[AvailabilitySlot],
    busy: &[MeetingAssignment],
) -> BTreeMap<NaiveDate, DayAvailability> {
    let mut per_date: BTreeMap<NaiveDate, Vec<TimeWindow>> = BTreeMap::new();

    for slot in slots {
        let window = slot.window();
        let free = per_date.entry(slot.date).or_default();
        let blocked = busy
            .iter()
            .any(|m| m.date == slot.date && m.window().overlaps(&window));
        if !blocked {
            free.push(window);
        }
    }

    per_date
        .into_iter()
        .map(|(date, mut windows)| {
            if windows.is_empty() {
                return (date, DayAvailability::Unavailable);
            }
            windows.sort();
            windows.dedup();
            (date, DayAvailability::Windows(windows))
        })
        .collect()
}

/// `true` when `window` on `date` lies inside one of `slots`.
pub fn covered_by_slots(date: NaiveDate, window: &TimeWindow, slots: &[AvailabilitySlot]) -> bool {
    slots
        .iter()
        .any(|slot| slot.date == date && slot.window().contains(window))
}
