use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Textual form of a time of day on the wire and in storage
const TIME_FORMAT: &str = "%H:%M:%S";

/// A time-of-day string did not match `HH:MM:SS`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time of day '{input}': expected HH:MM:SS")]
pub struct ParseError {
    pub input: String,
}

/// Wall-clock instant within a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Parses the fixed `HH:MM:SS` form: two digits per field, no
    /// surrounding whitespace, seconds up to 59.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        clock_fields(input)
            .and_then(|(hour, min, sec)| Self::from_hms(hour, min, sec))
            .ok_or_else(|| ParseError {
                input: input.to_string(),
            })
    }

    pub fn from_hms(hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, min, sec).map(TimeOfDay)
    }

    /// Adds `delta` without wrapping past midnight.
    ///
    /// Returns `None` when the result would land on the next day.
    pub fn checked_add(self, delta: Duration) -> Option<Self> {
        let (time, wrapped) = self.0.overflowing_add_signed(delta);
        if wrapped != 0 {
            return None;
        }
        Some(TimeOfDay(time))
    }

    /// Signed distance from `self` to `later`
    pub fn until(self, later: TimeOfDay) -> Duration {
        later.0.signed_duration_since(self.0)
    }
}

fn clock_fields(input: &str) -> Option<(u32, u32, u32)> {
    let bytes = input.as_bytes();
    if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }

    let field = |at: usize| {
        let (tens, ones) = (bytes[at], bytes[at + 1]);
        (tens.is_ascii_digit() && ones.is_ascii_digit())
            .then(|| u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
    };

    Some((field(0)?, field(3)?, field(6)?))
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Day of the week, numbered from Sunday = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Weekday::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("weekday must be between 0 and 6, got {}", value))
    }
}

impl From<Weekday> for u8 {
    fn from(value: Weekday) -> Self {
        value.number()
    }
}

/// Which side of an interview a person or slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    Candidate,
    Interviewer,
}

impl Party {
    pub fn label(self) -> &'static str {
        match self {
            Party::Candidate => "candidate",
            Party::Interviewer => "interviewer",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stored person with an id and a name
///
/// Implemented by [`Candidate`] and [`Interviewer`] so storage and routes can
/// share one code path per operation.
pub trait Person: Serialize + Send + Sync + 'static {
    const PARTY: Party;

    fn from_parts(id: i32, name: String) -> Self;
}

/// Person applying for a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

/// Person conducting interviews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interviewer {
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

impl Person for Candidate {
    const PARTY: Party = Party::Candidate;

    fn from_parts(id: i32, name: String) -> Self {
        Candidate { id, name }
    }
}

impl Person for Interviewer {
    const PARTY: Party = Party::Interviewer;

    fn from_parts(id: i32, name: String) -> Self {
        Interviewer { id, name }
    }
}

/// Stored form of an availability slot
///
/// Times are kept as text exactly as they were submitted. They are only
/// parsed when a match is computed, see [`Slot::try_from`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(rename = "ownerId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i32>,
    #[serde(rename = "initial", alias = "initialTime")]
    pub initial_time: String,
    #[serde(rename = "final", alias = "finalTime")]
    pub final_time: String,
    #[serde(default)]
    pub weekdays: Vec<Weekday>,
}

/// Availability window used by the matching engine
///
/// Callers guarantee `initial_time < final_time`; nothing here checks it.
/// `weekdays` is an ordered sequence and may hold duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(rename = "ownerId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i32>,
    #[serde(rename = "initial", alias = "initialTime")]
    pub initial_time: TimeOfDay,
    #[serde(rename = "final", alias = "finalTime")]
    pub final_time: TimeOfDay,
    pub weekdays: Vec<Weekday>,
}

impl Slot {
    /// Ownerless slot, the shape every computed match takes
    pub fn new(initial_time: TimeOfDay, final_time: TimeOfDay, weekdays: Vec<Weekday>) -> Self {
        Self {
            id: None,
            owner_id: None,
            initial_time,
            final_time,
            weekdays,
        }
    }

    pub fn span(&self) -> Duration {
        self.initial_time.until(self.final_time)
    }
}

impl TryFrom<&SlotRecord> for Slot {
    type Error = ParseError;

    fn try_from(record: &SlotRecord) -> Result<Self, Self::Error> {
        Ok(Slot {
            id: record.id,
            owner_id: record.owner_id,
            initial_time: TimeOfDay::parse(&record.initial_time)?,
            final_time: TimeOfDay::parse(&record.final_time)?,
            weekdays: record.weekdays.clone(),
        })
    }
}

impl From<&Slot> for SlotRecord {
    fn from(slot: &Slot) -> Self {
        SlotRecord {
            id: slot.id,
            owner_id: slot.owner_id,
            initial_time: slot.initial_time.to_string(),
            final_time: slot.final_time.to_string(),
            weekdays: slot.weekdays.clone(),
        }
    }
}

/// Availability of one interviewer, in storage order
#[derive(Debug, Clone)]
pub struct InterviewerSlots {
    pub interviewer_id: i32,
    pub slots: Vec<Slot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_of_day() {
        let t = TimeOfDay::parse("09:30:15").unwrap();
        assert_eq!(t, TimeOfDay::from_hms(9, 30, 15).unwrap());
        assert_eq!(t.to_string(), "09:30:15");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let inputs = [
            "",
            "9:30",
            "09:30",
            "25:00:00",
            "ab:cd:ef",
            "09:30:00 PM",
            " 09:00:00",
            "09:00:00 ",
            "09:0:0",
            "9:00:000",
            "09-00-00",
            "+9:00:00",
            "12:60:00",
            "23:59:60",
        ];
        for input in inputs {
            let err = TimeOfDay::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn test_parse_accepts_day_bounds() {
        assert_eq!(TimeOfDay::parse("00:00:00").unwrap(), TimeOfDay::from_hms(0, 0, 0).unwrap());
        assert_eq!(TimeOfDay::parse("23:59:59").unwrap().to_string(), "23:59:59");
        assert!(TimeOfDay::from_hms(23, 59, 60).is_none());
    }

    #[test]
    fn test_checked_add_stops_at_midnight() {
        let late = TimeOfDay::parse("23:30:00").unwrap();
        assert_eq!(late.checked_add(Duration::hours(1)), None);

        let early = TimeOfDay::parse("08:15:00").unwrap();
        assert_eq!(
            early.checked_add(Duration::hours(1)),
            TimeOfDay::from_hms(9, 15, 0)
        );
    }

    #[test]
    fn test_weekday_wire_format() {
        let days: Vec<Weekday> = serde_json::from_str("[0, 3, 6]").unwrap();
        assert_eq!(days, vec![Weekday::Sunday, Weekday::Wednesday, Weekday::Saturday]);
        assert_eq!(serde_json::to_string(&days).unwrap(), "[0,3,6]");
        assert!(serde_json::from_str::<Vec<Weekday>>("[7]").is_err());
    }

    #[test]
    fn test_slot_from_record() {
        let record = SlotRecord {
            id: Some(4),
            owner_id: Some(2),
            initial_time: "10:00:00".to_string(),
            final_time: "11:00:00".to_string(),
            weekdays: vec![Weekday::Monday],
        };
        let slot = Slot::try_from(&record).unwrap();
        assert_eq!(slot.span(), Duration::hours(1));
        assert_eq!(SlotRecord::from(&slot), record);

        let broken = SlotRecord {
            final_time: "11h00".to_string(),
            ..record
        };
        assert_eq!(Slot::try_from(&broken).unwrap_err().input, "11h00");
    }

    #[test]
    fn test_computed_slot_omits_owner() {
        let slot = Slot::new(
            TimeOfDay::parse("10:00:00").unwrap(),
            TimeOfDay::parse("10:30:00").unwrap(),
            vec![Weekday::Monday],
        );
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"initial": "10:00:00", "final": "10:30:00", "weekdays": [1]})
        );
    }
}
