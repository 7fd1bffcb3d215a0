use serde::{Deserialize, Serialize};

use super::time::MIDNIGHT;

/// One occupied slot in a room's weekly grid. Doctor identity is carried
/// inline as a (name, specialty) snapshot, not a reference into the
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub day: String,
    pub from_time: String,
    pub to_time: String,
    pub name: String,
    pub specialty: String,
}

impl ScheduleEntry {
    /// Whether this entry covers the given moment. `time` may carry seconds
    /// (HH:MM:SS); since both shapes are zero padded and an HH:MM boundary
    /// is a prefix of every HH:MM:SS inside that minute, plain string
    /// comparison is exact. The interval is half-open, so a slot ending at
    /// 10:00 does not cover 10:00:00.
    pub fn covers(&self, day: &str, time: &str) -> bool {
        if self.day != day {
            return false;
        }
        if self.to_time == MIDNIGHT {
            self.from_time.as_str() <= time
        } else {
            self.from_time.as_str() <= time && time < self.to_time.as_str()
        }
    }
}

/// A clinic room and its weekly schedule, kept sorted by (day, fromTime).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub number: String,
    pub schedule: Vec<ScheduleEntry>,
}

/// Doctor identity accepted from a schedule-change request. Unknown extra
/// fields are rejected so nothing beyond the pair can leak into a persisted
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoctorRef {
    pub name: String,
    pub specialty: String,
}

/// One schedule-change command: assign or update a slot when `doctor` is
/// set, clear it when absent. `original_*` name the time range the slot had
/// before an edit that moves it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotChange {
    pub room: Option<String>,
    pub day: Option<String>,
    pub from_time: Option<String>,
    pub to_time: Option<String>,
    pub doctor: Option<DoctorRef>,
    pub original_from_time: Option<String>,
    pub original_to_time: Option<String>,
}

/// Answer of the live occupancy endpoint: who is in the room right now and
/// for which slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupant {
    pub name: String,
    pub specialty: String,
    pub from_time: String,
    pub to_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, from: &str, to: &str) -> ScheduleEntry {
        ScheduleEntry {
            day: day.to_string(),
            from_time: from.to_string(),
            to_time: to.to_string(),
            name: "Dr. Adams".to_string(),
            specialty: "Cardiology".to_string(),
        }
    }

    #[test]
    fn test_covers_inside_interval() {
        let e = entry("Monday", "09:00", "10:00");
        assert!(e.covers("Monday", "09:00:00"));
        assert!(e.covers("Monday", "09:30:15"));
        assert!(e.covers("Monday", "09:59:59"));
    }

    #[test]
    fn test_covers_is_half_open() {
        let e = entry("Monday", "09:00", "10:00");
        assert!(!e.covers("Monday", "10:00:00"));
        assert!(!e.covers("Monday", "08:59:59"));
    }

    #[test]
    fn test_covers_checks_day() {
        let e = entry("Monday", "09:00", "10:00");
        assert!(!e.covers("Tuesday", "09:30:00"));
    }

    #[test]
    fn test_covers_midnight_sentinel_runs_to_end_of_day() {
        let e = entry("Friday", "22:00", "00:00");
        assert!(e.covers("Friday", "22:00:00"));
        assert!(e.covers("Friday", "23:59:59"));
        assert!(!e.covers("Friday", "21:59:59"));
        assert!(!e.covers("Saturday", "00:30:00"));
    }

    #[test]
    fn test_entry_json_uses_camel_case() {
        let e = entry("Monday", "09:00", "10:00");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["fromTime"], "09:00");
        assert_eq!(json["toTime"], "10:00");
    }

    #[test]
    fn test_doctor_ref_rejects_extra_fields() {
        let strict: Result<DoctorRef, _> =
            serde_json::from_str(r#"{"name":"Dr. A","specialty":"ENT","admin":true}"#);
        assert!(strict.is_err());
    }

    #[test]
    fn test_slot_change_tolerates_missing_fields() {
        let change: SlotChange = serde_json::from_str(r#"{"room":"3"}"#).unwrap();
        assert_eq!(change.room.as_deref(), Some("3"));
        assert!(change.day.is_none());
        assert!(change.doctor.is_none());
    }
}
