use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::storage::JsonCollection;

use super::conflict::has_conflict;
use super::time;
use super::types::{Room, ScheduleEntry, SlotChange};

/// The room collection plus every rule that governs writing to it. All
/// methods read the file, work on the decoded rooms and write the whole
/// collection back; callers serialize access (see `web::AppState`).
pub struct RoomSchedules {
    collection: JsonCollection<Room>,
    days: Vec<String>,
}

impl RoomSchedules {
    pub fn new(collection: JsonCollection<Room>, days: Vec<String>) -> Self {
        RoomSchedules { collection, days }
    }

    pub fn list(&self) -> Result<Vec<Room>> {
        self.collection.load()
    }

    /// Applies one schedule change and returns the updated room.
    ///
    /// With a doctor attached this assigns or edits a slot; without one it
    /// clears the addressed slot. Validation and the conflict check run
    /// before anything is written, so a rejected change leaves the file
    /// exactly as it was. A room seen for the first time is created on the
    /// way through.
    pub fn upsert_slot(&self, change: &SlotChange) -> Result<Room> {
        let number = required(&change.room, "room")?;
        let day = required(&change.day, "day")?;
        let from_raw = required(&change.from_time, "fromTime")?;
        let to_raw = required(&change.to_time, "toTime")?;

        time::check_day(day, &self.days)?;
        let from = time::normalize_time(from_raw)?;
        let to = time::normalize_time(to_raw)?;
        time::check_range(&from, &to)?;

        // An edit that moves a slot names its previous range; both halves
        // come together or not at all.
        let original = match (&change.original_from_time, &change.original_to_time) {
            (Some(of), Some(ot)) => Some((time::normalize_time(of)?, time::normalize_time(ot)?)),
            (None, None) => None,
            _ => {
                return Err(Error::Validation(
                    "originalFromTime and originalToTime must be supplied together".to_string(),
                ))
            }
        };

        let mut rooms = self.collection.load()?;
        let room_idx = match rooms.iter().position(|r| r.number == number) {
            Some(i) => i,
            None => {
                rooms.push(Room {
                    number: number.to_string(),
                    schedule: Vec::new(),
                });
                rooms.len() - 1
            }
        };

        let (target_from, target_to) = match &original {
            Some((of, ot)) => (of.as_str(), ot.as_str()),
            None => (from.as_str(), to.as_str()),
        };
        let target = rooms[room_idx]
            .schedule
            .iter()
            .position(|e| e.day == day && e.from_time == target_from && e.to_time == target_to);

        match &change.doctor {
            Some(doctor) => {
                if has_conflict(&rooms[room_idx].schedule, day, &from, &to, target) {
                    warn!("conflict in room {number}: {day} {from}-{to} is already booked");
                    return Err(Error::Conflict(format!(
                        "room {number} is already booked on {day} between {from} and {to}"
                    )));
                }
                let entry = ScheduleEntry {
                    day: day.to_string(),
                    from_time: from.clone(),
                    to_time: to.clone(),
                    name: doctor.name.clone(),
                    specialty: doctor.specialty.clone(),
                };
                match target {
                    Some(i) => rooms[room_idx].schedule[i] = entry,
                    None => rooms[room_idx].schedule.push(entry),
                }
                info!(
                    "room {number}: {day} {from}-{to} assigned to {} ({})",
                    doctor.name, doctor.specialty
                );
            }
            None => {
                // Clearing always addresses the carried range, never the
                // original one.
                let Some(i) = rooms[room_idx]
                    .schedule
                    .iter()
                    .position(|e| e.day == day && e.from_time == from && e.to_time == to)
                else {
                    return Err(Error::NotFound(format!(
                        "no {day} {from}-{to} slot in room {number}"
                    )));
                };
                rooms[room_idx].schedule.remove(i);
                info!("room {number}: cleared {day} {from}-{to}");
            }
        }

        sort_schedule(&mut rooms[room_idx].schedule);
        self.collection.save(&rooms)?;
        Ok(rooms[room_idx].clone())
    }

    /// Resolves which entry covers the given moment in the given room. When
    /// stored data ever carries overlapping entries, the first one in
    /// schedule order wins.
    pub fn occupant_now(&self, number: &str, day: &str, time: &str) -> Result<ScheduleEntry> {
        let rooms = self.collection.load()?;
        let room = rooms
            .iter()
            .find(|r| r.number == number)
            .ok_or_else(|| Error::NotFound(format!("room {number} has no schedule")))?;
        room.schedule
            .iter()
            .find(|e| e.covers(day, time))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("room {number} is not occupied right now")))
    }
}

/// Keeps a room's schedule ordered by (day, fromTime), both compared as
/// plain strings.
fn sort_schedule(schedule: &mut [ScheduleEntry]) {
    schedule.sort_by(|a, b| {
        (a.day.as_str(), a.from_time.as_str()).cmp(&(b.day.as_str(), b.from_time.as_str()))
    });
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::missing_field(name)),
    }
}
