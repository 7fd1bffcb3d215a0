//! Overlap detection for room schedules. Intervals are half-open, so two
//! slots sharing only a boundary do not conflict.

use super::time::MIDNIGHT;
use super::types::ScheduleEntry;

/// Comparison key for interval ends. The midnight sentinel means end of day,
/// which has to sort after every real HH:MM.
fn end_key(to: &str) -> &str {
    if to == MIDNIGHT {
        "24:00"
    } else {
        to
    }
}

/// True iff the candidate `[from, to)` on `day` overlaps any same-day entry,
/// skipping the one at `exclude` (the slot an edit is about to replace).
/// Two intervals overlap iff start1 < end2 AND start2 < end1.
pub fn has_conflict(
    entries: &[ScheduleEntry],
    day: &str,
    from: &str,
    to: &str,
    exclude: Option<usize>,
) -> bool {
    let to = end_key(to);
    entries.iter().enumerate().any(|(i, entry)| {
        if Some(i) == exclude || entry.day != day {
            return false;
        }
        from < end_key(&entry.to_time) && entry.from_time.as_str() < to
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, from: &str, to: &str) -> ScheduleEntry {
        ScheduleEntry {
            day: day.to_string(),
            from_time: from.to_string(),
            to_time: to.to_string(),
            name: "Dr. Baker".to_string(),
            specialty: "Dermatology".to_string(),
        }
    }

    #[test]
    fn test_empty_schedule_never_conflicts() {
        assert!(!has_conflict(&[], "Monday", "09:00", "10:00", None));
    }

    #[test]
    fn test_identical_interval_conflicts() {
        let entries = vec![entry("Monday", "09:00", "10:00")];
        assert!(has_conflict(&entries, "Monday", "09:00", "10:00", None));
    }

    #[test]
    fn test_partial_overlap_conflicts_both_ways() {
        let entries = vec![entry("Monday", "09:00", "10:00")];
        assert!(has_conflict(&entries, "Monday", "09:30", "10:30", None));
        assert!(has_conflict(&entries, "Monday", "08:30", "09:30", None));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        // Each interval checked as candidate against the other as existing.
        let a_against_b = has_conflict(
            &[entry("Monday", "09:30", "10:30")],
            "Monday",
            "09:00",
            "10:00",
            None,
        );
        let b_against_a = has_conflict(
            &[entry("Monday", "09:00", "10:00")],
            "Monday",
            "09:30",
            "10:30",
            None,
        );
        assert!(a_against_b);
        assert_eq!(a_against_b, b_against_a);

        // Holds on the non-conflicting side too.
        let adjacent_fwd = has_conflict(
            &[entry("Monday", "10:00", "11:00")],
            "Monday",
            "09:00",
            "10:00",
            None,
        );
        let adjacent_rev = has_conflict(
            &[entry("Monday", "09:00", "10:00")],
            "Monday",
            "10:00",
            "11:00",
            None,
        );
        assert_eq!(adjacent_fwd, adjacent_rev);
        assert!(!adjacent_fwd);
    }

    #[test]
    fn test_containment_conflicts() {
        let entries = vec![entry("Monday", "09:00", "12:00")];
        assert!(has_conflict(&entries, "Monday", "10:00", "11:00", None));
        assert!(has_conflict(&entries, "Monday", "08:00", "13:00", None));
    }

    #[test]
    fn test_adjacent_intervals_do_not_conflict() {
        let entries = vec![entry("Monday", "09:00", "10:00")];
        assert!(!has_conflict(&entries, "Monday", "10:00", "11:00", None));
        assert!(!has_conflict(&entries, "Monday", "08:00", "09:00", None));
    }

    #[test]
    fn test_other_days_are_ignored() {
        let entries = vec![entry("Monday", "09:00", "10:00")];
        assert!(!has_conflict(&entries, "Tuesday", "09:00", "10:00", None));
    }

    #[test]
    fn test_excluded_entry_is_skipped() {
        let entries = vec![
            entry("Monday", "09:00", "10:00"),
            entry("Monday", "11:00", "12:00"),
        ];
        // Editing entry 0 onto its own old range is not a conflict.
        assert!(!has_conflict(&entries, "Monday", "09:00", "10:30", Some(0)));
        // But landing on entry 1 still is.
        assert!(has_conflict(&entries, "Monday", "09:00", "11:30", Some(0)));
    }

    #[test]
    fn test_midnight_sentinel_end_overlaps_later_slots() {
        let entries = vec![entry("Friday", "22:00", "00:00")];
        assert!(has_conflict(&entries, "Friday", "23:00", "23:30", None));
        assert!(has_conflict(&entries, "Friday", "23:30", "00:00", None));
        assert!(!has_conflict(&entries, "Friday", "21:00", "22:00", None));
    }

    #[test]
    fn test_candidate_with_sentinel_end() {
        let entries = vec![entry("Friday", "08:00", "09:00")];
        assert!(!has_conflict(&entries, "Friday", "22:00", "00:00", None));
        assert!(has_conflict(&entries, "Friday", "08:30", "00:00", None));
    }
}
