use chrono::{NaiveDate, NaiveTime};

use crate::types::Slot;

/// First free slot whose date exactly matches the requested date. Bookings
/// are never matched to a slot on a different date, so a request for a day
/// without free capacity fails even when other days have free slots.
pub fn free_slot_for(date: NaiveDate, slots: &[Slot]) -> Option<&Slot> {
    slots.iter().find(|slot| slot.free && slot.date == date)
}

/// Length of a slot window in minutes. Negative when `start` is after `end`;
/// callers validating slot payloads reject that case.
pub fn window_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

#[cfg(test)]
mod test {
    use super::*;
    use uuid::Uuid;

    fn slot(date: NaiveDate, free: bool) -> Slot {
        Slot {
            id: Uuid::new_v4(),
            date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            zone: "Center".into(),
            service_type: "Deep cleaning".into(),
            free,
        }
    }

    #[test]
    fn picks_first_free_slot_on_the_requested_date() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let slots = vec![slot(date, false), slot(date, true), slot(date, true)];

        let found = free_slot_for(date, &slots).unwrap();
        assert_eq!(found.id, slots[1].id);
    }

    #[test]
    fn ignores_free_slots_on_other_dates() {
        let requested = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let other = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        let slots = vec![slot(other, true)];

        assert!(free_slot_for(requested, &slots).is_none());
    }

    #[test]
    fn no_free_slot_anywhere_matches_nothing() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let slots = vec![slot(date, false)];

        assert!(free_slot_for(date, &slots).is_none());
    }

    #[test_case::test_case(9, 0, 12, 0, 180 ; "three hour window")]
    #[test_case::test_case(9, 0, 9, 0, 0 ; "empty window")]
    #[test_case::test_case(12, 0, 9, 0, -180 ; "inverted window is negative")]
    fn window_minutes_is_end_minus_start(
        start_h: u32,
        start_m: u32,
        end_h: u32,
        end_m: u32,
        expected: i64,
    ) {
        let start = NaiveTime::from_hms_opt(start_h, start_m, 0).unwrap();
        let end = NaiveTime::from_hms_opt(end_h, end_m, 0).unwrap();
        assert_eq!(window_minutes(start, end), expected);
    }
}
