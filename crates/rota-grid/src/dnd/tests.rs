use std::sync::Mutex;

use chrono::{NaiveDate, TimeZone, Utc};
use rota_core::types::{Shift, ShiftStatus, StaffKey};
use uuid::Uuid;

use super::*;

#[derive(Debug)]
enum FakeError {
    Grid(GridError),
    Rejected,
}

impl From<GridError> for FakeError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

#[derive(Default)]
struct RecordingMover {
    calls: Mutex<Vec<Reassignment>>,
    reject: bool,
}

impl ShiftMover for RecordingMover {
    type Error = FakeError;

    async fn move_shift(&self, reassignment: Reassignment) -> Result<(), FakeError> {
        self.calls.lock().unwrap().push(reassignment);
        if self.reject {
            Err(FakeError::Rejected)
        } else {
            Ok(())
        }
    }
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

fn sample_shift() -> Shift {
    Shift {
        id: Uuid::new_v4(),
        start_time: Utc.with_ymd_and_hms(2025, 1, 13, 9, 30, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2025, 1, 13, 17, 0, 0).unwrap(),
        status: ShiftStatus::Published,
        user_id: Some(Uuid::new_v4()),
        location_id: None,
        color: None,
        break_minutes: None,
        compliance_warnings: Vec::new(),
    }
}

#[test]
fn test_day_zone_format() {
    let zone = DropZoneId::Day(date(15));
    assert_eq!(zone.to_string(), "day:2025-01-15");
    assert_eq!("day:2025-01-15".parse::<DropZoneId>().unwrap(), zone);
}

#[test]
fn test_staff_zone_with_uuid_parses() {
    let user = Uuid::new_v4();
    let id = format!("staff:{user}:2025-01-16");
    let zone: DropZoneId = id.parse().unwrap();
    assert_eq!(
        zone,
        DropZoneId::StaffDay {
            staff: StaffKey::User(user),
            date: date(16)
        }
    );
    assert_eq!(zone.to_string(), id);
}

#[test]
fn test_unassigned_staff_zone() {
    let zone: DropZoneId = "staff:unassigned:2025-01-17".parse().unwrap();
    assert_eq!(zone.date(), date(17));
    assert!(matches!(
        zone,
        DropZoneId::StaffDay {
            staff: StaffKey::Unassigned,
            ..
        }
    ));
}

#[test]
fn test_malformed_zones_are_rejected() {
    for raw in [
        "",
        "day",
        "day:2025-13-01",
        "week:2025-01-15",
        "staff:2025-01-15",
        "staff:nobody:2025-01-15",
        "staff:unassigned:yesterday",
    ] {
        assert!(
            matches!(raw.parse::<DropZoneId>(), Err(GridError::InvalidDropZone(_))),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn test_resolve_day_drop_keeps_assignee() {
    let id = Uuid::new_v4();
    let r = resolve_drop(id, DropZoneId::Day(date(18)));
    assert_eq!(r.shift_id, id);
    assert_eq!(r.date, date(18));
    assert_eq!(r.staff, None);
}

#[test]
fn test_apply_keeps_time_of_day_and_duration() {
    let shift = sample_shift();
    let r = resolve_drop(shift.id, DropZoneId::Day(date(16)));
    let moved = r.apply_to(&shift, chrono_tz::UTC).unwrap();
    assert_eq!(
        moved.start_time,
        Utc.with_ymd_and_hms(2025, 1, 16, 9, 30, 0).unwrap()
    );
    assert_eq!(moved.duration(), shift.duration());
    assert_eq!(moved.user_id, shift.user_id);
}

#[test]
fn test_apply_to_unassigned_clears_user() {
    let shift = sample_shift();
    let r = resolve_drop(
        shift.id,
        DropZoneId::StaffDay {
            staff: StaffKey::Unassigned,
            date: date(14),
        },
    );
    let moved = r.apply_to(&shift, chrono_tz::UTC).unwrap();
    assert_eq!(moved.user_id, None);
}

#[test_log::test(tokio::test)]
async fn test_handle_drop_calls_mover_once() {
    let mover = RecordingMover::default();
    let user = Uuid::new_v4();
    let shift_id = Uuid::new_v4();

    let result = handle_drop(&mover, shift_id, &format!("staff:{user}:2025-01-15"))
        .await
        .unwrap();

    let calls = mover.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], result);
    assert_eq!(result.staff, Some(StaffKey::User(user)));
}

#[test_log::test(tokio::test)]
async fn test_handle_drop_rejects_bad_zone_without_calling_mover() {
    let mover = RecordingMover::default();
    let result = handle_drop(&mover, Uuid::new_v4(), "nowhere").await;
    assert!(matches!(result, Err(FakeError::Grid(GridError::InvalidDropZone(_)))));
    assert!(mover.calls.lock().unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_handle_drop_propagates_mover_failure() {
    let mover = RecordingMover {
        reject: true,
        ..RecordingMover::default()
    };
    let result = handle_drop(&mover, Uuid::new_v4(), "day:2025-01-15").await;
    assert!(matches!(result, Err(FakeError::Rejected)));
    assert_eq!(mover.calls.lock().unwrap().len(), 1);
}
