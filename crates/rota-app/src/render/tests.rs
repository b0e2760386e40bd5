use chrono::{NaiveDate, TimeZone, Utc};
use rota_core::types::{
    ComplianceWarning, Member, Shift, ShiftStatus, WarningSeverity,
};
use uuid::Uuid;

use super::*;

fn shift(day: u32, start: u32, end: u32, user_id: Option<Uuid>) -> Shift {
    Shift {
        id: Uuid::new_v4(),
        start_time: Utc.with_ymd_and_hms(2025, 1, day, start, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2025, 1, day, end, 0, 0).unwrap(),
        status: ShiftStatus::Published,
        user_id,
        location_id: None,
        color: None,
        break_minutes: None,
        compliance_warnings: Vec::new(),
    }
}

fn sample() -> (RosterSnapshot, Uuid) {
    let alice = Uuid::new_v4();
    let mut monday = shift(13, 9, 17, Some(alice));
    monday.break_minutes = Some(30);
    let mut tuesday = shift(14, 10, 12, None);
    tuesday.compliance_warnings.push(ComplianceWarning {
        severity: WarningSeverity::Error,
        message: "No qualified staff".to_string(),
    });
    let snapshot = RosterSnapshot {
        reference: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        shifts: vec![monday, tuesday, shift(22, 9, 17, Some(alice))],
        members: vec![Member {
            user_id: alice,
            display_name: "Alice".to_string(),
            role: Some("barista".to_string()),
        }],
    };
    (snapshot, alice)
}

fn render(snapshot: &RosterSnapshot) -> String {
    render_roster(
        snapshot,
        chrono_tz::UTC,
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        &GridMetrics::default(),
    )
}

#[test]
fn test_title_and_today_marker() {
    let (snapshot, _) = sample();
    let out = render(&snapshot);
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("Roster 13 Jan – 19 Jan 2025 (UTC)"));
    assert!(out.contains("Wed 15*"));
    assert!(!out.contains("Tue 14*"));
}

#[test]
fn test_staff_rows_and_totals() {
    let (snapshot, _) = sample();
    let out = render(&snapshot);
    let alice = out.lines().find(|l| l.starts_with("Alice")).unwrap();
    assert!(alice.contains("09:00-17:00"));
    assert!(alice.ends_with("7.5h"));
    let unassigned = out.lines().find(|l| l.starts_with("Unassigned")).unwrap();
    assert!(unassigned.contains("10:00-12:00!"));
    assert!(unassigned.ends_with("2.0h"));
}

#[test]
fn test_day_layout_section() {
    let (snapshot, _) = sample();
    let out = render(&snapshot);
    assert!(out.contains("Mon 13 (1 shifts)"));
    assert!(out.contains("09:00-17:00  top  180px  height  480px  z1  Alice [published]"));
    assert!(out.contains("10:00-12:00  top  240px  height  120px  z1  Unassigned [published]"));
    // Next week's shift is not rendered
    assert!(!out.contains("Wed 22"));
}

#[test]
fn test_multiple_shifts_in_cell_are_counted() {
    let (mut snapshot, alice) = sample();
    snapshot.shifts.push(shift(13, 18, 20, Some(alice)));
    let out = render(&snapshot);
    let row = out.lines().find(|l| l.starts_with("Alice")).unwrap();
    assert!(row.contains("09:00-17:00+1"));
    assert!(out.contains("Mon 13 (2 shifts)"));
}

#[test]
fn test_empty_week_still_lists_staff() {
    let (mut snapshot, _) = sample();
    snapshot.shifts.clear();
    let out = render(&snapshot);
    assert!(out.lines().any(|l| l.starts_with("Alice") && l.ends_with("0.0h")));
    assert!(out.lines().any(|l| l.starts_with("Unassigned")));
    assert!(!out.contains("shifts)"));
}
