//! Tests for the booking conflict guard.

use chrono::NaiveDate;
use slot_engine::{
    find_orphaned_bookings, has_conflicting_bookings, Booking, BookingStatus, TimeOfDay,
    WindowRange,
};

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn booking(on: NaiveDate, at: &str, status: BookingStatus) -> Booking {
    Booking {
        provider_id: "p1".to_string(),
        date: on,
        requested_time: t(at),
        duration_minutes: 60,
        status,
    }
}

// 2026-03-12 is a Thursday; 2026-03-16 is the following Monday (day 1).
fn today() -> NaiveDate {
    date(2026, 3, 12)
}

fn monday() -> NaiveDate {
    date(2026, 3, 16)
}

#[test]
fn confirmed_booking_inside_range_conflicts() {
    let bookings = vec![booking(monday(), "10:00", BookingStatus::Confirmed)];

    assert!(has_conflicting_bookings(&bookings, 1, t("09:00"), t("17:00"), today()));
}

#[test]
fn pending_booking_counts() {
    let bookings = vec![booking(monday(), "10:00", BookingStatus::Pending)];

    assert!(has_conflicting_bookings(&bookings, 1, t("09:00"), t("17:00"), today()));
}

#[test]
fn cancelled_and_rejected_bookings_ignored() {
    let bookings = vec![
        booking(monday(), "10:00", BookingStatus::Cancelled),
        booking(monday(), "11:00", BookingStatus::Rejected),
    ];

    assert!(!has_conflicting_bookings(&bookings, 1, t("09:00"), t("17:00"), today()));
}

#[test]
fn past_booking_ignored() {
    // Monday 2026-03-09 is before "today"
    let bookings = vec![booking(date(2026, 3, 9), "10:00", BookingStatus::Confirmed)];

    assert!(!has_conflicting_bookings(&bookings, 1, t("09:00"), t("17:00"), today()));
}

#[test]
fn booking_on_other_weekday_ignored() {
    // Tuesday
    let bookings = vec![booking(date(2026, 3, 17), "10:00", BookingStatus::Confirmed)];

    assert!(!has_conflicting_bookings(&bookings, 1, t("09:00"), t("17:00"), today()));
}

#[test]
fn booking_at_range_end_is_outside() {
    // [09:00, 17:00) excludes 17:00
    let bookings = vec![booking(monday(), "17:00", BookingStatus::Confirmed)];

    assert!(!has_conflicting_bookings(&bookings, 1, t("09:00"), t("17:00"), today()));
    assert!(has_conflicting_bookings(&bookings, 1, t("17:00"), t("18:00"), today()));
}

#[test]
fn booking_today_is_future() {
    // 2026-03-12 is a Thursday (day 4)
    let bookings = vec![booking(today(), "10:00", BookingStatus::Confirmed)];

    assert!(has_conflicting_bookings(&bookings, 4, t("09:00"), t("17:00"), today()));
}

#[test]
fn shrinking_orphans_bookings_outside_new_range() {
    let old = WindowRange::new(1, t("09:00"), t("17:00")).unwrap();
    let new = WindowRange::new(1, t("09:00"), t("11:00")).unwrap();
    let bookings = vec![
        booking(monday(), "10:00", BookingStatus::Confirmed),
        booking(monday(), "12:00", BookingStatus::Confirmed),
    ];

    let orphaned = find_orphaned_bookings(&bookings, &old, Some(&new), today());

    assert_eq!(orphaned.len(), 1);
    assert_eq!(orphaned[0].requested_time, t("12:00"));
}

#[test]
fn growing_orphans_nothing() {
    let old = WindowRange::new(1, t("09:00"), t("12:00")).unwrap();
    let new = WindowRange::new(1, t("08:00"), t("17:00")).unwrap();
    let bookings = vec![booking(monday(), "10:00", BookingStatus::Confirmed)];

    assert!(find_orphaned_bookings(&bookings, &old, Some(&new), today()).is_empty());
}

#[test]
fn moving_day_orphans_everything_inside_old_range() {
    let old = WindowRange::new(1, t("09:00"), t("17:00")).unwrap();
    let new = WindowRange::new(2, t("09:00"), t("17:00")).unwrap();
    let bookings = vec![
        booking(monday(), "09:00", BookingStatus::Pending),
        booking(monday(), "16:00", BookingStatus::Confirmed),
    ];

    assert_eq!(find_orphaned_bookings(&bookings, &old, Some(&new), today()).len(), 2);
}

#[test]
fn removed_range_orphans_every_live_booking_inside_it() {
    let old = WindowRange::new(1, t("09:00"), t("17:00")).unwrap();
    let bookings = vec![
        booking(monday(), "10:00", BookingStatus::Confirmed),
        booking(monday(), "18:00", BookingStatus::Confirmed),
        booking(monday(), "11:00", BookingStatus::Cancelled),
    ];

    let orphaned = find_orphaned_bookings(&bookings, &old, None, today());

    assert_eq!(orphaned.len(), 1);
    assert_eq!(orphaned[0].requested_time, t("10:00"));
}
