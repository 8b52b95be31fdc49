use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

use revmetrics::util::time::{
    from_epoch_ms, local_offset, most_recent_monday, on_or_after, time_to_merge_secs,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
    local_offset().with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// 2026-08-03 is a Monday; 08-07 Friday, 08-08 Saturday, 08-09 Sunday,
// 08-10 Monday, 08-14 Friday.

#[test]
fn test_weekday_span_no_adjustment() {
    let created = at(2026, 8, 3, 9, 0); // Monday 09:00
    let updated = at(2026, 8, 7, 17, 0); // Friday 17:00
    assert_eq!(time_to_merge_secs(&created, &updated), 374_400);
}

#[test]
fn test_single_weekend_subtracted() {
    let created = at(2026, 8, 7, 17, 0); // Friday 17:00
    let updated = at(2026, 8, 10, 9, 0); // Monday 09:00
    // Raw 230,400s minus Saturday and Sunday.
    assert_eq!(time_to_merge_secs(&created, &updated), 230_400 - 172_800);
}

#[test]
fn test_two_weekends_subtracted() {
    let created = at(2026, 8, 3, 9, 0); // Monday
    let updated = at(2026, 8, 14, 17, 0); // Friday the following week
    let raw = updated.timestamp() - created.timestamp();
    assert_eq!(time_to_merge_secs(&created, &updated), raw - 2 * 172_800);
}

#[test]
fn test_created_on_saturday_skips_adjustment() {
    let created = at(2026, 8, 8, 12, 0); // Saturday
    let updated = at(2026, 8, 10, 9, 0); // Monday
    let raw = updated.timestamp() - created.timestamp();
    assert_eq!(time_to_merge_secs(&created, &updated), raw);
}

#[test]
fn test_updated_on_sunday_skips_adjustment() {
    let created = at(2026, 8, 7, 17, 0); // Friday
    let updated = at(2026, 8, 9, 12, 0); // Sunday
    let raw = updated.timestamp() - created.timestamp();
    assert_eq!(time_to_merge_secs(&created, &updated), raw);
}

#[test]
fn test_same_instant_is_zero() {
    let ts = at(2026, 8, 5, 10, 30);
    assert_eq!(time_to_merge_secs(&ts, &ts), 0);
}

#[test]
fn test_most_recent_monday_from_wednesday() {
    assert_eq!(most_recent_monday(date(2026, 8, 5)), date(2026, 8, 3));
}

#[test]
fn test_most_recent_monday_from_monday_is_itself() {
    assert_eq!(most_recent_monday(date(2026, 8, 3)), date(2026, 8, 3));
}

#[test]
fn test_most_recent_monday_from_sunday_goes_back() {
    assert_eq!(most_recent_monday(date(2026, 8, 9)), date(2026, 8, 3));
}

#[test]
fn test_epoch_ms_lands_at_local_offset() {
    let ts = from_epoch_ms(0).unwrap();
    assert_eq!(ts.to_rfc3339(), "1970-01-01T09:00:00+09:00");
}

#[test]
fn test_epoch_ms_roundtrip() {
    // 2026-08-03 09:00 +09:00
    let ts = from_epoch_ms(1_785_715_200_000).unwrap();
    assert_eq!(ts, at(2026, 8, 3, 9, 0));
}

#[test]
fn test_on_or_after_uses_local_date() {
    let start = date(2026, 8, 3);
    assert!(on_or_after(&at(2026, 8, 3, 0, 0), start));
    assert!(on_or_after(&at(2026, 8, 4, 12, 0), start));
    assert!(!on_or_after(&at(2026, 8, 2, 23, 59), start));
}
