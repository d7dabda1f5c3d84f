use super::*;

#[test]
fn xaf_groups_thousands() {
    assert_eq!(format_xaf(0.0), "0 XAF");
    assert_eq!(format_xaf(950.0), "950 XAF");
    assert_eq!(format_xaf(12_345.0), "12 345 XAF");
    assert_eq!(format_xaf(1_234_567.4), "1 234 567 XAF");
    assert_eq!(format_xaf(-5_000.0), "-5 000 XAF");
}

#[test]
fn minutes_label_rounds_seconds() {
    assert_eq!(minutes_label(420.0), "7 min");
    assert_eq!(minutes_label(95.0), "2 min");
}

#[test]
fn percent_label_scales_rate() {
    assert_eq!(percent_label(0.125), "12.5 %");
    assert_eq!(percent_label(0.0), "0.0 %");
}

#[test]
fn clock_label_slices_iso_timestamps() {
    assert_eq!(clock_label("2026-08-30T14:05:09.123Z"), "14:05:09");
    assert_eq!(clock_label("junk"), "junk");
}

#[test]
fn date_label_slices_iso_timestamps() {
    assert_eq!(date_label("2026-08-30T14:05:09Z"), "2026-08-30");
    assert_eq!(date_label("x"), "x");
}
