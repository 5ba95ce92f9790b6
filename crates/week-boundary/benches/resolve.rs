use std::hint::black_box;

use chrono::{FixedOffset, TimeZone, Utc, Weekday};
use criterion::{criterion_group, criterion_main, Criterion};
use week_boundary::{
    end_of_tz_week, parse_timezone, start_of_tz_week, start_of_week, Transition,
    TransitionTable,
};

fn bench_resolve(c: &mut Criterion) {
    let tz = parse_timezone("America/New_York").unwrap();
    let havana = parse_timezone("America/Havana").unwrap();
    let instant = Utc.with_ymd_and_hms(2026, 7, 15, 12, 0, 0).unwrap();
    let havana_gap_week = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

    // Three-hour gap at Monday midnight: worst case for the minute scan.
    let before = FixedOffset::east_opt(0).unwrap();
    let after = FixedOffset::east_opt(3 * 3600).unwrap();
    let at = Utc.with_ymd_and_hms(2026, 3, 9, 0, 0, 0).unwrap();
    let wide_gap =
        TransitionTable::new("Bench/WideGap", before, vec![Transition { at, offset: after }])
            .unwrap();
    let wide_gap_week = Utc.with_ymd_and_hms(2026, 3, 11, 12, 0, 0).unwrap();

    c.bench_function("start_of_week_fixed", |b| {
        b.iter(|| start_of_week(black_box(instant)))
    });
    c.bench_function("start_of_tz_week_new_york", |b| {
        b.iter(|| start_of_tz_week(black_box(&instant), &tz, Weekday::Mon))
    });
    c.bench_function("end_of_tz_week_new_york", |b| {
        b.iter(|| end_of_tz_week(black_box(&instant), &tz, Weekday::Mon))
    });
    c.bench_function("start_of_tz_week_havana_gap", |b| {
        b.iter(|| start_of_tz_week(black_box(&havana_gap_week), &havana, Weekday::Sun))
    });
    c.bench_function("start_of_tz_week_three_hour_gap", |b| {
        b.iter(|| start_of_tz_week(black_box(&wide_gap_week), &wide_gap, Weekday::Mon))
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
