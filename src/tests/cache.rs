use chrono::Weekday;
use month_grid::MonthGrid;

use crate::cache::CalendarCache;
use crate::error::Error;

#[test]
fn lazy_and_eager_population_agree() {
    for year in [2020, 2023, 2024, 1999] {
        for week_start in [Weekday::Sun, Weekday::Mon] {
            let mut lazy = CalendarCache::new(week_start);
            let mut eager = CalendarCache::new(week_start);
            eager.ensure_year(year).unwrap();

            for month in 1..=12 {
                assert_eq!(
                    lazy.month(year, month).unwrap(),
                    eager.month(year, month).unwrap(),
                    "strategies diverge for {year}-{month:02} starting {week_start}",
                );
            }
        }
    }
}

#[test]
fn months_are_built_once_and_never_replaced() {
    let mut cache = CalendarCache::new(Weekday::Sun);
    assert!(!cache.is_cached(2024, 2));

    let first = *cache.month(2024, 2).unwrap();
    assert!(cache.is_cached(2024, 2));
    assert_eq!(*cache.month(2024, 2).unwrap(), first);

    // Eager population keeps the entry that was already built.
    cache.ensure_year(2024).unwrap();
    assert_eq!(*cache.month(2024, 2).unwrap(), first);

    for month in 1..=12 {
        assert!(cache.is_cached(2024, month));
    }
}

#[test]
fn eager_population_is_idempotent() {
    let mut cache = CalendarCache::new(Weekday::Mon);
    assert_eq!(cache.ensure_year(2025).unwrap().built_count(), 12);
    assert_eq!(cache.ensure_year(2025).unwrap().built_count(), 12);
}

#[test]
fn cached_grids_match_direct_builds() {
    let mut cache = CalendarCache::new(Weekday::Mon);

    assert_eq!(
        *cache.month(2024, 2).unwrap(),
        MonthGrid::build(2024, 2, Weekday::Mon),
    );
}

#[test]
fn invalid_months_are_rejected_before_insertion() {
    let mut cache = CalendarCache::new(Weekday::Sun);

    assert_eq!(
        cache.month(2024, 0).unwrap_err(),
        Error::InvalidDate { year: 2024, month: 0 },
    );

    assert_eq!(
        cache.month(2024, 13).unwrap_err(),
        Error::InvalidDate { year: 2024, month: 13 },
    );

    // Years outside of the supported calendar range fail the same way.
    assert!(matches!(
        cache.month(1_000_000, 1),
        Err(Error::InvalidDate { .. }),
    ));

    // A failed lookup must not leave a partial entry behind.
    assert!(!cache.is_cached(2024, 1));
}
