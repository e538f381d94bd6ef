use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};
use month_grid::MonthGrid;

use crate::error::{Error, Result};

/// Month layouts built so far for a single year.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YearCache([Option<MonthGrid>; 12]);

impl YearCache {
    const fn new() -> Self {
        Self([None; 12])
    }

    /// Get the grid of a month of this year, if it was built already.
    pub fn month(&self, month: u32) -> Option<&MonthGrid> {
        assert!((1..=12).contains(&month));
        self.0[month as usize - 1].as_ref()
    }

    /// Count number of months built for this year.
    pub fn built_count(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Memoized store of month layouts, scoped to one component instance.
///
/// Each (year, month) grid is built at most once and never evicted. The
/// cache is single-owner state and provides no internal synchronization.
///
/// ```
/// use calendar_view::CalendarCache;
/// use chrono::Weekday;
///
/// let mut cache = CalendarCache::new(Weekday::Sun);
/// let row = cache.month(2024, 2)?.row(0);
/// assert_eq!(row, [28, 29, 30, 31, 1, 2, 3]);
///
/// assert!(cache.is_cached(2024, 2));
/// assert!(!cache.is_cached(2024, 3));
/// assert!(cache.month(2024, 13).is_err());
/// # Ok::<(), calendar_view::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct CalendarCache {
    week_start: Weekday,
    years: HashMap<i32, YearCache>,
}

impl CalendarCache {
    /// Create an empty cache building grids with the given start of week.
    pub fn new(week_start: Weekday) -> Self {
        Self { week_start, years: HashMap::new() }
    }

    /// Get the start of week used for every grid of this cache.
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Get the grid for a month, building and storing it on first access.
    ///
    /// Validation happens before anything is inserted, so a failed call
    /// leaves no partial entry behind.
    pub fn month(&mut self, year: i32, month: u32) -> Result<&MonthGrid> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(Error::InvalidDate { year, month });
        }

        let week_start = self.week_start;

        let slot =
            &mut self.years.entry(year).or_insert_with(YearCache::new).0[month as usize - 1];

        Ok(slot.get_or_insert_with(|| MonthGrid::build(year, month, week_start)))
    }

    /// Eagerly build all twelve months of a year in a single pass over its
    /// days. Months already built lazily are kept as they are; the result
    /// is the same either way.
    ///
    /// ```
    /// use calendar_view::CalendarCache;
    /// use chrono::Weekday;
    ///
    /// let mut cache = CalendarCache::new(Weekday::Mon);
    /// assert_eq!(cache.ensure_year(2024)?.built_count(), 12);
    /// # Ok::<(), calendar_view::Error>(())
    /// ```
    pub fn ensure_year(&mut self, year: i32) -> Result<&YearCache> {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(Error::InvalidDate { year, month: 1 });
        }

        let week_start = self.week_start;
        let entry = self.years.entry(year).or_insert_with(YearCache::new);

        if entry.0.iter().any(Option::is_none) {
            let grids = MonthGrid::build_year(year, week_start);

            for (slot, grid) in entry.0.iter_mut().zip(grids) {
                slot.get_or_insert(grid);
            }
        }

        Ok(entry)
    }

    /// Check whether the grid for a month was built already.
    pub fn is_cached(&self, year: i32, month: u32) -> bool {
        (1..=12).contains(&month)
            && self
                .years
                .get(&year)
                .is_some_and(|cached| cached.month(month).is_some())
    }
}
