#![doc = include_str!("../README.md")]

use std::fmt;

use chrono::{Datelike, Months, NaiveDate, Weekday};

/// Number of week rows in a month grid.
pub const ROW_COUNT: usize = 6;

/// Number of weekday columns in a month grid.
pub const COLUMN_COUNT: usize = 7;

/// Get the column a weekday is displayed in for a given start of week.
///
/// ```
/// use chrono::Weekday;
/// use month_grid::column_of;
///
/// assert_eq!(column_of(Weekday::Mon, Weekday::Mon), 0);
/// assert_eq!(column_of(Weekday::Thu, Weekday::Sun), 4);
/// assert_eq!(column_of(Weekday::Sat, Weekday::Sun), 6);
/// ```
pub fn column_of(weekday: Weekday, week_start: Weekday) -> usize {
    let day = weekday.num_days_from_monday();
    let start = week_start.num_days_from_monday();
    ((day + 7 - start) % 7) as usize
}

/// Get the chronological week in which the first element is the given
/// weekday.
///
/// ```
/// use chrono::Weekday::*;
/// use month_grid::week_from;
///
/// assert_eq!(week_from(Mon), [Mon, Tue, Wed, Thu, Fri, Sat, Sun]);
/// assert_eq!(week_from(Sat), [Sat, Sun, Mon, Tue, Wed, Thu, Fri]);
/// ```
pub fn week_from(start: Weekday) -> [Weekday; 7] {
    let mut day = start;

    std::array::from_fn(|_| {
        let curr = day;
        day = day.succ();
        curr
    })
}

/// Count number of days in the month containing the given date.
///
/// ```
/// use chrono::NaiveDate;
/// use month_grid::days_in_month;
///
/// let day = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
/// assert_eq!(days_in_month(day), 29);
///
/// let day = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
/// assert_eq!(days_in_month(day), 28);
/// ```
pub fn days_in_month(date: NaiveDate) -> u32 {
    let Some(date_next_month) = date.checked_add_months(Months::new(1)) else {
        // December of last supported year
        return 31;
    };

    let first_this_month = date
        .with_day(1)
        .expect("first of the month should always exist");

    let first_next_month = date_next_month
        .with_day(1)
        .expect("first of the month should always exist");

    (first_next_month - first_this_month)
        .num_days()
        .try_into()
        .expect("time not monotonic while comparing dates")
}

/// The month a cell of a [`MonthGrid`] actually belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CellOrigin {
    /// Leading cell borrowed from the end of the previous month.
    Previous,
    /// Cell holding one of the displayed month's own days.
    Current,
    /// Trailing cell borrowed from the start of the next month.
    Next,
}

/// One calendar month laid out as a fixed 6x7 grid of day numbers.
///
/// The month's own days appear in ascending row-major order. Cells before
/// day 1 hold the previous month's trailing days and cells after the last
/// day hold the next month's leading days, so that each row reads
/// chronologically from left to right. A cell is 0 only when the calendar
/// range ends inside the grid.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct MonthGrid {
    days: [[u32; COLUMN_COUNT]; ROW_COUNT],
    first_column: usize,
    day_count: u32,
}

impl MonthGrid {
    const fn empty() -> Self {
        Self {
            days: [[0; COLUMN_COUNT]; ROW_COUNT],
            first_column: 0,
            day_count: 0,
        }
    }

    /// Build the grid for a single month.
    ///
    /// ```
    /// use chrono::Weekday;
    /// use month_grid::MonthGrid;
    ///
    /// let grid = MonthGrid::build(2024, 2, Weekday::Sun);
    /// assert_eq!(grid.row(0), [28, 29, 30, 31, 1, 2, 3]);
    /// assert_eq!(grid.row(4), [25, 26, 27, 28, 29, 1, 2]);
    /// assert_eq!(grid.row(5), [3, 4, 5, 6, 7, 8, 9]);
    /// ```
    pub fn build(year: i32, month: u32, week_start: Weekday) -> Self {
        assert!((1..=12).contains(&month));

        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .expect("year is out of the supported range");

        let mut grid = Self::empty();
        grid.fill_own_days(first, week_start);
        grid.fill_edges(first, week_start);
        grid
    }

    /// Build the grids of all twelve months of a year in a single pass over
    /// its days. The result is identical to calling [`MonthGrid::build`]
    /// once per month.
    ///
    /// ```
    /// use chrono::Weekday;
    /// use month_grid::MonthGrid;
    ///
    /// let year = MonthGrid::build_year(2024, Weekday::Mon);
    /// assert_eq!(year[1], MonthGrid::build(2024, 2, Weekday::Mon));
    /// assert_eq!(year[11], MonthGrid::build(2024, 12, Weekday::Mon));
    /// ```
    pub fn build_year(year: i32, week_start: Weekday) -> [Self; 12] {
        let mut grids = [Self::empty(); 12];

        let mut day = NaiveDate::from_ymd_opt(year, 1, 1)
            .expect("year is out of the supported range");
        let mut row = 0;

        while day.year() == year {
            let col = column_of(day.weekday(), week_start);
            grids[day.month0() as usize].days[row][col] = day.day();

            if col + 1 == COLUMN_COUNT {
                row += 1;
            }

            let Some(next) = day.succ_opt() else { break };

            if next.day() == 1 {
                row = 0; // new month
            }

            day = next;
        }

        for (month0, grid) in grids.iter_mut().enumerate() {
            let first = NaiveDate::from_ymd_opt(year, month0 as u32 + 1, 1)
                .expect("first of the month should always exist");

            grid.fill_edges(first, week_start);
        }

        grids
    }

    /// Place the month's own days, starting a new row each time the weekday
    /// column wraps past the last slot.
    fn fill_own_days(&mut self, first: NaiveDate, week_start: Weekday) {
        let mut day = first;
        let mut row = 0;

        while day.month() == first.month() {
            let col = column_of(day.weekday(), week_start);
            self.days[row][col] = day.day();

            if col + 1 == COLUMN_COUNT {
                row += 1;
            }

            let Some(next) = day.succ_opt() else { break };
            day = next;
        }
    }

    /// Borrow day numbers from the adjacent months into the cells before
    /// day 1 and after the last day of the month.
    fn fill_edges(&mut self, first: NaiveDate, week_start: Weekday) {
        self.first_column = column_of(first.weekday(), week_start);
        self.day_count = days_in_month(first);

        let mut day = first.pred_opt();

        for col in (0..self.first_column).rev() {
            let Some(prev) = day else { break };
            self.days[0][col] = prev.day();
            day = prev.pred_opt();
        }

        if let Some(next) = first.checked_add_months(Months::new(1)) {
            let used = self.first_column + self.day_count as usize;
            self.fill_end(next, used / COLUMN_COUNT, week_start);
        }
    }

    fn fill_end(&mut self, mut day: NaiveDate, mut row: usize, week_start: Weekday) {
        while row < ROW_COUNT {
            let col = column_of(day.weekday(), week_start);
            self.days[row][col] = day.day();

            if col + 1 == COLUMN_COUNT {
                row += 1;
            }

            let Some(next) = day.succ_opt() else { break };
            day = next;
        }
    }

    /// Get the day number displayed in a cell.
    ///
    /// ```
    /// use chrono::Weekday;
    /// use month_grid::MonthGrid;
    ///
    /// let grid = MonthGrid::build(2024, 2, Weekday::Sun);
    /// assert_eq!(grid.day(0, 4), 1);
    /// assert_eq!(grid.day(0, 0), 28);
    /// ```
    pub fn day(&self, row: usize, column: usize) -> u32 {
        assert!(row < ROW_COUNT);
        assert!(column < COLUMN_COUNT);
        self.days[row][column]
    }

    /// Get a whole week row of day numbers.
    ///
    /// ```
    /// use chrono::Weekday;
    /// use month_grid::MonthGrid;
    ///
    /// let grid = MonthGrid::build(2024, 2, Weekday::Mon);
    /// assert_eq!(grid.row(0), [29, 30, 31, 1, 2, 3, 4]);
    /// ```
    pub fn row(&self, row: usize) -> [u32; COLUMN_COUNT] {
        assert!(row < ROW_COUNT);
        self.days[row]
    }

    /// Iterate over the week rows of this grid in display order.
    ///
    /// ```
    /// use chrono::Weekday;
    /// use month_grid::MonthGrid;
    ///
    /// let grid = MonthGrid::build(2024, 2, Weekday::Sun);
    /// assert_eq!(grid.rows().count(), 6);
    /// ```
    pub fn rows(&self) -> impl Iterator<Item = &[u32; COLUMN_COUNT]> + '_ {
        self.days.iter()
    }

    /// Get the column holding day 1 of the displayed month.
    ///
    /// ```
    /// use chrono::Weekday;
    /// use month_grid::MonthGrid;
    ///
    /// // February 1st, 2024 is a Thursday
    /// let grid = MonthGrid::build(2024, 2, Weekday::Sun);
    /// assert_eq!(grid.first_column(), 4);
    /// ```
    pub fn first_column(&self) -> usize {
        self.first_column
    }

    /// Count number of days of the displayed month.
    ///
    /// ```
    /// use chrono::Weekday;
    /// use month_grid::MonthGrid;
    ///
    /// let grid = MonthGrid::build(2024, 2, Weekday::Sun);
    /// assert_eq!(grid.day_count(), 29);
    /// ```
    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    /// Get the row holding the given day of the displayed month, if it is a
    /// valid day number for this month.
    ///
    /// ```
    /// use chrono::Weekday;
    /// use month_grid::MonthGrid;
    ///
    /// let grid = MonthGrid::build(2024, 2, Weekday::Sun);
    /// assert_eq!(grid.week_row_of(1), Some(0));
    /// assert_eq!(grid.week_row_of(29), Some(4));
    /// assert_eq!(grid.week_row_of(30), None);
    /// ```
    pub fn week_row_of(&self, day: u32) -> Option<usize> {
        if !(1..=self.day_count).contains(&day) {
            return None;
        }

        Some((self.first_column + day as usize - 1) / COLUMN_COUNT)
    }

    /// Get the month a cell's day number actually belongs to.
    ///
    /// ```
    /// use chrono::Weekday;
    /// use month_grid::{CellOrigin, MonthGrid};
    ///
    /// let grid = MonthGrid::build(2024, 2, Weekday::Sun);
    /// assert_eq!(grid.origin(0, 0), CellOrigin::Previous);
    /// assert_eq!(grid.origin(0, 4), CellOrigin::Current);
    /// assert_eq!(grid.origin(4, 4), CellOrigin::Current);
    /// assert_eq!(grid.origin(4, 5), CellOrigin::Next);
    /// ```
    pub fn origin(&self, row: usize, column: usize) -> CellOrigin {
        assert!(row < ROW_COUNT);
        assert!(column < COLUMN_COUNT);
        let index = row * COLUMN_COUNT + column;

        if index < self.first_column {
            CellOrigin::Previous
        } else if index < self.first_column + self.day_count as usize {
            CellOrigin::Current
        } else {
            CellOrigin::Next
        }
    }
}

impl fmt::Debug for MonthGrid {
    /// ```
    /// use chrono::Weekday;
    /// use month_grid::MonthGrid;
    ///
    /// let grid = MonthGrid::build(2024, 2, Weekday::Sun);
    /// assert!(format!("{grid:?}").starts_with("[[28, 29, 30, 31, 1, 2, 3]"));
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.days.iter()).finish()
    }
}
