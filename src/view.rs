use std::fmt;

use chrono::{Datelike, Local, Months, NaiveDate, Weekday};
use month_grid::{week_from, CellOrigin, MonthGrid, ROW_COUNT};

use crate::cache::CalendarCache;
use crate::date_key::DateKey;
use crate::error::Result;
use crate::selection::SelectionSet;

/// How many week rows of the grid the host is expected to display.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ViewType {
    /// All 6 week rows of the month.
    #[default]
    Month,
    /// The single row containing the highlighted day.
    Week,
}

/// Everything the rendering layer needs to draw one day cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellContext {
    pub row: usize,
    pub column: usize,
    /// Day number displayed in the cell, 0 for an empty cell.
    pub value: u32,
    /// The actual day the cell stands for. Edge cells resolve to the
    /// adjacent month; empty cells resolve to nothing.
    pub date: Option<DateKey>,
    pub is_selected: bool,
}

/// A template producing the content of a cell.
pub type CellTemplate = Box<dyn Fn(&CellContext) -> String>;

/// One weekday column of the grid.
pub struct Column {
    /// Header title, the first letter of the weekday by default.
    pub title: String,
    /// Template applied to the cells of this column only.
    pub template: Option<CellTemplate>,
}

/// The non-visual state of a calendar component: the month-layout cache,
/// the selection and the rules deciding what the rendering layer shows.
///
/// The displayed (highlighted) day follows the first selected key when
/// there is one and falls back to today otherwise.
///
/// ```
/// use calendar_view::{CalendarView, ViewType};
/// use chrono::{NaiveDate, Weekday};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let mut view = CalendarView::new(Weekday::Sun).with_view_type(ViewType::Week);
///
/// // Nothing selected: the visible week is the one containing today.
/// assert_eq!(view.visible_rows_on(today)?, [0]);
///
/// view.selection_mut().toggle("2024-06-20")?;
/// assert_eq!(view.visible_rows_on(today)?, [3]);
/// # Ok::<(), calendar_view::Error>(())
/// ```
pub struct CalendarView {
    view_type: ViewType,
    cache: CalendarCache,
    selection: SelectionSet,
    columns: Vec<Column>,
    cell_template: Option<CellTemplate>,
    label_factory: Option<CellTemplate>,
}

impl CalendarView {
    /// Create a new month-mode view with an empty selection.
    pub fn new(week_start: Weekday) -> Self {
        let columns = week_from(week_start)
            .into_iter()
            .map(|day| Column {
                title: day.to_string()[..1].to_string(),
                template: None,
            })
            .collect();

        Self {
            view_type: ViewType::default(),
            cache: CalendarCache::new(week_start),
            selection: SelectionSet::new(),
            columns,
            cell_template: None,
            label_factory: None,
        }
    }

    // --
    // -- Builder Methods
    // --

    /// Set how many rows the host displays.
    pub fn with_view_type(mut self, view_type: ViewType) -> Self {
        self.view_type = view_type;
        self
    }

    /// Set the template applied to every cell without a per-column
    /// template.
    pub fn with_cell_template(mut self, template: impl Fn(&CellContext) -> String + 'static) -> Self {
        self.cell_template = Some(Box::new(template));
        self
    }

    /// Set the fallback label factory used when no template matches.
    pub fn with_label_factory(mut self, factory: impl Fn(&CellContext) -> String + 'static) -> Self {
        self.label_factory = Some(Box::new(factory));
        self
    }

    /// Set the template applied to the cells of a single column.
    pub fn with_column_template(
        mut self,
        column: usize,
        template: impl Fn(&CellContext) -> String + 'static,
    ) -> Self {
        self.columns[column].template = Some(Box::new(template));
        self
    }

    // --
    // -- Accessors
    // --

    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    pub fn set_view_type(&mut self, view_type: ViewType) {
        self.view_type = view_type;
    }

    pub fn week_start(&self) -> Weekday {
        self.cache.week_start()
    }

    /// Get the weekday columns in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    /// Swap in a new underlying selection, keeping the observers that were
    /// registered on the old one subscribed. Observers are notified once.
    pub fn replace_selection(&mut self, mut selection: SelectionSet) -> &mut SelectionSet {
        selection.adopt_observers_from(&mut self.selection);
        self.selection = selection;
        self.selection.notify_replaced();
        &mut self.selection
    }

    // --
    // -- Highlighted day and grid slicing
    // --

    /// Get the highlighted day: the first selected key, else today.
    pub fn highlighted(&self) -> DateKey {
        self.highlighted_on(Local::now().date_naive())
    }

    /// Get the highlighted day relative to an explicit current date.
    pub fn highlighted_on(&self, today: NaiveDate) -> DateKey {
        self.selection.first().unwrap_or_else(|| today.into())
    }

    /// Get the grid of the highlighted month.
    pub fn month_grid(&mut self) -> Result<&MonthGrid> {
        self.month_grid_on(Local::now().date_naive())
    }

    /// Get the grid of the highlighted month relative to an explicit
    /// current date.
    pub fn month_grid_on(&mut self, today: NaiveDate) -> Result<&MonthGrid> {
        let highlighted = self.highlighted_on(today);
        self.cache.month(highlighted.year(), highlighted.month())
    }

    /// Get the grid row indices the host should display: all 6 rows in
    /// month mode, the row containing the highlighted day in week mode.
    pub fn visible_rows(&mut self) -> Result<Vec<usize>> {
        self.visible_rows_on(Local::now().date_naive())
    }

    pub fn visible_rows_on(&mut self, today: NaiveDate) -> Result<Vec<usize>> {
        match self.view_type {
            ViewType::Month => Ok((0..ROW_COUNT).collect()),
            ViewType::Week => {
                let highlighted = self.highlighted_on(today);
                let grid = self.cache.month(highlighted.year(), highlighted.month())?;
                Ok(vec![grid.week_row_of(highlighted.day()).unwrap_or(0)])
            }
        }
    }

    // --
    // -- Cells
    // --

    /// Resolve a cell of the highlighted month's grid, pairing its day
    /// number with its selection state.
    pub fn cell(&mut self, row: usize, column: usize) -> Result<CellContext> {
        self.cell_on(row, column, Local::now().date_naive())
    }

    pub fn cell_on(&mut self, row: usize, column: usize, today: NaiveDate) -> Result<CellContext> {
        let highlighted = self.highlighted_on(today);
        let grid = *self.cache.month(highlighted.year(), highlighted.month())?;
        let value = grid.day(row, column);
        let date = cell_date(&grid, highlighted, row, column);
        let is_selected = date.is_some_and(|key| self.selection.contains(key));

        Ok(CellContext { row, column, value, date, is_selected })
    }

    /// Produce the content of a cell through the template fallback chain:
    /// per-column template, grid-wide template, label factory, then the
    /// built-in day-number label.
    pub fn render_cell(&mut self, row: usize, column: usize) -> Result<String> {
        self.render_cell_on(row, column, Local::now().date_naive())
    }

    pub fn render_cell_on(&mut self, row: usize, column: usize, today: NaiveDate) -> Result<String> {
        let cell = self.cell_on(row, column, today)?;

        Ok(self
            .template_for(column)
            .map(|template| template(&cell))
            .unwrap_or_else(|| default_label(&cell)))
    }

    /// Providers resolved in priority order.
    fn template_for(&self, column: usize) -> Option<&CellTemplate> {
        self.columns
            .get(column)
            .and_then(|col| col.template.as_ref())
            .or(self.cell_template.as_ref())
            .or(self.label_factory.as_ref())
    }
}

impl fmt::Debug for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarView")
            .field("view_type", &self.view_type)
            .field("week_start", &self.week_start())
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

/// Get the day a cell stands for, attributing edge cells to the month they
/// were borrowed from.
fn cell_date(grid: &MonthGrid, highlighted: DateKey, row: usize, column: usize) -> Option<DateKey> {
    let value = grid.day(row, column);

    if value == 0 {
        return None;
    }

    let first = NaiveDate::from_ymd_opt(highlighted.year(), highlighted.month(), 1)?;

    let date = match grid.origin(row, column) {
        CellOrigin::Current => first.with_day(value),
        CellOrigin::Previous => first.pred_opt()?.with_day(value),
        CellOrigin::Next => first.checked_add_months(Months::new(1))?.with_day(value),
    };

    date.map(DateKey::from)
}

fn default_label(cell: &CellContext) -> String {
    match cell.value {
        0 => String::new(),
        day => day.to_string(),
    }
}
