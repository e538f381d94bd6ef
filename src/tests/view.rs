use std::cell::Cell;
use std::rc::Rc;

use chrono::Weekday;

use crate::date;
use crate::selection::SelectionSet;
use crate::view::{CalendarView, ViewType};

#[test]
fn highlighted_day_prefers_the_first_selection() {
    let mut view = CalendarView::new(Weekday::Sun);
    let today = date!("2024-06-01");

    assert_eq!(view.highlighted_on(today).to_string(), "2024-06-01");

    view.selection_mut().toggle("2023-11-03").unwrap();
    view.selection_mut().toggle("2024-02-29").unwrap();
    assert_eq!(view.highlighted_on(today).to_string(), "2023-11-03");

    // Unselecting the head falls through to the next selection, then today.
    view.selection_mut().toggle("2023-11-03").unwrap();
    assert_eq!(view.highlighted_on(today).to_string(), "2024-02-29");

    view.selection_mut().toggle("2024-02-29").unwrap();
    assert_eq!(view.highlighted_on(today).to_string(), "2024-06-01");
}

#[test]
fn displayed_month_follows_the_highlighted_day() {
    let mut view = CalendarView::new(Weekday::Sun);
    let today = date!("2024-06-01");

    view.selection_mut().toggle("2024-02-29").unwrap();
    let grid = view.month_grid_on(today).unwrap();
    assert_eq!(grid.row(0), [28, 29, 30, 31, 1, 2, 3]);
}

#[test]
fn month_mode_shows_all_rows_week_mode_one() {
    let today = date!("2024-06-01");

    let mut view = CalendarView::new(Weekday::Sun);
    assert_eq!(view.visible_rows_on(today).unwrap(), [0, 1, 2, 3, 4, 5]);

    view.set_view_type(ViewType::Week);
    assert_eq!(view.visible_rows_on(today).unwrap(), [0]); // June 1st sits in row 0

    view.selection_mut().toggle("2024-06-20").unwrap();
    assert_eq!(view.visible_rows_on(today).unwrap(), [3]);
}

#[test]
fn column_titles_follow_the_start_of_week() {
    let titles = |week_start| -> Vec<String> {
        CalendarView::new(week_start)
            .columns()
            .iter()
            .map(|column| column.title.clone())
            .collect()
    };

    assert_eq!(titles(Weekday::Sun), ["S", "M", "T", "W", "T", "F", "S"]);
    assert_eq!(titles(Weekday::Mon), ["M", "T", "W", "T", "F", "S", "S"]);
}

#[test]
fn cells_pair_day_numbers_with_selection_state() {
    let mut view = CalendarView::new(Weekday::Sun);
    let today = date!("2024-06-01");
    view.selection_mut().toggle("2024-02-29").unwrap();

    let cell = view.cell_on(4, 4, today).unwrap();
    assert_eq!(cell.value, 29);
    assert_eq!(cell.date.unwrap().to_string(), "2024-02-29");
    assert!(cell.is_selected);

    let other = view.cell_on(1, 0, today).unwrap();
    assert_eq!(other.value, 4);
    assert!(!other.is_selected);
}

#[test]
fn edge_cells_resolve_to_their_own_month() {
    let mut view = CalendarView::new(Weekday::Sun);
    let today = date!("2024-01-15");
    view.selection_mut().toggle("2023-12-31").unwrap();
    view.selection_mut().toggle("2024-01-10").unwrap();

    // Highlighted month is December 2023 (first selection). Its trailing
    // cells belong to January 2024.
    let grid = *view.month_grid_on(today).unwrap();
    assert_eq!(grid.row(5), [31, 1, 2, 3, 4, 5, 6]);

    let trailing = view.cell_on(5, 1, today).unwrap();
    assert_eq!(trailing.date.unwrap().to_string(), "2024-01-01");

    let own = view.cell_on(5, 0, today).unwrap();
    assert_eq!(own.date.unwrap().to_string(), "2023-12-31");
    assert!(own.is_selected);
}

#[test]
fn cell_templates_resolve_in_priority_order() {
    let today = date!("2024-06-01");

    // No template registered: built-in day-number label.
    let mut view = CalendarView::new(Weekday::Sun);
    assert_eq!(view.render_cell_on(1, 0, today).unwrap(), "2");

    // A label factory takes over from the built-in label.
    let mut view = CalendarView::new(Weekday::Sun)
        .with_label_factory(|cell| format!("label:{}", cell.value));
    assert_eq!(view.render_cell_on(1, 0, today).unwrap(), "label:2");

    // A grid-wide template wins over the factory.
    let mut view = CalendarView::new(Weekday::Sun)
        .with_label_factory(|cell| format!("label:{}", cell.value))
        .with_cell_template(|cell| format!("grid:{}", cell.value));
    assert_eq!(view.render_cell_on(1, 0, today).unwrap(), "grid:2");

    // A per-column template wins over everything, in its column only.
    let mut view = CalendarView::new(Weekday::Sun)
        .with_cell_template(|cell| format!("grid:{}", cell.value))
        .with_column_template(0, |cell| format!("col:{}", cell.value));
    assert_eq!(view.render_cell_on(1, 0, today).unwrap(), "col:2");
    assert_eq!(view.render_cell_on(1, 1, today).unwrap(), "grid:3");
}

#[test]
fn rebinding_the_selection_keeps_observers_subscribed() {
    let mut view = CalendarView::new(Weekday::Sun);
    let notified = Rc::new(Cell::new(0));

    let sink = notified.clone();
    view.selection_mut().subscribe(move |_| sink.set(sink.get() + 1));

    view.selection_mut().toggle("2024-06-20").unwrap();
    assert_eq!(notified.get(), 1);

    let mut replacement = SelectionSet::new();
    replacement.toggle("2024-07-14").unwrap();

    // Swapping the collection notifies once and carries the observer over.
    view.replace_selection(replacement);
    assert_eq!(notified.get(), 2);
    assert!(view.selection().is_selected("2024-07-14").unwrap());

    view.selection_mut().toggle("2024-07-15").unwrap();
    assert_eq!(notified.get(), 3);
}
