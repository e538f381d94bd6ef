#![doc = include_str!("../README.md")]

pub mod cache;
pub mod date_key;
pub mod error;
pub mod selection;
pub mod view;

#[cfg(test)]
mod tests;

// Public re-exports
pub use crate::cache::CalendarCache;
pub use crate::date_key::DateKey;
pub use crate::error::{Error, Result};
pub use crate::selection::{SelectionChange, SelectionSet, SubscriptionId};
pub use crate::view::{CalendarView, CellContext, ViewType};
pub use month_grid::{CellOrigin, MonthGrid};
