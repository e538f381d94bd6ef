use std::collections::HashSet;
use std::fmt;

use crate::date_key::DateKey;
use crate::error::Result;

/// Handle of a registered selection observer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// A single mutation of a [`SelectionSet`], as reported to observers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectionChange {
    /// One day was toggled; `selected` is its new membership state.
    Toggled { key: DateKey, selected: bool },
    /// The whole selection was replaced at once.
    Replaced,
}

type Observer = Box<dyn FnMut(&SelectionChange)>;

/// The days currently highlighted on the calendar, in selection order.
///
/// Membership is tracked in a hash set next to the ordered list, so
/// [`SelectionSet::contains`] stays O(1) while iteration preserves the
/// order in which days were selected. Every mutating call notifies the
/// registered observers exactly once.
///
/// ```
/// use calendar_view::SelectionSet;
///
/// let mut selection = SelectionSet::new();
/// assert!(selection.toggle("2024-02-29")?);
/// assert!(selection.is_selected("2024-02-29")?);
/// assert!(!selection.toggle("2024-02-29")?);
/// assert!(!selection.is_selected("2024-02-29")?);
///
/// assert!(selection.toggle("not-a-day").is_err());
/// # Ok::<(), calendar_view::Error>(())
/// ```
#[derive(Default)]
pub struct SelectionSet {
    ordered: Vec<DateKey>,
    index: HashSet<DateKey>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_observer: u64,
}

impl SelectionSet {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a day given by its canonical `yyyy-MM-dd` key and return its
    /// new membership state. Malformed keys fail without mutating anything.
    pub fn toggle(&mut self, key: &str) -> Result<bool> {
        let key = key.parse()?;
        Ok(self.toggle_date(key))
    }

    /// Toggle an already validated day and return its new membership state.
    pub fn toggle_date(&mut self, key: DateKey) -> bool {
        let selected = if self.index.remove(&key) {
            self.ordered.retain(|k| *k != key);
            false
        } else {
            self.index.insert(key);
            self.ordered.push(key);
            true
        };

        self.notify(&SelectionChange::Toggled { key, selected });
        selected
    }

    /// Check whether the day given by a canonical `yyyy-MM-dd` key is
    /// selected. Malformed keys fail, they are never silently unselected.
    pub fn is_selected(&self, key: &str) -> Result<bool> {
        Ok(self.contains(key.parse()?))
    }

    /// Check whether a day is selected.
    pub fn contains(&self, key: DateKey) -> bool {
        self.index.contains(&key)
    }

    /// Replace the whole selection with the given keys, keeping their
    /// order. The input is validated before anything is replaced, so a
    /// malformed key leaves the previous selection untouched.
    ///
    /// ```
    /// use calendar_view::SelectionSet;
    ///
    /// let mut selection = SelectionSet::new();
    /// selection.replace_all(["2024-12-31", "2025-01-01"])?;
    /// assert_eq!(selection.len(), 2);
    ///
    /// assert!(selection.replace_all(["2025-01-32"]).is_err());
    /// assert_eq!(selection.len(), 2);
    /// # Ok::<(), calendar_view::Error>(())
    /// ```
    pub fn replace_all<I, S>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut index = HashSet::new();

        for raw in keys {
            let key: DateKey = raw.as_ref().parse()?;

            if index.insert(key) {
                ordered.push(key);
            } else {
                #[cfg(feature = "log")]
                log::warn!("ignoring duplicate selection key {key}");
            }
        }

        self.ordered = ordered;
        self.index = index;
        self.notify(&SelectionChange::Replaced);
        Ok(())
    }

    /// Iterate over the selected days in selection order.
    pub fn iter(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.ordered.iter().copied()
    }

    /// Get the earliest selected day still in the selection, if any.
    pub fn first(&self) -> Option<DateKey> {
        self.ordered.first().copied()
    }

    /// Count number of selected days.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Register an observer called after every mutation of the selection.
    pub fn subscribe(&mut self, observer: impl FnMut(&SelectionChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a previously registered observer. Returns false if the
    /// subscription was not known.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(obs_id, _)| *obs_id != id);
        self.observers.len() < before
    }

    /// Move the observers of another selection onto this one. Used when the
    /// caller rebinds a component to a new underlying collection.
    pub(crate) fn adopt_observers_from(&mut self, other: &mut SelectionSet) {
        self.observers.append(&mut other.observers);
        self.next_observer = self.next_observer.max(other.next_observer);
    }

    pub(crate) fn notify_replaced(&mut self) {
        self.notify(&SelectionChange::Replaced);
    }

    fn notify(&mut self, change: &SelectionChange) {
        for (_, observer) in &mut self.observers {
            observer(change);
        }
    }
}

impl fmt::Debug for SelectionSet {
    /// ```
    /// use calendar_view::SelectionSet;
    ///
    /// let mut selection = SelectionSet::new();
    /// selection.toggle("2024-12-31").unwrap();
    /// selection.toggle("2024-03-05").unwrap();
    ///
    /// assert_eq!(format!("{selection:?}"), "{2024-12-31, 2024-03-05}");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct DebugKey(DateKey);

        impl fmt::Debug for DebugKey {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        f.debug_set().entries(self.iter().map(DebugKey)).finish()
    }
}
