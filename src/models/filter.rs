//! Query filters for ledger entries and goals
//!
//! A filter is a conjunction of optional predicates; an empty filter matches
//! everything. Results come back in stable id order unless a sort key is
//! requested, in which case ties are broken by ascending id.

use chrono::NaiveDate;

use super::entry::LedgerEntry;
use super::goal::{GoalStatus, SavingsGoal};
use super::money::Money;

/// Sort key for entry queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySort {
    Date,
    Amount,
    Label,
    Description,
}

/// Filter over income or expense entries
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub label: Option<String>,
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>,
    pub description_contains: Option<String>,
    pub sort: Option<EntrySort>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to dates in `[from, to]`, both inclusive
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Exact (case-sensitive) match on the category or source label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn min_amount(mut self, min: Money) -> Self {
        self.min_amount = Some(min);
        self
    }

    pub fn max_amount(mut self, max: Money) -> Self {
        self.max_amount = Some(max);
        self
    }

    /// Case-insensitive substring match on the description
    pub fn describing(mut self, text: impl Into<String>) -> Self {
        self.description_contains = Some(text.into());
        self
    }

    pub fn sorted_by(mut self, sort: EntrySort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Whether an entry passes every set predicate
    pub fn matches(&self, entry: &impl LedgerEntry) -> bool {
        if let Some(from) = self.from {
            if entry.date() < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if entry.date() > to {
                return false;
            }
        }
        if let Some(label) = &self.label {
            if entry.label() != label {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if entry.amount() < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if entry.amount() > max {
                return false;
            }
        }
        if let Some(text) = &self.description_contains {
            let haystack = entry.description().to_lowercase();
            if !haystack.contains(&text.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Sort matched entries by the requested key, ties by ascending id
    ///
    /// Without a sort key the input order (stable id order out of the store)
    /// is left untouched.
    pub fn order<T: LedgerEntry>(&self, entries: &mut [T]) {
        let Some(sort) = self.sort else {
            return;
        };
        match sort {
            EntrySort::Date => entries.sort_by(|a, b| {
                a.date().cmp(&b.date()).then(a.raw_id().cmp(&b.raw_id()))
            }),
            EntrySort::Amount => entries.sort_by(|a, b| {
                a.amount()
                    .cmp(&b.amount())
                    .then(a.raw_id().cmp(&b.raw_id()))
            }),
            EntrySort::Label => entries.sort_by(|a, b| {
                a.label().cmp(b.label()).then(a.raw_id().cmp(&b.raw_id()))
            }),
            EntrySort::Description => entries.sort_by(|a, b| {
                a.description()
                    .cmp(b.description())
                    .then(a.raw_id().cmp(&b.raw_id()))
            }),
        }
    }
}

/// Filter over savings goals
#[derive(Debug, Clone, Default)]
pub struct GoalFilter {
    pub category: Option<String>,
    pub name_contains: Option<String>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
    /// Keep only goals in the given derived state, evaluated at the given date
    pub status: Option<(GoalStatus, NaiveDate)>,
}

impl GoalFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Case-insensitive substring match on the goal name
    pub fn named(mut self, text: impl Into<String>) -> Self {
        self.name_contains = Some(text.into());
        self
    }

    /// Restrict to target dates in `[from, to]`, both inclusive
    pub fn due_between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.due_from = Some(from);
        self.due_to = Some(to);
        self
    }

    pub fn with_status(mut self, status: GoalStatus, as_of: NaiveDate) -> Self {
        self.status = Some((status, as_of));
        self
    }

    pub fn matches(&self, goal: &SavingsGoal) -> bool {
        if let Some(category) = &self.category {
            if &goal.category != category {
                return false;
            }
        }
        if let Some(text) = &self.name_contains {
            if !goal.name.to_lowercase().contains(&text.to_lowercase()) {
                return false;
            }
        }
        if let Some(from) = self.due_from {
            if goal.target_date < from {
                return false;
            }
        }
        if let Some(to) = self.due_to {
            if goal.target_date > to {
                return false;
            }
        }
        if let Some((status, as_of)) = self.status {
            if goal.status(as_of) != status {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::{ExpenseEntry, NewExpense};
    use crate::models::ids::{ExpenseId, GoalId};
    use crate::models::goal::SavingsGoal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: u64, day: u32, category: &str, cents: i64, description: &str) -> ExpenseEntry {
        NewExpense::new(date(2024, 1, day), category, Money::from_cents(cents))
            .with_description(description)
            .into_entry(ExpenseId::from_raw(id))
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let e = expense(1, 5, "Food", 100, "");
        assert!(EntryFilter::new().matches(&e));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = EntryFilter::new().between(date(2024, 1, 5), date(2024, 1, 10));
        assert!(filter.matches(&expense(1, 5, "Food", 100, "")));
        assert!(filter.matches(&expense(2, 10, "Food", 100, "")));
        assert!(!filter.matches(&expense(3, 4, "Food", 100, "")));
        assert!(!filter.matches(&expense(4, 11, "Food", 100, "")));
    }

    #[test]
    fn test_label_match_is_case_sensitive() {
        let filter = EntryFilter::new().label("Food");
        assert!(filter.matches(&expense(1, 5, "Food", 100, "")));
        assert!(!filter.matches(&expense(2, 5, "food", 100, "")));
    }

    #[test]
    fn test_amount_bounds() {
        let filter = EntryFilter::new()
            .min_amount(Money::from_cents(100))
            .max_amount(Money::from_cents(200));
        assert!(filter.matches(&expense(1, 5, "Food", 100, "")));
        assert!(filter.matches(&expense(2, 5, "Food", 200, "")));
        assert!(!filter.matches(&expense(3, 5, "Food", 99, "")));
        assert!(!filter.matches(&expense(4, 5, "Food", 201, "")));
    }

    #[test]
    fn test_description_substring_is_case_insensitive() {
        let filter = EntryFilter::new().describing("coffee");
        assert!(filter.matches(&expense(1, 5, "Food", 100, "Morning Coffee")));
        assert!(!filter.matches(&expense(2, 5, "Food", 100, "Lunch")));
    }

    #[test]
    fn test_sort_by_amount_ties_broken_by_id() {
        let mut entries = vec![
            expense(3, 5, "Food", 100, ""),
            expense(1, 6, "Food", 100, ""),
            expense(2, 7, "Food", 50, ""),
        ];
        EntryFilter::new()
            .sorted_by(EntrySort::Amount)
            .order(&mut entries);
        let ids: Vec<u64> = entries.iter().map(|e| e.raw_id()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_no_sort_preserves_order() {
        let mut entries = vec![expense(2, 5, "Food", 50, ""), expense(1, 6, "Food", 100, "")];
        EntryFilter::new().order(&mut entries);
        assert_eq!(entries[0].raw_id(), 2);
    }

    fn sample_goal(name: &str, category: &str, target_date: NaiveDate) -> SavingsGoal {
        SavingsGoal {
            id: GoalId::from_raw(1),
            name: name.into(),
            target_amount: Money::from_cents(100_000),
            current_amount: Money::zero(),
            target_date,
            category: category.into(),
            description: String::new(),
        }
    }

    #[test]
    fn test_goal_filter_by_category_and_name() {
        let g = sample_goal("Emergency fund", "Savings", date(2025, 1, 1));
        assert!(GoalFilter::new().category("Savings").matches(&g));
        assert!(!GoalFilter::new().category("Travel").matches(&g));
        assert!(GoalFilter::new().named("emergency").matches(&g));
    }

    #[test]
    fn test_goal_filter_by_status() {
        let g = sample_goal("Emergency fund", "Savings", date(2024, 1, 1));
        let filter = GoalFilter::new().with_status(GoalStatus::Overdue, date(2024, 6, 1));
        assert!(filter.matches(&g));
        let filter = GoalFilter::new().with_status(GoalStatus::Active, date(2024, 6, 1));
        assert!(!filter.matches(&g));
    }
}
