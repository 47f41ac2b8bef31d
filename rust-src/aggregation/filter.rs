//! State filter applied before the KPI aggregation.

use std::collections::HashSet;
use std::fmt;

use crate::config::{ALL_STATES, BLANK_STATE};
use crate::error::{DashboardError, Result};
use crate::models::{ComplaintRecord, Dataset};


/// Selected entry of the state selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StateFilter {
    /// Sentinel that passes every row through.
    #[default]
    All,
    State(String),
}


impl StateFilter {
    /// Interpret a selector label. "All States" (any case) and "all" disable the filter,
    /// "(blank)" selects the rows without a state.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(ALL_STATES) || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else if trimmed == BLANK_STATE {
            Self::State(String::new())
        } else {
            Self::State(trimmed.to_string())
        }
    }

    /// Label shown in the selector.
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_STATES,
            Self::State(state) if state.is_empty() => BLANK_STATE,
            Self::State(state) => state,
        }
    }

    /// Whether a record passes the filter.
    pub fn matches(&self, record: &ComplaintRecord) -> bool {
        match self {
            Self::All => true,
            Self::State(state) => record.state == *state,
        }
    }

    /// Rows visible under this filter. `All` returns the full table unchanged.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a ComplaintRecord> {
        dataset.records().iter().filter(|r| self.matches(r)).collect()
    }

    /// Reject a state that never occurs in the dataset.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        match self {
            Self::All => Ok(()),
            Self::State(state) => {
                if dataset.records().iter().any(|r| r.state == *state) {
                    Ok(())
                } else {
                    Err(DashboardError::UnknownState(state.clone()))
                }
            }
        }
    }
}


impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}


/// Selector options: the sentinel followed by distinct states in first-seen order.
///
/// Rows without a state get their own entry, so every row is reachable from
/// exactly one option besides the sentinel.
pub fn state_options(dataset: &Dataset) -> Vec<StateFilter> {
    let mut seen = HashSet::new();
    let mut options = vec![StateFilter::All];

    for record in dataset.records() {
        if seen.insert(record.state.as_str()) {
            options.push(StateFilter::State(record.state.clone()));
        }
    }

    options
}
