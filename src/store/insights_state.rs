//! Insight slice: the normalized insight table.

use crate::model::Insight;

/// Normalized table of insights keyed by reference identity.
#[derive(Debug, Clone)]
pub struct InsightsState {
    insights: Vec<Insight>,
    rev: u64,
}

impl InsightsState {
    pub(crate) fn new(insights: Vec<Insight>) -> Self {
        let mut state = Self {
            insights: Vec::new(),
            rev: 1,
        };
        for insight in insights {
            state.upsert_in_place(insight);
        }
        state
    }

    /// All insights currently in the table.
    pub fn all(&self) -> &[Insight] {
        &self.insights
    }

    /// Revision counter; changes whenever the slice is mutated.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn upsert_in_place(&mut self, insight: Insight) {
        let identity = &insight.identity;
        let existing = self.insights.iter().position(|i| {
            (identity.identifier.is_some() && i.identity.identifier == identity.identifier)
                || (identity.uri.is_some() && i.identity.uri == identity.uri)
        });
        match existing {
            Some(idx) => self.insights[idx] = insight,
            None => self.insights.push(insight),
        }
    }

    pub(crate) fn apply_upsert(&mut self, insight: Insight) {
        self.upsert_in_place(insight);
        self.rev += 1;
    }
}
