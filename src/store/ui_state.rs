//! UI slice: transient signals consumed by a rendering layer.

/// Transient UI signals. The insight-list refresh counter lets a catalog
/// panel observe that the set of known insights changed without diffing the
/// insight table itself.
#[derive(Debug, Clone)]
pub struct UiState {
    insight_list_refreshes: u64,
    rev: u64,
}

impl UiState {
    pub(crate) fn new() -> Self {
        Self {
            insight_list_refreshes: 0,
            rev: 1,
        }
    }

    /// Number of insight-list refresh requests observed so far.
    pub fn insight_list_refreshes(&self) -> u64 {
        self.insight_list_refreshes
    }

    /// Revision counter; changes whenever the slice is mutated.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub(crate) fn apply_request_insight_list_refresh(&mut self) {
        self.insight_list_refreshes += 1;
        self.rev += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_request_bumps_counter_and_rev() {
        let mut s = UiState::new();
        s.apply_request_insight_list_refresh();
        s.apply_request_insight_list_refresh();
        assert_eq!(s.insight_list_refreshes(), 2);
        assert_eq!(s.rev(), 3);
    }
}
