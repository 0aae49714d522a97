/// How strictly the result check compares per-read tallies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCheckMode {
    /// Reads from unpaired fragments may push the data tally above the
    /// candidate's recorded read count
    Lenient,
    /// Read tallies must match exactly
    Strict,
}

/// Candidate discovery settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvFinderConfig {
    /// Read pairs kept per sample and edge before the group is marked incomplete
    pub max_evidence_group_size: usize,
    /// Drop pair-type observations from fragments whose remote read was not captured
    pub exclude_unpaired: bool,
    /// Cross-check candidate counts against the evidence groups after each edge
    pub check_result: bool,
    count_check_mode: Option<CountCheckMode>,
}

impl Default for SvFinderConfig {
    fn default() -> Self {
        SvFinderConfig {
            max_evidence_group_size: 4000,
            exclude_unpaired: true,
            check_result: false,
            count_check_mode: None,
        }
    }
}

impl SvFinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_evidence_group_size(mut self, max_evidence_group_size: usize) -> Self {
        self.max_evidence_group_size = max_evidence_group_size;
        self
    }

    pub fn with_exclude_unpaired(mut self, exclude_unpaired: bool) -> Self {
        self.exclude_unpaired = exclude_unpaired;
        self
    }

    pub fn with_check_result(mut self, check_result: bool) -> Self {
        self.check_result = check_result;
        self
    }

    pub fn with_count_check_mode(mut self, mode: CountCheckMode) -> Self {
        self.count_check_mode = Some(mode);
        self
    }

    /// Explicit mode if set, otherwise lenient exactly when unpaired reads are excluded
    pub fn count_check_mode(&self) -> CountCheckMode {
        self.count_check_mode.unwrap_or(if self.exclude_unpaired {
            CountCheckMode::Lenient
        } else {
            CountCheckMode::Strict
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SvFinderConfig::default();
        assert_eq!(config.max_evidence_group_size, 4000);
        assert!(config.exclude_unpaired);
        assert!(!config.check_result);
        assert_eq!(config.count_check_mode(), CountCheckMode::Lenient);
    }

    #[test]
    fn test_count_check_mode_follows_exclusion() {
        let config = SvFinderConfig::new().with_exclude_unpaired(false);
        assert_eq!(config.count_check_mode(), CountCheckMode::Strict);

        let config = config.with_count_check_mode(CountCheckMode::Lenient);
        assert_eq!(config.count_check_mode(), CountCheckMode::Lenient);
    }
}
