use std::fmt;

use crate::evidence_type::{SvEvidenceCounts, SvEvidenceType};
use crate::genome_interval::GenomeInterval;

/// Orientation of a breakend relative to its interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SvBreakendState {
    #[default]
    Unknown,
    RightOpen, // Sequence continues to the right of the breakend
    LeftOpen,  // Sequence continues to the left of the breakend
    Complex,   // Local signal without a single orientation
}

impl SvBreakendState {
    /// Oriented states describe one side of a novel adjacency
    pub fn is_oriented(self) -> bool {
        matches!(self, SvBreakendState::RightOpen | SvBreakendState::LeftOpen)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SvBreakend {
    pub interval: GenomeInterval,
    pub state: SvBreakendState,
    pub evidence: SvEvidenceCounts,
}

impl SvBreakend {
    pub fn new(interval: GenomeInterval, state: SvBreakendState) -> Self {
        SvBreakend {
            interval,
            state,
            evidence: SvEvidenceCounts::new(),
        }
    }

    pub fn with_evidence(mut self, evtype: SvEvidenceType, count: u32) -> Self {
        self.evidence.add(evtype, count);
        self
    }

    /// Complete read pairs supporting this breakend
    pub fn pair_count(&self) -> u32 {
        self.evidence.get(SvEvidenceType::Pair)
    }

    /// Individual pair-type reads observed on this breakend
    pub fn local_pair_count(&self) -> u32 {
        self.evidence.get(SvEvidenceType::LocalPair)
    }

    /// Same state and intersecting intervals. Unknown breakends carry no
    /// position and match each other.
    pub fn is_intersect(&self, other: &SvBreakend) -> bool {
        if self.state != other.state {
            return false;
        }
        self.state == SvBreakendState::Unknown || self.interval.is_intersect(&other.interval)
    }

    /// Extend the interval to the range union and accumulate evidence
    pub fn merge(&mut self, other: &SvBreakend) {
        self.interval.range.merge_range(&other.interval.range);
        self.evidence.merge(&other.evidence);
    }
}

impl fmt::Display for SvBreakend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} [{}]", self.interval, self.state, self.evidence)
    }
}

/// How a pair of breakends lines up against a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreakendMatch {
    Direct,  // bp1~bp1 and bp2~bp2
    Crossed, // bp1~bp2 and bp2~bp1
}

fn match_breakends(
    bp1: &SvBreakend,
    bp2: &SvBreakend,
    rhs_bp1: &SvBreakend,
    rhs_bp2: &SvBreakend,
) -> Option<BreakendMatch> {
    if bp1.is_intersect(rhs_bp1) && bp2.is_intersect(rhs_bp2) {
        Some(BreakendMatch::Direct)
    } else if bp1.is_intersect(rhs_bp2) && bp2.is_intersect(rhs_bp1) {
        Some(BreakendMatch::Crossed)
    } else {
        None
    }
}

/// A typed breakend observation derived from one read pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvObservation {
    pub evtype: SvEvidenceType,
    pub bp1: SvBreakend,
    pub bp2: SvBreakend,
}

impl SvObservation {
    pub fn new(evtype: SvEvidenceType, bp1: SvBreakend, bp2: SvBreakend) -> Self {
        SvObservation { evtype, bp1, bp2 }
    }

    /// Spanning observations imply two distinct breakend loci
    pub fn is_spanning(&self) -> bool {
        self.bp1.state.is_oriented() && self.bp2.state.is_oriented()
    }
}

impl fmt::Display for SvObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bp1: {} bp2: {}", self.evtype, self.bp1, self.bp2)
    }
}

/// A candidate structural variant grown from one or more observations
///
/// `candidate_index` always equals the candidate's position in the per-edge
/// candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SvCandidate {
    pub bp1: SvBreakend,
    pub bp2: SvBreakend,
    pub candidate_index: usize,
}

impl SvCandidate {
    pub fn from_observation(obs: &SvObservation, candidate_index: usize) -> Self {
        SvCandidate {
            bp1: obs.bp1.clone(),
            bp2: obs.bp2.clone(),
            candidate_index,
        }
    }

    pub fn is_intersect(&self, other: &SvCandidate) -> bool {
        match_breakends(&self.bp1, &self.bp2, &other.bp1, &other.bp2).is_some()
    }

    pub fn is_intersect_observation(&self, obs: &SvObservation) -> bool {
        match_breakends(&self.bp1, &self.bp2, &obs.bp1, &obs.bp2).is_some()
    }

    pub fn merge(&mut self, other: &SvCandidate) {
        self.merge_breakends(&other.bp1, &other.bp2);
    }

    pub fn merge_observation(&mut self, obs: &SvObservation) {
        self.merge_breakends(&obs.bp1, &obs.bp2);
    }

    fn merge_breakends(&mut self, rhs_bp1: &SvBreakend, rhs_bp2: &SvBreakend) {
        match match_breakends(&self.bp1, &self.bp2, rhs_bp1, rhs_bp2) {
            Some(BreakendMatch::Crossed) => {
                self.bp1.merge(rhs_bp2);
                self.bp2.merge(rhs_bp1);
            }
            _ => {
                self.bp1.merge(rhs_bp1);
                self.bp2.merge(rhs_bp2);
            }
        }
    }
}

impl fmt::Display for SvCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index: {} bp1: {} bp2: {}",
            self.candidate_index, self.bp1, self.bp2
        )
    }
}
