//! Per-edge scratch storage for the reads gathered around an edge
//!
//! One [`SvCandidateSetSampleGroup`] per input sample collects fragments keyed by
//! read name. The whole [`SvCandidateSetData`] is cleared at the start of every
//! edge evaluation.

use anyhow::Result;
use indexmap::IndexMap;

use crate::error::SvFinderError;
use crate::evidence_type::SvEvidenceType;
use crate::genome_interval::GenomeInterval;
use crate::read_scanner::EvidenceRecord;

/// One captured alignment record and the sample it came from
#[derive(Debug, Clone)]
pub struct SvCandidateSetRead<R> {
    pub record: R,
    pub sample_index: usize,
    /// Capture order within the sample group
    pub read_index: usize,
}

/// Back-reference from a read pair to the candidate it supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvPairAssociation {
    pub index: usize,
    pub evtype: SvEvidenceType,
}

impl SvPairAssociation {
    pub fn new(index: usize, evtype: SvEvidenceType) -> Self {
        SvPairAssociation { index, evtype }
    }
}

/// Up to two mates of one fragment plus their candidate links
#[derive(Debug, Clone)]
pub struct SvCandidateSetReadPair<R> {
    pub read1: Option<SvCandidateSetRead<R>>,
    pub read2: Option<SvCandidateSetRead<R>>,
    /// Rebuilt on every assignment pass
    pub sv_links: Vec<SvPairAssociation>,
}

impl<R> Default for SvCandidateSetReadPair<R> {
    fn default() -> Self {
        SvCandidateSetReadPair {
            read1: None,
            read2: None,
            sv_links: Vec::new(),
        }
    }
}

impl<R> SvCandidateSetReadPair<R> {
    pub fn is_complete(&self) -> bool {
        self.read1.is_some() && self.read2.is_some()
    }

    pub fn read_count(&self) -> usize {
        usize::from(self.read1.is_some()) + usize::from(self.read2.is_some())
    }
}

/// Fragments gathered for one sample during one edge evaluation
#[derive(Debug, Clone)]
pub struct SvCandidateSetSampleGroup<R> {
    sample_index: usize,
    pairs: IndexMap<Vec<u8>, SvCandidateSetReadPair<R>>,
    read_count: usize,
    search_interval: Option<GenomeInterval>,
    is_incomplete: bool,
    is_skipped: bool,
}

impl<R> SvCandidateSetSampleGroup<R> {
    pub fn new(sample_index: usize) -> Self {
        SvCandidateSetSampleGroup {
            sample_index,
            pairs: IndexMap::new(),
            read_count: 0,
            search_interval: None,
            is_incomplete: false,
            is_skipped: false,
        }
    }

    pub fn sample_index(&self) -> usize {
        self.sample_index
    }

    /// Number of fragments (read pairs) held
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn read_count(&self) -> usize {
        self.read_count
    }

    pub fn iter(&self) -> impl Iterator<Item = &SvCandidateSetReadPair<R>> {
        self.pairs.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SvCandidateSetReadPair<R>> {
        self.pairs.values_mut()
    }

    pub fn search_interval(&self) -> Option<&GenomeInterval> {
        self.search_interval.as_ref()
    }

    pub fn set_search_interval(&mut self, interval: GenomeInterval) {
        self.search_interval = Some(interval);
    }

    pub fn is_incomplete(&self) -> bool {
        self.is_incomplete
    }

    pub fn set_incomplete(&mut self) {
        self.is_incomplete = true;
    }

    pub fn is_skipped(&self) -> bool {
        self.is_skipped
    }

    pub fn set_skipped(&mut self) {
        self.is_skipped = true;
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
        self.read_count = 0;
        self.search_interval = None;
        self.is_incomplete = false;
        self.is_skipped = false;
    }
}

impl<R: EvidenceRecord> SvCandidateSetSampleGroup<R> {
    /// Store a read in its fragment's read1 or read2 slot
    ///
    /// Returns `false` when the read was not stored: the group is incomplete, or
    /// the slot is already filled and repeats are expected. A filled slot without
    /// expected repeats is a read name collision.
    pub fn add(&mut self, record: R, is_expect_repeat: bool) -> Result<bool> {
        if self.is_incomplete {
            return Ok(false);
        }

        let is_first = record.is_first_in_pair();
        if let Some(pair) = self.pairs.get(record.qname()) {
            let slot = if is_first { &pair.read1 } else { &pair.read2 };
            if slot.is_some() {
                if is_expect_repeat {
                    return Ok(false);
                }
                return Err(SvFinderError::ReadNameCollision {
                    sample_index: self.sample_index,
                    qname: String::from_utf8_lossy(record.qname()).into_owned(),
                }
                .into());
            }
        }

        let read = SvCandidateSetRead {
            sample_index: self.sample_index,
            read_index: self.read_count,
            record,
        };
        let pair = self.pairs.entry(read.record.qname().to_vec()).or_default();
        if is_first {
            pair.read1 = Some(read);
        } else {
            pair.read2 = Some(read);
        }
        self.read_count += 1;
        Ok(true)
    }
}

/// All sample groups for the edge under evaluation
#[derive(Debug, Clone)]
pub struct SvCandidateSetData<R> {
    groups: Vec<SvCandidateSetSampleGroup<R>>,
    search_intervals: Vec<GenomeInterval>,
}

impl<R> Default for SvCandidateSetData<R> {
    fn default() -> Self {
        SvCandidateSetData {
            groups: Vec::new(),
            search_intervals: Vec::new(),
        }
    }
}

impl<R> SvCandidateSetData<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all groups and searched intervals
    pub fn clear(&mut self) {
        self.groups.clear();
        self.search_intervals.clear();
    }

    /// Group for `sample_index`, created along with any lower missing groups
    pub fn data_group_mut(&mut self, sample_index: usize) -> &mut SvCandidateSetSampleGroup<R> {
        self.ensure_sample_count(sample_index + 1);
        &mut self.groups[sample_index]
    }

    pub fn data_group(&self, sample_index: usize) -> Option<&SvCandidateSetSampleGroup<R>> {
        self.groups.get(sample_index)
    }

    pub fn ensure_sample_count(&mut self, sample_count: usize) {
        while self.groups.len() < sample_count {
            let sample_index = self.groups.len();
            self.groups.push(SvCandidateSetSampleGroup::new(sample_index));
        }
    }

    pub fn groups(&self) -> &[SvCandidateSetSampleGroup<R>] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [SvCandidateSetSampleGroup<R>] {
        &mut self.groups
    }

    pub fn search_intervals(&self) -> &[GenomeInterval] {
        &self.search_intervals
    }

    /// Register the next search interval
    ///
    /// Returns `true` if it intersects an interval already searched during this
    /// edge evaluation, in which case the same reads may be seen again.
    pub fn set_new_search_interval(&mut self, interval: GenomeInterval) -> bool {
        let is_repeat = self
            .search_intervals
            .iter()
            .any(|searched| searched.is_intersect(&interval));
        self.search_intervals.push(interval);
        is_repeat
    }

    pub fn set_skipped(&mut self) {
        for group in &mut self.groups {
            group.set_skipped();
        }
    }

    pub fn is_skipped(&self) -> bool {
        !self.groups.is_empty() && self.groups.iter().all(|g| g.is_skipped())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.is_empty())
    }

    /// Fragments across all samples
    pub fn pair_count(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }

    pub fn links_mut(&mut self) -> impl Iterator<Item = &mut SvPairAssociation> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.iter_mut())
            .flat_map(|pair| pair.sv_links.iter_mut())
    }
}
