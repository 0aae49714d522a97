/// Utility types for testing candidate discovery without alignment files
use std::sync::Arc;

use anyhow::{bail, Result};
use svfinder::alignment_stream::AlignmentStream;
use svfinder::evidence_type::SvEvidenceType;
use svfinder::genome_interval::{GenomeInterval, PosRange};
use svfinder::locus_graph::{EdgeInfo, LocusSide, ReadLocus, SvLocus, SvLocusNode, SvLocusSet};
use svfinder::read_scanner::{ChromToIndex, EvidenceRecord, ReadScanner};
use svfinder::sv_candidate::{SvBreakend, SvBreakendState, SvObservation};
use svfinder::{SvFinder, SvFinderConfig};

pub const NODE0: (i64, i64) = (1000, 1100);
pub const NODE1: (i64, i64) = (5000, 5100);

/// Alignment record double carrying its own classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRead {
    pub qname: String,
    pub is_first: bool,
    /// Aligned position, used for region queries
    pub interval: GenomeInterval,
    pub is_filtered: bool,
    pub is_proper: bool,
    pub is_large: bool,
    pub is_local: bool,
    pub loci: Vec<ReadLocus>,
    /// Observation templates, evidence counts are filled in by the scanner
    pub observations: Vec<SvObservation>,
}

impl TestRead {
    pub fn new(qname: &str, is_first: bool, tid: i32, begin: i64, end: i64) -> Self {
        TestRead {
            qname: qname.to_string(),
            is_first,
            interval: GenomeInterval::new(tid, begin, end),
            is_filtered: false,
            is_proper: true,
            is_large: false,
            is_local: false,
            loci: Vec::new(),
            observations: Vec::new(),
        }
    }

    /// Anomalous pair with a large fragment
    pub fn anomalous(mut self) -> Self {
        self.is_proper = false;
        self.is_large = true;
        self
    }

    pub fn local(mut self) -> Self {
        self.is_local = true;
        self
    }

    pub fn filtered(mut self) -> Self {
        self.is_filtered = true;
        self
    }

    pub fn with_locus(mut self, locus: ReadLocus) -> Self {
        self.loci.push(locus);
        self
    }

    pub fn with_observation(mut self, obs: SvObservation) -> Self {
        self.observations.push(obs);
        self
    }
}

impl EvidenceRecord for TestRead {
    fn qname(&self) -> &[u8] {
        self.qname.as_bytes()
    }

    fn is_first_in_pair(&self) -> bool {
        self.is_first
    }
}

/// Scanner that reads everything off the [`TestRead`] flags
///
/// Pair-type observations get one LocalPair count per captured read, plus one
/// Pair count on each breakend when both reads were captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestScanner;

impl ReadScanner for TestScanner {
    type Record = TestRead;

    fn is_read_filtered(&self, read: &TestRead) -> bool {
        read.is_filtered
    }

    fn is_proper_pair(&self, read: &TestRead, _sample_index: usize) -> bool {
        read.is_proper
    }

    fn is_large_fragment(&self, read: &TestRead, _sample_index: usize) -> bool {
        read.is_large
    }

    fn is_local_assembly_evidence(&self, read: &TestRead) -> bool {
        read.is_local
    }

    fn sv_loci(
        &self,
        read: &TestRead,
        _sample_index: usize,
        _chrom_to_index: &ChromToIndex,
    ) -> Vec<ReadLocus> {
        read.loci.clone()
    }

    fn breakend_pair(
        &self,
        local: &TestRead,
        remote: Option<&TestRead>,
        _sample_index: usize,
        _chrom_to_index: &ChromToIndex,
    ) -> Vec<SvObservation> {
        local
            .observations
            .iter()
            .map(|template| {
                let mut obs = template.clone();
                if obs.evtype.is_pair_type() {
                    obs.bp1.evidence.add(SvEvidenceType::LocalPair, 1);
                    if remote.is_some() {
                        obs.bp2.evidence.add(SvEvidenceType::LocalPair, 1);
                        obs.bp1.evidence.add(SvEvidenceType::Pair, 1);
                        obs.bp2.evidence.add(SvEvidenceType::Pair, 1);
                    }
                } else {
                    obs.bp1.evidence.add(obs.evtype, 1);
                    obs.bp2.evidence.add(obs.evtype, 1);
                }
                obs
            })
            .collect()
    }
}

/// In-memory stream returning the records overlapping the current region
#[derive(Debug, Clone, Default)]
pub struct MemoryAlignmentStream {
    records: Vec<TestRead>,
    region: Option<GenomeInterval>,
    cursor: usize,
    /// Every region requested, in order
    pub regions: Vec<GenomeInterval>,
    pub fail_on_region: bool,
}

impl MemoryAlignmentStream {
    pub fn new(records: Vec<TestRead>) -> Self {
        MemoryAlignmentStream {
            records,
            ..Default::default()
        }
    }
}

impl AlignmentStream for MemoryAlignmentStream {
    type Record = TestRead;

    fn set_region(&mut self, interval: &GenomeInterval) -> Result<()> {
        if self.fail_on_region {
            bail!("Region query failed: {}", interval);
        }
        self.region = Some(*interval);
        self.regions.push(*interval);
        self.cursor = 0;
        Ok(())
    }

    fn next_record(&mut self) -> Result<Option<TestRead>> {
        let Some(region) = self.region else {
            return Ok(None);
        };
        while self.cursor < self.records.len() {
            let record = &self.records[self.cursor];
            self.cursor += 1;
            if record.interval.is_intersect(&region) {
                return Ok(Some(record.clone()));
            }
        }
        Ok(None)
    }
}

pub fn breakend(tid: i32, range: (i64, i64), state: SvBreakendState) -> SvBreakend {
    SvBreakend::new(GenomeInterval::new(tid, range.0, range.1), state)
}

pub fn side(tid: i32, range: (i64, i64), is_out_count: bool) -> LocusSide {
    LocusSide::new(GenomeInterval::new(tid, range.0, range.1), is_out_count)
}

/// Deletion-like observation joining the two nodes
pub fn spanning_observation(evtype: SvEvidenceType) -> SvObservation {
    SvObservation::new(
        evtype,
        breakend(0, NODE0, SvBreakendState::RightOpen),
        breakend(0, NODE1, SvBreakendState::LeftOpen),
    )
}

/// Both mates of a fragment spanning node 0 and node 1 on chromosome 0
pub fn spanning_pair(qname: &str) -> (TestRead, TestRead) {
    let read1 = TestRead::new(qname, true, 0, 900, 1000)
        .anomalous()
        .with_locus(ReadLocus::Pair(side(0, NODE0, true), side(0, NODE1, false)))
        .with_observation(spanning_observation(SvEvidenceType::Pair));
    let read2 = TestRead::new(qname, false, 0, 5100, 5200)
        .anomalous()
        .with_locus(ReadLocus::Pair(side(0, NODE1, true), side(0, NODE0, false)))
        .with_observation(SvObservation::new(
            SvEvidenceType::Pair,
            breakend(0, NODE1, SvBreakendState::LeftOpen),
            breakend(0, NODE0, SvBreakendState::RightOpen),
        ));
    (read1, read2)
}

/// Two nodes on chromosome 0 with the given directed edge counts
///
/// Node 0 searches [800,1100), node 1 searches [5000,5300).
pub fn two_node_set(min_merge_edge_count: u32, count01: u32, count10: u32) -> SvLocusSet {
    let mut locus = SvLocus::new();
    locus.add_node(
        SvLocusNode::new(GenomeInterval::new(0, NODE0.0, NODE0.1), PosRange::new(800, 1100))
            .with_edge(1, count01)
            .with_edge(0, 5),
    );
    locus.add_node(
        SvLocusNode::new(GenomeInterval::new(0, NODE1.0, NODE1.1), PosRange::new(5000, 5300))
            .with_edge(0, count10),
    );
    let mut set = SvLocusSet::new(min_merge_edge_count);
    set.add_locus(locus);
    set
}

pub fn chrom_to_index() -> ChromToIndex {
    [("chr1".to_string(), 0), ("chr2".to_string(), 1)].into_iter().collect()
}

pub fn finder(
    config: SvFinderConfig,
    set: SvLocusSet,
    samples: Vec<Vec<TestRead>>,
) -> SvFinder<TestScanner, MemoryAlignmentStream> {
    let streams = samples.into_iter().map(MemoryAlignmentStream::new).collect();
    SvFinder::new(config, Arc::new(set), TestScanner, streams)
}

pub fn edge01() -> EdgeInfo {
    EdgeInfo::new(0, 0, 1)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
