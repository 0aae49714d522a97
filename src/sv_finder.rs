use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use log::{debug, trace};

use crate::alignment_stream::AlignmentStream;
use crate::candidate_data::SvCandidateSetData;
use crate::config::SvFinderConfig;
use crate::error::SvFinderError;
use crate::evidence_collector::add_sv_node_data;
use crate::locus_graph::{EdgeInfo, SvLocus, SvLocusNode, SvLocusSet};
use crate::observation_assigner::assign_candidates_from_data;
use crate::overlap_consolidator::consolidate_overlap;
use crate::read_scanner::{ChromToIndex, ReadScanner};
use crate::result_validator::check_result;
use crate::sv_candidate::SvCandidate;

/// Stages of one edge evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStage {
    Init,
    Gated,
    Collecting,
    Assigning,
    Consolidating,
    Done,
}

/// How an edge evaluation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStatus {
    /// Edge count below the graph's noise threshold in at least one direction
    GatedOut,
    /// Self-edge, evidence groups are marked skipped
    SelfEdgeSkipped,
    Evaluated,
}

impl fmt::Display for EdgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EdgeStatus::GatedOut => "gated_out",
            EdgeStatus::SelfEdgeSkipped => "self_edge_skipped",
            EdgeStatus::Evaluated => "evaluated",
        };
        f.write_str(label)
    }
}

/// Candidates and supporting evidence produced for one edge
#[derive(Debug, Clone)]
pub struct EdgeCandidates<R> {
    pub edge: EdgeInfo,
    pub status: EdgeStatus,
    pub sv_data: SvCandidateSetData<R>,
    pub svs: Vec<SvCandidate>,
}

/// Per-edge SV candidate discovery over a set of sample alignment streams
///
/// A finder owns its streams; parallel callers build one finder per worker.
pub struct SvFinder<S, A> {
    config: SvFinderConfig,
    set: Arc<SvLocusSet>,
    scanner: S,
    streams: Vec<A>,
}

impl<S, A> SvFinder<S, A>
where
    S: ReadScanner,
    A: AlignmentStream<Record = S::Record>,
{
    pub fn new(config: SvFinderConfig, set: Arc<SvLocusSet>, scanner: S, streams: Vec<A>) -> Self {
        SvFinder {
            config,
            set,
            scanner,
            streams,
        }
    }

    pub fn config(&self) -> &SvFinderConfig {
        &self.config
    }

    pub fn set(&self) -> &SvLocusSet {
        &self.set
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    pub fn streams(&self) -> &[A] {
        &self.streams
    }

    pub fn sample_count(&self) -> usize {
        self.streams.len()
    }

    /// Evaluate one edge into freshly allocated scratch sets
    pub fn evaluate_edge(
        &mut self,
        chrom_to_index: &ChromToIndex,
        edge: &EdgeInfo,
    ) -> Result<EdgeCandidates<S::Record>> {
        let mut sv_data = SvCandidateSetData::new();
        let mut svs = Vec::new();
        let status = self.find_candidate_sv(chrom_to_index, edge, &mut sv_data, &mut svs)?;
        Ok(EdgeCandidates {
            edge: *edge,
            status,
            sv_data,
            svs,
        })
    }

    /// Find SV candidates supported by reads around both nodes of `edge`
    ///
    /// `sv_data` and `svs` are cleared on entry. On return `svs` is compacted
    /// with stable indices and every pair association in `sv_data` points into it.
    pub fn find_candidate_sv(
        &mut self,
        chrom_to_index: &ChromToIndex,
        edge: &EdgeInfo,
        sv_data: &mut SvCandidateSetData<S::Record>,
        svs: &mut Vec<SvCandidate>,
    ) -> Result<EdgeStatus> {
        let mut status = EdgeStatus::Evaluated;
        let mut stage = EdgeStage::Init;

        debug!("Evaluating edge: {}", edge);

        while stage != EdgeStage::Done {
            trace!("Edge {} stage: {:?}", edge, stage);
            stage = match stage {
                EdgeStage::Init => {
                    sv_data.clear();
                    svs.clear();
                    EdgeStage::Gated
                }
                EdgeStage::Gated => {
                    if self.is_edge_evaluated(edge)? {
                        EdgeStage::Collecting
                    } else {
                        debug!("Edge failed min edge count: {}", edge);
                        status = EdgeStatus::GatedOut;
                        EdgeStage::Done
                    }
                }
                EdgeStage::Collecting => {
                    if edge.is_self_edge() {
                        sv_data.ensure_sample_count(self.streams.len());
                        sv_data.set_skipped();
                        status = EdgeStatus::SelfEdgeSkipped;
                    } else {
                        self.collect_edge_evidence(chrom_to_index, edge, sv_data)?;
                    }
                    EdgeStage::Assigning
                }
                EdgeStage::Assigning => {
                    assign_candidates_from_data(
                        chrom_to_index,
                        &self.scanner,
                        self.config.exclude_unpaired,
                        sv_data,
                        svs,
                    );
                    EdgeStage::Consolidating
                }
                EdgeStage::Consolidating => {
                    consolidate_overlap(sv_data, svs);
                    if self.config.check_result {
                        check_result(sv_data, svs, self.config.count_check_mode())?;
                    }
                    EdgeStage::Done
                }
                EdgeStage::Done => EdgeStage::Done,
            };
        }

        debug!("Edge {} finished: {} candidates: {}", edge, status, svs.len());
        Ok(status)
    }

    /// Edge must be bidirectional at the noise threshold of the locus set
    fn is_edge_evaluated(&self, edge: &EdgeInfo) -> Result<bool> {
        let (locus, _, _) = edge_locus(&self.set, edge)?;
        let min_edge_count = self.set.min_merge_edge_count();
        Ok(locus.edge_count(edge.node_index1, edge.node_index2) >= min_edge_count
            && locus.edge_count(edge.node_index2, edge.node_index1) >= min_edge_count)
    }

    /// Gather evidence from both directions of a non-self edge
    fn collect_edge_evidence(
        &mut self,
        chrom_to_index: &ChromToIndex,
        edge: &EdgeInfo,
        sv_data: &mut SvCandidateSetData<S::Record>,
    ) -> Result<()> {
        let (_, node1, node2) = edge_locus(&self.set, edge)?;
        let max_group_size = self.config.max_evidence_group_size;

        add_sv_node_data(
            chrom_to_index,
            &self.scanner,
            node1,
            node2,
            max_group_size,
            &mut self.streams,
            sv_data,
        )?;
        add_sv_node_data(
            chrom_to_index,
            &self.scanner,
            node2,
            node1,
            max_group_size,
            &mut self.streams,
            sv_data,
        )
    }
}

fn edge_locus<'a>(
    set: &'a SvLocusSet,
    edge: &EdgeInfo,
) -> Result<(&'a SvLocus, &'a SvLocusNode, &'a SvLocusNode)> {
    let locus = set.locus(edge.locus_index).ok_or_else(|| {
        SvFinderError::InvalidEdge(format!("no locus with index {}", edge.locus_index))
    })?;
    let node = |node_index| {
        locus.node(node_index).ok_or_else(|| {
            SvFinderError::InvalidEdge(format!(
                "locus {} has no node with index {}",
                edge.locus_index, node_index
            ))
        })
    };
    Ok((locus, node(edge.node_index1)?, node(edge.node_index2)?))
}
