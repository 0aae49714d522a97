//! Gather the reads around one node of an edge that may support an SV
//! connecting it to the other node.

use anyhow::Result;
use log::{debug, trace, warn};

use crate::alignment_stream::AlignmentStream;
use crate::candidate_data::{SvCandidateSetData, SvCandidateSetSampleGroup};
use crate::error::SvFinderError;
use crate::locus_graph::{ReadLocus, SvLocusNode};
use crate::read_scanner::{ChromToIndex, EvidenceRecord, ReadScanner};

/// Test if a read supports an SV on this edge, if so add it to the sample group
#[allow(clippy::too_many_arguments)]
pub fn add_sv_node_read<S: ReadScanner>(
    chrom_to_index: &ChromToIndex,
    scanner: &S,
    local_node: &SvLocusNode,
    remote_node: &SvLocusNode,
    record: S::Record,
    sample_index: usize,
    is_expect_repeat: bool,
    max_group_size: usize,
    group: &mut SvCandidateSetSampleGroup<S::Record>,
) -> Result<()> {
    if scanner.is_read_filtered(&record) {
        return Ok(());
    }

    // Proper-pair bit is not trusted, classify the pair directly
    let is_anomalous = !scanner.is_proper_pair(&record, sample_index);
    let is_large_fragment = scanner.is_large_fragment(&record, sample_index);
    let is_large_anomalous = is_anomalous && is_large_fragment;

    let is_local_assembly_evidence =
        !is_large_anomalous && scanner.is_local_assembly_evidence(&record);

    if !(is_large_anomalous || is_local_assembly_evidence) {
        return Ok(());
    }

    // Bound memory in pathological regions (centromere pileups, etc.)
    if group.len() >= max_group_size {
        if !group.is_incomplete() {
            warn!(
                "Evidence for sample {} reached {} read pairs, further reads for this edge are dropped",
                sample_index, max_group_size
            );
        }
        group.set_incomplete();
        return Ok(());
    }

    let mut is_matched = false;
    for locus in scanner.sv_loci(&record, sample_index, chrom_to_index) {
        let (local, remote) = match locus {
            ReadLocus::Single(side) => (side, None),
            ReadLocus::Pair(first, second) => {
                let (local, remote) = if first.is_out_count {
                    (first, second)
                } else {
                    (second, first)
                };
                if !local.is_out_count {
                    return Err(SvFinderError::UnexpectedLocusCounts {
                        read: format!("{record:?}"),
                        locus: locus.to_string(),
                    }
                    .into());
                }
                (local, Some(remote))
            }
        };

        if let Some(remote) = remote {
            if !remote.interval.is_intersect(&remote_node.interval) {
                continue;
            }
        }
        if !local.interval.is_intersect(&local_node.interval) {
            continue;
        }

        // At most one contribution per read and node pair
        is_matched = true;
        break;
    }

    if is_matched {
        trace!(
            "Adding read '{}' to sample {}",
            String::from_utf8_lossy(record.qname()),
            sample_index
        );
        group.add(record, is_expect_repeat)?;
    }
    Ok(())
}

/// Scan every sample stream over the local node's search interval
#[allow(clippy::too_many_arguments)]
pub fn add_sv_node_data<S, A>(
    chrom_to_index: &ChromToIndex,
    scanner: &S,
    local_node: &SvLocusNode,
    remote_node: &SvLocusNode,
    max_group_size: usize,
    streams: &mut [A],
    sv_data: &mut SvCandidateSetData<S::Record>,
) -> Result<()>
where
    S: ReadScanner,
    A: AlignmentStream<Record = S::Record>,
{
    let search_interval = local_node.search_interval();

    let mut is_expect_repeat = sv_data.set_new_search_interval(search_interval);

    // Name collision detection is relaxed for any node pair on one chromosome:
    // reads with very large deletions show up in both regions even when the
    // regions are far apart.
    // TODO: restore precise collision detection for same-chromosome node pairs
    if !is_expect_repeat {
        is_expect_repeat = local_node.interval.tid == remote_node.interval.tid;
    }

    debug!(
        "add_sv_node_data: bp_interval: {} evidence_range: {} search_interval: {} is_expect_repeat: {}",
        local_node.interval, local_node.evidence_range, search_interval, is_expect_repeat
    );

    for (sample_index, stream) in streams.iter_mut().enumerate() {
        let group = sv_data.data_group_mut(sample_index);
        group.set_search_interval(search_interval);

        stream.set_region(&search_interval)?;

        trace!("add_sv_node_data: scanning sample: {}", sample_index);
        while let Some(record) = stream.next_record()? {
            add_sv_node_read(
                chrom_to_index,
                scanner,
                local_node,
                remote_node,
                record,
                sample_index,
                is_expect_repeat,
                max_group_size,
                group,
            )?;
        }
    }
    Ok(())
}
