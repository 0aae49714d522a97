//! Sanity check of a finished edge evaluation
//!
//! Pair-type read and pair counts recorded on each candidate are compared with
//! counts tallied independently from the pair associations in the evidence
//! groups. Any difference is a bookkeeping bug in assignment or consolidation.

use anyhow::Result;

use crate::candidate_data::SvCandidateSetData;
use crate::config::CountCheckMode;
use crate::error::SvFinderError;
use crate::sv_candidate::SvCandidate;

/// Pair-type evidence tallied from the evidence groups for one candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataEvidenceCount {
    pub read_count: u32,
    pub pair_count: u32,
}

/// Tally pair-type links per candidate index
pub fn tally_pair_evidence<R>(
    sv_data: &SvCandidateSetData<R>,
    sv_count: usize,
) -> Result<Vec<DataEvidenceCount>> {
    let mut counts = vec![DataEvidenceCount::default(); sv_count];

    for group in sv_data.groups() {
        for pair in group.iter() {
            for link in &pair.sv_links {
                let count = counts.get_mut(link.index).ok_or(
                    SvFinderError::InvalidCandidateIndex {
                        index: link.index,
                        candidate_count: sv_count,
                    },
                )?;

                if !link.evtype.is_pair_type() {
                    continue;
                }
                count.read_count += pair.read_count() as u32;
                if pair.is_complete() {
                    count.pair_count += 2;
                }
            }
        }
    }

    Ok(counts)
}

/// Fail if any candidate's recorded counts disagree with the evidence groups
pub fn check_result<R>(
    sv_data: &SvCandidateSetData<R>,
    svs: &[SvCandidate],
    mode: CountCheckMode,
) -> Result<()> {
    if svs.is_empty() {
        return Ok(());
    }

    let data_counts = tally_pair_evidence(sv_data, svs.len())?;

    for (position, (sv, data_count)) in svs.iter().zip(data_counts).enumerate() {
        if sv.candidate_index != position {
            return Err(SvFinderError::CandidateIndexMismatch {
                position,
                candidate_index: sv.candidate_index,
            }
            .into());
        }

        let bp1_pair_count = sv.bp1.pair_count();
        let bp2_pair_count = sv.bp2.pair_count();
        if bp1_pair_count != bp2_pair_count {
            return Err(SvFinderError::UnbalancedPairCount {
                bp1_pair_count,
                bp2_pair_count,
                candidate: sv.to_string(),
            }
            .into());
        }

        let sv_read_count = sv.bp1.local_pair_count() + sv.bp2.local_pair_count();
        let sv_pair_count = bp1_pair_count + bp2_pair_count;

        let is_read_count_mismatch = match mode {
            CountCheckMode::Lenient => sv_read_count > data_count.read_count,
            CountCheckMode::Strict => sv_read_count != data_count.read_count,
        };

        if is_read_count_mismatch || sv_pair_count != data_count.pair_count {
            return Err(SvFinderError::EvidenceCountMismatch {
                candidate_read_count: sv_read_count,
                data_read_count: data_count.read_count,
                candidate_pair_count: sv_pair_count,
                data_pair_count: data_count.pair_count,
                candidate: sv.to_string(),
            }
            .into());
        }
    }

    Ok(())
}
