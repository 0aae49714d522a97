//! Translate gathered read pairs into observations and fold them into candidates
//!
//! Few candidates exist per edge, so candidates are searched linearly and the
//! first intersecting candidate in index order takes the observation.

use log::{debug, trace};

use crate::candidate_data::{SvCandidateSetData, SvPairAssociation};
use crate::read_scanner::{ChromToIndex, ReadScanner};
use crate::sv_candidate::{SvCandidate, SvObservation};

/// Merge each observation into the first intersecting candidate, or start a new one
///
/// If `is_exclude_pair_type` is set, pair-type observations are skipped. Spanning
/// observations link the read pair to the candidate they land in.
pub fn assign_pair_observations_to_sv_candidates(
    is_exclude_pair_type: bool,
    observations: &[SvObservation],
    sv_links: &mut Vec<SvPairAssociation>,
    svs: &mut Vec<SvCandidate>,
) {
    for obs in observations {
        trace!("Starting assignment for observation: {}", obs);
        if is_exclude_pair_type && obs.evtype.is_pair_type() {
            trace!("Pair type exclusion");
            continue;
        }

        let is_spanning = obs.is_spanning();

        let sv_index = match svs.iter().position(|sv| sv.is_intersect_observation(obs)) {
            Some(sv_index) => {
                trace!("Adding to candidate index: {} match: {}", sv_index, svs[sv_index]);
                svs[sv_index].merge_observation(obs);
                sv_index
            }
            None => {
                let sv_index = svs.len();
                trace!("New candidate index: {}", sv_index);
                svs.push(SvCandidate::from_observation(obs, sv_index));
                sv_index
            }
        };

        if is_spanning {
            sv_links.push(SvPairAssociation::new(sv_index, obs.evtype));
        }
    }
}

/// Build candidates from every read pair of every sample, rebuilding all links
pub fn assign_candidates_from_data<S: ReadScanner>(
    chrom_to_index: &ChromToIndex,
    scanner: &S,
    exclude_unpaired: bool,
    sv_data: &mut SvCandidateSetData<S::Record>,
    svs: &mut Vec<SvCandidate>,
) {
    for group in sv_data.groups_mut() {
        let sample_index = group.sample_index();
        for pair in group.iter_mut() {
            pair.sv_links.clear();

            let (local, remote) = match (&pair.read1, &pair.read2) {
                (Some(read1), read2) => (read1, read2.as_ref()),
                (None, Some(read2)) => (read2, None),
                (None, None) => {
                    trace!("Skipping empty read pair in sample {}", sample_index);
                    continue;
                }
            };

            let observations = scanner.breakend_pair(
                &local.record,
                remote.map(|read| &read.record),
                sample_index,
                chrom_to_index,
            );

            // Both sides of the pair must be observed to support a pair-type call
            let is_exclude_pair_type = exclude_unpaired && remote.is_none();

            assign_pair_observations_to_sv_candidates(
                is_exclude_pair_type,
                &observations,
                &mut pair.sv_links,
                svs,
            );
        }
    }

    debug!("Candidate count before consolidation: {}", svs.len());
}
