//! Merge candidates that have grown to overlap each other
//!
//! A single pass: each candidate is compared against the earlier surviving
//! candidates and merged into the first one it intersects. Overlaps created by
//! the pass itself are not re-checked.

use log::debug;

use crate::candidate_data::SvCandidateSetData;
use crate::sv_candidate::SvCandidate;

/// Consolidate overlapping candidates and remap every pair association
///
/// Returns the old-index to new-index map for all candidates that were present
/// on entry. Surviving candidates are renumbered so `candidate_index` equals
/// list position.
pub fn consolidate_overlap<R>(
    sv_data: &mut SvCandidateSetData<R>,
    svs: &mut Vec<SvCandidate>,
) -> Vec<usize> {
    let sv_count = svs.len();

    // merge_target[i] is the earlier candidate that absorbed candidate i
    let mut merge_target: Vec<Option<usize>> = vec![None; sv_count];
    for outer_index in 1..sv_count {
        for inner_index in 0..outer_index {
            if merge_target[inner_index].is_some() {
                continue;
            }
            if svs[inner_index].is_intersect(&svs[outer_index]) {
                debug!("Merging outer:inner: {} {}", outer_index, inner_index);
                let (head, tail) = svs.split_at_mut(outer_index);
                head[inner_index].merge(&tail[0]);
                merge_target[outer_index] = Some(inner_index);
                break;
            }
        }
    }

    // Compute every move before any candidate is moved. A merge target is
    // always a lower surviving index, so its new position is already known.
    let mut move_map = Vec::with_capacity(sv_count);
    let mut deleted_count = 0;
    for (index, target) in merge_target.iter().enumerate() {
        match target {
            Some(inner_index) => {
                let new_index = move_map[*inner_index];
                debug!("deleted index: {} moved to: {}", index, new_index);
                move_map.push(new_index);
                deleted_count += 1;
            }
            None => move_map.push(index - deleted_count),
        }
    }

    if deleted_count > 0 {
        *svs = std::mem::take(svs)
            .into_iter()
            .zip(merge_target.iter())
            .filter(|(_, target)| target.is_none())
            .map(|(sv, _)| sv)
            .collect();

        for link in sv_data.links_mut() {
            if let Some(&new_index) = move_map.get(link.index) {
                link.index = new_index;
            }
        }
    }

    for (index, sv) in svs.iter_mut().enumerate() {
        sv.candidate_index = index;
    }

    debug!("Candidate count after consolidation: {}", svs.len());
    move_map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate_data::SvPairAssociation;
    use crate::evidence_type::SvEvidenceType;
    use crate::genome_interval::GenomeInterval;
    use crate::read_scanner::EvidenceRecord;
    use crate::sv_candidate::{SvBreakend, SvBreakendState};

    #[derive(Debug)]
    struct Rec(&'static str);

    impl EvidenceRecord for Rec {
        fn qname(&self) -> &[u8] {
            self.0.as_bytes()
        }

        fn is_first_in_pair(&self) -> bool {
            true
        }
    }

    fn candidate(index: usize, bp1: (i64, i64), bp2: (i64, i64)) -> SvCandidate {
        SvCandidate {
            bp1: SvBreakend::new(GenomeInterval::new(0, bp1.0, bp1.1), SvBreakendState::RightOpen),
            bp2: SvBreakend::new(GenomeInterval::new(1, bp2.0, bp2.1), SvBreakendState::LeftOpen),
            candidate_index: index,
        }
    }

    fn linked_data(links: &[usize]) -> SvCandidateSetData<Rec> {
        let names = ["r0", "r1", "r2", "r3", "r4", "r5"];
        let mut data = SvCandidateSetData::new();
        let group = data.data_group_mut(0);
        for name in names.iter().take(links.len()) {
            group.add(Rec(*name), false).unwrap();
        }
        for (pair, &index) in group.iter_mut().zip(links) {
            pair.sv_links.push(SvPairAssociation::new(index, SvEvidenceType::Pair));
        }
        data
    }

    fn link_indices(data: &SvCandidateSetData<Rec>) -> Vec<usize> {
        data.groups()[0]
            .iter()
            .flat_map(|pair| pair.sv_links.iter().map(|link| link.index))
            .collect()
    }

    #[test]
    fn test_three_candidate_consolidation() {
        let mut svs = vec![
            candidate(0, (100, 150), (100, 150)),
            candidate(1, (140, 200), (100, 150)),
            candidate(2, (500, 600), (100, 150)),
        ];
        let mut data = linked_data(&[0, 1, 2]);

        let move_map = consolidate_overlap(&mut data, &mut svs);

        assert_eq!(move_map, vec![0, 0, 1]);
        assert_eq!(svs.len(), 2);
        assert_eq!(svs[0].bp1.interval, GenomeInterval::new(0, 100, 200));
        assert_eq!(svs[1].bp1.interval, GenomeInterval::new(0, 500, 600));
        assert_eq!(svs[1].candidate_index, 1);
        assert_eq!(link_indices(&data), vec![0, 0, 1]);
    }

    #[test]
    fn test_merge_into_shifted_inner() {
        // 1 merges into 0, then 3 merges into 2 which has shifted down to 1
        let mut svs = vec![
            candidate(0, (100, 150), (100, 150)),
            candidate(1, (120, 130), (110, 120)),
            candidate(2, (1000, 1100), (100, 150)),
            candidate(3, (1050, 1200), (140, 160)),
            candidate(4, (5000, 5100), (100, 150)),
        ];
        let mut data = linked_data(&[4, 3, 2, 1, 0]);

        let move_map = consolidate_overlap(&mut data, &mut svs);

        assert_eq!(move_map, vec![0, 0, 1, 1, 2]);
        assert_eq!(svs.len(), 3);
        assert_eq!(svs[1].bp1.interval, GenomeInterval::new(0, 1000, 1200));
        assert_eq!(svs[1].bp2.interval, GenomeInterval::new(1, 100, 160));
        assert_eq!(link_indices(&data), vec![2, 1, 1, 0, 0]);
        for (i, sv) in svs.iter().enumerate() {
            assert_eq!(sv.candidate_index, i);
        }
    }

    #[test]
    fn test_no_overlap_leaves_list_untouched() {
        let mut svs = vec![
            candidate(0, (100, 150), (100, 150)),
            candidate(1, (300, 400), (100, 150)),
        ];
        let before = svs.clone();
        let mut data = linked_data(&[1, 0]);
        let move_map = consolidate_overlap(&mut data, &mut svs);
        assert_eq!(move_map, vec![0, 1]);
        assert_eq!(svs, before);
        assert_eq!(link_indices(&data), vec![1, 0]);
    }

    #[test]
    fn test_single_pass_keeps_transitive_overlap() {
        // 2 only reaches 0 after 1 has grown it
        let mut svs = vec![
            candidate(0, (100, 150), (100, 150)),
            candidate(1, (140, 300), (100, 150)),
            candidate(2, (250, 260), (100, 150)),
        ];
        let mut data = linked_data(&[2]);
        consolidate_overlap(&mut data, &mut svs);
        assert_eq!(svs.len(), 1);
        assert_eq!(link_indices(&data), vec![0]);

        // An inner candidate that only grows into an earlier survivor is not revisited
        let mut svs = vec![
            candidate(0, (100, 150), (100, 150)),
            candidate(1, (400, 500), (100, 150)),
            candidate(2, (140, 450), (100, 150)),
        ];
        let mut data = linked_data(&[0, 1, 2]);
        consolidate_overlap(&mut data, &mut svs);
        assert_eq!(svs.len(), 2);
        assert_eq!(svs[0].bp1.interval, GenomeInterval::new(0, 100, 450));
        assert!(svs[0].is_intersect(&svs[1]));
        assert_eq!(link_indices(&data), vec![0, 1, 0]);
    }
}
