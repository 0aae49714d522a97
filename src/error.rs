use thiserror::Error;

/// Fatal faults raised while evaluating an edge
///
/// These signal a contract violation by a collaborator or a bookkeeping bug in
/// candidate assignment, never a recoverable data condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SvFinderError {
    #[error("Unexpected svlocus counts from alignment record: {read}\n\tlocus: {locus}")]
    UnexpectedLocusCounts { read: String, locus: String },

    #[error("Unexpected alignment name collision. Sample index: {sample_index} read name: '{qname}'")]
    ReadNameCollision { sample_index: usize, qname: String },

    #[error("Edge references missing graph element: {0}")]
    InvalidEdge(String),

    #[error("Searching for candidate index: {index} with candidate count: {candidate_count}")]
    InvalidCandidateIndex { index: usize, candidate_count: usize },

    #[error("Candidate at position {position} carries index {candidate_index}")]
    CandidateIndexMismatch { position: usize, candidate_index: usize },

    #[error(
        "Unexpected difference in candidate and data read counts.\n\
         \tcandidate read count: {candidate_read_count} data read count: {data_read_count}\n\
         \tcandidate pair count: {candidate_pair_count} data pair count: {data_pair_count}\n\
         \tcandidate: {candidate}"
    )]
    EvidenceCountMismatch {
        candidate_read_count: u32,
        data_read_count: u32,
        candidate_pair_count: u32,
        data_pair_count: u32,
        candidate: String,
    },

    #[error("Breakend pair counts differ: bp1: {bp1_pair_count} bp2: {bp2_pair_count}\n\tcandidate: {candidate}")]
    UnbalancedPairCount {
        bp1_pair_count: u32,
        bp2_pair_count: u32,
        candidate: String,
    },
}
