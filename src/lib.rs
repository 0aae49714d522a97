// Library exports for svfinder
pub mod alignment_stream;
pub mod candidate_data;
pub mod config;
pub mod edge_batch;
pub mod error;
pub mod evidence_collector;
pub mod evidence_type;
pub mod genome_interval;
pub mod locus_graph;
pub mod observation_assigner;
pub mod overlap_consolidator;
pub mod read_scanner;
pub mod result_validator;
pub mod sv_candidate;
pub mod sv_finder;

pub use config::{CountCheckMode, SvFinderConfig};
pub use error::SvFinderError;
pub use sv_finder::{EdgeCandidates, EdgeStatus, SvFinder};
