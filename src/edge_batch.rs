//! Evaluate many edges in parallel, one finder per chunk of edges

use anyhow::{Context, Result};
use log::debug;
use rayon::prelude::*;

use crate::alignment_stream::AlignmentStream;
use crate::locus_graph::EdgeInfo;
use crate::read_scanner::{ChromToIndex, ReadScanner};
use crate::sv_finder::{EdgeCandidates, SvFinder};

/// Evaluate every edge, returning results in input edge order
///
/// Edges are split into one contiguous chunk per rayon thread and `make_finder`
/// is called once per chunk, so at most `rayon::current_num_threads()` finders
/// (and their open streams) are built. Each finder evaluates its chunk serially.
pub fn find_candidates_for_edges<S, A, F>(
    edges: &[EdgeInfo],
    chrom_to_index: &ChromToIndex,
    make_finder: F,
) -> Result<Vec<EdgeCandidates<S::Record>>>
where
    S: ReadScanner,
    S::Record: Send,
    A: AlignmentStream<Record = S::Record>,
    F: Fn() -> Result<SvFinder<S, A>> + Sync + Send,
{
    if edges.is_empty() {
        return Ok(Vec::new());
    }

    let thread_count = rayon::current_num_threads().max(1);
    let chunk_size = edges.len().div_ceil(thread_count);
    debug!(
        "Evaluating {} edges in chunks of {} over {} threads",
        edges.len(),
        chunk_size,
        thread_count
    );

    let chunks = edges
        .par_chunks(chunk_size)
        .map(|chunk| -> Result<Vec<EdgeCandidates<S::Record>>> {
            let mut finder = make_finder().context("Failed to create SV finder")?;
            chunk
                .iter()
                .map(|edge| {
                    finder
                        .evaluate_edge(chrom_to_index, edge)
                        .with_context(|| format!("Failed to evaluate edge: {edge}"))
                })
                .collect()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(chunks.into_iter().flatten().collect())
}
