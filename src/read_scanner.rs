use std::collections::HashMap;
use std::fmt;

use rust_htslib::bam;

use crate::locus_graph::ReadLocus;
use crate::sv_candidate::SvObservation;

/// Chromosome name to alignment-header target index
pub type ChromToIndex = HashMap<String, i32>;

/// The record features candidate discovery needs to pair up mates
pub trait EvidenceRecord: fmt::Debug {
    fn qname(&self) -> &[u8];
    fn is_first_in_pair(&self) -> bool;
}

impl EvidenceRecord for bam::Record {
    fn qname(&self) -> &[u8] {
        bam::Record::qname(self)
    }

    /// Read 1 unless flagged as the last mate
    fn is_first_in_pair(&self) -> bool {
        !self.is_last_in_template()
    }
}

/// Read classification and breakend derivation rules
///
/// Implementations decide which reads count as SV evidence and how a read or
/// read pair translates into loci and observations. `sample_index` selects the
/// per-sample fragment size statistics.
pub trait ReadScanner {
    type Record: EvidenceRecord;

    /// Low quality, unmapped, duplicate and similar reads
    fn is_read_filtered(&self, read: &Self::Record) -> bool;

    fn is_proper_pair(&self, read: &Self::Record, sample_index: usize) -> bool;

    fn is_large_fragment(&self, read: &Self::Record, sample_index: usize) -> bool;

    /// Read carries a local signal (indel, soft-clip) worth assembling
    fn is_local_assembly_evidence(&self, read: &Self::Record) -> bool;

    /// Zero or more loci, each with one or two sides
    fn sv_loci(
        &self,
        read: &Self::Record,
        sample_index: usize,
        chrom_to_index: &ChromToIndex,
    ) -> Vec<ReadLocus>;

    /// Typed observations for a read and its mate, when the mate was captured
    fn breakend_pair(
        &self,
        local: &Self::Record,
        remote: Option<&Self::Record>,
        sample_index: usize,
        chrom_to_index: &ChromToIndex,
    ) -> Vec<SvObservation>;
}
