use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_htslib::bam;
use rust_htslib::bam::Read as HtsRead;

use crate::genome_interval::GenomeInterval;
use crate::read_scanner::ChromToIndex;

/// Repositionable source of alignment records for one sample
///
/// Streams are stateful: `set_region` resets iteration, and a stream must not be
/// shared between concurrent edge evaluations.
pub trait AlignmentStream {
    type Record;

    fn set_region(&mut self, interval: &GenomeInterval) -> Result<()>;

    /// Next record overlapping the current region, `None` when exhausted
    fn next_record(&mut self) -> Result<Option<Self::Record>>;
}

/// Indexed BAM/CRAM stream backed by htslib
pub struct HtsAlignmentStream {
    reader: bam::IndexedReader,
    path: PathBuf,
}

impl HtsAlignmentStream {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = bam::IndexedReader::from_path(path)
            .with_context(|| format!("Failed to open indexed alignment file: {}", path.display()))?;
        Ok(HtsAlignmentStream {
            reader,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Chromosome name to target index map from the file header
    pub fn chrom_to_index(&self) -> ChromToIndex {
        self.reader
            .header()
            .target_names()
            .iter()
            .enumerate()
            .map(|(i, name)| (String::from_utf8_lossy(name).to_string(), i as i32))
            .collect()
    }
}

impl AlignmentStream for HtsAlignmentStream {
    type Record = bam::Record;

    fn set_region(&mut self, interval: &GenomeInterval) -> Result<()> {
        self.reader
            .fetch((interval.tid, interval.range.begin, interval.range.end))
            .with_context(|| {
                format!(
                    "Failed to set region {} in alignment file: {}",
                    interval,
                    self.path.display()
                )
            })
    }

    fn next_record(&mut self) -> Result<Option<bam::Record>> {
        let mut record = bam::Record::new();
        match self.reader.read(&mut record) {
            None => Ok(None),
            Some(Ok(())) => Ok(Some(record)),
            Some(Err(e)) => Err(e).with_context(|| {
                format!("Failed to read alignment record from: {}", self.path.display())
            }),
        }
    }
}
