use std::fmt;

/// Kind of read evidence behind an SV observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SvEvidenceType {
    Pair,      // Anomalous read pair (both mates observed)
    LocalPair, // One read of an anomalous pair, counted on its own breakend
    Cigar,     // Large indel inside a single alignment
    SoftClip,  // Soft-clipped read end
    Split,     // Split (supplementary) alignment
    Shadow,    // Unmapped mate of an anchored read
    Unknown,
}

impl SvEvidenceType {
    pub const COUNT: usize = 7;

    pub const ALL: [SvEvidenceType; SvEvidenceType::COUNT] = [
        SvEvidenceType::Pair,
        SvEvidenceType::LocalPair,
        SvEvidenceType::Cigar,
        SvEvidenceType::SoftClip,
        SvEvidenceType::Split,
        SvEvidenceType::Shadow,
        SvEvidenceType::Unknown,
    ];

    /// Evidence derived from the relative placement of a read pair
    pub fn is_pair_type(self) -> bool {
        matches!(self, SvEvidenceType::Pair | SvEvidenceType::LocalPair)
    }

    pub fn label(self) -> &'static str {
        match self {
            SvEvidenceType::Pair => "pair",
            SvEvidenceType::LocalPair => "local_pair",
            SvEvidenceType::Cigar => "cigar",
            SvEvidenceType::SoftClip => "softclip",
            SvEvidenceType::Split => "split",
            SvEvidenceType::Shadow => "shadow",
            SvEvidenceType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SvEvidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observation counts per evidence type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvEvidenceCounts {
    counts: [u32; SvEvidenceType::COUNT],
}

impl SvEvidenceCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, evtype: SvEvidenceType) -> u32 {
        self.counts[evtype as usize]
    }

    pub fn add(&mut self, evtype: SvEvidenceType, count: u32) {
        self.counts[evtype as usize] += count;
    }

    pub fn merge(&mut self, other: &SvEvidenceCounts) {
        for (lhs, rhs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *lhs += rhs;
        }
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn clear(&mut self) {
        self.counts = [0; SvEvidenceType::COUNT];
    }
}

impl fmt::Display for SvEvidenceCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for evtype in SvEvidenceType::ALL {
            let count = self.get(evtype);
            if count == 0 {
                continue;
            }
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{evtype}={count}")?;
            first = false;
        }
        Ok(())
    }
}
