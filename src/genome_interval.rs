use std::fmt;

/// Half-open position range `[begin, end)` on a single chromosome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PosRange {
    pub begin: i64,
    pub end: i64,
}

impl PosRange {
    pub fn new(begin: i64, end: i64) -> Self {
        PosRange { begin, end }
    }

    pub fn size(&self) -> i64 {
        (self.end - self.begin).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }

    /// Two ranges intersect when they share at least one position
    pub fn is_intersect(&self, other: &PosRange) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    pub fn is_superset_of(&self, other: &PosRange) -> bool {
        self.begin <= other.begin && self.end >= other.end
    }

    /// Grow this range to the union hull of both ranges
    pub fn merge_range(&mut self, other: &PosRange) {
        self.begin = self.begin.min(other.begin);
        self.end = self.end.max(other.end);
    }
}

impl fmt::Display for PosRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.begin, self.end)
    }
}

/// Chromosome index plus position range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GenomeInterval {
    pub tid: i32,
    pub range: PosRange,
}

impl GenomeInterval {
    pub fn new(tid: i32, begin: i64, end: i64) -> Self {
        GenomeInterval {
            tid,
            range: PosRange::new(begin, end),
        }
    }

    pub fn is_intersect(&self, other: &GenomeInterval) -> bool {
        self.tid == other.tid && self.range.is_intersect(&other.range)
    }

    pub fn is_superset_of(&self, other: &GenomeInterval) -> bool {
        self.tid == other.tid && self.range.is_superset_of(&other.range)
    }
}

impl fmt::Display for GenomeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tid, self.range)
    }
}
