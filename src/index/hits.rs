use std::fmt::{Debug, Display};

/// One ranked match: training index and similarity score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEntry {
    pub index: usize,
    pub score: f64,
}

/// Structure to store search results
#[derive(Clone, PartialEq, Default)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort by descending score; equal scores keep ascending training index.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|h| !h.score.is_nan());
        self.list
            .sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
        self
    }

    /// Keep at most `k` hits
    pub fn truncate(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }

    /// The rank-0 hit
    #[inline]
    pub fn best(&self) -> Option<&HitEntry> {
        self.list.first()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitEntry> {
        self.list.iter()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            // Pretty print: each hit on a new line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    #{}: {:.6}", hit.index, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl Display for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (rank, hit) in self.list.iter().enumerate() {
            writeln!(f, "{rank}\t#{}\t{:.6}", hit.index, hit.score)?;
        }
        Ok(())
    }
}
