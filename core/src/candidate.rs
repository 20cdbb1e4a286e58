//! Candidate types for transcription ranking.
//!
//! This module provides:
//! - `CandidateRecord`: one output together with the counters used to rank it
//! - `CandidateList`: paginated list of candidate texts

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Range;

/// A candidate output and the statistics of the segmentation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub output: String,
    /// Tone-code segments that were converted by a dictionary hit.
    pub tone_converted: usize,
    /// Longest tone digit run among the tone-code segments.
    pub max_tone_digits: usize,
    pub segment_count: usize,
    /// Segments whose value differs from their own literal text.
    pub total_converted: usize,
    /// False only for the literal fallback of an unknown code.
    pub transformed: bool,
}

impl CandidateRecord {
    /// The untransformed echo of `code`, all counters zero.
    pub fn literal<T: Into<String>>(code: T) -> Self {
        Self {
            output: code.into(),
            tone_converted: 0,
            max_tone_digits: 0,
            segment_count: 0,
            total_converted: 0,
            transformed: false,
        }
    }

    /// Compare on counters only: more tone conversions, longer tone runs,
    /// more conversions, then fewer segments come first.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .tone_converted
            .cmp(&self.tone_converted)
            .then_with(|| other.max_tone_digits.cmp(&self.max_tone_digits))
            .then_with(|| other.total_converted.cmp(&self.total_converted))
            .then_with(|| self.segment_count.cmp(&other.segment_count))
    }

    /// Full ordering used for the final candidate list; ties on the counters
    /// fall back to the output's UTF-8 byte order.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.rank_cmp(other)
            .then_with(|| self.output.cmp(&other.output))
    }

    /// Whether `self` should replace `other` when both carry the same output.
    pub fn outranks(&self, other: &Self) -> bool {
        self.rank_cmp(other) == Ordering::Less
    }
}

/// A paginated list of candidate texts.
#[derive(Debug, Clone)]
pub struct CandidateList {
    /// All available candidates
    candidates: Vec<String>,

    /// Number of candidates per page
    page_size: usize,

    /// Current page index (0-based)
    current_page: usize,
}

impl CandidateList {
    /// Create a new empty candidate list.
    pub fn new() -> Self {
        Self::with_page_size(9)
    }

    /// Create a candidate list with specified page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            candidates: Vec::new(),
            page_size: page_size.max(1),
            current_page: 0,
        }
    }

    /// Set the candidates, resetting pagination state.
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
        self.current_page = 0;
    }

    /// Get all candidates.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Get the total number of pages.
    pub fn num_pages(&self) -> usize {
        self.candidates.len().div_ceil(self.page_size)
    }

    /// Get the current page index (0-based).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    fn current_page_range(&self) -> Range<usize> {
        let start = (self.current_page * self.page_size).min(self.candidates.len());
        let end = (start + self.page_size).min(self.candidates.len());
        start..end
    }

    /// Get the candidates for the current page.
    pub fn current_page_candidates(&self) -> &[String] {
        &self.candidates[self.current_page_range()]
    }

    /// Global index of the `page_index`-th entry on the current page.
    pub fn global_index(&self, page_index: usize) -> Option<usize> {
        let range = self.current_page_range();
        let index = range.start + page_index;
        range.contains(&index).then_some(index)
    }

    /// Move to the previous page.
    /// Returns true if the page changed.
    pub fn page_up(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Move to the next page.
    /// Returns true if the page changed.
    pub fn page_down(&mut self) -> bool {
        if self.current_page + 1 < self.num_pages() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Clear the candidate list.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.current_page = 0;
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(output: &str, tone: usize, digits: usize, total: usize, segs: usize) -> CandidateRecord {
        CandidateRecord {
            output: output.to_string(),
            tone_converted: tone,
            max_tone_digits: digits,
            segment_count: segs,
            total_converted: total,
            transformed: total > 0,
        }
    }

    #[test]
    fn tone_conversion_dominates() {
        let toned = record("b", 1, 1, 1, 3);
        let plain = record("a", 0, 0, 3, 1);
        assert!(toned.outranks(&plain));
        assert_eq!(toned.display_cmp(&plain), Ordering::Less);
    }

    #[test]
    fn fewer_segments_break_ties() {
        let one = record("θ", 0, 0, 1, 1);
        let two = record("θ", 0, 0, 1, 2);
        assert!(one.outranks(&two));
        assert!(!two.outranks(&one));
    }

    #[test]
    fn equal_counters_order_by_output() {
        let a = record("a", 0, 0, 1, 1);
        let b = record("b", 0, 0, 1, 1);
        assert!(!a.outranks(&b));
        assert_eq!(a.display_cmp(&b), Ordering::Less);
    }

    #[test]
    fn paging_and_global_index() {
        let mut list = CandidateList::with_page_size(2);
        list.set_candidates(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(list.num_pages(), 2);
        assert_eq!(list.global_index(1), Some(1));
        assert!(list.page_down());
        assert_eq!(list.current_page_candidates(), ["c".to_string()]);
        assert_eq!(list.global_index(0), Some(2));
        assert_eq!(list.global_index(1), None);
        assert!(!list.page_down());
        assert!(list.page_up());
        assert!(!list.page_up());
    }

    #[test]
    fn empty_list() {
        let list = CandidateList::default();
        assert!(list.is_empty());
        assert_eq!(list.num_pages(), 0);
        assert!(list.current_page_candidates().is_empty());
        assert_eq!(list.global_index(0), None);
    }
}
