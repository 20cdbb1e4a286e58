//! Enumeration of every way to cut a code string into contiguous parts.
//!
//! A code of length `n` has `n - 1` inner boundaries. Each subset of those
//! boundaries is one partition, so the partitions are exactly the bitmasks
//! `0..2^(n-1)`: bit `i` set means "cut after byte `i`". Walking the masks
//! replaces a recursive search with a flat loop.

/// Largest code length the enumerator accepts. Real input is cut off far
/// earlier by the long-buffer heuristic.
pub const MAX_PARTITION_LEN: usize = 24;

/// Iterator over all partitions of an ASCII code.
///
/// # Example
/// ```
/// use scripa_core::segmentation::Partitions;
///
/// let all: Vec<Vec<&str>> = Partitions::new("abc").collect();
/// assert_eq!(all.len(), 4);
/// assert!(all.contains(&vec!["a", "bc"]));
/// ```
#[derive(Debug, Clone)]
pub struct Partitions<'a> {
    code: &'a str,
    mask: u32,
    end: u32,
}

impl<'a> Partitions<'a> {
    /// Partitions of `code`. Empty codes, codes that are not pure ASCII and
    /// codes longer than [`MAX_PARTITION_LEN`] yield nothing.
    pub fn new(code: &'a str) -> Self {
        let n = code.len();
        let end = if n == 0 || n > MAX_PARTITION_LEN || !code.is_ascii() {
            0
        } else {
            1u32 << (n - 1)
        };
        Self { code, mask: 0, end }
    }

    /// Number of partitions still to be produced.
    pub fn remaining(&self) -> usize {
        (self.end - self.mask) as usize
    }
}

/// Split `code` at the boundaries selected by `mask`.
fn split_by_mask(code: &str, mask: u32) -> Vec<&str> {
    let mut parts = Vec::with_capacity(mask.count_ones() as usize + 1);
    let mut start = 0;
    for i in 0..code.len().saturating_sub(1) {
        if mask & (1 << i) != 0 {
            parts.push(&code[start..=i]);
            start = i + 1;
        }
    }
    parts.push(&code[start..]);
    parts
}

impl<'a> Iterator for Partitions<'a> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask >= self.end {
            return None;
        }
        let parts = split_by_mask(self.code, self.mask);
        self.mask += 1;
        Some(parts)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Partitions<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_powers_of_two() {
        for n in 1..=9 {
            let code = "x".repeat(n);
            assert_eq!(Partitions::new(&code).count(), 1 << (n - 1));
        }
    }

    #[test]
    fn every_partition_covers_the_code() {
        let code = "aT1b";
        for parts in Partitions::new(code) {
            assert!(parts.iter().all(|p| !p.is_empty()));
            assert_eq!(parts.concat(), code);
        }
    }

    #[test]
    fn first_is_whole_and_last_is_single_chars() {
        let all: Vec<_> = Partitions::new("th").collect();
        assert_eq!(all, vec![vec!["th"], vec!["t", "h"]]);
    }

    #[test]
    fn empty_and_oversized_codes_yield_nothing() {
        assert_eq!(Partitions::new("").count(), 0);
        let long = "a".repeat(MAX_PARTITION_LEN + 1);
        assert_eq!(Partitions::new(&long).len(), 0);
    }

    #[test]
    fn non_ascii_codes_yield_nothing() {
        assert_eq!(Partitions::new("éa").count(), 0);
        assert_eq!(Partitions::new("aθ").len(), 0);
    }
}
