//! Hierarchical chapter numbering.

/// A heading went deeper than one level below the current nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("depth {depth} cannot follow depth {current}")]
pub struct DepthSkip {
    /// Requested depth.
    pub depth: usize,
    /// Nesting depth before the request.
    pub current: usize,
}

/// Outcome of [`ChapterNumberer::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// Dot-joined chapter number, e.g. `"1.2.4"`.
    pub number: String,
    /// Nesting depth before this heading.
    pub previous_depth: usize,
    /// Nesting depth after this heading.
    pub current_depth: usize,
}

/// Assigns dotted chapter numbers to a sequence of headings.
///
/// `counters[i]` is the current count at depth `i + 1`. Depths are 1-based.
///
/// ```
/// use texmd_translate::ChapterNumberer;
///
/// let mut numberer = ChapterNumberer::new();
/// assert_eq!(numberer.advance(1).unwrap().number, "1");
/// assert_eq!(numberer.advance(2).unwrap().number, "1.1");
/// assert_eq!(numberer.advance(2).unwrap().number, "1.2");
/// assert_eq!(numberer.advance(1).unwrap().number, "2");
/// assert!(numberer.advance(3).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChapterNumberer {
    counters: Vec<u32>,
}

impl ChapterNumberer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to the next heading at `depth` and returns its number.
    pub fn advance(&mut self, depth: usize) -> Result<Advance, DepthSkip> {
        let previous_depth = self.counters.len();

        if depth == 0 || depth > previous_depth + 1 {
            return Err(DepthSkip {
                depth,
                current: previous_depth,
            });
        }

        if depth == previous_depth + 1 {
            self.counters.push(1);
        } else {
            self.counters.truncate(depth);
            self.counters[depth - 1] += 1;
        }

        Ok(Advance {
            number: self.current(),
            previous_depth,
            current_depth: self.counters.len(),
        })
    }

    /// The current number, empty before the first heading.
    pub fn current(&self) -> String {
        self.counters
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn numbers(depths: &[usize]) -> Vec<String> {
        let mut numberer = ChapterNumberer::new();
        depths
            .iter()
            .map(|&d| numberer.advance(d).unwrap().number)
            .collect()
    }

    #[test]
    fn test_nested_sequence() {
        assert_eq!(
            numbers(&[1, 2, 3, 3, 2, 3, 1, 2]),
            vec!["1", "1.1", "1.1.1", "1.1.2", "1.2", "1.2.1", "2", "2.1"]
        );
    }

    #[test]
    fn test_same_depth_never_repeats() {
        let mut numberer = ChapterNumberer::new();
        let a = numberer.advance(1).unwrap();
        let b = numberer.advance(1).unwrap();
        assert_ne!(a.number, b.number);
        assert_eq!(b.number, "2");
    }

    #[test]
    fn test_reports_depth_transition() {
        let mut numberer = ChapterNumberer::new();
        numberer.advance(1).unwrap();
        numberer.advance(2).unwrap();
        numberer.advance(3).unwrap();
        let back = numberer.advance(1).unwrap();
        assert_eq!(back.previous_depth, 3);
        assert_eq!(back.current_depth, 1);
    }

    #[test]
    fn test_depth_skip_is_an_error() {
        let mut numberer = ChapterNumberer::new();
        assert_eq!(
            numberer.advance(2),
            Err(DepthSkip {
                depth: 2,
                current: 0
            })
        );

        numberer.advance(1).unwrap();
        let err = numberer.advance(3).unwrap_err();
        assert_eq!(err.current, 1);
        // State is untouched by a failed call.
        assert_eq!(numberer.current(), "1");
        assert!(numberer.advance(0).is_err());
    }

    #[test]
    fn test_numbers_are_unique_for_valid_walks() {
        // Deterministic walk that only ever steps one level deeper.
        let mut depth = 1usize;
        let mut depths = Vec::new();
        for i in 0..200usize {
            depths.push(depth);
            depth = match i % 7 {
                0 | 3 | 5 => depth + 1,
                1 => 1,
                _ => depth.max(2) - 1,
            };
        }

        let all = numbers(&depths);
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }
}
