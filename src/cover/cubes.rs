//! Cube patterns, terms and implicants

use std::fmt;

/// One position of a cube pattern
///
/// The declaration order defines the canonical sort order of patterns:
/// `1` before `0` before `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bit {
    One,
    Zero,
    DontCare,
}

impl Bit {
    pub fn as_char(self) -> char {
        match self {
            Bit::One => '1',
            Bit::Zero => '0',
            Bit::DontCare => '-',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Bit::One),
            '0' => Some(Bit::Zero),
            '-' => Some(Bit::DontCare),
            _ => None,
        }
    }
}

/// A cube over the input variables, most significant input first
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern(Vec<Bit>);

impl Pattern {
    /// The full (minterm) pattern of row `index` in a `width`-input table
    pub fn from_index(index: usize, width: usize) -> Self {
        Pattern(
            (0..width)
                .map(|bit| {
                    if (index >> (width - 1 - bit)) & 1 == 1 {
                        Bit::One
                    } else {
                        Bit::Zero
                    }
                })
                .collect(),
        )
    }

    /// Parse a pattern over `0`, `1` and `-`
    pub fn parse(text: &str) -> Option<Self> {
        text.chars().map(Bit::from_char).collect::<Option<Vec<_>>>().map(Pattern)
    }

    pub fn bits(&self) -> &[Bit] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of `1` positions, the grouping key of Quine–McCluskey
    pub fn weight(&self) -> usize {
        self.0.iter().filter(|&&bit| bit == Bit::One).count()
    }

    /// Number of literals the cube contributes to a product (non-`-` positions)
    pub fn literal_count(&self) -> usize {
        self.0.iter().filter(|&&bit| bit != Bit::DontCare).count()
    }

    /// Whether this cube contains the full pattern `minterm`
    pub fn covers(&self, minterm: &Pattern) -> bool {
        self.0.len() == minterm.0.len()
            && self
                .0
                .iter()
                .zip(&minterm.0)
                .all(|(&cube, &bit)| cube == Bit::DontCare || cube == bit)
    }

    /// Merge two cubes that differ in exactly one specified position
    ///
    /// Returns `None` if the `-` positions do not line up or if the cubes
    /// differ in zero or several positions.
    pub fn combine(&self, other: &Pattern) -> Option<Pattern> {
        if self.0.len() != other.0.len() {
            return None;
        }
        let mut differing = None;
        for (position, (&a, &b)) in self.0.iter().zip(&other.0).enumerate() {
            if a == b {
                continue;
            }
            if a == Bit::DontCare || b == Bit::DontCare || differing.is_some() {
                return None;
            }
            differing = Some(position);
        }
        let position = differing?;
        let mut merged = self.0.clone();
        merged[position] = Bit::DontCare;
        Some(Pattern(merged))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}

/// Set of output indices, bit `i` standing for output `i`
pub type OutputMask = u64;

/// Quine–McCluskey input: a minterm (or merged cube) and the outputs it is
/// true or don't-care for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub pattern: Pattern,
    pub outputs: OutputMask,
}

/// A prime implicant and the outputs for which it is prime
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Implicant {
    pub pattern: Pattern,
    pub outputs: OutputMask,
}

impl Implicant {
    pub fn serves(&self, output: usize) -> bool {
        self.outputs & (1 << output) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> Pattern {
        Pattern::parse(text).unwrap()
    }

    #[test]
    fn test_combine_adjacent() {
        assert_eq!(p("101").combine(&p("100")), Some(p("10-")));
        assert_eq!(p("1-1").combine(&p("1-0")), Some(p("1--")));
    }

    #[test]
    fn test_combine_rejects_misaligned_dashes() {
        assert_eq!(p("1-1").combine(&p("11-")), None);
        assert_eq!(p("110").combine(&p("101")), None);
        assert_eq!(p("110").combine(&p("110")), None);
    }

    #[test]
    fn test_covers() {
        assert!(p("1-0").covers(&p("110")));
        assert!(p("1-0").covers(&p("100")));
        assert!(!p("1-0").covers(&p("101")));
        assert!(p("").covers(&p("")));
    }

    #[test]
    fn test_canonical_order() {
        let mut patterns = vec![p("1-1"), p("0--"), p("11-"), p("-00")];
        patterns.sort();
        let rendered: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["11-", "1-1", "0--", "-00"]);
    }

    #[test]
    fn test_counts() {
        assert_eq!(p("1-01").weight(), 2);
        assert_eq!(p("1-01").literal_count(), 3);
        assert_eq!(Pattern::from_index(5, 4).to_string(), "0101");
    }
}
