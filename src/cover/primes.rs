//! Multi-output Quine–McCluskey prime-implicant generation

use std::collections::BTreeMap;

use log::{debug, trace};

use super::cubes::{Implicant, OutputMask, Pattern, Term};

/// Generate every prime implicant of `terms`
///
/// Each term carries the outputs it is true or don't-care for. Two cubes merge
/// only when their masks intersect, and the merged cube keeps the
/// intersection. A cube is prime for the outputs it was never merged under:
/// `mask & !combined`.
///
/// The result holds one implicant per distinct pattern, in canonical pattern
/// order.
pub fn generate_prime_implicants(terms: &[Term]) -> Vec<Implicant> {
    let mut level: BTreeMap<Pattern, OutputMask> = BTreeMap::new();
    for term in terms.iter().filter(|term| term.outputs != 0) {
        *level.entry(term.pattern.clone()).or_insert(0) |= term.outputs;
    }

    let mut primes: BTreeMap<Pattern, OutputMask> = BTreeMap::new();
    let mut depth = 0;

    while !level.is_empty() {
        debug!("quine-mccluskey level {}: {} cubes", depth, level.len());
        level = next_level(&level, &mut primes);
        depth += 1;
    }

    debug!("found {} prime implicants", primes.len());
    primes
        .into_iter()
        .map(|(pattern, outputs)| Implicant { pattern, outputs })
        .collect()
}

/// Merge one level, recording its primes, and return the next level
fn next_level(
    level: &BTreeMap<Pattern, OutputMask>,
    primes: &mut BTreeMap<Pattern, OutputMask>,
) -> BTreeMap<Pattern, OutputMask> {
    let mut groups: BTreeMap<usize, Vec<(&Pattern, OutputMask)>> = BTreeMap::new();
    for (pattern, &mask) in level {
        groups
            .entry(pattern.weight())
            .or_default()
            .push((pattern, mask));
    }

    let mut combined: BTreeMap<&Pattern, OutputMask> = BTreeMap::new();
    let mut next: BTreeMap<Pattern, OutputMask> = BTreeMap::new();

    for (weight, lower) in &groups {
        let Some(upper) = groups.get(&(weight + 1)) else {
            continue;
        };
        for &(a, a_mask) in lower {
            for &(b, b_mask) in upper {
                let shared = a_mask & b_mask;
                if shared == 0 {
                    continue;
                }
                if let Some(merged) = a.combine(b) {
                    trace!("{} + {} -> {} ({:#b})", a, b, merged, shared);
                    *next.entry(merged).or_insert(0) |= shared;
                    *combined.entry(a).or_insert(0) |= shared;
                    *combined.entry(b).or_insert(0) |= shared;
                }
            }
        }
    }

    for (pattern, &mask) in level {
        let prime_mask = mask & !combined.get(pattern).copied().unwrap_or(0);
        if prime_mask != 0 {
            *primes.entry(pattern.clone()).or_insert(0) |= prime_mask;
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn minterms(width: usize, indices: &[usize], outputs: OutputMask) -> Vec<Term> {
        indices
            .iter()
            .map(|&index| Term {
                pattern: Pattern::from_index(index, width),
                outputs,
            })
            .collect()
    }

    fn patterns(implicants: &[Implicant]) -> Vec<String> {
        implicants.iter().map(|i| i.pattern.to_string()).collect()
    }

    #[test]
    fn test_xor3_has_only_minterm_primes() {
        let primes = generate_prime_implicants(&minterms(3, &[1, 2, 4, 7], 1));
        assert_eq!(primes.len(), 4);
        assert!(primes.iter().all(|p| p.pattern.literal_count() == 3));
    }

    #[test]
    fn test_full_cube_collapses() {
        let primes = generate_prime_implicants(&minterms(2, &[0, 1, 2, 3], 1));
        assert_eq!(patterns(&primes), vec!["--"]);
    }

    #[test]
    fn test_classic_function() {
        // f(A,B,C) = m(0,1,2,5,6,7)
        let primes = generate_prime_implicants(&minterms(3, &[0, 1, 2, 5, 6, 7], 1));
        let mut found = patterns(&primes);
        found.sort();
        assert_eq!(found, vec!["-01", "-10", "0-0", "00-", "1-1", "11-"]);
    }

    #[test]
    fn test_multi_output_masks_intersect() {
        // output 0: m(2,3) -> "1-"; output 1: m(3) only
        let mut terms = minterms(2, &[2], 0b01);
        terms.extend(minterms(2, &[3], 0b11));
        let primes = generate_prime_implicants(&terms);
        let found: Vec<(String, OutputMask)> = primes
            .iter()
            .map(|i| (i.pattern.to_string(), i.outputs))
            .collect();
        assert_eq!(
            found,
            vec![("11".to_string(), 0b10), ("1-".to_string(), 0b01)]
        );
    }

    #[test]
    fn test_duplicate_terms_merge_masks() {
        let terms = vec![
            Term {
                pattern: Pattern::from_index(1, 1),
                outputs: 0b01,
            },
            Term {
                pattern: Pattern::from_index(1, 1),
                outputs: 0b10,
            },
        ];
        let primes = generate_prime_implicants(&terms);
        assert_eq!(primes.len(), 1);
        assert_eq!(primes[0].outputs, 0b11);
    }

    #[test]
    fn test_empty_input() {
        assert!(generate_prime_implicants(&[]).is_empty());
    }
}
