//! Petrick's method for the cyclic core of a cover table

use std::collections::BTreeSet;

use log::{debug, trace, warn};

/// Pick a minimum-cost set of implicants satisfying every clause
///
/// Each clause lists the implicants covering one target. The product of all
/// clauses is expanded pairwise with idempotence and absorption applied after
/// every multiplication. The cheapest product wins: fewest implicants, then
/// fewest literals, then earliest in canonical order.
///
/// When an intermediate expansion holds more than `max_products` products,
/// the expansion is abandoned for a greedy cover, which is valid but not
/// guaranteed minimal.
pub(crate) fn solve(clauses: &[Vec<usize>], literals: &[usize], max_products: usize) -> Vec<usize> {
    if clauses.is_empty() {
        return Vec::new();
    }
    debug!("petrick: {} clauses", clauses.len());

    match expand(clauses, max_products) {
        Some(products) => products
            .into_iter()
            .min_by_key(|product| (product.len(), cost(product, literals)))
            .unwrap_or_default(),
        None => {
            warn!(
                "petrick expansion exceeded {} products; falling back to a greedy cover",
                max_products
            );
            greedy_cover(clauses, literals)
        }
    }
}

fn cost(product: &[usize], literals: &[usize]) -> usize {
    product.iter().map(|&implicant| literals[implicant]).sum()
}

/// Multiply the clauses out; `None` if the product count exceeds `max_products`
fn expand(clauses: &[Vec<usize>], max_products: usize) -> Option<Vec<Vec<usize>>> {
    let mut products: Vec<Vec<usize>> = vec![Vec::new()];

    for (step, clause) in clauses.iter().enumerate() {
        let mut next: BTreeSet<Vec<usize>> = BTreeSet::new();
        for product in &products {
            // already satisfied: X(X + Y) = X
            if clause.iter().any(|implicant| product.binary_search(implicant).is_ok()) {
                next.insert(product.clone());
                continue;
            }
            for &implicant in clause {
                let mut extended = product.clone();
                if let Err(position) = extended.binary_search(&implicant) {
                    extended.insert(position, implicant);
                }
                next.insert(extended);
            }
        }
        products = absorb(next);
        trace!("petrick step {}: {} products", step, products.len());
        if products.len() > max_products {
            return None;
        }
    }

    Some(products)
}

/// Drop every product that is a superset of another (`X + XY = X`)
///
/// Products come back ordered by size, then lexicographically.
fn absorb(products: BTreeSet<Vec<usize>>) -> Vec<Vec<usize>> {
    let mut by_size: Vec<Vec<usize>> = products.into_iter().collect();
    by_size.sort_by_key(Vec::len);

    let mut kept: Vec<Vec<usize>> = Vec::with_capacity(by_size.len());
    for product in by_size {
        if !kept.iter().any(|smaller| is_subset(smaller, &product)) {
            kept.push(product);
        }
    }
    kept
}

/// Subset test on sorted slices
fn is_subset(small: &[usize], large: &[usize]) -> bool {
    let mut large = large.iter();
    small
        .iter()
        .all(|item| large.by_ref().any(|candidate| candidate == item))
}

/// Repeatedly take the implicant satisfying the most open clauses
///
/// Ties go to fewer literals, then to the lower index.
fn greedy_cover(clauses: &[Vec<usize>], literals: &[usize]) -> Vec<usize> {
    let candidates: BTreeSet<usize> = clauses.iter().flatten().copied().collect();
    let mut open = vec![true; clauses.len()];
    let mut chosen = Vec::new();

    while open.iter().any(|&is_open| is_open) {
        let best = candidates
            .iter()
            .copied()
            .map(|candidate| {
                let gain = clauses
                    .iter()
                    .zip(&open)
                    .filter(|&(clause, &is_open)| is_open && clause.contains(&candidate))
                    .count();
                (candidate, gain)
            })
            .max_by(|&(a, gain_a), &(b, gain_b)| {
                gain_a
                    .cmp(&gain_b)
                    .then(literals[b].cmp(&literals[a]))
                    .then(b.cmp(&a))
            });

        let Some((implicant, gain)) = best else {
            break;
        };
        if gain == 0 {
            break;
        }
        chosen.push(implicant);
        for (clause, is_open) in clauses.iter().zip(open.iter_mut()) {
            if clause.contains(&implicant) {
                *is_open = false;
            }
        }
    }

    chosen.sort_unstable();
    chosen
}
