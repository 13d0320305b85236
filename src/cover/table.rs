//! Prime-implicant table and its reduction to a cyclic core
//!
//! Rows are prime implicants, columns are targets (one per true minterm per
//! output). [`CoverTable::reduce`] repeats three steps until none applies:
//!
//! 1. select essential implicants, the only active row covering some column;
//! 2. drop dominated rows;
//! 3. drop dominated columns.
//!
//! Whatever stays active afterwards is the cyclic core handed to Petrick's
//! method.

use std::collections::BTreeSet;

use log::{debug, trace};

use super::cubes::{Implicant, Pattern};

/// A true minterm of one output
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub pattern: Pattern,
    pub output: usize,
}

#[derive(Debug)]
pub(crate) struct CoverTable {
    literals: Vec<usize>,
    /// Targets covered by each implicant
    rows: Vec<BTreeSet<usize>>,
    /// Implicants covering each target
    columns: Vec<BTreeSet<usize>>,
    active_rows: Vec<bool>,
    active_columns: Vec<bool>,
    essentials: Vec<usize>,
}

impl CoverTable {
    pub fn new(implicants: &[Implicant], targets: &[Target]) -> Self {
        let mut rows = vec![BTreeSet::new(); implicants.len()];
        let mut columns = vec![BTreeSet::new(); targets.len()];

        for (row, implicant) in implicants.iter().enumerate() {
            for (column, target) in targets.iter().enumerate() {
                if implicant.serves(target.output) && implicant.pattern.covers(&target.pattern) {
                    rows[row].insert(column);
                    columns[column].insert(row);
                }
            }
        }

        CoverTable {
            literals: implicants
                .iter()
                .map(|implicant| implicant.pattern.literal_count())
                .collect(),
            rows,
            columns,
            active_rows: vec![true; implicants.len()],
            active_columns: vec![true; targets.len()],
            essentials: Vec::new(),
        }
    }

    /// Implicants selected as essential, in selection order
    pub fn essentials(&self) -> &[usize] {
        &self.essentials
    }

    /// Reduce the table to a fixed point
    pub fn reduce(&mut self) {
        let mut pass = 0;
        loop {
            let essentials = self.select_essentials();
            let rows = self.remove_dominated_rows();
            let columns = self.remove_dominated_columns();
            trace!(
                "reduction pass {}: essentials={} rows={} columns={}",
                pass,
                essentials,
                rows,
                columns
            );
            if !(essentials || rows || columns) {
                break;
            }
            pass += 1;
        }
        debug!(
            "table reduced: {} essential, {} implicants and {} targets left",
            self.essentials.len(),
            self.active_rows.iter().filter(|&&a| a).count(),
            self.active_columns.iter().filter(|&&a| a).count()
        );
    }

    /// One clause per remaining target: the active implicants covering it
    pub fn cyclic_core(&self) -> Vec<Vec<usize>> {
        (0..self.columns.len())
            .filter(|&column| self.active_columns[column])
            .map(|column| self.active_implicants_of(column).into_iter().collect())
            .collect()
    }

    fn active_targets_of(&self, row: usize) -> BTreeSet<usize> {
        self.rows[row]
            .iter()
            .copied()
            .filter(|&column| self.active_columns[column])
            .collect()
    }

    fn active_implicants_of(&self, column: usize) -> BTreeSet<usize> {
        self.columns[column]
            .iter()
            .copied()
            .filter(|&row| self.active_rows[row])
            .collect()
    }

    fn select_essentials(&mut self) -> bool {
        let essentials: BTreeSet<usize> = (0..self.columns.len())
            .filter(|&column| self.active_columns[column])
            .filter_map(|column| {
                let covering = self.active_implicants_of(column);
                match covering.len() {
                    1 => covering.first().copied(),
                    _ => None,
                }
            })
            .collect();

        for &row in &essentials {
            trace!("implicant {} is essential", row);
            self.essentials.push(row);
            self.active_rows[row] = false;
            for &column in &self.rows[row] {
                self.active_columns[column] = false;
            }
        }
        !essentials.is_empty()
    }

    /// Row `a` dominates row `b` when it covers every active target of `b`
    /// with no more literals. Identical rows keep the lower index.
    fn row_dominates(&self, a: usize, b: usize, covered: &[BTreeSet<usize>]) -> bool {
        if self.literals[a] > self.literals[b] || !covered[b].is_subset(&covered[a]) {
            return false;
        }
        if covered[a] == covered[b] && self.literals[a] == self.literals[b] {
            return a < b;
        }
        true
    }

    fn remove_dominated_rows(&mut self) -> bool {
        let covered: Vec<BTreeSet<usize>> = (0..self.rows.len())
            .map(|row| {
                if self.active_rows[row] {
                    self.active_targets_of(row)
                } else {
                    BTreeSet::new()
                }
            })
            .collect();

        let mut changed = false;
        for b in 0..self.rows.len() {
            if !self.active_rows[b] {
                continue;
            }
            let useless = covered[b].is_empty();
            let dominated = !useless
                && (0..self.rows.len()).any(|a| {
                    a != b && self.active_rows[a] && self.row_dominates(a, b, &covered)
                });
            if useless || dominated {
                trace!("implicant {} removed by row dominance", b);
                self.active_rows[b] = false;
                changed = true;
            }
        }
        changed
    }

    /// Column `b` is redundant when every active implicant covering column
    /// `a` also covers `b`. Identical columns keep the lower index.
    fn remove_dominated_columns(&mut self) -> bool {
        let covering: Vec<BTreeSet<usize>> = (0..self.columns.len())
            .map(|column| {
                if self.active_columns[column] {
                    self.active_implicants_of(column)
                } else {
                    BTreeSet::new()
                }
            })
            .collect();

        let mut changed = false;
        for b in 0..self.columns.len() {
            if !self.active_columns[b] {
                continue;
            }
            let redundant = (0..self.columns.len()).any(|a| {
                a != b
                    && self.active_columns[a]
                    && covering[a].is_subset(&covering[b])
                    && (covering[a] != covering[b] || a < b)
            });
            if redundant {
                trace!("target {} removed by column dominance", b);
                self.active_columns[b] = false;
                changed = true;
            }
        }
        changed
    }
}
