use crate::align::{Alignment, MalformedAlignment, Row};
use crate::base::GAP;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Selectable crossover policy.
///
/// All strategies share one contract: offspring must ungap to exactly the
/// same residues as their parents. `OffsetExchange` guarantees this by
/// construction; the column-level strategies are verified after the fact and
/// rejected (parents returned unchanged) if the check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrossoverStrategy {
    /// Splice per-row leading-gap offsets at a row index. The residue string
    /// is never sliced, so residue preservation holds unconditionally.
    #[default]
    OffsetExchange,
    /// Per-column coin flip between the two parents.
    UniformColumns,
    /// Parent 1's columns left of the cut, parent 2's columns right of it.
    ColumnSplice,
}

/// Produces two offspring alignments from two parents by recombining gap
/// placement.
///
/// Precondition (checked explicitly): the parents' rows are pairwise
/// residue-identical. On violation the operator refuses and returns the
/// parents unchanged rather than produce a corrupted alignment.
#[derive(Debug, Clone)]
pub struct CrossoverOperator {
    strategy: CrossoverStrategy,
}

impl CrossoverOperator {
    pub fn new(strategy: CrossoverStrategy) -> Self {
        Self { strategy }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> CrossoverStrategy {
        self.strategy
    }

    /// Produce two offspring from two parents.
    ///
    /// `point` is interpreted per strategy: a row index for `OffsetExchange`
    /// (clamped into `1..n_rows`), a column index for `ColumnSplice` (clamped
    /// into `1..n_columns`), and ignored by `UniformColumns`.
    ///
    /// # Errors
    /// Fails with `MalformedAlignment` if either parent is not rectangular;
    /// that indicates an operator bug upstream and must abort the run.
    pub fn offspring<R: Rng + ?Sized>(
        &self,
        parent1: &Alignment,
        parent2: &Alignment,
        point: usize,
        rng: &mut R,
    ) -> Result<(Alignment, Alignment), MalformedAlignment> {
        parent1.validate()?;
        parent2.validate()?;

        // Precondition: pairwise residue-identical rows. A mismatch is a
        // defined no-op, never a corruption.
        if !residues_match(parent1, parent2) {
            return Ok((parent1.clone(), parent2.clone()));
        }

        let (child1, child2) = match self.strategy {
            CrossoverStrategy::OffsetExchange => offset_exchange(parent1, parent2, point),
            CrossoverStrategy::UniformColumns => uniform_columns(parent1, parent2, rng),
            CrossoverStrategy::ColumnSplice => column_splice(parent1, parent2, point),
        };

        // Boundary check shared by every strategy: offspring that fail to
        // preserve residues are discarded in favor of the parents.
        let reference: Vec<Vec<u8>> = parent1.rows().iter().map(Row::residues).collect();
        if !preserves_reference(&child1, &reference) || !preserves_reference(&child2, &reference) {
            return Ok((parent1.clone(), parent2.clone()));
        }

        child1.validate()?;
        child2.validate()?;
        Ok((child1, child2))
    }
}

fn residues_match(parent1: &Alignment, parent2: &Alignment) -> bool {
    parent1.n_rows() == parent2.n_rows()
        && parent1
            .rows()
            .iter()
            .zip(parent2.rows().iter())
            .all(|(r1, r2)| r1.residues() == r2.residues())
}

fn preserves_reference(alignment: &Alignment, reference: &[Vec<u8>]) -> bool {
    alignment.n_rows() == reference.len()
        && alignment
            .rows()
            .iter()
            .zip(reference.iter())
            .all(|(row, residues)| &row.residues() == residues)
}

fn rebuild(offsets: &[usize], residues: &[Vec<u8>]) -> Alignment {
    let rows: Vec<Row> = offsets
        .iter()
        .zip(residues.iter())
        .map(|(&offset, res)| {
            let mut symbols = Vec::with_capacity(offset + res.len());
            symbols.resize(offset, GAP);
            symbols.extend_from_slice(res);
            Row::new(symbols)
        })
        .collect();

    let mut alignment = Alignment::new(rows);
    alignment.normalize_lengths();
    alignment.drop_gap_only_columns();
    alignment
}

/// Swap leading-gap offsets at row index `point`: offspring 1 takes parent 1's
/// offsets for rows `[0, point)` and parent 2's for `[point, end)`; offspring 2
/// takes the complementary splice.
fn offset_exchange(parent1: &Alignment, parent2: &Alignment, point: usize) -> (Alignment, Alignment) {
    let n = parent1.n_rows();
    if n < 2 {
        return (parent1.clone(), parent2.clone());
    }
    let k = point.clamp(1, n - 1);

    let offsets1: Vec<usize> = parent1.rows().iter().map(Row::leading_gap_offset).collect();
    let offsets2: Vec<usize> = parent2.rows().iter().map(Row::leading_gap_offset).collect();
    let residues: Vec<Vec<u8>> = parent1.rows().iter().map(Row::residues).collect();

    let mut spliced1 = offsets1[..k].to_vec();
    spliced1.extend_from_slice(&offsets2[k..]);
    let mut spliced2 = offsets2[..k].to_vec();
    spliced2.extend_from_slice(&offsets1[k..]);

    (rebuild(&spliced1, &residues), rebuild(&spliced2, &residues))
}

/// Per-column coin flip: each column of offspring 1 comes from parent 1 or
/// parent 2 with equal probability; offspring 2 takes the other parent's
/// column. Valid because whole columns are swapped intact.
fn uniform_columns<R: Rng + ?Sized>(
    parent1: &Alignment,
    parent2: &Alignment,
    rng: &mut R,
) -> (Alignment, Alignment) {
    let mut p1 = parent1.clone();
    let mut p2 = parent2.clone();
    let target = p1.n_columns().max(p2.n_columns());
    // Cannot fail: target is the max of both widths.
    let _ = p1.pad_to(target, crate::align::PadSide::Trailing);
    let _ = p2.pad_to(target, crate::align::PadSide::Trailing);

    let n = p1.n_rows();
    let mut rows1: Vec<Vec<u8>> = vec![Vec::with_capacity(target); n];
    let mut rows2: Vec<Vec<u8>> = vec![Vec::with_capacity(target); n];

    for col in 0..target {
        let from_first = rng.random::<f64>() < 0.5;
        for i in 0..n {
            let (a, b) = (p1.row(i).unwrap(), p2.row(i).unwrap());
            let (s1, s2) = if from_first {
                (a.get(col).unwrap(), b.get(col).unwrap())
            } else {
                (b.get(col).unwrap(), a.get(col).unwrap())
            };
            rows1[i].push(s1);
            rows2[i].push(s2);
        }
    }

    let mut child1 = Alignment::new(rows1.into_iter().map(Row::new).collect());
    let mut child2 = Alignment::new(rows2.into_iter().map(Row::new).collect());
    child1.drop_gap_only_columns();
    child2.drop_gap_only_columns();
    (child1, child2)
}

/// One-point splice at the column level: offspring 1 is parent 1's columns
/// left of the cut followed by parent 2's columns from the cut on; offspring 2
/// the complement. Can duplicate or drop residues when the parents carry a
/// different number of gaps before the cut, so it relies entirely on the
/// boundary residue check.
fn column_splice(parent1: &Alignment, parent2: &Alignment, point: usize) -> (Alignment, Alignment) {
    let cols = parent1.n_columns().min(parent2.n_columns());
    if cols < 2 {
        return (parent1.clone(), parent2.clone());
    }
    let cut = point.clamp(1, cols - 1);

    let n = parent1.n_rows();
    let mut rows1 = Vec::with_capacity(n);
    let mut rows2 = Vec::with_capacity(n);

    for i in 0..n {
        let r1 = parent1.row(i).unwrap().symbols();
        let r2 = parent2.row(i).unwrap().symbols();

        let mut c1 = r1[..cut].to_vec();
        c1.extend_from_slice(&r2[cut..]);
        let mut c2 = r2[..cut].to_vec();
        c2.extend_from_slice(&r1[cut..]);

        rows1.push(Row::new(c1));
        rows2.push(Row::new(c2));
    }

    let mut child1 = Alignment::new(rows1);
    let mut child2 = Alignment::new(rows2);
    child1.normalize_lengths();
    child2.normalize_lengths();
    child1.drop_gap_only_columns();
    child2.drop_gap_only_columns();
    (child1, child2)
}
