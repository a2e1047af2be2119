use crate::align::{Alignment, MalformedAlignment, Row};
use crate::base::GAP;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Minimum run length for a gap run to count as a splittable block.
const MIN_BLOCK_LEN: usize = 2;

/// How far (in columns) a split half may be displaced outward from the
/// original block boundary.
const MAX_SHIFT: usize = 3;

/// Selectable mutation move. Every move relocates gap symbols only; no row's
/// residue string is ever altered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MutationMove {
    /// Split a gap block in two and reinsert the halves shifted outward.
    #[default]
    SplitGapBlock,
    /// Insert a lone gap at a random position of a random row.
    InsertGap,
    /// Remove one gap symbol from a random row holding one.
    DeleteGap,
}

/// Produces one offspring alignment from one parent by locally perturbing gap
/// placement.
///
/// When the chosen move has nothing to act on (no gap block, no gap at all),
/// the parent is returned unchanged; that is a defined no-op, not an error.
#[derive(Debug, Clone)]
pub struct GapMutation {
    mv: MutationMove,
}

impl GapMutation {
    pub fn new(mv: MutationMove) -> Self {
        Self { mv }
    }

    /// The configured move.
    pub fn mutation_move(&self) -> MutationMove {
        self.mv
    }

    /// Produce one offspring from one parent.
    ///
    /// # Errors
    /// Fails with `MalformedAlignment` if the parent is not rectangular.
    pub fn mutate<R: Rng + ?Sized>(
        &self,
        parent: &Alignment,
        rng: &mut R,
    ) -> Result<Alignment, MalformedAlignment> {
        parent.validate()?;
        if parent.is_empty() {
            return Ok(parent.clone());
        }

        let mut child = match self.mv {
            MutationMove::SplitGapBlock => split_gap_block(parent, rng),
            MutationMove::InsertGap => insert_gap(parent, rng),
            MutationMove::DeleteGap => delete_gap(parent, rng),
        };

        child.drop_gap_only_columns();
        child.validate()?;
        debug_assert!(residues_unchanged(parent, &child));
        Ok(child)
    }
}

fn residues_unchanged(parent: &Alignment, child: &Alignment) -> bool {
    parent.n_rows() == child.n_rows()
        && parent
            .rows()
            .iter()
            .zip(child.rows().iter())
            .all(|(p, c)| p.residues() == c.residues())
}

/// Pick a row uniformly, cycling to the next row until one holds a gap block
/// of length >= 2. Split that block's length into two positive parts and
/// reinsert the halves 1-3 columns outward of the original boundaries,
/// clamped to the row ends. Row length is unchanged, so rectangularity holds.
fn split_gap_block<R: Rng + ?Sized>(parent: &Alignment, rng: &mut R) -> Alignment {
    let n = parent.n_rows();
    let mut row_idx = rng.random_range(0..n);
    let mut blocks = Vec::new();

    let mut checked = 0;
    while checked < n {
        blocks = parent.rows()[row_idx].gap_blocks(MIN_BLOCK_LEN);
        if !blocks.is_empty() {
            break;
        }
        row_idx = (row_idx + 1) % n;
        checked += 1;
    }

    // No gap block anywhere: defined no-op
    if blocks.is_empty() {
        return parent.clone();
    }

    let (start, end) = blocks[rng.random_range(0..blocks.len())];
    let block_len = end - start;
    let left_len = rng.random_range(1..block_len);
    let right_len = block_len - left_len;

    let symbols = parent.rows()[row_idx].symbols();
    let left_shift = rng.random_range(1..=MAX_SHIFT);
    let right_shift = rng.random_range(1..=MAX_SHIFT);
    let insert_left = start.saturating_sub(left_shift);
    let insert_right = (end + right_shift).min(symbols.len());

    let mut rebuilt = Vec::with_capacity(symbols.len());
    rebuilt.extend_from_slice(&symbols[..insert_left]);
    rebuilt.resize(rebuilt.len() + left_len, GAP);
    rebuilt.extend_from_slice(&symbols[insert_left..start]);
    rebuilt.extend_from_slice(&symbols[end..insert_right]);
    rebuilt.resize(rebuilt.len() + right_len, GAP);
    rebuilt.extend_from_slice(&symbols[insert_right..]);

    let mut rows: Vec<Row> = parent.rows().to_vec();
    rows[row_idx] = Row::new(rebuilt);
    Alignment::new(rows)
}

/// Insert one gap at a random position of a random row, then repad the other
/// rows to the new width.
fn insert_gap<R: Rng + ?Sized>(parent: &Alignment, rng: &mut R) -> Alignment {
    let row_idx = rng.random_range(0..parent.n_rows());
    let mut rows: Vec<Row> = parent.rows().to_vec();

    let pos = rng.random_range(0..=rows[row_idx].len());
    rows[row_idx].symbols_mut().insert(pos, GAP);

    let mut child = Alignment::new(rows);
    child.normalize_lengths();
    child
}

/// Remove one gap symbol from a random row holding one (cycling to the next
/// row if the drawn one has none), then repad that row at its end. A fully
/// gap-free alignment is a defined no-op.
fn delete_gap<R: Rng + ?Sized>(parent: &Alignment, rng: &mut R) -> Alignment {
    let n = parent.n_rows();
    let mut row_idx = rng.random_range(0..n);

    let mut checked = 0;
    while checked < n && !parent.rows()[row_idx].symbols().contains(&GAP) {
        row_idx = (row_idx + 1) % n;
        checked += 1;
    }
    if checked == n {
        return parent.clone();
    }

    let gap_positions: Vec<usize> = parent.rows()[row_idx]
        .symbols()
        .iter()
        .enumerate()
        .filter(|(_, &s)| s == GAP)
        .map(|(i, _)| i)
        .collect();
    let pos = gap_positions[rng.random_range(0..gap_positions.len())];

    let mut rows: Vec<Row> = parent.rows().to_vec();
    let symbols = rows[row_idx].symbols_mut();
    symbols.remove(pos);
    symbols.push(GAP);

    Alignment::new(rows)
}
