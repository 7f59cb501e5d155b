//! The knowledge base and inference engine, plus move selection.
//!
//! The solver ingests one `(cell, count)` report per probe and closes its
//! knowledge base under two rules: direct deduction (a sentence counting
//! zero proves all its cells safe, a sentence counting all its cells proves
//! them mines) and pairwise subset inference. The two passes alternate until
//! a full cycle derives nothing new.
//!
//! Invariants the engine maintains at every return from [`Solver::add_knowledge`]:
//! - the safe and mine sets are disjoint;
//! - every probed cell is in the safe set;
//! - no proven cell appears in any live sentence.
//!
//! Violations are implementation defects and abort via assertion rather than
//! being clamped, since a clamped count could report an unsafe cell as safe.

use std::collections::HashSet;

use derive_more::{Display, Error};
use tracing::{debug, trace};

use crate::rng::GameRng;
use crate::sentence::Sentence;
use crate::types::{Cell, Dims};

/// Caller-facing errors. The board/driver contract guarantees each cell is
/// reported at most once and lies on the grid; breaking that is caller
/// misuse, not an engine defect.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum SolverError {
    #[display("cell {} was already probed", cell)]
    RepeatedProbe { cell: Cell },
    #[display("cell {} is outside the {} grid", cell, dims)]
    OutOfBounds { cell: Cell, dims: Dims },
}

/// Deductive engine for one game. Owns the fact sets and the live sentences;
/// nothing else mutates them.
#[derive(Clone, Debug)]
pub struct Solver {
    dims: Dims,
    moves_made: HashSet<Cell>,
    safes: HashSet<Cell>,
    mines: HashSet<Cell>,
    knowledge: Vec<Sentence>,
}

impl Solver {
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            moves_made: HashSet::new(),
            safes: HashSet::new(),
            mines: HashSet::new(),
            knowledge: Vec::new(),
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    /// Cells proven not to be mines, probed or not.
    pub fn known_safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    /// Cells proven to be mines.
    pub fn known_mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    /// Record that `cell` is proven safe and prune it from every sentence.
    fn mark_safe(&mut self, cell: Cell) {
        assert!(
            !self.mines.contains(&cell),
            "cell {cell} proven both safe and mine"
        );
        self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
    }

    /// Record that `cell` is proven to be a mine and prune it from every
    /// sentence, decrementing their counts.
    fn mark_mine(&mut self, cell: Cell) {
        assert!(
            !self.safes.contains(&cell),
            "cell {cell} proven both safe and mine"
        );
        self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
    }

    /// Ingest one board report: `count` mines surround the probed `cell`.
    ///
    /// Runs the full propagation fixpoint before returning, so the fact sets
    /// are up to date once this completes. Must not be called twice for the
    /// same cell.
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) -> Result<(), SolverError> {
        if !self.dims.contains(cell) {
            return Err(SolverError::OutOfBounds {
                cell,
                dims: self.dims,
            });
        }
        if self.moves_made.contains(&cell) {
            return Err(SolverError::RepeatedProbe { cell });
        }
        debug!(%cell, count, "ingesting board report");

        self.moves_made.insert(cell);
        self.mark_safe(cell);

        // Fresh sentence over the undetermined neighbors only: known safes
        // and prior moves carry no information, and each known mine is
        // accounted for by decrementing the count up front.
        let mut cells = HashSet::new();
        let mut count = count;
        for neighbor in self.dims.neighbors(cell) {
            if self.safes.contains(&neighbor) || self.moves_made.contains(&neighbor) {
                continue;
            }
            if self.mines.contains(&neighbor) {
                assert!(
                    count > 0,
                    "board reported fewer mines around {cell} than already proven"
                );
                count -= 1;
                continue;
            }
            cells.insert(neighbor);
        }
        self.knowledge.push(Sentence::new(cells, count));

        self.run_fixpoint();
        self.dedup_knowledge();
        Ok(())
    }

    /// Alternate direct deduction and subset inference until a full cycle
    /// derives nothing new. Terminates because deduction only ever shrinks
    /// sentences and inference only adds sentences over strict subsets.
    fn run_fixpoint(&mut self) {
        let mut cycles = 0usize;
        loop {
            cycles += 1;
            let deduced = self.apply_direct_deductions();
            let inferred = self.generate_subset_inferences();
            if !deduced && !inferred {
                break;
            }
        }
        trace!(cycles, sentences = self.knowledge.len(), "fixpoint settled");
    }

    /// Deduction pass: collect every cell some sentence fully determines,
    /// then apply the facts and drop exhausted sentences. Facts are staged
    /// into separate sets first so no sentence is mutated mid-scan.
    fn apply_direct_deductions(&mut self) -> bool {
        let mut new_safes: HashSet<Cell> = HashSet::new();
        let mut new_mines: HashSet<Cell> = HashSet::new();
        for sentence in &self.knowledge {
            if let Some(safes) = sentence.known_safes() {
                new_safes.extend(safes.iter().copied());
            }
            if let Some(mines) = sentence.known_mines() {
                new_mines.extend(mines.iter().copied());
            }
        }

        for &cell in &new_safes {
            trace!(%cell, "deduced safe");
            self.mark_safe(cell);
        }
        for &cell in &new_mines {
            trace!(%cell, "deduced mine");
            self.mark_mine(cell);
        }

        self.knowledge.retain(|sentence| {
            if sentence.is_empty() {
                assert_eq!(
                    sentence.count(),
                    0,
                    "exhausted sentence still claims mines"
                );
                false
            } else {
                true
            }
        });

        !new_safes.is_empty() || !new_mines.is_empty()
    }

    /// Inference pass: derive `A − B = count(A) − count(B)` for every
    /// ordered pair of distinct sentences where B's cells sit inside A's.
    /// Results are staged and appended after the scan; a result equal to a
    /// live sentence or to one already staged this pass is dropped.
    fn generate_subset_inferences(&mut self) -> bool {
        let mut staged: Vec<Sentence> = Vec::new();
        for (i, a) in self.knowledge.iter().enumerate() {
            for (j, b) in self.knowledge.iter().enumerate() {
                if i == j || a == b {
                    continue;
                }
                let Some(derived) = a.subset_infer(b) else {
                    continue;
                };
                if self.knowledge.contains(&derived) || staged.contains(&derived) {
                    continue;
                }
                trace!(%derived, "subset inference");
                staged.push(derived);
            }
        }

        let progressed = !staged.is_empty();
        self.knowledge.extend(staged);
        progressed
    }

    /// Drop later duplicates, keeping the first copy of each sentence.
    fn dedup_knowledge(&mut self) {
        let mut unique: Vec<Sentence> = Vec::with_capacity(self.knowledge.len());
        for sentence in self.knowledge.drain(..) {
            if !unique.contains(&sentence) {
                unique.push(sentence);
            }
        }
        self.knowledge = unique;
    }

    /// A proven-safe cell that has not been probed yet. Which one is
    /// unspecified; callers must not depend on the selection order.
    pub fn choose_safe_move(&self) -> Option<Cell> {
        self.safes
            .iter()
            .find(|cell| !self.moves_made.contains(cell))
            .copied()
    }

    /// A uniform draw over the cells that are neither probed nor proven
    /// mines. `None` once every cell is probed or a known mine.
    pub fn choose_random_move(&self, rng: &mut GameRng) -> Option<Cell> {
        if self.moves_made.len() + self.mines.len() == self.dims.cell_count() {
            return None;
        }
        let candidates: Vec<Cell> = self
            .dims
            .cells()
            .filter(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
            .collect();
        rng.pick(&candidates).copied()
    }
}
