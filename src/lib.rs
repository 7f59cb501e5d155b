//! A minesweeper-playing agent.
//!
//! The solver keeps a knowledge base of [`sentence::Sentence`]s, statements
//! of the form "exactly N of these cells are mines", and closes it under two
//! rules after every probe: direct deduction (a count of zero proves every
//! cell safe, a count equal to the set size proves every cell a mine) and
//! subset inference (a sentence nested inside another yields a sentence over
//! the difference). Moves come from the proven-safe set, falling back to a
//! uniform random guess only when no certain move exists.

pub mod board;
pub mod rng;
pub mod sentence;
pub mod solver;
pub mod types;
