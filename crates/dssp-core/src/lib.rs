//! # DSSP Core Library
//!
//! A Rust implementation of the Kabsch-Sander DSSP algorithm for assigning
//! secondary structure to protein residues, extended with a left-handed
//! polyproline-II helix detector.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers so the computation stays separate
//! from representation and presentation:
//!
//! - **[`core`]: The Foundation.** Stateless data models (the
//!   `MolecularStructure` adapter), geometry primitives, structure loading,
//!   solvent accessibility and backbone completion.
//!
//! - **[`engine`]: The Logic Core.** The multi-pass DSSP computation:
//!   backbone geometry, the hydrogen-bond energy model, disulphide
//!   numbering, bridge/ladder/sheet construction, helix and PPII
//!   classification, and the summary-label reduction with its statistics.
//!
//! - **[`workflows`]: The Public API.** End-to-end operations a driver
//!   calls: load a file, run the engine, render classic DSSP text or an
//!   annotated mmCIF datablock (the adapters themselves live in
//!   [`output`]).

pub mod core;
pub mod engine;
pub mod output;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;
