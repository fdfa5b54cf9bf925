//! Data structures representing a parsed macromolecular model.
//!
//! The model is deliberately minimal: chains own ordered residues, residues
//! own atoms, and every entity is addressed through a stable slotmap key.
//! The DSSP engine reads this model but never changes it; the loader, the
//! backbone-completion pre-pass and the accessibility pass are the only
//! writers.

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod structure;
