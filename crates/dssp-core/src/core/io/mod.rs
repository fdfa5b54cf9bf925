//! Structure input.
//!
//! Parsing of PDB and mmCIF coordinate files into the internal model. The
//! output side (classic DSSP text, annotated mmCIF) lives in
//! [`crate::output`], since it consumes the finished engine result.

pub mod loader;

pub use loader::{load_structure, LoadError};
