//! # Core Module
//!
//! Foundation layer of the DSSP library: the molecular data model, geometry
//! primitives, and the structure-level passes that prepare a model for the
//! engine.
//!
//! ## Architecture
//!
//! - **Molecular representation** ([`models`]) - atoms, residues, chains and
//!   the [`models::structure::MolecularStructure`] container
//! - **Structure input** ([`io`]) - PDB/mmCIF parsing into the model
//! - **Solvent accessibility** ([`sasa`]) - Shrake-Rupley surface areas
//!   consumed (not computed) by the engine
//! - **Backbone completion** ([`completion`]) - reconstruction of missing
//!   O and H backbone atoms before assignment
//! - **Numerics** ([`utils`]) - distances, angles, dihedrals, internal
//!   coordinate placement

pub mod completion;
pub mod io;
pub mod models;
pub mod sasa;
pub mod utils;
