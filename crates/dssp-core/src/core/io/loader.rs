use crate::core::models::atom::Atom;
use crate::core::models::structure::MolecularStructure;
use itertools::Itertools;
use nalgebra::Point3;
use pdbtbx::{ReadOptions, StrictnessLevel};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads a PDB or mmCIF file into a [`MolecularStructure`].
///
/// The format is chosen from the file extension; parsing runs at loose
/// strictness so mildly malformed files still load. Waters are dropped,
/// everything else is kept (the engine selects the protein residues itself).
pub fn load_structure(path: &Path) -> Result<MolecularStructure, LoadError> {
    let path_str = path.to_string_lossy().to_string();
    let (pdb, warnings) = ReadOptions::default()
        .set_level(StrictnessLevel::Loose)
        .read(&path_str)
        .map_err(|errors| LoadError::Parse {
            path: path_str.clone(),
            message: errors.iter().map(ToString::to_string).join("; "),
        })?;

    for warning in &warnings {
        debug!(%warning, "structure parser warning");
    }

    let mut structure = MolecularStructure::new();
    structure.metadata.id_code = pdb.identifier.clone().unwrap_or_default();

    let mut serial = 0;
    for chain in pdb.chains() {
        let chain_id = structure.add_chain(chain.id(), chain.id());
        for residue in chain.residues() {
            let name = residue.name().unwrap_or("UNK");
            if name == "HOH" {
                continue;
            }
            let residue_id = match structure.add_residue(
                chain_id,
                name,
                residue.serial_number(),
                residue.insertion_code(),
            ) {
                Some(id) => id,
                None => continue,
            };
            for atom in residue.atoms() {
                serial += 1;
                let (x, y, z) = atom.pos();
                let mut model_atom =
                    Atom::new(atom.name(), residue_id, Point3::new(x, y, z)).with_serial(serial);
                if let Some(element) = atom.element() {
                    model_atom = model_atom.with_element(element.symbol());
                }
                model_atom.occupancy = atom.occupancy();
                let _ = structure.add_atom_to_residue(residue_id, model_atom);
            }
        }
    }

    debug!(
        chains = structure.chain_count(),
        atoms = structure.atom_count(),
        "loaded structure"
    );
    Ok(structure)
}
