//! Backbone completion pre-pass.
//!
//! Reconstructs missing carbonyl oxygens and amide hydrogens from the
//! surrounding backbone geometry. Runs before the engine when the caller
//! requests it; the engine itself only ever reads the structure.

use crate::core::models::atom::Atom;
use crate::core::models::ids::ResidueId;
use crate::core::models::structure::MolecularStructure;
use crate::core::utils::geometry::position_from_internal;
use nalgebra::Point3;
use tracing::debug;

const C_O_LENGTH: f64 = 1.23;
const CA_C_O_ANGLE: f64 = 120.5;
const N_H_LENGTH: f64 = 1.02;

struct BackboneSnapshot {
    residue_id: ResidueId,
    is_proline: bool,
    n: Option<Point3<f64>>,
    ca: Option<Point3<f64>>,
    c: Option<Point3<f64>>,
    o: Option<Point3<f64>>,
    h: Option<Point3<f64>>,
}

/// Adds missing O and H backbone atoms in place.
///
/// Returns the number of atoms created.
pub fn create_missing_backbone_atoms(structure: &mut MolecularStructure) -> usize {
    let chains: Vec<Vec<BackboneSnapshot>> = structure
        .chains_iter()
        .map(|(_, chain)| {
            chain
                .residues()
                .iter()
                .filter_map(|&rid| structure.residue(rid).map(|r| (rid, r)))
                .map(|(rid, residue)| BackboneSnapshot {
                    residue_id: rid,
                    is_proline: residue.is_proline(),
                    n: structure.residue_atom_position(rid, "N"),
                    ca: structure.residue_atom_position(rid, "CA"),
                    c: structure.residue_atom_position(rid, "C"),
                    o: structure.residue_atom_position(rid, "O"),
                    h: structure.residue_atom_position(rid, "H"),
                })
                .collect()
        })
        .collect();

    let mut created = 0;
    for chain in &chains {
        for (index, snapshot) in chain.iter().enumerate() {
            if snapshot.o.is_none() {
                if let Some(position) = rebuild_carbonyl_oxygen(chain, index) {
                    if structure
                        .add_atom_to_residue(
                            snapshot.residue_id,
                            Atom::new("O", snapshot.residue_id, position),
                        )
                        .is_some()
                    {
                        created += 1;
                    }
                }
            }
            if snapshot.h.is_none() && !snapshot.is_proline && index > 0 {
                if let Some(position) = rebuild_amide_hydrogen(chain, index) {
                    if structure
                        .add_atom_to_residue(
                            snapshot.residue_id,
                            Atom::new("H", snapshot.residue_id, position),
                        )
                        .is_some()
                    {
                        created += 1;
                    }
                }
            }
        }
    }
    if created > 0 {
        debug!(created, "reconstructed missing backbone atoms");
    }
    created
}

/// O sits in the peptide plane, opposite the next residue's N across C.
/// For the chain terminus it is placed trans to the own N instead.
fn rebuild_carbonyl_oxygen(chain: &[BackboneSnapshot], index: usize) -> Option<Point3<f64>> {
    let residue = &chain[index];
    let (ca, c) = (residue.ca?, residue.c?);
    let reference = match chain.get(index + 1).and_then(|next| next.n) {
        Some(next_n) => next_n,
        None => residue.n?,
    };
    Some(position_from_internal(
        &reference, &ca, &c, C_O_LENGTH, CA_C_O_ANGLE, 180.0,
    ))
}

/// H extends the previous peptide plane: along C(i-1)-O(i-1), from N.
fn rebuild_amide_hydrogen(chain: &[BackboneSnapshot], index: usize) -> Option<Point3<f64>> {
    let n = chain[index].n?;
    let previous = &chain[index - 1];
    let (prev_c, prev_o) = (previous.c?, previous.o?);
    let direction = (prev_c - prev_o).normalize();
    Some(n + direction * N_H_LENGTH)
}
