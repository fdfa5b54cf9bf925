//! Test-only helpers: synthetic peptides built from backbone torsions.
//!
//! The chain grows residue by residue from internal coordinates, the same
//! way peptide builders do it: N from the previous ψ, Cα across a trans
//! peptide bond, C from the residue's φ, and each carbonyl O re-fixed into
//! the peptide plane once the next N exists.

use crate::core::models::atom::Atom;
use crate::core::models::structure::MolecularStructure;
use crate::core::utils::geometry::position_from_internal;
use crate::engine::state::ResidueState;
use nalgebra::Point3;

const PEPTIDE_BOND: f64 = 1.33;
const N_CA_LENGTH: f64 = 1.46;
const CA_C_LENGTH: f64 = 1.52;
const C_O_LENGTH: f64 = 1.23;
const CA_C_N_ANGLE: f64 = 116.64;
const C_N_CA_ANGLE: f64 = 121.38;
const N_CA_C_ANGLE: f64 = 111.0;
const CA_C_O_ANGLE: f64 = 120.5;

pub(crate) struct BackboneResidue {
    pub n: Point3<f64>,
    pub ca: Point3<f64>,
    pub c: Point3<f64>,
    pub o: Point3<f64>,
}

/// Backbone coordinates for a chain with the given per-residue (φ, ψ).
/// φ of the first and ψ of the last residue are ignored.
pub(crate) fn backbone_chain(angles: &[(f64, f64)]) -> Vec<BackboneResidue> {
    let mut residues: Vec<BackboneResidue> = Vec::with_capacity(angles.len());
    if angles.is_empty() {
        return residues;
    }

    let ca = Point3::origin();
    let c = Point3::new(CA_C_LENGTH, 0.0, 0.0);
    let rad = N_CA_C_ANGLE.to_radians();
    let n = Point3::new(N_CA_LENGTH * rad.cos(), N_CA_LENGTH * rad.sin(), 0.0);
    let o = position_from_internal(&n, &ca, &c, C_O_LENGTH, CA_C_O_ANGLE, 180.0);
    residues.push(BackboneResidue { n, ca, c, o });

    for index in 1..angles.len() {
        let psi_prev = angles[index - 1].1;
        let phi = angles[index].0;
        let prev = &residues[index - 1];

        let n = position_from_internal(
            &prev.n,
            &prev.ca,
            &prev.c,
            PEPTIDE_BOND,
            CA_C_N_ANGLE,
            psi_prev,
        );
        let ca = position_from_internal(&prev.ca, &prev.c, &n, N_CA_LENGTH, C_N_CA_ANGLE, 180.0);
        let c = position_from_internal(&prev.c, &n, &ca, CA_C_LENGTH, N_CA_C_ANGLE, phi);
        let o = position_from_internal(&n, &ca, &c, C_O_LENGTH, CA_C_O_ANGLE, 180.0);

        residues[index - 1].o =
            position_from_internal(&n, &prev.ca, &prev.c, C_O_LENGTH, CA_C_O_ANGLE, 180.0);
        residues.push(BackboneResidue { n, ca, c, o });
    }
    residues
}

/// Builds a single-chain alanine structure from backbone coordinates.
pub(crate) fn structure_from_backbone(residues: &[BackboneResidue]) -> MolecularStructure {
    let mut structure = MolecularStructure::new();
    let chain = structure.add_chain("A", "A");
    for (index, backbone) in residues.iter().enumerate() {
        let residue_id = structure
            .add_residue(chain, "ALA", (index + 1) as isize, None)
            .unwrap();
        for (name, position) in [
            ("N", backbone.n),
            ("CA", backbone.ca),
            ("C", backbone.c),
            ("O", backbone.o),
        ] {
            structure
                .add_atom_to_residue(residue_id, Atom::new(name, residue_id, position))
                .unwrap();
        }
    }
    structure
}

/// A uniform (φ, ψ) chain of `count` alanines as a full structure.
pub(crate) fn peptide_structure(count: usize, phi: f64, psi: f64) -> MolecularStructure {
    structure_from_backbone(&backbone_chain(&vec![(phi, psi); count]))
}

/// The same chain already snapshotted into engine residue states.
pub(crate) fn peptide_states(count: usize, phi: f64, psi: f64) -> Vec<ResidueState> {
    crate::engine::snapshot_residues(&peptide_structure(count, phi, psi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::geometry::{dihedral_angle, distance};

    #[test]
    fn built_chain_reproduces_the_requested_torsions() {
        let residues = backbone_chain(&vec![(-57.0, -47.0); 4]);

        for index in 1..4 {
            let phi = dihedral_angle(
                &residues[index - 1].c,
                &residues[index].n,
                &residues[index].ca,
                &residues[index].c,
            );
            assert!((phi - (-57.0)).abs() < 1e-6, "phi {phi}");
        }
        for index in 0..3 {
            let psi = dihedral_angle(
                &residues[index].n,
                &residues[index].ca,
                &residues[index].c,
                &residues[index + 1].n,
            );
            assert!((psi - (-47.0)).abs() < 1e-6, "psi {psi}");
        }
    }

    #[test]
    fn peptide_bond_lengths_are_standard() {
        let residues = backbone_chain(&vec![(-120.0, 140.0); 3]);
        for index in 1..3 {
            let bond = distance(&residues[index - 1].c, &residues[index].n);
            assert!((bond - PEPTIDE_BOND).abs() < 1e-9);
        }
    }

    #[test]
    fn carbonyl_oxygens_stay_in_the_peptide_plane() {
        let residues = backbone_chain(&vec![(-57.0, -47.0); 3]);
        let omega_like = dihedral_angle(
            &residues[1].n,
            &residues[0].ca,
            &residues[0].c,
            &residues[0].o,
        );
        assert!((omega_like.abs() - 180.0).abs() < 1e-6);
    }
}
