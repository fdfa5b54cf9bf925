//! Per-residue backbone geometry: φ/ψ/ω and χ dihedrals, tco, κ, α, bend
//! flags and reconstruction of the amide hydrogen.

use super::state::{ChainBreak, ResidueState, UNDEFINED_ANGLE};
use crate::core::models::residue::Residue;
use crate::core::models::structure::MolecularStructure;
use crate::core::utils::geometry::{cosinus_angle, dihedral_angle};
use phf::phf_map;

/// κ above this angle marks a bend (the S label).
const BEND_KAPPA: f64 = 70.0;

/// Side-chain χ dihedral atom quadruples per residue type, in χ1..χn order.
static CHI_ATOMS: phf::Map<&'static str, &'static [[&'static str; 4]]> = phf_map! {
    "ARG" => &[
        ["N", "CA", "CB", "CG"],
        ["CA", "CB", "CG", "CD"],
        ["CB", "CG", "CD", "NE"],
        ["CG", "CD", "NE", "CZ"],
        ["CD", "NE", "CZ", "NH1"],
    ],
    "ASN" => &[["N", "CA", "CB", "CG"], ["CA", "CB", "CG", "OD1"]],
    "ASP" => &[["N", "CA", "CB", "CG"], ["CA", "CB", "CG", "OD1"]],
    "CYS" => &[["N", "CA", "CB", "SG"]],
    "GLN" => &[
        ["N", "CA", "CB", "CG"],
        ["CA", "CB", "CG", "CD"],
        ["CB", "CG", "CD", "OE1"],
    ],
    "GLU" => &[
        ["N", "CA", "CB", "CG"],
        ["CA", "CB", "CG", "CD"],
        ["CB", "CG", "CD", "OE1"],
    ],
    "HIS" => &[["N", "CA", "CB", "CG"], ["CA", "CB", "CG", "ND1"]],
    "ILE" => &[["N", "CA", "CB", "CG1"], ["CA", "CB", "CG1", "CD1"]],
    "LEU" => &[["N", "CA", "CB", "CG"], ["CA", "CB", "CG", "CD1"]],
    "LYS" => &[
        ["N", "CA", "CB", "CG"],
        ["CA", "CB", "CG", "CD"],
        ["CB", "CG", "CD", "CE"],
        ["CG", "CD", "CE", "NZ"],
    ],
    "MET" => &[
        ["N", "CA", "CB", "CG"],
        ["CA", "CB", "CG", "SD"],
        ["CB", "CG", "SD", "CE"],
    ],
    "PHE" => &[["N", "CA", "CB", "CG"], ["CA", "CB", "CG", "CD1"]],
    "PRO" => &[["N", "CA", "CB", "CG"], ["CA", "CB", "CG", "CD"]],
    "SER" => &[["N", "CA", "CB", "OG"]],
    "THR" => &[["N", "CA", "CB", "OG1"]],
    "TRP" => &[["N", "CA", "CB", "CG"], ["CA", "CB", "CG", "CD1"]],
    "TYR" => &[["N", "CA", "CB", "CG"], ["CA", "CB", "CG", "CD1"]],
    "VAL" => &[["N", "CA", "CB", "CG1"]],
};

/// χ dihedrals of a residue, as many as its side-chain atoms allow.
pub(crate) fn compute_side_chain_chis(
    structure: &MolecularStructure,
    residue: &Residue,
) -> Vec<f64> {
    let Some(quadruples) = CHI_ATOMS.get(residue.name.to_uppercase().as_str()) else {
        return Vec::new();
    };
    let mut chis = Vec::with_capacity(quadruples.len());
    for quadruple in quadruples.iter() {
        let positions: Option<Vec<_>> = quadruple
            .iter()
            .map(|name| {
                residue
                    .get_atom_id_by_name(name)
                    .and_then(|id| structure.atom(id))
                    .map(|atom| atom.position)
            })
            .collect();
        match positions {
            Some(p) => chis.push(dihedral_angle(&p[0], &p[1], &p[2], &p[3])),
            None => break,
        }
    }
    chis
}

fn has_previous(states: &[ResidueState], index: usize) -> bool {
    index > 0 && states[index].chain_break == ChainBreak::None
}

fn has_next(states: &[ResidueState], index: usize) -> bool {
    index + 1 < states.len() && states[index + 1].chain_break == ChainBreak::None
}

/// Fills φ, ψ, ω, tco, κ, α and the bend flag, and reconstructs the amide H
/// where the structure did not provide one.
///
/// Residues with an incomplete backbone keep their sentinel values; their
/// neighbours compute what their own atoms allow.
pub(crate) fn compute_backbone_geometry(states: &mut [ResidueState]) {
    reconstruct_hydrogens(states);

    for index in 0..states.len() {
        if !states[index].backbone_complete() {
            continue;
        }
        let prev = has_previous(states, index).then(|| states[index - 1].clone());
        let next = has_next(states, index).then(|| states[index + 1].clone());

        let state = &states[index];
        let mut phi = UNDEFINED_ANGLE;
        let mut psi = UNDEFINED_ANGLE;
        let mut omega = UNDEFINED_ANGLE;
        let mut tco = 0.0;

        if let Some(prev) = &prev {
            if let (Some(pc), Some(n), Some(ca), Some(c)) = (prev.c, state.n, state.ca, state.c) {
                phi = dihedral_angle(&pc, &n, &ca, &c);
            }
            if let (Some(pca), Some(pc), Some(n), Some(ca)) = (prev.ca, prev.c, state.n, state.ca) {
                omega = dihedral_angle(&pca, &pc, &n, &ca);
            }
            if let (Some(c), Some(o), Some(pc), Some(po)) = (state.c, state.o, prev.c, prev.o) {
                tco = cosinus_angle(&c, &o, &pc, &po);
            }
        }
        if let Some(next) = &next {
            if let (Some(n), Some(ca), Some(c), Some(nn)) = (state.n, state.ca, state.c, next.n) {
                psi = dihedral_angle(&n, &ca, &c, &nn);
            }
        }

        let state = &mut states[index];
        state.phi = phi;
        state.psi = psi;
        state.omega = omega;
        state.tco = tco;
    }

    // κ and α need the two-residue neighbourhood.
    for index in 0..states.len() {
        if !states[index].backbone_complete() {
            continue;
        }
        let window_back_2 = has_previous(states, index)
            && has_previous(states, index - 1)
            && has_next(states, index)
            && has_next(states, index + 1);
        let window_back_1 =
            has_previous(states, index) && has_next(states, index) && has_next(states, index + 1);

        let mut kappa = UNDEFINED_ANGLE;
        let mut alpha = UNDEFINED_ANGLE;

        if window_back_2 {
            if let (Some(prev2), Some(ca), Some(next2)) = (
                states[index - 2].ca,
                states[index].ca,
                states[index + 2].ca,
            ) {
                let ckap = cosinus_angle(&ca, &prev2, &next2, &ca);
                let skap = (1.0 - ckap * ckap).max(0.0).sqrt();
                kappa = skap.atan2(ckap).to_degrees();
            }
        }
        if window_back_1 {
            if let (Some(prev_ca), Some(ca), Some(next_ca), Some(next2_ca)) = (
                states[index - 1].ca,
                states[index].ca,
                states[index + 1].ca,
                states[index + 2].ca,
            ) {
                alpha = dihedral_angle(&prev_ca, &ca, &next_ca, &next2_ca);
            }
        }

        let state = &mut states[index];
        state.kappa = kappa;
        state.alpha = alpha;
        state.bend = kappa != UNDEFINED_ANGLE && kappa > BEND_KAPPA;
    }
}

/// H sits at unit distance from N along the previous C=O direction; proline
/// never carries one, and without a previous residue H collapses onto N,
/// which zeroes the bond energy.
fn reconstruct_hydrogens(states: &mut [ResidueState]) {
    for index in 0..states.len() {
        if states[index].h.is_some()
            || states[index].is_proline
            || !states[index].backbone_complete()
        {
            continue;
        }
        let Some(n) = states[index].n else { continue };
        let mut h = n;
        if has_previous(states, index) {
            let prev = &states[index - 1];
            if let (Some(pc), Some(po)) = (prev.c, prev.o) {
                h += (pc - po).normalize();
            }
        }
        states[index].h = Some(h);
    }
}
