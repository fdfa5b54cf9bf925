//! # Engine Module
//!
//! The DSSP assignment engine: given a parsed structure, it derives per
//! residue the backbone dihedrals, hydrogen-bond partners and energies,
//! disulphide numbering, β-bridge/ladder/sheet topology, helix flags for
//! strides 3/4/5 plus polyproline-II, bend and chirality flags, and one
//! summary secondary-structure label.
//!
//! ## Pass pipeline
//!
//! 1. Snapshot the protein residues in model order (indices 1..N, chain
//!    breaks flagged, never renumbered).
//! 2. Geometry ([`geometry`]) - dihedrals, κ/α, bends, amide H.
//! 3. Hydrogen bonds ([`hbond`]) - Kabsch-Sander energies into two donor
//!    and two acceptor slots per residue.
//! 4. Disulphides ([`disulfide`]) - Sγ contact numbering.
//! 5. Sheets ([`bridge`]) - bridges, ladders, sheets, E/B labels.
//! 6. Helices ([`helix`]) - stride turns, PPII, T/S reduction.
//! 7. Statistics ([`statistics`]) - totals and histograms.
//!
//! The engine never mutates the input structure, and running it twice over
//! the same structure yields identical results.

mod bridge;
pub mod config;
mod disulfide;
mod geometry;
mod hbond;
mod helix;
pub mod state;
pub mod statistics;

pub use config::DsspConfig;
pub use state::{
    BridgePartner, ChainBreak, HelixFlag, HelixKind, ResidueState, SecondaryStructure,
    UNDEFINED_ANGLE,
};
pub use statistics::DsspStatistics;

use crate::core::models::structure::MolecularStructure;
use nalgebra::Point3;
use tracing::{debug, warn};

/// A frozen DSSP assignment over one structure.
#[derive(Debug)]
pub struct Dssp {
    residues: Vec<ResidueState>,
    statistics: DsspStatistics,
}

impl Dssp {
    /// Runs the full pass pipeline over the protein residues of `structure`.
    pub fn new(structure: &MolecularStructure, config: &DsspConfig) -> Self {
        let mut states = snapshot_residues(structure);
        debug!(residues = states.len(), "starting assignment");

        geometry::compute_backbone_geometry(&mut states);
        hbond::calculate_hbond_energies(&mut states);
        let ss_bridges = disulfide::assign_disulfide_bridges(&mut states);
        let topology = bridge::calculate_beta_sheets(&mut states);
        helix::calculate_helices(&mut states, config.min_pp_stretch);
        let statistics = statistics::gather_statistics(&states, &topology, ss_bridges);

        Self {
            residues: states,
            statistics,
        }
    }

    pub fn empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn statistics(&self) -> &DsspStatistics {
        &self.statistics
    }

    /// Residues in assignment order; restartable, each call starts over.
    pub fn residues(&self) -> impl Iterator<Item = ResidueInfo<'_>> + '_ {
        (0..self.residues.len()).map(move |index| ResidueInfo { dssp: self, index })
    }

    pub fn residue(&self, index: usize) -> Option<ResidueInfo<'_>> {
        (index < self.residues.len()).then_some(ResidueInfo { dssp: self, index })
    }
}

/// Read-only view of one assigned residue.
#[derive(Clone, Copy)]
pub struct ResidueInfo<'a> {
    dssp: &'a Dssp,
    index: usize,
}

impl<'a> ResidueInfo<'a> {
    fn state(&self) -> &'a ResidueState {
        &self.dssp.residues[self.index]
    }

    /// Sequential index, 1-based and contiguous across the whole model.
    pub fn nr(&self) -> usize {
        self.state().nr
    }

    pub fn compound_id(&self) -> &'a str {
        &self.state().compound
    }

    /// Single-letter amino-acid code, `'X'` for non-standard compounds.
    pub fn code(&self) -> char {
        self.state().code
    }

    /// Break classification relative to the previous residue in the listing.
    pub fn chain_break(&self) -> ChainBreak {
        self.state().chain_break
    }

    pub fn label_asym_id(&self) -> &'a str {
        &self.state().label_asym
    }

    pub fn auth_asym_id(&self) -> &'a str {
        &self.state().auth_asym
    }

    pub fn auth_seq_id(&self) -> isize {
        self.state().auth_seq
    }

    pub fn ins_code(&self) -> Option<&'a str> {
        self.state().ins_code.as_deref()
    }

    /// Position within the chain, 1-based.
    pub fn label_seq_id(&self) -> usize {
        self.state().label_seq
    }

    pub fn ss(&self) -> SecondaryStructure {
        self.state().ss
    }

    pub fn helix_flag(&self, kind: HelixKind) -> HelixFlag {
        self.state().helix_flag(kind)
    }

    pub fn bend(&self) -> bool {
        self.state().bend
    }

    pub fn chirality(&self) -> char {
        self.state().chirality()
    }

    /// Bridge partner slot 0 or 1: (partner nr, ladder index, parallel).
    pub fn bridge_partner(&self, slot: usize) -> Option<(usize, usize, bool)> {
        let partner = self.state().partners[slot];
        partner
            .partner
            .map(|index| (self.dssp.residues[index].nr, partner.ladder, partner.parallel))
    }

    /// 1-based sheet id, `None` outside any sheet.
    pub fn sheet(&self) -> Option<usize> {
        let sheet = self.state().sheet;
        (sheet != 0).then_some(sheet)
    }

    /// Acceptor slot 0 or 1 of this residue's N-H: (partner nr, energy).
    pub fn acceptor(&self, slot: usize) -> (Option<usize>, f64) {
        let s = self.state().acceptor_slots[slot];
        (s.partner.map(|index| self.dssp.residues[index].nr), s.energy)
    }

    /// Donor slot 0 or 1 into this residue's C=O: (partner nr, energy).
    pub fn donor(&self, slot: usize) -> (Option<usize>, f64) {
        let s = self.state().donor_slots[slot];
        (s.partner.map(|index| self.dssp.residues[index].nr), s.energy)
    }

    /// 1-based disulphide number shared by the two bonded cysteines.
    pub fn ss_bridge_nr(&self) -> Option<usize> {
        let nr = self.state().ss_bridge_nr;
        (nr != 0).then_some(nr)
    }

    pub fn accessibility(&self) -> f64 {
        self.state().accessibility
    }

    pub fn phi(&self) -> f64 {
        self.state().phi
    }

    pub fn psi(&self) -> f64 {
        self.state().psi
    }

    pub fn omega(&self) -> f64 {
        self.state().omega
    }

    pub fn tco(&self) -> f64 {
        self.state().tco
    }

    pub fn kappa(&self) -> f64 {
        self.state().kappa
    }

    pub fn alpha(&self) -> f64 {
        self.state().alpha
    }

    pub fn chis(&self) -> &'a [f64] {
        &self.state().chis
    }

    pub fn ca_position(&self) -> Option<Point3<f64>> {
        self.state().ca
    }
}

/// Snapshots the protein residues of the structure in model order.
///
/// Indices run 1..N without gaps; breaks in the listing are carried by the
/// chain-break flag. Residues missing one of N/Cα/C/O are reported and kept
/// with whatever atoms they have.
pub(crate) fn snapshot_residues(structure: &MolecularStructure) -> Vec<ResidueState> {
    let mut states: Vec<ResidueState> = Vec::new();
    let mut previous: Option<(String, isize, Option<String>)> = None;

    for (_, chain) in structure.chains_iter() {
        let mut label_seq = 0;
        for &residue_id in chain.residues() {
            let Some(residue) = structure.residue(residue_id) else {
                continue;
            };
            if residue.res_type.is_none() {
                continue;
            }
            label_seq += 1;

            let mut state = ResidueState::new(residue_id, states.len() + 1);
            state.compound = residue.name.clone();
            state.code = residue.one_letter();
            state.label_asym = chain.id.clone();
            state.auth_asym = chain.auth_id.clone();
            state.auth_seq = residue.auth_seq_id;
            state.ins_code = residue.ins_code.clone();
            state.label_seq = label_seq;
            state.accessibility = residue.accessibility;
            state.is_proline = residue.is_proline();

            state.n = structure.residue_atom_position(residue_id, "N");
            state.ca = structure.residue_atom_position(residue_id, "CA");
            state.c = structure.residue_atom_position(residue_id, "C");
            state.o = structure.residue_atom_position(residue_id, "O");
            state.h = structure.residue_atom_position(residue_id, "H");
            if state.code == 'C' {
                state.sg = structure.residue_atom_position(residue_id, "SG");
            }
            state.chis = geometry::compute_side_chain_chis(structure, residue);

            if !state.backbone_complete() {
                warn!(
                    chain = %chain.auth_id,
                    residue = residue.auth_seq_id,
                    compound = %residue.name,
                    "residue is missing backbone atoms; dihedrals undefined, excluded from hydrogen bonding"
                );
            }

            state.chain_break = match &previous {
                None => ChainBreak::NewChain,
                Some((prev_chain, _, _)) if *prev_chain != chain.id => ChainBreak::NewChain,
                Some((_, prev_seq, prev_ins)) => {
                    let contiguous = residue.auth_seq_id == prev_seq + 1
                        || (residue.auth_seq_id == *prev_seq && residue.ins_code != *prev_ins);
                    if contiguous {
                        ChainBreak::None
                    } else {
                        ChainBreak::Gap
                    }
                }
            };

            previous = Some((
                chain.id.clone(),
                residue.auth_seq_id,
                residue.ins_code.clone(),
            ));
            states.push(state);
        }
    }
    states
}
