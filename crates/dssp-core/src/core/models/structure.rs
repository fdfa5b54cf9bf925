use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Bibliographic metadata carried along with the coordinates.
///
/// Used to reconstruct the HEADER/COMPND/SOURCE/AUTHOR lines of the classic
/// DSSP output; every field may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureMetadata {
    pub id_code: String,
    pub classification: String,
    pub deposition_date: String,
    pub compound: String,
    pub source: String,
    pub authors: String,
}

/// A parsed macromolecular model: chains of residues with their atoms.
///
/// Chains keep file order; residues within a chain are ordered by author
/// sequence number and insertion code. This is the only structure the engine
/// ever sees, and the engine never mutates it.
#[derive(Debug, Clone, Default)]
pub struct MolecularStructure {
    atoms: SlotMap<AtomId, Atom>,
    residues: SlotMap<ResidueId, Residue>,
    chains: SlotMap<ChainId, Chain>,
    chain_order: Vec<ChainId>,
    chain_id_map: HashMap<String, ChainId>,
    residue_id_map: HashMap<(ChainId, isize, Option<String>), ResidueId>,
    pub metadata: StructureMetadata,
}

impl MolecularStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn residue_mut(&mut self, id: ResidueId) -> Option<&mut Residue> {
        self.residues.get_mut(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Chains in file order.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(move |&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    pub fn chain_count(&self) -> usize {
        self.chain_order.len()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// All residues, chain by chain, in model order.
    pub fn residues_in_order(&self) -> impl Iterator<Item = (ResidueId, &Residue)> + '_ {
        self.chains_iter().flat_map(move |(_, chain)| {
            chain
                .residues()
                .iter()
                .filter_map(move |&rid| self.residues.get(rid).map(|r| (rid, r)))
        })
    }

    pub fn find_chain_by_id(&self, id: &str) -> Option<ChainId> {
        self.chain_id_map.get(id).copied()
    }

    /// Adds a chain or returns the existing one with the same label.
    pub fn add_chain(&mut self, id: &str, auth_id: &str) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id, auth_id));
        self.chain_order.push(chain_id);
        self.chain_id_map.insert(id.to_string(), chain_id);
        chain_id
    }

    /// Adds a residue or returns the existing one with the same numbering.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        name: &str,
        auth_seq_id: isize,
        ins_code: Option<&str>,
    ) -> Option<ResidueId> {
        if !self.chains.contains_key(chain_id) {
            return None;
        }
        let key = (chain_id, auth_seq_id, ins_code.map(str::to_string));
        if let Some(&existing) = self.residue_id_map.get(&key) {
            return Some(existing);
        }
        let residue_id = self
            .residues
            .insert(Residue::new(name, auth_seq_id, ins_code, chain_id));
        self.residue_id_map.insert(key, residue_id);
        self.chains[chain_id].residues.push(residue_id);
        Some(residue_id)
    }

    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        self.residues[residue_id].add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Position of the named atom within a residue, if present.
    pub fn residue_atom_position(&self, residue_id: ResidueId, name: &str) -> Option<Point3<f64>> {
        let residue = self.residues.get(residue_id)?;
        let atom_id = residue.get_atom_id_by_name(name)?;
        self.atoms.get(atom_id).map(|a| a.position)
    }
}
