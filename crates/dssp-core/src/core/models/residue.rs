use super::ids::{AtomId, ChainId};
use phf::phf_map;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// The twenty standard amino acids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueType {
    Alanine,
    Arginine,
    Asparagine,
    AsparticAcid,
    Cysteine,
    Glutamine,
    GlutamicAcid,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported or unknown three-letter residue code: '{0}'")]
pub struct ParseResidueTypeError(pub String);

impl FromStr for ResidueType {
    type Err = ParseResidueTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALA" => Ok(ResidueType::Alanine),
            "ARG" => Ok(ResidueType::Arginine),
            "ASN" => Ok(ResidueType::Asparagine),
            "ASP" => Ok(ResidueType::AsparticAcid),
            "CYS" => Ok(ResidueType::Cysteine),
            "GLN" => Ok(ResidueType::Glutamine),
            "GLU" => Ok(ResidueType::GlutamicAcid),
            "GLY" => Ok(ResidueType::Glycine),
            "HIS" => Ok(ResidueType::Histidine),
            "ILE" => Ok(ResidueType::Isoleucine),
            "LEU" => Ok(ResidueType::Leucine),
            "LYS" => Ok(ResidueType::Lysine),
            "MET" => Ok(ResidueType::Methionine),
            "PHE" => Ok(ResidueType::Phenylalanine),
            "PRO" => Ok(ResidueType::Proline),
            "SER" => Ok(ResidueType::Serine),
            "THR" => Ok(ResidueType::Threonine),
            "TRP" => Ok(ResidueType::Tryptophan),
            "TYR" => Ok(ResidueType::Tyrosine),
            "VAL" => Ok(ResidueType::Valine),
            unsupported => Err(ParseResidueTypeError(unsupported.to_string())),
        }
    }
}

impl ResidueType {
    pub fn to_three_letter(self) -> &'static str {
        match self {
            ResidueType::Alanine => "ALA",
            ResidueType::Arginine => "ARG",
            ResidueType::Asparagine => "ASN",
            ResidueType::AsparticAcid => "ASP",
            ResidueType::Cysteine => "CYS",
            ResidueType::Glutamine => "GLN",
            ResidueType::GlutamicAcid => "GLU",
            ResidueType::Glycine => "GLY",
            ResidueType::Histidine => "HIS",
            ResidueType::Isoleucine => "ILE",
            ResidueType::Leucine => "LEU",
            ResidueType::Lysine => "LYS",
            ResidueType::Methionine => "MET",
            ResidueType::Phenylalanine => "PHE",
            ResidueType::Proline => "PRO",
            ResidueType::Serine => "SER",
            ResidueType::Threonine => "THR",
            ResidueType::Tryptophan => "TRP",
            ResidueType::Tyrosine => "TYR",
            ResidueType::Valine => "VAL",
        }
    }
}

static AMINO_ACID_CODES: phf::Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
};

/// Single-letter amino-acid code for a three-letter compound ID, `'X'` when unknown.
pub fn one_letter_code(compound: &str) -> char {
    AMINO_ACID_CODES
        .get(compound.trim().to_uppercase().as_str())
        .copied()
        .unwrap_or('X')
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub name: String,                  // Compound code as found in the file (e.g., "ALA")
    pub res_type: Option<ResidueType>, // Standard amino-acid type, if recognised
    pub auth_seq_id: isize,            // Author-assigned sequence number
    pub ins_code: Option<String>,      // PDB insertion code
    pub chain_id: ChainId,             // ID of the parent chain
    pub accessibility: f64,            // Solvent-accessible surface in Å²
    pub(crate) atoms: Vec<AtomId>,
    atom_name_map: HashMap<String, AtomId>, // First atom seen for each name wins
}

impl Residue {
    pub(crate) fn new(
        name: &str,
        auth_seq_id: isize,
        ins_code: Option<&str>,
        chain_id: ChainId,
    ) -> Self {
        Self {
            name: name.to_string(),
            res_type: name.parse().ok(),
            auth_seq_id,
            ins_code: ins_code.map(str::to_string),
            chain_id,
            accessibility: 0.0,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map
            .entry(atom_name.to_string())
            .or_insert(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    pub fn is_proline(&self) -> bool {
        self.res_type == Some(ResidueType::Proline)
    }

    /// Single-letter code of this residue, `'X'` for non-standard compounds.
    pub fn one_letter(&self) -> char {
        one_letter_code(&self.name)
    }
}
