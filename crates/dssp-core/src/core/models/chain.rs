use super::ids::ResidueId;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: String,      // Label asym ID (e.g., "A")
    pub auth_id: String, // Author asym ID; usually equal to `id` for PDB input
    pub(crate) residues: Vec<ResidueId>,
}

impl Chain {
    pub(crate) fn new(id: &str, auth_id: &str) -> Self {
        Self {
            id: id.to_string(),
            auth_id: auth_id.to_string(),
            residues: Vec::new(),
        }
    }

    /// Residues in chain order.
    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }
}
