use slotmap::new_key_type;

new_key_type! {
    /// Stable identifier for an atom in a [`MolecularStructure`](super::structure::MolecularStructure).
    pub struct AtomId;
    /// Stable identifier for a residue.
    pub struct ResidueId;
    /// Stable identifier for a chain.
    pub struct ChainId;
}
