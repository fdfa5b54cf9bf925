use crate::core::models::ids::ResidueId;
use nalgebra::Point3;

/// Sentinel for dihedrals that cannot be computed; propagates to the output.
/// Comparisons against it must be exact.
pub const UNDEFINED_ANGLE: f64 = 360.0;

/// Classification of a residue relative to its predecessor in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainBreak {
    /// Contiguous continuation of the same chain.
    None,
    /// Same chain, but the author numbering jumps.
    Gap,
    /// First residue of a chain.
    NewChain,
}

/// The four helix lattices tracked per residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelixKind {
    ThreeTen,
    Alpha,
    Pi,
    PolyProlineII,
}

impl HelixKind {
    pub const ALL: [HelixKind; 4] = [
        HelixKind::ThreeTen,
        HelixKind::Alpha,
        HelixKind::Pi,
        HelixKind::PolyProlineII,
    ];

    pub fn index(self) -> usize {
        match self {
            HelixKind::ThreeTen => 0,
            HelixKind::Alpha => 1,
            HelixKind::Pi => 2,
            HelixKind::PolyProlineII => 3,
        }
    }

    /// The i -> i+n hydrogen-bond stride; PPII has none, it is dihedral-defined.
    pub fn stride(self) -> Option<usize> {
        match self {
            HelixKind::ThreeTen => Some(3),
            HelixKind::Alpha => Some(4),
            HelixKind::Pi => Some(5),
            HelixKind::PolyProlineII => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelixFlag {
    #[default]
    None,
    Start,
    Middle,
    End,
    StartAndEnd,
}

impl HelixFlag {
    pub fn is_start(self) -> bool {
        matches!(self, HelixFlag::Start | HelixFlag::StartAndEnd)
    }
}

/// Summary secondary-structure label, one per residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondaryStructure {
    Alphahelix,
    Betabridge,
    Strand,
    Helix3,
    Helix5,
    HelixPpii,
    Turn,
    Bend,
    #[default]
    Loop,
}

impl SecondaryStructure {
    pub fn code(self) -> char {
        match self {
            SecondaryStructure::Alphahelix => 'H',
            SecondaryStructure::Betabridge => 'B',
            SecondaryStructure::Strand => 'E',
            SecondaryStructure::Helix3 => 'G',
            SecondaryStructure::Helix5 => 'I',
            SecondaryStructure::HelixPpii => 'P',
            SecondaryStructure::Turn => 'T',
            SecondaryStructure::Bend => 'S',
            SecondaryStructure::Loop => ' ',
        }
    }
}

/// One of the two best hydrogen-bond partners on either side of a residue.
///
/// `partner` is the 0-based index into the engine's residue array; the slot
/// is in use once `partner` is set. Energies start at 0 so only negative
/// energies ever occupy a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HBondSlot {
    pub partner: Option<usize>,
    pub energy: f64,
}

impl Default for HBondSlot {
    fn default() -> Self {
        Self {
            partner: None,
            energy: 0.0,
        }
    }
}

/// Bridge partnership of a residue; up to two per residue.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BridgePartner {
    pub partner: Option<usize>,
    pub ladder: usize,
    pub parallel: bool,
}

/// Everything the engine derives for a single residue.
///
/// Identity fields are snapshotted from the structure adapter when the
/// engine starts; derived fields are filled by the passes and frozen once
/// the engine returns.
#[derive(Debug, Clone)]
pub struct ResidueState {
    // Identity
    pub residue_id: ResidueId,
    pub nr: usize, // Sequential index, 1-based, contiguous
    pub compound: String,
    pub code: char,
    pub label_asym: String,
    pub auth_asym: String,
    pub auth_seq: isize,
    pub ins_code: Option<String>,
    pub label_seq: usize, // Position within the chain, 1-based
    pub chain_break: ChainBreak,
    pub accessibility: f64,
    pub is_proline: bool,
    pub sg: Option<Point3<f64>>, // Cysteine Sγ position

    // Backbone atoms
    pub n: Option<Point3<f64>>,
    pub ca: Option<Point3<f64>>,
    pub c: Option<Point3<f64>>,
    pub o: Option<Point3<f64>>,
    pub h: Option<Point3<f64>>,

    // Derived geometry
    pub phi: f64,
    pub psi: f64,
    pub omega: f64,
    pub tco: f64,
    pub kappa: f64,
    pub alpha: f64,
    pub chis: Vec<f64>,
    pub bend: bool,

    // Hydrogen bonds: `acceptor_slots` hold the partners accepting this
    // residue's N-H (the N-H-->O column); `donor_slots` hold the partners
    // donating to this residue's C=O (the O-->H-N column).
    pub acceptor_slots: [HBondSlot; 2],
    pub donor_slots: [HBondSlot; 2],

    // Sheet topology
    pub partners: [BridgePartner; 2],
    pub sheet: usize, // 0 = not in a sheet

    // Helices and summary
    pub helix_flags: [HelixFlag; 4],
    pub ss: SecondaryStructure,
    pub ss_bridge_nr: usize, // 0 = not in a disulphide
}

impl ResidueState {
    pub(crate) fn new(residue_id: ResidueId, nr: usize) -> Self {
        Self {
            residue_id,
            nr,
            compound: String::new(),
            code: 'X',
            label_asym: String::new(),
            auth_asym: String::new(),
            auth_seq: 0,
            ins_code: None,
            label_seq: 0,
            chain_break: ChainBreak::None,
            accessibility: 0.0,
            is_proline: false,
            sg: None,
            n: None,
            ca: None,
            c: None,
            o: None,
            h: None,
            phi: UNDEFINED_ANGLE,
            psi: UNDEFINED_ANGLE,
            omega: UNDEFINED_ANGLE,
            tco: 0.0,
            kappa: UNDEFINED_ANGLE,
            alpha: UNDEFINED_ANGLE,
            chis: Vec::new(),
            bend: false,
            acceptor_slots: [HBondSlot::default(); 2],
            donor_slots: [HBondSlot::default(); 2],
            partners: [BridgePartner::default(); 2],
            sheet: 0,
            helix_flags: [HelixFlag::default(); 4],
            ss: SecondaryStructure::default(),
            ss_bridge_nr: 0,
        }
    }

    /// All four heavy backbone atoms are present.
    pub fn backbone_complete(&self) -> bool {
        self.n.is_some() && self.ca.is_some() && self.c.is_some() && self.o.is_some()
    }

    /// '-' for α < 0, '+' for α >= 0, ' ' when α is undefined.
    pub fn chirality(&self) -> char {
        if self.alpha == UNDEFINED_ANGLE {
            ' '
        } else if self.alpha < 0.0 {
            '-'
        } else {
            '+'
        }
    }

    pub fn helix_flag(&self, kind: HelixKind) -> HelixFlag {
        self.helix_flags[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chirality_follows_alpha_sign() {
        let mut state = ResidueState::new(ResidueId::default(), 1);
        assert_eq!(state.chirality(), ' ');
        state.alpha = -50.0;
        assert_eq!(state.chirality(), '-');
        state.alpha = 50.0;
        assert_eq!(state.chirality(), '+');
        state.alpha = 0.0;
        assert_eq!(state.chirality(), '+');
    }

    #[test]
    fn backbone_complete_requires_all_four_atoms() {
        let mut state = ResidueState::new(ResidueId::default(), 1);
        assert!(!state.backbone_complete());
        state.n = Some(Point3::origin());
        state.ca = Some(Point3::origin());
        state.c = Some(Point3::origin());
        assert!(!state.backbone_complete());
        state.o = Some(Point3::origin());
        assert!(state.backbone_complete());
    }

    #[test]
    fn ss_codes_match_dssp_characters() {
        assert_eq!(SecondaryStructure::Alphahelix.code(), 'H');
        assert_eq!(SecondaryStructure::Strand.code(), 'E');
        assert_eq!(SecondaryStructure::HelixPpii.code(), 'P');
        assert_eq!(SecondaryStructure::Loop.code(), ' ');
    }
}
