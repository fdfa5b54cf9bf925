//! Kabsch-Sander hydrogen-bond energies and per-residue partner slots.

use super::state::{HBondSlot, ResidueState};
use crate::core::utils::geometry::distance;
use rayon::prelude::*;

/// f·q1·q2 of the Kabsch-Sander electrostatic model, kcal/mol·Å.
const COUPLING_CONSTANT: f64 = -27.888;
/// Energies are clamped here to limit blow-up at tiny distances.
const MIN_HBOND_ENERGY: f64 = -9.9;
/// A bond exists only below this energy.
pub(crate) const MAX_HBOND_ENERGY: f64 = -0.5;
/// Below this inter-atom distance the energy is clamped outright.
const MINIMAL_DISTANCE: f64 = 0.5;
/// Donor/acceptor pairs beyond this Cα separation are never evaluated.
const MINIMAL_CA_DISTANCE: f64 = 9.0;

/// Electrostatic bond energy for `donor` N-H donating into `acceptor` C=O.
///
/// `None` when the donor is a proline or either side lacks the required
/// atoms; such pairs never compete for slots.
fn bond_energy(donor: &ResidueState, acceptor: &ResidueState) -> Option<f64> {
    if donor.is_proline || !donor.backbone_complete() || !acceptor.backbone_complete() {
        return None;
    }
    let (n, h) = (donor.n?, donor.h?);
    let (c, o) = (acceptor.c?, acceptor.o?);

    let d_ho = distance(&h, &o);
    let d_hc = distance(&h, &c);
    let d_nc = distance(&n, &c);
    let d_no = distance(&n, &o);

    let energy = if d_ho < MINIMAL_DISTANCE
        || d_hc < MINIMAL_DISTANCE
        || d_nc < MINIMAL_DISTANCE
        || d_no < MINIMAL_DISTANCE
    {
        MIN_HBOND_ENERGY
    } else {
        COUPLING_CONSTANT / d_ho - COUPLING_CONSTANT / d_hc + COUPLING_CONSTANT / d_nc
            - COUPLING_CONSTANT / d_no
    };

    Some(energy.max(MIN_HBOND_ENERGY))
}

/// Lets `energy` compete for the donor's acceptor slots and the acceptor's
/// donor slots. Slots stay sorted by ascending energy, best first.
pub(crate) fn record(states: &mut [ResidueState], donor: usize, acceptor: usize, energy: f64) {
    update_slots(&mut states[donor].acceptor_slots, acceptor, energy);
    update_slots(&mut states[acceptor].donor_slots, donor, energy);
}

fn update_slots(slots: &mut [HBondSlot; 2], partner: usize, energy: f64) {
    if energy < slots[0].energy {
        slots[1] = slots[0];
        slots[0] = HBondSlot {
            partner: Some(partner),
            energy,
        };
    } else if energy < slots[1].energy {
        slots[1] = HBondSlot {
            partner: Some(partner),
            energy,
        };
    }
}

/// Scans all candidate pairs and fills the per-residue slots.
///
/// The candidate energies are computed in parallel; the slot merge runs
/// serially in ascending pair order, so the result is identical to a
/// sequential scan. A residue never donates to its immediate predecessor.
pub(crate) fn calculate_hbond_energies(states: &mut [ResidueState]) {
    let count = states.len();
    let snapshot: &[ResidueState] = states;

    let candidates: Vec<(usize, usize, f64)> = (0..count)
        .into_par_iter()
        .flat_map_iter(|i| {
            let mut local = Vec::new();
            for j in (i + 1)..count {
                let (Some(ca_i), Some(ca_j)) = (snapshot[i].ca, snapshot[j].ca) else {
                    continue;
                };
                if distance(&ca_i, &ca_j) >= MINIMAL_CA_DISTANCE {
                    continue;
                }
                if let Some(energy) = bond_energy(&snapshot[i], &snapshot[j]) {
                    local.push((i, j, energy));
                }
                if j != i + 1 {
                    if let Some(energy) = bond_energy(&snapshot[j], &snapshot[i]) {
                        local.push((j, i, energy));
                    }
                }
            }
            local
        })
        .collect();

    for (donor, acceptor, energy) in candidates {
        record(states, donor, acceptor, energy);
    }
}

/// A hydrogen bond donor -> acceptor exists when the donor holds the
/// acceptor in a slot with an energy below the acceptance threshold.
pub(crate) fn is_hbond(states: &[ResidueState], donor: usize, acceptor: usize) -> bool {
    states[donor]
        .acceptor_slots
        .iter()
        .any(|slot| slot.partner == Some(acceptor) && slot.energy < MAX_HBOND_ENERGY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ResidueId;
    use crate::engine::geometry::compute_backbone_geometry;
    use crate::testing::peptide_states;
    use nalgebra::Point3;

    fn state_at(nr: usize) -> ResidueState {
        ResidueState::new(ResidueId::default(), nr)
    }

    /// Donor N at origin, H one Å towards the acceptor, acceptor O at 3 Å
    /// and C at 4 Å along the axis: all four distances are integers. The
    /// remaining backbone atoms only have to exist.
    fn linear_pair() -> (ResidueState, ResidueState) {
        let mut donor = state_at(1);
        donor.n = Some(Point3::new(0.0, 0.0, 0.0));
        donor.h = Some(Point3::new(1.0, 0.0, 0.0));
        donor.ca = Some(Point3::new(0.0, 1.5, 0.0));
        donor.c = Some(Point3::new(-1.0, 2.5, 0.0));
        donor.o = Some(Point3::new(-2.2, 2.5, 0.0));

        let mut acceptor = state_at(5);
        acceptor.o = Some(Point3::new(3.0, 0.0, 0.0));
        acceptor.c = Some(Point3::new(4.0, 0.0, 0.0));
        acceptor.n = Some(Point3::new(5.0, 1.0, 0.0));
        acceptor.ca = Some(Point3::new(4.5, -1.3, 0.0));
        (donor, acceptor)
    }

    #[test]
    fn linear_geometry_gives_the_textbook_energy() {
        let (donor, acceptor) = linear_pair();
        let energy = bond_energy(&donor, &acceptor).unwrap();
        // Q(1/2 - 1/3 + 1/4 - 1/3) = Q/12
        let expected = COUPLING_CONSTANT / 12.0;
        assert!((energy - expected).abs() < 1e-9);
        assert!(energy < MAX_HBOND_ENERGY);
    }

    #[test]
    fn proline_never_donates() {
        let (mut donor, acceptor) = linear_pair();
        donor.is_proline = true;
        assert!(bond_energy(&donor, &acceptor).is_none());
    }

    #[test]
    fn missing_backbone_atoms_block_the_pair() {
        let (donor, mut acceptor) = linear_pair();
        acceptor.o = None;
        assert!(bond_energy(&donor, &acceptor).is_none());
    }

    #[test]
    fn overlapping_atoms_clamp_to_the_energy_floor() {
        let (mut donor, acceptor) = linear_pair();
        donor.h = Some(Point3::new(2.9, 0.0, 0.0)); // 0.1 Å from O
        let energy = bond_energy(&donor, &acceptor).unwrap();
        assert_eq!(energy, MIN_HBOND_ENERGY);
    }

    #[test]
    fn slots_keep_the_two_lowest_energies_sorted() {
        let mut states = vec![state_at(1), state_at(2), state_at(3), state_at(4)];
        record(&mut states, 0, 1, -1.0);
        record(&mut states, 0, 2, -3.0);
        record(&mut states, 0, 3, -2.0);

        let slots = &states[0].acceptor_slots;
        assert_eq!(slots[0].partner, Some(2));
        assert_eq!(slots[0].energy, -3.0);
        assert_eq!(slots[1].partner, Some(3));
        assert_eq!(slots[1].energy, -2.0);

        // and the reciprocal donor sides
        assert_eq!(states[2].donor_slots[0].partner, Some(0));
        assert_eq!(states[2].donor_slots[0].energy, -3.0);
        assert_eq!(states[1].donor_slots[0].partner, None);
    }

    #[test]
    fn weak_contacts_are_stored_but_are_not_bonds() {
        let mut states = vec![state_at(1), state_at(2)];
        record(&mut states, 0, 1, -0.3);
        assert_eq!(states[0].acceptor_slots[0].partner, Some(1));
        assert!(!is_hbond(&states, 0, 1));

        record(&mut states, 0, 1, -0.6);
        assert!(is_hbond(&states, 0, 1));
    }

    #[test]
    fn helix_scan_finds_i_to_i_plus_4_bonds() {
        let mut states = peptide_states(12, -57.0, -47.0);
        compute_backbone_geometry(&mut states);
        calculate_hbond_energies(&mut states);

        // The donor of the i -> i+4 turn is residue i+4.
        assert!(is_hbond(&states, 6, 2), "expected O(3)<--H-N(7) bond");
        assert!(!is_hbond(&states, 2, 6));
    }

    #[test]
    fn scan_is_deterministic() {
        let mut first = peptide_states(12, -57.0, -47.0);
        compute_backbone_geometry(&mut first);
        calculate_hbond_energies(&mut first);

        let mut second = peptide_states(12, -57.0, -47.0);
        compute_backbone_geometry(&mut second);
        calculate_hbond_energies(&mut second);

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.acceptor_slots, b.acceptor_slots);
            assert_eq!(a.donor_slots, b.donor_slots);
        }
    }
}
