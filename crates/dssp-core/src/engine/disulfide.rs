//! Disulphide bridge numbering over cysteine Sγ contacts.

use super::state::ResidueState;
use crate::core::utils::geometry::distance;
use tracing::debug;

/// Sγ-Sγ distance below which two cysteines are considered bonded.
const SG_BOND_DISTANCE: f64 = 2.5;

/// Numbers disulphide-bonded cysteine pairs 1, 2, ... in order of the first
/// residue index.
///
/// Returns `(total, intra_chain)` bridge counts.
pub(crate) fn assign_disulfide_bridges(states: &mut [ResidueState]) -> (usize, usize) {
    let cysteines: Vec<usize> = states
        .iter()
        .enumerate()
        .filter_map(|(index, state)| state.sg.map(|_| index))
        .collect();

    let mut total = 0;
    let mut intra_chain = 0;
    for (position, &i) in cysteines.iter().enumerate() {
        if states[i].ss_bridge_nr != 0 {
            continue;
        }
        for &j in &cysteines[position + 1..] {
            if states[j].ss_bridge_nr != 0 {
                continue;
            }
            let (Some(sg_i), Some(sg_j)) = (states[i].sg, states[j].sg) else {
                continue;
            };
            if distance(&sg_i, &sg_j) < SG_BOND_DISTANCE {
                total += 1;
                states[i].ss_bridge_nr = total;
                states[j].ss_bridge_nr = total;
                if states[i].label_asym == states[j].label_asym {
                    intra_chain += 1;
                }
                debug!(
                    first = states[i].nr,
                    second = states[j].nr,
                    bridge = total,
                    "disulphide bridge"
                );
                break;
            }
        }
    }
    (total, intra_chain)
}
