//! Helix flags, PPII detection and the final label reduction.
//!
//! Runs after the bridge pass. Precedence between motifs is encoded by the
//! assignment order and the cells each motif may overwrite: H wins over E/B,
//! which win over G, I and P; T and S only ever fill loop cells.

use super::bridge::no_chain_break;
use super::hbond::is_hbond;
use super::state::{HelixFlag, HelixKind, ResidueState, SecondaryStructure, UNDEFINED_ANGLE};

/// PPII eligibility window: φ within −75°±29°, ψ within +145°±29°.
const PP_EPSILON: f64 = 29.0;
const PP_PHI: f64 = -75.0;
const PP_PSI: f64 = 145.0;

/// Marks turn/helix flags for one hydrogen-bonded stride, Kabsch-Sander
/// style: the acceptor starts the turn, the donor ends it.
fn mark_stride_turns(states: &mut [ResidueState], kind: HelixKind) {
    let stride = kind.stride().expect("PPII has no hydrogen-bond stride");
    let k = kind.index();
    let count = states.len();

    for i in 0..count.saturating_sub(stride) {
        if !is_hbond(states, i + stride, i) || !no_chain_break(states, i, i + stride) {
            continue;
        }
        states[i + stride].helix_flags[k] = HelixFlag::End;
        for j in i + 1..i + stride {
            if states[j].helix_flags[k] == HelixFlag::None {
                states[j].helix_flags[k] = HelixFlag::Middle;
            }
        }
        states[i].helix_flags[k] = if states[i].helix_flags[k] == HelixFlag::End {
            HelixFlag::StartAndEnd
        } else {
            HelixFlag::Start
        };
    }
}

fn is_helix_start(states: &[ResidueState], index: usize, kind: HelixKind) -> bool {
    states[index].helix_flags[kind.index()].is_start()
}

fn ppii_eligible(state: &ResidueState) -> bool {
    state.phi != UNDEFINED_ANGLE
        && state.psi != UNDEFINED_ANGLE
        && (PP_PHI - PP_EPSILON..=PP_PHI + PP_EPSILON).contains(&state.phi)
        && (PP_PSI - PP_EPSILON..=PP_PSI + PP_EPSILON).contains(&state.psi)
}

/// Assigns helix flags for all strides and reduces everything to the
/// summary label per the precedence H > E/B > G > I > P > T > S.
pub(crate) fn calculate_helices(states: &mut [ResidueState], min_pp_stretch: usize) {
    let count = states.len();

    for kind in [HelixKind::ThreeTen, HelixKind::Alpha, HelixKind::Pi] {
        mark_stride_turns(states, kind);
    }

    // α: two consecutive stride-4 starts claim the four turn residues,
    // overriding any strand assignment.
    for i in 1..count.saturating_sub(4) {
        if is_helix_start(states, i, HelixKind::Alpha)
            && is_helix_start(states, i - 1, HelixKind::Alpha)
        {
            for state in &mut states[i..=i + 3] {
                state.ss = SecondaryStructure::Alphahelix;
            }
        }
    }

    // 3₁₀: only over cells no stronger motif claimed.
    for i in 1..count.saturating_sub(3) {
        if is_helix_start(states, i, HelixKind::ThreeTen)
            && is_helix_start(states, i - 1, HelixKind::ThreeTen)
        {
            let free = states[i..=i + 2].iter().all(|state| {
                matches!(
                    state.ss,
                    SecondaryStructure::Loop | SecondaryStructure::Helix3
                )
            });
            if free {
                for state in &mut states[i..=i + 2] {
                    state.ss = SecondaryStructure::Helix3;
                }
            }
        }
    }

    // π: likewise, below G in precedence.
    for i in 1..count.saturating_sub(5) {
        if is_helix_start(states, i, HelixKind::Pi) && is_helix_start(states, i - 1, HelixKind::Pi)
        {
            let free = states[i..=i + 4].iter().all(|state| {
                matches!(
                    state.ss,
                    SecondaryStructure::Loop | SecondaryStructure::Helix5
                )
            });
            if free {
                for state in &mut states[i..=i + 4] {
                    state.ss = SecondaryStructure::Helix5;
                }
            }
        }
    }

    assign_ppii(states, min_pp_stretch);

    // Turns and bends fill what is left.
    for i in 1..count.saturating_sub(1) {
        if states[i].ss != SecondaryStructure::Loop {
            continue;
        }
        let mut is_turn = false;
        'strides: for kind in [HelixKind::ThreeTen, HelixKind::Alpha, HelixKind::Pi] {
            let stride = kind.stride().unwrap();
            for back in 1..stride {
                if i >= back && is_helix_start(states, i - back, kind) {
                    is_turn = true;
                    break 'strides;
                }
            }
        }
        if is_turn {
            states[i].ss = SecondaryStructure::Turn;
        } else if states[i].bend {
            states[i].ss = SecondaryStructure::Bend;
        }
    }
}

/// Maximal runs of PPII-eligible residues of at least `min_pp_stretch` get
/// the P label on their loop cells and the PPII helix flags over the run.
fn assign_ppii(states: &mut [ResidueState], min_pp_stretch: usize) {
    let threshold = min_pp_stretch.max(1);
    let k = HelixKind::PolyProlineII.index();
    let count = states.len();

    let mut index = 0;
    while index < count {
        if !ppii_eligible(&states[index]) {
            index += 1;
            continue;
        }
        let start = index;
        while index < count && ppii_eligible(&states[index]) {
            index += 1;
        }
        let length = index - start;
        if length < threshold {
            continue;
        }

        for state in &mut states[start..index] {
            if state.ss == SecondaryStructure::Loop {
                state.ss = SecondaryStructure::HelixPpii;
            }
        }
        if length == 1 {
            states[start].helix_flags[k] = HelixFlag::StartAndEnd;
        } else {
            states[start].helix_flags[k] = HelixFlag::Start;
            states[index - 1].helix_flags[k] = HelixFlag::End;
            for state in &mut states[start + 1..index - 1] {
                state.helix_flags[k] = HelixFlag::Middle;
            }
        }
    }
}
