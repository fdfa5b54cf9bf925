//! Aggregate counts and histograms over a finished assignment.

use super::bridge::SheetTopology;
use super::hbond::MAX_HBOND_ENERGY;
use super::state::{ResidueState, SecondaryStructure};
use serde::Serialize;
use std::collections::BTreeSet;

/// Histogram length; longer runs are counted in the last bucket.
pub const HISTOGRAM_SIZE: usize = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DsspStatistics {
    pub residue_count: usize,
    pub chain_count: usize,
    pub ss_bridge_count: usize,
    pub intra_chain_ss_bridge_count: usize,
    pub accessible_surface: f64,
    pub hbond_count: usize,
    pub hbonds_in_parallel_bridges: usize,
    pub hbonds_in_antiparallel_bridges: usize,
    /// Bonds donor -> acceptor bucketed by acceptor.nr - donor.nr in [-5, +5].
    pub hbonds_per_distance: [usize; 11],
    pub residues_per_alpha_helix: [usize; HISTOGRAM_SIZE],
    pub parallel_bridges_per_ladder: [usize; HISTOGRAM_SIZE],
    pub antiparallel_bridges_per_ladder: [usize; HISTOGRAM_SIZE],
    pub ladders_per_sheet: [usize; HISTOGRAM_SIZE],
}

fn bump(histogram: &mut [usize; HISTOGRAM_SIZE], value: usize) {
    if value > 0 {
        histogram[value.min(HISTOGRAM_SIZE) - 1] += 1;
    }
}

pub(crate) fn gather_statistics(
    states: &[ResidueState],
    topology: &SheetTopology,
    ss_bridges: (usize, usize),
) -> DsspStatistics {
    let mut stats = DsspStatistics {
        residue_count: states.len(),
        chain_count: states
            .iter()
            .map(|state| state.label_asym.as_str())
            .collect::<BTreeSet<_>>()
            .len(),
        ss_bridge_count: ss_bridges.0,
        intra_chain_ss_bridge_count: ss_bridges.1,
        accessible_surface: states.iter().map(|state| state.accessibility).sum(),
        hbonds_in_parallel_bridges: topology.hbonds_in_parallel_bridges,
        hbonds_in_antiparallel_bridges: topology.hbonds_in_antiparallel_bridges,
        ..Default::default()
    };

    for state in states {
        for slot in &state.acceptor_slots {
            let Some(acceptor) = slot.partner else {
                continue;
            };
            if slot.energy < MAX_HBOND_ENERGY {
                stats.hbond_count += 1;
                let distance = states[acceptor].nr as i64 - state.nr as i64;
                if (-5..=5).contains(&distance) {
                    stats.hbonds_per_distance[(distance + 5) as usize] += 1;
                }
            }
        }
    }

    let mut run = 0usize;
    for state in states {
        if state.ss == SecondaryStructure::Alphahelix {
            run += 1;
        } else if run > 0 {
            bump(&mut stats.residues_per_alpha_helix, run);
            run = 0;
        }
    }
    bump(&mut stats.residues_per_alpha_helix, run);

    for &size in &topology.parallel_ladder_sizes {
        bump(&mut stats.parallel_bridges_per_ladder, size);
    }
    for &size in &topology.antiparallel_ladder_sizes {
        bump(&mut stats.antiparallel_bridges_per_ladder, size);
    }
    for &count in &topology.ladders_per_sheet {
        bump(&mut stats.ladders_per_sheet, count);
    }

    stats
}
