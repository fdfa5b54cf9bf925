//! β-bridge enumeration, ladder extension and sheet assembly.

use super::hbond::is_hbond;
use super::state::{BridgePartner, ChainBreak, ResidueState, SecondaryStructure};
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BridgeType {
    Parallel,
    Antiparallel,
}

/// A maximal run of co-linear bridges of one type.
///
/// `lo` ascends with the scan; `hi` ascends for parallel ladders and is kept
/// sorted ascending for antiparallel ones (new pairs are pushed at the
/// front). Pair k of a parallel ladder is (lo[k], hi[k]); of an antiparallel
/// ladder (lo[k], hi[len-1-k]).
#[derive(Debug)]
struct Ladder {
    typ: BridgeType,
    lo: Vec<usize>,
    hi: VecDeque<usize>,
    sheet: usize,
}

/// Aggregates the bridge pass feeds into the statistics.
#[derive(Debug, Default)]
pub(crate) struct SheetTopology {
    pub hbonds_in_parallel_bridges: usize,
    pub hbonds_in_antiparallel_bridges: usize,
    /// Bridge count per parallel ladder, in ladder order.
    pub parallel_ladder_sizes: Vec<usize>,
    /// Bridge count per antiparallel ladder, in ladder order.
    pub antiparallel_ladder_sizes: Vec<usize>,
    /// Ladder count per sheet, indexed by sheet id - 1.
    pub ladders_per_sheet: Vec<usize>,
}

/// True when no chain break occurs in `(from, to]`.
pub(crate) fn no_chain_break(states: &[ResidueState], from: usize, to: usize) -> bool {
    states[from + 1..=to]
        .iter()
        .all(|state| state.chain_break == ChainBreak::None)
}

/// Kabsch-Sander bridge test between interior residues `i < j`.
fn test_bridge(states: &[ResidueState], i: usize, j: usize) -> Option<BridgeType> {
    let (a, b, c) = (i - 1, i, i + 1);
    let (d, e, f) = (j - 1, j, j + 1);
    if !no_chain_break(states, a, c) || !no_chain_break(states, d, f) {
        return None;
    }

    let parallel = (is_hbond(states, c, e) && is_hbond(states, e, a))
        || (is_hbond(states, f, b) && is_hbond(states, b, d));
    if parallel {
        return Some(BridgeType::Parallel);
    }

    let antiparallel = (is_hbond(states, c, d) && is_hbond(states, f, a))
        || (is_hbond(states, e, b) && is_hbond(states, b, e));
    if antiparallel {
        return Some(BridgeType::Antiparallel);
    }
    None
}

/// Disjoint-set over ladder indices, used for sheet assembly.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

fn ranges_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 <= b.1 && a.1 >= b.0
}

/// Two ladders belong to one sheet when they share a residue.
fn linked(a: &Ladder, b: &Ladder) -> bool {
    let a_lo = (a.lo[0], *a.lo.last().unwrap());
    let a_hi = (*a.hi.front().unwrap(), *a.hi.back().unwrap());
    let b_lo = (b.lo[0], *b.lo.last().unwrap());
    let b_hi = (*b.hi.front().unwrap(), *b.hi.back().unwrap());
    ranges_overlap(a_lo, b_lo)
        || ranges_overlap(a_lo, b_hi)
        || ranges_overlap(a_hi, b_lo)
        || ranges_overlap(a_hi, b_hi)
}

/// Enumerates bridges, grows ladders, groups them into sheets and writes
/// bridge partners, sheet ids and the E/B labels onto the residues.
pub(crate) fn calculate_beta_sheets(states: &mut [ResidueState]) -> SheetTopology {
    let count = states.len();
    let mut ladders: Vec<Ladder> = Vec::new();

    if count > 4 {
        for i in 1..count - 4 {
            for j in (i + 3)..count - 1 {
                let Some(typ) = test_bridge(states, i, j) else {
                    continue;
                };

                let extended = ladders.iter_mut().any(|ladder| {
                    if ladder.typ != typ || *ladder.lo.last().unwrap() + 1 != i {
                        return false;
                    }
                    match typ {
                        BridgeType::Parallel if *ladder.hi.back().unwrap() + 1 == j => {
                            ladder.lo.push(i);
                            ladder.hi.push_back(j);
                            true
                        }
                        BridgeType::Antiparallel if *ladder.hi.front().unwrap() == j + 1 => {
                            ladder.lo.push(i);
                            ladder.hi.push_front(j);
                            true
                        }
                        _ => false,
                    }
                });

                if !extended {
                    ladders.push(Ladder {
                        typ,
                        lo: vec![i],
                        hi: VecDeque::from([j]),
                        sheet: 0,
                    });
                }
            }
        }
    }

    // Sheets: connected components of residue-sharing ladders, ids dense
    // from 1 in first-appearance order.
    let mut sets = UnionFind::new(ladders.len());
    for a in 0..ladders.len() {
        for b in a + 1..ladders.len() {
            if linked(&ladders[a], &ladders[b]) {
                sets.union(a, b);
            }
        }
    }
    let mut topology = SheetTopology::default();
    let mut sheet_of_root: Vec<Option<usize>> = vec![None; ladders.len()];
    for index in 0..ladders.len() {
        let root = sets.find(index);
        let sheet = match sheet_of_root[root] {
            Some(sheet) => sheet,
            None => {
                topology.ladders_per_sheet.push(0);
                let sheet = topology.ladders_per_sheet.len();
                sheet_of_root[root] = Some(sheet);
                sheet
            }
        };
        ladders[index].sheet = sheet;
        topology.ladders_per_sheet[sheet - 1] += 1;
    }

    debug!(
        ladders = ladders.len(),
        sheets = topology.ladders_per_sheet.len(),
        "assembled beta topology"
    );

    for (ladder_index, ladder) in ladders.iter().enumerate() {
        let bridge_count = ladder.lo.len();
        let bonds = *ladder.lo.last().unwrap() - ladder.lo[0] + 2;
        match ladder.typ {
            BridgeType::Parallel => {
                topology.hbonds_in_parallel_bridges += bonds;
                topology.parallel_ladder_sizes.push(bridge_count);
            }
            BridgeType::Antiparallel => {
                topology.hbonds_in_antiparallel_bridges += bonds;
                topology.antiparallel_ladder_sizes.push(bridge_count);
            }
        }

        // The second partner slot is used as soon as any residue of the run
        // already has its first slot taken.
        let slot_lo = ladder
            .lo
            .iter()
            .any(|&r| states[r].partners[0].partner.is_some())
            as usize;
        let slot_hi = ladder
            .hi
            .iter()
            .any(|&r| states[r].partners[0].partner.is_some())
            as usize;

        let parallel = ladder.typ == BridgeType::Parallel;
        for (k, &low) in ladder.lo.iter().enumerate() {
            let high = match ladder.typ {
                BridgeType::Parallel => ladder.hi[k],
                BridgeType::Antiparallel => ladder.hi[ladder.hi.len() - 1 - k],
            };
            states[low].partners[slot_lo] = BridgePartner {
                partner: Some(high),
                ladder: ladder_index,
                parallel,
            };
            states[high].partners[slot_hi] = BridgePartner {
                partner: Some(low),
                ladder: ladder_index,
                parallel,
            };
        }

        let label = if bridge_count > 1 {
            SecondaryStructure::Strand
        } else {
            SecondaryStructure::Betabridge
        };
        let lo_range = ladder.lo[0]..=*ladder.lo.last().unwrap();
        let hi_range = *ladder.hi.front().unwrap()..=*ladder.hi.back().unwrap();
        for index in lo_range.chain(hi_range) {
            if states[index].ss != SecondaryStructure::Strand {
                states[index].ss = label;
            }
            states[index].sheet = ladder.sheet;
        }
    }

    topology
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ResidueId;
    use crate::engine::hbond::record;

    const BOND: f64 = -2.0;

    fn chain_states(count: usize) -> Vec<ResidueState> {
        (0..count)
            .map(|index| {
                let mut state = ResidueState::new(ResidueId::default(), index + 1);
                state.label_asym = "A".to_string();
                state.chain_break = if index == 0 {
                    ChainBreak::NewChain
                } else {
                    ChainBreak::None
                };
                state
            })
            .collect()
    }

    /// Antiparallel register between strands `i_range` and the reversed
    /// `j_range`: mutual i<->j bonds on alternating pairs.
    fn bond_antiparallel(states: &mut [ResidueState], pairs: &[(usize, usize)]) {
        for &(i, j) in pairs {
            record(states, i, j, BOND);
            record(states, j, i, BOND);
        }
    }

    #[test]
    fn mutual_bonds_form_an_antiparallel_bridge() {
        let mut states = chain_states(12);
        bond_antiparallel(&mut states, &[(2, 9)]);

        assert_eq!(
            test_bridge(&states, 2, 9),
            Some(BridgeType::Antiparallel)
        );
    }

    #[test]
    fn offset_bonds_form_a_parallel_bridge() {
        let mut states = chain_states(30);
        // Hbond(i-1 -> j) and Hbond(j -> i+1) with i=5, j=20:
        // donor j accepts... donor is the N-H side: (j -> i-1) and (i+1 -> j).
        record(&mut states, 20, 4, BOND);
        record(&mut states, 6, 20, BOND);

        assert_eq!(test_bridge(&states, 5, 20), Some(BridgeType::Parallel));
    }

    #[test]
    fn close_residues_never_bridge() {
        let mut states = chain_states(8);
        bond_antiparallel(&mut states, &[(3, 5)]);
        // |i - j| < 3 pairs are skipped by the scan itself; the test
        // function still reports the pattern, so run the full pass.
        let _ = calculate_beta_sheets(&mut states);
        assert_eq!(states[3].ss, SecondaryStructure::Loop);
        assert_eq!(states[5].ss, SecondaryStructure::Loop);
    }

    #[test]
    fn isolated_bridge_is_labelled_b() {
        let mut states = chain_states(12);
        bond_antiparallel(&mut states, &[(3, 8)]);

        let topology = calculate_beta_sheets(&mut states);
        assert_eq!(states[3].ss, SecondaryStructure::Betabridge);
        assert_eq!(states[8].ss, SecondaryStructure::Betabridge);
        assert_eq!(states[3].partners[0].partner, Some(8));
        assert_eq!(states[8].partners[0].partner, Some(3));
        assert_eq!(topology.antiparallel_ladder_sizes, vec![1]);
        assert_eq!(topology.ladders_per_sheet, vec![1]);
        assert_eq!(states[3].sheet, 1);
    }

    /// Two antiparallel five-residue strands linked by a tight turn:
    /// residues 1..=5 pair with 12..=8.
    fn antiparallel_hairpin() -> Vec<ResidueState> {
        let mut states = chain_states(14);
        bond_antiparallel(
            &mut states,
            &[(1, 12), (2, 11), (3, 10), (4, 9), (5, 8)],
        );
        states
    }

    #[test]
    fn hairpin_forms_one_ladder_and_one_sheet() {
        let mut states = antiparallel_hairpin();
        let topology = calculate_beta_sheets(&mut states);

        assert_eq!(topology.antiparallel_ladder_sizes, vec![5]);
        assert_eq!(topology.parallel_ladder_sizes, Vec::<usize>::new());
        assert_eq!(topology.ladders_per_sheet, vec![1]);
        assert_eq!(topology.hbonds_in_antiparallel_bridges, 6);

        for index in 1..=5 {
            assert_eq!(states[index].ss, SecondaryStructure::Strand);
            assert_eq!(states[index].sheet, 1);
        }
        for index in 8..=12 {
            assert_eq!(states[index].ss, SecondaryStructure::Strand);
        }
        // the turn stays unlabelled by the bridge pass
        assert_eq!(states[6].ss, SecondaryStructure::Loop);
        assert_eq!(states[7].ss, SecondaryStructure::Loop);
    }

    #[test]
    fn hairpin_partners_are_symmetric() {
        let mut states = antiparallel_hairpin();
        calculate_beta_sheets(&mut states);

        for (low, high) in [(1, 12), (2, 11), (3, 10), (4, 9), (5, 8)] {
            assert_eq!(states[low].partners[0].partner, Some(high));
            assert_eq!(states[high].partners[0].partner, Some(low));
            assert!(!states[low].partners[0].parallel);
        }
    }

    #[test]
    fn parallel_strands_build_one_ladder() {
        // Strands 1..=4 and 25..=28 in parallel register: for each bridge
        // (i, j): donor j -> acceptor i-1 and donor i+1 -> acceptor j.
        let mut states = chain_states(32);
        for (i, j) in [(1, 25), (2, 26), (3, 27)] {
            record(&mut states, j, i - 1, BOND);
            record(&mut states, i + 1, j, BOND);
        }

        let topology = calculate_beta_sheets(&mut states);
        assert_eq!(topology.parallel_ladder_sizes, vec![3]);
        assert_eq!(topology.ladders_per_sheet, vec![1]);

        for index in 1..=3 {
            assert_eq!(states[index].ss, SecondaryStructure::Strand);
            assert!(states[index].partners[0].parallel);
            assert_eq!(states[index].partners[0].partner, Some(index + 24));
        }
    }

    #[test]
    fn shared_strand_merges_ladders_into_one_sheet() {
        // Strand B (14..=18) pairs antiparallel with strand A (1..=5) and
        // with strand C (27..=31): three strands, two ladders, one sheet.
        let mut states = chain_states(34);
        bond_antiparallel(
            &mut states,
            &[(1, 18), (2, 17), (3, 16), (4, 15), (5, 14)],
        );
        bond_antiparallel(
            &mut states,
            &[(14, 31), (15, 30), (16, 29), (17, 28), (18, 27)],
        );

        let topology = calculate_beta_sheets(&mut states);
        assert_eq!(topology.antiparallel_ladder_sizes.len(), 2);
        assert_eq!(topology.ladders_per_sheet, vec![2]);

        // the shared strand carries both partners
        assert_eq!(states[16].partners[0].partner, Some(3));
        assert_eq!(states[16].partners[1].partner, Some(29));
        assert_eq!(states[16].sheet, 1);
    }

    #[test]
    fn distant_ladders_form_separate_sheets() {
        let mut states = chain_states(60);
        bond_antiparallel(&mut states, &[(1, 12), (2, 11), (3, 10)]);
        bond_antiparallel(&mut states, &[(40, 52), (41, 51), (42, 50)]);

        let topology = calculate_beta_sheets(&mut states);
        assert_eq!(topology.ladders_per_sheet, vec![1, 1]);
        assert_eq!(states[2].sheet, 1);
        assert_eq!(states[41].sheet, 2);
    }

    #[test]
    fn chain_break_inside_a_strand_blocks_the_bridge() {
        let mut states = chain_states(12);
        bond_antiparallel(&mut states, &[(3, 8)]);
        states[4].chain_break = ChainBreak::Gap;

        assert_eq!(test_bridge(&states, 3, 8), None);
    }
}
