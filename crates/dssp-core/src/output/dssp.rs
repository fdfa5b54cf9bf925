//! Classic DSSP text output.
//!
//! Reproduces the original fixed-column format byte for byte: 127-column
//! '.'-terminated header lines, the hydrogen-bond summary, four histograms
//! and one 136-column line per residue, with `!` break rows where the
//! numbering jumps.

use super::OutputError;
use crate::core::models::structure::StructureMetadata;
use crate::engine::{ChainBreak, Dssp, HelixFlag, HelixKind, ResidueInfo};
use chrono::Local;
use std::io::Write;

const HEADER_WIDTH: usize = 127;

const FIRST_LINE: &str = "==== Secondary Structure Definition by the program DSSP, NKI version 3.0                           ==== ";
const REFERENCE_LINE: &str = "REFERENCE W. KABSCH AND C.SANDER, BIOPOLYMERS 22 (1983) 2577-2637";
const HISTOGRAM_HEADER: &str = "  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30     *** HISTOGRAMS OF ***           .";
const RESIDUE_TABLE_HEADER: &str = "  #  RESIDUE AA STRUCTURE BP1 BP2  ACC     N-H-->O    O-->H-N    N-H-->O    O-->H-N    TCO  KAPPA ALPHA  PHI   PSI    X-CA   Y-CA   Z-CA";

fn banner(content: &str) -> String {
    format!("{:<width$}.", content, width = HEADER_WIDTH)
}

fn truncated(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn per_100(count: usize, residues: usize) -> f64 {
    if residues == 0 {
        0.0
    } else {
        count as f64 * 100.0 / residues as f64
    }
}

/// Classic output numbering skips one index at every break so the reader
/// can spot gaps; derived here from the engine's contiguous indices.
fn display_numbers(dssp: &Dssp) -> Vec<usize> {
    let mut numbers = Vec::with_capacity(dssp.len());
    let mut current = 0usize;
    for info in dssp.residues() {
        if info.nr() > 1 && info.chain_break() != ChainBreak::None {
            current += 1;
        }
        current += 1;
        numbers.push(current);
    }
    numbers
}

fn helix_char(kind: HelixKind, flag: HelixFlag) -> char {
    match flag {
        HelixFlag::None => ' ',
        HelixFlag::Start => '>',
        HelixFlag::End => '<',
        HelixFlag::StartAndEnd => 'X',
        HelixFlag::Middle => match kind {
            HelixKind::PolyProlineII => 'P',
            HelixKind::ThreeTen => '3',
            HelixKind::Alpha => '4',
            HelixKind::Pi => '5',
        },
    }
}

fn residue_line(info: &ResidueInfo<'_>, display: &[usize]) -> String {
    let mut code = info.code();
    if code == 'C' {
        if let Some(bridge) = info.ss_bridge_nr() {
            code = (b'a' + ((bridge - 1) % 26) as u8) as char;
        }
    }

    let ins = info.ins_code().unwrap_or(" ");
    let chain = info.auth_asym_id();

    let mut bp = [0usize; 2];
    let mut bridge_label = [' '; 2];
    for slot in 0..2 {
        if let Some((partner_nr, ladder, parallel)) = info.bridge_partner(slot) {
            bp[slot] = display[partner_nr - 1] % 10000;
            let base = if parallel { b'a' } else { b'A' };
            bridge_label[slot] = (base + (ladder % 26) as u8) as char;
        }
    }

    let sheet = match info.sheet() {
        Some(sheet) => (b'A' + ((sheet - 1) % 26) as u8) as char,
        None => ' ',
    };

    let own_display = display[info.nr() - 1] as i64;
    let hbond_field = |partner: Option<usize>, energy: f64| -> String {
        match partner {
            Some(nr) => format!("{},{:3.1}", display[nr - 1] as i64 - own_display, energy),
            None => "0, 0.0".to_string(),
        }
    };
    let (a0, a0e) = info.acceptor(0);
    let (d0, d0e) = info.donor(0);
    let (a1, a1e) = info.acceptor(1);
    let (d1, d1e) = info.donor(1);

    let ca = info.ca_position().unwrap_or_else(nalgebra::Point3::origin);

    format!(
        "{:5}{:5}{:1.1}{:1.1} {}  {}{}{}{}{}{}{}{}{}{:4}{:4}{}{:4} {:>11}{:>11}{:>11}{:>11}  {:6.3}{:6.1}{:6.1}{:6.1}{:6.1} {:6.1} {:6.1} {:6.1}",
        display[info.nr() - 1],
        info.auth_seq_id(),
        ins,
        chain,
        code,
        info.ss().code(),
        helix_char(HelixKind::PolyProlineII, info.helix_flag(HelixKind::PolyProlineII)),
        helix_char(HelixKind::ThreeTen, info.helix_flag(HelixKind::ThreeTen)),
        helix_char(HelixKind::Alpha, info.helix_flag(HelixKind::Alpha)),
        helix_char(HelixKind::Pi, info.helix_flag(HelixKind::Pi)),
        if info.bend() { 'S' } else { ' ' },
        info.chirality(),
        bridge_label[0],
        bridge_label[1],
        bp[0],
        bp[1],
        sheet,
        (info.accessibility() + 0.5).floor() as i64,
        hbond_field(a0, a0e),
        hbond_field(d0, d0e),
        hbond_field(a1, a1e),
        hbond_field(d1, d1e),
        info.tco(),
        info.kappa(),
        info.alpha(),
        info.phi(),
        info.psi(),
        ca.x,
        ca.y,
        ca.z,
    )
}

fn break_line(number: usize, new_chain: bool) -> String {
    format!(
        "{:5}        !{}             0   0    0      0, 0.0     0, 0.0     0, 0.0     0, 0.0   0.000 360.0 360.0 360.0 360.0    0.0    0.0    0.0",
        number,
        if new_chain { '*' } else { ' ' },
    )
}

/// Writes the complete classic DSSP report.
///
/// Fails with [`OutputError::WontFit`] when any chain label is wider than
/// the single column the format reserves for it.
pub fn write_dssp<W: Write>(
    dssp: &Dssp,
    metadata: &StructureMetadata,
    out: &mut W,
) -> Result<(), OutputError> {
    if dssp
        .residues()
        .any(|info| info.auth_asym_id().len() > 1 || info.label_asym_id().len() > 1)
    {
        return Err(OutputError::WontFit);
    }

    let stats = dssp.statistics();
    let residues = stats.residue_count;
    let today = Local::now().format("%Y-%m-%d");

    writeln!(out, "{}", banner(&format!("{FIRST_LINE}DATE={today}")))?;
    writeln!(out, "{}", banner(REFERENCE_LINE))?;
    writeln!(
        out,
        "{}",
        banner(&format!(
            "HEADER    {:<40}{:<11}{:<4}",
            truncated(&metadata.classification, 40),
            truncated(&metadata.deposition_date, 11),
            truncated(&metadata.id_code, 4),
        ))
    )?;
    writeln!(out, "{}", banner(&format!("COMPND    {}", truncated(&metadata.compound, 117))))?;
    writeln!(out, "{}", banner(&format!("SOURCE    {}", truncated(&metadata.source, 117))))?;
    writeln!(out, "{}", banner(&format!("AUTHOR    {}", truncated(&metadata.authors, 117))))?;

    writeln!(
        out,
        "{}",
        banner(&format!(
            "{:5}{:3}{:3}{:3}{:3} TOTAL NUMBER OF RESIDUES, NUMBER OF CHAINS, NUMBER OF SS-BRIDGES(TOTAL,INTRACHAIN,INTERCHAIN)",
            residues,
            stats.chain_count,
            stats.ss_bridge_count,
            stats.intra_chain_ss_bridge_count,
            stats.ss_bridge_count - stats.intra_chain_ss_bridge_count,
        ))
    )?;
    writeln!(
        out,
        "{}",
        banner(&format!(
            "{:8.1}   ACCESSIBLE SURFACE OF PROTEIN (ANGSTROM**2)",
            stats.accessible_surface
        ))
    )?;

    writeln!(
        out,
        "{}",
        banner(&format!(
            "{:5}{:5.1}   TOTAL NUMBER OF HYDROGEN BONDS OF TYPE O(I)-->H-N(J)  , SAME NUMBER PER 100 RESIDUES",
            stats.hbond_count,
            per_100(stats.hbond_count, residues),
        ))
    )?;
    writeln!(
        out,
        "{}",
        banner(&format!(
            "{:5}{:5.1}   TOTAL NUMBER OF HYDROGEN BONDS IN     PARALLEL BRIDGES, SAME NUMBER PER 100 RESIDUES",
            stats.hbonds_in_parallel_bridges,
            per_100(stats.hbonds_in_parallel_bridges, residues),
        ))
    )?;
    writeln!(
        out,
        "{}",
        banner(&format!(
            "{:5}{:5.1}   TOTAL NUMBER OF HYDROGEN BONDS IN ANTIPARALLEL BRIDGES, SAME NUMBER PER 100 RESIDUES",
            stats.hbonds_in_antiparallel_bridges,
            per_100(stats.hbonds_in_antiparallel_bridges, residues),
        ))
    )?;
    for bucket in 0..11 {
        let offset: i32 = bucket - 5;
        writeln!(
            out,
            "{}",
            banner(&format!(
                "{:5}{:5.1}   TOTAL NUMBER OF HYDROGEN BONDS OF TYPE O(I)-->H-N(I{}{}), SAME NUMBER PER 100 RESIDUES",
                stats.hbonds_per_distance[bucket as usize],
                per_100(stats.hbonds_per_distance[bucket as usize], residues),
                if offset < 0 { '-' } else { '+' },
                offset.abs(),
            ))
        )?;
    }

    writeln!(out, "{HISTOGRAM_HEADER}")?;
    for (histogram, label) in [
        (
            &stats.residues_per_alpha_helix,
            "RESIDUES PER ALPHA HELIX         .",
        ),
        (
            &stats.parallel_bridges_per_ladder,
            "PARALLEL BRIDGES PER LADDER      .",
        ),
        (
            &stats.antiparallel_bridges_per_ladder,
            "ANTIPARALLEL BRIDGES PER LADDER  .",
        ),
        (&stats.ladders_per_sheet, "LADDERS PER SHEET                ."),
    ] {
        for value in histogram {
            write!(out, "{value:3}")?;
        }
        writeln!(out, "    {label}")?;
    }

    writeln!(out, "{RESIDUE_TABLE_HEADER}")?;
    let display = display_numbers(dssp);
    let mut last = 0usize;
    for info in dssp.residues() {
        let number = display[info.nr() - 1];
        if number != last + 1 {
            writeln!(
                out,
                "{}",
                break_line(last + 1, info.chain_break() == ChainBreak::NewChain)
            )?;
        }
        writeln!(out, "{}", residue_line(&info, &display))?;
        last = number;
    }

    Ok(())
}
