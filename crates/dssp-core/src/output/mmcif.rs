//! Annotated mmCIF output: `struct_conf`, `struct_conf_type` and a
//! `software` record derived from the assignment.

use super::OutputError;
use crate::core::models::structure::StructureMetadata;
use crate::engine::{Dssp, ResidueInfo, SecondaryStructure};
use itertools::Itertools;
use std::collections::HashMap;
use std::io::Write;
use tracing::debug;

/// PDBx conformation type for a summary label; loops produce no row.
fn conf_type_id(ss: SecondaryStructure) -> Option<&'static str> {
    match ss {
        SecondaryStructure::Helix3 => Some("HELX_RH_3T_P"),
        SecondaryStructure::Alphahelix => Some("HELX_RH_AL_P"),
        SecondaryStructure::Helix5 => Some("HELX_RH_PI_P"),
        SecondaryStructure::HelixPpii => Some("HELX_LH_PP_P"),
        SecondaryStructure::Turn => Some("TURN_TY1_P"),
        SecondaryStructure::Bend => Some("TURN_P"),
        SecondaryStructure::Betabridge | SecondaryStructure::Strand => Some("STRN"),
        SecondaryStructure::Loop => None,
    }
}

fn value(text: &str) -> String {
    if text.is_empty() {
        "?".to_string()
    } else if text.contains(char::is_whitespace) {
        format!("'{text}'")
    } else {
        text.to_string()
    }
}

struct ConfRun {
    type_id: &'static str,
    id: String,
    begin: RunEnd,
    end: RunEnd,
}

struct RunEnd {
    compound: String,
    label_asym: String,
    label_seq: usize,
    ins_code: String,
    auth_asym: String,
    auth_seq: isize,
}

impl RunEnd {
    fn from(info: &ResidueInfo<'_>) -> Self {
        Self {
            compound: info.compound_id().to_string(),
            label_asym: info.label_asym_id().to_string(),
            label_seq: info.label_seq_id(),
            ins_code: info.ins_code().unwrap_or("").to_string(),
            auth_asym: info.auth_asym_id().to_string(),
            auth_seq: info.auth_seq_id(),
        }
    }
}

/// Writes a self-contained datablock replacing the `struct_conf` and
/// `struct_conf_type` categories and recording the software that produced
/// them.
pub fn annotate_mmcif<W: Write>(
    dssp: &Dssp,
    metadata: &StructureMetadata,
    version: &str,
    version_date: &str,
    out: &mut W,
) -> Result<(), OutputError> {
    if dssp.empty() {
        debug!("no secondary structure information found");
    }

    // One row per maximal same-label run within one chain.
    let mut type_order: Vec<&'static str> = Vec::new();
    let mut counters: HashMap<&'static str, usize> = HashMap::new();
    let mut runs: Vec<ConfRun> = Vec::new();

    for ((ss, _chain), group) in &dssp
        .residues()
        .chunk_by(|info| (info.ss(), info.label_asym_id().to_string()))
    {
        let members: Vec<ResidueInfo<'_>> = group.collect();
        let Some(type_id) = conf_type_id(ss) else {
            continue;
        };
        if !type_order.contains(&type_id) {
            type_order.push(type_id);
        }
        let counter = counters.entry(type_id).or_insert(0);
        *counter += 1;
        runs.push(ConfRun {
            type_id,
            id: format!("{type_id}{counter}"),
            begin: RunEnd::from(members.first().unwrap()),
            end: RunEnd::from(members.last().unwrap()),
        });
    }

    let block_name = if metadata.id_code.is_empty() {
        "dssp".to_string()
    } else {
        metadata.id_code.clone()
    };
    writeln!(out, "data_{block_name}")?;
    writeln!(out, "#")?;
    writeln!(out, "_software.pdbx_ordinal   1")?;
    writeln!(out, "_software.name           dssp")?;
    writeln!(out, "_software.version        {}", value(version))?;
    writeln!(out, "_software.date           {}", value(version_date))?;
    writeln!(out, "_software.classification other")?;
    writeln!(out, "#")?;

    if !runs.is_empty() {
        writeln!(out, "loop_")?;
        writeln!(out, "_struct_conf_type.id")?;
        writeln!(out, "_struct_conf_type.criteria")?;
        for type_id in &type_order {
            writeln!(out, "{type_id} DSSP")?;
        }
        writeln!(out, "#")?;

        writeln!(out, "loop_")?;
        for column in [
            "conf_type_id",
            "id",
            "beg_label_comp_id",
            "beg_label_asym_id",
            "beg_label_seq_id",
            "pdbx_beg_PDB_ins_code",
            "end_label_comp_id",
            "end_label_asym_id",
            "end_label_seq_id",
            "pdbx_end_PDB_ins_code",
            "beg_auth_comp_id",
            "beg_auth_asym_id",
            "beg_auth_seq_id",
            "end_auth_comp_id",
            "end_auth_asym_id",
            "end_auth_seq_id",
            "criteria",
        ] {
            writeln!(out, "_struct_conf.{column}")?;
        }
        for run in &runs {
            writeln!(
                out,
                "{} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} DSSP",
                run.type_id,
                run.id,
                value(&run.begin.compound),
                value(&run.begin.label_asym),
                run.begin.label_seq,
                value(&run.begin.ins_code),
                value(&run.end.compound),
                value(&run.end.label_asym),
                run.end.label_seq,
                value(&run.end.ins_code),
                value(&run.begin.compound),
                value(&run.begin.auth_asym),
                run.begin.auth_seq,
                value(&run.end.compound),
                value(&run.end.auth_asym),
                run.end.auth_seq,
            )?;
        }
        writeln!(out, "#")?;
    }

    Ok(())
}
