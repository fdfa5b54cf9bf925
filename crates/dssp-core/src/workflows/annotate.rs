//! The end-to-end assignment workflow: load, prepare, assign, render.

use crate::core::completion::create_missing_backbone_atoms;
use crate::core::io::{load_structure, LoadError};
use crate::core::models::structure::MolecularStructure;
use crate::core::sasa::{assign_accessibility, SasaParams};
use crate::engine::{Dssp, DsspConfig};
use crate::output::{annotate_mmcif, write_dssp, OutputError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to load structure: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to write output: {0}")]
    Output(#[from] OutputError),

    #[error("Could not open output file '{path}': {source}")]
    OpenOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Dssp,
    MmCif,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Output format should be one of 'dssp' or 'mmcif', got '{0}'")]
pub struct ParseOutputFormatError(String);

impl FromStr for OutputFormat {
    type Err = ParseOutputFormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dssp" => Ok(OutputFormat::Dssp),
            "mmcif" | "cif" => Ok(OutputFormat::MmCif),
            other => Err(ParseOutputFormatError(other.to_string())),
        }
    }
}

impl OutputFormat {
    /// Format implied by an output path extension; mmCIF when in doubt.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("dssp") => OutputFormat::Dssp,
            _ => OutputFormat::MmCif,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    pub format: OutputFormat,
    /// Run the backbone-completion pre-pass before assignment.
    pub create_missing: bool,
    pub config: DsspConfig,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Dssp,
            create_missing: false,
            config: DsspConfig::default(),
        }
    }
}

/// Version tag written into the output headers.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_DATE: &str = "2026-05-28";

/// Runs the engine over a prepared structure and renders the result.
///
/// The report is built in memory and only flushed to `out` once rendering
/// has fully succeeded, so a failing run never leaves partial output.
pub fn annotate_structure<W: Write>(
    structure: &mut MolecularStructure,
    options: &AnnotateOptions,
    out: &mut W,
) -> Result<(), WorkflowError> {
    if options.create_missing {
        let created = create_missing_backbone_atoms(structure);
        debug!(created, "backbone completion pre-pass finished");
    }
    let surface = assign_accessibility(structure, &SasaParams::default());
    debug!(surface, "accessibility assigned");

    let dssp = Dssp::new(structure, &options.config);
    info!(
        residues = dssp.len(),
        hbonds = dssp.statistics().hbond_count,
        "assignment finished"
    );

    let mut buffer = Vec::new();
    match options.format {
        OutputFormat::Dssp => write_dssp(&dssp, &structure.metadata, &mut buffer)?,
        OutputFormat::MmCif => annotate_mmcif(
            &dssp,
            &structure.metadata,
            VERSION,
            VERSION_DATE,
            &mut buffer,
        )?,
    }
    out.write_all(&buffer)?;
    Ok(())
}

/// Loads `xyzin`, runs the workflow and writes to `output` (stdout when
/// `None`).
pub fn annotate_file(
    xyzin: &Path,
    output: Option<&Path>,
    options: &AnnotateOptions,
) -> Result<(), WorkflowError> {
    let mut structure = load_structure(xyzin)?;

    match output {
        Some(path) => {
            let file = File::create(path).map_err(|source| WorkflowError::OpenOutput {
                path: path.display().to_string(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            annotate_structure(&mut structure, options, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            annotate_structure(&mut structure, options, &mut writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::peptide_structure;

    #[test]
    fn output_format_parses_and_rejects() {
        assert_eq!("dssp".parse::<OutputFormat>().unwrap(), OutputFormat::Dssp);
        assert_eq!("mmcif".parse::<OutputFormat>().unwrap(), OutputFormat::MmCif);
        assert_eq!("MMCIF".parse::<OutputFormat>().unwrap(), OutputFormat::MmCif);
        assert!("pdb".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn output_format_follows_the_file_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.dssp")),
            OutputFormat::Dssp
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out.cif")),
            OutputFormat::MmCif
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out")),
            OutputFormat::MmCif
        );
    }

    #[test]
    fn workflow_renders_classic_output_with_accessibility() {
        let mut structure = peptide_structure(14, -57.0, -47.0);
        let mut buffer = Vec::new();
        annotate_structure(&mut structure, &AnnotateOptions::default(), &mut buffer).unwrap();

        let report = String::from_utf8(buffer).unwrap();
        assert!(report.starts_with("==== Secondary Structure Definition"));
        // Shrake-Rupley ran: the total surface line is non-zero
        let surface_line = report
            .lines()
            .find(|l| l.contains("ACCESSIBLE SURFACE"))
            .unwrap();
        assert!(!surface_line.trim_start().starts_with("0.0"));
    }

    #[test]
    fn workflow_renders_mmcif_output() {
        let mut structure = peptide_structure(14, -57.0, -47.0);
        let options = AnnotateOptions {
            format: OutputFormat::MmCif,
            ..Default::default()
        };
        let mut buffer = Vec::new();
        annotate_structure(&mut structure, &options, &mut buffer).unwrap();

        let report = String::from_utf8(buffer).unwrap();
        assert!(report.starts_with("data_"));
        assert!(report.contains("_struct_conf.conf_type_id"));
    }

    #[test]
    fn failed_rendering_writes_nothing() {
        let mut structure = peptide_structure(3, -57.0, -47.0);
        let chain = structure.add_chain("LONG", "LONG");
        let residue = structure.add_residue(chain, "GLY", 1, None).unwrap();
        structure
            .add_atom_to_residue(
                residue,
                crate::core::models::atom::Atom::new("CA", residue, nalgebra::Point3::origin()),
            )
            .unwrap();

        let mut buffer = Vec::new();
        let result = annotate_structure(&mut structure, &AnnotateOptions::default(), &mut buffer);
        assert!(result.is_err());
        assert!(buffer.is_empty());
    }
}
