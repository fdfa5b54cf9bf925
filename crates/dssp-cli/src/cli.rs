use clap::Parser;
use std::path::PathBuf;

const ABOUT: &str = "dssp - assigns secondary structure to the protein residues of a macromolecular model using the Kabsch-Sander algorithm, extended with polyproline-II detection.";
const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "dssp",
    version,
    about = ABOUT,
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Coordinates file (PDB or mmCIF).
    #[arg(value_name = "XYZIN")]
    pub xyzin: Option<PathBuf>,

    /// Output file; written to stdout when absent.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format, 'dssp' for classic DSSP or 'mmcif' for annotated
    /// mmCIF. The default is chosen from the output file extension, if any.
    #[arg(long, value_name = "FORMAT")]
    pub output_format: Option<String>,

    /// Create missing backbone atoms before the assignment.
    #[arg(long)]
    pub create_missing: bool,

    /// Minimal number of residues having PHI/PSI in range for a PP helix.
    #[arg(long, value_name = "INT", default_value_t = 3)]
    pub min_pp_stretch: usize,

    /// Dictionary file containing restraints for residues in this specific
    /// target; can be specified multiple times.
    #[arg(long, value_name = "PATH")]
    pub dict: Vec<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_parsing() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_arguments_are_optional() {
        let cli = Cli::parse_from(["dssp"]);
        assert!(cli.xyzin.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.min_pp_stretch, 3);
    }

    #[test]
    fn full_invocation_parses() {
        let cli = Cli::parse_from([
            "dssp",
            "input.cif",
            "output.dssp",
            "--output-format",
            "dssp",
            "--create-missing",
            "--min-pp-stretch",
            "5",
            "--dict",
            "lig.cif",
            "--dict",
            "other.cif",
            "-vv",
        ]);
        assert_eq!(cli.xyzin, Some(PathBuf::from("input.cif")));
        assert_eq!(cli.output, Some(PathBuf::from("output.dssp")));
        assert_eq!(cli.output_format.as_deref(), Some("dssp"));
        assert!(cli.create_missing);
        assert_eq!(cli.min_pp_stretch, 5);
        assert_eq!(cli.dict.len(), 2);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["dssp", "in.cif", "-v", "--quiet"]);
        assert!(result.is_err());
    }
}
