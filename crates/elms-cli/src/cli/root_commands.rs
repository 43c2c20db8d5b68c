use std::path::PathBuf;

use clap::{Args, Subcommand};
use elms_core::FieldPath;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Render form sections for a record.
    Render(RenderArgs),
    /// Apply field edits to a record and print the result.
    Edit(EditArgs),
    /// Validate a record against the ELMS rules.
    Validate(ValidateArgs),
    /// Print the schema, one section of it, or the report schema.
    Schema(SchemaArgs),
}

/// Arguments for `elms render`.
#[derive(Clone, Debug, Args)]
pub struct RenderArgs {
    /// Section keys to render (defaults to `form.sections` from config)
    pub sections: Vec<String>,

    /// JSON record to render (defaults to an empty record)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Render the whole record in one scope instead of per section
    #[arg(long)]
    pub record: bool,
}

/// Arguments for `elms edit`.
#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    /// JSON record to start from
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Field assignment, e.g. `versionInformation.originalPublicationYear=1995`
    #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<Assignment>,

    /// Append an empty element to the list at PATH
    #[arg(long, value_name = "PATH")]
    pub append: Vec<FieldPath>,

    /// Write the result back to the data file
    #[arg(long, requires = "data")]
    pub write: bool,
}

/// Arguments for `elms validate`.
#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// JSON record to validate
    #[arg(short, long)]
    pub data: PathBuf,

    /// Also check structural conformance to the JSON Schema
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `elms schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Section key to print (defaults to the whole document)
    pub section: Option<String>,

    /// Print the JSON Schema of the validation report instead
    #[arg(long, conflicts_with = "section")]
    pub report: bool,
}

/// One `--set PATH=VALUE` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub path: FieldPath,
    pub value: String,
}

fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=VALUE, got '{raw}'"))?;
    let path = path.trim().parse::<FieldPath>().map_err(|e| e.to_string())?;
    Ok(Assignment {
        path,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::{Assignment, Commands, parse_assignment};
    use crate::cli::Cli;

    #[test]
    fn assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("versionInformation.eldLink=https://x.example/?a=b"),
            Ok(Assignment {
                path: "versionInformation.eldLink".parse().unwrap(),
                value: "https://x.example/?a=b".into(),
            })
        );
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("a..b=1").is_err());
    }

    #[test]
    fn edit_collects_repeated_sets() {
        let cli = Cli::try_parse_from([
            "elms",
            "edit",
            "--data",
            "record.json",
            "--set",
            "workInformation.workTitle=Victory Garden",
            "--set",
            "accessibilityInformation.hasAltText=yes",
            "--append",
            "accessibilityInformation.contentWarnings",
        ])
        .expect("cli should parse");

        let Commands::Edit(args) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(args.assignments.len(), 2);
        assert_eq!(args.assignments[0].value, "Victory Garden");
        assert_eq!(args.append.len(), 1);
    }

    #[test]
    fn write_requires_data() {
        assert!(Cli::try_parse_from(["elms", "edit", "--write"]).is_err());
    }

    #[test]
    fn render_takes_section_list() {
        let cli = Cli::try_parse_from(["elms", "render", "workInformation", "copyInformation"])
            .expect("cli should parse");
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.sections, ["workInformation", "copyInformation"]);
        assert!(args.data.is_none());
    }

    #[test]
    fn validate_requires_data() {
        assert!(Cli::try_parse_from(["elms", "validate"]).is_err());
        let cli = Cli::try_parse_from(["elms", "validate", "-d", "r.json", "--strict"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Validate(args) if args.strict));
    }

    #[test]
    fn report_conflicts_with_section() {
        assert!(Cli::try_parse_from(["elms", "schema", "workInformation", "--report"]).is_err());
    }
}
