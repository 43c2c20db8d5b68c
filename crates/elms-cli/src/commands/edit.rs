use anyhow::{Context, bail};
use elms_core::FieldPath;
use elms_form::{Edit, Form};
use elms_schema::{FieldKind, SchemaDocument};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EditArgs;
use crate::context::{AppContext, read_record, write_record};
use crate::output::output;

/// Handle `elms edit`.
///
/// Opens the configured sections plus every section an edit touches, runs
/// the first render (which assigns `workId`), applies edits in order, and
/// prints the combined record.
pub fn handle(args: &EditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record = read_record(args.data.as_ref())?;
    let touched = args
        .assignments
        .iter()
        .map(|assignment| &assignment.path)
        .chain(&args.append);
    let sections = sections_for(&ctx.schema, ctx.sections(&[]), touched)?;

    let mut form = Form::open(&ctx.schema, &sections, record)?;
    form.render()?;

    for path in &args.append {
        let (section, inner) = split_section(path)?;
        form.apply(section, &Edit::AppendItem { path: inner })
            .with_context(|| format!("cannot append to {path}"))?;
    }
    for assignment in &args.assignments {
        form.apply_input(&assignment.path, &assignment.value)
            .with_context(|| format!("cannot set {}", assignment.path))?;
    }

    if args.write {
        if let Some(path) = &args.data {
            write_record(path, form.data())?;
            tracing::info!(path = %path.display(), "record written");
        }
    }
    output(form.data(), flags.format)
}

/// Configured sections followed by any other section the paths address.
fn sections_for<'p>(
    schema: &SchemaDocument,
    configured: &[String],
    paths: impl Iterator<Item = &'p FieldPath>,
) -> anyhow::Result<Vec<String>> {
    let mut sections = configured.to_vec();
    for path in paths {
        let key = path.head();
        if sections.iter().any(|section| section == key) {
            continue;
        }
        if !matches!(schema.section(key)?.kind(), FieldKind::Object(Some(_))) {
            bail!("'{key}' is not an object section and cannot be edited field by field");
        }
        sections.push(key.to_string());
    }
    Ok(sections)
}

fn split_section(path: &FieldPath) -> anyhow::Result<(&str, FieldPath)> {
    let section = FieldPath::key(path.head());
    let inner = path
        .strip_prefix(&section)
        .with_context(|| format!("'{path}' names a whole section, not a field"))?;
    Ok((path.head(), inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path(raw: &str) -> FieldPath {
        raw.parse().unwrap()
    }

    #[test]
    fn touched_sections_are_appended_once() {
        let schema = SchemaDocument::bundled().unwrap();
        let configured = vec!["workInformation".to_string()];
        let paths = [
            path("versionInformation.versionTitle"),
            path("workInformation.workTitle"),
            path("versionInformation.eldLink"),
        ];

        let sections = sections_for(&schema, &configured, paths.iter()).unwrap();
        assert_eq!(sections, ["workInformation", "versionInformation"]);
    }

    #[test]
    fn array_sections_are_refused() {
        let schema = SchemaDocument::bundled().unwrap();
        let paths = [path("copyInformation.0.copyId")];
        let err = sections_for(&schema, &[], paths.iter()).unwrap_err();
        assert!(err.to_string().contains("not an object section"));
    }

    #[test]
    fn split_needs_a_field() {
        let warnings = path("accessibilityInformation.contentWarnings");
        let (section, inner) = split_section(&warnings).unwrap();
        assert_eq!(section, "accessibilityInformation");
        assert_eq!(inner, path("contentWarnings"));
        assert!(split_section(&path("accessibilityInformation")).is_err());
    }
}
