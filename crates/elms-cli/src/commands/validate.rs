use anyhow::bail;
use elms_validate::{ValidationResult, Validator, format_errors};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::context::{AppContext, read_record};
use crate::output::{Outline, output};

#[derive(Debug, Serialize)]
struct ValidateResponse {
    #[serde(flatten)]
    result: ValidationResult,
    /// JSON-Schema conformance failures, present with `--strict`.
    #[serde(skip_serializing_if = "Option::is_none")]
    conformance: Option<Vec<String>>,
}

impl ValidateResponse {
    fn passed(&self) -> bool {
        self.result.is_valid && self.conformance.as_ref().is_none_or(Vec::is_empty)
    }

    fn problem_count(&self) -> usize {
        self.result.errors.len() + self.conformance.as_ref().map_or(0, Vec::len)
    }
}

impl Outline for ValidateResponse {
    fn outline(&self) -> String {
        if self.passed() {
            return String::from("valid");
        }
        let mut lines = Vec::new();
        if !self.result.errors.is_empty() {
            lines.push(format_errors(&self.result.errors));
        }
        for problem in self.conformance.iter().flatten() {
            lines.push(format!("schema: {problem}"));
        }
        lines.join("\n")
    }
}

/// Handle `elms validate`. Exits non-zero when the record fails.
pub fn handle(args: &ValidateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record = read_record(Some(&args.data))?;
    let result = Validator::new(&ctx.schema).validate(&record);
    let conformance = if args.strict {
        Some(ctx.schema.conformance(&record)?)
    } else {
        None
    };

    let response = ValidateResponse {
        result,
        conformance,
    };
    output(&response, flags.format)?;

    if !response.passed() {
        bail!("record is invalid ({} problem(s))", response.problem_count());
    }
    Ok(())
}
