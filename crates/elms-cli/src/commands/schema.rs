use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `elms schema`.
pub fn handle(args: &SchemaArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.report {
        return output(&elms_validate::report_schema(), flags.format);
    }
    match &args.section {
        Some(key) => {
            let node = ctx.schema.section(key)?;
            output(&serde_json::to_value(node)?, flags.format)
        }
        None => output(ctx.schema.raw(), flags.format),
    }
}
