use elms_form::Form;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RenderArgs;
use crate::context::{AppContext, read_record};
use crate::output::output;

/// Handle `elms render`.
pub fn handle(args: &RenderArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record = read_record(args.data.as_ref())?;
    let sections = ctx.sections(&args.sections);
    let mut form = Form::open(&ctx.schema, sections, record)?;

    if args.record {
        return output(&form.render_record(), flags.format);
    }
    let view = form.render()?;
    tracing::debug!(sections = view.sections.len(), "rendered form");
    output(&view, flags.format)
}
