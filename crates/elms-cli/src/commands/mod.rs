use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

pub mod edit;
pub mod render;
pub mod schema;
pub mod validate;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: &Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Render(args) => render::handle(args, ctx, flags),
        Commands::Edit(args) => edit::handle(args, ctx, flags),
        Commands::Validate(args) => validate::handle(args, ctx, flags),
        Commands::Schema(args) => schema::handle(args, ctx, flags),
    }
}
