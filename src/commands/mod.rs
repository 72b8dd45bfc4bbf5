use crate::cli::Command;
use crate::context;

pub mod import;

impl Command {
    pub fn run(&self, ctx: &context::Context) -> anyhow::Result<()> {
        match self {
            Command::Import { file } => import::run(ctx, file),
        }
    }
}
