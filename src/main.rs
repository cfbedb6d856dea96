//! The main entry point for the program.
use anyhow::Result;

fn main() -> Result<()> {
    human_panic::setup_panic!();

    skyglow::cli::run_cli()
}
