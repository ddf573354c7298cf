use crate::cli::args::Cli;
use crate::error::Result;
use crate::project_identity;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

pub fn run(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout();
    write_completions(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, project_identity::BINARY_NAME, out);
}
