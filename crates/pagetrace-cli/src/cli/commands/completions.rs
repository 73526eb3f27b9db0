//! `pagetrace completions <shell>` and `pagetrace manpage` – generated from the clap definition.

use anyhow::Result;
use clap::Command;
use clap_complete::Shell;
use std::io;

pub fn run_completions(cmd: &mut Command, shell: Shell) {
    clap_complete::generate(shell, cmd, "pagetrace", &mut io::stdout());
}

pub fn run_manpage(cmd: Command) -> Result<()> {
    clap_mangen::Man::new(cmd).render(&mut io::stdout())?;
    Ok(())
}
