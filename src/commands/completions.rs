//! # Completions Command Implementation
//!
//! Generates shell completion scripts using `clap_complete`, enabling
//! tab-completion for all `vcsync` commands and options.
//!
//! ```bash
//! # Generate and install bash completions
//! vcsync completions bash > ~/.local/share/bash-completion/completions/vcsync
//!
//! # Generate zsh completions
//! vcsync completions zsh > ~/.zfunc/_vcsync
//! ```

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command, writing the script to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "vcsync", &mut io::stdout());
    Ok(())
}
