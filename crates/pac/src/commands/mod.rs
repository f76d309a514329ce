use std::{fs::File, path::Path};

use miette::{Context, IntoDiagnostic, Result};

pub mod archive;
pub mod bmz;
pub mod ttp;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle PAC archives
    Archive {
        #[command(subcommand)]
        command: archive::ArchiveCommands,
    },
    /// Handle BMZ bitmaps
    Bmz {
        #[command(subcommand)]
        command: bmz::BmzCommands,
    },
    /// Handle TTP animations
    Ttp {
        #[command(subcommand)]
        command: ttp::TtpCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Archive { command } => command.handle(),
            Commands::Bmz { command } => command.handle(),
            Commands::Ttp { command } => command.handle(),
        }
    }
}

/// Open `path` for writing, refusing to replace an existing file unless `overwrite` is set
pub(crate) fn create_output(path: &Path, overwrite: bool) -> Result<File> {
    let file = if overwrite {
        File::create(path)
    } else {
        File::create_new(path)
    };
    file.into_diagnostic()
        .context(format!("creating {}", path.display()))
}

pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .into_diagnostic()
        .context(format!("reading {}", path.display()))
}
