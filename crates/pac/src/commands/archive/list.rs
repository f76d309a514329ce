use clap::Args;
use miette::Result;
use owo_colors::{OwoColorize, Stream::Stdout};
use pac_archive::{EntryKind, PacArchive};
use std::path::PathBuf;

use crate::commands::read_input;

#[derive(Args)]
pub struct ListArgs {
    /// An input PAC file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let pac = PacArchive::open(read_input(&self.file)?)?;

        println!(
            "{:>5} {:>10} {:<9} {:>10} name",
            "index", "stored", "kind", "size"
        );
        for entry in pac.entries() {
            let kind = format!("{:<9}", entry.kind.as_str());
            let kind = match entry.kind {
                EntryKind::Raw => kind,
                EntryKind::Bitmap => kind
                    .if_supports_color(Stdout, |k| k.green())
                    .to_string(),
                EntryKind::Animation => kind
                    .if_supports_color(Stdout, |k| k.blue())
                    .to_string(),
            };
            println!(
                "{:>5} {:>10} {} {:>10} {}",
                entry.index, entry.stored_size, kind, entry.size, entry.name
            );
        }

        println!(
            "{} entries, {} bytes",
            pac.len(),
            pac.as_bytes().len()
        );

        Ok(())
    }
}
