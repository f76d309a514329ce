use clap::Args;
use itertools::Itertools;
use miette::{miette, Context, IntoDiagnostic, Result};
use pac_archive::{artifact, EntryKind, EntrySource, PacWriter, PacWriterOptions};
use pac_bmz::Compression;
use std::{io::Write, path::PathBuf};
use tempfile::NamedTempFile;
use tracing::info;
use walkdir::WalkDir;

use crate::commands::read_input;

#[derive(Args)]
pub struct PackArgs {
    /// An input directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target PAC file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// zlib level used for bitmaps converted back to BMZ
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
    level: u32,

    /// Store every file as it is, reading back an extraction done with `--raw`
    #[arg(long, default_value_t = false)]
    raw: bool,
}

impl PackArgs {
    pub fn handle(&self) -> Result<()> {
        info!("creating {}", &self.file.display());

        let files = WalkDir::new(&self.directory)
            .sort_by_file_name()
            .into_iter()
            .filter_ok(|e| !e.file_type().is_dir())
            .collect::<Result<Vec<_>, _>>()
            .into_diagnostic()
            .context(format!("walking {}", self.directory.display()))?;

        if files.is_empty() {
            return Err(miette!("directory is empty"));
        }

        let mut pac = PacWriter::new(
            PacWriterOptions::builder()
                .bitmap_compression(Compression::new(self.level))
                .build(),
        );

        for file in files {
            let relative = file
                .path()
                .strip_prefix(&self.directory)
                .into_diagnostic()?;
            let artifact_name = relative
                .iter()
                .map(|part| match part.to_str() {
                    Some(part) if !part.contains('\\') => Ok(part),
                    Some(_) => Err(miette!("{} holds a backslash", relative.display())),
                    None => Err(miette!("unable to convert {} to a string", relative.display())),
                })
                .collect::<Result<Vec<_>>>()?
                .join("/");

            let (name, kind) = if self.raw {
                (artifact_name.as_str(), EntryKind::Raw)
            } else {
                artifact::entry_name(&artifact_name)
            };
            info!("packing {} as {name}", relative.display());

            let source = EntrySource::from_artifact(kind, read_input(file.path())?)
                .context(format!("converting {}", file.path().display()))?;
            pac.add(name, source)
                .context(format!("adding {}", file.path().display()))?;
        }

        let data = pac.serialize().context("finalizing pac file")?;

        let parent = match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut out = NamedTempFile::new_in(&parent)
            .into_diagnostic()
            .context(format!("creating a temporary file in {}", parent.display()))?;
        out.write_all(&data)
            .into_diagnostic()
            .context(format!("writing {}", out.path().display()))?;

        let persisted = if self.overwrite {
            out.persist(&self.file)
        } else {
            out.persist_noclobber(&self.file)
        };
        persisted
            .into_diagnostic()
            .context(format!("creating {}", &self.file.display()))?;

        Ok(())
    }
}
