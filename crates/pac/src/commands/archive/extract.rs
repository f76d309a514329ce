use clap::Args;
use itertools::Itertools;
use miette::{miette, Context, IntoDiagnostic, Result};
use pac_archive::{ArchiveEntry, PacArchive};
use std::{io::Write, path::PathBuf};
use tracing::{error, info};

use crate::commands::{create_output, read_input};

#[derive(Args)]
pub struct ExtractArgs {
    /// An input PAC file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Write the stored bytes instead of converting bitmaps and animations
    #[arg(long, default_value_t = false)]
    raw: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let pac = PacArchive::open(read_input(&self.file)?)?;

        let failed = pac
            .entries()
            .filter_map(|entry| match self.extract_entry(&pac, entry) {
                Ok(()) => None,
                Err(e) => {
                    error!("skipping {}: {e:?}", entry.name);
                    Some(entry.name.as_ref())
                }
            })
            .collect::<Vec<_>>();

        if !failed.is_empty() {
            return Err(miette!(
                "{} of {} entries could not be extracted: {}",
                failed.len(),
                pac.len(),
                failed.iter().join(", ")
            ));
        }

        info!("extracted {} entries", pac.len());
        Ok(())
    }

    fn extract_entry(&self, pac: &PacArchive, entry: &ArchiveEntry) -> Result<()> {
        let relative = if self.raw {
            entry.enclosed_name()
        } else {
            entry.artifact_path()
        };
        let relative = relative.ok_or_else(|| {
            miette!("name {:?} is not a path inside the target directory", entry.name)
        })?;

        let data = if self.raw {
            pac.data_for(entry).to_vec()
        } else {
            pac.decode(entry)?.to_artifact()?
        };

        let p = self.directory.join(relative);
        info!("writing {}", p.display());

        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent)
                .into_diagnostic()
                .context(format!("creating {}", parent.display()))?;
        }

        let mut out = create_output(&p, self.overwrite)?;
        out.write_all(&data)
            .into_diagnostic()
            .context(format!("writing {}", p.display()))
    }
}
