use clap::{Args, Subcommand};
use miette::{Context, IntoDiagnostic, Result};
use pac_bmz::{BitmapImage, Compression};
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::{create_output, read_input};

#[derive(Subcommand)]
pub enum BmzCommands {
    /// Inflate a BMZ file into the BMP file it carries
    Decode(DecodeArgs),
    /// Compress a BMP file into a BMZ file
    Encode(EncodeArgs),
}

impl BmzCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            BmzCommands::Decode(decode) => decode.handle(),
            BmzCommands::Encode(encode) => encode.handle(),
        }
    }
}

#[derive(Args)]
pub struct DecodeArgs {
    /// An input BMZ file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// A target BMP file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl DecodeArgs {
    pub fn handle(&self) -> Result<()> {
        let bitmap = pac_bmz::inflate(&read_input(&self.input)?)
            .context(format!("inflating {}", self.input.display()))?;

        info!("writing {}", self.output.display());
        create_output(&self.output, self.overwrite)?
            .write_all(&bitmap)
            .into_diagnostic()
            .context(format!("writing {}", self.output.display()))
    }
}

#[derive(Args)]
pub struct EncodeArgs {
    /// An input BMP file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// A target BMZ file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// zlib compression level
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
    level: u32,
}

impl EncodeArgs {
    pub fn handle(&self) -> Result<()> {
        let bitmap = read_input(&self.input)?;

        // Only formats the archive tools can read back are accepted. The file itself is stored
        // unchanged.
        let image = BitmapImage::from_bmp(&bitmap)
            .context(format!("reading {}", self.input.display()))?;
        info!(
            "{}x{} {:?} bitmap",
            image.width(),
            image.height(),
            image.format()
        );

        let bmz = pac_bmz::deflate(&bitmap, Compression::new(self.level))?;

        info!("writing {}", self.output.display());
        create_output(&self.output, self.overwrite)?
            .write_all(&bmz)
            .into_diagnostic()
            .context(format!("writing {}", self.output.display()))
    }
}
