use clap::{Args, Subcommand};
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::{create_output, read_input};

#[derive(Subcommand)]
pub enum TtpCommands {
    /// Convert a TTP file to JSON
    Decode(DecodeArgs),
    /// Convert JSON back to a TTP file
    Encode(EncodeArgs),
}

impl TtpCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            TtpCommands::Decode(decode) => decode.handle(),
            TtpCommands::Encode(encode) => encode.handle(),
        }
    }
}

#[derive(Args)]
pub struct DecodeArgs {
    /// An input TTP file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// A target JSON file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl DecodeArgs {
    pub fn handle(&self) -> Result<()> {
        let animation = pac_ttp::decode(&read_input(&self.input)?)
            .context(format!("decoding {}", self.input.display()))?;
        info!("{} frames", animation.frames.len());

        let text = pac_ttp::to_json(&animation)?;

        info!("writing {}", self.output.display());
        create_output(&self.output, self.overwrite)?
            .write_all(text.as_bytes())
            .into_diagnostic()
            .context(format!("writing {}", self.output.display()))
    }
}

#[derive(Args)]
pub struct EncodeArgs {
    /// An input JSON file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// A target TTP file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl EncodeArgs {
    pub fn handle(&self) -> Result<()> {
        let text = std::fs::read_to_string(&self.input)
            .into_diagnostic()
            .context(format!("reading {}", self.input.display()))?;
        let animation = pac_ttp::from_json(&text)
            .context(format!("parsing {}", self.input.display()))?;

        let ttp = pac_ttp::encode(&animation)?;

        info!("writing {}", self.output.display());
        create_output(&self.output, self.overwrite)?
            .write_all(&ttp)
            .into_diagnostic()
            .context(format!("writing {}", self.output.display()))
    }
}
