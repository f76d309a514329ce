pub mod extract;
pub mod list;
pub mod pack;

#[derive(clap::Subcommand)]
pub enum ArchiveCommands {
    /// List the entries of a PAC file
    List(list::ListArgs),
    /// Extract a PAC file into a directory
    Extract(extract::ExtractArgs),
    /// Pack a directory into a PAC file
    Pack(pack::PackArgs),
}

impl ArchiveCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            ArchiveCommands::List(list) => list.handle(),
            ArchiveCommands::Extract(extract) => extract.handle(),
            ArchiveCommands::Pack(pack) => pack.handle(),
        }
    }
}
