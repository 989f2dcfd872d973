use crate::artifacts::ArtifactProvisioner;
use crate::errors::AppResult;
use crate::programs::ProgramGroup;
use clap::Args;
use std::path::PathBuf;

/// Copy a program group into a directory
#[derive(Args)]
pub struct MaterializeCommand {
    /// Program group; keystone and data-feeds include the MCMS programs
    #[arg(long, value_enum)]
    pub group: ProgramGroup,

    /// Destination directory, created if missing
    #[arg(long)]
    pub out: PathBuf,
}

impl MaterializeCommand {
    pub async fn run(&self) -> AppResult<()> {
        std::fs::create_dir_all(&self.out)?;

        let provisioner = ArtifactProvisioner::new(super::default_cache()?);
        let ids = provisioner.load_group(self.group, &self.out).await?;

        println!("{}", serde_json::to_string_pretty(&ids)?);
        Ok(())
    }
}
