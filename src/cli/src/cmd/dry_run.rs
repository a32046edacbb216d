use async_trait::async_trait;
use clap::{ArgMatches, Command};

use libprune::error::PruneError;
use libprune::model::LockerMode;

use crate::cmd::{core_args, run_prune, RunCmd};

pub const NAME: &str = "dry-run";
pub struct DryRunCmd;

#[async_trait]
impl RunCmd for DryRunCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        core_args(
            Command::new(NAME)
                .about("Perform requested changes locally and show results of changes"),
        )
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), PruneError> {
        run_prune(
            args,
            LockerMode::DryRun,
            "This is a dry run.  Remote locker will not be updated...",
            "Remote locker was not updated...",
        )
        .await
    }
}
