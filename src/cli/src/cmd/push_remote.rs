use async_trait::async_trait;
use clap::{ArgMatches, Command};

use libprune::error::PruneError;
use libprune::model::LockerMode;

use crate::cmd::{core_args, run_prune, RunCmd};

pub const NAME: &str = "push-remote";
pub struct PushRemoteCmd;

#[async_trait]
impl RunCmd for PushRemoteCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        core_args(
            Command::new(NAME)
                .about("Perform requested changes and push to the remote repository"),
        )
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), PruneError> {
        run_prune(
            args,
            LockerMode::PushRemote,
            "This is an official run.  Remote locker will be updated...",
            "Remote locker was updated...",
        )
        .await
    }
}
