use std::collections::HashMap;
use std::process::ExitCode;

use clap::Command;
use colored::Colorize;

pub mod cmd;

use crate::cmd::RunCmd;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cmds: Vec<Box<dyn RunCmd>> = vec![Box::new(cmd::DryRunCmd), Box::new(cmd::PushRemoteCmd)];

    let mut command = Command::new("prune")
        .version(VERSION)
        .about("Prune evidence from an evidence locker, leaving tombstones behind")
        .subcommand_required(true)
        .arg_required_else_help(true);

    let mut runners: HashMap<String, Box<dyn RunCmd>> = HashMap::new();
    for cmd in cmds {
        command = command.subcommand(cmd.args());
        runners.insert(cmd.name().to_string(), cmd);
    }

    let matches = command.get_matches();
    let Some((name, sub_matches)) = matches.subcommand() else {
        return ExitCode::FAILURE;
    };
    let Some(runner) = runners.get(name) else {
        eprintln!("Unknown command `prune {name}`");
        return ExitCode::FAILURE;
    };

    match runner.run(sub_matches).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("prune {name} failed: {err:?}");
            eprintln!("{}", format!("ERROR: {err}").red());
            ExitCode::FAILURE
        }
    }
}
