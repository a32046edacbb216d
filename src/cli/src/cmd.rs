pub mod dry_run;
pub use dry_run::DryRunCmd;

pub mod push_remote;
pub use push_remote::PushRemoteCmd;

use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use colored::Colorize;

use libprune::constants::DEFAULT_CREDENTIALS_PATH;
use libprune::error::PruneError;
use libprune::model::LockerMode;
use libprune::opts::{PruneArgs, PruneOpts};
use libprune::repositories;

#[async_trait]
pub trait RunCmd {
    fn name(&self) -> &str;
    fn args(&self) -> Command;
    async fn run(&self, args: &ArgMatches) -> Result<(), PruneError>;
}

/// Arguments shared by every pruning subcommand
pub fn core_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("locker")
                .required(true)
                .help("The URL to the evidence locker repository, as an example https://github.com/my-org/my-repo"),
        )
        .arg(
            Arg::new("creds")
                .long("creds")
                .value_name("~/path/creds")
                .default_value(DEFAULT_CREDENTIALS_PATH)
                .help("The path to the credentials file"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("'{\"raw/foo/bar.json\":\"bar.json is abandoned\",...}'")
                .help("JSON evidence-path/reason pairs needed to prune evidence"),
        )
        .arg(
            Arg::new("config-file")
                .long("config-file")
                .value_name("~/path/to/config_file.json")
                .help("Path to a file containing the evidence to prune"),
        )
        .arg(
            Arg::new("git-config")
                .long("git-config")
                .value_name("'{\"commit\":{\"gpgsign\": true},\"user\":{\"signingKey\":\"...\",\"email\":\"...\",\"name\":\"...\"}}'")
                .help("JSON git configuration for signing commits"),
        )
        .arg(
            Arg::new("git-config-file")
                .long("git-config-file")
                .value_name("~/path/to/git_config_file.json")
                .help("Path to a file containing the git configuration for signing commits"),
        )
        .arg(
            Arg::new("local-path")
                .long("local-path")
                .value_name("PATH")
                .help("Where to clone the locker, defaults to <tmp>/prune"),
        )
}

pub fn parse_prune_args(args: &ArgMatches) -> PruneArgs {
    let string = |name: &str| args.get_one::<String>(name).cloned();
    PruneArgs {
        locker: string("locker").unwrap_or_default(),
        creds: string("creds"),
        config: string("config"),
        config_file: string("config-file"),
        git_config: string("git-config"),
        git_config_file: string("git-config-file"),
        local_path: string("local-path").map(Into::into),
    }
}

/// Validate the arguments, prune the locker and report what happened
pub async fn run_prune(
    args: &ArgMatches,
    mode: LockerMode,
    intro: &str,
    outro: &str,
) -> Result<(), PruneError> {
    let opts = PruneOpts::from_args(&parse_prune_args(args), mode)?;

    println!("{intro}");
    if opts.local_path.exists() {
        println!("Local locker found...");
        remove_local_locker(&opts.local_path)?;
    }
    println!(
        "Cloning local locker for {}.  Depending on the size of your locker, this may take a while...",
        opts.locker_url
    );

    let summary = tokio::task::spawn_blocking(move || repositories::prune::prune(&opts))
        .await
        .map_err(|err| PruneError::basic_str(format!("prune task failed: {err}")))??;

    println!("Locker has been cloned...");
    println!("Local locker location is {}", summary.local_path.display());
    for path in &summary.pruned {
        println!(
            "\nEvidence {} removed by {}, tombstone applied...",
            path.bold(),
            summary.pruned_by
        );
    }
    println!("{}", outro.green());

    remove_local_locker(&summary.local_path)
}

fn remove_local_locker(path: &std::path::Path) -> Result<(), PruneError> {
    println!("Removing local locker...");
    repositories::prune::remove_local_locker(path)?;
    println!("Local locker has been removed...");
    Ok(())
}
