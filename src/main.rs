use clap::Parser;
use leaderboard::cli::{Cli, Command, RunArgs, ShowArgs};
use leaderboard::config::{self, Config};
use leaderboard::error::Error;
use leaderboard::pipeline;
use leaderboard::report;
use leaderboard::store::{self, SnapshotFormat};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();
}

fn run(args: &RunArgs) -> Result<(), Error> {
    let config = Config::from_run_args(args)?;
    let output = pipeline::run(&config, chrono::Utc::now())?;
    pipeline::emit(&config, &output.report)
}

fn show(args: &ShowArgs) -> Result<(), Error> {
    let path = config::show_snapshot_path(args)?;
    let snapshot_store = store::open(&path, SnapshotFormat::for_path(&path));

    match snapshot_store.load()? {
        Some(snapshot) => report::print(&snapshot, args.json)?,
        None => {
            eprintln!("No snapshot at {}. Run 'leaderboard run' to create one.", path.display());
            std::process::exit(1);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Run(args) => {
            init_logging(args.verbose);
            run(args)
        }
        Command::Show(args) => {
            init_logging(args.verbose);
            show(args)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
