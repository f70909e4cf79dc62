use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "leaderboard")]
#[command(about = "Builds the recurring top-posters leaderboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare the current member list with the last snapshot and print the report
    Run(RunArgs),

    /// Display the stored snapshot
    Show(ShowArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Member list page (csv or tsv); give it twice, page 1 first
    #[arg(long = "page", value_name = "PATH", required = true)]
    pub pages: Vec<PathBuf>,

    /// Snapshot file; the extension picks the format (csv, json, db)
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// File of member ids to leave off the board, one per line
    #[arg(long)]
    pub exclude: Option<PathBuf>,

    /// Text appended below the board
    #[arg(long)]
    pub footer: Option<PathBuf>,

    /// Topic the report will be posted to
    #[arg(long)]
    pub topic: Option<u64>,

    /// Write the report here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Build the report only, don't save the snapshot
    #[arg(long, short = 's', default_value_t = false)]
    pub simulate: bool,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Snapshot file to display
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_takes_two_pages() {
        let cli = Cli::try_parse_from([
            "leaderboard", "run", "--page", "a.csv", "--page", "b.csv", "-s", "--topic", "5",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.pages, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert!(args.simulate);
        assert_eq!(args.topic, Some(5));
        assert!(args.file.is_none());
    }

    #[test]
    fn run_needs_pages() {
        assert!(Cli::try_parse_from(["leaderboard", "run"]).is_err());
    }

    #[test]
    fn show_json() {
        let cli = Cli::try_parse_from(["leaderboard", "show", "--json", "-f", "x.db"]).unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert!(args.json);
        assert_eq!(args.file, Some(PathBuf::from("x.db")));
    }
}
