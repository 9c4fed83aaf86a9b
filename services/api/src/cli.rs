use crate::diagnose::{run_catalog_check, run_diagnose, CatalogCheckArgs, DiagnoseArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use visa_pathway::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Visa Pathway Engine",
    about = "Recommend ranked visa pathways from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Diagnose a single applicant profile and print the ranked pathways
    Diagnose(DiagnoseArgs),
    /// Inspect the pathway catalog and scoring tables
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Load and validate the catalog and scoring tables, then print a summary
    Check(CatalogCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Diagnose(args) => run_diagnose(args),
        Command::Catalog {
            command: CatalogCommand::Check(args),
        } => run_catalog_check(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnose_arguments_parse() {
        let cli = Cli::try_parse_from([
            "visa-pathway-api",
            "diagnose",
            "--nationality",
            "VN",
            "--age",
            "23",
            "--education-level",
            "BACHELOR",
            "--fund",
            "BETWEEN_10M_30M",
            "--goal",
            "WORK",
            "--priority",
            "FAST",
            "--top-n",
            "3",
            "--today",
            "2025-03-14",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Diagnose(args)) => {
                assert_eq!(args.nationality, "VN");
                assert_eq!(args.age, 23);
                assert_eq!(args.top_n, Some(3));
                assert!(args.json);
                assert!(args.today.is_some());
            }
            other => panic!("expected diagnose command, got {other:?}"),
        }
    }

    #[test]
    fn missing_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["visa-pathway-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn catalog_check_accepts_paths() {
        let cli = Cli::try_parse_from([
            "visa-pathway-api",
            "catalog",
            "check",
            "--catalog",
            "data/catalog.json",
        ])
        .expect("arguments parse");

        assert!(matches!(
            cli.command,
            Some(Command::Catalog {
                command: CatalogCommand::Check(_)
            })
        ));
    }
}
