use std::time::Duration;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use check_msa_storage::catalog::{Subcommand, DISK_STATISTICS};
use check_msa_storage::cli::Cli;
use check_msa_storage::client::MsaClient;
use check_msa_storage::{eval, icinga, response};
use check_msa_storage::{CheckError, Report, Runner, Severity};

fn main() {
    // Diagnostics go to stderr; stdout belongs to the plugin contract.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = icinga::print_config_if_requested("check_msa_storage", &Cli::command()) {
        println!("{} - {}", Severity::Unknown, err);
        std::process::exit(Severity::Unknown.exit_code());
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            err.exit()
        }
        Err(err) => {
            // Bad flags must surface as UNKNOWN, not as clap's exit code 2,
            // which the supervisor would read as CRITICAL.
            let detail = err.to_string();
            let first = detail.lines().next().unwrap_or("invalid arguments");
            println!("{} - {first}", Severity::Unknown);
            std::process::exit(Severity::Unknown.exit_code());
        }
    };

    let verbose = cli.verbose;
    Runner::new()
        .verbose(verbose)
        .safe_run(|| run(cli))
        .print_and_exit()
}

fn run(cli: Cli) -> Result<Report, CheckError> {
    let thresholds = cli.thresholds();
    thresholds.validate()?;

    let client = MsaClient::new(&cli.hostname, Duration::from_secs(cli.timeout), cli.insecure)?;
    let session = client.login(&cli.username, &cli.password)?;

    let spec = cli.subcommand.query();
    let body = client.show(&session, spec.endpoint)?;
    let mut records = response::parse_records(&body, spec)?;

    if cli.subcommand == Subcommand::Disks {
        let stats_body = client.show(&session, DISK_STATISTICS.endpoint)?;
        let stats = response::parse_records(&stats_body, &DISK_STATISTICS)?;
        records = eval::merge_disk_statistics(records, stats)?;
    }

    Ok(eval::evaluate(
        cli.subcommand,
        &records,
        &thresholds,
        &cli.ignore,
    ))
}
