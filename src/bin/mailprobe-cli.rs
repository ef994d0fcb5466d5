#[path = "mailprobe-cli/args.rs"]
mod args;
#[path = "mailprobe-cli/output.rs"]
mod output;

use std::io::{self, BufRead};
use std::time::Duration;

use anyhow::Result;
use args::{Cli, Commands};
use mailprobe::{CheckOptions, check, check_many};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.cmd {
        Commands::Check {
            email,
            from_address,
            helo,
            timeout,
            max_mx,
            ports,
        } => {
            let options = build_options(cli.verbose, from_address, helo, *timeout, *max_mx, ports);
            options.validate()?;
            let result = check(email, &options);
            let code = output::exit_code(result.status);
            output::print_result(&result, cli.json)?;
            std::process::exit(code);
        }
        Commands::Batch {
            concurrency,
            from_address,
            helo,
            timeout,
            max_mx,
            ports,
        } => {
            let options = build_options(cli.verbose, from_address, helo, *timeout, *max_mx, ports);
            let emails: Vec<String> = io::stdin()
                .lock()
                .lines()
                .collect::<io::Result<_>>()?;
            let results = check_many(emails, &options, *concurrency)?;
            for result in results {
                output::print_result(&result, cli.json)?;
            }
        }
    }

    Ok(())
}

fn build_options(
    verbose: bool,
    from_address: &Option<String>,
    helo: &Option<String>,
    timeout: Option<u64>,
    max_mx: Option<usize>,
    ports: &[u16],
) -> CheckOptions {
    let mut options = CheckOptions {
        verbose,
        ..CheckOptions::default()
    };
    if let Some(from_address) = from_address {
        options.from_address = from_address.clone();
    }
    if let Some(helo) = helo {
        options.helo_host = helo.clone();
    }
    if let Some(timeout) = timeout {
        options.timeout = Duration::from_secs(timeout);
    }
    if let Some(max_mx) = max_mx {
        options.max_mx = max_mx;
    }
    if !ports.is_empty() {
        options.ports = ports.to_vec();
    }
    options
}
