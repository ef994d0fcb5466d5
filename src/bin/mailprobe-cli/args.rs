use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mailprobe-cli")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// enable trace logs in the result's `logs` field
    #[arg(long, global = true)]
    pub verbose: bool,

    /// emit JSON instead of a human-readable line
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// probe a single address
    Check {
        email: String,
        /// MAIL FROM envelope sender
        #[arg(long = "from")]
        from_address: Option<String>,
        /// EHLO/HELO argument
        #[arg(long)]
        helo: Option<String>,
        /// connect/read timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// maximum MX hosts attempted
        #[arg(long = "max-mx")]
        max_mx: Option<usize>,
        /// ports tried in order (repeatable)
        #[arg(long = "port")]
        ports: Vec<u16>,
    },
    /// probe a newline-delimited batch of addresses read from stdin
    Batch {
        /// maximum concurrent pipelines
        #[arg(long, default_value_t = 8)]
        concurrency: usize,
        /// MAIL FROM envelope sender
        #[arg(long = "from")]
        from_address: Option<String>,
        /// EHLO/HELO argument
        #[arg(long)]
        helo: Option<String>,
        /// connect/read timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// maximum MX hosts attempted
        #[arg(long = "max-mx")]
        max_mx: Option<usize>,
        /// ports tried in order (repeatable)
        #[arg(long = "port")]
        ports: Vec<u16>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
