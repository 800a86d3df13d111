//! fastnc Binary
//!
//! Parses the command line, runs one session, maps the outcome to an exit code.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use fastnc::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// A simple, very fast version of the netcat utility
#[derive(Parser, Debug)]
#[command(name = "fastnc")]
#[command(version)]
struct Args {
    /// Use IPv4 only
    #[arg(short = '4')]
    ipv4: bool,

    /// Use IPv6 only
    #[arg(short = '6')]
    ipv6: bool,

    /// Listen mode
    #[arg(short = 'l')]
    listen: bool,

    /// Source address to bind to
    #[arg(short = 's', value_name = "ADDR")]
    source: Option<String>,

    /// Verbose mode
    #[arg(short = 'v')]
    verbose: bool,

    /// Input file (connect mode)
    #[arg(short = 'i', value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output file (listen mode)
    #[arg(short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Destination host (bind host in listen mode)
    destination: String,

    /// Destination port (bind port in listen mode)
    port: u16,
}

impl Args {
    fn into_config(self) -> fastnc::Result<Config> {
        let mut builder = Config::builder()
            .ipv4_only(self.ipv4)
            .ipv6_only(self.ipv6)
            .listen(self.listen)
            .verbose(self.verbose)
            .destination(self.destination, self.port);

        if let Some(source) = self.source {
            builder = builder.source_addr(source);
        }
        if let Some(input) = self.input {
            builder = builder.input_file(input);
        }
        if let Some(output) = self.output {
            builder = builder.output_file(output);
        }

        builder.build()
    }
}

fn main() {
    let prog = program_name();
    let args = Args::parse();

    // Diagnostics only ever go to stderr; stdout may be the data stream
    fmt()
        .with_env_filter(log_filter(args.verbose))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_level(false)
        .without_time()
        .init();

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", prog, e);
            eprintln!("{}", Args::command().render_usage());
            std::process::exit(1);
        }
    };

    tracing::debug!("fastnc v{} starting: {:?}", fastnc::VERSION, config);

    if let Err(e) = fastnc::run(&config) {
        eprintln!("{}: {}", prog, e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` if set, else `warn`
///
/// `-v` always turns on this crate's `info` events, unless `RUST_LOG`
/// already says something about the `fastnc` target.
fn log_filter(verbose: bool) -> EnvFilter {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let env_names_crate = from_env.as_deref().map_or(false, |v| v.contains("fastnc"));
    if verbose && !env_names_crate {
        if let Ok(directive) = "fastnc=info".parse() {
            filter = filter.add_directive(directive);
        }
    }

    filter
}

fn program_name() -> String {
    let arg0 = std::env::args().next();
    arg0.as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fastnc".to_string())
}
