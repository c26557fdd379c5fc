use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vmbench::config;
use vmbench::errors::VmbenchError;
use vmbench::process::SystemLauncher;
use vmbench::runner;
use vmbench::types::{InvocationSpec, ReportFormat, test_file_path};

const LOG_ENV: &str = "VMBENCH_LOG";

#[derive(Parser)]
#[command(
    name = "vmbench",
    version,
    about = "Build the VM and time it on an assembly test program",
    allow_negative_numbers = true
)]
struct Cli {
    /// Heap size in bytes, exported to the build and the VM as VM_HEAP_SIZE
    #[arg(short = 'm', value_name = "BYTES")]
    heap: Option<u64>,

    /// Number of iterations
    #[arg(
        short = 'n',
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    iterations: u32,

    /// Arguments passed to the build command (put this option last or end it with --)
    #[arg(short = 'b', value_name = "ARGS", num_args = 0..)]
    build_args: Vec<String>,

    /// Send the VM's standard output to the null device
    #[arg(short, long)]
    silent: bool,

    /// Report format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: ReportFormat,

    /// Print the report as JSON (same as --format json)
    #[arg(long)]
    json: bool,

    /// Config file (default: ./vmbench.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Test program name, e.g. `add` for test/add.asm
    #[arg(value_name = "PROGRAM")]
    target: String,

    /// Values fed to the VM's standard input, joined by spaces
    #[arg(value_name = "VALUES")]
    inputs: Vec<String>,
}

fn run(cli: Cli) -> Result<()> {
    let work_dir = std::env::current_dir()?;
    let config = config::load_config(cli.config.as_deref(), &work_dir)?;

    let spec = InvocationSpec {
        heap_size: cli.heap.unwrap_or(config.heap_size),
        iterations: cli.iterations,
        build_args: cli.build_args,
        silent: cli.silent,
        target: cli.target,
        inputs: cli.inputs,
    };

    let test_file = test_file_path(&config.test_dir, &spec.target, &config.extension);
    let format = if cli.json {
        ReportFormat::Json
    } else {
        cli.format
    };

    let mut launcher = SystemLauncher::new(config);
    let mut out = io::stdout().lock();

    let outcome = runner::run_benchmark(&mut launcher, &spec, &test_file, &mut out)?;
    runner::write_report(&mut out, &spec, &outcome, format)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        // A failed build ends the run without any output of our own.
        if let Some(e @ VmbenchError::BuildFailed { .. }) = err.downcast_ref::<VmbenchError>() {
            process::exit(e.exit_code());
        }
        eprintln!("{}", err);
        process::exit(1);
    }
}
