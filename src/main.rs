mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use yarn_builder::YarnOptions;

#[derive(Parser)]
#[command(
    name = "yarn-builder",
    about = "Bundle a JavaScript library with Yarn as a build-graph step",
    version,
    propagate_version = true
)]
struct Cli {
    /// Package-manager binary to invoke (default: yarn on PATH)
    #[arg(long, global = true, env = "YARN_BUILDER_PROGRAM")]
    program: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bundling step and exit with yarn's exit code
    Bundle {
        /// Target dist file the bundle is built into
        #[arg(long)]
        target: PathBuf,

        /// Source package manifest; yarn runs in its directory
        source: PathBuf,

        /// Extra argument passed through to yarn (repeatable)
        #[arg(long = "yarn-arg")]
        yarn_args: Vec<String>,
    },

    /// Check that the package manager is available on PATH
    Check,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let options = YarnOptions {
        program: cli.program,
        ..Default::default()
    };

    let result = match cli.command {
        Commands::Bundle {
            target,
            source,
            yarn_args,
        } => {
            let mut options = options;
            options.extra_args = yarn_args.into_iter().map(Into::into).collect();
            cmd::bundle::run(options, &target, &source, cli.json)
        }
        Commands::Check => cmd::check::run(&options, cli.json),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
