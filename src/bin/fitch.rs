// The fitch CLI.
// Runs the excluded middle demonstration, or prints the Peano axioms.

use clap::{Parser, Subcommand};
use fitch::certificate::CertificateStore;
use fitch::excluded_middle;
use fitch::peano;
use fitch::proof::{ProofConfig, Rule};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[clap(
    name = "fitch",
    about = "A natural deduction proof kernel",
    long_about = "Fitch checks natural deduction proofs with hypothetical scopes.\n\nYou can:\n- Check the proof of the law of excluded middle\n- List the Peano axioms",
    version = env!("CARGO_PKG_VERSION")
)]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Check the proof of the law of excluded middle (default)
    Prove {
        /// Print the proof certificate as JSON instead of the result
        #[clap(long, help = "Print the proof certificate as JSON.")]
        json: bool,

        /// Reject citing axioms
        #[clap(
            long,
            default_value = "false",
            help = "Reject any citation of an axiom."
        )]
        strict: bool,

        /// The deepest scope an assumption may open
        #[clap(
            long,
            help = "The deepest scope an assumption may open.",
            value_name = "DEPTH"
        )]
        max_depth: Option<u32>,
    },

    /// List the Peano axioms
    Axioms {
        /// Print the axioms as JSONL certificates
        #[clap(long, help = "Print the axioms as JSONL certificates.")]
        json: bool,
    },
}

fn prove(json: bool, config: ProofConfig) {
    let theorem = match excluded_middle::prove(config) {
        Ok(theorem) => theorem,
        Err(e) => {
            println!("{}", e);
            std::process::exit(1);
        }
    };
    let (Some(result), Some(cert)) = (theorem.result(), theorem.certificate()) else {
        println!("{} has no result", theorem.name());
        std::process::exit(1);
    };
    if !json {
        println!("{}", result);
        return;
    }
    match serde_json::to_string_pretty(&cert) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            println!("Error serializing certificate: {}", e);
            std::process::exit(1);
        }
    }
}

fn list_axioms(json: bool) {
    let axioms = peano::axioms();
    if !json {
        for axiom in &axioms {
            println!("{}", axiom);
        }
        return;
    }
    let mut store = CertificateStore::new();
    for axiom in &axioms {
        if let Some(cert) = axiom.certificate() {
            store.push(cert);
        }
    }
    match store.to_jsonl() {
        Ok(text) => print!("{}", text),
        Err(e) => {
            println!("Error serializing certificates: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    // Use RUST_LOG env var to control log levels, e.g.:
    //   RUST_LOG=fitch=trace cargo run -- prove
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    match args.command {
        None => prove(false, ProofConfig::default()),
        Some(Command::Prove {
            json,
            strict,
            max_depth,
        }) => prove(json, ProofConfig { strict, max_depth }),
        Some(Command::Axioms { json }) => list_axioms(json),
    }
}
