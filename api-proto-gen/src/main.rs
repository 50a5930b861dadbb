//! api-proto-gen: Generate a proto3 schema from a service description
//!
//! This tool reads a JSON service description (struct definitions and route
//! groups) and writes:
//! - The translated proto3 source
//! - Optionally, an encoded FileDescriptorSet for descriptor-based tooling

use std::path::PathBuf;

use api_proto::File;
use api_proto::options::{DEFAULT_GO_PACKAGE, Options};
use api_proto::api::Source;
use clap::Parser;
use prost::Message;

#[derive(Parser, Debug)]
#[command(name = "api-proto-gen")]
#[command(about = "Generate a proto3 schema from a service description")]
struct Args {
    /// Input JSON service description (`"kind": "api"`)
    input: PathBuf,

    /// Output proto file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write an encoded FileDescriptorSet to this path
    #[arg(long = "descriptor-set-out")]
    descriptor_set_out: Option<PathBuf>,

    /// Value of the go_package file option
    #[arg(long, default_value = DEFAULT_GO_PACKAGE)]
    go_package: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load the description
    let content = std::fs::read_to_string(&args.input)?;
    let source: Source = serde_json::from_str(&content)?;

    // Translate
    let options = Options {
        go_package: args.go_package,
    };
    let file = File::from_source_with(&source, &options)?;

    // Write proto source
    let rendered = file.to_string();
    match &args.output {
        Some(path) => std::fs::write(path, &rendered)?,
        None => print!("{}", rendered),
    }

    // Write descriptor set
    if let Some(path) = &args.descriptor_set_out {
        std::fs::write(path, file.to_file_descriptor_set().encode_to_vec())?;
    }

    tracing::info!(
        input = %args.input.display(),
        messages = file.messages.len(),
        rpcs = file.service.rpcs.len(),
        "generated proto for service {}",
        file.service.name
    );

    Ok(())
}
