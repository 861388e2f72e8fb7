//! schema-edm CLI
//!
//! Command-line interface for converting JSON Schema documents into entity
//! data models.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use schema_edm::{
    build_model_with, check_schema, load_schema_auto, parse_schema, to_csdl_xml, ConvertOptions,
    Error, Model,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-edm")]
#[command(about = "Convert JSON Schema documents into entity data models")]
#[command(version)]
struct Cli {
    /// Log conversion steps to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Model as JSON
    Json,
    /// OData CSDL (EDMX 4.0) XML
    Csdl,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a schema into a model
    Convert {
        /// Schema source: file path, URL (http:// or https://), or - for stdin
        schema: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Namespace of the entity container
        #[arg(long, default_value = "namespace")]
        namespace: String,

        /// Name of the entity container
        #[arg(long, default_value = "containerName")]
        container: String,

        /// Skip the meta-schema check of the input document
        #[arg(long)]
        no_check: bool,
    },

    /// Check that a schema converts, without writing the model
    Check {
        /// Schema source: file path, URL (http:// or https://), or - for stdin
        schema: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            schema,
            output,
            format,
            pretty,
            namespace,
            container,
            no_check,
        } => {
            let options = ConvertOptions::new()
                .namespace(namespace)
                .container_name(container);
            run_convert(&schema, &options, !no_check, format, pretty, output)
        }
        Commands::Check { schema } => run_check(&schema),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load, check, parse and convert a schema source.
fn load_model(source: &str, options: &ConvertOptions, check: bool) -> Result<Model, Error> {
    let value = load_schema_auto(source)?;
    if check {
        check_schema(&value)?;
    }
    let schema = parse_schema(&value)?;
    Ok(build_model_with(&schema, options)?)
}

fn run_convert(
    source: &str,
    options: &ConvertOptions,
    check: bool,
    format: Format,
    pretty: bool,
    output: Option<PathBuf>,
) -> Result<(), u8> {
    let model = load_model(source, options, check).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let rendered = match format {
        Format::Csdl => to_csdl_xml(&model).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?,
        Format::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(&model)
            } else {
                serde_json::to_string(&model)
            };
            json.map_err(|e| {
                eprintln!("Error serializing output: {}", e);
                2u8
            })?
        }
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", rendered.trim_end());
        }
    }

    Ok(())
}

fn run_check(source: &str) -> Result<(), u8> {
    let model = load_model(source, &ConvertOptions::default(), true).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let properties: usize = model.entity_types.iter().map(|t| t.properties.len()).sum();
    println!("Valid");
    println!(
        "{} entity type(s), {} propert{}",
        model.entity_types.len(),
        properties,
        if properties == 1 { "y" } else { "ies" }
    );
    Ok(())
}
