use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blockdoc::config::BlockdocConfig;
use blockdoc::{
    PipelineError, RawPayload, allowed_styles, parse_json, preview_payload, process_payload,
    validate,
};

#[derive(Parser)]
#[command(name = "blockdoc", version, about = "Render typed block payloads into .docx documents")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a payload and write the rendered .docx
    Render(RenderArgs),

    /// Validate a payload without rendering it
    Validate(InputArgs),

    /// Print the elements a payload renders to, one JSON object per line
    Preview(InputArgs),

    /// List the allowed style names
    Styles,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Payload JSON file, or `-` for stdin
    input: String,
}

#[derive(clap::Args)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Template name, resolved inside the template directory
    #[arg(short, long)]
    template: Option<String>,

    /// Template directory (overrides the config file)
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Output path; defaults to the generated `output-<uuid>.docx` name
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockdoc=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    };
    process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = match &cli.config {
        Some(path) => BlockdocConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BlockdocConfig::default(),
    };

    match cli.command {
        Command::Render(args) => do_render(&config, args),
        Command::Validate(args) => do_validate(&config, &args),
        Command::Preview(args) => do_preview(&config, &args),
        Command::Styles => {
            for style in allowed_styles() {
                println!("{style}");
            }
            Ok(0)
        }
    }
}

fn do_render(config: &BlockdocConfig, args: RenderArgs) -> Result<i32> {
    let raw = match read_payload(&args.input.input)? {
        Ok(raw) => raw,
        Err(code) => return Ok(code),
    };

    let mut render_cfg = config.render_config();
    if let Some(dir) = args.template_dir {
        render_cfg.template_dir = Some(dir);
    }
    let store = render_cfg.template_store();
    let template = render_cfg.effective_template(args.template.as_deref());

    let artifact = match process_payload(raw, template, &config.validate_config(), store.as_ref()) {
        Ok(artifact) => artifact,
        Err(err) => return Ok(report(&err)),
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&artifact.file_name));
    fs::write(&output, &artifact.bytes)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("{}", output.display());
    Ok(0)
}

fn do_validate(config: &BlockdocConfig, args: &InputArgs) -> Result<i32> {
    let raw = match read_payload(&args.input)? {
        Ok(raw) => raw,
        Err(code) => return Ok(code),
    };
    match validate(raw, &config.validate_config()) {
        Ok(payload) => {
            println!("ok: {} blocks", payload.blocks.len());
            Ok(0)
        }
        Err(err) => Ok(report(&PipelineError::from(err))),
    }
}

fn do_preview(config: &BlockdocConfig, args: &InputArgs) -> Result<i32> {
    let raw = match read_payload(&args.input)? {
        Ok(raw) => raw,
        Err(code) => return Ok(code),
    };
    match preview_payload(raw, &config.validate_config()) {
        Ok(elements) => {
            for element in elements {
                println!("{}", serde_json::to_string(&element)?);
            }
            Ok(0)
        }
        Err(err) => Ok(report(&err)),
    }
}

/// Prints a pipeline error as JSON on stdout. Client errors exit with 2,
/// environment errors with 3.
fn report(err: &PipelineError) -> i32 {
    let body = serde_json::json!({
        "error": {
            "code": err.kind(),
            "message": err.to_string(),
        }
    });
    println!("{body}");
    if err.is_client_error() { 2 } else { 3 }
}

/// Reads and parses the payload. Unparseable JSON is reported like any
/// other payload error and comes back as the exit code.
fn read_payload(input: &str) -> Result<Result<RawPayload, i32>> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading payload from stdin")?;
        buf
    } else {
        fs::read_to_string(Path::new(input)).with_context(|| format!("reading {input}"))?
    };
    Ok(parse_json::<RawPayload>(&text).map_err(|err| report(&PipelineError::from(err))))
}
