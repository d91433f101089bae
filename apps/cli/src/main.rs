use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use core_types::ExtractedRequirements;
use log::{debug, info};
use material_catalog::MaterialCatalog;
use recommender::{RecommendationPipeline, RecommendationRequest};
use requirement_extractor::RequirementExtractor;
use research_agent::{DomainError, PipelineConfig};
use serde::Serialize;
use serde_json::{Value, json};
use simplelog::{Config, LevelFilter, WriteLogger};

const CLI_VERSION: &str = "1.0";
const LOG_ENV: &str = "MATERIALS_LOG";

const EXIT_OK: i32 = 0;
const EXIT_PIPELINE: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_INVALID_INPUT: i32 = 3;
const EXIT_NOT_FOUND: i32 = 4;

#[derive(Debug, Parser)]
#[command(name = "materials", version, about = "Sustainable packaging material recommendations")]
struct Cli {
    /// error, warn, info, debug or trace. Falls back to MATERIALS_LOG, then warn.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Skip both text-generation services even when credentials are set.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the built-in catalog, or one entry by id or name.
    Catalog {
        #[arg(long)]
        find: Option<String>,
    },
    /// Map a request's requirements onto the numeric feature schema.
    Extract {
        #[arg(long)]
        input: PathBuf,
    },
    /// Score the catalog and merge external research into candidates.
    Search {
        #[arg(long)]
        input: PathBuf,
    },
    /// Full pipeline: candidates, synthesis and metadata envelope.
    Recommend {
        #[arg(long)]
        input: PathBuf,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Catalog { .. } => "catalog",
            Command::Extract { .. } => "extract",
            Command::Search { .. } => "search",
            Command::Recommend { .. } => "recommend",
        }
    }
}

#[derive(Debug)]
struct NotFound(String);

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no catalog material matches '{}'", self.0)
    }
}

impl std::error::Error for NotFound {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractOutput {
    extracted: ExtractedRequirements,
    unmatched: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let command = cli.command.name();
    match run(&cli) {
        Ok(data) => {
            print_success(command, data);
            std::process::exit(EXIT_OK);
        }
        Err(err) => print_error(command, &err),
    }
}

fn init_logging(flag: Option<&str>) {
    let from_env = std::env::var(LOG_ENV).ok();
    let level = flag
        .or(from_env.as_deref())
        .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    // stdout carries the JSON envelope only
    let _ = WriteLogger::init(level, Config::default(), io::stderr());
}

fn run(cli: &Cli) -> Result<Value> {
    match &cli.command {
        Command::Catalog { find } => catalog(find.as_deref()),
        Command::Extract { input } => {
            let request = read_request(input)?;
            let extractor = RequirementExtractor;
            let unmatched = request
                .requirements
                .iter()
                .filter(|r| extractor.match_feature(&r.name).is_none())
                .map(|r| r.name.clone())
                .collect();
            to_value(&ExtractOutput {
                extracted: extractor.extract(&request.requirements),
                unmatched,
            })
        }
        Command::Search { input } => {
            let request = read_request(input)?;
            let pipeline = pipeline(cli.offline)?;
            let aggregated = pipeline.aggregate(&request);
            let mut data = to_value(&aggregated)?;
            data["dataProvenance"] = Value::String(aggregated.provenance.label());
            data["externalResultCount"] = json!(aggregated.external_result_count());
            Ok(data)
        }
        Command::Recommend { input } => {
            let request = read_request(input)?;
            let response = pipeline(cli.offline)?.run(&request);
            info!(
                "confidence {:?}, {} recommendations",
                response.metadata.confidence_level,
                response.recommendations.len()
            );
            to_value(&response)
        }
    }
}

fn catalog(find: Option<&str>) -> Result<Value> {
    let catalog = MaterialCatalog::builtin();
    match find {
        Some(key) => match catalog.find(key) {
            Some(material) => to_value(material),
            None => Err(NotFound(key.to_string()).into()),
        },
        None => to_value(&json!({
            "count": catalog.len(),
            "materials": catalog.materials(),
        })),
    }
}

fn pipeline(offline: bool) -> Result<RecommendationPipeline> {
    let config = if offline {
        PipelineConfig::offline()
    } else {
        PipelineConfig::from_env()
    };
    debug!(
        "research configured: {}, synthesis configured: {}",
        config.research.is_configured(),
        config.synthesis.is_configured()
    );
    Ok(RecommendationPipeline::from_config(&config)?)
}

fn read_request(path: &Path) -> Result<RecommendationRequest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading request file {}", path.display()))?;
    let request: RecommendationRequest = serde_json::from_str(&raw)
        .with_context(|| format!("parsing request file {}", path.display()))?;
    if request.requirements.is_empty() && request.current_material.composition.trim().is_empty() {
        bail!(DomainError::InvalidInput(
            "request has neither requirements nor a current material".to_string()
        ));
    }
    Ok(request)
}

fn to_value<T: Serialize + ?Sized>(data: &T) -> Result<Value> {
    Ok(serde_json::to_value(data)?)
}

fn exit_code(err: &anyhow::Error) -> (i32, &'static str) {
    for cause in err.chain() {
        if cause.is::<io::Error>() {
            return (EXIT_IO, "IoError");
        }
        if cause.is::<serde_json::Error>() {
            return (EXIT_INVALID_INPUT, "InvalidInput");
        }
        if cause.is::<NotFound>() {
            return (EXIT_NOT_FOUND, "NotFound");
        }
        if let Some(domain) = cause.downcast_ref::<DomainError>() {
            return match domain {
                DomainError::InvalidInput(_) => (EXIT_INVALID_INPUT, "InvalidInput"),
                _ => (EXIT_PIPELINE, "PipelineError"),
            };
        }
    }
    (EXIT_PIPELINE, "PipelineError")
}

fn print_success(command: &str, data: Value) {
    let response = json!({
        "status": "ok",
        "version": CLI_VERSION,
        "command": command,
        "data": data,
        "error": null
    });
    println!("{}", pretty(&response));
}

fn print_error(command: &str, err: &anyhow::Error) -> ! {
    let (code, kind) = exit_code(err);
    let response = json!({
        "status": "error",
        "version": CLI_VERSION,
        "command": command,
        "data": null,
        "error": {
            "code": code,
            "type": kind,
            "message": format!("{err:#}")
        }
    });
    eprintln!("{}", pretty(&response));
    std::process::exit(code);
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
