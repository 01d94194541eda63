mod config;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use config::Config;
use restmint::{Headers, Manifest, ResourceClient, ResourceFactory, ResourceOptions};
use serde_json::Value;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Call REST resource actions from the command line
#[derive(Parser, Debug)]
#[command(name = "restmint", version, about, long_about = None)]
struct Args {
    /// Resource to call (a manifest key, or a plain resource name)
    resource: String,

    /// Action to invoke (getCollection, get, create, update, destroy or a custom action)
    action: String,

    /// Call params as a JSON object
    #[arg(short, long, default_value = "{}")]
    params: String,

    /// Extra request header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// API host, overrides the manifest and the saved config
    #[arg(long)]
    host: Option<String>,

    /// Resource manifest (YAML or JSON)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Treat a resource missing from the manifest as singular
    #[arg(long)]
    singular: bool,

    /// Namespace of a resource missing from the manifest
    #[arg(long)]
    namespace: Option<String>,

    /// Id attribute of a resource missing from the manifest
    #[arg(long)]
    id_attribute: Option<String>,

    /// Remember host, manifest and headers for later runs
    #[arg(long)]
    save: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("restmint started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("restmint").join("restmint.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".restmint").join("restmint.log");
    }
    PathBuf::from("restmint.log")
}

/// Parse a `Name: value` header argument
fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("Invalid header {:?}, expected \"Name: value\"", raw))?;

    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Invalid header {:?}, name is empty", raw);
    }

    Ok((name.to_string(), value.trim().to_string()))
}

/// Saved default headers overlaid with `-H` arguments
///
/// Names are lowercased so a `-H` header replaces a saved one whatever its case.
fn layer_headers(saved: &Headers, raw: &[String]) -> Result<Headers> {
    let mut headers: Headers = saved
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect();

    for header in raw {
        let (name, value) = parse_header(header)?;
        headers.insert(name.to_ascii_lowercase(), value);
    }

    Ok(headers)
}

/// Manifest entry, or an ad-hoc resource described by CLI flags
fn resolve_client(
    args: &Args,
    factory: &ResourceFactory,
    manifest: &Manifest,
) -> Result<ResourceClient> {
    let registry = manifest.build(factory)?;

    if let Some(client) = registry.get(&args.resource) {
        return Ok(client.clone());
    }

    tracing::debug!(
        "{} not in manifest ({} entries), generating ad hoc",
        args.resource,
        registry.len()
    );

    let mut options = ResourceOptions::new().singular(args.singular);
    if let Some(namespace) = &args.namespace {
        options = options.namespace(namespace.clone());
    }
    if let Some(attribute) = &args.id_attribute {
        options = options.id_attribute(attribute.clone());
    }

    Ok(factory.generate(&args.resource, options, &[]))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let mut config = Config::load();

    let params: Value = serde_json::from_str(&args.params).context("--params must be valid JSON")?;

    let headers = layer_headers(&config.headers, &args.headers)?;

    let manifest_path = config.effective_manifest(args.manifest.as_ref());
    let manifest = match &manifest_path {
        Some(path) => Manifest::from_path(path)?,
        None => Manifest::default(),
    };

    // CLI > manifest > saved config
    let host = args
        .host
        .clone()
        .or_else(|| manifest.host.clone())
        .or_else(|| config.host.clone())
        .context("No host configured. Use --host or set one in the manifest")?;

    let factory = manifest.factory_builder(Some(host.as_str()))?.build()?;
    let client = resolve_client(&args, &factory, &manifest)?;

    if args.save {
        config.host = Some(host);
        config.manifest = manifest_path;
        config.headers = headers.clone();
        config.save()?;
    }

    tracing::info!("Calling {}.{}", client.name(), args.action);

    match client
        .call_with_headers(&args.action, params, headers)
        .await
    {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(err) => {
            if let Some(response) = err.response() {
                eprintln!("{} {}", response.status(), response.text());
            }
            Err(err.into())
        }
    }
}
