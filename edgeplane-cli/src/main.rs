use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use edgeplane_core::config::ProviderConfig;
use edgeplane_core::context::CancellationToken;
use edgeplane_core::lifecycle::{ManagedObject, ObjectStatus};
use edgeplane_core::resource::{ResourceData, Value};
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use edgeplane_provider::{ProviderMeta, registry};

#[derive(Parser)]
#[command(name = "edgeplane")]
#[command(about = "Manage edge security, identity and network list objects", long_about = None)]
struct Cli {
    /// Provider settings file (JSON object: host, account_switch_key, timeout_secs, user_agent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every upstream call
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resource and data source types
    Resources,
    /// Show the attributes of a resource or data source type
    Schema {
        /// Type name, e.g. appsec_rate_protection
        type_name: String,
    },
    /// Create an object and print its state
    Create {
        type_name: String,
        /// JSON object with the attributes
        #[arg(long)]
        attrs: PathBuf,
    },
    /// Read an object by identifier
    Read {
        type_name: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        attrs: Option<PathBuf>,
    },
    /// Overwrite an object with the given attributes
    Update {
        type_name: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        attrs: PathBuf,
    },
    /// Delete an object by identifier
    Delete {
        type_name: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        attrs: Option<PathBuf>,
    },
    /// Query a data source
    Data {
        type_name: String,
        #[arg(long)]
        attrs: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Resources => {
            run_resources();
            Ok(())
        }
        Commands::Schema { type_name } => run_schema(&type_name),
        Commands::Create { type_name, attrs } => run_create(config, &type_name, &attrs).await,
        Commands::Read { type_name, id, attrs } => run_read(config, &type_name, &id, attrs.as_deref()).await,
        Commands::Update { type_name, id, attrs } => run_update(config, &type_name, &id, &attrs).await,
        Commands::Delete { type_name, id, attrs } => run_delete(config, &type_name, &id, attrs.as_deref()).await,
        Commands::Data { type_name, attrs } => run_data(config, &type_name, attrs.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_resources() {
    let registry = registry();
    println!("{}", "Resources:".cyan().bold());
    for name in registry.resource_names() {
        println!("  • {}", name);
    }
    println!();
    println!("{}", "Data sources:".cyan().bold());
    for name in registry.data_source_names() {
        println!("  • {}", name);
    }
}

fn run_schema(type_name: &str) -> Result<(), String> {
    let registry = registry();
    let schema = match registry.get_resource(type_name) {
        Ok(handler) => handler.schema(),
        Err(_) => registry
            .get_data_source(type_name)
            .map_err(|e| e.to_string())?
            .schema(),
    };

    println!("{}", schema.resource_type.cyan().bold());
    if let Some(description) = &schema.description {
        println!("{}", description);
    }
    println!();

    for attr in schema.writable() {
        let presence = if attr.is_required() {
            "required".yellow()
        } else {
            "optional".normal()
        };
        print_attribute(attr, presence);
    }

    let mut computed: Vec<_> = schema.attributes.values().filter(|a| a.is_computed()).collect();
    computed.sort_by(|a, b| a.name.cmp(&b.name));
    for attr in computed {
        print_attribute(attr, "computed".dimmed());
    }
    Ok(())
}

fn print_attribute(attr: &AttributeSchema, presence: colored::ColoredString) {
    println!("  {} {} ({})", attr.name.bold(), attr.attr_type, presence);
    if let Some(description) = &attr.description {
        println!("      {}", description);
    }
}

async fn run_create(config: Option<&Path>, type_name: &str, attrs: &Path) -> Result<(), String> {
    let handler = registry().get_resource(type_name).map_err(|e| e.to_string())?;
    let schema = handler.schema();
    let data = ResourceData::new(&schema).with_attributes(read_attributes(&schema, attrs)?);
    let meta = provider_meta(config)?;

    let mut object = ManagedObject::new(data);
    object
        .create(handler.as_ref(), &meta)
        .await
        .map_err(|e| e.to_string())?;

    println!(
        "{} {} '{}' created",
        "✓".green(),
        type_name,
        object.data().id().unwrap_or_default()
    );
    print_state(object.data())
}

async fn run_read(config: Option<&Path>, type_name: &str, id: &str, attrs: Option<&Path>) -> Result<(), String> {
    let handler = registry().get_resource(type_name).map_err(|e| e.to_string())?;
    let schema = handler.schema();
    let data = ResourceData::new(&schema)
        .with_attributes(optional_attributes(&schema, attrs)?)
        .with_id(id);
    let meta = provider_meta(config)?;

    let mut object = ManagedObject::existing(data);
    object
        .read(handler.as_ref(), &meta)
        .await
        .map_err(|e| e.to_string())?;
    print_state(object.data())
}

async fn run_update(config: Option<&Path>, type_name: &str, id: &str, attrs: &Path) -> Result<(), String> {
    let handler = registry().get_resource(type_name).map_err(|e| e.to_string())?;
    let schema = handler.schema();
    let data = ResourceData::new(&schema)
        .with_attributes(read_attributes(&schema, attrs)?)
        .with_id(id);
    let meta = provider_meta(config)?;

    let mut object = ManagedObject::existing(data);
    object
        .update(handler.as_ref(), &meta)
        .await
        .map_err(|e| e.to_string())?;

    println!("{} {} '{}' updated", "✓".green(), type_name, id);
    print_state(object.data())
}

async fn run_delete(config: Option<&Path>, type_name: &str, id: &str, attrs: Option<&Path>) -> Result<(), String> {
    let handler = registry().get_resource(type_name).map_err(|e| e.to_string())?;
    let schema = handler.schema();
    let data = ResourceData::new(&schema)
        .with_attributes(optional_attributes(&schema, attrs)?)
        .with_id(id);
    let meta = provider_meta(config)?;

    let mut object = ManagedObject::existing(data);
    if let Err(e) = object.delete(handler.as_ref(), &meta).await {
        if object.status() != ObjectStatus::AbsentPendingRetry {
            return Err(e.to_string());
        }
        println!("{} {} '{}' - {}", "✗".red(), type_name, id, e);
        return Err(format!("object is {}; run delete again to retry", object.status()));
    }
    println!("{} {} '{}' deleted", "✓".green(), type_name, id);
    Ok(())
}

async fn run_data(config: Option<&Path>, type_name: &str, attrs: Option<&Path>) -> Result<(), String> {
    let handler = registry().get_data_source(type_name).map_err(|e| e.to_string())?;
    let schema = handler.schema();
    let mut data = ResourceData::new(&schema).with_attributes(optional_attributes(&schema, attrs)?);
    let meta = provider_meta(config)?;

    handler.read(&meta, &mut data).await.map_err(|e| e.to_string())?;
    print_state(&data)
}

/// HTTP clients from the settings file and environment, cancelled on Ctrl-C
fn provider_meta(config: Option<&Path>) -> Result<ProviderMeta, String> {
    let attributes = match config {
        Some(path) => config_attributes(path)?,
        None => HashMap::new(),
    };
    let config = ProviderConfig::from_attributes(&attributes).map_err(|e| e.to_string())?;
    log::debug!("Using API host {}", config.host);
    let meta = ProviderMeta::from_config(&config).map_err(|e| e.to_string())?;
    Ok(meta.with_cancellation(cancel_on_ctrl_c()))
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let signalled = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("{}", "Interrupted; skipping remaining API calls.".yellow());
            signalled.cancel();
        }
    });
    token
}

fn read_json_object(path: &Path) -> Result<serde_json::Map<String, serde_json::Value>, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    match serde_json::from_str(&content) {
        Ok(serde_json::Value::Object(object)) => Ok(object),
        Ok(_) => Err(format!("{}: expected a JSON object", path.display())),
        Err(e) => Err(format!("Failed to parse {}: {}", path.display(), e)),
    }
}

fn config_attributes(path: &Path) -> Result<HashMap<String, Value>, String> {
    let mut attributes = HashMap::new();
    for (key, json) in read_json_object(path)? {
        let value = Value::from_json(&json)
            .map_err(|e| format!("{}: invalid setting '{}': {}", path.display(), key, e))?;
        if let Some(value) = value {
            attributes.insert(key, value);
        }
    }
    Ok(attributes)
}

fn optional_attributes(schema: &ResourceSchema, path: Option<&Path>) -> Result<HashMap<String, Value>, String> {
    match path {
        Some(path) => read_attributes(schema, path),
        None => Ok(HashMap::new()),
    }
}

fn read_attributes(schema: &ResourceSchema, path: &Path) -> Result<HashMap<String, Value>, String> {
    to_attributes(schema, read_json_object(path)?)
}

/// Convert a JSON object into attributes of `schema`
///
/// JSON document attributes may be given inline as objects or arrays.
fn to_attributes(
    schema: &ResourceSchema,
    object: serde_json::Map<String, serde_json::Value>,
) -> Result<HashMap<String, Value>, String> {
    let mut attributes = HashMap::new();
    for (name, json) in object {
        let Some(attr) = schema.attributes.get(&name) else {
            return Err(format!("{}: unknown attribute '{}'", schema.resource_type, name));
        };
        if json.is_null() {
            continue;
        }
        let value = if is_document(&attr.attr_type) && !json.is_string() {
            Value::String(json.to_string())
        } else {
            Value::from_json(&json)
                .ok()
                .flatten()
                .ok_or_else(|| format!("{}: unsupported value for '{}': {}", schema.resource_type, name, json))?
        };
        attributes.insert(name, value);
    }
    schema.apply_defaults(&mut attributes);
    Ok(attributes)
}

fn is_document(attr_type: &AttributeType) -> bool {
    match attr_type {
        AttributeType::Json => true,
        AttributeType::Custom { base, .. } => is_document(base),
        _ => false,
    }
}

fn print_state(data: &ResourceData) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&data.to_json()).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}
