//! Wellstore CLI
//!
//! Operator front end for the pure parts of the store:
//! - parsing and building `eml://` addresses,
//! - parsing index ranges and listing the chunks they touch,
//! - printing the filter/update documents a request would send,
//! - inspecting schema descriptors.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wellstore_model::range::{self, compute_chunk_range};
use wellstore_model::{Address, ChunkSize, SchemaFamily};
use wellstore_schema::{describe_object_type, EntityDescriptor, PropertyKind};
use wellstore_store::{
    build_field_update, chunks_overlapping, entity_filter_in, update_timestamp_fields, StoreConfig, Update,
};

#[derive(Parser)]
#[command(name = "wellstore")]
#[command(author, version, about = "Wellstore: addresses, chunked series and store documents")]
struct Cli {
    /// JSON config file (defaults apply when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse or build hierarchical addresses.
    Uri {
        #[command(subcommand)]
        command: UriCommands,
    },

    /// Parse raw range bounds the way a query would.
    Range {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Bounds are timestamps (normalized to epoch seconds)
        #[arg(long)]
        time: bool,
        #[arg(long)]
        decreasing: bool,
        /// Report whether this index falls inside the range
        #[arg(long)]
        probe: Option<f64>,
    },

    /// List the chunks a range touches.
    Chunks {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        time: bool,
        #[arg(long)]
        decreasing: bool,
        /// Chunk width (defaults to the configured depth/time size)
        #[arg(long)]
        size: Option<i64>,
        /// Bound used for a missing start
        #[arg(long)]
        default_start: Option<f64>,
        /// Bound used for a missing end
        #[arg(long)]
        default_end: Option<f64>,
    },

    /// Print the filter (and optional update) for an address.
    Filter {
        address: String,
        /// Override the id field (otherwise from the type's descriptor)
        #[arg(long)]
        id_field: Option<String>,
        /// Field assignment `Path=value`; value is JSON if it parses
        #[arg(long = "set")]
        sets: Vec<String>,
    },

    /// Show the schema descriptor for an object type.
    Describe {
        object_type: String,
        /// Family scheme token, e.g. witsml1411
        #[arg(long, default_value = "witsml1411")]
        family: String,
    },
}

#[derive(Subcommand)]
enum UriCommands {
    /// Parse and normalize an address
    Parse { address: String },

    /// Build an address from `type=id` segments
    Build {
        #[arg(long, default_value = "witsml1411")]
        family: String,
        #[arg(required = true)]
        segments: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = StoreConfig::load_or_default(cli.config.as_deref())
        .with_context(|| format!("loading config {:?}", cli.config))?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "config loaded");

    match cli.command {
        Commands::Uri { command } => match command {
            UriCommands::Parse { address } => {
                let address = Address::parse(&address)?;
                print_address(&address, cli.json);
            }
            UriCommands::Build { family, segments } => {
                let address = build_address(&family, &segments)?;
                print_address(&address, cli.json);
            }
        },
        Commands::Range {
            start,
            end,
            time,
            decreasing,
            probe,
        } => cmd_range(start.as_deref(), end.as_deref(), time, !decreasing, probe, cli.json),
        Commands::Chunks {
            start,
            end,
            time,
            decreasing,
            size,
            default_start,
            default_end,
        } => {
            let size = match size {
                Some(size) => ChunkSize::new(size)?,
                None => config.chunk_size(time),
            };
            let raw = range::parse(start.as_deref(), end.as_deref(), time);
            let bounded = match (raw.start.or(default_start), raw.end.or(default_end)) {
                (Some(s), Some(e)) => wellstore_model::Range::new(s, e),
                _ => bail!("range is open; pass --default-start/--default-end to bound it"),
            };
            cmd_chunks(&bounded, size, !decreasing, cli.json);
        }
        Commands::Filter {
            address,
            id_field,
            sets,
        } => cmd_filter(&config, &address, id_field.as_deref(), &sets, cli.json)?,
        Commands::Describe { object_type, family } => {
            let family = parse_family(&family)?;
            let descriptor = describe_object_type(family, &object_type)
                .ok_or_else(|| anyhow!("no typed model for `{object_type}` in {family}"))?;
            print_descriptor(&descriptor, cli.json);
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_family(token: &str) -> Result<SchemaFamily> {
    let scheme = if token.starts_with("eml://") {
        token.to_string()
    } else {
        format!("eml://{token}")
    };
    SchemaFamily::from_scheme(&scheme).ok_or_else(|| {
        let known: Vec<_> = SchemaFamily::ALL.iter().map(|f| f.scheme()).collect();
        anyhow!("unknown family `{token}` (expected one of {})", known.join(", "))
    })
}

fn build_address(family: &str, segments: &[String]) -> Result<Address> {
    let mut address = Address::root(parse_family(family)?);
    for segment in segments {
        let (object_type, id) = segment
            .split_once('=')
            .ok_or_else(|| anyhow!("segment `{segment}` is not `type=id`"))?;
        address = address.append(object_type, id)?;
    }
    Ok(address)
}

fn print_address(address: &Address, as_json: bool) {
    if as_json {
        let segments: Vec<Value> = address
            .object_ids()
            .map(|(t, id)| json!({ "type": t, "id": id }))
            .collect();
        println!(
            "{}",
            json!({
                "address": address.to_string(),
                "family": address.family().scheme(),
                "segments": segments,
                "parent": address.parent().map(|p| p.to_string()),
            })
        );
        return;
    }

    println!("{}", address.to_string().bold());
    println!("  {} {}", "family".dimmed(), address.family());
    for (depth, (object_type, id)) in address.object_ids().enumerate() {
        println!("  {}{} {}", "  ".repeat(depth), object_type.cyan(), id);
    }
    if let Some(parent) = address.parent() {
        println!("  {} {}", "parent".dimmed(), parent);
    }
}

fn cmd_range(
    start: Option<&str>,
    end: Option<&str>,
    is_time: bool,
    increasing: bool,
    probe: Option<f64>,
    as_json: bool,
) {
    let parsed = range::parse(start, end, is_time);
    let probe_result = probe.map(|value| {
        json!({
            "value": value,
            "contains": parsed.contains(value, increasing),
            "starts_after": parsed.starts_after(value, increasing),
            "ends_before": parsed.ends_before(value, increasing),
        })
    });

    if as_json {
        println!(
            "{}",
            json!({ "start": parsed.start, "end": parsed.end, "probe": probe_result })
        );
        return;
    }

    let show = |bound: Option<f64>| bound.map_or_else(|| "open".yellow().to_string(), |v| v.to_string());
    println!("{} {} .. {}", "range".bold(), show(parsed.start), show(parsed.end));
    if let Some(value) = probe {
        let verdict = if parsed.contains(value, increasing) {
            "inside".green()
        } else {
            "outside".red()
        };
        println!("  {value} is {verdict}");
    }
}

fn cmd_chunks(bounded: &wellstore_model::Range<f64>, size: ChunkSize, increasing: bool, as_json: bool) {
    let chunks: Vec<_> = chunks_overlapping(bounded, size, increasing).collect();
    if as_json {
        println!("{}", json!({ "size": size.get(), "chunks": chunks }));
        return;
    }

    println!(
        "{} {} chunk(s) of {} for {} .. {}",
        "chunks".bold(),
        chunks.len(),
        size.get(),
        bounded.start,
        bounded.end
    );
    let first = compute_chunk_range(bounded.start, size, increasing);
    for chunk in &chunks {
        let marker = if Some(*chunk) == first { "*".green() } else { " ".normal() };
        println!("  {marker} [{}, {})", chunk.start, chunk.end);
    }
}

fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("assignment `{raw}` is not `Path=value`"))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((path.to_string(), value))
}

fn cmd_filter(
    config: &StoreConfig,
    address: &str,
    id_field: Option<&str>,
    sets: &[String],
    as_json: bool,
) -> Result<()> {
    let address = Address::parse(address)?;
    let descriptor = address
        .object_type()
        .and_then(|t| describe_object_type(address.family(), t));
    let id_field = id_field
        .map(str::to_string)
        .or_else(|| descriptor.as_ref().map(|d| d.id_field().to_string()))
        .unwrap_or_else(|| config.id_field.clone());

    let filter = entity_filter_in(&address, &id_field, &config.scope)?;

    let mut update: Option<Update> = None;
    for raw in sets {
        let (path, value) = parse_assignment(raw)?;
        update = Some(build_field_update(update, &path, value));
    }
    let update = match (update, &descriptor) {
        (Some(update), Some(descriptor)) => Some(update.merge(update_timestamp_fields(descriptor))),
        (update, _) => update,
    };

    let doc = json!({
        "filter": filter.to_document(),
        "update": update.as_ref().map(Update::to_document),
    });
    if as_json {
        println!("{doc}");
    } else {
        println!("{} {}", "address".bold(), address);
        println!("{} {}", "id field".bold(), id_field);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }
    Ok(())
}

fn kind_label(kind: &PropertyKind) -> String {
    match kind {
        PropertyKind::Text => "text".to_string(),
        PropertyKind::Number => "number".to_string(),
        PropertyKind::Boolean => "boolean".to_string(),
        PropertyKind::Enum(table) => format!("enum {}", table.type_name),
        PropertyKind::Complex(name) => (*name).to_string(),
        PropertyKind::Abstract(base) => format!("abstract {}", base.name),
    }
}

fn print_descriptor(descriptor: &EntityDescriptor, as_json: bool) {
    if as_json {
        let properties: Vec<Value> = descriptor
            .properties()
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "element": p.element,
                    "array": p.array,
                    "attribute": p.attribute,
                    "kind": kind_label(&p.kind),
                })
            })
            .collect();
        println!(
            "{}",
            json!({
                "type": descriptor.type_name(),
                "family": descriptor.family().scheme(),
                "id_field": descriptor.id_field(),
                "last_change_field": descriptor.last_change_field(),
                "ignored_update_fields": descriptor.ignored_update_fields(),
                "properties": properties,
            })
        );
        return;
    }

    println!(
        "{} ({}, {:?})",
        descriptor.type_name().bold(),
        descriptor.family(),
        descriptor.kind()
    );
    println!("  {} {}", "id".dimmed(), descriptor.id_field());
    if let Some(field) = descriptor.last_change_field() {
        println!("  {} {}", "stamp".dimmed(), field);
    }
    println!(
        "  {} {}",
        "ignored".dimmed(),
        descriptor.ignored_update_fields().join(", ")
    );
    for p in descriptor.properties() {
        let source = p
            .attribute
            .map(|a| format!("@{a}"))
            .or_else(|| p.element.map(str::to_string))
            .or_else(|| p.array.map(str::to_string))
            .unwrap_or_default();
        println!("    {:<20} {:<20} {}", p.name.cyan(), source, kind_label(&p.kind));
    }
}
