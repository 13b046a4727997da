use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use tracing::{debug, info};

use variant_provider::config::{ProviderConfig, config_path, log_path};
use variant_provider::logging::init_logging;
use variant_provider::plugins::{VariantPlugin, create_default_plugins, fictional_hw};
use variant_provider::variant::types::{Resolution, VariantProperty};

#[derive(Parser)]
#[command(name = "variant-provider")]
#[command(version, about = "Report supported variant properties for this system")]
struct Cli {
    /// Configuration file (defaults to $XDG_CONFIG_HOME/variant-provider/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to the default log file instead of stderr
    #[arg(long, global = true)]
    log_to_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every feature and value the plugins can emit
    Catalog {
        /// Only this namespace
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Rank requested properties (`namespace :: feature :: value`) by support
    Resolve {
        /// Send every property to this namespace's plugin
        #[arg(long)]
        namespace: Option<String>,

        #[arg(required = true)]
        properties: Vec<VariantProperty>,
    },
    /// Resolve the sample `fictional_hw` request
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ProviderConfig::load(path)?,
        None => ProviderConfig::load_or_default(&config_path())?,
    };

    let mut log_config = config.log.clone();
    if cli.log_to_file && log_config.file.is_none() {
        log_config.file = Some(log_path());
    }
    let _guard = init_logging(&log_config).context("Failed to initialize logging")?;

    let plugins = config.apply(create_default_plugins())?;
    info!("Loaded plugins: {:?}", plugins.keys().collect::<Vec<_>>());

    let output = match cli.command {
        Command::Catalog { namespace } => catalog(&plugins, namespace.as_deref())?,
        Command::Resolve {
            namespace,
            properties,
        } => resolve(&plugins, namespace.as_deref(), &properties)?,
        Command::Demo => resolve(
            &plugins,
            Some(fictional_hw::NAMESPACE),
            &fictional_hw::demo_properties(),
        )?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn find_plugin<'a>(
    plugins: &'a IndexMap<String, VariantPlugin>,
    namespace: &str,
) -> anyhow::Result<&'a VariantPlugin> {
    match plugins.get(namespace) {
        Some(plugin) => Ok(plugin),
        None => bail!("No plugin for namespace '{}'", namespace),
    }
}

fn catalog(
    plugins: &IndexMap<String, VariantPlugin>,
    namespace: Option<&str>,
) -> anyhow::Result<serde_json::Value> {
    let selected: Vec<&VariantPlugin> = match namespace {
        Some(namespace) => vec![find_plugin(plugins, namespace)?],
        None => plugins.values().collect(),
    };

    let catalogs: IndexMap<&str, _> = selected
        .into_iter()
        .map(|plugin| (plugin.namespace(), plugin.catalog()))
        .collect();

    Ok(serde_json::to_value(catalogs)?)
}

fn resolve(
    plugins: &IndexMap<String, VariantPlugin>,
    namespace: Option<&str>,
    properties: &[VariantProperty],
) -> anyhow::Result<serde_json::Value> {
    let mut groups: IndexMap<&str, Vec<&VariantProperty>> = IndexMap::new();
    match namespace {
        Some(namespace) => {
            groups.insert(namespace, properties.iter().collect());
        }
        None => {
            for property in properties {
                groups
                    .entry(property.namespace.as_str())
                    .or_default()
                    .push(property);
            }
        }
    }

    let mut resolutions: IndexMap<&str, Resolution> = IndexMap::new();
    for (namespace, group) in groups {
        let plugin = find_plugin(plugins, namespace)?;
        let resolution = plugin
            .supported_configs(group.iter().copied())
            .with_context(|| format!("Failed to resolve namespace '{}'", namespace))?;

        for diagnostic in &resolution.diagnostics {
            debug!("{}", diagnostic);
        }
        resolutions.insert(namespace, resolution);
    }

    Ok(serde_json::to_value(resolutions)?)
}
