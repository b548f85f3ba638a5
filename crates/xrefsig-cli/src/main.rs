//! xrefsig command line tool.
//!
//! Provides the `xrefsig` binary. `signatures` loads serialized semantic
//! models (one JSON document per compilation unit), indexes the units one
//! after another with a fresh engine each, and prints one JSON document per
//! unit to stdout.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xrefsig_core::SemanticModel;
use xrefsig_engine::{index_unit, EngineConfig, UnitIndex};

/// Canonical signatures for cross-reference graphs.
#[derive(Parser)]
#[command(name = "xrefsig", about = "Canonical signatures for cross-reference graphs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the signature of every declaration and reference site.
    Signatures {
        /// Semantic model files, one compilation unit each.
        #[arg(required = true)]
        models: Vec<PathBuf>,

        /// Engine configuration file (JSON).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Qualified name of the universal base class. Overrides the
        /// configuration file.
        #[arg(long, env = "XREFSIG_UNIVERSAL_BASE")]
        universal_base: Option<String>,

        /// Pretty-print the output.
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Signatures {
            models,
            config,
            universal_base,
            pretty,
        } => {
            let exit_code = run_signatures(&models, config.as_deref(), universal_base, pretty);
            process::exit(exit_code);
        }
    }
}

/// Execute the signatures subcommand.
///
/// Returns exit code: 0 = success, 3 = I/O or decoding error.
fn run_signatures(
    models: &[PathBuf],
    config_path: Option<&Path>,
    universal_base: Option<String>,
    pretty: bool,
) -> i32 {
    let config = match load_config(config_path, universal_base) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 3;
        }
    };

    // Units are indexed strictly one after another.
    for path in models {
        let model = match load_model(path) {
            Ok(model) => model,
            Err(msg) => {
                eprintln!("Error: {}", msg);
                return 3;
            }
        };
        let index = index_unit(&model, &config);
        tracing::info!(
            unit = %index.unit,
            records = index.records.len(),
            skipped = index.skipped,
            "indexed"
        );
        println!("{}", render(&index, pretty));
    }
    0
}

/// Builds the engine configuration: defaults, then the file, then the flag.
fn load_config(
    path: Option<&Path>,
    universal_base: Option<String>,
) -> Result<EngineConfig, String> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                format!("failed to read config '{}': {}", path.display(), e)
            })?;
            serde_json::from_str(&text).map_err(|e| {
                format!("failed to parse config '{}': {}", path.display(), e)
            })?
        }
        None => EngineConfig::default(),
    };
    if let Some(name) = universal_base {
        config.universal_base = name;
    }
    Ok(config)
}

fn load_model(path: &Path) -> Result<SemanticModel, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read model '{}': {}", path.display(), e))?;
    decode_model(&text).map_err(|e| format!("failed to decode model '{}': {}", path.display(), e))
}

fn decode_model(text: &str) -> Result<SemanticModel, serde_json::Error> {
    serde_json::from_str(text)
}

fn render(index: &UnitIndex, pretty: bool) -> String {
    let json = if pretty {
        serde_json::to_string_pretty(index)
    } else {
        serde_json::to_string(index)
    };
    json.unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize index: {}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use xrefsig_core::TypeDeclKind;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flag_overrides_default_base() {
        let config = load_config(None, Some("kotlin.Any".into())).unwrap();
        assert_eq!(config.universal_base, "kotlin.Any");
        assert_eq!(load_config(None, None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn missing_files_are_reported() {
        let missing = Path::new("/nonexistent/xrefsig/model.json");
        let err = load_model(missing).unwrap_err();
        assert!(err.starts_with("failed to read model"));
        assert!(load_config(Some(missing), None).is_err());
        assert_eq!(run_signatures(&[missing.to_path_buf()], None, None, false), 3);
    }

    #[test]
    fn decoded_model_is_indexed() {
        let mut model = SemanticModel::new("p/C.java");
        let pkg = model.add_package("p");
        model.add_type("C", pkg, TypeDeclKind::Class).unwrap();
        let text = serde_json::to_string(&model).unwrap();

        let decoded = decode_model(&text).unwrap();
        let index = index_unit(&decoded, &EngineConfig::default());
        let out: serde_json::Value = serde_json::from_str(&render(&index, false)).unwrap();
        assert_eq!(out["unit"], "p/C.java");
        assert_eq!(out["records"][1]["signature"], "p.C");
        assert!(decode_model("{\"unit\": 3}").is_err());
    }
}
