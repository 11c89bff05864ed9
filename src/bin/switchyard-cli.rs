use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use switchyard::app::Input;
use switchyard::config::{load_config, RouteConfig};
use switchyard::routing::CompiledPattern;

#[derive(Parser)]
#[command(name = "switchyard-cli")]
#[command(about = "Offline tools for the switchyard router", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route one request through the demo application and print the outcome
    Resolve {
        #[arg(short, long, default_value = "GET")]
        method: String,

        #[arg(short, long)]
        path: String,

        /// POST field as key=value (repeatable)
        #[arg(long = "post", value_parser = parse_pair)]
        post: Vec<(String, String)>,

        /// Query field as key=value (repeatable)
        #[arg(long = "query", value_parser = parse_pair)]
        query: Vec<(String, String)>,

        /// Config file whose routes are added ahead of the catch-all
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a config file and the route table it produces
    Check { config: PathBuf },
    /// Compile a route description and optionally match a URI against it
    Pattern {
        description: String,

        #[arg(long)]
        against: Option<String>,
    },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            method,
            path,
            post,
            query,
            config,
        } => {
            let routes: Vec<RouteConfig> = match config {
                Some(path) => load_config(&path)?.routes,
                None => Vec::new(),
            };
            let app = switchyard::demo::app(&routes)?;

            let mut input = Input::default();
            for (key, value) in query {
                input = input.with_query(key, value);
            }
            for (key, value) in post {
                input.set_post(key, value);
            }

            let resolution = app.handle(&method, &path, &input)?;
            print_json(&serde_json::to_value(resolution)?)?;
        }
        Commands::Check { config } => {
            let config = load_config(&config)?;
            let app = switchyard::demo::app(&config.routes)?;
            println!(
                "OK: {} config routes, {} table entries, {} patterns",
                config.routes.len(),
                app.table().len(),
                app.patterns().len()
            );
        }
        Commands::Pattern {
            description,
            against,
        } => {
            let pattern = CompiledPattern::compile(&description)?;
            let mut report = json!({
                "description": pattern.description(),
                "regex": pattern.as_regex(),
                "captures": pattern.captures(),
            });
            if let Some(uri) = against {
                report["match"] = match pattern.matches(&uri) {
                    Some(captured) => json!({
                        "args": captured.args,
                        "named": captured
                            .named
                            .into_iter()
                            .map(|(name, value)| (name, json!(value)))
                            .collect::<serde_json::Map<String, Value>>(),
                    }),
                    None => Value::Null,
                };
            }
            print_json(&report)?;
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
