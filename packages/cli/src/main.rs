#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the Wildfire Resilience Index toolkit.
//!
//! Every subcommand goes through the same library code the dashboard uses,
//! so colors printed here match what the map, legend and flower chart
//! show for the same score and gradient configuration.

mod region;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use wri_color::{NEUTRAL_GRAY, format_percent};
use wri_domain::breadcrumb::breadcrumb_path;
use wri_domain::gradient_io::{export_json, import_json};
use wri_domain::{ColorScheme, DomainRegistry, IndicatorIndex, breadcrumb};
use wri_domain_models::{DomainId, GradientConfig, GradientKey};
use wri_flower::{FlowerChart, FlowerEvent, FlowerGeometry, build_scene};

#[derive(Parser)]
#[command(name = "wri", about = "Wildfire Resilience Index score coloring toolkit")]
struct Cli {
    /// Gradient configuration JSON (as produced by `gradient export`).
    /// Defaults to the built-in gradients.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the display color for a score
    Color {
        /// Domain id (e.g. "water") or "overall"
        key: GradientKey,
        /// Score on the 0-1 or 0-100 scale. Omit for the no-data color.
        score: Option<f64>,
    },
    /// Print the map legend for a domain
    Legend {
        /// Domain id (e.g. "water") or "overall"
        key: GradientKey,
        /// Number of color stops
        #[arg(long, default_value = "5")]
        steps: usize,
    },
    /// Search the indicator hierarchy; every word must match
    Search {
        /// Search words
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print the breadcrumb path of a metric
    Breadcrumb {
        /// Domain id (e.g. "water")
        domain: String,
        /// Metric id (e.g. "`resilience_recovery_metric_3`")
        metric: String,
    },
    /// Fetch a metric from the data API and show one region as the map would
    Region {
        /// Domain id (e.g. "water") or "overall"
        key: GradientKey,
        /// Metric id, also the value column of the metric table
        metric: String,
        /// Geo ID of the region (e.g. "06037101100")
        geo_id: String,
        /// Data API base URL (overrides `WRI_API_BASE_URL`)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Render the flower chart as SVG
    Flower {
        /// Domain scores as `domain=score` (e.g. `water=82`)
        #[arg(long = "score", value_parser = parse_domain_score)]
        scores: Vec<(DomainId, f64)>,
        /// Render as if this domain's petal were hovered
        #[arg(long)]
        hover: Option<DomainId>,
        /// Width and height in pixels
        #[arg(long, default_value = "320")]
        size: u32,
    },
    /// Export or validate gradient configurations
    Gradient {
        #[command(subcommand)]
        command: GradientCommands,
    },
}

#[derive(Subcommand)]
enum GradientCommands {
    /// Print the active configuration, defaults filled in, as JSON
    Export {
        /// Configuration name stored in the document
        #[arg(long, default_value = "default")]
        name: String,
    },
    /// Validate a configuration document and summarize it
    Check {
        /// Path to the JSON document
        path: PathBuf,
    },
}

fn parse_domain_score(arg: &str) -> Result<(DomainId, f64), String> {
    let (domain, score) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected DOMAIN=SCORE, got '{arg}'"))?;
    let domain = domain
        .trim()
        .parse::<DomainId>()
        .map_err(|_| format!("unknown domain '{domain}'"))?;
    let score = score
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid score '{score}': {e}"))?;
    Ok((domain, score))
}

fn load_config(path: Option<&Path>) -> Result<GradientConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(GradientConfig::new());
    };

    let imported = import_json(&std::fs::read_to_string(path)?)?;
    log::info!(
        "Loaded gradient configuration '{}' ({} entries) from {}",
        imported.name,
        imported.config.len(),
        path.display()
    );
    Ok(imported.config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let registry = DomainRegistry::builtin();
    let config = load_config(cli.config.as_deref())?;
    let scheme = ColorScheme::new(registry, &config);

    match cli.command {
        Commands::Color { key, score } => {
            let color = scheme.score_color(key, score);
            let value = score.map_or_else(|| "no data".to_owned(), format_percent);
            println!("{color} {value}");
        }
        Commands::Legend { key, steps } => {
            let legend = scheme
                .legend(key, steps)
                .ok_or_else(|| format!("no gradient for '{key}'"))?;
            println!("{key}");
            for stop in &legend.stops {
                println!("  {:>7.2}  {}", stop.value, stop.color);
            }
            println!("  {:>7}  {}", "no data", legend.no_data);
        }
        Commands::Search { words } => {
            let index = IndicatorIndex::build(registry);
            let results = index.search(&words.join(" "));
            for entry in &results {
                println!("{:<10} {}", entry.kind, entry.path);
            }
            log::info!("{} matches", results.len());
        }
        Commands::Breadcrumb { domain, metric } => {
            println!("{}", breadcrumb_path(&breadcrumb(registry, &metric, &domain)));
        }
        Commands::Region {
            key,
            metric,
            geo_id,
            base_url,
        } => {
            let report = region::show(scheme, key, &metric, &geo_id, base_url.as_deref()).await?;
            println!("{report}");
        }
        Commands::Flower {
            scores,
            hover,
            size,
        } => {
            let scores: BTreeMap<DomainId, f64> = scores.into_iter().collect();
            let mut chart =
                FlowerChart::new(build_scene(&scores, scheme, FlowerGeometry::default()));
            if let Some(domain) = hover {
                chart.apply(FlowerEvent::Hover(domain));
            }
            print!("{}", wri_flower::svg::render(&chart, size));
        }
        Commands::Gradient { command } => match command {
            GradientCommands::Export { name } => {
                let resolved = scheme.resolved_config();
                println!("{}", export_json(&resolved, &name, chrono::Utc::now())?);
            }
            GradientCommands::Check { path } => {
                let imported = import_json(&std::fs::read_to_string(&path)?)?;
                println!(
                    "'{}' exported {}",
                    imported.name,
                    imported.timestamp.to_rfc3339()
                );
                for (key, entry) in imported.config.iter() {
                    let fallback = [entry.min_color, entry.max_color].contains(&NEUTRAL_GRAY);
                    println!(
                        "  {key:<16} {} {} -> {} {}{}",
                        entry.min_value,
                        entry.min_color,
                        entry.max_value,
                        entry.max_color,
                        if fallback { "  (check colors)" } else { "" }
                    );
                }
                for key in &imported.skipped_keys {
                    println!("  {key:<16} skipped: unknown key");
                }
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_domain_scores() {
        assert_eq!(
            parse_domain_score("water=82.5"),
            Ok((DomainId::Water, 82.5))
        );
        assert_eq!(
            parse_domain_score(" air_quality = 0.4 "),
            Ok((DomainId::AirQuality, 0.4))
        );
        assert!(parse_domain_score("water").is_err());
        assert!(parse_domain_score("lava=1").is_err());
        assert!(parse_domain_score("water=high").is_err());
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["wri", "color", "overall", "0.5"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Color {
                key: GradientKey::Overall,
                score: Some(_)
            }
        ));

        let cli = Cli::try_parse_from([
            "wri", "flower", "--score", "water=80", "--score", "species=0.6", "--hover", "water",
        ])
        .unwrap();
        let Commands::Flower { scores, hover, .. } = cli.command else {
            panic!("expected flower");
        };
        assert_eq!(scores.len(), 2);
        assert_eq!(hover, Some(DomainId::Water));

        assert!(Cli::try_parse_from(["wri", "color", "lava", "0.5"]).is_err());
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert!(load_config(None).unwrap().is_empty());
        assert!(load_config(Some(Path::new("/nonexistent/gradients.json"))).is_err());
    }
}
