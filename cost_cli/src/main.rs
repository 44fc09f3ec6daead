//! # Cost Estimator CLI
//!
//! Terminal front end for the construction cost estimator. Collects the
//! project fields (from flags or interactive prompts), hands them to
//! `cost_core` for validation, and renders the dashboard, optimization and
//! report surfaces. Each surface builds its own view from the same project
//! specification.

mod auth;
mod render;

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cost_core::optimization::catalog;
use cost_core::pdf::render_report_pdf;
use cost_core::project::fields;
use cost_core::views::{verify_consistency, DashboardView, OptimizationView, ReportView};
use cost_core::{parse_all, CostError, EstimatorConfig, ProjectSlot};

use auth::{AuthGate, OfflineAuth};

#[derive(Parser)]
#[command(name = "cost_cli")]
#[command(about = "Construction cost estimation from basic project parameters")]
struct Cli {
    /// TOML file overriding rates and savings factors
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Account name for this session
    #[arg(long, default_value = "estimator")]
    user: String,

    /// Account password for this session
    #[arg(long, default_value = "")]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a project from command-line fields
    Estimate {
        #[command(flatten)]
        fields: ProjectFields,

        /// Which surface to show
        #[arg(long, value_enum, default_value_t = View::All)]
        view: View,

        /// Also write the printable report as PDF
        #[arg(long)]
        pdf: Option<PathBuf>,
    },

    /// Enter project fields at prompts
    Interactive {
        /// Also write the printable report as PDF
        #[arg(long)]
        pdf: Option<PathBuf>,
    },

    /// Show the effective rate table
    Rates,

    /// List the optimization suggestions
    Suggestions,
}

/// Raw project fields, passed through unparsed so that validation happens in
/// one place.
#[derive(clap::Args)]
struct ProjectFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    length: Option<String>,
    #[arg(long)]
    width: Option<String>,
    #[arg(long)]
    height: Option<String>,
    #[arg(long, default_value = "1")]
    floors: String,
    #[arg(long, default_value = "concrete")]
    material: String,
    #[arg(long)]
    labor_hours: Option<String>,
    #[arg(long)]
    location: Option<String>,
}

impl ProjectFields {
    fn into_raw(self) -> HashMap<String, String> {
        let pairs = [
            (fields::PROJECT_NAME, self.name),
            (fields::LENGTH, self.length),
            (fields::WIDTH, self.width),
            (fields::HEIGHT, self.height),
            (fields::FLOORS, Some(self.floors)),
            (fields::MATERIAL, Some(self.material)),
            (fields::LABOR_HOURS, self.labor_hours),
            (fields::LOCATION, self.location),
        ];
        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Dashboard,
    Optimization,
    Report,
    Json,
    All,
}

#[derive(Serialize)]
struct JsonBundle<'a> {
    dashboard: &'a DashboardView,
    optimization: &'a OptimizationView,
    report: &'a ReportView,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cost_cli=info,cost_core=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EstimatorConfig::load_or_default(cli.config.as_deref())?;

    let (fields, view, pdf) = match cli.command {
        Commands::Rates => {
            print!("{}", render::rate_table(&config.rates));
            return Ok(());
        }
        Commands::Suggestions => {
            for suggestion in catalog() {
                println!(
                    "{} ({} savings, impact {}, complexity {})",
                    suggestion.title, suggestion.savings, suggestion.impact, suggestion.complexity
                );
                println!("  {}", suggestion.description);
            }
            return Ok(());
        }
        Commands::Estimate { fields, view, pdf } => (Some(fields), view, pdf),
        Commands::Interactive { pdf } => (None, View::All, pdf),
    };

    let mut gate = OfflineAuth::new();
    gate.register(&cli.user, &cli.password)
        .context("sign-in required; pass --user and --password")?;
    if let Some(user) = gate.current_user() {
        tracing::info!(user, "session started");
    }

    let slot = ProjectSlot::new();
    let spec = match fields {
        Some(fields) => match parse_all(&fields.into_raw()) {
            Ok(spec) => spec,
            Err(errors) => {
                report_field_errors(&errors);
                bail!("{} invalid field(s)", errors.len());
            }
        },
        None => prompt_project()?,
    };
    slot.replace(spec);

    in_session(&mut gate, |gate| show(gate, &slot, &config, view, pdf.as_deref()))
}

/// Run `body` for the signed-in user, signing out whether or not it succeeds.
fn in_session<T>(gate: &mut dyn AuthGate, body: impl FnOnce(&dyn AuthGate) -> Result<T>) -> Result<T> {
    let outcome = body(&*gate);
    gate.logout();
    outcome
}

fn show(gate: &dyn AuthGate, slot: &ProjectSlot, config: &EstimatorConfig, view: View, pdf: Option<&Path>) -> Result<()> {
    gate.require()?;
    let spec = slot.current().context("no project has been entered")?;

    let dashboard = DashboardView::build(&spec, &config.rates)?;
    let optimization = OptimizationView::build(&spec, &config.rates, &config.savings)?;
    let report = ReportView::build(&spec, &config.rates)?;
    verify_consistency(&dashboard, &optimization, &report)?;

    match view {
        View::Dashboard => print!("{}", render::dashboard(&dashboard)),
        View::Optimization => print!("{}", render::optimization(&optimization)),
        View::Report => print!("{}", report.render_text()),
        View::Json => {
            let bundle = JsonBundle {
                dashboard: &dashboard,
                optimization: &optimization,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        View::All => {
            print!("{}", render::dashboard(&dashboard));
            println!();
            print!("{}", render::optimization(&optimization));
            println!();
            print!("{}", report.render_text());
        }
    }

    if let Some(path) = pdf {
        let bytes = render_report_pdf(&report)?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote report PDF");
    }
    Ok(())
}

fn report_field_errors(errors: &[CostError]) {
    for error in errors {
        match error.field() {
            Some(field) => eprintln!("  {}: {}", field, error.reason()),
            None => eprintln!("  {}", error),
        }
    }
}

fn prompt(label: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(d) => print!("{} [{}]: ", label, d),
        None => print!("{}: ", label),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        bail!("input closed");
    }

    let input = input.trim();
    Ok(match default {
        Some(d) if input.is_empty() => d.to_string(),
        _ => input.to_string(),
    })
}

/// Ask for every field, then re-ask only the ones that failed validation.
fn prompt_project() -> Result<cost_core::ProjectSpecification> {
    let questions: [(&str, &str, Option<&str>); 8] = [
        (fields::PROJECT_NAME, "Project name", None),
        (fields::LENGTH, "Length (meters)", None),
        (fields::WIDTH, "Width (meters)", None),
        (fields::HEIGHT, "Height (meters)", None),
        (fields::FLOORS, "Number of floors", Some("1")),
        (fields::MATERIAL, "Primary material (concrete/steel/wood/brick)", Some("concrete")),
        (fields::LABOR_HOURS, "Estimated labor hours", None),
        (fields::LOCATION, "Project location", None),
    ];

    println!("Project Details");
    println!("===============");

    let mut raw = HashMap::new();
    let mut pending: Vec<&str> = fields::ALL.to_vec();
    loop {
        for (field, label, default) in questions.iter().filter(|(f, _, _)| pending.contains(f)) {
            raw.insert(field.to_string(), prompt(label, *default)?);
        }

        match parse_all(&raw) {
            Ok(spec) => return Ok(spec),
            Err(errors) => {
                report_field_errors(&errors);
                pending = errors.iter().filter_map(CostError::field).filter_map(known_field).collect();
                if pending.is_empty() {
                    bail!("project could not be validated");
                }
            }
        }
    }
}

fn known_field(name: &str) -> Option<&'static str> {
    fields::ALL.into_iter().find(|f| *f == name)
}
