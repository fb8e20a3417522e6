use anyhow::{Context, bail};
use chrono::{Days, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use tracing::warn;
use travel_core::{
    Config, Destination, ProviderConfig, ProviderId, QueryService, Ranking, SearchFilters,
    TripDraft,
    provider::{self, open_meteo},
    trip::DEFAULT_TRIP_DAYS,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "travel", version, about = "Eco-friendly travel discovery CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every destination in catalog order.
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show a single destination.
    Show {
        /// Destination id, as printed by `travel list`.
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Filter destinations by name or country and rank them by preference.
    Search(SearchArgs),

    /// Air-quality and pollen forecast for a destination.
    Forecast {
        id: String,

        /// Provider short name, e.g. "simulated" or "open-meteo"; defaults to the configured one.
        #[arg(long)]
        provider: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Plan a trip using a destination's sustainable options.
    Plan(PlanArgs),

    /// Tips for more sustainable travel.
    Tips,

    /// Configure settings for a specific forecast provider.
    Configure {
        /// Provider short name, e.g. "simulated" or "open-meteo".
        provider: String,
    },
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// City or country to look for (case-insensitive substring).
    #[arg(long, short, default_value = "")]
    pub destination: String,

    /// Trip start date (YYYY-MM-DD). Recorded only.
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Trip end date (YYYY-MM-DD). Recorded only.
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Number of travelers. Recorded only.
    #[arg(long, default_value_t = 2)]
    pub travelers: u32,

    /// Air quality importance, 0 (off) to 10.
    #[arg(long = "air", default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub air_quality_importance: u8,

    /// Pollen sensitivity, 0 (off) to 10.
    #[arg(long = "pollen", default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub pollen_sensitivity: u8,

    /// Eco-friendly priority, 0 (off) to 10.
    #[arg(long = "eco", default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub eco_friendly_priority: u8,

    /// Ranking strategy: "cascade" or "composite"; defaults to the configured one.
    #[arg(long)]
    pub ranking: Option<Ranking>,

    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            destination: self.destination.clone(),
            start_date: self.start,
            end_date: self.end,
            travelers: self.travelers,
            air_quality_importance: self.air_quality_importance,
            pollen_sensitivity: self.pollen_sensitivity,
            eco_friendly_priority: self.eco_friendly_priority,
        }
    }
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    pub id: String,

    /// First day of the trip; defaults to today.
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the trip; defaults to a week after the start.
    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[arg(long, default_value_t = 2)]
    pub travelers: u32,

    /// Transportation option; defaults to the first one offered.
    #[arg(long)]
    pub transport: Option<String>,

    /// Accommodation option; defaults to the first one offered.
    #[arg(long)]
    pub accommodation: Option<String>,

    /// Activity to include; repeat for several. Defaults to the first one offered.
    #[arg(long = "activity")]
    pub activities: Vec<String>,

    #[arg(long)]
    pub json: bool,
}

impl Command {
    /// Commands that can run without a readable config file.
    fn tolerates_broken_config(&self) -> bool {
        matches!(self, Command::Tips | Command::Configure { .. })
    }
}

/// `tips` and `configure` fall back to defaults when the config file cannot
/// be loaded; `configure` then overwrites it. Every other command fails.
pub fn resolve_config(command: &Command, loaded: anyhow::Result<Config>) -> anyhow::Result<Config> {
    match loaded {
        Ok(config) => Ok(config),
        Err(err) if command.tolerates_broken_config() => {
            warn!("ignoring unreadable configuration: {err:#}");
            Ok(Config::default())
        }
        Err(err) => Err(err),
    }
}

impl Cli {
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        match self.command {
            Command::List { json } => {
                let queries = query_service(&config, None)?;
                output::destinations(queries.list(), json)?;
            }
            Command::Show { id, json } => {
                let queries = query_service(&config, None)?;
                output::destination(lookup(&queries, &id)?, json)?;
            }
            Command::Search(args) => {
                let queries = query_service(&config, args.ranking)?;
                let results = queries.search(&args.filters());
                output::destinations(results, args.json)?;
            }
            Command::Forecast { id, provider: provider_name, json } => {
                let queries = query_service(&config, None)?;
                let destination = lookup(&queries, &id)?;

                let provider_id = match provider_name {
                    Some(name) => ProviderId::try_from(name.as_str())?,
                    None => config.default_provider_id()?,
                };
                let forecasts = provider::provider_from_config(provider_id, &config)?;

                let report = provider::health_report(forecasts.as_ref(), destination.coordinates)
                    .await
                    .with_context(|| format!("Failed to fetch forecast from {provider_id}"))?;

                output::health(destination, &report, json)?;
            }
            Command::Plan(args) => {
                let queries = query_service(&config, None)?;
                let destination = lookup(&queries, &args.id)?;
                let plan = plan_trip(destination, &args, Utc::now().date_naive())?;
                output::trip(&plan, args.json)?;
            }
            Command::Tips => output::tips(),
            Command::Configure { provider } => configure(config, &provider)?,
        }

        Ok(())
    }
}

fn query_service(config: &Config, ranking: Option<Ranking>) -> anyhow::Result<QueryService> {
    let catalog = config.catalog()?;
    Ok(QueryService::new(catalog).with_ranking(ranking.unwrap_or(config.ranking)))
}

fn lookup<'a>(queries: &'a QueryService, id: &str) -> anyhow::Result<&'a Destination> {
    match queries.get_by_id(id) {
        Some(destination) => Ok(destination),
        None => bail!(
            "No destination with id '{id}'.\n\
             Hint: run `travel list` to see available ids."
        ),
    }
}

fn plan_trip(
    destination: &Destination,
    args: &PlanArgs,
    today: NaiveDate,
) -> anyhow::Result<travel_core::TripPlan> {
    let mut draft = TripDraft::new(destination, today);

    let start = args.start.unwrap_or(today);
    let end = args
        .end
        .unwrap_or_else(|| start.checked_add_days(Days::new(DEFAULT_TRIP_DAYS)).unwrap_or(start));
    draft.set_dates(start, end);
    draft.set_travelers(args.travelers);

    if let Some(transport) = &args.transport {
        draft.choose_transportation(transport)?;
    }
    if let Some(accommodation) = &args.accommodation {
        draft.choose_accommodation(accommodation)?;
    }
    if !args.activities.is_empty() {
        draft.clear_activities();
        for activity in &args.activities {
            draft.toggle_activity(activity, true)?;
        }
    }

    Ok(draft.confirm()?)
}

fn configure(mut config: Config, provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let current = config.provider_config(id).cloned().unwrap_or_default();

    let settings = match id {
        ProviderId::Simulated => {
            let latency_ms = CustomType::<u64>::new("Simulated latency (ms):")
                .with_default(current.latency_ms)
                .prompt()?;
            ProviderConfig { base_url: None, latency_ms }
        }
        ProviderId::OpenMeteo => {
            let default_url = current
                .base_url
                .clone()
                .unwrap_or_else(|| open_meteo::DEFAULT_BASE_URL.to_string());
            let base_url = Text::new("Open-Meteo base URL:").with_default(&default_url).prompt()?;
            ProviderConfig { base_url: Some(base_url), latency_ms: current.latency_ms }
        }
    };

    config.upsert_provider(id, settings);

    if config.default_provider_id().ok() != Some(id) {
        let question = format!("Make {id} the default forecast provider?");
        if Confirm::new(&question).with_default(true).prompt()? {
            config.set_default_provider(id);
        }
    }

    let path = config.save()?;
    println!("Saved {id} settings to {}", path.display());

    Ok(())
}
