//! `gps-calc` command line
//!
//! Thin layer over the services: parse flags into form state, call the
//! service, print a table or the JSON envelope.

pub mod output;

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use shared::error::AppResult;
use shared::models::{CalculatorState, MetricValues};

use crate::catalog::PlatformCatalog;
use crate::core::Config;
use crate::metrics::MetricsFilter;
use crate::services::{ClientService, SimulationService};
use crate::storage::SimulationStore;

use output::emit;

#[derive(Parser, Debug)]
#[command(name = "gps-calc", version)]
#[command(about = "Marketplace fee, margin and price calculator")]
pub struct Cli {
    /// Directory holding the store and logs
    #[arg(long, env = "WORK_DIR", global = true)]
    pub work_dir: Option<String>,

    /// JSON platform catalog (built-in rates when omitted)
    #[arg(long, env = "CATALOG_PATH", global = true)]
    pub catalog: Option<String>,

    /// Print the JSON response envelope instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply flag overrides on top of the environment configuration
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(dir) = &self.work_dir {
            config.work_dir = dir.clone();
        }
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        }
        config
    }
}

/// Calculator form fields; unset flags keep the form defaults
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// Unit product cost
    #[arg(long)]
    pub cost: Option<f64>,
    /// Sale price
    #[arg(long)]
    pub price: Option<f64>,
    /// Shipping cost paid by the seller
    #[arg(long)]
    pub shipping: Option<f64>,
    /// Tax rate (%)
    #[arg(long)]
    pub tax: Option<f64>,
    /// Marketing rate (%)
    #[arg(long)]
    pub marketing: Option<f64>,
    /// Other costs per sale
    #[arg(long)]
    pub other: Option<f64>,
    /// Commission override (%)
    #[arg(long)]
    pub commission: Option<f64>,
    /// Sell as a kit of N units
    #[arg(long, value_name = "UNITS")]
    pub kit: Option<u32>,
}

impl FormArgs {
    pub fn to_state(&self) -> CalculatorState {
        let defaults = CalculatorState::default();
        CalculatorState {
            cost: self.cost.or(defaults.cost),
            sale_price: self.price.or(defaults.sale_price),
            shipping_cost: self.shipping.or(defaults.shipping_cost),
            tax_rate: self.tax.or(defaults.tax_rate),
            marketing_rate: self.marketing.or(defaults.marketing_rate),
            other_costs: self.other.or(defaults.other_costs),
            custom_commission: self.commission,
            is_kit: self.kit.is_some(),
            quantity: self.kit.or(defaults.quantity),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the platform catalog
    Platforms,
    /// Fee breakdown for one platform
    Calc {
        #[arg(short, long)]
        platform: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Every platform ranked by profit
    Compare {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Break-even and target prices, projected over a volume
    Plan {
        #[arg(short, long)]
        platform: String,
        /// Target margin (%), DEFAULT_TARGET_MARGIN when omitted
        #[arg(long)]
        margin: Option<f64>,
        /// Units, DEFAULT_TARGET_VOLUME when omitted
        #[arg(long)]
        volume: Option<u32>,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Saved simulations
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
    /// Planning scenarios
    Scenario {
        #[command(subcommand)]
        action: ScenarioCommand,
    },
    /// Managed clients
    Client {
        #[command(subcommand)]
        action: ClientCommand,
    },
    /// Weekly ad metrics
    Metric {
        #[command(subcommand)]
        action: MetricCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    List,
    /// Save the form under a product name
    Save {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        platform: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Recalculate a saved simulation
    Show { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ScenarioCommand {
    List,
    Save {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        platform: String,
        /// Target units
        #[arg(long)]
        units: Option<u32>,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Change target units (omit to clear)
    SetUnits { id: String, units: Option<u32> },
    SetPlatform { id: String, platform: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    List,
    Add {
        name: String,
        /// Enabled platform ids
        #[arg(short, long = "platform")]
        platforms: Vec<String>,
        #[arg(long)]
        inactive: bool,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(short, long = "platform")]
        platforms: Vec<String>,
        #[arg(long)]
        inactive: bool,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum MetricCommand {
    /// Record one week of numbers
    Add {
        #[arg(long)]
        client: String,
        #[arg(short, long)]
        platform: String,
        /// Week start (YYYY-MM-DD)
        #[arg(long)]
        week: NaiveDate,
        #[arg(long, default_value_t = 0.0)]
        revenue: f64,
        #[arg(long, default_value_t = 0.0)]
        ad_spend: f64,
        #[arg(long, default_value_t = 0)]
        impressions: u64,
        #[arg(long, default_value_t = 0)]
        clicks: u64,
        #[arg(long, default_value_t = 0)]
        orders: u64,
    },
    Delete { id: String },
    /// Totals and client ranking for active clients
    Dashboard {
        #[arg(long)]
        client: Option<String>,
        /// Marketplace name, e.g. "Shopee"
        #[arg(long)]
        marketplace: Option<String>,
    },
    /// Latest week against the previous one
    Weekly { client: String },
}

/// Build the services for a configuration
pub fn build_services(config: &Config) -> AppResult<(SimulationService, ClientService)> {
    let catalog = match &config.catalog_path {
        Some(path) => PlatformCatalog::load(path)?,
        None => PlatformCatalog::builtin(),
    };
    let catalog = Arc::new(catalog);
    let store = SimulationStore::open(config.store_path())?;

    Ok((
        SimulationService::new(catalog.clone(), store.clone()),
        ClientService::new(catalog, store),
    ))
}

/// Execute a parsed command
pub fn run(cli: &Cli, config: &Config) -> AppResult<()> {
    let (simulations, clients) = build_services(config)?;
    let json = cli.json;

    match &cli.command {
        Command::Platforms => emit(json, simulations.catalog().rules(), |rules| {
            output::render_platforms(rules)
        }),
        Command::Calc { platform, form } => {
            let calc = simulations.calculate(platform, &form.to_state())?;
            emit(json, &calc, output::render_calculation)
        }
        Command::Compare { form } => {
            let rows = simulations.compare(&form.to_state())?;
            emit(json, &rows, |rows| output::render_comparison(rows))
        }
        Command::Plan {
            platform,
            margin,
            volume,
            form,
        } => {
            let plan = simulations.plan(
                platform,
                &form.to_state(),
                margin.unwrap_or(config.default_target_margin),
                volume.unwrap_or(config.default_target_volume),
            )?;
            emit(json, &plan, output::render_plan)
        }
        Command::History { action } => run_history(&simulations, action, json),
        Command::Scenario { action } => run_scenario(&simulations, action, json),
        Command::Client { action } => run_client(&clients, action, json),
        Command::Metric { action } => run_metric(&clients, action, json),
    }
}

fn run_history(service: &SimulationService, action: &HistoryCommand, json: bool) -> AppResult<()> {
    match action {
        HistoryCommand::List => {
            let history = service.history()?;
            emit(json, &history, |h| output::render_history(h))
        }
        HistoryCommand::Save {
            name,
            platform,
            form,
        } => {
            let saved = service.save_simulation(name, platform, &form.to_state())?;
            emit(json, &saved, |s| format!("Saved {} ({})", s.product_name, s.id))
        }
        HistoryCommand::Show { id } => {
            let saved = service.load_simulation(id)?;
            let calc = service.calculate(&saved.platform_id, &saved.inputs)?;
            emit(json, &calc, |c| {
                format!("{}\n{}", saved.product_name, output::render_calculation(c))
            })
        }
        HistoryCommand::Delete { id } => {
            service.delete_simulation(id)?;
            emit(json, id, |id| format!("Deleted {id}"))
        }
    }
}

fn run_scenario(
    service: &SimulationService,
    action: &ScenarioCommand,
    json: bool,
) -> AppResult<()> {
    match action {
        ScenarioCommand::List => {
            let scenarios = service.scenarios()?;
            emit(json, &scenarios, |s| output::render_scenarios(s))
        }
        ScenarioCommand::Save {
            name,
            platform,
            units,
            form,
        } => {
            let scenario = service.save_scenario(name, platform, &form.to_state(), *units)?;
            emit(json, &scenario, output::render_scenario)
        }
        ScenarioCommand::SetUnits { id, units } => {
            let scenario = service.set_scenario_units(id, *units)?;
            emit(json, &scenario, output::render_scenario)
        }
        ScenarioCommand::SetPlatform { id, platform } => {
            let scenario = service.set_scenario_platform(id, platform)?;
            emit(json, &scenario, output::render_scenario)
        }
        ScenarioCommand::Delete { id } => {
            service.delete_scenario(id)?;
            emit(json, id, |id| format!("Deleted {id}"))
        }
    }
}

fn run_client(service: &ClientService, action: &ClientCommand, json: bool) -> AppResult<()> {
    match action {
        ClientCommand::List => {
            let clients = service.clients()?;
            emit(json, &clients, |c| output::render_clients(c))
        }
        ClientCommand::Add {
            name,
            platforms,
            inactive,
        } => {
            let client = service.create_client(name, platforms.clone(), !inactive)?;
            emit(json, &client, |c| format!("Created {} ({})", c.name, c.id))
        }
        ClientCommand::Edit {
            id,
            name,
            platforms,
            inactive,
        } => {
            let client = service.update_client(id, name, platforms.clone(), !inactive)?;
            emit(json, &client, |c| format!("Updated {} ({})", c.name, c.id))
        }
        ClientCommand::Delete { id } => {
            service.delete_client(id)?;
            emit(json, id, |id| format!("Deleted {id}"))
        }
    }
}

fn run_metric(service: &ClientService, action: &MetricCommand, json: bool) -> AppResult<()> {
    match action {
        MetricCommand::Add {
            client,
            platform,
            week,
            revenue,
            ad_spend,
            impressions,
            clicks,
            orders,
        } => {
            let values = MetricValues {
                revenue: *revenue,
                ad_spend: *ad_spend,
                impressions: *impressions,
                clicks: *clicks,
                orders: *orders,
            };
            let metric = service.record_metric(client, platform, *week, values)?;
            emit(json, &metric, |m| format!("Recorded week {} ({})", m.week_start, m.id))
        }
        MetricCommand::Delete { id } => {
            service.delete_metric(id)?;
            emit(json, id, |id| format!("Deleted {id}"))
        }
        MetricCommand::Dashboard {
            client,
            marketplace,
        } => {
            let filter = MetricsFilter {
                client_id: client.clone(),
                marketplace: marketplace.clone(),
            };
            let dashboard = output::Dashboard {
                totals: service.overview(&filter)?,
                clients: service.summaries(&filter)?,
            };
            emit(json, &dashboard, output::render_dashboard)
        }
        MetricCommand::Weekly { client } => {
            let comparison = service.weekly_comparison(client)?;
            emit(json, &comparison, output::render_weekly)
        }
    }
}
