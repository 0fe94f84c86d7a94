use analytics::format::{EM_DASH, format_compact, format_share, format_signed_delta};
use analytics::{ComparisonPoint, ExplanationReport, KpiReport, metrics};
use api_client::{ApiClient, TariffShockClient};
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::ApiOverrides;
use configuration::logging::init_tracing;
use core_types::{
    ActualTariffsQuery, CompareRequest, CompareSectorRow, Scenario, SectorRiskOutput, presets,
};
use engine::{Dashboard, DashboardState};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value, json};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// The main entry point for the TariffShock command-line dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; it only feeds TARIFFSHOCK__* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = configuration::load_config()?;
    let _log_guard = init_tracing(&settings.logging)?;
    cli.api.apply(&mut settings.api);
    tracing::debug!(api = ?settings.api, logging = ?settings.logging, "Configuration loaded.");

    // The base URL is validated here, after the command-line override.
    let client = Arc::new(TariffShockClient::from_settings(&settings.api)?);
    tracing::info!(base_url = client.base_url(), "Using risk service.");

    match cli.command {
        Commands::Health => handle_health(client).await,
        Commands::Reference => handle_reference(client).await,
        Commands::Presets => {
            handle_presets();
            Ok(())
        }
        Commands::Run(args) => handle_run(args, client).await,
        Commands::Baseline(args) => handle_baseline(args, client).await,
        Commands::Sector(args) => handle_sector(args, client).await,
        Commands::Compare(args) => handle_compare(args, client).await,
        Commands::ActualTariffs(args) => handle_actual_tariffs(args, client).await,
        Commands::TariffRates => handle_tariff_rates(client).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Explore how a tariff shock on trading partners moves sector export risk.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    api: ApiOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the risk service and show its model configuration.
    Health,
    /// List trading partners and sectors (largest exporters first).
    Reference,
    /// List the built-in scenario presets.
    Presets,
    /// Run a tariff scenario and show the KPIs, leaderboard and explanation.
    Run(RunArgs),
    /// Load the zero-tariff baseline.
    Baseline(BaselineArgs),
    /// Show partner-share profiles for one or more sectors.
    Sector(SectorArgs),
    /// Compare two scenarios on the service side.
    Compare(CompareArgs),
    /// Score sectors against the tariffs actually in force.
    ActualTariffs(ActualTariffsArgs),
    /// Show the per-sector tariff rate table.
    TariffRates,
}

#[derive(Parser)]
struct RunArgs {
    /// Start from a preset (see `presets`); other flags override its fields.
    #[arg(long)]
    preset: Option<String>,

    /// Tariff applied to every target partner, in percent.
    #[arg(long)]
    tariff: Option<f64>,

    /// Comma-separated partner identifiers (e.g. "US,EU").
    #[arg(long, value_delimiter = ',')]
    partners: Option<Vec<String>>,

    /// Comma-separated sector identifiers. Omit for all sectors.
    #[arg(long, value_delimiter = ',')]
    sectors: Option<Vec<String>>,

    /// Show the sector to explain (defaults to the biggest mover).
    #[arg(long)]
    explain: Option<String>,

    /// Also fetch the baseline and show risk next to it.
    #[arg(long)]
    vs_baseline: bool,
}

#[derive(Parser)]
struct BaselineArgs {
    /// Comma-separated sector identifiers. Omit for all sectors.
    #[arg(long, value_delimiter = ',')]
    sectors: Option<Vec<String>>,
}

#[derive(Parser)]
struct SectorArgs {
    /// Sector identifiers (HS2 codes, e.g. "72").
    #[arg(required = true)]
    ids: Vec<String>,
}

#[derive(Parser)]
struct CompareArgs {
    /// Tariff of the reference scenario, in percent.
    #[arg(long, default_value_t = 0.0)]
    baseline_tariff: f64,

    /// Tariff of the shock scenario, in percent.
    #[arg(long)]
    tariff: f64,

    /// Comma-separated partner identifiers shared by both scenarios.
    #[arg(long, value_delimiter = ',', default_value = "US")]
    partners: Vec<String>,

    /// Comma-separated sector identifiers. Omit for all sectors.
    #[arg(long, value_delimiter = ',')]
    sectors: Option<Vec<String>>,
}

#[derive(Parser)]
struct ActualTariffsArgs {
    /// Comma-separated partner identifiers.
    #[arg(long)]
    partners: Option<String>,

    /// Comma-separated sector identifiers.
    #[arg(long)]
    sectors: Option<String>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_health(client: Arc<TariffShockClient>) -> anyhow::Result<()> {
    let (health, config) = tokio::join!(client.health(), client.config());

    let health = health?;
    println!(
        "Service: {} (engine loaded: {})",
        health.status.as_deref().unwrap_or(EM_DASH),
        health
            .engine_loaded
            .map_or(EM_DASH.to_string(), |loaded| loaded.to_string())
    );

    match config {
        Ok(config) => {
            let mut table = new_table(vec!["Setting", "Value"]);
            let weight = |w: Option<f64>| w.map_or(EM_DASH.to_string(), |w| format!("{w:.2}"));
            table.add_row(vec!["Exposure weight".to_string(), weight(config.w_exposure)]);
            table.add_row(vec![
                "Concentration weight".to_string(),
                weight(config.w_concentration),
            ]);
            table.add_row(vec![
                "Max tariff".to_string(),
                config
                    .max_tariff_percent
                    .map_or(EM_DASH.to_string(), |t| format!("{t}%")),
            ]);
            for (label, value) in [
                ("Risk formula", config.risk_formula),
                ("Shock formula", config.shock_formula),
                ("ML model", config.ml_model_note),
            ] {
                table.add_row(vec![label.to_string(), value.unwrap_or_else(|| EM_DASH.to_string())]);
            }
            println!("{table}");
        }
        Err(e) => eprintln!("Service configuration unavailable: {e}"),
    }
    Ok(())
}

async fn handle_reference(client: Arc<TariffShockClient>) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(client);
    spawn_event_log(&dashboard);

    with_spinner("Loading reference data...", dashboard.initialize()).await?;
    let state = dashboard.snapshot().await;
    print_banner(&state);

    let mut partners = new_table(vec!["Partner", "Name"]);
    for partner in &state.reference.partners {
        partners.add_row(vec![partner.id.clone(), partner.name.clone()]);
    }
    println!("{partners}");
    if let Some(note) = &state.reference.partners_note {
        println!("{note}");
    }

    let mut sectors = new_table(vec!["Sector", "Name", "Total exports", "Top partner"]);
    for sector in &state.reference.sectors {
        let top_partner = match (&sector.top_partner, sector.top_partner_share) {
            (Some(partner), Some(share)) => format!("{partner} ({})", format_share(share)),
            (Some(partner), None) => partner.clone(),
            _ => EM_DASH.to_string(),
        };
        sectors.add_row(vec![
            sector.sector_id.clone(),
            sector.sector_name.clone(),
            sector
                .total_exports
                .map_or(EM_DASH.to_string(), |v| format!("${}", format_compact(v))),
            top_partner,
        ]);
    }
    println!("{sectors}");
    Ok(())
}

fn handle_presets() {
    let mut table = new_table(vec!["Id", "Name", "Tariff", "Partners", "Sectors"]);
    for preset in presets() {
        table.add_row(vec![
            preset.id.to_string(),
            preset.name.to_string(),
            format!("{}%", preset.tariff_percent),
            preset.target_partners.join(", "),
            preset
                .sector_filter
                .map_or("All".to_string(), |ids| ids.join(", ")),
        ]);
    }
    println!("{table}");
}

async fn handle_run(args: RunArgs, client: Arc<TariffShockClient>) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(client.clone());
    spawn_event_log(&dashboard);

    if let Some(id) = &args.preset {
        dashboard.apply_preset_by_id(id).await?;
    }
    dashboard
        .update_scenario(|current| {
            let mut next = match &args.partners {
                Some(partners) => current.with_partners(partners.clone()),
                None => current.clone(),
            };
            if let Some(tariff) = args.tariff {
                next.tariff_percent = tariff;
            }
            if let Some(sectors) = &args.sectors {
                next.sector_filter = Some(sectors.clone());
            }
            next
        })
        .await;

    with_spinner("Running scenario...", dashboard.run_scenario()).await?;
    if let Some(id) = args.explain {
        dashboard.select_sector(id).await;
    }
    let state = dashboard.snapshot().await;
    render_dashboard(&state);

    if args.vs_baseline
        && let Some(result) = &state.scenario_result
    {
        let sectors = state.scenario.sector_filter_for_request();
        match with_spinner("Loading baseline...", client.baseline(sectors)).await? {
            Ok(baseline) => render_comparison(&metrics::risk_comparison(result, Some(&baseline))),
            Err(e) => eprintln!("Baseline unavailable: {}", e.user_message("Failed to load baseline")),
        }
    }
    Ok(())
}

async fn handle_baseline(args: BaselineArgs, client: Arc<TariffShockClient>) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(client);
    spawn_event_log(&dashboard);

    dashboard
        .update_scenario(|current| Scenario {
            sector_filter: args.sectors.clone(),
            ..current.clone()
        })
        .await;
    with_spinner("Loading baseline...", dashboard.load_baseline()).await?;

    let state = dashboard.snapshot().await;
    render_dashboard(&state);
    if state.baseline_result.is_some() {
        render_comparison(&state.risk_comparison());
    }
    Ok(())
}

async fn handle_sector(args: SectorArgs, client: Arc<TariffShockClient>) -> anyhow::Result<()> {
    let lookups = args.ids.iter().map(|id| client.sector(id));
    let details = with_spinner("Loading sectors...", join_all(lookups)).await?;

    for (id, detail) in args.ids.iter().zip(details) {
        let detail = match detail {
            Ok(detail) => detail,
            Err(e) => {
                eprintln!("Sector {id}: {e}");
                continue;
            }
        };
        println!(
            "{} {} - exports ${}",
            detail.sector_id,
            detail.sector_name,
            format_compact(detail.total_exports)
        );
        let mut table = new_table(vec!["Partner", "Share"]);
        for share in metrics::partner_share_ranking(&detail) {
            table.add_row(vec![share.partner.clone(), share.share_display()]);
        }
        println!("{table}");
        println!(
            "Top partner: {} ({})",
            detail.top_partner,
            format_share(detail.top_partner_share)
        );
    }
    Ok(())
}

async fn handle_compare(args: CompareArgs, client: Arc<TariffShockClient>) -> anyhow::Result<()> {
    let scenario_body = |tariff: f64| -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("tariff_percent".to_string(), json!(tariff));
        body.insert("target_partners".to_string(), json!(args.partners));
        body
    };
    let request = CompareRequest {
        baseline: scenario_body(args.baseline_tariff),
        scenario: scenario_body(args.tariff),
        sector_filter: args.sectors.clone().filter(|ids| !ids.is_empty()),
    };

    let response = with_spinner("Comparing scenarios...", client.compare(&request)).await??;
    println!("{} sectors compared.", response.total_sectors);
    render_compare_rows("Comparison", &response.comparison);
    render_compare_rows("Biggest gainers", &response.biggest_gainers);
    Ok(())
}

async fn handle_actual_tariffs(
    args: ActualTariffsArgs,
    client: Arc<TariffShockClient>,
) -> anyhow::Result<()> {
    let query = ActualTariffsQuery {
        partners: args.partners,
        sectors: args.sectors,
    };
    let result = with_spinner("Scoring actual tariffs...", client.actual_tariffs(&query)).await??;
    render_leaderboard(metrics::leaderboard(&result));
    Ok(())
}

async fn handle_tariff_rates(client: Arc<TariffShockClient>) -> anyhow::Result<()> {
    let rates = client.tariff_rates().await?;
    if let Some(description) = &rates.description {
        println!("{description}");
    }
    let mut table = new_table(vec!["HS2", "Sector", "Rates", "Max"]);
    for row in &rates.sectors {
        let mut partners: Vec<_> = row.tariff_rates.iter().collect();
        partners.sort_by(|a, b| a.0.cmp(b.0));
        let rates = partners
            .iter()
            .map(|(partner, rate)| format!("{partner} {rate}%"))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            row.hs2.clone(),
            row.sector_name.clone(),
            rates,
            format!("{}%", row.max_tariff),
        ]);
    }
    println!("{table}");
    Ok(())
}

// ==============================================================================
// Rendering
// ==============================================================================

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

/// Runs `action` behind a spinner on stderr.
async fn with_spinner<F: Future>(message: &'static str, action: F) -> anyhow::Result<F::Output> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = action.await;
    spinner.finish_and_clear();
    Ok(output)
}

/// Logs every session event; the subscription ends when the dashboard is dropped.
fn spawn_event_log(dashboard: &Dashboard) {
    let mut events = dashboard.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event.to_json() {
                Ok(json) => tracing::debug!(event = %json, "Session event."),
                Err(e) => tracing::warn!(error = %e, "Unserializable session event."),
            }
        }
    });
}

fn print_banner(state: &DashboardState) {
    if let Some(message) = &state.error {
        eprintln!("Error: {message}");
    }
}

fn render_dashboard(state: &DashboardState) {
    print_banner(state);
    render_kpis(&state.kpis());
    render_leaderboard(state.leaderboard());
    render_explanation(&state.explanation());
}

fn render_kpis(report: &KpiReport) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.add_row(report.tiles().iter().map(|t| t.label));
    table.add_row(report.tiles().iter().map(|t| t.value.clone()));
    table.add_row(report.tiles().iter().map(|t| t.note.unwrap_or("")));
    println!("{table}");
}

fn render_leaderboard(sectors: &[SectorRiskOutput]) {
    if sectors.is_empty() {
        println!("No sectors scored.");
        return;
    }
    let mut table = new_table(vec![
        "Sector",
        "Name",
        "Risk",
        "Δ",
        "Top partner",
        "Dependency",
        "Affected value",
    ]);
    for row in sectors {
        let affected = match (row.affected_export_value, &row.affected_export_value_note) {
            (Some(value), _) => format!("${}", format_compact(value)),
            (None, Some(note)) => note.clone(),
            (None, None) => EM_DASH.to_string(),
        };
        table.add_row(vec![
            row.sector_id.clone(),
            row.sector_name.clone(),
            format!("{:.2}", row.risk_score),
            format_signed_delta(row.risk_delta),
            row.top_partner.clone(),
            format!("{:.1}%", row.dependency_percent),
            affected,
        ]);
    }
    println!("{table}");
}

fn render_explanation(report: &ExplanationReport) {
    println!("[{}] {}", report.status, report.sector_name);
    println!("{}", report.narrative);

    let mut drivers = new_table(vec!["Driver", "Value"]);
    for row in report.key_drivers.rows() {
        drivers.add_row(vec![row.label.to_string(), row.value]);
    }
    println!("{drivers}");
    match report.key_drivers.footnote() {
        Some(footnote) => println!("{footnote}"),
        None => println!("Illustrative values; no breakdown for this sector."),
    }

    if report.detail_loading {
        println!("Loading sector profile...");
    } else if !report.partner_shares.is_empty() {
        let mut shares = new_table(vec!["Partner", "Share"]);
        for share in &report.partner_shares {
            shares.add_row(vec![share.partner.clone(), share.share_display()]);
        }
        println!("{shares}");
    }
    if let Some(top_partner) = &report.top_partner {
        println!("{top_partner}");
    }
}

fn render_comparison(points: &[ComparisonPoint]) {
    let mut table = new_table(vec!["Sector", "Name", "Scenario risk", "Baseline risk"]);
    for point in points {
        table.add_row(vec![
            point.sector_id.clone(),
            point.sector_name.clone(),
            format!("{:.2}", point.scenario_risk),
            point
                .baseline_risk
                .map_or(EM_DASH.to_string(), |r| format!("{r:.2}")),
        ]);
    }
    println!("{table}");
}

fn render_compare_rows(title: &str, rows: &[CompareSectorRow]) {
    if rows.is_empty() {
        return;
    }
    println!("{title}");
    let mut table = new_table(vec![
        "Sector",
        "Name",
        "Baseline",
        "Scenario",
        "Change",
        "Affected value",
        "Top partner",
    ]);
    for row in rows {
        table.add_row(vec![
            row.sector_id.clone(),
            row.sector_name.clone(),
            format!("{:.2}", row.baseline_risk),
            format!("{:.2}", row.scenario_risk),
            format_signed_delta(row.risk_change),
            format!("${}", format_compact(row.affected_export_value)),
            format!("{} ({:.1}%)", row.top_partner, row.dependency_percent),
        ]);
    }
    println!("{table}");
}
