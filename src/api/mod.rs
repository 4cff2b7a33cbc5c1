use axum::{
    Router,
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{delete, get},
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::core::{
    ChartSeries, GrowthRule, Scenario, ScenarioInput, ScenarioResult, ScenarioSet, project,
};
use crate::storage::ScenarioStore;

const MAX_HORIZON_YEARS: u32 = 1_000;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliGrowthMode {
    None,
    FlatAnnualIncrement,
    CompoundAnnualPercent,
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum GrowthRulePayload {
    None,
    #[serde(alias = "fixed", alias = "flat", rename_all = "camelCase")]
    FlatAnnualIncrement {
        #[serde(alias = "amount")]
        amount_per_month: f64,
    },
    #[serde(alias = "percent")]
    CompoundAnnualPercent { percent: f64 },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScenarioPayload {
    principal: Option<f64>,
    #[serde(alias = "monthly")]
    monthly_contribution: Option<f64>,
    #[serde(alias = "rate")]
    annual_rate_percent: Option<f64>,
    #[serde(alias = "years")]
    horizon_years: Option<u32>,
    #[serde(alias = "increaseConfig")]
    growth_rule: Option<GrowthRulePayload>,
}

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Compound-savings projector with saved comparison scenarios"
)]
struct Cli {
    #[arg(long, help = "Starting principal")]
    principal: f64,
    #[arg(long, help = "Base monthly contribution")]
    monthly_contribution: f64,
    #[arg(long, default_value_t = 3.0, help = "Annual interest rate in percent")]
    annual_rate: f64,
    #[arg(long, default_value_t = 10, help = "Projection horizon in years")]
    years: u32,
    #[arg(
        long,
        value_enum,
        default_value_t = CliGrowthMode::None,
        help = "How the monthly contribution changes at each 12-month boundary"
    )]
    growth_mode: CliGrowthMode,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Monthly contribution increase added once per elapsed year"
    )]
    growth_amount: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual percentage increase compounded on the contribution"
    )]
    growth_percent: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    input: ScenarioInput,
    result: ScenarioResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenariosResponse {
    scenarios: Vec<Scenario>,
    headline: Option<Scenario>,
    chart: ChartSeries,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_input(cli: Cli) -> Result<ScenarioInput, String> {
    if !cli.principal.is_finite() || cli.principal <= 0.0 {
        return Err("--principal must be > 0".to_string());
    }

    if !cli.monthly_contribution.is_finite() || cli.monthly_contribution <= 0.0 {
        return Err("--monthly-contribution must be > 0".to_string());
    }

    if !cli.annual_rate.is_finite() {
        return Err("--annual-rate must be a finite percentage".to_string());
    }

    if cli.years == 0 || cli.years > MAX_HORIZON_YEARS {
        return Err(format!("--years must be between 1 and {MAX_HORIZON_YEARS}"));
    }

    if !cli.growth_amount.is_finite() {
        return Err("--growth-amount must be finite".to_string());
    }

    if !cli.growth_percent.is_finite() || cli.growth_percent <= -100.0 {
        return Err("--growth-percent must be > -100".to_string());
    }

    let growth_rule = match cli.growth_mode {
        CliGrowthMode::None => GrowthRule::None,
        CliGrowthMode::FlatAnnualIncrement => GrowthRule::FlatAnnualIncrement {
            amount_per_month: cli.growth_amount,
        },
        CliGrowthMode::CompoundAnnualPercent => GrowthRule::CompoundAnnualPercent {
            percent: cli.growth_percent,
        },
    };

    Ok(ScenarioInput {
        principal: cli.principal,
        monthly_contribution: cli.monthly_contribution,
        annual_rate_percent: cli.annual_rate,
        horizon_years: cli.years,
        growth_rule,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        principal: 100_000.0,
        monthly_contribution: 10_000.0,
        annual_rate: 3.0,
        years: 10,
        growth_mode: CliGrowthMode::None,
        growth_amount: 0.0,
        growth_percent: 0.0,
    }
}

#[cfg(test)]
fn scenario_input_from_json(json: &str) -> Result<ScenarioInput, String> {
    let payload = serde_json::from_str::<ScenarioPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    scenario_input_from_payload(payload)
}

fn scenario_input_from_payload(payload: ScenarioPayload) -> Result<ScenarioInput, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.principal {
        cli.principal = v;
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v;
    }
    if let Some(v) = payload.annual_rate_percent {
        cli.annual_rate = v;
    }
    if let Some(v) = payload.horizon_years {
        cli.years = v;
    }
    if let Some(rule) = payload.growth_rule {
        match rule {
            GrowthRulePayload::None => {
                cli.growth_mode = CliGrowthMode::None;
            }
            GrowthRulePayload::FlatAnnualIncrement { amount_per_month } => {
                cli.growth_mode = CliGrowthMode::FlatAnnualIncrement;
                cli.growth_amount = amount_per_month;
            }
            GrowthRulePayload::CompoundAnnualPercent { percent } => {
                cli.growth_mode = CliGrowthMode::CompoundAnnualPercent;
                cli.growth_percent = percent;
            }
        }
    }

    build_input(cli)
}

struct AppState {
    scenarios: ScenarioSet,
    store: Box<dyn ScenarioStore + Send + Sync>,
}

type SharedState = Arc<Mutex<AppState>>;

pub async fn run_http_server(
    port: u16,
    store: Box<dyn ScenarioStore + Send + Sync>,
) -> io::Result<()> {
    let saved = store.load()?;
    let mut scenarios = ScenarioSet::new();
    scenarios.restore(saved);
    let state: SharedState = Arc::new(Mutex::new(AppState { scenarios, store }));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route(
            "/api/scenarios",
            get(scenarios_get_handler).post(scenario_add_handler),
        )
        .route("/api/scenarios/:ordinal", delete(scenario_remove_handler))
        .fallback(not_found_handler)
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    println!("nestegg HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ScenarioPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ScenarioPayload) -> Response {
    let input = match scenario_input_from_payload(payload) {
        Ok(input) => input,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };
    let result = project(&input);
    json_response(StatusCode::OK, ProjectResponse { input, result })
}

async fn scenarios_get_handler(State(state): State<SharedState>) -> Response {
    let state = state.lock().expect("scenario state lock poisoned");
    json_response(StatusCode::OK, build_scenarios_response(&state.scenarios))
}

async fn scenario_add_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ScenarioPayload>,
) -> Response {
    let input = match scenario_input_from_payload(payload) {
        Ok(input) => input,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let mut state = state.lock().expect("scenario state lock poisoned");
    state.scenarios.add(input);
    if let Err(msg) = persist(&state) {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, &msg);
    }
    json_response(StatusCode::OK, build_scenarios_response(&state.scenarios))
}

async fn scenario_remove_handler(
    State(state): State<SharedState>,
    Path(ordinal): Path<usize>,
) -> Response {
    let mut state = state.lock().expect("scenario state lock poisoned");
    if let Err(err) = state.scenarios.remove(ordinal) {
        return error_response(StatusCode::NOT_FOUND, &err.to_string());
    }
    if let Err(msg) = persist(&state) {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, &msg);
    }
    json_response(StatusCode::OK, build_scenarios_response(&state.scenarios))
}

fn persist(state: &AppState) -> Result<(), String> {
    state
        .store
        .save(&state.scenarios.serialize())
        .map_err(|e| format!("failed to persist scenarios: {e}"))
}

fn build_scenarios_response(scenarios: &ScenarioSet) -> ScenariosResponse {
    ScenariosResponse {
        scenarios: scenarios.list().to_vec(),
        headline: scenarios.headline().cloned(),
        chart: scenarios.derive_chart_series(),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
