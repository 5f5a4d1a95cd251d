use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{Inputs, Lifestyle, PlanResult, Projection, SAFE_WITHDRAWAL_RATE, run_plan};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliLifestyle {
    Lean,
    Moderate,
    Fat,
}

impl From<CliLifestyle> for Lifestyle {
    fn from(value: CliLifestyle) -> Self {
        match value {
            CliLifestyle::Lean => Lifestyle::Lean,
            CliLifestyle::Moderate => Lifestyle::Moderate,
            CliLifestyle::Fat => Lifestyle::Fat,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
enum ApiLifestyle {
    Lean,
    Moderate,
    Fat,
}

impl From<ApiLifestyle> for CliLifestyle {
    fn from(value: ApiLifestyle) -> Self {
        match value {
            ApiLifestyle::Lean => CliLifestyle::Lean,
            ApiLifestyle::Moderate => CliLifestyle::Moderate,
            ApiLifestyle::Fat => CliLifestyle::Fat,
        }
    }
}

impl From<Lifestyle> for ApiLifestyle {
    fn from(value: Lifestyle) -> Self {
        match value {
            Lifestyle::Lean => ApiLifestyle::Lean,
            Lifestyle::Moderate => ApiLifestyle::Moderate,
            Lifestyle::Fat => ApiLifestyle::Fat,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fireplan", about = "Retirement strategy projections")]
struct Cli {
    #[arg(long, default_value_t = 30, help = "Current age in years")]
    current_age: u32,
    #[arg(
        long,
        default_value_t = 65,
        help = "Target retirement age for Coast FIRE and Traditional projections"
    )]
    retirement_age: u32,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Liquid net worth available today, in the base currency"
    )]
    current_savings: f64,
    #[arg(long, default_value_t = 3000.0, help = "Current monthly expenses")]
    monthly_expenses: f64,
    #[arg(long, default_value_t = 60000.0, help = "Gross annual income")]
    annual_income: f64,
    #[arg(
        long,
        default_value_t = 30.0,
        help = "Share of annual income saved, in percent"
    )]
    savings_rate: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Expected annual investment return in percent"
    )]
    expected_return: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Expected annual inflation in percent"
    )]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 67,
        help = "Age when Social Security payments begin"
    )]
    social_security_age: u32,
    #[arg(
        long,
        default_value_t = 1500.0,
        help = "Estimated monthly Social Security payment"
    )]
    estimated_social_security: f64,
    #[arg(
        long,
        default_value_t = 1500.0,
        help = "Expected monthly part-time income for Barista FIRE"
    )]
    part_time_income: f64,
    #[arg(
        long,
        value_enum,
        default_value_t = CliLifestyle::Moderate,
        help = "Desired retirement lifestyle: lean, moderate, or fat"
    )]
    desired_lifestyle: CliLifestyle,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    current_savings: Option<f64>,
    monthly_expenses: Option<f64>,
    annual_income: Option<f64>,
    savings_rate: Option<f64>,
    expected_return: Option<f64>,
    inflation_rate: Option<f64>,
    social_security_age: Option<u32>,
    estimated_social_security: Option<f64>,
    part_time_income: Option<f64>,
    desired_lifestyle: Option<ApiLifestyle>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    safe_withdrawal_rate: f64,
    desired_lifestyle: ApiLifestyle,
    projections: Vec<Projection>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<Inputs, String> {
    if cli.retirement_age < cli.current_age {
        return Err("--retirement-age must be >= --current-age".to_string());
    }

    if cli.social_security_age < cli.current_age {
        return Err("--social-security-age must be >= --current-age".to_string());
    }

    if !cli.current_savings.is_finite() || cli.current_savings < 0.0 {
        return Err("--current-savings must be >= 0".to_string());
    }

    if !cli.monthly_expenses.is_finite() || cli.monthly_expenses <= 0.0 {
        return Err("--monthly-expenses must be > 0".to_string());
    }

    if !cli.annual_income.is_finite() || cli.annual_income < 0.0 {
        return Err("--annual-income must be >= 0".to_string());
    }

    if !(0.0..=100.0).contains(&cli.savings_rate) {
        return Err("--savings-rate must be between 0 and 100".to_string());
    }

    if !cli.expected_return.is_finite() || !(-100.0..=100.0).contains(&cli.expected_return) {
        return Err("--expected-return must be between -100 and 100".to_string());
    }

    if !cli.inflation_rate.is_finite() || !(-100.0..=100.0).contains(&cli.inflation_rate) {
        return Err("--inflation-rate must be between -100 and 100".to_string());
    }

    if !cli.estimated_social_security.is_finite() || cli.estimated_social_security < 0.0 {
        return Err("--estimated-social-security must be >= 0".to_string());
    }

    if !cli.part_time_income.is_finite() || cli.part_time_income < 0.0 {
        return Err("--part-time-income must be >= 0".to_string());
    }

    Ok(Inputs {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        current_savings: cli.current_savings,
        monthly_expenses: cli.monthly_expenses,
        annual_income: cli.annual_income,
        savings_rate: cli.savings_rate,
        expected_return: cli.expected_return,
        inflation_rate: cli.inflation_rate,
        social_security_age: cli.social_security_age,
        estimated_social_security: cli.estimated_social_security,
        part_time_income: cli.part_time_income,
        desired_lifestyle: cli.desired_lifestyle.into(),
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/plan", get(plan_get_handler).post(plan_post_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("fireplan HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/plan");

    axum::serve(listener, app).await
}

pub fn run_plan_cli(args: &[String]) -> Result<String, String> {
    let cli = Cli::try_parse_from(
        std::iter::once("fireplan".to_string()).chain(args.iter().cloned()),
    )
    .map_err(|e| e.to_string())?;
    let inputs = build_inputs(cli)?;
    let response = build_plan_response(&inputs, run_plan(&inputs));
    serde_json::to_string_pretty(&response).map_err(|e| e.to_string())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn plan_get_handler(Query(payload): Query<PlanPayload>) -> Response {
    plan_handler_impl(payload)
}

async fn plan_post_handler(Json(payload): Json<PlanPayload>) -> Response {
    plan_handler_impl(payload)
}

fn plan_handler_impl(payload: PlanPayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let plan = run_plan(&inputs);
    json_response(StatusCode::OK, build_plan_response(&inputs, plan))
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

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<PlanPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload)
}

fn inputs_from_payload(payload: PlanPayload) -> Result<Inputs, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.current_savings {
        cli.current_savings = v;
    }
    if let Some(v) = payload.monthly_expenses {
        cli.monthly_expenses = v;
    }
    if let Some(v) = payload.annual_income {
        cli.annual_income = v;
    }
    if let Some(v) = payload.savings_rate {
        cli.savings_rate = v;
    }
    if let Some(v) = payload.expected_return {
        cli.expected_return = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.social_security_age {
        cli.social_security_age = v;
    }
    if let Some(v) = payload.estimated_social_security {
        cli.estimated_social_security = v;
    }
    if let Some(v) = payload.part_time_income {
        cli.part_time_income = v;
    }
    if let Some(v) = payload.desired_lifestyle {
        cli.desired_lifestyle = v.into();
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_age: 30,
        retirement_age: 65,
        current_savings: 0.0,
        monthly_expenses: 3_000.0,
        annual_income: 60_000.0,
        savings_rate: 30.0,
        expected_return: 7.0,
        inflation_rate: 3.0,
        social_security_age: 67,
        estimated_social_security: 1_500.0,
        part_time_income: 1_500.0,
        desired_lifestyle: CliLifestyle::Moderate,
    }
}

fn build_plan_response(inputs: &Inputs, plan: PlanResult) -> PlanResponse {
    PlanResponse {
        safe_withdrawal_rate: SAFE_WITHDRAWAL_RATE,
        desired_lifestyle: inputs.desired_lifestyle.into(),
        projections: plan.projections,
    }
}
