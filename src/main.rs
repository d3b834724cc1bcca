//! Demo binary: run one weather-risk analysis and print the dashboard
//! cards as text.
//!
//! Usage: climascope <lat> <lon> <start-date> [end-date] [--years N] [--offline]

use anyhow::{Context, Result, bail};
use climascope::{
    AnalysisParams, AnalysisResult, ClimascopeConfig, Coordinate, WeatherApiClient, risk, sample,
    trend,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct CliArgs {
    lat: f64,
    lon: f64,
    start_date: String,
    end_date: Option<String>,
    years: u32,
    offline: bool,
}

fn parse_args(config: &ClimascopeConfig) -> Result<CliArgs> {
    let mut positional = Vec::new();
    let mut years = config.analysis.default_trend_years;
    let mut offline = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--offline" => offline = true,
            "--years" => {
                let value = args.next().context("--years needs a value")?;
                years = value.parse().context("--years must be a number")?;
            }
            other => positional.push(other.to_string()),
        }
    }

    if positional.len() < 3 {
        bail!(
            "usage: climascope <lat> <lon> <start-date> [end-date] [--years N] [--offline]"
        );
    }

    Ok(CliArgs {
        lat: positional[0].parse().context("latitude must be a number")?,
        lon: positional[1].parse().context("longitude must be a number")?,
        start_date: positional[2].clone(),
        end_date: positional.get(3).cloned(),
        years,
        offline,
    })
}

fn print_result(result: &AnalysisResult, config: &ClimascopeConfig) {
    let assessment = risk::assess(&result.summary, &config.thresholds);

    println!("Weather risk analysis for {}", result.location.name);
    println!();
    println!(
        "  Max temperature   {:>6} {:<5} risk: {}",
        result.summary.max_temperature.avg_value,
        result.summary.max_temperature.unit,
        assessment.max_temperature
    );
    println!(
        "  Precipitation     {:>6} {:<5} risk: {}",
        result.summary.precipitation.probability,
        result.summary.precipitation.unit,
        assessment.precipitation
    );
    println!(
        "  Wind speed        {:>6} {:<5} risk: {}",
        result.summary.wind_speed.avg_value,
        result.summary.wind_speed.unit,
        assessment.wind_speed
    );
    println!(
        "  Humidity          {:>6} {:<5} risk: {}",
        result.summary.humidity.avg_value,
        result.summary.humidity.unit,
        assessment.humidity
    );
    println!(
        "  Conditions        {:<12} risk: {}",
        assessment.weather_type.weather_type.to_string(),
        assessment.comfort
    );
    println!("  {}", assessment.weather_type.description);

    println!();
    match trend::summarize(&result.trend_data) {
        Some(summary) => {
            println!(
                "Trend over {} years ({} - {}):",
                summary.count, summary.year_min, summary.year_max
            );
            println!(
                "  Avg temperature  {:.1}°C - {:.1}°C",
                summary.avg_temperature.min, summary.avg_temperature.max
            );
            println!(
                "  Max temperature  {:.1}°C - {:.1}°C",
                summary.max_temperature.min, summary.max_temperature.max
            );
            println!(
                "  Wind speed       {:.1} - {:.1} km/h",
                summary.wind_speed.min, summary.wind_speed.max
            );
            println!(
                "  Humidity         {:.1}% - {:.1}%",
                summary.humidity.min, summary.humidity.max
            );
        }
        None => println!("No trend data available."),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ClimascopeConfig::load()?;
    let args = parse_args(&config)?;

    let params = AnalysisParams::validated(
        Coordinate::new(args.lat, args.lon),
        &args.start_date,
        args.end_date.as_deref(),
        args.years,
        args.years,
        &config.analysis,
    )
    .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let result = if args.offline {
        info!("Running in offline mode with sample data");
        sample::sample_analysis(
            params.coordinate,
            params.date_range.start,
            params.trend_years,
            &config.thresholds,
        )
    } else {
        let client = WeatherApiClient::new(&config)?;
        info!("Requesting analysis from {}", client.base_url());
        client
            .analyze(&params)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))?
    };

    print_result(&result, &config);
    Ok(())
}
