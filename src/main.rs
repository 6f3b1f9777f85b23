use skycast::config::SkycastConfig;
use skycast::pipeline::ForecastPipeline;
use skycast::render::render_forecast;
use skycast::{Result, SkycastError};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let query = env::args().skip(1).collect::<Vec<_>>().join(" ");

    match run(&query) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(query: &str) -> Result<()> {
    let config = SkycastConfig::load().map_err(|e| SkycastError::config(e.to_string()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let query = query.trim();
    if query.is_empty() {
        return Err(SkycastError::user_input(
            "usage: skycast <place query>, e.g. skycast Gary, Indiana",
        ));
    }

    let pipeline = ForecastPipeline::new(config)?;

    let places = pipeline.resolve(query)?;
    let Some(place) = places.first() else {
        return Err(SkycastError::user_input(format!(
            "no locations found for '{query}'"
        )));
    };

    if places.len() > 1 {
        println!("Found {} locations, using the first:", places.len());
        for candidate in &places {
            println!("  - {candidate}");
        }
        println!();
    }

    let bundle = pipeline.forecast(&place.place_id)?;
    print!("{}", render_forecast(place, &bundle));
    Ok(())
}
