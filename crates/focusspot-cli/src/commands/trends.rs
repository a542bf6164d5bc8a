use chrono::Utc;
use clap::Args;
use focusspot_core::{AnalyticsService, Config, Period, SessionStore};

#[derive(Args)]
pub struct TrendsArgs {
    /// daily, weekly or monthly (unknown values fall back to weekly)
    #[arg(long)]
    period: Option<String>,
}

pub fn run(args: TrendsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SessionStore::open(&config)?;
    let period = args
        .period
        .as_deref()
        .map_or(config.trends.default_period, Period::parse_or_default);

    let trends = AnalyticsService::new(&store, &config).trends(&config.user_id, period, Utc::now())?;
    tracing::debug!(
        average = trends.average_productivity(),
        improving = trends.is_improving(),
        "trend summary"
    );
    super::print_json(&trends)
}
