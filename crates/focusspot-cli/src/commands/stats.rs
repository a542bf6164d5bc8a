use chrono::{Duration, Utc};
use clap::Args;
use focusspot_core::{
    AnalyticsService, Config, DateRange, ProductivityStatsReport, SessionStore,
};

#[derive(Args)]
pub struct StatsArgs {
    /// First day, YYYY-MM-DD (defaults to the configured window)
    #[arg(long)]
    start: Option<String>,
    /// Last day, inclusive, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    end: Option<String>,
    /// Print raw stats instead of the display report
    #[arg(long)]
    raw: bool,
}

pub fn run(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SessionStore::open(&config)?;
    let now = Utc::now();

    let range = match (args.start, args.end) {
        (None, None) => None,
        (start, end) => {
            let end = end.unwrap_or_else(|| now.format("%Y-%m-%d").to_string());
            let start = start.unwrap_or_else(|| {
                let days = i64::from(config.stats.default_window_days);
                (now - Duration::days(days)).format("%Y-%m-%d").to_string()
            });
            Some(DateRange::parse(&start, &end)?)
        }
    };

    let stats = AnalyticsService::new(&store, &config).stats(&config.user_id, range, now)?;
    if args.raw {
        super::print_json(&stats)
    } else {
        super::print_json(&ProductivityStatsReport::from(&stats))
    }
}
