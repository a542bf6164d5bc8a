use clap::Subcommand;
use focusspot_core::{
    Config, LocationDetails, Session, SessionStatus, SessionStore, ValidationError,
};

use super::{parse_timestamp, print_json};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record a session
    Add {
        /// Session title
        #[arg(long)]
        title: String,
        /// Start time (RFC 3339 or YYYY-MM-DDTHH:MM, UTC)
        #[arg(long)]
        start: String,
        /// Planned minutes
        #[arg(long)]
        planned: u32,
        /// Minutes actually worked
        #[arg(long)]
        actual: Option<u32>,
        /// planned, active, completed or cancelled
        /// (defaults to completed when --actual is given)
        #[arg(long)]
        status: Option<SessionStatus>,
        /// Self rating, 1-5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,
        /// Focus level, 1-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        focus: Option<u8>,
        /// Energy level, 1-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        energy: Option<u8>,
        /// Mood, 1-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        mood: Option<u8>,
        #[arg(long)]
        distractions: Option<u32>,
        /// Location name
        #[arg(long)]
        location: Option<String>,
        /// Location category (library, coffee shop, ...)
        #[arg(long, requires = "location")]
        location_type: Option<String>,
        /// Tag, repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List recent sessions, newest first
    List {
        #[arg(long, default_value = "20")]
        limit: u32,
        #[arg(long, default_value = "0")]
        offset: u32,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SessionStore::open(&config)?;

    match action {
        SessionAction::Add {
            title,
            start,
            planned,
            actual,
            status,
            rating,
            focus,
            energy,
            mood,
            distractions,
            location,
            location_type,
            tags,
            notes,
        } => {
            let start_time = parse_timestamp(&start)?;
            let status = resolve_status(actual, status)?;
            let mut session = Session::planned(&config.user_id, title, start_time, planned);
            if let Some(minutes) = actual {
                session = session.completed(minutes);
            }
            session.status = status;
            session.rating = rating;
            session.focus = focus;
            session.energy = energy;
            session.mood = mood;
            session.distractions = distractions;
            session.location =
                location.map(|name| LocationDetails::new(name, location_type.unwrap_or_default()));
            session.tags = tags;
            session.notes = notes;

            store.insert(&session)?;
            eprintln!("Session recorded: {}", session.id);
            print_json(&session)?;
        }
        SessionAction::List { limit, offset } => {
            let sessions = store.list(&config.user_id, limit, offset)?;
            print_json(&sessions)?;
        }
    }
    Ok(())
}

/// Final status for a new session. An actual duration implies, and is
/// only accepted with, `completed`.
fn resolve_status(
    actual: Option<u32>,
    status: Option<SessionStatus>,
) -> Result<SessionStatus, ValidationError> {
    match (actual, status) {
        (Some(_), None | Some(SessionStatus::Completed)) => Ok(SessionStatus::Completed),
        (Some(_), Some(other)) => Err(ValidationError::InvalidValue {
            field: "actual".to_string(),
            message: format!("only completed sessions have an actual duration, not {other}"),
        }),
        (None, status) => Ok(status.unwrap_or(SessionStatus::Planned)),
    }
}
