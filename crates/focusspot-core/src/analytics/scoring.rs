//! Per-session productivity score.

use crate::session::{Session, SessionStatus};

/// Lower bound of the score.
pub const MIN_SCORE: f64 = 0.0;
/// Upper bound of the score.
pub const MAX_SCORE: f64 = 10.0;

/// Completion ratio that must be strictly exceeded to earn the overtime bonus.
pub const OVERTIME_RATIO: f64 = 1.2;

/// Score one session in `[0, 10]`.
///
/// Starts from the 1-5 rating, adds one point for running more than 20%
/// over the plan and takes one away otherwise (finishing exactly on plan
/// included), adds up to two points for focus and subtracts up to one
/// point for distractions. Sessions that are not completed or lack a
/// rating or actual duration score `0.0`.
pub fn productivity_score(session: &Session) -> f64 {
    let (Some(actual), Some(rating)) = (session.actual_duration, session.rating) else {
        return 0.0;
    };
    if session.status != SessionStatus::Completed {
        return 0.0;
    }

    let mut score = f64::from(rating);

    if session.duration_planned > 0 {
        let ratio = f64::from(actual) / f64::from(session.duration_planned);
        if ratio > OVERTIME_RATIO {
            score += 1.0;
        } else {
            score -= 1.0;
        }
    }

    if let Some(focus) = session.focus {
        score += f64::from(focus) / 10.0 * 2.0;
    }

    if let Some(distractions) = session.distractions {
        if distractions > 0 {
            score -= (f64::from(distractions) / 10.0).min(1.0);
        }
    }

    score.clamp(MIN_SCORE, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn session(planned: u32, actual: u32, rating: u8) -> Session {
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
        Session::planned("u1", "Deep work", start, planned)
            .completed(actual)
            .with_rating(rating)
    }

    #[test]
    fn overtime_focus_and_distractions() {
        let s = session(60, 75, 4).with_focus(8).with_distractions(2);
        assert!((productivity_score(&s) - 6.4).abs() < 1e-9);
    }

    #[test]
    fn on_plan_is_penalized() {
        let s = session(50, 50, 3);
        assert_eq!(productivity_score(&s), 2.0);
    }

    #[test]
    fn ratio_of_exactly_one_point_two_is_penalized() {
        let s = session(50, 60, 3);
        assert_eq!(productivity_score(&s), 2.0);
        let s = session(50, 61, 3);
        assert_eq!(productivity_score(&s), 4.0);
    }

    #[test]
    fn distraction_penalty_is_capped() {
        let s = session(50, 50, 3).with_distractions(40);
        assert_eq!(productivity_score(&s), 1.0);
        let s = session(50, 50, 3).with_distractions(0);
        assert_eq!(productivity_score(&s), 2.0);
    }

    #[test]
    fn clamps_at_zero() {
        let s = session(50, 10, 1).with_distractions(15);
        assert_eq!(productivity_score(&s), 0.0);
    }

    #[test]
    fn unscorable_sessions_score_zero() {
        let mut no_rating = session(50, 60, 3);
        no_rating.rating = None;
        assert_eq!(productivity_score(&no_rating), 0.0);

        let mut no_actual = session(50, 60, 3);
        no_actual.actual_duration = None;
        assert_eq!(productivity_score(&no_actual), 0.0);

        let mut active = session(50, 60, 5);
        active.status = SessionStatus::Active;
        assert_eq!(productivity_score(&active), 0.0);
    }

    #[test]
    fn zero_planned_duration_skips_ratio_adjustment() {
        let s = session(0, 30, 4);
        assert_eq!(productivity_score(&s), 4.0);
    }

    proptest! {
        #[test]
        fn score_is_always_within_bounds(
            planned in 0u32..600,
            actual in 0u32..900,
            rating in 1u8..=5,
            focus in proptest::option::of(1u8..=10),
            distractions in proptest::option::of(0u32..100),
        ) {
            let mut s = session(planned, actual, rating);
            s.focus = focus;
            s.distractions = distractions;
            let score = productivity_score(&s);
            prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
        }
    }
}
