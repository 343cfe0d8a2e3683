//! Daily punch-sequence state machine.
//!
//! Each employee moves through `NoPunch -> ClockedIn -> ClockedOut` over a
//! UTC calendar day, and the state is derived fresh from the store's approved
//! punches on every check. Pending and denied punches never advance the
//! machine, so a punch rejected for location does not block a later correct
//! attempt the same day.

use chrono::{DateTime, Duration, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{PunchKind, PunchRecord, PunchStatus};

/// The derived punch state for one employee on one UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    /// No approved punch yet today.
    NoPunch,
    /// An approved clock-in exists; carries its timestamp.
    ClockedIn(DateTime<Utc>),
    /// Approved clock-in and clock-out both exist; terminal for the day.
    /// Carries the in and out timestamps.
    ClockedOut(DateTime<Utc>, DateTime<Utc>),
}

/// Returns the half-open UTC day window `[start, end)` containing `now`.
///
/// The engine fixes the day-boundary policy to the UTC calendar day and
/// applies it everywhere: the sequencer, the store uniqueness constraint,
/// and the history queries all slice time the same way.
pub fn utc_day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();
    (start, start + Duration::days(1))
}

/// Derives the day state from an employee's punches for the day.
///
/// Only `Approved` punches count. The slice may arrive in any order and may
/// contain pending or denied records; both are handled here rather than
/// trusting the caller's query.
pub fn derive_day_state(punches: &[PunchRecord]) -> DayState {
    let mut first_in: Option<DateTime<Utc>> = None;
    let mut first_out: Option<DateTime<Utc>> = None;

    for punch in punches {
        if punch.status != PunchStatus::Approved {
            continue;
        }
        let slot = match punch.kind {
            PunchKind::In => &mut first_in,
            PunchKind::Out => &mut first_out,
        };
        match slot {
            Some(at) if *at <= punch.created_at => {}
            _ => *slot = Some(punch.created_at),
        }
    }

    match (first_in, first_out) {
        (Some(in_at), Some(out_at)) => DayState::ClockedOut(in_at, out_at),
        (Some(in_at), None) => DayState::ClockedIn(in_at),
        // An approved out with no approved in should be unreachable given the
        // transition rules; treat the out as the blocking punch if it occurs.
        (None, Some(out_at)) => DayState::ClockedOut(out_at, out_at),
        (None, None) => DayState::NoPunch,
    }
}

/// Checks whether a punch of `kind` is a legal transition from `state`.
///
/// Returns `Ok(())` for `NoPunch --In-->` and `ClockedIn --Out-->`; every
/// other attempt is a [`EngineError::SequenceViolation`] carrying the
/// timestamp of the conflicting prior punch.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use timeclock_engine::geofence::{DayState, check_transition};
/// use timeclock_engine::models::PunchKind;
///
/// assert!(check_transition(DayState::NoPunch, PunchKind::In).is_ok());
/// assert!(check_transition(DayState::NoPunch, PunchKind::Out).is_err());
/// assert!(check_transition(DayState::ClockedIn(Utc::now()), PunchKind::Out).is_ok());
/// ```
pub fn check_transition(state: DayState, kind: PunchKind) -> EngineResult<()> {
    match (state, kind) {
        (DayState::NoPunch, PunchKind::In) => Ok(()),
        (DayState::ClockedIn(_), PunchKind::Out) => Ok(()),
        (DayState::NoPunch, PunchKind::Out) => Err(EngineError::MissingClockIn),
        (DayState::ClockedIn(in_at), PunchKind::In) => Err(EngineError::SequenceViolation {
            attempted: PunchKind::In,
            prior_kind: PunchKind::In,
            prior_at: in_at,
        }),
        (DayState::ClockedOut(in_at, out_at), kind) => Err(EngineError::SequenceViolation {
            attempted: kind,
            prior_kind: match kind {
                PunchKind::In => PunchKind::In,
                PunchKind::Out => PunchKind::Out,
            },
            prior_at: match kind {
                PunchKind::In => in_at,
                PunchKind::Out => out_at,
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, GpsReading};
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
    }

    fn punch(kind: PunchKind, status: PunchStatus, created_at: DateTime<Utc>) -> PunchRecord {
        PunchRecord::new(
            "emp_001",
            kind,
            GpsReading {
                point: GeoPoint::new(19.08934, 72.878176),
                accuracy_meters: 10.0,
                captured_at: created_at,
            },
            status,
            created_at,
        )
    }

    #[test]
    fn test_utc_day_bounds_cover_now() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 23, 59, 59).unwrap();
        let (start, end) = utc_day_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 3, 0, 0, 0).unwrap());
        assert!(start <= now && now < end);
    }

    #[test]
    fn test_no_punches_is_no_punch_state() {
        assert_eq!(derive_day_state(&[]), DayState::NoPunch);
    }

    #[test]
    fn test_pending_and_denied_punches_do_not_advance_state() {
        let punches = vec![
            punch(PunchKind::In, PunchStatus::Pending, at(8, 0)),
            punch(PunchKind::In, PunchStatus::Denied, at(8, 5)),
        ];
        assert_eq!(derive_day_state(&punches), DayState::NoPunch);
    }

    #[test]
    fn test_approved_in_yields_clocked_in() {
        let punches = vec![punch(PunchKind::In, PunchStatus::Approved, at(9, 0))];
        assert_eq!(derive_day_state(&punches), DayState::ClockedIn(at(9, 0)));
    }

    #[test]
    fn test_approved_in_and_out_yields_clocked_out() {
        let punches = vec![
            punch(PunchKind::In, PunchStatus::Approved, at(9, 0)),
            punch(PunchKind::Out, PunchStatus::Approved, at(17, 0)),
        ];
        assert_eq!(
            derive_day_state(&punches),
            DayState::ClockedOut(at(9, 0), at(17, 0))
        );
    }

    #[test]
    fn test_state_derivation_ignores_record_order() {
        let punches = vec![
            punch(PunchKind::Out, PunchStatus::Approved, at(17, 0)),
            punch(PunchKind::In, PunchStatus::Approved, at(9, 0)),
        ];
        assert_eq!(
            derive_day_state(&punches),
            DayState::ClockedOut(at(9, 0), at(17, 0))
        );
    }

    #[test]
    fn test_in_from_no_punch_is_allowed() {
        assert!(check_transition(DayState::NoPunch, PunchKind::In).is_ok());
    }

    #[test]
    fn test_out_from_clocked_in_is_allowed() {
        assert!(check_transition(DayState::ClockedIn(at(9, 0)), PunchKind::Out).is_ok());
    }

    #[test]
    fn test_duplicate_in_carries_prior_timestamp() {
        let err = check_transition(DayState::ClockedIn(at(9, 0)), PunchKind::In).unwrap_err();
        match err {
            EngineError::SequenceViolation {
                attempted,
                prior_kind,
                prior_at,
            } => {
                assert_eq!(attempted, PunchKind::In);
                assert_eq!(prior_kind, PunchKind::In);
                assert_eq!(prior_at, at(9, 0));
            }
            other => panic!("expected sequence violation, got {:?}", other),
        }
    }

    #[test]
    fn test_out_without_in_is_rejected() {
        let err = check_transition(DayState::NoPunch, PunchKind::Out).unwrap_err();
        assert!(matches!(err, EngineError::MissingClockIn));
    }

    #[test]
    fn test_clocked_out_is_terminal() {
        let state = DayState::ClockedOut(at(9, 0), at(17, 0));
        assert!(check_transition(state, PunchKind::In).is_err());
        assert!(check_transition(state, PunchKind::Out).is_err());
    }
}
