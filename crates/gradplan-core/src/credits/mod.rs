//! Per-semester credit-load bounds.
//!
//! The maximum is enforced only when a course is added to or moved into a
//! semester. Existing loads are never rewritten: a semester already above
//! the maximum or below the minimum just carries a warning, and moving a
//! course out is always allowed no matter how light the semester ends up.

use std::fmt;

use thiserror::Error;

/// Fewest credits a semester should carry before it is flagged as light.
pub const MIN_SEMESTER_CREDITS: u32 = 12;

/// Most credits a semester may reach through additions and moves.
pub const MAX_SEMESTER_CREDITS: u32 = 17;

/// Rejection for an addition that would push a semester above the maximum.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "adding {candidate} credits would raise the semester load from {current} to {projected}, above the maximum of {max}"
)]
pub struct CreditOverload {
    pub current: u32,
    pub candidate: u32,
    pub projected: u32,
    pub max: u32,
}

/// Check whether a course worth `candidate` credits may join a semester
/// currently carrying `current` credits. Landing exactly on the maximum is
/// allowed.
pub fn check_addition(current: u32, candidate: u32) -> Result<(), CreditOverload> {
    let projected = current + candidate;
    if projected > MAX_SEMESTER_CREDITS {
        return Err(CreditOverload {
            current,
            candidate,
            projected,
            max: MAX_SEMESTER_CREDITS,
        });
    }
    Ok(())
}

/// Non-blocking advisory about a semester's standing load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadWarning {
    Underloaded { current: u32, min: u32 },
    Overloaded { current: u32, max: u32 },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::Underloaded { current, min } => {
                write!(f, "{current} credits is below the {min}-credit minimum")
            }
            LoadWarning::Overloaded { current, max } => {
                write!(f, "{current} credits exceeds the {max}-credit maximum")
            }
        }
    }
}

/// Advisory for a semester's current load, if it sits outside the bounds.
pub fn load_warning(current: u32) -> Option<LoadWarning> {
    if current < MIN_SEMESTER_CREDITS {
        return Some(LoadWarning::Underloaded {
            current,
            min: MIN_SEMESTER_CREDITS,
        });
    }
    if current > MAX_SEMESTER_CREDITS {
        return Some(LoadWarning::Overloaded {
            current,
            max: MAX_SEMESTER_CREDITS,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_above_maximum_is_rejected() {
        let err = check_addition(15, 3).unwrap_err();

        assert_eq!(
            err,
            CreditOverload {
                current: 15,
                candidate: 3,
                projected: 18,
                max: 17,
            }
        );
    }

    #[test]
    fn addition_landing_on_maximum_is_accepted() {
        assert!(check_addition(15, 2).is_ok());
    }

    #[test]
    fn addition_to_empty_semester_is_accepted() {
        assert!(check_addition(0, 3).is_ok());
    }

    #[test]
    fn light_load_warns_without_blocking() {
        assert_eq!(
            load_warning(11),
            Some(LoadWarning::Underloaded {
                current: 11,
                min: 12
            })
        );
        assert_eq!(
            load_warning(0),
            Some(LoadWarning::Underloaded {
                current: 0,
                min: 12
            })
        );
    }

    #[test]
    fn load_inside_bounds_is_quiet() {
        assert_eq!(load_warning(12), None);
        assert_eq!(load_warning(15), None);
        assert_eq!(load_warning(17), None);
    }

    #[test]
    fn existing_heavy_load_warns() {
        assert_eq!(
            load_warning(18),
            Some(LoadWarning::Overloaded {
                current: 18,
                max: 17
            })
        );
    }

    #[test]
    fn warning_messages_name_the_bound() {
        let light = load_warning(9).unwrap().to_string();
        assert!(light.contains("12-credit minimum"), "got: {light}");

        let heavy = load_warning(20).unwrap().to_string();
        assert!(heavy.contains("17-credit maximum"), "got: {heavy}");
    }
}
