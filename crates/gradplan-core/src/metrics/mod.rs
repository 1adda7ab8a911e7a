//! Derived plan metrics: GPA, credit totals, and requirement-bucket
//! progress.
//!
//! GPA arithmetic stays in integers. Grade points are carried in tenths,
//! the published GPA in hundredths, and rounding is half-up at the
//! hundredths place. Dropped courses are invisible to every metric here.

use std::fmt;

use uuid::Uuid;

use crate::catalog::Catalog;
use crate::model::{CourseAttribute, PlanSnapshot, StudentCourse};

/// A grade-point average in hundredths, so `Gpa(365)` prints as `3.65`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Gpa(u32);

impl Gpa {
    pub const ZERO: Gpa = Gpa(0);

    pub fn from_hundredths(hundredths: u32) -> Self {
        Gpa(hundredths)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Credit-weighted GPA over the graded, non-dropped courses in `courses`.
/// No graded courses yields a defined 0.00 rather than an absent value.
fn weighted_gpa<'a, I>(courses: I) -> Gpa
where
    I: IntoIterator<Item = &'a StudentCourse>,
{
    let mut point_tenths_sum = 0u64;
    let mut credit_sum = 0u64;
    for course in courses {
        if !course.is_enrolled() {
            continue;
        }
        let Some(grade) = course.grade else {
            continue;
        };
        point_tenths_sum += u64::from(grade.points_tenths()) * u64::from(course.credits);
        credit_sum += u64::from(course.credits);
    }
    if credit_sum == 0 {
        return Gpa::ZERO;
    }
    // Tenths scaled to hundredths, rounded half-up.
    let scaled = point_tenths_sum * 10;
    let hundredths = (scaled * 2 + credit_sum) / (credit_sum * 2);
    Gpa(hundredths as u32)
}

/// GPA over one semester's graded courses.
pub fn semester_gpa(snapshot: &PlanSnapshot, semester_id: Uuid) -> Gpa {
    weighted_gpa(
        snapshot
            .courses
            .iter()
            .filter(|c| c.semester_id == semester_id),
    )
}

/// GPA over every graded course in the plan.
pub fn cumulative_gpa(snapshot: &PlanSnapshot) -> Gpa {
    weighted_gpa(&snapshot.courses)
}

/// Credits from courses carrying a passing grade. Ungraded courses never
/// count, however certain they look.
pub fn completed_credits(snapshot: &PlanSnapshot) -> u32 {
    snapshot
        .courses
        .iter()
        .filter(|c| c.is_enrolled())
        .filter(|c| c.grade.is_some_and(|g| g.is_passing()))
        .map(|c| c.credits)
        .sum()
}

/// Credits from every non-dropped course in the plan, graded or not.
pub fn planned_credits(snapshot: &PlanSnapshot) -> u32 {
    snapshot
        .courses
        .iter()
        .filter(|c| c.is_enrolled())
        .map(|c| c.credits)
        .sum()
}

/// Completed credits against the catalog's degree total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeProgress {
    pub completed: u32,
    pub total: u32,
    pub remaining: u32,
    pub percent: u32,
}

pub fn degree_progress(snapshot: &PlanSnapshot, catalog: &Catalog) -> DegreeProgress {
    let completed = completed_credits(snapshot);
    let total = catalog.total_credits();
    DegreeProgress {
        completed,
        total,
        remaining: total.saturating_sub(completed),
        percent: percent_of(completed, total),
    }
}

/// Earned credits against one requirement bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketProgress {
    pub attribute: CourseAttribute,
    pub required: u32,
    pub earned: u32,
    pub remaining: u32,
    pub percent: u32,
}

/// Progress for every bucket the catalog defines, in catalog order. A
/// course feeds a bucket through its attribute tag, and only passing
/// grades earn credit.
pub fn bucket_progress(snapshot: &PlanSnapshot, catalog: &Catalog) -> Vec<BucketProgress> {
    catalog
        .buckets()
        .iter()
        .map(|bucket| {
            let earned: u32 = snapshot
                .courses
                .iter()
                .filter(|c| c.is_enrolled() && c.attribute == bucket.attribute)
                .filter(|c| c.grade.is_some_and(|g| g.is_passing()))
                .map(|c| c.credits)
                .sum();
            BucketProgress {
                attribute: bucket.attribute,
                required: bucket.required_credits,
                earned,
                remaining: bucket.required_credits.saturating_sub(earned),
                percent: percent_of(earned, bucket.required_credits),
            }
        })
        .collect()
}

/// Whole-number percentage, rounded half-up and capped at 100. A zero
/// requirement reports zero progress rather than dividing by it.
fn percent_of(earned: u32, required: u32) -> u32 {
    if required == 0 {
        return 0;
    }
    let earned = u64::from(earned);
    let required = u64::from(required);
    let rounded = (earned * 100 * 2 + required) / (required * 2);
    rounded.min(100) as u32
}
