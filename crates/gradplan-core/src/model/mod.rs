//! Core data model: terms, statuses, student-owned plan records, and the
//! in-memory [`PlanSnapshot`] that all pure operations work over.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod attribute;
pub mod grade;

pub use attribute::{CourseAttribute, CourseAttributeParseError};
pub use grade::{Grade, GradeParseError};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Academic term. Rotation order within an academic year is
/// Fall, Spring, Summer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Fall,
    Spring,
    Summer,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
        };
        f.write_str(s)
    }
}

impl FromStr for Term {
    type Err = TermParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fall" | "Fall" => Ok(Self::Fall),
            "spring" | "Spring" => Ok(Self::Spring),
            "summer" | "Summer" => Ok(Self::Summer),
            other => Err(TermParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Term`] string.
#[derive(Debug, Clone)]
pub struct TermParseError(pub String);

impl fmt::Display for TermParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid term: {:?}", self.0)
    }
}

impl std::error::Error for TermParseError {}

// ---------------------------------------------------------------------------

/// Status of a student semester on the plan timeline.
///
/// In semester order the statuses always form the partition
/// `previous* present? future*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemesterStatus {
    Previous,
    Present,
    Future,
}

impl fmt::Display for SemesterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Previous => "previous",
            Self::Present => "present",
            Self::Future => "future",
        };
        f.write_str(s)
    }
}

impl FromStr for SemesterStatus {
    type Err = SemesterStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "previous" => Ok(Self::Previous),
            "present" => Ok(Self::Present),
            "future" => Ok(Self::Future),
            other => Err(SemesterStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`SemesterStatus`] string.
#[derive(Debug, Clone)]
pub struct SemesterStatusParseError(pub String);

impl fmt::Display for SemesterStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid semester status: {:?}", self.0)
    }
}

impl std::error::Error for SemesterStatusParseError {}

// ---------------------------------------------------------------------------

/// Enrollment state of a student course. Dropped courses keep their row but
/// are excluded from credit loads, prerequisite claims, and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Enrolled,
    Dropped,
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Enrolled => "enrolled",
            Self::Dropped => "dropped",
        };
        f.write_str(s)
    }
}

impl FromStr for EnrollmentStatus {
    type Err = EnrollmentStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enrolled" => Ok(Self::Enrolled),
            "dropped" => Ok(Self::Dropped),
            other => Err(EnrollmentStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`EnrollmentStatus`] string.
#[derive(Debug, Clone)]
pub struct EnrollmentStatusParseError(pub String);

impl fmt::Display for EnrollmentStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid enrollment status: {:?}", self.0)
    }
}

impl std::error::Error for EnrollmentStatusParseError {}

// ---------------------------------------------------------------------------
// Academic year
// ---------------------------------------------------------------------------

/// An academic year pair, printed as `"2026-2027"`. The end year is always
/// the start year plus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYear {
    pub start: i32,
    pub end: i32,
}

impl AcademicYear {
    /// Build a year pair from its start year.
    pub fn starting(start: i32) -> Self {
        Self {
            start,
            end: start + 1,
        }
    }

    /// The year pair shifted forward by `years`.
    pub fn offset(self, years: i32) -> Self {
        Self {
            start: self.start + years,
            end: self.end + years,
        }
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for AcademicYear {
    type Err = AcademicYearParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((start, end)) = s.split_once('-') else {
            return Err(AcademicYearParseError(s.to_owned()));
        };
        let start: i32 = start
            .trim()
            .parse()
            .map_err(|_| AcademicYearParseError(s.to_owned()))?;
        let end: i32 = end
            .trim()
            .parse()
            .map_err(|_| AcademicYearParseError(s.to_owned()))?;
        if end != start + 1 {
            return Err(AcademicYearParseError(s.to_owned()));
        }
        Ok(Self { start, end })
    }
}

/// Error returned when parsing an invalid [`AcademicYear`] string.
#[derive(Debug, Clone)]
pub struct AcademicYearParseError(pub String);

impl fmt::Display for AcademicYearParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid academic year: {:?} (expected consecutive years like \"2026-2027\")",
            self.0
        )
    }
}

impl std::error::Error for AcademicYearParseError {}

// ---------------------------------------------------------------------------
// Plan records
// ---------------------------------------------------------------------------

/// A semester on a student's plan timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSemester {
    pub id: Uuid,
    pub student_id: Uuid,
    /// 1-based position in the timeline.
    pub number: u32,
    /// Display name, e.g. `"Fall 2026-2027"`.
    pub name: String,
    pub status: SemesterStatus,
    pub created_at: DateTime<Utc>,
}

/// A course placed on a student's plan.
///
/// Credits and title are copied from the catalog at creation so a plan stays
/// readable on its own; the `code` is the catalog reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCourse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub semester_id: Uuid,
    /// Catalog course label, e.g. `"CMPS 200"`.
    pub code: String,
    pub title: String,
    pub credits: u32,
    pub attribute: CourseAttribute,
    pub grade: Option<Grade>,
    pub enrollment: EnrollmentStatus,
    /// Order within the owning semester.
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

impl StudentCourse {
    /// Whether this course counts toward loads, claims, and metrics.
    pub fn is_enrolled(&self) -> bool {
        self.enrollment == EnrollmentStatus::Enrolled
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The full in-memory view of one student's plan.
///
/// Every operation except materialization is a pure function over a snapshot:
/// it returns a new snapshot (or a structured rejection) and the caller
/// persists the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub semesters: Vec<StudentSemester>,
    pub courses: Vec<StudentCourse>,
}

impl PlanSnapshot {
    /// Semesters in timeline order.
    pub fn ordered_semesters(&self) -> Vec<&StudentSemester> {
        let mut out: Vec<&StudentSemester> = self.semesters.iter().collect();
        out.sort_by_key(|s| s.number);
        out
    }

    /// Look up a semester by id.
    pub fn semester(&self, id: Uuid) -> Option<&StudentSemester> {
        self.semesters.iter().find(|s| s.id == id)
    }

    /// Look up a semester by its timeline number.
    pub fn semester_by_number(&self, number: u32) -> Option<&StudentSemester> {
        self.semesters.iter().find(|s| s.number == number)
    }

    /// Look up a course row by id.
    pub fn course(&self, id: Uuid) -> Option<&StudentCourse> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// All course rows in a semester, in position order.
    pub fn courses_in(&self, semester_id: Uuid) -> Vec<&StudentCourse> {
        let mut out: Vec<&StudentCourse> = self
            .courses
            .iter()
            .filter(|c| c.semester_id == semester_id)
            .collect();
        out.sort_by_key(|c| c.position);
        out
    }

    /// Non-dropped course rows in a semester, in position order.
    pub fn enrolled_in(&self, semester_id: Uuid) -> Vec<&StudentCourse> {
        let mut out: Vec<&StudentCourse> = self
            .courses
            .iter()
            .filter(|c| c.semester_id == semester_id && c.is_enrolled())
            .collect();
        out.sort_by_key(|c| c.position);
        out
    }

    /// The non-dropped row for a course code anywhere in the plan.
    pub fn enrolled_course(&self, code: &str) -> Option<&StudentCourse> {
        self.courses
            .iter()
            .find(|c| c.code == code && c.is_enrolled())
    }

    /// Course codes the student has claimed: every non-dropped course,
    /// regardless of semester or grade.
    pub fn claimed_codes(&self) -> HashSet<&str> {
        self.courses
            .iter()
            .filter(|c| c.is_enrolled())
            .map(|c| c.code.as_str())
            .collect()
    }

    /// Credit sum of a semester's non-dropped courses.
    pub fn credit_load(&self, semester_id: Uuid) -> u32 {
        self.courses
            .iter()
            .filter(|c| c.semester_id == semester_id && c.is_enrolled())
            .map(|c| c.credits)
            .sum()
    }

    /// Position for a course appended at the end of a semester.
    pub fn next_position(&self, semester_id: Uuid) -> u32 {
        self.courses
            .iter()
            .filter(|c| c.semester_id == semester_id)
            .map(|c| c.position + 1)
            .max()
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
