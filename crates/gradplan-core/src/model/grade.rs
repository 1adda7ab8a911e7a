//! Letter grades and their grade-point values.
//!
//! Points are stored in tenths (A = 40 means 4.0) so GPA math stays exact
//! until the final rounding step.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A letter grade on the A+ .. F scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Every grade, best to worst.
    pub const ALL: [Grade; 13] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::DMinus,
        Self::F,
    ];

    /// Grade points in tenths: A+ is 43, A is 40, F is 0.
    pub fn points_tenths(self) -> u32 {
        match self {
            Self::APlus => 43,
            Self::A => 40,
            Self::AMinus => 37,
            Self::BPlus => 33,
            Self::B => 30,
            Self::BMinus => 27,
            Self::CPlus => 23,
            Self::C => 20,
            Self::CMinus => 17,
            Self::DPlus => 13,
            Self::D => 10,
            Self::DMinus => 7,
            Self::F => 0,
        }
    }

    /// Whether the grade earns completed credits. Every letter passes
    /// except F.
    pub fn is_passing(self) -> bool {
        !matches!(self, Self::F)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
        };
        f.write_str(s)
    }
}

impl FromStr for Grade {
    type Err = GradeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Self::APlus),
            "A" => Ok(Self::A),
            "A-" => Ok(Self::AMinus),
            "B+" => Ok(Self::BPlus),
            "B" => Ok(Self::B),
            "B-" => Ok(Self::BMinus),
            "C+" => Ok(Self::CPlus),
            "C" => Ok(Self::C),
            "C-" => Ok(Self::CMinus),
            "D+" => Ok(Self::DPlus),
            "D" => Ok(Self::D),
            "D-" => Ok(Self::DMinus),
            "F" => Ok(Self::F),
            other => Err(GradeParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Grade`] string.
#[derive(Debug, Clone)]
pub struct GradeParseError(pub String);

impl fmt::Display for GradeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid grade: {:?}", self.0)
    }
}

impl std::error::Error for GradeParseError {}
