//! Course attributes: the fixed enumeration that keys elective-bucket
//! requirements. Bucket math never matches on free-form strings; every
//! course carries exactly one of these tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Requirement bucket a course counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CourseAttribute {
    #[serde(rename = "Engl. Communication")]
    EnglishCommunication,
    #[serde(rename = "Arab. Communication")]
    ArabicCommunication,
    #[serde(rename = "Human Values")]
    HumanValues,
    #[serde(rename = "Cultures & Histories")]
    CulturesAndHistories,
    #[serde(rename = "Societies & Individuals")]
    SocietiesAndIndividuals,
    #[serde(rename = "Understanding the World")]
    UnderstandingTheWorld,
    #[serde(rename = "Elective")]
    Elective,
    #[serde(rename = "CEL")]
    Cel,
    #[serde(rename = "Major Course")]
    MajorCourse,
}

impl CourseAttribute {
    /// Every attribute, in display order.
    pub const ALL: [CourseAttribute; 9] = [
        Self::EnglishCommunication,
        Self::ArabicCommunication,
        Self::HumanValues,
        Self::CulturesAndHistories,
        Self::SocietiesAndIndividuals,
        Self::UnderstandingTheWorld,
        Self::Elective,
        Self::Cel,
        Self::MajorCourse,
    ];
}

impl fmt::Display for CourseAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EnglishCommunication => "Engl. Communication",
            Self::ArabicCommunication => "Arab. Communication",
            Self::HumanValues => "Human Values",
            Self::CulturesAndHistories => "Cultures & Histories",
            Self::SocietiesAndIndividuals => "Societies & Individuals",
            Self::UnderstandingTheWorld => "Understanding the World",
            Self::Elective => "Elective",
            Self::Cel => "CEL",
            Self::MajorCourse => "Major Course",
        };
        f.write_str(s)
    }
}

impl FromStr for CourseAttribute {
    type Err = CourseAttributeParseError;

    /// Accepts the canonical label plus the long-form names that appear in
    /// imported curriculum sheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Engl. Communication" | "English Communication" => Ok(Self::EnglishCommunication),
            "Arab. Communication" | "Arabic Communication" => Ok(Self::ArabicCommunication),
            "Human Values" => Ok(Self::HumanValues),
            "Cultures & Histories" | "Cultures and Histories" => Ok(Self::CulturesAndHistories),
            "Societies & Individuals" | "Societies and Individuals" => {
                Ok(Self::SocietiesAndIndividuals)
            }
            "Understanding the World" => Ok(Self::UnderstandingTheWorld),
            "Elective" | "Technical Elective" => Ok(Self::Elective),
            "CEL" | "Community Engaged Learning" => Ok(Self::Cel),
            "Major Course" => Ok(Self::MajorCourse),
            other => Err(CourseAttributeParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`CourseAttribute`] string.
#[derive(Debug, Clone)]
pub struct CourseAttributeParseError(pub String);

impl fmt::Display for CourseAttributeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid course attribute: {:?}", self.0)
    }
}

impl std::error::Error for CourseAttributeParseError {}
