//! Course catalog: inventory, elective-bucket requirements, and the
//! curriculum template, loaded from TOML and resolved for lookup.

use std::collections::HashMap;

use crate::model::CourseAttribute;

pub mod parser;
pub mod toml_format;

pub use parser::{CatalogParseError, parse_catalog_toml};
pub use toml_format::{
    BucketToml, CatalogMeta, CatalogToml, CourseToml, SlotToml, TemplateSemesterToml,
};

/// A catalog course with validated references.
#[derive(Debug, Clone)]
pub struct Course {
    /// Subject code, e.g. `"CMPS"`.
    pub code: String,
    /// Course number within the subject, e.g. `"200"`.
    pub number: String,
    pub title: String,
    pub credits: u32,
    pub attribute: CourseAttribute,
    /// Labels of courses that must all be claimed before this one.
    pub prerequisites: Vec<String>,
}

impl Course {
    /// The printed label used to reference this course, e.g. `"CMPS 200"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.code, self.number)
    }
}

/// An elective-bucket requirement.
#[derive(Debug, Clone, Copy)]
pub struct BucketRequirement {
    pub attribute: CourseAttribute,
    pub required_credits: u32,
}

/// A slot in a template semester. Title and credits are copied from the
/// course entry and the effective attribute is already resolved (slot
/// override or the course's own attribute), so materialization reads slots
/// without further lookups.
#[derive(Debug, Clone)]
pub struct TemplateSlot {
    /// Course label, e.g. `"CMPS 200"`.
    pub course: String,
    pub title: String,
    pub credits: u32,
    pub attribute: CourseAttribute,
}

/// One semester of the curriculum template.
#[derive(Debug, Clone)]
pub struct TemplateSemester {
    /// 1-based timeline position.
    pub number: u32,
    pub slots: Vec<TemplateSlot>,
}

/// A validated catalog. Construction goes through
/// [`parse_catalog_toml`], so every course reference in prerequisites and
/// template slots is known to resolve.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    total_credits: u32,
    courses: Vec<Course>,
    index: HashMap<String, usize>,
    buckets: Vec<BucketRequirement>,
    template: Vec<TemplateSemester>,
}

impl Catalog {
    pub(crate) fn new(
        name: String,
        total_credits: u32,
        courses: Vec<Course>,
        buckets: Vec<BucketRequirement>,
        template: Vec<TemplateSemester>,
    ) -> Self {
        let index = courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.label(), i))
            .collect();
        Self {
            name,
            total_credits,
            courses,
            index,
            buckets,
            template,
        }
    }

    /// Catalog name (the degree program).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total credits required for the degree.
    pub fn total_credits(&self) -> u32 {
        self.total_credits
    }

    /// All courses, in catalog order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Look up a course by label, e.g. `"CMPS 200"`.
    pub fn course(&self, label: &str) -> Option<&Course> {
        self.index.get(label).map(|&i| &self.courses[i])
    }

    /// Bucket requirements, in catalog order.
    pub fn buckets(&self) -> &[BucketRequirement] {
        &self.buckets
    }

    /// Credits required for one attribute bucket; 0 when the catalog does
    /// not list it.
    pub fn bucket_requirement(&self, attribute: CourseAttribute) -> u32 {
        self.buckets
            .iter()
            .find(|b| b.attribute == attribute)
            .map(|b| b.required_credits)
            .unwrap_or(0)
    }

    /// The curriculum template, in timeline order.
    pub fn template(&self) -> &[TemplateSemester] {
        &self.template
    }
}
