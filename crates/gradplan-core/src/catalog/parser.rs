//! Catalog TOML parser with validation.
//!
//! Parses a catalog string into a resolved [`Catalog`] and validates:
//! - Attribute labels are valid enum variants.
//! - Course labels are unique.
//! - Prerequisite references point to existing courses and form a DAG
//!   (a cyclic prerequisite graph can never be satisfied).
//! - Template semester numbers are contiguous from 1 and each course
//!   appears in at most one slot.

use std::collections::{HashMap, HashSet, VecDeque};

use thiserror::Error;

use crate::model::CourseAttribute;

use super::toml_format::CatalogToml;
use super::{BucketRequirement, Catalog, Course, TemplateSemester, TemplateSlot};

/// Errors that can occur during catalog parsing and validation.
#[derive(Debug, Error)]
pub enum CatalogParseError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("duplicate course {0:?}")]
    DuplicateCourse(String),

    #[error("invalid attribute {value:?} on course {course:?}")]
    InvalidCourseAttribute { course: String, value: String },

    #[error("invalid attribute {0:?} on bucket")]
    InvalidBucketAttribute(String),

    #[error("duplicate bucket for attribute {0:?}")]
    DuplicateBucket(String),

    #[error("course {course:?} lists unknown prerequisite {prerequisite:?}")]
    UnknownPrerequisite { course: String, prerequisite: String },

    #[error("course {0:?} lists itself as a prerequisite")]
    SelfPrerequisite(String),

    #[error("prerequisite cycle detected involving courses: {0}")]
    PrerequisiteCycle(String),

    #[error("template semesters must be numbered contiguously from 1: expected {expected}, found {found}")]
    NonContiguousSemesters { expected: u32, found: u32 },

    #[error("semester {semester} references unknown course {course:?}")]
    UnknownSlotCourse { semester: u32, course: String },

    #[error("invalid attribute {value:?} on slot {course:?} in semester {semester}")]
    InvalidSlotAttribute {
        semester: u32,
        course: String,
        value: String,
    },

    #[error("course {0:?} appears in more than one template slot")]
    DuplicateTemplateCourse(String),
}

/// Parse and validate a catalog TOML string.
///
/// Returns a resolved [`Catalog`] or a descriptive error. A catalog with an
/// empty template is valid and materializes to an empty plan.
pub fn parse_catalog_toml(content: &str) -> Result<Catalog, CatalogParseError> {
    let doc: CatalogToml = toml::from_str(content)?;

    let courses = resolve_courses(&doc)?;
    let buckets = resolve_buckets(&doc)?;
    let template = resolve_template(&doc, &courses)?;
    check_for_cycles(&courses)?;

    Ok(Catalog::new(
        doc.catalog.name,
        doc.catalog.total_credits,
        courses,
        buckets,
        template,
    ))
}

/// Resolve course entries: parse attributes, check label uniqueness, and
/// check that prerequisite references exist and are not self-referential.
fn resolve_courses(doc: &CatalogToml) -> Result<Vec<Course>, CatalogParseError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut courses = Vec::with_capacity(doc.courses.len());

    for entry in &doc.courses {
        let label = format!("{} {}", entry.code, entry.number);
        if !seen.insert(label.clone()) {
            return Err(CatalogParseError::DuplicateCourse(label));
        }

        let attribute: CourseAttribute = entry.attribute.parse().map_err(|_| {
            CatalogParseError::InvalidCourseAttribute {
                course: label.clone(),
                value: entry.attribute.clone(),
            }
        })?;

        courses.push(Course {
            code: entry.code.clone(),
            number: entry.number.clone(),
            title: entry.title.clone(),
            credits: entry.credits,
            attribute,
            prerequisites: entry.prerequisites.clone(),
        });
    }

    // Check prerequisite references against the full label set.
    for course in &courses {
        let label = course.label();
        for prereq in &course.prerequisites {
            if *prereq == label {
                return Err(CatalogParseError::SelfPrerequisite(label.clone()));
            }
            if !seen.contains(prereq) {
                return Err(CatalogParseError::UnknownPrerequisite {
                    course: label.clone(),
                    prerequisite: prereq.clone(),
                });
            }
        }
    }

    Ok(courses)
}

/// Resolve bucket entries: parse attributes and reject duplicates.
fn resolve_buckets(doc: &CatalogToml) -> Result<Vec<BucketRequirement>, CatalogParseError> {
    let mut seen: HashSet<CourseAttribute> = HashSet::new();
    let mut buckets = Vec::with_capacity(doc.buckets.len());

    for entry in &doc.buckets {
        let attribute: CourseAttribute = entry
            .attribute
            .parse()
            .map_err(|_| CatalogParseError::InvalidBucketAttribute(entry.attribute.clone()))?;
        if !seen.insert(attribute) {
            return Err(CatalogParseError::DuplicateBucket(entry.attribute.clone()));
        }
        buckets.push(BucketRequirement {
            attribute,
            required_credits: entry.required_credits,
        });
    }

    Ok(buckets)
}

/// Resolve the template: contiguous numbering, known course references,
/// effective slot attributes, and at most one slot per course.
fn resolve_template(
    doc: &CatalogToml,
    courses: &[Course],
) -> Result<Vec<TemplateSemester>, CatalogParseError> {
    let by_label: HashMap<String, &Course> = courses.iter().map(|c| (c.label(), c)).collect();

    let mut placed: HashSet<&str> = HashSet::new();
    let mut template = Vec::with_capacity(doc.semesters.len());

    for (i, sem) in doc.semesters.iter().enumerate() {
        let expected = i as u32 + 1;
        if sem.number != expected {
            return Err(CatalogParseError::NonContiguousSemesters {
                expected,
                found: sem.number,
            });
        }

        let mut slots = Vec::with_capacity(sem.slots.len());
        for slot in &sem.slots {
            let Some(course) = by_label.get(slot.course.as_str()) else {
                return Err(CatalogParseError::UnknownSlotCourse {
                    semester: sem.number,
                    course: slot.course.clone(),
                });
            };
            if !placed.insert(slot.course.as_str()) {
                return Err(CatalogParseError::DuplicateTemplateCourse(
                    slot.course.clone(),
                ));
            }

            let attribute = match &slot.attribute {
                Some(value) => {
                    value
                        .parse()
                        .map_err(|_| CatalogParseError::InvalidSlotAttribute {
                            semester: sem.number,
                            course: slot.course.clone(),
                            value: value.clone(),
                        })?
                }
                None => course.attribute,
            };

            slots.push(TemplateSlot {
                course: slot.course.clone(),
                title: course.title.clone(),
                credits: course.credits,
                attribute,
            });
        }

        template.push(TemplateSemester {
            number: sem.number,
            slots,
        });
    }

    Ok(template)
}

/// Detect prerequisite cycles using Kahn's algorithm for topological sort.
///
/// Returns `Ok(())` if the graph is a DAG, or `Err` with the courses left
/// in the cycle.
fn check_for_cycles(courses: &[Course]) -> Result<(), CatalogParseError> {
    // Build adjacency list and in-degree map over course labels.
    let labels: Vec<String> = courses.iter().map(|c| c.label()).collect();
    let label_to_idx: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), i))
        .collect();

    let n = labels.len();
    let mut in_degree = vec![0usize; n];
    let mut adj: Vec<Vec<usize>> = vec![vec![]; n];

    for (course_idx, course) in courses.iter().enumerate() {
        for prereq in &course.prerequisites {
            let prereq_idx = label_to_idx[prereq.as_str()];
            // Edge: prerequisite -> course (prerequisite comes first).
            adj[prereq_idx].push(course_idx);
            in_degree[course_idx] += 1;
        }
    }

    // Kahn's algorithm.
    let mut queue: VecDeque<usize> = VecDeque::new();
    for (i, deg) in in_degree.iter().enumerate() {
        if *deg == 0 {
            queue.push_back(i);
        }
    }

    let mut sorted_count = 0usize;
    while let Some(node) = queue.pop_front() {
        sorted_count += 1;
        for &neighbor in &adj[node] {
            in_degree[neighbor] -= 1;
            if in_degree[neighbor] == 0 {
                queue.push_back(neighbor);
            }
        }
    }

    if sorted_count != n {
        let cycle_courses: Vec<&str> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, deg)| **deg > 0)
            .map(|(i, _)| labels[i].as_str())
            .collect();
        return Err(CatalogParseError::PrerequisiteCycle(
            cycle_courses.join(", "),
        ));
    }

    Ok(())
}
