//! TOML format types for catalog definition files.
//!
//! A catalog file carries the course inventory, the elective-bucket
//! requirements, and the curriculum template. These types map directly to
//! the on-disk format and are deserialized via `serde` + the `toml` crate;
//! reference resolution and validation happen in [`super::parser`].

use serde::{Deserialize, Serialize};

/// Top-level structure of a catalog TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogToml {
    /// Catalog metadata.
    pub catalog: CatalogMeta,
    /// Elective-bucket requirements.
    #[serde(default)]
    pub buckets: Vec<BucketToml>,
    /// Course inventory.
    #[serde(default)]
    pub courses: Vec<CourseToml>,
    /// Curriculum template semesters, in timeline order.
    #[serde(default)]
    pub semesters: Vec<TemplateSemesterToml>,
}

/// Catalog-level metadata in `[catalog]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMeta {
    /// Human-readable catalog name, e.g. the degree program.
    pub name: String,
    /// Total credits required for the degree.
    #[serde(default = "default_total_credits")]
    pub total_credits: u32,
}

/// A single `[[buckets]]` entry: a requirement keyed by course attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BucketToml {
    /// Attribute label, e.g. `"Human Values"`.
    pub attribute: String,
    /// Credits required in this bucket.
    pub required_credits: u32,
}

/// A single `[[courses]]` entry in the catalog TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseToml {
    /// Subject code, e.g. `"CMPS"`.
    pub code: String,
    /// Course number within the subject, e.g. `"200"`.
    pub number: String,
    /// Course title.
    pub title: String,
    /// Credit weight.
    #[serde(default = "default_credits")]
    pub credits: u32,
    /// Default attribute label for this course.
    pub attribute: String,
    /// Labels of courses that must be claimed first (one level deep,
    /// all required).
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// A single `[[semesters]]` entry in the curriculum template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateSemesterToml {
    /// 1-based timeline position. Numbers must be contiguous.
    pub number: u32,
    /// Course slots in display order.
    #[serde(default)]
    pub slots: Vec<SlotToml>,
}

/// A course slot within a template semester.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotToml {
    /// Course label, e.g. `"CMPS 200"`.
    pub course: String,
    /// Attribute override for this slot (defaults to the course's own
    /// attribute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

fn default_total_credits() -> u32 {
    120
}

fn default_credits() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_catalog() {
        let toml_str = r#"
[catalog]
name = "Test degree"

[[courses]]
code = "CMPS"
number = "200"
title = "Introduction to Programming"
attribute = "Major Course"
"#;
        let catalog: CatalogToml = toml::from_str(toml_str).expect("should parse");
        assert_eq!(catalog.catalog.name, "Test degree");
        assert_eq!(catalog.catalog.total_credits, 120); // default
        assert_eq!(catalog.courses.len(), 1);
        assert_eq!(catalog.courses[0].credits, 3); // default
        assert!(catalog.courses[0].prerequisites.is_empty());
        assert!(catalog.buckets.is_empty());
        assert!(catalog.semesters.is_empty());
    }

    #[test]
    fn deserialize_full_catalog() {
        let toml_str = r#"
[catalog]
name = "BS Computer Science"
total_credits = 102

[[buckets]]
attribute = "Human Values"
required_credits = 6

[[buckets]]
attribute = "Elective"
required_credits = 9

[[courses]]
code = "CMPS"
number = "200"
title = "Introduction to Programming"
credits = 3
attribute = "Major Course"

[[courses]]
code = "CMPS"
number = "212"
title = "Intermediate Programming"
credits = 4
attribute = "Major Course"
prerequisites = ["CMPS 200"]

[[semesters]]
number = 1

[[semesters.slots]]
course = "CMPS 200"

[[semesters]]
number = 2

[[semesters.slots]]
course = "CMPS 212"
attribute = "Elective"
"#;
        let catalog: CatalogToml = toml::from_str(toml_str).expect("should parse");
        assert_eq!(catalog.catalog.total_credits, 102);
        assert_eq!(catalog.buckets.len(), 2);
        assert_eq!(catalog.courses[1].prerequisites, vec!["CMPS 200"]);
        assert_eq!(catalog.semesters.len(), 2);
        assert_eq!(catalog.semesters[0].slots[0].course, "CMPS 200");
        assert_eq!(catalog.semesters[0].slots[0].attribute, None);
        assert_eq!(
            catalog.semesters[1].slots[0].attribute.as_deref(),
            Some("Elective")
        );
    }

    #[test]
    fn deserialize_catalog_without_template() {
        let toml_str = r#"
[catalog]
name = "Course inventory only"

[[courses]]
code = "MATH"
number = "201"
title = "Calculus III"
credits = 3
attribute = "Major Course"
"#;
        let catalog: CatalogToml = toml::from_str(toml_str).expect("should parse");
        assert!(catalog.semesters.is_empty());
    }

    #[test]
    fn roundtrip_serialize_deserialize() {
        let catalog = CatalogToml {
            catalog: CatalogMeta {
                name: "Roundtrip test".to_owned(),
                total_credits: 120,
            },
            buckets: vec![BucketToml {
                attribute: "Elective".to_owned(),
                required_credits: 9,
            }],
            courses: vec![CourseToml {
                code: "CMPS".to_owned(),
                number: "200".to_owned(),
                title: "Introduction to Programming".to_owned(),
                credits: 3,
                attribute: "Major Course".to_owned(),
                prerequisites: vec![],
            }],
            semesters: vec![TemplateSemesterToml {
                number: 1,
                slots: vec![SlotToml {
                    course: "CMPS 200".to_owned(),
                    attribute: None,
                }],
            }],
        };

        let serialized = toml::to_string(&catalog).expect("should serialize");
        let deserialized: CatalogToml = toml::from_str(&serialized).expect("should deserialize");
        assert_eq!(catalog, deserialized);
    }

    /// Helper to resolve a path relative to the workspace root.
    fn workspace_root() -> std::path::PathBuf {
        // CARGO_MANIFEST_DIR is crates/gradplan-core; go up two levels.
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .parent()
            .unwrap()
            .to_path_buf()
    }

    #[test]
    fn parse_example_minimal_toml() {
        let path = workspace_root().join("docs/examples/minimal.toml");
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
        let catalog: CatalogToml = toml::from_str(&content)
            .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));
        assert!(!catalog.catalog.name.is_empty());
        assert!(!catalog.courses.is_empty());
    }

    #[test]
    fn parse_example_cs_degree_toml() {
        let path = workspace_root().join("docs/examples/cs-degree.toml");
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
        let catalog: CatalogToml = toml::from_str(&content)
            .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));
        assert_eq!(catalog.catalog.name, "BS Computer Science");
        assert_eq!(catalog.semesters.len(), 4);
        // CMPS 212 sits behind CMPS 200 in the prerequisite chain.
        let cmps_212 = catalog
            .courses
            .iter()
            .find(|c| c.code == "CMPS" && c.number == "212")
            .expect("CMPS 212 in inventory");
        assert_eq!(cmps_212.prerequisites, vec!["CMPS 200"]);
    }
}
