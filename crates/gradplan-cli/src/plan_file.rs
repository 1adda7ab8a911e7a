//! On-disk plan document.
//!
//! The CLI persists one student's whole plan as a single JSON file. The
//! document implements [`PlanStore`] so `gradplan init` materializes straight
//! into it, and every other command works on a [`PlanSnapshot`] taken from it
//! and absorbed back before saving.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use gradplan_core::materialize::{PlanStore, StoreError};
use gradplan_core::model::{PlanSnapshot, StudentCourse, StudentSemester};

/// Format version written into every plan file.
pub const PLAN_FILE_VERSION: u32 = 1;

/// Serialized plan state for one student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    pub version: u32,
    pub student_id: Uuid,
    /// Catalog the plan was materialized from. Used as the catalog fallback
    /// when none is configured.
    pub catalog_path: String,
    pub created_at: DateTime<Utc>,
    pub semesters: Vec<StudentSemester>,
    pub courses: Vec<StudentCourse>,
}

impl PlanDocument {
    /// Create an empty document for a fresh plan.
    pub fn new(student_id: Uuid, catalog_path: &str) -> Self {
        Self {
            version: PLAN_FILE_VERSION,
            student_id,
            catalog_path: catalog_path.to_string(),
            created_at: Utc::now(),
            semesters: Vec::new(),
            courses: Vec::new(),
        }
    }

    /// Read and parse a plan document.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).with_context(|| {
            format!(
                "failed to read plan file at {} (run `gradplan init <catalog>` to create one)",
                path.display()
            )
        })?;
        let doc: PlanDocument = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse plan file at {}", path.display()))?;
        if doc.version != PLAN_FILE_VERSION {
            bail!(
                "plan file at {} has unsupported version {} (expected {})",
                path.display(),
                doc.version,
                PLAN_FILE_VERSION
            );
        }
        debug!(
            path = %path.display(),
            semesters = doc.semesters.len(),
            courses = doc.courses.len(),
            "loaded plan file"
        );
        Ok(doc)
    }

    /// Serialize and write the document, creating parent dirs as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create plan directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("failed to serialize plan")?;
        std::fs::write(path, &contents)
            .with_context(|| format!("failed to write plan file at {}", path.display()))?;
        debug!(path = %path.display(), "saved plan file");
        Ok(())
    }

    /// Build the pure-operation view of the plan.
    pub fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            semesters: self.semesters.clone(),
            courses: self.courses.clone(),
        }
    }

    /// Replace the plan state with the outcome of a pure operation.
    pub fn absorb(&mut self, snapshot: PlanSnapshot) {
        self.semesters = snapshot.semesters;
        self.courses = snapshot.courses;
    }
}

impl PlanStore for PlanDocument {
    fn semesters_for(&self, student_id: Uuid) -> Result<Vec<StudentSemester>, StoreError> {
        Ok(self
            .semesters
            .iter()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect())
    }

    fn insert_semesters(&mut self, rows: &[StudentSemester]) -> Result<(), StoreError> {
        self.semesters.extend_from_slice(rows);
        Ok(())
    }

    fn courses_in(&self, semester_id: Uuid) -> Result<Vec<StudentCourse>, StoreError> {
        Ok(self
            .courses
            .iter()
            .filter(|c| c.semester_id == semester_id)
            .cloned()
            .collect())
    }

    fn insert_courses(&mut self, rows: &[StudentCourse]) -> Result<(), StoreError> {
        self.courses.extend_from_slice(rows);
        Ok(())
    }
}
