//! Storage seam for plan materialization.
//!
//! Materialization is the one operation that performs multi-step writes, so
//! it runs against this trait instead of a concrete backend. Hosts implement
//! [`PlanStore`] over whatever they persist to; [`MemoryStore`] is the
//! reference implementation used throughout the test suites.

use thiserror::Error;
use uuid::Uuid;

use crate::model::{PlanSnapshot, StudentCourse, StudentSemester};

/// Error surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Backend contract used by plan materialization.
///
/// Reads may repeat and inserts must be batch-atomic: a batch either lands
/// completely or not at all, which is what makes interrupted runs safe to
/// re-invoke.
pub trait PlanStore {
    /// All semesters belonging to a student, in any order.
    fn semesters_for(&self, student_id: Uuid) -> Result<Vec<StudentSemester>, StoreError>;

    /// Insert a batch of semester rows.
    fn insert_semesters(&mut self, rows: &[StudentSemester]) -> Result<(), StoreError>;

    /// All course rows in one semester, in any order.
    fn courses_in(&self, semester_id: Uuid) -> Result<Vec<StudentCourse>, StoreError>;

    /// Insert a batch of course rows.
    fn insert_courses(&mut self, rows: &[StudentCourse]) -> Result<(), StoreError>;
}

/// In-memory [`PlanStore`] backed by plain vectors.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub semesters: Vec<StudentSemester>,
    pub courses: Vec<StudentCourse>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the pure-operation view of one student's plan.
    pub fn snapshot(&self, student_id: Uuid) -> PlanSnapshot {
        PlanSnapshot {
            semesters: self
                .semesters
                .iter()
                .filter(|s| s.student_id == student_id)
                .cloned()
                .collect(),
            courses: self
                .courses
                .iter()
                .filter(|c| c.student_id == student_id)
                .cloned()
                .collect(),
        }
    }
}

impl PlanStore for MemoryStore {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{course, semester};

    #[test]
    fn memory_store_scopes_reads_by_student() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let mut store = MemoryStore::new();
        store
            .insert_semesters(&[semester(alice, 1), semester(bob, 1)])
            .unwrap();

        let for_alice = store.semesters_for(alice).unwrap();
        assert_eq!(for_alice.len(), 1);
        assert_eq!(for_alice[0].student_id, alice);
    }

    #[test]
    fn memory_store_scopes_courses_by_semester() {
        let student = Uuid::new_v4();
        let first = semester(student, 1);
        let second = semester(student, 2);
        let mut store = MemoryStore::new();
        store
            .insert_courses(&[
                course(student, first.id, "CMPS 200", 3),
                course(student, second.id, "MATH 201", 3),
            ])
            .unwrap();

        let in_first = store.courses_in(first.id).unwrap();
        assert_eq!(in_first.len(), 1);
        assert_eq!(in_first[0].code, "CMPS 200");
    }

    #[test]
    fn snapshot_collects_one_student_only() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let alice_sem = semester(alice, 1);
        let bob_sem = semester(bob, 1);
        let mut store = MemoryStore::new();
        store
            .insert_semesters(&[alice_sem.clone(), bob_sem.clone()])
            .unwrap();
        store
            .insert_courses(&[
                course(alice, alice_sem.id, "CMPS 200", 3),
                course(bob, bob_sem.id, "ENGL 203", 3),
            ])
            .unwrap();

        let snap = store.snapshot(alice);
        assert_eq!(snap.semesters.len(), 1);
        assert_eq!(snap.courses.len(), 1);
        assert_eq!(snap.courses[0].code, "CMPS 200");
    }
}
