//! Student roster with suspicious/immortal status flags.
//!
//! Students are numbered contiguously from 1; enrolling appends new numbers
//! and expelling drops the highest ones. A student is never both suspicious
//! and immortal.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

/// Rejected roster operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("student {0} is not enrolled")]
    UnknownStudent(u32),
    #[error("cannot expel {requested} students, only {enrolled} enrolled")]
    NotEnoughStudents { requested: u64, enrolled: u32 },
    #[error("cannot enroll {0} more students")]
    TooManyStudents(u64),
}

/// Effect of a `NEW_STUDENTS` change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enrollment {
    Enrolled(u32),
    Expelled(u32),
    Unchanged,
}

/// Effect of a `SUSPICIOUS` mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspicion {
    Marked,
    /// Immortal students cannot be suspected.
    Ignored,
}

/// Enrolled students and their flags.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    enrolled: u32,
    suspicious: BTreeSet<u32>,
    immortal: BTreeSet<u32>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of enrolled students.
    pub fn enrolled(&self) -> u32 {
        self.enrolled
    }

    /// Whether `student` is currently enrolled.
    pub fn is_enrolled(&self, student: u32) -> bool {
        (1..=self.enrolled).contains(&student)
    }

    /// Enrolls `delta` students when positive, expels the last `|delta|`
    /// when negative.
    pub fn change(&mut self, delta: i64) -> Result<Enrollment, RosterError> {
        if delta == 0 {
            return Ok(Enrollment::Unchanged);
        }
        let count = delta.unsigned_abs();
        if delta > 0 {
            let added = u32::try_from(count)
                .ok()
                .filter(|n| self.enrolled.checked_add(*n).is_some())
                .ok_or(RosterError::TooManyStudents(count))?;
            self.enrolled += added;
            debug!(added, enrolled = self.enrolled, "students enrolled");
            return Ok(Enrollment::Enrolled(added));
        }

        if count > u64::from(self.enrolled) {
            return Err(RosterError::NotEnoughStudents {
                requested: count,
                enrolled: self.enrolled,
            });
        }
        let removed = count as u32;
        let first_gone = self.enrolled - removed + 1;
        self.suspicious.retain(|s| *s < first_gone);
        self.immortal.retain(|s| *s < first_gone);
        self.enrolled -= removed;
        debug!(removed, enrolled = self.enrolled, "students expelled");
        Ok(Enrollment::Expelled(removed))
    }

    /// Marks `student` as suspicious unless immortal.
    pub fn suspect(&mut self, student: u32) -> Result<Suspicion, RosterError> {
        self.ensure_enrolled(student)?;
        if self.immortal.contains(&student) {
            return Ok(Suspicion::Ignored);
        }
        self.suspicious.insert(student);
        Ok(Suspicion::Marked)
    }

    /// Marks `student` as immortal, clearing any suspicion.
    pub fn make_immortal(&mut self, student: u32) -> Result<(), RosterError> {
        self.ensure_enrolled(student)?;
        self.immortal.insert(student);
        self.suspicious.remove(&student);
        Ok(())
    }

    /// Suspicious students in ascending order.
    pub fn expulsion_list(&self) -> impl Iterator<Item = u32> + '_ {
        self.suspicious.iter().copied()
    }

    /// Number of suspicious students.
    pub fn suspicious_count(&self) -> usize {
        self.suspicious.len()
    }

    fn ensure_enrolled(&self, student: u32) -> Result<(), RosterError> {
        if self.is_enrolled(student) {
            Ok(())
        } else {
            Err(RosterError::UnknownStudent(student))
        }
    }
}
