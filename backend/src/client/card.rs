//! Stamp card view model.

use crate::domain::MAX_STAMPS;

use super::model::Student;

/// One of the seven progress dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Filled,
    Empty,
}

/// What the card view renders for a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampCardView {
    pub title: String,
    pub codigo: String,
    pub sellos: u8,
}

impl StampCardView {
    #[must_use]
    pub fn new(student: &Student) -> Self {
        Self {
            title: student.full_name(),
            codigo: student.codigo.clone(),
            sellos: student.sellos.min(MAX_STAMPS),
        }
    }

    /// Stamps still needed to complete the card.
    #[must_use]
    pub fn remaining(&self) -> u8 {
        MAX_STAMPS - self.sellos
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sellos == MAX_STAMPS
    }

    /// Progress dots, filled ones first.
    #[must_use]
    pub fn slots(&self) -> [Slot; MAX_STAMPS as usize] {
        std::array::from_fn(|i| {
            if i < usize::from(self.sellos) {
                Slot::Filled
            } else {
                Slot::Empty
            }
        })
    }

    /// Image path for the current count; `None` before the first stamp.
    #[must_use]
    pub fn image(&self) -> Option<String> {
        (self.sellos > 0).then(|| format!("/card{}.jpg", self.sellos))
    }

    /// Completed fraction in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        f32::from(self.sellos) / f32::from(MAX_STAMPS)
    }
}

impl From<&Student> for StampCardView {
    fn from(value: &Student) -> Self {
        Self::new(value)
    }
}
