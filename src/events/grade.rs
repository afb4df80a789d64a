//! Typing-performance grade callouts.
//!
//! When a text event ends, the remaining time on its countdown is converted
//! into a six-tier grade and announced through the `Messages<GradeCallout>`
//! mailbox. The host shows these as transient on-screen callouts.

use bevy_ecs::message::Message;
use serde::{Deserialize, Serialize};

/// Six-tier performance grade for a completed text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Grade from the remaining-time proxy at line completion, in seconds.
    pub fn from_remaining(remaining: f32) -> Self {
        if remaining > 5.0 {
            Grade::S
        } else if remaining > 4.0 {
            Grade::A
        } else if remaining > 3.0 {
            Grade::B
        } else if remaining > 2.0 {
            Grade::C
        } else if remaining > 1.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

/// Announcement of a graded text line, consumed by the host UI.
#[derive(Message, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeCallout {
    pub grade: Grade,
    /// Remaining time on the countdown when the line completed.
    pub remaining: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        // The exact boundary table: r>5 S, 4<r<=5 A, 3<r<=4 B,
        // 2<r<=3 C, 1<r<=2 D, r<=1 F.
        assert_eq!(Grade::from_remaining(5.1), Grade::S);
        assert_eq!(Grade::from_remaining(5.0), Grade::A);
        assert_eq!(Grade::from_remaining(4.5), Grade::A);
        assert_eq!(Grade::from_remaining(4.0), Grade::B);
        assert_eq!(Grade::from_remaining(3.0), Grade::C);
        assert_eq!(Grade::from_remaining(2.0), Grade::D);
        assert_eq!(Grade::from_remaining(1.0), Grade::F);
        assert_eq!(Grade::from_remaining(0.0), Grade::F);
        assert_eq!(Grade::from_remaining(-1.0), Grade::F);
    }
}
