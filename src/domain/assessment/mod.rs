//! Assessment domain - assignments, answers, dimensions, and feedback.

mod answer;
mod assignment;
mod dimension;
mod feedback;

pub use answer::{Answer, Rating};
pub use assignment::{AssessmentKind, Assignment, AssignmentStatus};
pub use dimension::{Benchmark, Dimension};
pub use feedback::Feedback;
