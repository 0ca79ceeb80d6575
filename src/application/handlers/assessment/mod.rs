//! Assessment use cases - assignment creation and answer submission.

mod create_assignment;
mod submit_answers;

pub use create_assignment::{
    CreateAssignmentCommand, CreateAssignmentHandler, CreateAssignmentResult,
};
pub use submit_answers::{
    AnswerInput, SubmitAnswersCommand, SubmitAnswersHandler, SubmitAnswersResult,
};
