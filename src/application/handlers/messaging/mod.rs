//! Messaging use cases - outbound transactional email.

mod send_assessment_email;

pub use send_assessment_email::{
    SendAssessmentEmailCommand, SendAssessmentEmailHandler, SendAssessmentEmailResult,
};
