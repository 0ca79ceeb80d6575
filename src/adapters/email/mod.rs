//! Email adapters - SES, Resend, and transient-error failover.

mod failover;
mod resend;
mod ses;

pub use failover::FailoverEmailSender;
pub use resend::ResendEmailSender;
pub use ses::SesEmailSender;
