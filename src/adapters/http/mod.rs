//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own module with `dto.rs`, `handlers.rs`, and
//! `routes.rs`; `error.rs` carries the shared JSON error bodies and the
//! DomainError -> status mapping; `middleware` holds authentication.

pub mod assignments;
pub mod benchmarks;
pub mod clients;
pub mod emails;
pub mod error;
pub mod groups;
pub mod middleware;
pub mod profiles;
pub mod reports;

pub use assignments::{assignments_routes, AssignmentsHandlers};
pub use benchmarks::{benchmarks_routes, dimensions_routes, BenchmarksHandlers};
pub use clients::{clients_routes, ClientsHandlers};
pub use emails::{emails_routes, EmailsHandlers};
pub use groups::{groups_routes, GroupsHandlers};
pub use profiles::{profiles_routes, ProfilesHandlers};
pub use reports::{reports_routes, ReportsHandlers};
