//! PostgreSQL adapters - sqlx implementations of the storage ports.

mod answer_repository;
mod assignment_repository;
mod benchmark_repository;
mod client_repository;
mod group_repository;
mod profile_repository;
mod scoring_reader;

pub use answer_repository::{PostgresAnswerRepository, PostgresFeedbackRepository};
pub use assignment_repository::PostgresAssignmentRepository;
pub use benchmark_repository::PostgresBenchmarkRepository;
pub use client_repository::PostgresClientRepository;
pub use group_repository::PostgresGroupRepository;
pub use profile_repository::PostgresProfileRepository;
pub use scoring_reader::PostgresScoringReader;
