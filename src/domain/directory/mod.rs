//! Directory domain - clients, profiles, and groups.

mod client;
mod group;
mod profile;

pub use client::Client;
pub use group::Group;
pub use profile::{validate_email, Profile};
