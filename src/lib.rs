//! Talentscope - Multi-Tenant Talent-Assessment Platform
//!
//! This crate implements the backend for 360-degree and leader assessments:
//! clients upload users and groups, assign assessments, collect answers,
//! score them against industry benchmarks and group norms, and export
//! PDF reports through a headless browser or a declarative renderer.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
