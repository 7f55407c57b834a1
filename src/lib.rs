//! Core library for the Relai agent onboarding portal.
//!
//! Everything the portal persists lives as JSON text under named keys in a
//! key-value store, so the crate is organized around three concerns: the
//! [`storage`] backend abstraction, the [`onboarding`] domain (records,
//! normalization, the form wizard, reports, and the admin console), and the
//! ambient [`config`]/[`telemetry`] plumbing used by the demo binary.

pub mod config;
pub mod error;
pub mod onboarding;
pub mod storage;
pub mod telemetry;
