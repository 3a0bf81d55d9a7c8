//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the transport layer decoupled from storage details.

pub mod campaign_service;
pub mod contributor_service;
