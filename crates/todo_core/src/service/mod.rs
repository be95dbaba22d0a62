//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into owner-scoped use-case APIs.
//! - Keep callers decoupled from storage details.

pub mod todo_service;
