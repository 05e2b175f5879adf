//! Sprintdesk: conversational agile tracking.
//!
//! This crate runs projects, sprints and task reviews for a small team
//! through multi-step chat dialogs. A transport feeds inbound events to the
//! dialog engine and delivers the replies it returns.
//!
//! # Architecture
//!
//! Sprintdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`access`]: Roles and the authorization guard
//! - [`tracker`]: Entities, the entity store and the task/sprint lifecycle
//! - [`session`]: Per-user dialog scratch state
//! - [`dialog`]: Triggers, dialog state machines and reply rendering
//! - [`config`]: Environment-backed settings
//! - [`telemetry`]: Log subscriber bootstrap

pub mod access;
pub mod config;
pub mod dialog;
pub mod session;
pub mod telemetry;
pub mod tracker;
