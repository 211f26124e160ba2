//! Jungle game service.
//!
//! Wraps the [`jungle_game`] core in named sessions and exposes them over
//! JSON/HTTP:
//!
//! - **Config**: TOML settings with CLI overrides
//! - **Service**: session registry, per-session locking, AI turns
//! - **Routes**: axum handlers for the `/api/*` endpoints
//! - **Self-play**: headless AI-versus-AI games

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod routes;
mod self_play;
mod service;

pub use config::{ConfigError, ServerConfig};
pub use routes::{
    AiMoveRequest, MoveRequest, NewGameRequest, OptionalJson, SessionRequest,
    ValidMovesRequest, ValidMovesResponse, router,
};
pub use self_play::{SelfPlayConfig, SelfPlayReport, self_play};
pub use service::{AiTurn, DEFAULT_SESSION, GameService, MoveView, ServiceError, SessionId};
