//! Frame-stepped simulation core for a vertical arcade shooter.
//!
//! The crate is split the same way the game loop runs: a [`clock`] turns wall
//! time into ticks, [`compute`] holds the per-tick passes, and
//! [`session::GameSession`] owns every entity and drives the passes in order.
//! Rendering, audio and input live outside the core and talk to it through
//! [`snapshot::RenderSnapshot`], [`audio::AudioEvent`] and
//! [`entities::ControlState`].

pub mod audio;
pub mod clock;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod highscore;
pub mod session;
pub mod snapshot;
pub mod store;

pub use config::GameConfig;
pub use entities::ControlState;
pub use session::GameSession;
pub use snapshot::RenderSnapshot;
