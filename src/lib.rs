//! League pod assignment and match scheduling.
//!
//! Splits a league roster into pods near a target size, schedules the games
//! each pod plays, and steers away from pairings recorded in the match
//! history. Fixed pods and post-generation swaps are supported.
//!
//! ```text
//! roster + history + config
//!   -> schedule::partition   (pods, members only)
//!   -> schedule::matching    (round-robin or weighted overflow games)
//!   -> schedule::generate    (AssignmentResult)
//!   -> storage               (persist, fold matches into history)
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod parser;
pub mod roster;
pub mod schedule;
pub mod storage;
pub mod web;

pub use error::{ConfigError, ImportError, PodError, PodResult, StorageError};
pub use history::{HistoricalPairing, MatchHistory};
pub use roster::{League, Player};
pub use schedule::{
    generate_pods, swap_players, AssignmentResult, GenerateOptions, Match, Pod, ScheduleWarning,
};
pub use storage::JsonStorage;
