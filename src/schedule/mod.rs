pub mod types;
pub mod partition;
pub mod matching;
pub mod generate;
pub mod swap;

pub use types::{AssignmentResult, Match, Pod, ScheduleWarning};
pub use partition::{partition_players, validate_fixed_pods};
pub use matching::{schedule_pod, HISTORY_PENALTY, MAX_JITTER};
pub use generate::{generate_pods, make_rng, GenerateOptions};
pub use swap::swap_players;
