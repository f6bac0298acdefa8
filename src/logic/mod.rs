//! Tournament business logic: schedule generation, groups, results, standings.

mod groups;
mod results;
mod schedule;
mod standings;

pub use groups::{build_group, build_groups, partition_into_groups, partition_into_groups_with_rng};
pub use results::{checked_score, record_result};
pub use schedule::{generate_schedule, validate_group_size, MIN_GROUP_SIZE};
pub use standings::{compute_standings, head_to_head, refresh_standings};
