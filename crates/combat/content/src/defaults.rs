//! Default content compiled into the crate.

pub const SKILLS: &str = include_str!("../data/skills.ron");
pub const STATUSES: &str = include_str!("../data/statuses.ron");
pub const ITEMS: &str = include_str!("../data/items.ron");
pub const LAWS: &str = include_str!("../data/laws.toml");
pub const COMBAT: &str = include_str!("../data/combat.toml");
pub const ROSTER: &str = include_str!("../data/roster.ron");
