pub mod game_data;
pub mod hero;
pub mod lineup;
pub mod role;

pub use game_data::{Ability, AbilityStat, GameData, Item, MetaStats, RankBracket};
pub use hero::Hero;
pub use lineup::{Lineup, SlotInput, TeamSlot, TipsRequest};
pub use role::Role;
