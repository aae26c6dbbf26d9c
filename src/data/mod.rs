pub mod heroes;
pub mod items;

pub use heroes::{StaticHeroSource, DOTA_HERO_NAMES};
pub use items::role_item_keys;
