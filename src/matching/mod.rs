pub mod hero_normalizer;
pub mod lineup_form;

pub use hero_normalizer::HeroNormalizer;
pub use lineup_form::{validate_hero_fields, FieldReport, LineupForm};
