pub mod deck_templates;
pub mod matches;
