pub mod documents;
pub mod poll;
pub mod quiz;
