pub mod globe;
pub mod hints;
pub mod popup;
pub mod tables;
