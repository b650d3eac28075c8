// App module for the space weather explorer
// Holds dashboard state, the dataset form and the request handlers

pub mod actions;
pub mod form;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen, Projection};
