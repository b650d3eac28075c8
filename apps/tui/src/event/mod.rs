mod loop_handler;

pub use loop_handler::{list_datasets, run, run_headless};
