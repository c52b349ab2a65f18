pub mod cli;
pub mod commits;
pub mod dataset;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod page;
pub mod plot;
pub mod profile;
pub mod projects;
pub mod scale;
pub mod selection;
pub mod stats;
pub mod tooltip;
pub mod tui;
pub mod util;
