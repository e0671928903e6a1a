//! Terminal UI: board rendering and the interactive game loop that drives the
//! move scheduler.

mod app;
mod game_view;

pub use app::App;
