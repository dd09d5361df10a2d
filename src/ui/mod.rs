pub mod arena_scene;
pub mod event_log;
pub mod game_common;

use crate::assets::AssetCatalog;
use crate::core::ArenaState;
use ratatui::Frame;

pub use event_log::EventLog;

/// Main UI drawing function.
pub fn draw_ui(
    frame: &mut Frame,
    state: &ArenaState,
    catalog: &AssetCatalog,
    log: &EventLog,
    quit_pending: bool,
) {
    let size = frame.size();
    arena_scene::render_arena_scene(frame, size, state, catalog, log, quit_pending);
}
