pub mod board;
pub mod board_overlay;
pub mod controls_panel;
pub mod game_info_panel;

pub use board::{BoardGeometry, BoardWidget};
pub use board_overlay::{AnnotationOverlay, Arrow, ArrowShape};
pub use controls_panel::ControlsPanel;
pub use game_info_panel::GameInfoPanel;
