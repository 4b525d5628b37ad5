// Re-export session types
pub use crate::state::{
    SessionState, SyncController, SyncError, SyncEvent, SyncPhase, TerminationReason,
};

// Re-export board interaction types
pub use crate::ui::gesture::{
    ActiveDrag, DragState, GestureEngine, GestureOutcome, GestureRejection, PointerHit,
};
pub use crate::ui::surface::{BoardSurface, Cell, HighlightKind, Shade};
pub use crate::ui::widgets::{AnnotationOverlay, Arrow, ArrowShape, BoardGeometry};
pub use crate::ui::App;
