//! JetLime egui - timeline widgets for egui
//!
//! Provides:
//! - `EguiCanvas`, the engine's `Canvas` over egui shapes
//! - Immediate-mode event, column and row widgets around egui content
//! - `TimelineView` for retained `JetLimeColumn` / `JetLimeRow` containers

pub mod canvas;
pub mod event;
pub mod view;

pub use canvas::{gradient_line_mesh, to_color32, to_egui_rect, to_pos2, EguiCanvas, IconResolver};
pub use event::{point_radius_factor, timeline_column, timeline_row, EventWidget};
pub use view::{TimelineResponse, TimelineView};
