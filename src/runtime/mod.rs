pub mod editor;
pub mod event_loop;

pub use editor::{CursorPos, Direction, EditorState};
pub use event_loop::run;
