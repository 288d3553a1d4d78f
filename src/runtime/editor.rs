//! Viewport model: cursor position and scroll offsets in document space.

use crate::core::document::Document;

/// Cursor location in document coordinates.
///
/// `row` may equal the document's line count (the end-of-document position,
/// with no addressable line). `col` is a byte offset into the addressed
/// line, up to and including its length (the append position); when no line
/// is addressed it is bounded by the screen width instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorPos {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Cursor plus the visible window over the document.
///
/// Invariant, restored by [`EditorState::scroll`] before every render:
/// `row_offset <= cursor.row < row_offset + screen_rows` and
/// `col_offset <= cursor.col < col_offset + screen_cols`.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub cursor: CursorPos,
    pub row_offset: usize,
    pub col_offset: usize,
    pub screen_rows: usize,
    pub screen_cols: usize,
}

impl EditorState {
    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            cursor: CursorPos::default(),
            row_offset: 0,
            col_offset: 0,
            screen_rows,
            screen_cols,
        }
    }

    /// Adopt a new window size, keeping the cursor visible.
    pub fn resize(&mut self, screen_rows: usize, screen_cols: usize) {
        self.screen_rows = screen_rows;
        self.screen_cols = screen_cols;
        self.scroll();
    }

    /// One single-step cursor move, clamped at document boundaries.
    ///
    /// Horizontal moves stop at column 0 and at the line's length (the
    /// append position); they do not wrap. Vertical moves stop at row 0 and
    /// at the line count, one past the last line.
    pub fn move_cursor(&mut self, direction: Direction, document: &Document) {
        match direction {
            Direction::Left => {
                if self.cursor.col > 0 {
                    self.cursor.col -= 1;
                }
            }
            Direction::Right => {
                if self.cursor.col < self.column_bound(document) {
                    self.cursor.col += 1;
                }
            }
            Direction::Up => {
                if self.cursor.row > 0 {
                    self.cursor.row -= 1;
                }
            }
            Direction::Down => {
                if self.cursor.row < document.line_count() {
                    self.cursor.row += 1;
                }
            }
        }
        // A vertical move can land on a shorter line; snap the column back
        // inside the new line's bounds.
        let bound = self.column_bound(document);
        if self.cursor.col > bound {
            self.cursor.col = bound;
        }
    }

    /// Jump to column 0.
    pub fn jump_home(&mut self) {
        self.cursor.col = 0;
    }

    /// Jump to the line's append position, or to the right screen edge when
    /// no line is addressed.
    pub fn jump_end(&mut self, document: &Document) {
        self.cursor.col = self.column_bound(document);
    }

    /// One page of movement: `screen_rows` repeated single steps, so the
    /// stopping behavior at document edges is identical to single-step
    /// movement.
    pub fn page_move(&mut self, direction: Direction, document: &Document) {
        for _ in 0..self.screen_rows {
            self.move_cursor(direction, document);
        }
    }

    /// Clamp the scroll offsets toward the cursor.
    ///
    /// Offsets move only when the cursor has left the visible window; a
    /// cursor already inside it never triggers a re-center.
    pub fn scroll(&mut self) {
        if self.cursor.row < self.row_offset {
            self.row_offset = self.cursor.row;
        }
        if self.cursor.row >= self.row_offset + self.screen_rows {
            self.row_offset = self.cursor.row + 1 - self.screen_rows;
        }
        if self.cursor.col < self.col_offset {
            self.col_offset = self.cursor.col;
        }
        if self.cursor.col >= self.col_offset + self.screen_cols {
            self.col_offset = self.cursor.col + 1 - self.screen_cols;
        }
    }

    /// Rightmost legal column for the cursor's row.
    fn column_bound(&self, document: &Document) -> usize {
        match document.line(self.cursor.row) {
            Some(line) => line.len(),
            None => self.screen_cols.saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, EditorState};
    use crate::core::document::{Document, Line};

    fn doc(lines: &[&str]) -> Document {
        Document::new(lines.iter().map(|text| Line::from(*text)).collect())
    }

    #[test]
    fn horizontal_movement_stops_at_line_bounds() {
        let document = doc(&["ab"]);
        let mut state = EditorState::new(24, 80);

        state.move_cursor(Direction::Left, &document);
        assert_eq!(state.cursor.col, 0);

        for _ in 0..5 {
            state.move_cursor(Direction::Right, &document);
        }
        // One past the last character is the append position.
        assert_eq!(state.cursor.col, 2);
    }

    #[test]
    fn vertical_movement_stops_at_document_bounds() {
        let document = doc(&["one", "two"]);
        let mut state = EditorState::new(24, 80);

        state.move_cursor(Direction::Up, &document);
        assert_eq!(state.cursor.row, 0);

        for _ in 0..5 {
            state.move_cursor(Direction::Down, &document);
        }
        // One past the last line is the end-of-document position.
        assert_eq!(state.cursor.row, 2);
    }

    #[test]
    fn column_snaps_when_moving_to_a_shorter_line() {
        let document = doc(&["a longer first line", "ab"]);
        let mut state = EditorState::new(24, 80);
        state.jump_end(&document);
        assert_eq!(state.cursor.col, 19);

        state.move_cursor(Direction::Down, &document);
        assert_eq!(state.cursor.row, 1);
        assert_eq!(state.cursor.col, 2);
    }

    #[test]
    fn jump_end_falls_back_to_screen_edge_without_a_document() {
        let document = Document::default();
        let mut state = EditorState::new(24, 80);
        state.jump_end(&document);
        assert_eq!(state.cursor.col, 79);

        state.jump_home();
        assert_eq!(state.cursor.col, 0);
    }

    #[test]
    fn page_move_clamps_like_single_steps() {
        let document = doc(&["1", "2", "3", "4", "5"]);
        let mut state = EditorState::new(24, 80);

        state.page_move(Direction::Down, &document);
        assert_eq!(state.cursor.row, 5);

        state.page_move(Direction::Up, &document);
        assert_eq!(state.cursor.row, 0);
    }

    #[test]
    fn scroll_follows_the_cursor_downward_and_back() {
        let lines: Vec<String> = (0..100).map(|n| n.to_string()).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let document = doc(&refs);
        let mut state = EditorState::new(10, 80);

        for _ in 0..25 {
            state.move_cursor(Direction::Down, &document);
            state.scroll();
            assert!(state.row_offset <= state.cursor.row);
            assert!(state.cursor.row < state.row_offset + state.screen_rows);
        }
        assert_eq!(state.row_offset, 16);

        for _ in 0..25 {
            state.move_cursor(Direction::Up, &document);
            state.scroll();
        }
        assert_eq!(state.cursor.row, 0);
        assert_eq!(state.row_offset, 0);
    }

    #[test]
    fn scroll_never_recenters_inside_the_window() {
        let mut state = EditorState::new(10, 80);
        state.row_offset = 0;
        state.cursor.row = 2;
        state.scroll();
        assert_eq!(state.row_offset, 0);
    }

    #[test]
    fn horizontal_scroll_tracks_long_lines() {
        let long = "x".repeat(200);
        let document = doc(&[long.as_str()]);
        let mut state = EditorState::new(24, 80);

        state.jump_end(&document);
        state.scroll();
        assert_eq!(state.cursor.col, 200);
        assert_eq!(state.col_offset, 121);
        assert!(state.col_offset <= state.cursor.col);
        assert!(state.cursor.col < state.col_offset + state.screen_cols);

        state.jump_home();
        state.scroll();
        assert_eq!(state.col_offset, 0);
    }

    #[test]
    fn movement_never_leaves_legal_ranges() {
        let document = doc(&["short", "a somewhat longer line", "", "tail"]);
        let mut state = EditorState::new(4, 10);
        let steps = [
            Direction::Down,
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Up,
            Direction::Up,
            Direction::Up,
            Direction::Up,
            Direction::Up,
        ];
        for step in steps {
            state.move_cursor(step, &document);
            state.scroll();
            assert!(state.cursor.row <= document.line_count());
            match document.line(state.cursor.row) {
                Some(line) => assert!(state.cursor.col <= line.len()),
                None => assert!(state.cursor.col < state.screen_cols),
            }
        }
    }
}
