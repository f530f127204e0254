//! Linear undo/redo history for the markdown editor.
//!
//! Snapshots of the raw editor text. Recording while the cursor sits in the
//! middle of the stack truncates the redo tail; the stack is capped and
//! drops its oldest snapshot when full.

const MAX_SNAPSHOTS: usize = 50;

#[derive(Clone, Debug, Default)]
pub struct EditHistory {
    snapshots: Vec<String>,
    cursor: usize,
}

impl EditHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            snapshots: vec![initial.to_string()],
            cursor: 0,
        }
    }

    /// Record a snapshot. Identical to the current one: no-op.
    pub fn record(&mut self, text: &str) {
        if self.current() == Some(text) {
            return;
        }
        // Editing in the middle of the stack discards the redo tail.
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(text.to_string());
        if self.snapshots.len() > MAX_SNAPSHOTS {
            self.snapshots.remove(0);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back and return the previous snapshot, if any.
    pub fn undo(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor).map(String::as_str)
    }

    /// Step forward and return the next snapshot, if any.
    pub fn redo(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor).map(String::as_str)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn current(&self) -> Option<&str> {
        self.snapshots.get(self.cursor).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = EditHistory::new("");
        history.record("a");
        history.record("ab");

        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), Some(""));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some("a"));
        assert_eq!(history.redo(), Some("ab"));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_duplicate_record_is_noop() {
        let mut history = EditHistory::new("a");
        history.record("a");
        history.record("a");

        assert!(!history.can_undo());
        assert_eq!(history.current(), Some("a"));
    }

    #[test]
    fn test_record_after_undo_discards_redo_tail() {
        let mut history = EditHistory::new("");
        history.record("a");
        history.record("ab");
        history.undo();
        history.record("ax");

        assert!(!history.can_redo());
        assert_eq!(history.current(), Some("ax"));
        assert_eq!(history.undo(), Some("a"));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = EditHistory::new("0");
        for i in 1..100 {
            history.record(&i.to_string());
        }

        assert_eq!(history.current(), Some("99"));
        // Walk all the way back: only MAX_SNAPSHOTS survive.
        let mut steps = 0;
        while history.undo().is_some() {
            steps += 1;
        }
        assert_eq!(steps, MAX_SNAPSHOTS - 1);
        assert_eq!(history.current(), Some("50"));
    }

    #[test]
    fn test_button_states() {
        let mut history = EditHistory::new("");
        assert!(!history.can_undo());
        assert!(!history.can_redo());

        history.record("a");
        assert!(history.can_undo());
        assert!(!history.can_redo());

        history.undo();
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }
}
