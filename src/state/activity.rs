use crate::proto::{Program, TrackedProgram};
use ratatui::widgets::ListState;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityFocus {
    Detected,
    Tracked,
}

/// State for the activity-status settings screen. The tracked list is
/// persisted; the poller task reads it through the watch channel so the
/// integration can exclude already-tracked programs.
pub struct ActivityState {
    pub tracked: Vec<TrackedProgram>,
    pub detected: Vec<Program>,
    pub focus: ActivityFocus,
    pub detected_list_state: ListState,
    pub tracked_list_state: ListState,
    tracked_tx: watch::Sender<Vec<TrackedProgram>>,
}

impl ActivityState {
    pub fn new(tracked: Vec<TrackedProgram>) -> Self {
        let (tracked_tx, _) = watch::channel(tracked.clone());
        Self {
            tracked,
            detected: Vec::new(),
            focus: ActivityFocus::Detected,
            detected_list_state: ListState::default(),
            tracked_list_state: ListState::default(),
            tracked_tx,
        }
    }

    /// Receiver end for the poller task's exclude list.
    pub fn watch_tracked(&self) -> watch::Receiver<Vec<TrackedProgram>> {
        self.tracked_tx.subscribe()
    }

    pub fn set_detected(&mut self, programs: Vec<Program>) {
        self.detected = programs;
        let len = self.detected.len();
        if len == 0 {
            self.detected_list_state.select(None);
        } else if self.detected_list_state.selected().map_or(true, |s| s >= len) {
            self.detected_list_state.select(Some(0));
        }
    }

    /// Track a detected program with the default action label.
    pub fn add_program(&mut self, program: Program) -> &[TrackedProgram] {
        self.tracked.push(TrackedProgram {
            filename: program.filename,
            name: program.name,
            action: "Playing".to_string(),
        });
        let _ = self.tracked_tx.send(self.tracked.clone());
        &self.tracked
    }

    /// Remove one tracked entry by index. Removal is positional so exactly
    /// one entry goes away even when two entries share a filename.
    pub fn remove_program(&mut self, index: usize) -> Option<TrackedProgram> {
        if index >= self.tracked.len() {
            return None;
        }
        let removed = self.tracked.remove(index);
        let _ = self.tracked_tx.send(self.tracked.clone());
        if self.tracked.is_empty() {
            self.tracked_list_state.select(None);
        } else if self
            .tracked_list_state
            .selected()
            .map_or(false, |s| s >= self.tracked.len())
        {
            self.tracked_list_state.select(Some(self.tracked.len() - 1));
        }
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(filename: &str) -> Program {
        Program {
            filename: filename.to_string(),
            name: filename.trim_end_matches(".exe").to_string(),
        }
    }

    #[test]
    fn added_program_gets_default_action() {
        let mut activity = ActivityState::new(Vec::new());
        activity.add_program(program("quake.exe"));
        assert_eq!(activity.tracked.len(), 1);
        assert_eq!(activity.tracked[0].action, "Playing");
    }

    #[test]
    fn removal_drops_exactly_one_entry_even_with_duplicate_filenames() {
        let mut activity = ActivityState::new(Vec::new());
        activity.add_program(program("quake.exe"));
        activity.add_program(program("quake.exe"));
        assert_eq!(activity.tracked.len(), 2);

        let removed = activity.remove_program(0).unwrap();
        assert_eq!(removed.filename, "quake.exe");
        assert_eq!(activity.tracked.len(), 1);
        assert_eq!(activity.tracked[0].filename, "quake.exe");
    }

    #[test]
    fn watch_channel_follows_the_tracked_list() {
        let mut activity = ActivityState::new(Vec::new());
        let rx = activity.watch_tracked();
        activity.add_program(program("osu.exe"));
        assert_eq!(rx.borrow().len(), 1);
        activity.remove_program(0);
        assert!(rx.borrow().is_empty());
    }

    #[test]
    fn out_of_range_removal_is_a_no_op() {
        let mut activity = ActivityState::new(Vec::new());
        activity.add_program(program("osu.exe"));
        assert!(activity.remove_program(5).is_none());
        assert_eq!(activity.tracked.len(), 1);
    }
}
