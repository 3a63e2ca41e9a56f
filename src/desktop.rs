// Desktop integration: running-program discovery for the activity status
// feature. Only available where the client can see local processes; on
// other platforms `detect` returns None and the settings screen goes inert.

use crate::app::AppEvent;
use crate::proto::{Program, TrackedProgram};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub trait DesktopIntegration: Send + Sync {
    /// Programs currently running, minus the ones in `exclude`.
    fn get_running_programs(&self, exclude: &[TrackedProgram]) -> Vec<Program>;

    /// Restart status broadcasting against a new tracked list.
    fn restart_activity_status(&self, tracked: &[TrackedProgram]);
}

/// Probe for a usable integration on this platform.
pub fn detect() -> Option<Arc<dyn DesktopIntegration>> {
    #[cfg(target_os = "linux")]
    {
        Some(Arc::new(ProcScanner::default()))
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Spawn the 3-second poller that feeds detected programs back into the
/// event loop. A change to the tracked list triggers an immediate re-poll.
/// The returned token cancels the task when the settings screen unmounts.
pub fn spawn_program_poller(
    integration: Arc<dyn DesktopIntegration>,
    mut tracked_rx: watch::Receiver<Vec<TrackedProgram>>,
    events: mpsc::UnboundedSender<AppEvent>,
    interval_ms: u64,
) -> CancellationToken {
    let token = CancellationToken::new();
    let task_token = token.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            tokio::select! {
                _ = task_token.cancelled() => break,
                _ = interval.tick() => {}
                changed = tracked_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
            let exclude = tracked_rx.borrow().clone();
            let programs = integration.get_running_programs(&exclude);
            if events.send(AppEvent::Programs(programs)).is_err() {
                break;
            }
        }
        debug!("program poller stopped");
    });
    token
}

/// Drop programs whose filename is already tracked.
pub fn filter_excluded(programs: Vec<Program>, exclude: &[TrackedProgram]) -> Vec<Program> {
    programs
        .into_iter()
        .filter(|p| !exclude.iter().any(|t| t.filename == p.filename))
        .collect()
}

/// `/proc`-backed integration for Linux.
#[derive(Default)]
pub struct ProcScanner {
    broadcast_list: Mutex<Vec<TrackedProgram>>,
}

impl ProcScanner {
    fn running_programs(&self) -> Vec<Program> {
        let mut programs: Vec<Program> = Vec::new();
        let Ok(entries) = std::fs::read_dir("/proc") else {
            return programs;
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(pid) = name.to_str().filter(|n| n.chars().all(|c| c.is_ascii_digit()))
            else {
                continue;
            };
            let comm_path = format!("/proc/{}/comm", pid);
            let Ok(comm) = std::fs::read_to_string(comm_path) else {
                continue;
            };
            let filename = comm.trim().to_string();
            if filename.is_empty() {
                continue;
            }
            if programs.iter().any(|p| p.filename == filename) {
                continue;
            }
            programs.push(Program {
                name: filename.clone(),
                filename,
            });
        }
        programs.sort_by(|a, b| a.filename.cmp(&b.filename));
        programs
    }
}

impl DesktopIntegration for ProcScanner {
    fn get_running_programs(&self, exclude: &[TrackedProgram]) -> Vec<Program> {
        filter_excluded(self.running_programs(), exclude)
    }

    fn restart_activity_status(&self, tracked: &[TrackedProgram]) {
        let mut list = self.broadcast_list.lock().expect("broadcast list poisoned");
        *list = tracked.to_vec();
        info!("activity status broadcasting restarted with {} program(s)", tracked.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(filename: &str) -> Program {
        Program {
            filename: filename.to_string(),
            name: filename.to_string(),
        }
    }

    fn tracked(filename: &str) -> TrackedProgram {
        TrackedProgram {
            filename: filename.to_string(),
            name: filename.to_string(),
            action: "Playing".to_string(),
        }
    }

    #[test]
    fn tracked_filenames_are_excluded_from_poll_results() {
        let detected = vec![program("quake"), program("osu"), program("vim")];
        let filtered = filter_excluded(detected, &[tracked("osu")]);
        let names: Vec<_> = filtered.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, vec!["quake", "vim"]);
    }

    #[test]
    fn empty_exclude_list_keeps_everything() {
        let detected = vec![program("quake"), program("osu")];
        assert_eq!(filter_excluded(detected, &[]).len(), 2);
    }

    #[tokio::test]
    async fn poller_stops_when_cancelled() {
        struct NoPrograms;
        impl DesktopIntegration for NoPrograms {
            fn get_running_programs(&self, _exclude: &[TrackedProgram]) -> Vec<Program> {
                Vec::new()
            }
            fn restart_activity_status(&self, _tracked: &[TrackedProgram]) {}
        }

        let (tracked_tx, tracked_rx) = watch::channel(Vec::new());
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let token = spawn_program_poller(Arc::new(NoPrograms), tracked_rx, events_tx, 10);

        // First poll arrives, then cancellation stops the stream.
        assert!(events_rx.recv().await.is_some());
        token.cancel();
        tokio::time::sleep(Duration::from_millis(50)).await;
        while events_rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(events_rx.try_recv().is_err());
        drop(tracked_tx);
    }
}
