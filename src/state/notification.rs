/// Transient toast shown over whatever screen is active.
pub struct NotificationState {
    pub current_notification: Option<(String, Option<u64>, bool)>, // message, close_tick, minimal
}

impl Default for NotificationState {
    fn default() -> Self {
        Self {
            current_notification: None,
        }
    }
}

impl NotificationState {
    pub fn set_notification(
        &mut self,
        message: impl Into<String>,
        ms: Option<u64>,
        minimal: bool,
        tick_count: u64,
    ) {
        let close_tick = ms.map(|duration| tick_count + duration / 100);
        self.current_notification = Some((message.into(), close_tick, minimal));
    }

    pub fn clear_notification(&mut self) {
        self.current_notification = None;
    }

    pub fn should_close_notification(&self, tick_count: u64) -> bool {
        if let Some((_, Some(close_tick), _)) = &self.current_notification {
            tick_count >= *close_tick
        } else {
            false
        }
    }
}
