use crate::state::{AppError, AppResult};
use notify_rust::{Notification, Timeout};
use tracing::{debug, error};

/// Desktop notification service for system-level notifications
pub struct DesktopNotificationService;

impl DesktopNotificationService {
    /// Show a desktop notification. `enabled` is the user's stored
    /// preference; callers read it from storage so this service stays free
    /// of globals.
    pub fn show_notification(
        title: &str,
        message: &str,
        urgency: NotificationUrgency,
        enabled: bool,
    ) {
        if !enabled {
            debug!("desktop notifications disabled in preferences");
            return;
        }

        // Show notification in a separate task to avoid blocking
        let title = title.to_string();
        let message = message.to_string();

        tokio::spawn(async move {
            if let Err(e) = Self::send_notification(&title, &message, urgency) {
                error!("failed to send desktop notification: {}", e);
            }
        });
    }

    /// Notification for a message pushed to a channel that is not open.
    pub fn show_unread_notification(
        channel_name: &str,
        author: &str,
        preview: &str,
        enabled: bool,
    ) {
        let title = format!("{} in #{}", author, channel_name);
        let message = if preview.len() > 100 {
            format!("{}...", &preview[..97])
        } else {
            preview.to_string()
        };
        Self::show_notification(&title, &message, NotificationUrgency::Normal, enabled);
    }

    fn send_notification(
        title: &str,
        message: &str,
        urgency: NotificationUrgency,
    ) -> AppResult<()> {
        let mut notification = Notification::new();

        notification
            .summary(title)
            .body(message)
            .appname("Meridian")
            .icon("dialog-information")
            .timeout(match urgency {
                NotificationUrgency::Low => Timeout::Milliseconds(3000),
                NotificationUrgency::Normal => Timeout::Milliseconds(5000),
                NotificationUrgency::Critical => Timeout::Milliseconds(8000),
            });

        #[cfg(target_os = "linux")]
        {
            use notify_rust::Urgency;
            let urgency_level = match urgency {
                NotificationUrgency::Low => Urgency::Low,
                NotificationUrgency::Normal => Urgency::Normal,
                NotificationUrgency::Critical => Urgency::Critical,
            };
            notification.urgency(urgency_level);
        }

        notification
            .show()
            .map_err(|e| AppError::Desktop(e.to_string()))?;
        debug!("desktop notification sent: {} - {}", title, message);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum NotificationUrgency {
    Low,
    Normal,
    Critical,
}
