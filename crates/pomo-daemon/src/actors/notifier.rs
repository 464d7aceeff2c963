use notify_rust::{Notification, Urgency};
use pomo_core::{NotificationUrgency, PhaseKind};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub enum NotifierMessage {
    PhaseChanged {
        from: PhaseKind,
        to: PhaseKind,
        duration_minutes: u64,
    },
    TimeExceeded {
        phase: PhaseKind,
    },
    Interrupted {
        interruption_count: usize,
    },
}

#[derive(Clone)]
pub struct NotifierHandle {
    sender: mpsc::Sender<NotifierMessage>,
}

impl NotifierHandle {
    pub fn send_phase_changed(&self, from: PhaseKind, to: PhaseKind, duration_minutes: u64) {
        self.dispatch(NotifierMessage::PhaseChanged {
            from,
            to,
            duration_minutes,
        });
    }

    pub fn send_time_exceeded(&self, phase: PhaseKind) {
        self.dispatch(NotifierMessage::TimeExceeded { phase });
    }

    pub fn send_interrupted(&self, interruption_count: usize) {
        self.dispatch(NotifierMessage::Interrupted { interruption_count });
    }

    fn dispatch(&self, message: NotifierMessage) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            if let Err(error) = sender.send(message).await {
                error!(%error, "failed to send notification message");
            }
        });
    }
}

pub struct NotifierActor {
    receiver: mpsc::Receiver<NotifierMessage>,
    urgency: Urgency,
    sound_enabled: bool,
}

impl NotifierActor {
    pub fn new(urgency: NotificationUrgency, sound_enabled: bool) -> (Self, NotifierHandle) {
        let (sender, receiver) = mpsc::channel(32);

        let urgency = match urgency {
            NotificationUrgency::Low => Urgency::Low,
            NotificationUrgency::Normal => Urgency::Normal,
            NotificationUrgency::Critical => Urgency::Critical,
        };

        let actor = Self {
            receiver,
            urgency,
            sound_enabled,
        };

        let handle = NotifierHandle { sender };

        (actor, handle)
    }

    pub async fn run(mut self) {
        info!("notifier actor started");

        while let Some(message) = self.receiver.recv().await {
            let (summary, body) = render_message(&message);
            match self.build_notification(&summary, &body).show() {
                Ok(_) => {
                    debug!(%summary, "notification sent");
                }
                Err(error) => {
                    warn!(%error, %summary, "failed to show notification");
                }
            }
        }

        debug!("notifier actor stopped");
    }

    fn build_notification(&self, summary: &str, body: &str) -> Notification {
        let mut notification = Notification::new();
        notification
            .summary(summary)
            .body(body)
            .urgency(self.urgency)
            .appname("pomo");

        if self.sound_enabled {
            notification.sound_name("alarm-clock-elapsed");
        }

        notification
    }
}

fn render_message(message: &NotifierMessage) -> (String, String) {
    match message {
        NotifierMessage::PhaseChanged {
            from,
            to,
            duration_minutes,
        } => (
            format!("{} {} finished", from.symbol(), from.label()),
            format!("Next up: {} ({} min)", to.label(), duration_minutes),
        ),
        NotifierMessage::TimeExceeded { phase } => (
            format!("{} Time's up", phase.symbol()),
            match phase {
                PhaseKind::Pomodoro => {
                    "Pomodoro complete. Stop when you reach a good spot.".to_string()
                }
                _ => format!("{} is over. Back to work!", phase.label()),
            },
        ),
        NotifierMessage::Interrupted { interruption_count } => (
            "Pomodoro paused".to_string(),
            format!("{} interruption(s) so far", interruption_count),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_change_message_names_both_phases() {
        let (summary, body) = render_message(&NotifierMessage::PhaseChanged {
            from: PhaseKind::Pomodoro,
            to: PhaseKind::ShortBreak,
            duration_minutes: 5,
        });

        assert!(summary.contains("Pomodoro finished"));
        assert_eq!(body, "Next up: Short Break (5 min)");
    }

    #[test]
    fn break_overtime_message_calls_back_to_work() {
        let (_, body) = render_message(&NotifierMessage::TimeExceeded {
            phase: PhaseKind::LongBreak,
        });

        assert_eq!(body, "Long Break is over. Back to work!");
    }

    #[tokio::test]
    async fn handle_can_send_messages() {
        let (actor, handle) = NotifierActor::new(NotificationUrgency::Normal, false);

        let actor_task = tokio::spawn(async move {
            tokio::time::timeout(std::time::Duration::from_millis(100), actor.run()).await
        });

        handle.send_phase_changed(PhaseKind::Pomodoro, PhaseKind::ShortBreak, 5);
        handle.send_time_exceeded(PhaseKind::Pomodoro);
        handle.send_interrupted(2);

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        drop(handle);

        let _ = actor_task.await;
    }
}
