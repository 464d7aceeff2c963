use pomo_core::{
    apply_tick_events, Command, ConfigureError, EngineEvent, EngineSnapshot, PhaseKind,
    SessionDurations, SessionEngine,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace};

use super::{IntervalScheduler, NotifierHandle};

pub enum SessionMessage {
    Execute {
        command: Command,
        reply: oneshot::Sender<CommandReply>,
    },
    Configure {
        durations: SessionDurations,
        reply: oneshot::Sender<Result<EngineSnapshot, ConfigureError>>,
    },
    GetStatus {
        reply: oneshot::Sender<EngineSnapshot>,
    },
}

#[derive(Debug, Clone)]
pub struct CommandReply {
    pub applied: bool,
    pub snapshot: EngineSnapshot,
}

pub struct SessionActor {
    receiver: mpsc::Receiver<SessionMessage>,
    engine: SessionEngine,
    scheduler: IntervalScheduler,
    notifier: Option<NotifierHandle>,
    overtime_notified: bool,
}

#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
}

impl SessionHandle {
    pub async fn execute(&self, command: Command) -> Option<CommandReply> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(SessionMessage::Execute {
                command,
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }

    pub async fn configure(
        &self,
        durations: SessionDurations,
    ) -> Option<Result<EngineSnapshot, ConfigureError>> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(SessionMessage::Configure {
                durations,
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }

    pub async fn get_status(&self) -> Option<EngineSnapshot> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(SessionMessage::GetStatus {
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }
}

impl SessionActor {
    pub fn new(engine: SessionEngine, notifier: Option<NotifierHandle>) -> (Self, SessionHandle) {
        let (sender, receiver) = mpsc::channel(32);

        let actor = Self {
            receiver,
            engine,
            scheduler: IntervalScheduler::default(),
            notifier,
            overtime_notified: false,
        };

        let handle = SessionHandle { sender };

        (actor, handle)
    }

    pub async fn run(mut self) {
        info!(
            phase = %self.engine.current_phase(),
            tick_interval_ms = self.engine.tick_interval_ms(),
            "session actor started"
        );

        loop {
            tokio::select! {
                message = self.receiver.recv() => {
                    match message {
                        Some(message) => self.handle_message(message),
                        None => break,
                    }
                }
                _ = self.scheduler.tick() => {
                    let events = self.engine.on_tick();
                    self.dispatch(&events);
                }
            }
        }

        debug!("session actor stopped");
    }

    fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Execute { command, reply } => {
                let events = self.engine.execute(command);
                let applied = !events.is_empty();
                if applied {
                    debug!(?command, "command applied");
                } else {
                    debug!(?command, state = self.engine.state().as_str(), "command ignored");
                }
                self.dispatch(&events);

                let _ = reply.send(CommandReply {
                    applied,
                    snapshot: self.engine.snapshot(),
                });
            }
            SessionMessage::Configure { durations, reply } => {
                let result = self.engine.configure(durations).map(|_| {
                    info!(?durations, "durations reconfigured");
                    self.engine.snapshot()
                });
                let _ = reply.send(result);
            }
            SessionMessage::GetStatus { reply } => {
                let _ = reply.send(self.engine.snapshot());
            }
        }
    }

    fn dispatch(&mut self, events: &[EngineEvent]) {
        apply_tick_events(events, &mut self.scheduler);

        for event in events {
            if let Some(cue) = event.cue() {
                trace!(?event, ?cue, "cue");
            }

            match *event {
                EngineEvent::PhaseStarted(phase) => {
                    info!(%phase, "phase started");
                    self.overtime_notified = false;
                }
                EngineEvent::PhaseChanged { from, to } => {
                    let snapshot = self.engine.snapshot();
                    info!(
                        %from,
                        %to,
                        total_pomodoros = snapshot.total_pomodoro_count,
                        total_minutes = snapshot.total_pomodoro_minutes,
                        until_long_break = snapshot.pomodoros_until_long_break,
                        "phase changed"
                    );
                    self.overtime_notified = false;
                    if let Some(ref notifier) = self.notifier {
                        notifier.send_phase_changed(
                            from,
                            to,
                            self.engine.durations().minutes_for(to),
                        );
                    }
                }
                EngineEvent::TimeExceeded(phase) => {
                    if !self.overtime_notified {
                        info!(%phase, "time limit reached");
                        self.overtime_notified = true;
                        self.notify_time_exceeded(phase);
                    }
                }
                EngineEvent::InterruptionRecorded => {
                    let count = self.engine.interruptions().len();
                    info!(interruptions = count, "pomodoro paused");
                    if let Some(ref notifier) = self.notifier {
                        notifier.send_interrupted(count);
                    }
                }
                EngineEvent::PomodoroResumed => info!("pomodoro resumed"),
                EngineEvent::SideActivityStarted => info!("side activity started"),
                EngineEvent::SideActivityStopped { credited_minutes } => {
                    info!(credited_minutes, "side activity stopped");
                }
                EngineEvent::TicksRequested { interval_ms } => {
                    debug!(interval_ms, "tick stream registered");
                }
                EngineEvent::TicksHalted => {
                    debug!(active = self.scheduler.is_active(), "tick stream cancelled");
                }
                EngineEvent::RoutineTick(_) | EngineEvent::SideActivityTick { .. } => {}
            }
        }
    }

    fn notify_time_exceeded(&self, phase: PhaseKind) {
        if let Some(ref notifier) = self.notifier {
            notifier.send_time_exceeded(phase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo_core::EngineState;
    use std::time::Duration;

    fn create_test_actor() -> (SessionActor, SessionHandle) {
        SessionActor::new(SessionEngine::default(), None)
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_get_status() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        let reply = handle.execute(Command::Start).await.unwrap();
        assert!(reply.applied);
        assert_eq!(reply.snapshot.state, EngineState::Running);

        tokio::time::sleep(Duration::from_millis(1_750)).await;

        let status = handle.get_status().await.unwrap();
        assert_eq!(status.phase, PhaseKind::Pomodoro);
        assert_eq!(status.elapsed_ms, 1_500);
        assert!(!status.paused);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_elapsed_time() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        handle.execute(Command::Start).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1_250)).await;

        let reply = handle.execute(Command::PauseResume).await.unwrap();
        assert!(reply.snapshot.paused);
        assert_eq!(reply.snapshot.interruption_count, 1);

        tokio::time::sleep(Duration::from_secs(10)).await;

        let status = handle.get_status().await.unwrap();
        assert_eq!(status.elapsed_ms, 1_000);
        assert_eq!(status.state, EngineState::Paused);
    }

    #[tokio::test]
    async fn ignored_command_is_reported() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        let reply = handle.execute(Command::Stop).await.unwrap();

        assert!(!reply.applied);
        assert_eq!(reply.snapshot.state, EngineState::Idle);
    }

    #[tokio::test]
    async fn skip_moves_to_short_break() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        let reply = handle.execute(Command::Skip).await.unwrap();

        assert!(reply.applied);
        assert_eq!(reply.snapshot.phase, PhaseKind::ShortBreak);
        assert_eq!(reply.snapshot.total_pomodoro_count, 1);
    }

    #[tokio::test]
    async fn configure_is_declined_while_running() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());
        handle.execute(Command::Start).await.unwrap();

        let durations = SessionDurations::new(50, 10, 30, 4).unwrap();
        let result = handle.configure(durations).await.unwrap();

        assert!(matches!(
            result,
            Err(ConfigureError::SessionInProgress { .. })
        ));
        let status = handle.get_status().await.unwrap();
        assert_eq!(status.time_limit_ms, 30 * 60_000);
    }

    #[tokio::test]
    async fn configure_applies_while_idle() {
        let (actor, handle) = create_test_actor();
        tokio::spawn(actor.run());

        let durations = SessionDurations::new(50, 10, 30, 4).unwrap();
        let snapshot = handle.configure(durations).await.unwrap().unwrap();

        assert_eq!(snapshot.remaining_display, "50:00");
        assert_eq!(snapshot.pomodoros_until_long_break, 4);
    }
}
