//! The session state machine.
//!
//! [`SessionEngine`] is synchronous and owns no timer. A host feeds it
//! commands and periodic [`SessionEngine::on_tick`] calls, then reacts to the
//! returned [`EngineEvent`]s and reads [`SessionEngine::snapshot`]. Commands
//! whose preconditions do not hold change nothing and return no events.

use serde::{Deserialize, Serialize};

use crate::domain::{
    format_countdown, ConfigureError, EngineEvent, EngineSnapshot, EngineState, InterruptionLog,
    Phase, PhaseKind, SessionDurations, SideActivity, Statistics,
};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Stop,
    Skip,
    PauseResume,
    StartSideActivity,
    StopSideActivity,
}

#[derive(Debug, Clone)]
pub struct SessionEngine {
    phases: [Phase; 3],
    current: PhaseKind,
    durations: SessionDurations,
    tick_interval_ms: u64,
    pomodoros_until_long_break: u32,
    statistics: Statistics,
    interruptions: InterruptionLog,
    side_activity: SideActivity,
    ticking: bool,
}

impl SessionEngine {
    pub fn new(durations: SessionDurations, tick_interval_ms: u64) -> Self {
        let phases = PhaseKind::ALL.map(|kind| Phase::new(kind, durations.limit_ms_for(kind)));

        Self {
            phases,
            current: PhaseKind::Pomodoro,
            durations,
            tick_interval_ms,
            pomodoros_until_long_break: durations.long_break_after(),
            statistics: Statistics::default(),
            interruptions: InterruptionLog::default(),
            side_activity: SideActivity::default(),
            ticking: false,
        }
    }

    pub fn execute(&mut self, command: Command) -> Vec<EngineEvent> {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Skip => self.skip(),
            Command::PauseResume => self.pause_resume(),
            Command::StartSideActivity => self.start_side_activity(),
            Command::StopSideActivity => self.stop_side_activity(),
        }
    }

    pub fn start(&mut self) -> Vec<EngineEvent> {
        if self.side_activity.is_active() || self.phase().started {
            return Vec::new();
        }

        let kind = self.current;
        let phase = self.phase_mut();
        if phase.is_overtime() {
            phase.elapsed_ms = 0;
            phase.blink_visible = true;
        }
        phase.started = true;
        phase.paused = false;

        if kind == PhaseKind::Pomodoro {
            self.interruptions.clear();
            self.statistics.task_elapsed_ms = 0;
        }

        let mut events = vec![EngineEvent::PhaseStarted(kind)];
        self.sync_ticks(&mut events);
        events
    }

    pub fn pause_resume(&mut self) -> Vec<EngineEvent> {
        if self.current != PhaseKind::Pomodoro || !self.phase().started {
            return Vec::new();
        }

        let mut events = Vec::new();
        if self.phase().paused {
            if self.side_activity.is_active() {
                return Vec::new();
            }
            self.phase_mut().paused = false;
            events.push(EngineEvent::PomodoroResumed);
        } else {
            let phase = self.phase_mut();
            phase.paused = true;
            let at_elapsed_ms = phase.elapsed_ms;
            self.interruptions.record(at_elapsed_ms);
            events.push(EngineEvent::InterruptionRecorded);
        }

        self.sync_ticks(&mut events);
        events
    }

    pub fn stop(&mut self) -> Vec<EngineEvent> {
        if !self.phase().started {
            return Vec::new();
        }

        let from = self.current;
        let to = self.complete_current_phase();

        let mut events = vec![EngineEvent::PhaseChanged { from, to }];
        self.sync_ticks(&mut events);
        events
    }

    /// Bypasses the current phase: a start immediately followed by a stop.
    pub fn skip(&mut self) -> Vec<EngineEvent> {
        if self.side_activity.is_active() || self.phase().started {
            return Vec::new();
        }

        let mut events = self.start();
        events.extend(self.stop());
        events
    }

    pub fn start_side_activity(&mut self) -> Vec<EngineEvent> {
        if self.side_activity.is_active() || self.phase().is_running() {
            return Vec::new();
        }

        self.side_activity.start();

        let mut events = vec![EngineEvent::SideActivityStarted];
        self.sync_ticks(&mut events);
        events
    }

    pub fn stop_side_activity(&mut self) -> Vec<EngineEvent> {
        if !self.side_activity.is_active() {
            return Vec::new();
        }

        let credited_minutes = self.side_activity.stop();
        self.statistics.credit_non_pomodoro(credited_minutes);

        let mut events = vec![EngineEvent::SideActivityStopped { credited_minutes }];
        self.sync_ticks(&mut events);
        events
    }

    /// Advances the running phase by one interval, then classifies the tick:
    /// the tick that reaches the limit is already `TimeExceeded`.
    pub fn on_tick(&mut self) -> Vec<EngineEvent> {
        if !self.ticking {
            return Vec::new();
        }

        let interval = self.tick_interval_ms;

        if self.side_activity.is_active() {
            self.side_activity.advance(interval);
            self.statistics.total_non_pomodoro_ms += interval;
            return vec![EngineEvent::SideActivityTick {
                elapsed_ms: self.side_activity.elapsed_ms(),
            }];
        }

        let kind = self.current;
        let phase = self.phase_mut();
        if !phase.is_running() {
            return Vec::new();
        }

        phase.elapsed_ms += interval;
        let event = if phase.is_overtime() {
            phase.blink_visible = !phase.blink_visible;
            EngineEvent::TimeExceeded(kind)
        } else {
            EngineEvent::RoutineTick(kind)
        };

        if kind == PhaseKind::Pomodoro {
            self.statistics.task_elapsed_ms += interval;
        }

        vec![event]
    }

    /// Replaces durations and cadence. Refused while the current phase is
    /// running or paused; an idle phase picks up its new limit right away.
    pub fn configure(&mut self, durations: SessionDurations) -> Result<(), ConfigureError> {
        if self.phase().started {
            return Err(ConfigureError::SessionInProgress {
                phase: self.current,
            });
        }

        for phase in &mut self.phases {
            phase.time_limit_ms = durations.limit_ms_for(phase.kind);
        }
        self.pomodoros_until_long_break = self
            .pomodoros_until_long_break
            .min(durations.long_break_after());
        self.durations = durations;

        Ok(())
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let phase = self.phase();
        let remaining_display = if phase.blink_visible {
            format_countdown(phase.remaining_ms())
        } else {
            String::new()
        };

        EngineSnapshot {
            phase: self.current,
            state: self.state(),
            remaining_display,
            time_limit_ms: phase.time_limit_ms,
            elapsed_ms: phase.elapsed_ms,
            paused: phase.paused,
            blink_visible: phase.blink_visible,
            total_pomodoro_count: self.statistics.total_pomodoro_count,
            total_pomodoro_minutes: self.statistics.total_pomodoro_minutes,
            total_non_pomodoro_minutes: self.statistics.total_non_pomodoro_minutes,
            non_pomodoro_elapsed_ms: self.statistics.total_non_pomodoro_ms,
            pomodoros_until_long_break: self.pomodoros_until_long_break,
            interruption_count: self.interruptions.len(),
            interruption_markers: self.interruptions.render(),
            task_minutes: self.statistics.task_minutes(),
            side_activity_active: self.side_activity.is_active(),
            side_activity_minutes: self.side_activity.elapsed_minutes(),
            durations: self.durations,
        }
    }

    pub fn state(&self) -> EngineState {
        let phase = self.phase();
        match (phase.started, phase.paused) {
            (false, _) => EngineState::Idle,
            (true, true) => EngineState::Paused,
            (true, false) => EngineState::Running,
        }
    }

    pub fn current_phase(&self) -> PhaseKind {
        self.current
    }

    pub fn phase(&self) -> &Phase {
        &self.phases[self.current.index()]
    }

    pub fn is_running(&self) -> bool {
        self.phase().is_running() && !self.side_activity.is_active()
    }

    pub fn wants_ticks(&self) -> bool {
        self.ticking
    }

    pub fn pomodoros_until_long_break(&self) -> u32 {
        self.pomodoros_until_long_break
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn interruptions(&self) -> &InterruptionLog {
        &self.interruptions
    }

    pub fn side_activity(&self) -> &SideActivity {
        &self.side_activity
    }

    pub fn durations(&self) -> SessionDurations {
        self.durations
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    fn phase_mut(&mut self) -> &mut Phase {
        &mut self.phases[self.current.index()]
    }

    /// Credits the finished phase and moves to the one that follows it.
    fn complete_current_phase(&mut self) -> PhaseKind {
        let finished = self.current;
        let next = match finished {
            PhaseKind::Pomodoro => {
                let elapsed_ms = self.phase().elapsed_ms;
                self.statistics.record_pomodoro(elapsed_ms);
                self.pomodoros_until_long_break = self.pomodoros_until_long_break.saturating_sub(1);
                if self.pomodoros_until_long_break == 0 {
                    PhaseKind::LongBreak
                } else {
                    PhaseKind::ShortBreak
                }
            }
            PhaseKind::ShortBreak => PhaseKind::Pomodoro,
            PhaseKind::LongBreak => {
                self.pomodoros_until_long_break = self.durations.long_break_after();
                PhaseKind::Pomodoro
            }
        };

        self.phase_mut().reset();
        self.current = next;
        self.phase_mut().reset();
        next
    }

    fn sync_ticks(&mut self, events: &mut Vec<EngineEvent>) {
        let wanted = self.side_activity.is_active() || self.phase().is_running();
        if wanted && !self.ticking {
            events.push(EngineEvent::TicksRequested {
                interval_ms: self.tick_interval_ms,
            });
        } else if !wanted && self.ticking {
            events.push(EngineEvent::TicksHalted);
        }
        self.ticking = wanted;
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new(SessionDurations::default(), DEFAULT_TICK_INTERVAL_MS)
    }
}
