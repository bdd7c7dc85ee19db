//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes
//! them.
//!
//! ## Inbox Pattern
//!
//! Async work never touches state directly: handlers and background
//! tasks send `UiEvent`s to `inbox_tx`, and the runtime drains the
//! inbox each frame. The session forwarder (gateway watch channel ->
//! inbox) and the rotation schedule both feed the same inbox.
//!
//! ## Owned timers
//!
//! The rotation schedule is an owned tokio task guarded by a
//! `CancellationToken`. `StartRotation` replaces any previous schedule
//! and `StopRotation` cancels unconditionally, so no schedule can leak
//! across screen mount/unmount cycles.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use prism_core::identity::AuthGateway;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::showcase::ROTATION_INTERVAL;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while something is animating (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle; longer timeout reduces CPU usage.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop,
/// panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    gateway: Arc<AuthGateway>,
    /// Inbox sender - background tasks send events here.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    /// Inbox receiver - the runtime drains this each frame.
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    /// Cancellation guard for the rotation schedule, when one is running.
    rotation: Option<CancellationToken>,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates the runtime: terminal setup, session forwarding, and
    /// the startup session restore.
    pub fn new(gateway: Arc<AuthGateway>) -> Result<Self> {
        // Set up the panic hook BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        // Forward session changes from the gateway's watch channel
        // into the inbox so they flow through the reducer like any
        // other event.
        let mut session_rx = gateway.session();
        let tx = inbox_tx.clone();
        tokio::spawn(async move {
            while session_rx.changed().await.is_ok() {
                let session = session_rx.borrow_and_update().clone();
                if tx.send(UiEvent::Session(session)).is_err() {
                    break;
                }
            }
        });

        // Resolve the startup session; the result arrives through the
        // forwarder above.
        let restore_gateway = Arc::clone(&gateway);
        tokio::spawn(async move {
            restore_gateway.restore_session().await;
        });

        Ok(Self {
            terminal,
            state: AppState::new(),
            gateway,
            inbox_tx,
            inbox_rx,
            rotation: None,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Only Tick triggers render - this caps the frame rate
                // at the tick cadence.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling only while something animates; otherwise idle.
        let tick_interval = if self.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain the inbox - session changes, task events, rotation ticks.
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block on terminal input until the next tick is due, unless
        // there is already work to process.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking).
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted
    /// lifecycle. The reducer records the started task; the completed
    /// event carries the handler's result event, which is dispatched
    /// only if the task is still active.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, cancelable: bool, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = cancelable.then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f(cancel).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::OpenBrowser { url } => {
                let _ = open::that(&url);
            }

            UiEffect::SubmitEmailAuth {
                task,
                intent,
                email,
                password,
            } => {
                let gateway = Arc::clone(&self.gateway);
                self.spawn_task(TaskKind::EmailAuth, task, false, move |_| {
                    handlers::email_auth(gateway, intent, email, password)
                });
            }
            UiEffect::StartGoogleAuth { task, consent } => {
                let gateway = Arc::clone(&self.gateway);
                self.spawn_task(TaskKind::GoogleAuth, task, true, move |cancel| {
                    handlers::google_auth(gateway, consent, cancel)
                });
            }
            UiEffect::SignOut => {
                if let Err(e) = self.gateway.sign_out() {
                    warn!("sign out failed: {e:#}");
                }
            }

            UiEffect::StartRotation => self.start_rotation(),
            UiEffect::StopRotation => self.stop_rotation(),

            UiEffect::CancelTask { token, .. } => {
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
        }
    }

    // ========================================================================
    // Rotation schedule
    // ========================================================================

    /// Starts the single repeating rotation schedule, replacing any
    /// previous one.
    fn start_rotation(&mut self) {
        self.stop_rotation();
        let token = CancellationToken::new();
        let guard = token.clone();
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ROTATION_INTERVAL);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                tokio::select! {
                    () = guard.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(UiEvent::RotationTick).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        self.rotation = Some(token);
    }

    /// Cancels the rotation schedule unconditionally.
    fn stop_rotation(&mut self) {
        if let Some(token) = self.rotation.take() {
            token.cancel();
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        self.stop_rotation();
        let _ = terminal::restore_terminal();
    }
}
