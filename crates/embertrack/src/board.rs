//! Board actor: one Tokio task that owns the whole floor.
//!
//! All state lives in a single task; the outside world (tile renderers,
//! tap handlers, the sound toggle) talks to it through an mpsc command
//! channel. This is the actor model — no shared mutable state, no locks,
//! and every operation runs as a discrete, non-overlapping step exactly as
//! the engine's semantics require.
//!
//! Readers get state through a `watch` channel of `Arc<Vec<Table>>`
//! snapshots. The actor publishes a fresh snapshot after every applied
//! mutation, so a renderer mid-frame always holds one consistent copy and
//! can never observe half of a transfer.
//!
//! The expiry sweep rides the same loop: a [`SweepTimer`] tick runs
//! `registry.sweep(Utc::now())` between commands. Shutting the board down
//! (or dropping every handle) ends the loop and the timer with it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};

use embertrack_registry::{load_or_default, Registry, SnapshotStore};
use embertrack_session::{Table, TableNumber};
use embertrack_tick::SweepTimer;

use crate::{AlertSink, BoardConfig, BoardError};

/// Commands sent to the board actor through its channel.
///
/// Mutating variants carry a `done` ack so callers can await the point
/// where the operation has been applied (or ignored) — without it, a test
/// that activates a table and immediately reads the floor could race the
/// actor.
enum BoardCommand {
    /// Seat a party at an available table.
    Activate {
        number: TableNumber,
        done: oneshot::Sender<()>,
    },

    /// Answer an alert with fresh charcoal.
    CharcoalChange {
        number: TableNumber,
        done: oneshot::Sender<()>,
    },

    /// A plain tap on a tile — routed by the table's current status.
    Tap {
        number: TableNumber,
        done: oneshot::Sender<()>,
    },

    /// Force a table back to available (manual correction).
    Reset {
        number: TableNumber,
        done: oneshot::Sender<()>,
    },

    /// Move a live session to a free table.
    Transfer {
        from: TableNumber,
        to: TableNumber,
        done: oneshot::Sender<()>,
    },

    /// Flip the sound toggle read before firing the alert sink.
    SetSound {
        enabled: bool,
        done: oneshot::Sender<()>,
    },

    /// Run an expiry sweep right now; replies with the freshly-expired
    /// table numbers. This is how manual-sweep boards are driven.
    Sweep {
        reply: oneshot::Sender<Vec<TableNumber>>,
    },

    /// Request the current floor snapshot.
    Snapshot {
        reply: oneshot::Sender<Arc<Vec<Table>>>,
    },

    /// Stop the actor (and its timer).
    Shutdown,
}

// ---------------------------------------------------------------------------
// Board / BoardHandle
// ---------------------------------------------------------------------------

/// Spawns board actors. See [`Board::spawn`].
pub struct Board;

impl Board {
    /// Loads (or synthesizes) the floor and starts the board actor.
    ///
    /// Loading cannot fail: an absent snapshot yields
    /// `config.table_count` baseline tables, and a corrupt one is logged
    /// and treated as absent. The returned handle is the only way to
    /// reach the board; it's cheap to clone, and the actor stops when
    /// [`shutdown`](BoardHandle::shutdown) is called or every handle is
    /// dropped.
    pub fn spawn(
        config: BoardConfig,
        store: Arc<dyn SnapshotStore>,
        sink: Arc<dyn AlertSink>,
    ) -> BoardHandle {
        let registry = load_or_default(store.as_ref(), config.table_count);

        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (watch_tx, watch_rx) = watch::channel(Arc::new(registry.tables()));

        let timer = match config.sweep_interval {
            Some(interval) => SweepTimer::new(interval),
            None => SweepTimer::manual(),
        };

        let actor = BoardActor {
            registry,
            sound_enabled: config.sound_enabled,
            config,
            store,
            sink,
            receiver: cmd_rx,
            watch_tx,
            timer,
        };
        tokio::spawn(actor.run());

        BoardHandle {
            sender: cmd_tx,
            watch_rx,
        }
    }
}

/// Handle to a running board. Cheap to clone; every UI surface gets one.
#[derive(Clone)]
pub struct BoardHandle {
    sender: mpsc::Sender<BoardCommand>,
    watch_rx: watch::Receiver<Arc<Vec<Table>>>,
}

impl BoardHandle {
    /// Seats a party at `number`. No-op unless the table is available.
    pub async fn activate(&self, number: TableNumber) -> Result<(), BoardError> {
        self.ack(|done| BoardCommand::Activate { number, done }).await
    }

    /// Applies a charcoal change at `number`. No-op unless alerting.
    pub async fn charcoal_change(&self, number: TableNumber) -> Result<(), BoardError> {
        self.ack(|done| BoardCommand::CharcoalChange { number, done })
            .await
    }

    /// Routes a plain tap: available → activate, alert → charcoal change,
    /// anything else → nothing.
    pub async fn tap(&self, number: TableNumber) -> Result<(), BoardError> {
        self.ack(|done| BoardCommand::Tap { number, done }).await
    }

    /// Forces `number` back to available, whatever state it's in.
    pub async fn reset(&self, number: TableNumber) -> Result<(), BoardError> {
        self.ack(|done| BoardCommand::Reset { number, done }).await
    }

    /// Moves the session at `from` to `to`, clock untouched. No-op unless
    /// `from` is occupied and `to` is available.
    pub async fn transfer(&self, from: TableNumber, to: TableNumber) -> Result<(), BoardError> {
        self.ack(|done| BoardCommand::Transfer { from, to, done })
            .await
    }

    /// Turns the alert sound on or off.
    pub async fn set_sound_enabled(&self, enabled: bool) -> Result<(), BoardError> {
        self.ack(|done| BoardCommand::SetSound { enabled, done })
            .await
    }

    /// Runs an expiry sweep immediately and returns the freshly-expired
    /// table numbers. Boards built with
    /// [`BoardConfig::manual_sweep`](crate::BoardConfig::manual_sweep)
    /// are driven entirely through this.
    pub async fn sweep_now(&self) -> Result<Vec<TableNumber>, BoardError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(BoardCommand::Sweep { reply: reply_tx })
            .await
            .map_err(|_| BoardError::Closed)?;
        reply_rx.await.map_err(|_| BoardError::Closed)
    }

    /// The current floor, sorted by table number.
    pub async fn tables(&self) -> Result<Arc<Vec<Table>>, BoardError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(BoardCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| BoardError::Closed)?;
        reply_rx.await.map_err(|_| BoardError::Closed)
    }

    /// Subscribes to floor snapshots.
    ///
    /// The receiver wakes on every applied mutation and always yields a
    /// complete, consistent copy of the floor — this is the render loop's
    /// input.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Table>>> {
        self.watch_rx.clone()
    }

    /// Stops the board actor. Subsequent calls on any handle return
    /// [`BoardError::Closed`].
    pub async fn shutdown(&self) -> Result<(), BoardError> {
        self.sender
            .send(BoardCommand::Shutdown)
            .await
            .map_err(|_| BoardError::Closed)
    }

    /// Sends a mutating command and awaits its application ack.
    async fn ack(
        &self,
        make: impl FnOnce(oneshot::Sender<()>) -> BoardCommand,
    ) -> Result<(), BoardError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.sender
            .send(make(done_tx))
            .await
            .map_err(|_| BoardError::Closed)?;
        done_rx.await.map_err(|_| BoardError::Closed)
    }
}

// ---------------------------------------------------------------------------
// BoardActor
// ---------------------------------------------------------------------------

/// The actor's private state. Runs inside one Tokio task.
struct BoardActor {
    registry: Registry,
    config: BoardConfig,
    store: Arc<dyn SnapshotStore>,
    sink: Arc<dyn AlertSink>,
    sound_enabled: bool,
    receiver: mpsc::Receiver<BoardCommand>,
    watch_tx: watch::Sender<Arc<Vec<Table>>>,
    timer: SweepTimer,
}

impl BoardActor {
    async fn run(mut self) {
        tracing::info!(
            tables = self.registry.len(),
            sweep = ?self.timer.interval(),
            "board started"
        );

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => {
                    match cmd {
                        Some(BoardCommand::Shutdown) | None => break,
                        Some(cmd) => self.handle_command(cmd),
                    }
                }
                _ = self.timer.wait() => {
                    self.run_sweep(Utc::now());
                }
            }
        }

        tracing::info!("board stopped");
    }

    fn handle_command(&mut self, cmd: BoardCommand) {
        let now = Utc::now();
        match cmd {
            BoardCommand::Activate { number, done } => {
                let changed = self.registry.activate(number, now, &self.config.session);
                self.finish_mutation(changed, done);
            }
            BoardCommand::CharcoalChange { number, done } => {
                let changed = self
                    .registry
                    .charcoal_change(number, now, &self.config.session);
                self.finish_mutation(changed, done);
            }
            BoardCommand::Tap { number, done } => {
                let changed = self.registry.tap(number, now, &self.config.session);
                self.finish_mutation(changed, done);
            }
            BoardCommand::Reset { number, done } => {
                let changed = self.registry.reset(number);
                self.finish_mutation(changed, done);
            }
            BoardCommand::Transfer { from, to, done } => {
                let changed = self.registry.transfer(from, to);
                self.finish_mutation(changed, done);
            }
            BoardCommand::SetSound { enabled, done } => {
                self.sound_enabled = enabled;
                tracing::info!(enabled, "alert sound toggled");
                let _ = done.send(());
            }
            BoardCommand::Sweep { reply } => {
                let expired = self.run_sweep(now);
                let _ = reply.send(expired);
            }
            BoardCommand::Snapshot { reply } => {
                let _ = reply.send(self.watch_tx.borrow().clone());
            }
            // `run` intercepts Shutdown before we get here.
            BoardCommand::Shutdown => {}
        }
    }

    /// Publishes + persists if the operation changed anything, then acks.
    fn finish_mutation(&mut self, changed: bool, done: oneshot::Sender<()>) {
        if changed {
            self.publish_and_persist();
        }
        // The caller may have given up waiting; that's fine.
        let _ = done.send(());
    }

    /// One expiry sweep: transition due tables, fire the alert sink once
    /// per fresh expiry (sound permitting), persist if anything moved.
    fn run_sweep(&mut self, now: DateTime<Utc>) -> Vec<TableNumber> {
        let expired = self.registry.sweep(now);
        if expired.is_empty() {
            return expired;
        }

        if self.sound_enabled {
            for number in &expired {
                if let Err(err) = self.sink.notify() {
                    // The sink is cosmetic; session state must not care.
                    tracing::warn!(table = %number, error = %err, "alert sink failed");
                }
            }
        }

        self.publish_and_persist();
        expired
    }

    /// Snapshot the floor for readers, then write it out. Persistence is
    /// best-effort: the in-memory state is already the truth, so a failed
    /// save is logged and life goes on.
    fn publish_and_persist(&mut self) {
        let snapshot = Arc::new(self.registry.tables());
        let _ = self.watch_tx.send(snapshot.clone());

        if let Err(err) = self.store.save(snapshot.as_slice()) {
            tracing::warn!(error = %err, "snapshot save failed, state kept in memory");
        }
    }
}
