//! Debounced autosave for daily and station notes.
//!
//! Each session is a single task that owns the buffer, the known row id and
//! the countdown. Callers talk to it through an [`AutosaveHandle`]. Loads and
//! writes run inside the task, so a response is always applied to the scope
//! that issued it.

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::Instant,
};

use crate::{
    api::ApiClient,
    notice::{self, Notice, NoticeTx},
    types::{NoteScope, Selection, SyncState},
};

/// A stored note as seen by the autosave session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: i32,
    pub content: String,
}

/// Where notes are loaded from and written to.
#[async_trait]
pub trait NoteSink: Send + Sync + 'static {
    /// Most recently updated row of `scope`, if any.
    async fn load(&self, scope: &NoteScope) -> Result<Option<NoteRecord>>;

    async fn insert(&self, scope: &NoteScope, content: &str) -> Result<NoteRecord>;

    async fn update(&self, id: i32, scope: &NoteScope, content: &str) -> Result<NoteRecord>;
}

/// [`NoteSink`] backed by the central-api, attributing writes to `selection`.
pub struct ApiNoteSink {
    client: ApiClient,
    selection: Selection,
}

impl ApiNoteSink {
    pub fn new(client: ApiClient, selection: Selection) -> Self {
        Self { client, selection }
    }
}

#[async_trait]
impl NoteSink for ApiNoteSink {
    async fn load(&self, scope: &NoteScope) -> Result<Option<NoteRecord>> {
        let note = self.client.current_note(scope).await?;
        Ok(note.map(|n| NoteRecord {
            id: n.id,
            content: n.content,
        }))
    }

    async fn insert(&self, scope: &NoteScope, content: &str) -> Result<NoteRecord> {
        let note = self
            .client
            .save_note(&self.selection, None, scope, content)
            .await?;
        Ok(NoteRecord {
            id: note.id,
            content: note.content,
        })
    }

    async fn update(&self, id: i32, scope: &NoteScope, content: &str) -> Result<NoteRecord> {
        let note = self
            .client
            .save_note(&self.selection, Some(id), scope, content)
            .await?;
        Ok(NoteRecord {
            id: note.id,
            content: note.content,
        })
    }
}

/// What the session currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub scope: NoteScope,
    pub content: String,
    pub note_id: Option<i32>,
    pub sync: SyncState,
}

#[derive(Debug)]
enum Command {
    Edit(String),
    SwitchScope(NoteScope),
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Handle to a running autosave session.
pub struct AutosaveHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshot: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Start a session on `scope`. The current note is loaded first.
    pub fn spawn<S: NoteSink>(
        sink: Arc<S>,
        scope: NoteScope,
        delay: Duration,
        notices: NoticeTx,
    ) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let initial = SessionSnapshot {
            scope,
            content: String::new(),
            note_id: None,
            sync: SyncState::Synced,
        };
        let (snapshot_tx, snapshot) = watch::channel(initial.clone());

        let session = Session {
            sink,
            delay,
            notices,
            state: initial,
            loaded: false,
            write_failed: false,
            deadline: None,
            snapshot: snapshot_tx,
        };
        let task = tokio::spawn(session.run(rx));

        Self {
            commands,
            snapshot,
            task,
        }
    }

    /// Replace the buffer with `content` and restart the countdown.
    pub fn edit(&self, content: impl Into<String>) {
        self.send(Command::Edit(content.into()));
    }

    /// Drop any pending write and load the note of `scope`.
    pub fn switch_scope(&self, scope: NoteScope) {
        self.send(Command::SwitchScope(scope));
    }

    /// Write a pending buffer now. Resolves once the write has finished.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        self.send(Command::Flush(ack));
        let _ = done.await;
    }

    /// Flush a pending buffer and stop the session.
    pub async fn shutdown(self) {
        self.send(Command::Shutdown);
        if let Err(e) = self.task.await {
            tracing::warn!("Autosave session ended abnormally: {}", e);
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver that is notified on every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.clone()
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::warn!("Autosave session is no longer running");
        }
    }
}

struct Session<S> {
    sink: Arc<S>,
    delay: Duration,
    notices: NoticeTx,
    state: SessionSnapshot,
    /// Whether `state.note_id` reflects the store. False after a failed load.
    loaded: bool,
    write_failed: bool,
    /// When the pending write fires; `None` when nothing is scheduled.
    deadline: Option<Instant>,
    snapshot: watch::Sender<SessionSnapshot>,
}

impl<S: NoteSink> Session<S> {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        self.load().await;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Edit(content)) => self.on_edit(content),
                    Some(Command::SwitchScope(scope)) => {
                        self.deadline = None;
                        self.state.scope = scope;
                        self.load().await;
                    }
                    Some(Command::Flush(ack)) => {
                        if self.deadline.take().is_some() {
                            self.write().await;
                        }
                        let _ = ack.send(());
                    }
                    Some(Command::Shutdown) | None => {
                        if self.deadline.take().is_some() {
                            self.write().await;
                        }
                        break;
                    }
                },
                _ = sleep_until_deadline(self.deadline) => {
                    self.deadline = None;
                    self.write().await;
                }
            }
        }

        tracing::debug!("Autosave session stopped");
    }

    fn on_edit(&mut self, content: String) {
        let blank = content.trim().is_empty();
        self.state.content = content;

        if blank {
            // Nothing to save; a pending countdown is abandoned.
            if self.deadline.take().is_some() && self.state.sync == SyncState::Pending {
                self.state.sync = SyncState::Synced;
            }
        } else {
            self.deadline = Some(Instant::now() + self.delay);
            self.state.sync = SyncState::Pending;
        }
        self.publish();
    }

    async fn load(&mut self) {
        let scope = self.state.scope;
        self.state.content.clear();
        self.state.note_id = None;
        match self.sink.load(&scope).await {
            Ok(record) => {
                if let Some(record) = record {
                    self.state.content = record.content;
                    self.state.note_id = Some(record.id);
                }
                self.loaded = true;
            }
            Err(e) => {
                tracing::warn!(?scope, "Failed to load note: {:#}", e);
                self.loaded = false;
            }
        }
        self.state.sync = SyncState::Synced;
        self.publish();
    }

    async fn write(&mut self) {
        let scope = self.state.scope;
        let content = self.state.content.clone();
        if content.trim().is_empty() {
            return;
        }

        // Without a successful load the row id is unknown; an insert could
        // duplicate the scope's note.
        if !self.loaded {
            match self.sink.load(&scope).await {
                Ok(record) => {
                    self.state.note_id = record.map(|r| r.id);
                    self.loaded = true;
                }
                Err(e) => {
                    tracing::warn!(?scope, "Failed to load note before saving: {:#}", e);
                    self.fail();
                    return;
                }
            }
        }

        let result = match self.state.note_id {
            Some(id) => self.sink.update(id, &scope, &content).await,
            None => self.sink.insert(&scope, &content).await,
        };

        match result {
            Ok(record) => {
                self.state.note_id = Some(record.id);
                if std::mem::take(&mut self.write_failed) {
                    notice::publish(&self.notices, Notice::info("Notes saved"));
                }
                // A newer edit may have arrived while the write was in flight.
                if self.deadline.is_none() {
                    self.state.sync = SyncState::Synced;
                }
                self.publish();
            }
            Err(e) => {
                tracing::warn!(?scope, "Failed to save note: {:#}", e);
                self.fail();
            }
        }
    }

    fn fail(&mut self) {
        self.write_failed = true;
        self.state.sync = SyncState::Failed;
        notice::publish(&self.notices, Notice::error("Could not save notes"));
        self.publish();
    }

    fn publish(&self) {
        self.snapshot.send_replace(self.state.clone());
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
