//! Transient, user-facing notifications.
//!
//! The client does not draw anything; a front-end drains the receiver and
//! shows each notice as a toast.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub type NoticeTx = UnboundedSender<Notice>;
pub type NoticeRx = UnboundedReceiver<Notice>;

pub fn channel() -> (NoticeTx, NoticeRx) {
    mpsc::unbounded_channel()
}

/// Publish a notice. A closed receiver only means nobody is listening.
pub(crate) fn publish(tx: &NoticeTx, notice: Notice) {
    if tx.send(notice).is_err() {
        tracing::debug!("notice dropped, no listener");
    }
}
