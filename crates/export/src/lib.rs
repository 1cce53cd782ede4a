//! Asynchronous playlist-export pipeline.
//!
//! The producer side ([`queue`]) enqueues durable export requests; the
//! consumer side ([`consumer`]) claims them one at a time, assembles the
//! playlist, renders it ([`render`]), and mails it ([`mailer`]). Producer
//! and consumer run in separate processes and only share the database.

pub mod consumer;
pub mod mailer;
pub mod queue;
pub mod render;

pub use consumer::ExportConsumer;
pub use mailer::{EmailConfig, EmailError, Mailer, SmtpMailer};
pub use queue::{ExportQueue, ExportRequest, PgExportQueue, EXPORT_QUEUE};
