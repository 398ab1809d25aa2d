//! Sync task orchestration with the tokio mpsc command/notification pattern.
//!
//! The event loop runs in a dedicated tokio task.  External code communicates
//! with it through typed command and notification channels; a helper task
//! owns the push subscription and feeds decoded events into the loop.  The
//! loop keeps the authoritative record set keyed by id, so every accepted
//! write — local or remote — is observed the same way: as a new full
//! collection pushed out through [`SyncNotification::ActivitiesChanged`].

use std::collections::HashMap;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

use shotly_shared::activity::ActivityRecord;
use shotly_shared::types::ActivityId;

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::protocol::{parse_line, AppendRequest, StreamEvent};

// ---------------------------------------------------------------------------
// Command / notification types
// ---------------------------------------------------------------------------

/// Commands sent *into* the sync task.
#[derive(Debug)]
pub enum SyncCommand {
    /// Durably append a record to the shared collection.
    ///
    /// Fire-and-forget from the caller's perspective: the task performs the
    /// write (with one transport-level retry) and the record becomes visible
    /// only once the service pushes it back on the subscription.
    Append(ActivityRecord),
    /// Gracefully shut down the sync task.
    Shutdown,
}

/// Notifications sent *from* the sync task to the application.
#[derive(Debug, Clone)]
pub enum SyncNotification {
    /// The push subscription is established.
    Connected,
    /// The push subscription was lost; resubscription is in progress.
    Disconnected { reason: String },
    /// The collection changed.  Carries the full record set as currently
    /// observed — ordering is the consumer's concern.
    ActivitiesChanged(Vec<ActivityRecord>),
}

/// Events the subscription helper feeds into the main loop.
#[derive(Debug)]
enum SubEvent {
    Connected,
    Disconnected { reason: String },
    Stream(StreamEvent),
}

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

/// Spawn the sync client in background tokio tasks.
///
/// Returns channels for sending commands and receiving notifications.
pub async fn spawn_sync(
    config: SyncConfig,
) -> anyhow::Result<(mpsc::Sender<SyncCommand>, mpsc::Receiver<SyncNotification>)> {
    let http = reqwest::Client::builder().build()?;

    let (cmd_tx, mut cmd_rx) = mpsc::channel::<SyncCommand>(256);
    let (notif_tx, notif_rx) = mpsc::channel::<SyncNotification>(256);
    let (sub_tx, mut sub_rx) = mpsc::channel::<SubEvent>(256);

    // Subscription helper: owns the push stream, reconnects on loss.
    tokio::spawn(subscription_task(http.clone(), config.clone(), sub_tx));

    // Main event loop: owns the record set, serves commands.
    tokio::spawn(async move {
        let mut records: HashMap<ActivityId, ActivityRecord> = HashMap::new();

        loop {
            tokio::select! {
                // --- Incoming commands ---
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(SyncCommand::Append(record)) => {
                            let http = http.clone();
                            let url = config.append_url();
                            // Appends must not stall the event loop, so each
                            // one runs in its own task.
                            tokio::spawn(async move {
                                if let Err(e) = append_with_retry(&http, &url, record).await {
                                    error!(error = %e, "Append failed after retry; dropping record");
                                }
                            });
                        }
                        Some(SyncCommand::Shutdown) => {
                            info!("Sync shutdown requested");
                            break;
                        }
                        None => {
                            info!("Command channel closed, shutting down sync");
                            break;
                        }
                    }
                }

                // --- Subscription events ---
                event = sub_rx.recv() => {
                    match event {
                        Some(SubEvent::Connected) => {
                            let _ = notif_tx.send(SyncNotification::Connected).await;
                        }
                        Some(SubEvent::Disconnected { reason }) => {
                            let _ = notif_tx
                                .send(SyncNotification::Disconnected { reason })
                                .await;
                        }
                        Some(SubEvent::Stream(stream_event)) => {
                            let snapshot = apply_event(&mut records, stream_event);
                            let _ = notif_tx
                                .send(SyncNotification::ActivitiesChanged(snapshot))
                                .await;
                        }
                        None => {
                            warn!("Subscription task ended, shutting down sync");
                            break;
                        }
                    }
                }
            }
        }
    });

    Ok((cmd_tx, notif_rx))
}

// ---------------------------------------------------------------------------
// Record set
// ---------------------------------------------------------------------------

/// Fold a stream event into the record set and return the resulting full
/// collection.  A snapshot replaces the set wholesale; an append upserts by
/// id, which also makes redelivered events harmless.
fn apply_event(
    records: &mut HashMap<ActivityId, ActivityRecord>,
    event: StreamEvent,
) -> Vec<ActivityRecord> {
    match event {
        StreamEvent::Snapshot { records: all } => {
            records.clear();
            for record in all {
                records.insert(record.id.clone(), record);
            }
        }
        StreamEvent::Append { record } => {
            records.insert(record.id.clone(), record);
        }
    }
    records.values().cloned().collect()
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// POST a record to the append endpoint, retrying once on transport failure.
/// A rejection (non-success status) is not retried: the request reached the
/// service and re-sending would not change its answer.
async fn append_with_retry(
    http: &reqwest::Client,
    url: &str,
    record: ActivityRecord,
) -> Result<(), SyncError> {
    let request = AppendRequest { record };

    match append_once(http, url, &request).await {
        Err(SyncError::Transport(e)) => {
            warn!(error = %e, "Append transport failure, retrying once");
            append_once(http, url, &request).await
        }
        other => other,
    }
}

async fn append_once(
    http: &reqwest::Client,
    url: &str,
    request: &AppendRequest,
) -> Result<(), SyncError> {
    let response = http.post(url).json(request).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::Rejected(status.as_u16()));
    }
    debug!(record_id = %request.record.id, "Record appended");
    Ok(())
}

/// Own the push subscription: connect, frame NDJSON lines, decode them, and
/// resubscribe after a fixed delay whenever the stream drops.
async fn subscription_task(
    http: reqwest::Client,
    config: SyncConfig,
    sub_tx: mpsc::Sender<SubEvent>,
) {
    let url = config.subscribe_url();
    let delay = Duration::from_secs(config.resubscribe_delay_secs);

    loop {
        match http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                info!(url = %url, "Subscribed to activity stream");
                if sub_tx.send(SubEvent::Connected).await.is_err() {
                    return;
                }

                let reason = pump_stream(response, &sub_tx).await;
                if sub_tx
                    .send(SubEvent::Disconnected { reason })
                    .await
                    .is_err()
                {
                    return;
                }
            }
            Ok(response) => {
                let status = response.status().as_u16();
                warn!(status, "Subscription rejected");
                if sub_tx
                    .send(SubEvent::Disconnected {
                        reason: format!("HTTP {status}"),
                    })
                    .await
                    .is_err()
                {
                    return;
                }
            }
            Err(e) => {
                warn!(error = %e, "Subscription connect failed");
                if sub_tx
                    .send(SubEvent::Disconnected {
                        reason: e.to_string(),
                    })
                    .await
                    .is_err()
                {
                    return;
                }
            }
        }

        tokio::time::sleep(delay).await;
    }
}

/// Read the response body chunk by chunk, splitting on newlines and decoding
/// each complete line.  Returns the reason the stream ended.
async fn pump_stream(response: reqwest::Response, sub_tx: &mpsc::Sender<SubEvent>) -> String {
    let mut body = response.bytes_stream();
    let mut buffer = bytes::BytesMut::new();

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(c) => c,
            Err(e) => return e.to_string(),
        };
        buffer.extend_from_slice(&chunk);

        while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
            let line = buffer.split_to(pos + 1);
            let line = String::from_utf8_lossy(&line);

            match parse_line(&line) {
                Ok(Some(event)) => {
                    if sub_tx.send(SubEvent::Stream(event)).await.is_err() {
                        return "receiver dropped".to_string();
                    }
                }
                Ok(None) => {} // keep-alive
                Err(e) => {
                    // A bad line is the service's problem; skip it rather
                    // than tearing down the subscription.
                    warn!(error = %e, "Skipping undecodable stream line");
                }
            }
        }
    }

    "stream ended".to_string()
}
