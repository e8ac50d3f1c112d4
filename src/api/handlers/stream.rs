use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use metrics::gauge;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::AppState;

/// Tracks one connected stream client. Dropped together with the SSE
/// stream on disconnect, which is also what releases the bus receiver;
/// after that point no further events reach the connection.
struct StreamClient;

impl StreamClient {
    fn connect() -> Self {
        gauge!("sse_connected_clients").increment(1.0);
        tracing::info!("SSE client connected");
        Self
    }
}

impl Drop for StreamClient {
    fn drop(&mut self) {
        gauge!("sse_connected_clients").decrement(1.0);
        tracing::info!("SSE client disconnected");
    }
}

/// GET /api/stream — live confirmation feed.
///
/// Each bus event becomes one `data: <JSON>` frame; a `: ping` comment goes
/// out on a fixed interval to keep intermediaries from closing the idle
/// connection. The subscription starts at request time, so a reconnecting
/// client only sees events published after it reconnected; there is no
/// replay and no `id:` field to resume from.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.bus.subscribe();
    let client = StreamClient::connect();

    let stream = BroadcastStream::new(rx).filter_map(move |msg| {
        // Tie the client guard's lifetime to the stream.
        let _live = &client;

        match msg {
            Ok(confirmation) => match Event::default().json_data(&confirmation) {
                Ok(event) => Some(Ok::<_, Infallible>(event)),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize confirmation event");
                    None
                }
            },
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "SSE client lagged; events dropped");
                None
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(state.config.sse_keepalive_secs))
            .text("ping"),
    )
}
