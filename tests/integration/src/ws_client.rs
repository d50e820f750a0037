//! WebSocket test client
//!
//! Speaks the relay's `{"event", "data"}` JSON frames.

use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use relay_gateway::protocol::RelayMessage;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long to wait for an expected event
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to listen when asserting silence
pub const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Connected relay client
pub struct WsClient {
    sink: SplitSink<WsStream, Message>,
    stream: SplitStream<WsStream>,
}

impl WsClient {
    /// Connect to a gateway URL
    pub async fn connect(url: &str) -> Result<Self> {
        let (ws, _) = connect_async(url)
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;
        let (sink, stream) = ws.split();
        Ok(Self { sink, stream })
    }

    /// Send an event frame
    pub async fn send_event(&mut self, event: &str, data: Value) -> Result<()> {
        let json = RelayMessage::new(event, data).to_json()?;
        self.send_raw(json).await
    }

    /// Send a raw text frame
    pub async fn send_raw(&mut self, text: impl Into<String>) -> Result<()> {
        self.sink.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Wait for the next event frame
    pub async fn next_event(&mut self) -> Result<RelayMessage> {
        tokio::time::timeout(EVENT_TIMEOUT, self.read_event())
            .await
            .context("Timed out waiting for event")?
    }

    /// Skip events until one with the given name arrives
    pub async fn next_named(&mut self, event: &str) -> Result<RelayMessage> {
        loop {
            let message = self.next_event().await?;
            if message.event == event {
                return Ok(message);
            }
        }
    }

    /// Skip events until the user list equals `expected`
    pub async fn wait_for_user_list(&mut self, expected: &[&str]) -> Result<()> {
        let expected = Value::from(expected.to_vec());
        loop {
            let message = self.next_named("update-user-list").await?;
            if message.data == expected {
                return Ok(());
            }
        }
    }

    /// Join under a name and wait for the server's acknowledgement
    ///
    /// `expected` is the user list this join should produce.
    pub async fn join(&mut self, username: &str, expected: &[&str]) -> Result<()> {
        self.send_event("join", Value::from(username)).await?;
        self.wait_for_user_list(expected).await
    }

    /// Fail if any event arrives within the quiet period
    pub async fn expect_no_event(&mut self) -> Result<()> {
        match tokio::time::timeout(QUIET_PERIOD, self.read_event()).await {
            Err(_) => Ok(()),
            Ok(Ok(message)) => anyhow::bail!("Unexpected event: {}", message.event),
            Ok(Err(e)) => Err(e),
        }
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.sink.send(Message::Close(None)).await?;
        Ok(())
    }

    async fn read_event(&mut self) -> Result<RelayMessage> {
        loop {
            let frame = self
                .stream
                .next()
                .await
                .context("Connection closed")??;

            match frame {
                Message::Text(text) => return Ok(RelayMessage::from_json(&text)?),
                Message::Close(_) => anyhow::bail!("Connection closed by server"),
                _ => {}
            }
        }
    }
}
