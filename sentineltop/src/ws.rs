//! WebSocket side of the dashboard: connects to the producer, turns text
//! frames into [`ChannelEvent`]s and reconnects when the link drops.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{DashError, Result};
use crate::types::{AlertEvent, ChannelEvent, RealTimeData};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const DEFAULT_RECONNECT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ChannelConfig {
    pub url: Url,
    pub reconnect_delay: Duration,
}

impl ChannelConfig {
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            url: normalize_url(url)?,
            reconnect_delay: DEFAULT_RECONNECT,
        })
    }
}

/// Where a Socket.IO server serves its websocket transport.
pub const ENGINE_IO_PATH: &str = "/socket.io/";
const ENGINE_IO_QUERY: &str = "EIO=4&transport=websocket";

// Engine.IO / Socket.IO packets the client writes
const JOIN_NAMESPACE: &str = "40";
const PONG: &str = "3";

/// Accept ws/wss as is; map http/https onto them. A bare http(s) origin is
/// taken to be a Socket.IO server and pointed at its websocket transport.
pub fn normalize_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| DashError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    let rewrite = match url.scheme() {
        "ws" | "wss" => None,
        "http" => Some("ws"),
        "https" => Some("wss"),
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    };
    if let Some(scheme) = rewrite {
        url.set_scheme(scheme)
            .map_err(|_| invalid("cannot rewrite scheme".into()))?;
        if url.path() == "/" && url.query().is_none() {
            url.set_path(ENGINE_IO_PATH);
            url.set_query(Some(ENGINE_IO_QUERY));
        }
    }
    Ok(url)
}

// Connect to the producer and return the WS stream
pub async fn connect(url: &Url) -> Result<WsStream> {
    let (ws, _) = connect_async(url.as_str()).await?;
    Ok(ws)
}

/// One decoded text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Engine.IO open (`0{...}`); answered by joining the default namespace.
    Open,
    /// Engine.IO ping (`2`, possibly with a payload); answered with a pong.
    Ping(String),
    /// Engine.IO close (`1`) or Socket.IO disconnect (`41`).
    Close,
    Event(ChannelEvent),
    /// Valid, but nothing for the dashboard.
    Ignored,
}

/// Decode one text frame.
///
/// Accepted event shapes: `{"event": name, "data": payload}` and
/// `[name, payload]`, the latter optionally prefixed by a numeric packet
/// type as Socket.IO servers send it (`42["new_alert", {...}]`). A
/// `real_time_data` payload that does not decode is a
/// [`DashError::MalformedSnapshot`].
pub fn decode_frame(text: &str) -> Result<Frame> {
    let text = text.trim();
    let body = text.trim_start_matches(|c: char| c.is_ascii_digit());
    let packet = &text[..text.len() - body.len()];
    match packet {
        "0" => return Ok(Frame::Open),
        "2" => return Ok(Frame::Ping(body.to_string())),
        "1" | "41" => return Ok(Frame::Close),
        "40" => {
            debug!("namespace joined");
            return Ok(Frame::Ignored);
        }
        "44" => {
            warn!(reason = body, "namespace join refused");
            return Ok(Frame::Ignored);
        }
        _ => {}
    }
    if body.is_empty() {
        return Ok(Frame::Ignored);
    }

    let (name, data) = match serde_json::from_str::<Value>(body)? {
        Value::Object(mut obj) => {
            let Some(Value::String(name)) = obj.remove("event") else {
                return Ok(Frame::Ignored);
            };
            (name, obj.remove("data").unwrap_or(Value::Null))
        }
        Value::Array(arr) => {
            let mut it = arr.into_iter();
            let Some(Value::String(name)) = it.next() else {
                return Ok(Frame::Ignored);
            };
            (name, it.next().unwrap_or(Value::Null))
        }
        _ => return Ok(Frame::Ignored),
    };

    let ev = match name.as_str() {
        "real_time_data" => ChannelEvent::RealTimeData(
            serde_json::from_value::<RealTimeData>(data)
                .map_err(|e| DashError::MalformedSnapshot(e.to_string()))?,
        ),
        "new_alert" => ChannelEvent::NewAlert(serde_json::from_value::<AlertEvent>(data)?),
        other => {
            debug!(event = other, "ignoring event");
            return Ok(Frame::Ignored);
        }
    };
    Ok(Frame::Event(ev))
}

/// Read frames until the session ends; returns why it ended.
async fn pump(ws: WsStream, tx: &UnboundedSender<ChannelEvent>) -> String {
    let (mut sink, mut stream) = ws.split();
    while let Some(msg) = stream.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(frame)) => {
                return frame
                    .map(|f| format!("closed by server: {}", f.reason))
                    .unwrap_or_else(|| "closed by server".into());
            }
            // ping/pong are answered by tungstenite; binary is not part of the protocol
            Ok(_) => continue,
            Err(e) => return DashError::from(e).to_string(),
        };

        let (event, reply) = match decode_frame(&text) {
            Ok(Frame::Event(ev)) => (Some(ev), None),
            Ok(Frame::Open) => (None, Some(JOIN_NAMESPACE.to_string())),
            Ok(Frame::Ping(payload)) => (None, Some(format!("{PONG}{payload}"))),
            Ok(Frame::Close) => return "closed by server".into(),
            Ok(Frame::Ignored) => (None, None),
            Err(DashError::MalformedSnapshot(reason)) => {
                (Some(ChannelEvent::Malformed(reason)), None)
            }
            Err(e) => {
                warn!(error = %e, "dropping frame");
                (None, None)
            }
        };
        if let Some(ev) = event {
            if tx.send(ev).is_err() {
                return "dashboard closed".into();
            }
        }
        if let Some(reply) = reply {
            if let Err(e) = sink.send(Message::Text(reply)).await {
                return DashError::from(e).to_string();
            }
        }
    }
    "stream ended".into()
}

/// Run the connect/read/reconnect loop until the receiving side goes away.
pub fn spawn_channel(cfg: ChannelConfig, tx: UnboundedSender<ChannelEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match connect(&cfg.url).await {
                Ok(ws) => {
                    info!(url = %cfg.url, "websocket connected");
                    if tx.send(ChannelEvent::Connected).is_err() {
                        break;
                    }
                    let reason = pump(ws, &tx).await;
                    if tx.send(ChannelEvent::Disconnected(reason)).is_err() {
                        break;
                    }
                }
                Err(e) => warn!(url = %cfg.url, error = %e, "connect failed"),
            }
            if tx.is_closed() {
                break;
            }
            tokio::time::sleep(cfg.reconnect_delay).await;
        }
    })
}
