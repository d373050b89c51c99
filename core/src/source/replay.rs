//! Replays a JSON-lines capture, one advertisement per line:
//!
//! ```text
//! {"id": "c1", "rssi": -60, "name": "Kim's Phone", "manufacturer_data": "4c000c0e", "services": ["180f"]}
//! {"id": "c2", "address": "5a:11:22:33:44:55", "rssi": -71, "delay_ms": 250}
//! ```
//!
//! `delay_ms` pauses before the event is handed out, so a capture can be
//! played back at roughly its original pace.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;
use serde::Deserialize;
use sniffr_common::device::event::{AdvertisementEvent, Rssi};
use sniffr_common::error::{decode_hex, ParseError};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::warn;

use super::EventSource;
use crate::error::CoreError;

#[derive(Debug, Deserialize)]
struct ReplayLine {
    id: String,
    address: Option<String>,
    rssi: Rssi,
    name: Option<String>,
    manufacturer_data: Option<String>,
    #[serde(default)]
    services: Vec<String>,
    delay_ms: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ReplayLineError {
    #[error("malformed event: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Field(#[from] ParseError),
}

/// Parses one capture line into an event and its optional pacing delay.
pub fn parse_line(line: &str) -> Result<(AdvertisementEvent, Option<Duration>), ReplayLineError> {
    let raw: ReplayLine = serde_json::from_str(line)?;

    let mut event = AdvertisementEvent::new(raw.id.as_str(), raw.rssi).with_services(raw.services);
    if let Some(address) = raw.address {
        let mac = MacAddr::from_str(&address).map_err(|_| ParseError::Address(address.clone()))?;
        event = event.with_address(mac);
    }
    if let Some(name) = raw.name {
        event = event.with_name(name);
    }
    if let Some(hex) = raw.manufacturer_data {
        event = event.with_manufacturer_data(decode_hex(&hex)?);
    }

    Ok((event, raw.delay_ms.map(Duration::from_millis)))
}

pub struct ReplaySource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl ReplaySource<BufReader<File>> {
    pub async fn open(path: &Path) -> Result<Self, CoreError> {
        let file = File::open(path).await.map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: AsyncBufRead + Unpin + Send> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> EventSource for ReplaySource<R> {
    async fn next_event(&mut self) -> Option<AdvertisementEvent> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    warn!("replay stopped at line {}: {e}", self.line_no + 1);
                    return None;
                }
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            match parse_line(&line) {
                Ok((event, delay)) => {
                    if let Some(delay) = delay {
                        tokio::time::sleep(delay).await;
                    }
                    return Some(event);
                }
                Err(e) => warn!("skipping replay line {}: {e}", self.line_no),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_line() {
        let line = r#"{"id":"c1","address":"5a:11:22:33:44:55","rssi":-60,"name":"Kim's Phone","manufacturer_data":"4c:00:0c","services":["180f"],"delay_ms":5}"#;
        let (event, delay) = parse_line(line).unwrap();

        assert_eq!(event.id.as_str(), "c1");
        assert_eq!(event.address, Some(MacAddr::new(0x5a, 0x11, 0x22, 0x33, 0x44, 0x55)));
        assert_eq!(event.rssi, -60);
        assert_eq!(event.known_name(), Some("Kim's Phone"));
        assert_eq!(event.manufacturer_data, Some(vec![0x4c, 0x00, 0x0c]));
        assert_eq!(event.services, vec!["180f".to_string()]);
        assert_eq!(delay, Some(Duration::from_millis(5)));
    }

    #[test]
    fn optional_fields_may_be_missing() {
        let (event, delay) = parse_line(r#"{"id":"c2","rssi":-80}"#).unwrap();
        assert!(event.address.is_none());
        assert!(event.manufacturer_data.is_none());
        assert!(event.services.is_empty());
        assert!(delay.is_none());
    }

    #[test]
    fn bad_fields_are_rejected() {
        assert!(matches!(
            parse_line(r#"{"id":"c","rssi":-1,"manufacturer_data":"4c0"}"#),
            Err(ReplayLineError::Field(ParseError::Hex(_)))
        ));
        assert!(matches!(
            parse_line(r#"{"id":"c","rssi":-1,"address":"nope"}"#),
            Err(ReplayLineError::Field(ParseError::Address(_)))
        ));
        assert!(matches!(parse_line("{not json"), Err(ReplayLineError::Json(_))));
    }

    #[tokio::test]
    async fn skips_blank_and_malformed_lines() {
        let capture = "\n{\"id\":\"a\",\"rssi\":-50}\ngarbage\n\n{\"id\":\"b\",\"rssi\":-70}\n";
        let mut source = ReplaySource::new(BufReader::new(capture.as_bytes()));

        let first = source.next_event().await.unwrap();
        let second = source.next_event().await.unwrap();

        assert_eq!(first.id.as_str(), "a");
        assert_eq!(second.id.as_str(), "b");
        assert!(source.next_event().await.is_none());
    }

    #[tokio::test]
    async fn open_missing_file_fails() {
        let result = ReplaySource::open(Path::new("/no/such/capture.jsonl")).await;
        assert!(matches!(result, Err(CoreError::Io { .. })));
    }
}
