//! # pont-adapter-control-telnet
//!
//! Control channel adapter speaking the simulated device's telnet-style
//! monitor protocol: connect, wait for the prompt sentinel, write one
//! command line, read everything up to the next prompt, disconnect.
//!
//! Known protocol limitation, inherited from the device side: the sentinel
//! is matched as a fixed string with no framing or escaping, so device
//! output that happens to contain the prompt string misparses. The client
//! compensates by being stateless — one fresh connection per call, bounded
//! waits, no retries — so a misparse or stuck peer affects only that call.
//!
//! ## Dependency rule
//! Depends on `pont-app` (port traits) and `pont-domain` only.

mod config;

pub use config::ControlConfig;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout};

use pont_app::ports::ControlChannel;
use pont_domain::error::ChannelError;

/// Prompt-delimited, connection-per-call monitor client.
#[derive(Debug, Clone)]
pub struct TelnetControlChannel {
    config: ControlConfig,
}

impl TelnetControlChannel {
    /// Create a client for the configured monitor endpoint.
    #[must_use]
    pub fn new(config: ControlConfig) -> Self {
        Self { config }
    }

    async fn exchange(&self, command: &str) -> Result<String, ChannelError> {
        let addr = self.config.addr();
        let mut stream = timeout(self.config.timeout(), TcpStream::connect(&addr))
            .await
            .map_err(|_| ChannelError::Timeout)?
            .map_err(ChannelError::Refused)?;

        // Banner prompt emitted on connect.
        self.read_until_prompt(&mut stream).await?;

        stream.write_all(command.as_bytes()).await?;
        stream.write_all(b"\n").await?;

        let output = self.read_until_prompt(&mut stream).await?;
        tracing::debug!(command = %command, bytes = output.len(), "monitor exchange complete");
        Ok(output)
    }

    /// Read until the prompt sentinel appears, bounded by the configured
    /// timeout. Returns everything read up to and including the sentinel.
    async fn read_until_prompt(&self, stream: &mut TcpStream) -> Result<String, ChannelError> {
        let prompt = self.config.prompt.as_bytes();
        let deadline = Instant::now() + self.config.timeout();
        let mut buffer: Vec<u8> = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            if let Some(end) = find_sentinel(&buffer, prompt) {
                buffer.truncate(end);
                return Ok(String::from_utf8_lossy(&buffer).into_owned());
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ChannelError::Timeout);
            }
            let read = timeout(remaining, stream.read(&mut chunk))
                .await
                .map_err(|_| ChannelError::Timeout)??;
            if read == 0 {
                return Err(ChannelError::Io(std::io::Error::from(
                    std::io::ErrorKind::UnexpectedEof,
                )));
            }
            buffer.extend_from_slice(&chunk[..read]);
        }
    }
}

/// Index one past the first occurrence of `sentinel` in `haystack`.
fn find_sentinel(haystack: &[u8], sentinel: &[u8]) -> Option<usize> {
    if sentinel.is_empty() {
        return Some(haystack.len());
    }
    if haystack.len() < sentinel.len() {
        return None;
    }
    haystack
        .windows(sentinel.len())
        .position(|window| window == sentinel)
        .map(|start| start + sentinel.len())
}

impl ControlChannel for TelnetControlChannel {
    fn prompt(&self) -> &str {
        &self.config.prompt
    }

    async fn send(&self, command: &str) -> Result<String, ChannelError> {
        self.exchange(command).await
    }

    async fn send_interactive(&self, command: &str) -> Result<String, ChannelError> {
        let output = self.exchange(command).await?;
        Ok(format!("{}{}\r\n{}", self.config.prompt, command, output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::net::TcpListener;

    const PROMPT: &str = "(raspberrypi3) ";

    /// Fake monitor peer: prompt on connect, one echo line + prompt per
    /// command, one connection at a time.
    async fn spawn_peer() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let (reader, mut writer) = stream.into_split();
                let mut lines = BufReader::new(reader).lines();
                writer.write_all(PROMPT.as_bytes()).await.unwrap();
                while let Ok(Some(line)) = lines.next_line().await {
                    let reply = format!("{line}: done\r\n{PROMPT}");
                    if writer.write_all(reply.as_bytes()).await.is_err() {
                        break;
                    }
                }
            }
        });
        addr
    }

    fn channel(addr: SocketAddr, timeout_secs: u64) -> TelnetControlChannel {
        TelnetControlChannel::new(ControlConfig {
            host: addr.ip().to_string(),
            port: addr.port(),
            prompt: PROMPT.to_string(),
            timeout_secs,
        })
    }

    #[tokio::test]
    async fn should_return_output_up_to_and_including_prompt() {
        let addr = spawn_peer().await;
        let channel = channel(addr, 5);

        let output = channel.send("sysbus.gpioA.extraLed Set").await.unwrap();

        assert!(output.contains("sysbus.gpioA.extraLed Set: done"));
        assert!(output.ends_with(PROMPT));
    }

    #[tokio::test]
    async fn should_open_a_fresh_connection_per_call() {
        let addr = spawn_peer().await;
        let channel = channel(addr, 5);

        let first = channel.send("first").await.unwrap();
        let second = channel.send("second").await.unwrap();

        assert!(first.contains("first: done"));
        assert!(second.contains("second: done"));
    }

    #[tokio::test]
    async fn should_prefix_interactive_output_with_prompt_and_command_echo() {
        let addr = spawn_peer().await;
        let channel = channel(addr, 5);

        let output = channel.send_interactive("version").await.unwrap();

        assert!(output.starts_with("(raspberrypi3) version\r\n"));
        assert!(output.contains("version: done"));
    }

    #[tokio::test]
    async fn should_report_refused_when_peer_is_not_listening() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let channel = channel(addr, 5);

        let result = channel.send("anything").await;

        assert!(matches!(result, Err(ChannelError::Refused(_))));
    }

    #[tokio::test]
    async fn should_time_out_when_peer_never_emits_prompt() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // accept and hold the connection open without writing anything
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        });
        let channel = channel(addr, 1);

        let result = channel.send("anything").await;

        assert!(matches!(result, Err(ChannelError::Timeout)));
    }

    #[test]
    fn should_find_sentinel_spanning_buffer() {
        let buffer = b"some output\r\n(raspberrypi3) trailing";
        let end = find_sentinel(buffer, PROMPT.as_bytes()).unwrap();
        assert_eq!(&buffer[..end], b"some output\r\n(raspberrypi3) ");
    }

    #[test]
    fn should_not_find_sentinel_in_partial_read() {
        assert_eq!(find_sentinel(b"some output\r\n(raspber", PROMPT.as_bytes()), None);
    }
}
