//! Control channel port — one-shot command/response calls to the simulated
//! device.
//!
//! The wire protocol is fragile (fixed-string prompt sentinel, no framing,
//! no escaping), so the port is deliberately stateless: every call opens and
//! closes its own connection, a stuck peer cannot poison later calls, and
//! nothing is retried. The reconciliation path treats failures as ignorable;
//! the interactive path surfaces the error text to the requester.

use std::future::Future;

use pont_domain::error::ChannelError;

/// One-shot, prompt-delimited request/response transport.
pub trait ControlChannel: Send + Sync {
    /// The prompt sentinel the peer emits when ready for the next command.
    fn prompt(&self) -> &str;

    /// Send a single command and return everything read up to and including
    /// the next prompt. One best-effort attempt; the connection is closed on
    /// every exit path.
    fn send(&self, command: &str) -> impl Future<Output = Result<String, ChannelError>> + Send;

    /// Like [`send`](Self::send), but the returned text is prefixed with an
    /// echo of the prompt and the command, for terminal-emulation display.
    fn send_interactive(
        &self,
        command: &str,
    ) -> impl Future<Output = Result<String, ChannelError>> + Send;
}
