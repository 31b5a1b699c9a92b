//! Test doubles for the booking environment.
//!
//! **WARNING**: Do NOT use in production. These are for testing only!

use crate::code::{CodeSource, DisplayCode};
use crate::error::HostError;
use crate::host::Host;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One request the workflow made of the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// `open_in_new_context` with this URL
    Opened(String),
    /// `scroll_to_top`
    ScrolledToTop,
    /// `print_document` with this document
    Printed(String),
}

/// Host that records every request in order
///
/// Clones share the same log, so a test keeps one clone and hands another to
/// the environment.
#[derive(Clone, Default)]
pub struct RecordingHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
    block_print: bool,
}

impl RecordingHost {
    /// Create a host that accepts every request
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host whose print view is always blocked
    #[must_use]
    pub fn blocking_print() -> Self {
        Self {
            block_print: true,
            ..Self::default()
        }
    }

    /// Requests recorded so far
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// URLs opened so far
    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Opened(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Host for RecordingHost {
    fn open_in_new_context(&self, url: &str) {
        self.record(HostCall::Opened(url.to_string()));
    }

    fn scroll_to_top(&self) {
        self.record(HostCall::ScrolledToTop);
    }

    fn print_document(&self, document: &str) -> Result<(), HostError> {
        if self.block_print {
            return Err(HostError::PopupBlocked);
        }
        self.record(HostCall::Printed(document.to_string()));
        Ok(())
    }
}

/// Code source that hands out a fixed list of codes, cycling at the end
pub struct ScriptedCodes {
    codes: Vec<DisplayCode>,
    next: AtomicUsize,
}

impl ScriptedCodes {
    /// Create a source producing `codes` in order
    ///
    /// An empty list yields empty codes.
    #[must_use]
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: codes.iter().map(|c| DisplayCode::from_static(c)).collect(),
            next: AtomicUsize::new(0),
        }
    }

    /// Number of codes handed out so far
    #[must_use]
    pub fn issued(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl CodeSource for ScriptedCodes {
    fn next_code(&self) -> DisplayCode {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        if self.codes.is_empty() {
            return DisplayCode::from_static("");
        }
        self.codes[n % self.codes.len()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_codes_cycle() {
        let codes = ScriptedCodes::new(&["AAAAAA", "BBBBBB"]);
        assert_eq!(codes.next_code().as_str(), "AAAAAA");
        assert_eq!(codes.next_code().as_str(), "BBBBBB");
        assert_eq!(codes.next_code().as_str(), "AAAAAA");
        assert_eq!(codes.issued(), 3);
    }

    #[test]
    fn recording_host_shares_log_between_clones() {
        let host = RecordingHost::new();
        let handle = host.clone();
        host.scroll_to_top();
        host.open_in_new_context("tel:+91");
        assert_eq!(
            handle.calls(),
            vec![HostCall::ScrolledToTop, HostCall::Opened("tel:+91".to_string())]
        );
    }

    #[test]
    fn blocked_print_is_not_recorded() {
        let host = RecordingHost::blocking_print();
        assert!(host.print_document("doc").is_err());
        assert!(host.calls().is_empty());
    }
}
