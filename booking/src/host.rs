//! The environment the page runs in.
//!
//! The workflow never talks to a browser, terminal or operating system
//! directly. It asks a [`Host`] to open links, scroll and print, and does not
//! wait for or inspect the outcome beyond logging it.

use crate::error::HostError;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Host-side actions the workflow can request
pub trait Host: Send + Sync {
    /// Open `url` in a new browsing context (tab, app, dialer)
    fn open_in_new_context(&self, url: &str);

    /// Scroll the page back to the top
    fn scroll_to_top(&self);

    /// Open a print view containing `document` and show the print dialog
    ///
    /// # Errors
    ///
    /// Returns [`HostError::PopupBlocked`] when the print view cannot be
    /// opened, or [`HostError::Io`] when writing it fails.
    fn print_document(&self, document: &str) -> Result<(), HostError>;
}

/// Host for the terminal front end
///
/// Links are written to the output for the user to open, and print views are
/// saved as HTML files in the receipt directory. Without a receipt directory
/// printing behaves like a blocked pop-up.
pub struct TerminalHost<W> {
    out: Mutex<W>,
    receipt_dir: Option<PathBuf>,
    printed: AtomicUsize,
}

impl<W: Write + Send> TerminalHost<W> {
    /// Creates a host writing to `out` and saving print views in `receipt_dir`
    pub const fn new(out: W, receipt_dir: Option<PathBuf>) -> Self {
        Self {
            out: Mutex::new(out),
            receipt_dir,
            printed: AtomicUsize::new(0),
        }
    }

    fn say(&self, line: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{line}");
            let _ = out.flush();
        }
    }
}

impl<W: Write + Send> Host for TerminalHost<W> {
    fn open_in_new_context(&self, url: &str) {
        tracing::info!(%url, "Opening link");
        self.say(&format!("→ open {url}"));
    }

    fn scroll_to_top(&self) {
        tracing::trace!("Scroll to top");
    }

    fn print_document(&self, document: &str) -> Result<(), HostError> {
        let Some(dir) = &self.receipt_dir else {
            return Err(HostError::PopupBlocked);
        };

        std::fs::create_dir_all(dir)?;
        let n = self.printed.fetch_add(1, Ordering::SeqCst) + 1;
        let path = dir.join(format!("receipt-{n}.html"));
        std::fs::write(&path, document)?;

        tracing::info!(path = %path.display(), "Print view written");
        self.say(&format!("→ print {}", path.display()));
        Ok(())
    }
}
