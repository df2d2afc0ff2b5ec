//! Opening the app in the user's browser.

use std::io;

pub trait BrowserOpener: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Default browser through the `webbrowser` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }
}
