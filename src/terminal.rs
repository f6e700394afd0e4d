use std::io;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing::warn;

/// Raw mode for the lifetime of the guard. Dropping it restores the terminal,
/// including on early returns and panics.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to leave raw mode: {}", e);
        }
        if let Err(e) = execute!(io::stdout(), Show) {
            warn!("failed to show cursor: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_restores_without_raw_mode_enabled() {
        // no tty under test; restoring must still be harmless
        let guard = RawModeGuard { _private: () };
        drop(guard);
    }
}
