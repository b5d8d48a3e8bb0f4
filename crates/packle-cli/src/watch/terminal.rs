//! Terminal mode restore for watch mode.
//!
//! The key listener thread spends nearly all its time inside
//! `Term::read_key`, with the terminal in raw mode. When SIGINT ends watch
//! mode while that read is blocked, the thread never gets to restore the mode
//! itself. [`TerminalGuard`] snapshots the mode
//! before the listener starts and writes it back when dropped.

/// Terminal mode captured at watch start, restored on drop.
pub struct TerminalGuard {
    saved: Option<imp::Saved>,
}

impl TerminalGuard {
    /// Snapshot the controlling terminal's mode, if there is one.
    pub fn capture() -> Self {
        Self {
            saved: imp::Saved::capture(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.saved.is_some()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Some(saved) = &self.saved {
            if let Err(e) = saved.restore() {
                tracing::debug!("Failed to restore terminal mode: {}", e);
            }
        }
    }
}

#[cfg(unix)]
mod imp {
    use std::fs::{File, OpenOptions};
    use std::io;
    use std::mem::MaybeUninit;
    use std::os::fd::AsRawFd;

    pub struct Saved {
        tty: File,
        pub(super) original: libc::termios,
    }

    impl Saved {
        pub fn capture() -> Option<Self> {
            let tty = OpenOptions::new()
                .read(true)
                .write(true)
                .open("/dev/tty")
                .ok()?;

            let mut termios = MaybeUninit::<libc::termios>::uninit();
            // SAFETY: `tty` is an open descriptor and tcgetattr only writes
            // into `termios`.
            if unsafe { libc::tcgetattr(tty.as_raw_fd(), termios.as_mut_ptr()) } != 0 {
                return None;
            }
            // SAFETY: initialized by the successful tcgetattr above.
            let original = unsafe { termios.assume_init() };

            Some(Self { tty, original })
        }

        pub fn restore(&self) -> io::Result<()> {
            // SAFETY: `original` was read from this same descriptor.
            let rc = unsafe {
                libc::tcsetattr(self.tty.as_raw_fd(), libc::TCSADRAIN, &self.original)
            };
            if rc == 0 {
                Ok(())
            } else {
                Err(io::Error::last_os_error())
            }
        }
    }
}

// console reads keys without a terminal mode switch here.
#[cfg(not(unix))]
mod imp {
    pub struct Saved;

    impl Saved {
        pub fn capture() -> Option<Self> {
            None
        }

        pub fn restore(&self) -> std::io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_round_trip() {
        // Without a controlling terminal (CI) the guard is inert.
        let guard = TerminalGuard::capture();
        let active = guard.is_active();
        drop(guard);

        if active {
            assert!(TerminalGuard::capture().is_active());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_restore_puts_back_captured_mode() {
        let Some(saved) = imp::Saved::capture() else {
            return;
        };
        saved.restore().unwrap();

        let again = imp::Saved::capture().unwrap();
        assert_eq!(again.original.c_lflag, saved.original.c_lflag);
        assert_eq!(again.original.c_iflag, saved.original.c_iflag);
    }
}
