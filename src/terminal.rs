//! Terminal input injection.
//!
//! Puts the generated command into the terminal's pending input so the
//! user can review and edit it before running. On platforms (or
//! terminals) where that is not possible, the command is printed to
//! stdout instead.

#[cfg(unix)]
use tracing::debug;

/// Inserts the command into the terminal's input buffer, falling back
/// to printing it followed by a newline.
pub fn insert_input(command: &str) {
    #[cfg(unix)]
    {
        match tty::inject(command) {
            Ok(()) => return,
            Err(err) => debug!("terminal injection unavailable, printing instead: {err}"),
        }
    }

    println!("{command}");
}

#[cfg(unix)]
mod tty {
    use std::io;
    use std::os::unix::io::AsRawFd;

    /// Pushes each byte of `command` into the controlling terminal's
    /// input queue via the TIOCSTI ioctl.
    pub(super) fn inject(command: &str) -> io::Result<()> {
        let stdin = io::stdin();
        let fd = stdin.as_raw_fd();

        // SAFETY: isatty only inspects the file descriptor.
        if unsafe { libc::isatty(fd) } == 0 {
            return Err(io::Error::other("stdin is not a terminal"));
        }

        for byte in command.as_bytes() {
            let ch = *byte as libc::c_char;
            // SAFETY: TIOCSTI reads exactly one byte from the pointer;
            // `ch` outlives the call.
            if unsafe { libc::ioctl(fd, libc::TIOCSTI as _, &raw const ch) } < 0 {
                return Err(io::Error::last_os_error());
            }
        }

        Ok(())
    }
}
