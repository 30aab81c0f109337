/*!
 * Invariant Verification
 * Fatal reporting for broken internal invariants
 *
 * Everything on this path is usable from a signal handler: the report is
 * formatted into a fixed stack buffer, written with a single write(2) and
 * followed by abort(). Nothing allocates and nothing takes a lock.
 */

use std::fmt::{self, Write};

/// Maximum report length; anything longer is truncated
pub const REPORT_CAPACITY: usize = 512;

/// Abort the process with a diagnostic when `cond` is false
///
/// ```ignore
/// verify!(signum >= 0 && signum < 32, "signal number out of range: {}", signum);
/// ```
#[macro_export]
macro_rules! verify {
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            $crate::core::verify::verify_failed(
                file!(),
                line!(),
                stringify!($cond),
                format_args!($($arg)+),
            )
        }
    };
}

/// Fixed-capacity formatting target
pub(crate) struct StackBuffer {
    buf: [u8; REPORT_CAPACITY],
    len: usize,
}

impl StackBuffer {
    pub(crate) const fn new() -> Self {
        Self {
            buf: [0; REPORT_CAPACITY],
            len: 0,
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Write for StackBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let n = s.len().min(REPORT_CAPACITY - self.len);
        self.buf[self.len..self.len + n].copy_from_slice(&s.as_bytes()[..n]);
        self.len += n;
        Ok(())
    }
}

/// Format the failure report for `cond` at `file:line`
pub(crate) fn format_report(
    report: &mut StackBuffer,
    file: &str,
    line: u32,
    cond: &str,
    args: fmt::Arguments<'_>,
) {
    // StackBuffer never fails; truncation is silent
    let _ = write!(report, "{}:{}: verify failed: {}: ", file, line, cond);
    let _ = report.write_fmt(args);
    let _ = report.write_str("\n");
}

/// Report a violated invariant and abort. Used by [`verify!`], do not call directly.
#[cold]
#[inline(never)]
pub fn verify_failed(file: &str, line: u32, cond: &str, args: fmt::Arguments<'_>) -> ! {
    let mut report = StackBuffer::new();
    format_report(&mut report, file, line, cond, args);
    write_stderr(report.as_bytes());
    std::process::abort()
}

#[cfg(unix)]
fn write_stderr(bytes: &[u8]) {
    use std::os::fd::BorrowedFd;

    // SAFETY: stderr stays open for the lifetime of the process
    let stderr = unsafe { BorrowedFd::borrow_raw(libc::STDERR_FILENO) };
    let _ = nix::unistd::write(stderr, bytes);
}

#[cfg(not(unix))]
fn write_stderr(bytes: &[u8]) {
    // SAFETY: fd 2 is the CRT's stderr; the buffer is valid for its length
    unsafe {
        libc::write(2, bytes.as_ptr().cast(), bytes.len() as _);
    }
}
