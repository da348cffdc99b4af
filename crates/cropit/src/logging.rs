// Author: Dustin Pilgrim
// License: MIT

use std::future::Future;
use std::path::Path;
use std::pin::pin;
use std::task::{Context, Poll, Waker};

use eventline::runtime::{self, LogLevel};

use crate::paths::ensure_parent_dir;

/// Start eventline with a file sink at `log_path`. Console output and debug
/// level follow `verbose`; stdout stays free for command output.
pub fn init_logging(log_path: &Path, verbose: bool) -> Result<(), String> {
    ensure_parent_dir(log_path).map_err(|e| format!("create log dir {}: {e}", log_path.display()))?;

    wait(runtime::init());

    runtime::enable_file_output(log_path)
        .map_err(|e| format!("log file {}: {e}", log_path.display()))?;
    runtime::enable_console_output(verbose);
    runtime::enable_console_color(verbose);
    runtime::set_log_level(match verbose {
        true => LogLevel::Debug,
        false => LogLevel::Info,
    });

    Ok(())
}

/// Drive a future to completion on the current thread. Only used for the
/// runtime init, which never parks on real I/O.
fn wait<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());

    loop {
        if let Poll::Ready(v) = fut.as_mut().poll(&mut cx) {
            return v;
        }
        std::thread::yield_now();
    }
}
