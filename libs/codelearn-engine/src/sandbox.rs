//! Out-of-process execution of submitted JavaScript.
//!
//! The submission runs in a child `node` process executing a fixed
//! harness. The harness evaluates the source inside a `vm` context whose
//! globals are an explicit allow-list: a print-capturing console plus the
//! safe numeric/string/date/collection/JSON built-ins. No `require`, no
//! timers, no `process`, no filesystem or network reachable from the
//! context. The source travels base64-encoded in the child environment
//! and is never interpolated into a shell.
//!
//! Deadline enforcement is two-layered: the harness arms the cooperative
//! `vm` timeout so overruns V8 can interrupt report a precise message,
//! and the host races the child against `time_limit_ms` plus a small
//! grace with `tokio::time::timeout`, hard-killing the process when the
//! timer wins.
//!
//! stdout is streamed into a buffer capped at `max_output_len`; past the
//! cap the buffer is truncated, a marker appended, and the rest of the
//! stream drained and discarded so the child is never back-pressured into
//! a false timeout. Output accumulated before a fault is preserved.

use std::process::Stdio;
use std::time::{Duration, Instant};

use base64::{engine::general_purpose, Engine as _};
use codelearn_common::types::ExecutionResult;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

/// Appended to output truncated at the cap.
pub const OUTPUT_TRUNCATION_MARKER: &str = "\n[Output truncated]";

/// Submissions larger than this are rejected without spawning.
const MAX_SOURCE_CODE_BYTES: usize = 1024 * 1024;

/// Captured stderr is bounded too; errors never need more than this.
const MAX_STDERR_LEN: usize = 4096;

/// Host-side slack beyond the cooperative deadline before the hard kill.
const TIMEOUT_GRACE_MS: u64 = 250;

/// Fixed harness executed by the child. Reads the base64 source and the
/// time limit from its environment, builds the allow-listed context, and
/// reports faults on stderr with a nonzero exit.
const SANDBOX_HARNESS: &str = r#"
'use strict';
const vm = require('vm');

const source = Buffer.from(process.env.SOURCE_CODE || '', 'base64').toString('utf8');
const timeLimitMs = parseInt(process.env.TIME_LIMIT_MS || '5000', 10);

const sandbox = {
  console: {
    log: (...args) => process.stdout.write(args.join(' ') + '\n'),
    error: (...args) => process.stdout.write('ERROR: ' + args.join(' ') + '\n'),
    warn: (...args) => process.stdout.write('WARNING: ' + args.join(' ') + '\n'),
  },
  Math: Math,
  JSON: JSON,
  Array: Array,
  Object: Object,
  String: String,
  Number: Number,
  Boolean: Boolean,
  Date: Date,
  RegExp: RegExp,
  Error: Error,
  parseInt: parseInt,
  parseFloat: parseFloat,
  isNaN: isNaN,
  isFinite: isFinite,
  undefined: undefined,
};

try {
  const script = new vm.Script(source, { filename: 'submission.js' });
  const context = vm.createContext(sandbox);
  script.runInContext(context, { timeout: timeLimitMs });
} catch (err) {
  const message = err instanceof Error ? err.message : String(err);
  if (/Script execution timed out/.test(message)) {
    process.stderr.write('Code execution exceeded timeout of ' + timeLimitMs + 'ms');
  } else {
    process.stderr.write(message);
  }
  process.exit(1);
}
"#;

/// Execute submitted code under the sandbox contract.
///
/// Never returns an error: spawn failures, faults, and timeouts all
/// resolve into the result. `execution_time_ms` is wall-clock time around
/// the whole attempt.
pub async fn execute(code: &str, time_limit_ms: u64, max_output_len: usize) -> ExecutionResult {
    if code.len() > MAX_SOURCE_CODE_BYTES {
        return ExecutionResult::failure(format!(
            "Source code exceeds maximum size of {} bytes",
            MAX_SOURCE_CODE_BYTES
        ));
    }

    let start_time = Instant::now();

    let spawned = Command::new("node")
        .arg("-e")
        .arg(SANDBOX_HARNESS)
        .env_clear()
        .env("PATH", std::env::var("PATH").unwrap_or_default())
        .env("SOURCE_CODE", general_purpose::STANDARD.encode(code))
        .env("TIME_LIMIT_MS", time_limit_ms.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            warn!(error = %e, "Failed to spawn sandbox runtime");
            return ExecutionResult::failure(format!("Failed to launch sandbox runtime: {}", e));
        }
    };

    // Readers run concurrently with the wait so a chatty child never
    // fills its pipes and stalls.
    let stdout_task = match child.stdout.take() {
        Some(stdout) => tokio::spawn(read_capped(stdout, max_output_len)),
        None => return ExecutionResult::failure("Sandbox stdout was not captured"),
    };
    let stderr_task = match child.stderr.take() {
        Some(stderr) => tokio::spawn(read_capped(stderr, MAX_STDERR_LEN)),
        None => return ExecutionResult::failure("Sandbox stderr was not captured"),
    };

    let deadline = Duration::from_millis(time_limit_ms + TIMEOUT_GRACE_MS);
    let wait_result = tokio::time::timeout(deadline, child.wait()).await;

    let mut timed_out = false;
    let mut error: Option<String> = None;

    let exit_ok = match wait_result {
        Ok(Ok(status)) => status.success(),
        Ok(Err(e)) => {
            error = Some(format!("Sandbox wait failed: {}", e));
            false
        }
        Err(_) => {
            // Hard deadline: the cooperative vm timeout did not fire in
            // time (blocked or non-interruptible code). Kill the child;
            // the pipes close and the readers finish with partial output.
            timed_out = true;
            if let Err(e) = child.start_kill() {
                warn!(error = %e, "Failed to kill timed-out sandbox");
            }
            let _ = child.wait().await;
            false
        }
    };

    let (stdout, truncated) = stdout_task.await.unwrap_or_default();
    let (stderr, _) = stderr_task.await.unwrap_or_default();

    let execution_time_ms = start_time.elapsed().as_millis() as u64;

    if timed_out {
        error = Some(format!("Code execution exceeded timeout of {}ms", time_limit_ms));
    } else if !exit_ok && error.is_none() {
        let message = stderr.trim();
        error = Some(if message.is_empty() {
            "Submission exited with an error".to_string()
        } else {
            message.to_string()
        });
    }

    let mut output = stdout.trim().to_string();
    if truncated {
        output.push_str(OUTPUT_TRUNCATION_MARKER);
    }

    let success = error.is_none();
    debug!(
        success,
        timed_out,
        truncated,
        execution_time_ms,
        output_len = output.len(),
        "Sandbox execution finished"
    );

    ExecutionResult {
        success,
        output,
        error,
        execution_time_ms,
    }
}

/// Read a stream into a string, keeping at most `cap` characters.
///
/// Once the cap is reached the rest of the stream is drained and
/// discarded. Returns the (possibly shortened) text and whether anything
/// was dropped.
async fn read_capped<R: AsyncRead + Unpin>(mut stream: R, cap: usize) -> (String, bool) {
    let mut collected: Vec<u8> = Vec::new();
    let mut dropped = false;
    let mut chunk = [0u8; 8192];

    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                if collected.len() < cap {
                    let room = cap.saturating_sub(collected.len());
                    collected.extend_from_slice(&chunk[..n.min(room)]);
                    if n > room {
                        dropped = true;
                    }
                } else {
                    dropped = true;
                }
            }
            Err(_) => break,
        }
    }

    let mut text = String::from_utf8_lossy(&collected).into_owned();
    // A byte-level cap can land inside a multi-byte character; step back
    // to the previous boundary rather than keeping a replacement char.
    if dropped {
        let mut end = cap.min(text.len());
        while end > 0 && !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }

    (text, dropped)
}
