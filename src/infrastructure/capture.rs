//! Native stack and thread-state capture.
//!
//! Walks the calling thread's stack through the `backtrace` crate and
//! resolves each frame to a qualified symbol name, source file, and line.
//! On Linux, process-wide thread run states come from `/proc/self/task`.

use crate::application::ports::{CaptureError, StackCapture};
use crate::domain::stack::{is_std_symbol, StackFrame, ThreadRunState, ThreadSnapshot};

/// Module-path prefix identifying this toolkit's own frames.
const OWN_CRATE_PREFIX: &str = "logfold::";

/// Stack capture adapter backed by the `backtrace` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceCapture;

impl BacktraceCapture {
    /// Create a new capture adapter.
    pub fn new() -> Self {
        Self
    }
}

impl StackCapture for BacktraceCapture {
    fn capture_current(&self) -> Result<Vec<StackFrame>, CaptureError> {
        let mut frames = Vec::new();

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                let name = match symbol.name() {
                    Some(name) => strip_hash_suffix(&name.to_string()),
                    None => return,
                };
                frames.push(StackFrame {
                    is_own_framework: name.starts_with(OWN_CRATE_PREFIX),
                    is_library: is_std_symbol(&name),
                    qualified_name: name,
                    // Rust symbols do not encode parameter types
                    param_types: Vec::new(),
                    file: symbol
                        .filename()
                        .map(|path| path.to_string_lossy().into_owned()),
                    line: symbol.lineno(),
                });
            });
            true
        });

        if frames.is_empty() {
            return Err(CaptureError::new("no stack frames could be resolved"));
        }
        Ok(frames)
    }

    fn current_thread(&self) -> ThreadSnapshot {
        let current = std::thread::current();
        ThreadSnapshot {
            name: current.name().map(str::to_string),
            id: current_thread_numeric_id(),
            // The calling thread is by definition running
            state: ThreadRunState::Running,
            wait_reason: None,
        }
    }

    #[cfg(target_os = "linux")]
    fn process_threads(&self) -> Result<Vec<ThreadSnapshot>, CaptureError> {
        procfs::process_threads()
    }

    #[cfg(not(target_os = "linux"))]
    fn process_threads(&self) -> Result<Vec<ThreadSnapshot>, CaptureError> {
        Err(CaptureError::new(
            "process thread enumeration is only supported on Linux",
        ))
    }
}

/// Drop the trailing `::h<hex>` disambiguator from a Rust symbol name.
fn strip_hash_suffix(name: &str) -> String {
    if let Some(idx) = name.rfind("::h") {
        let (base, hash) = name.split_at(idx);
        if hash.len() == 19 && hash[3..].chars().all(|c| c.is_ascii_hexdigit()) {
            return base.to_string();
        }
    }
    name.to_string()
}

/// Recover the calling thread's numeric id.
///
/// `ThreadId`'s integer value is not exposed on stable; parse it out of
/// the `Debug` rendering (`ThreadId(7)`), falling back to 0.
fn current_thread_numeric_id() -> u64 {
    let rendered = format!("{:?}", std::thread::current().id());
    rendered
        .trim_start_matches("ThreadId(")
        .trim_end_matches(')')
        .parse()
        .unwrap_or(0)
}

#[cfg(target_os = "linux")]
mod procfs {
    use super::*;
    use std::fs;

    /// Snapshot every thread of the current process from `/proc/self/task`.
    pub(super) fn process_threads() -> Result<Vec<ThreadSnapshot>, CaptureError> {
        let entries = fs::read_dir("/proc/self/task")
            .map_err(|e| CaptureError::new(format!("cannot read /proc/self/task: {e}")))?;

        let mut threads = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| CaptureError::new(format!("cannot read task entry: {e}")))?;
            let Ok(tid) = entry.file_name().to_string_lossy().parse::<u64>() else {
                continue;
            };
            let stat_path = entry.path().join("stat");
            // A thread may exit between the readdir and the read
            let Ok(stat) = fs::read_to_string(&stat_path) else {
                continue;
            };
            if let Some(snapshot) = parse_stat(tid, &stat) {
                threads.push(snapshot);
            }
        }

        threads.sort_by_key(|t| t.id);
        Ok(threads)
    }

    /// Parse one `/proc/<pid>/task/<tid>/stat` line.
    ///
    /// Format: `tid (comm) state ...` where comm may itself contain
    /// spaces and parentheses, so the comm field ends at the last `)`.
    pub(super) fn parse_stat(tid: u64, stat: &str) -> Option<ThreadSnapshot> {
        let open = stat.find('(')?;
        let close = stat.rfind(')')?;
        let comm = &stat[open + 1..close];
        let state_char = stat[close + 1..].trim_start().chars().next()?;
        let (state, wait_reason) = map_state(state_char);

        Some(ThreadSnapshot {
            name: Some(comm.to_string()),
            id: tid,
            state,
            wait_reason,
        })
    }

    fn map_state(state_char: char) -> (ThreadRunState, Option<String>) {
        match state_char {
            'R' => (ThreadRunState::Running, None),
            'S' => (ThreadRunState::Waiting, Some("Sleeping".to_string())),
            'D' => (ThreadRunState::Waiting, Some("DiskSleep".to_string())),
            'I' => (ThreadRunState::Waiting, Some("Idle".to_string())),
            'T' | 't' | 'Z' | 'X' => (ThreadRunState::Stopped, None),
            _ => (ThreadRunState::Unknown, None),
        }
    }
}
