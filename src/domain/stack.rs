//! Call-stack and thread-state formatting.
//!
//! The renderer operates on plain frame sequences produced by a stack
//! capture adapter, so the filtering and collapsing rules here are
//! platform-independent and fully testable without walking a real stack:
//!
//! - frames belonging to this toolkit are never rendered;
//! - standard-library frames before the first application frame are shown
//!   in full (they locate where the program entered the runtime);
//! - once an application frame has been rendered, each consecutive run of
//!   standard-library frames collapses to a single `...` line;
//! - application frames always render individually.

use std::path::Path;

/// Module-path roots of the Rust standard library.
const STD_PREFIXES: [&str; 3] = ["std", "core", "alloc"];

/// Indentation of rendered frame lines.
const FRAME_INDENT: &str = "      ";

/// One captured stack frame, already resolved to a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Fully qualified name of the function, e.g. `myapp::worker::run`.
    pub qualified_name: String,
    /// Parameter type names, when the platform exposes them.
    pub param_types: Vec<String>,
    /// True for frames belonging to this toolkit itself.
    pub is_own_framework: bool,
    /// True for standard-library frames.
    pub is_library: bool,
    /// Source file path, when known.
    pub file: Option<String>,
    /// Line number, when known.
    pub line: Option<u32>,
}

impl StackFrame {
    /// Build an application frame with just a name. Mostly useful in tests
    /// and for synthetic frames.
    pub fn application(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            param_types: Vec::new(),
            is_own_framework: false,
            is_library: false,
            file: None,
            line: None,
        }
    }

    /// Build a standard-library frame with just a name.
    pub fn library(qualified_name: impl Into<String>) -> Self {
        Self {
            is_library: true,
            ..Self::application(qualified_name)
        }
    }
}

/// Run state of a thread at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadRunState {
    /// Running or runnable.
    Running,
    /// Blocked waiting on something.
    Waiting,
    /// Stopped or exited.
    Stopped,
    /// State could not be determined.
    Unknown,
}

impl ThreadRunState {
    /// Label used in formatted output.
    pub fn label(self) -> &'static str {
        match self {
            ThreadRunState::Running => "Running",
            ThreadRunState::Waiting => "Waiting",
            ThreadRunState::Stopped => "Stopped",
            ThreadRunState::Unknown => "Unknown",
        }
    }
}

/// A frozen view of one thread's identity and run state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSnapshot {
    /// Thread name, when one was assigned.
    pub name: Option<String>,
    /// Numeric thread id.
    pub id: u64,
    /// Run state at snapshot time.
    pub state: ThreadRunState,
    /// Why the thread is waiting; only meaningful when `state` is
    /// [`ThreadRunState::Waiting`].
    pub wait_reason: Option<String>,
}

impl ThreadSnapshot {
    /// Display name for report lines: the assigned name, or empty.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Is this qualified name rooted in the standard library?
///
/// A fixed case-insensitive prefix compare against the `std`, `core` and
/// `alloc` module roots.
pub fn is_std_symbol(qualified_name: &str) -> bool {
    let root = qualified_name
        .split("::")
        .next()
        .unwrap_or(qualified_name);
    STD_PREFIXES
        .iter()
        .any(|prefix| root.eq_ignore_ascii_case(prefix))
}

/// Render a captured frame sequence, innermost call first.
///
/// Toolkit frames are dropped, library runs after the first application
/// frame collapse to one `...` line per run, and every rendered line ends
/// with a newline.
pub fn format_frames(frames: &[StackFrame]) -> String {
    let mut out = String::new();
    let mut seen_application_frame = false;
    let mut last_line_was_dots = false;

    for frame in frames {
        if frame.is_own_framework {
            continue;
        }
        if frame.is_library && seen_application_frame {
            if !last_line_was_dots {
                out.push_str(FRAME_INDENT);
                out.push_str("...\n");
            }
            last_line_was_dots = true;
            continue;
        }
        if !frame.is_library {
            seen_application_frame = true;
        }
        out.push_str(FRAME_INDENT);
        out.push_str(&describe_frame(frame));
        out.push('\n');
        last_line_was_dots = false;
    }

    out
}

/// Render one frame as `name(Params)` plus optional source location.
fn describe_frame(frame: &StackFrame) -> String {
    let mut line = format!(
        "{}({})",
        frame.qualified_name,
        frame.param_types.join(", ")
    );
    if let Some(file) = frame.file.as_deref() {
        line.push_str(&format!(" in '{}'", short_file_name(file)));
    }
    if let Some(n) = frame.line {
        line.push_str(&format!(" at line {n}"));
    }
    line
}

/// Reduce a source path to `<parent dir>/<file name>`.
///
/// Full build paths are noise in a log; the parent directory is usually
/// enough to disambiguate a file name.
fn short_file_name(file: &str) -> String {
    let path = Path::new(file);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());
    match path
        .parent()
        .and_then(Path::file_name)
        .map(|d| d.to_string_lossy())
    {
        Some(dir) => format!("{dir}/{name}"),
        None => name,
    }
}

/// Render a thread header, its run state, and a call-stack body.
///
/// `stack_body` is either [`format_frames`] output or a fallback line when
/// capture failed; this function does not care which.
pub fn format_thread_state(thread: &ThreadSnapshot, stack_body: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "   Thread {}({})\n",
        thread.display_name(),
        thread.id
    ));
    out.push_str(&format!("   ThreadState = {}\n", thread.state.label()));
    out.push_str("   Call Stack:\n");
    out.push_str(stack_body);
    out
}

/// Render run-state summaries for every thread of the process.
///
/// The wait reason is appended only when the thread is actually waiting.
pub fn format_process_threads(threads: &[ThreadSnapshot]) -> String {
    let mut out = String::new();
    for thread in threads {
        out.push_str(&format!(
            "   Thread ID='{}'  Name='{}'\n",
            thread.id,
            thread.display_name()
        ));
        out.push_str(&format!(
            "{FRAME_INDENT}ThreadState = {}",
            thread.state.label()
        ));
        if thread.state == ThreadRunState::Waiting {
            if let Some(reason) = thread.wait_reason.as_deref() {
                out.push_str(&format!(" (WaitReason={reason})"));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &str) -> Vec<String> {
        s.lines().map(|l| l.trim_start().to_string()).collect()
    }

    #[test]
    fn test_std_symbol_classification() {
        assert!(is_std_symbol("std::rt::lang_start"));
        assert!(is_std_symbol("core::ops::function::FnOnce::call_once"));
        assert!(is_std_symbol("alloc::vec::Vec<T>::push"));
        assert!(is_std_symbol("Std::panicking::try"));
        assert!(!is_std_symbol("myapp::worker::run"));
        assert!(!is_std_symbol("stdx::helper"));
    }

    #[test]
    fn test_own_frames_dropped() {
        let mut own = StackFrame::application("logfold::application::debug_log::capture");
        own.is_own_framework = true;
        let frames = vec![own, StackFrame::application("myapp::main")];

        assert_eq!(lines(&format_frames(&frames)), vec!["myapp::main()"]);
    }

    #[test]
    fn test_leading_library_frames_shown_then_collapsed() {
        // [lib, lib, app, lib, lib, app, lib] must render as
        // lib, lib, app, ..., app, ...
        let frames = vec![
            StackFrame::library("core::ops::call"),
            StackFrame::library("std::rt::lang_start"),
            StackFrame::application("myapp::handler"),
            StackFrame::library("std::sync::mutex::lock"),
            StackFrame::library("std::thread::park"),
            StackFrame::application("myapp::main"),
            StackFrame::library("std::rt::cleanup"),
        ];

        assert_eq!(
            lines(&format_frames(&frames)),
            vec![
                "core::ops::call()",
                "std::rt::lang_start()",
                "myapp::handler()",
                "...",
                "myapp::main()",
                "...",
            ]
        );
    }

    #[test]
    fn test_one_ellipsis_per_library_run() {
        let frames = vec![
            StackFrame::application("myapp::a"),
            StackFrame::library("std::x"),
            StackFrame::library("std::y"),
            StackFrame::library("std::z"),
        ];

        let rendered = lines(&format_frames(&frames));
        assert_eq!(rendered, vec!["myapp::a()", "..."]);
    }

    #[test]
    fn test_application_frame_resets_ellipsis() {
        let frames = vec![
            StackFrame::application("myapp::a"),
            StackFrame::library("std::x"),
            StackFrame::application("myapp::b"),
            StackFrame::library("std::y"),
        ];

        assert_eq!(
            lines(&format_frames(&frames)),
            vec!["myapp::a()", "...", "myapp::b()", "..."]
        );
    }

    #[test]
    fn test_frame_with_params_file_and_line() {
        let frame = StackFrame {
            qualified_name: "myapp::io::read".to_string(),
            param_types: vec!["Path".to_string(), "usize".to_string()],
            is_own_framework: false,
            is_library: false,
            file: Some("/home/dev/myapp/src/io.rs".to_string()),
            line: Some(42),
        };

        assert_eq!(
            lines(&format_frames(&[frame])),
            vec!["myapp::io::read(Path, usize) in 'src/io.rs' at line 42"]
        );
    }

    #[test]
    fn test_frame_suffixes_omitted_when_unknown() {
        let frame = StackFrame::application("myapp::run");
        assert_eq!(lines(&format_frames(&[frame])), vec!["myapp::run()"]);

        let mut with_file = StackFrame::application("myapp::run");
        with_file.file = Some("io.rs".to_string());
        assert_eq!(
            lines(&format_frames(&[with_file])),
            vec!["myapp::run() in 'io.rs'"]
        );
    }

    #[test]
    fn test_thread_state_formatting() {
        let thread = ThreadSnapshot {
            name: Some("worker".to_string()),
            id: 7,
            state: ThreadRunState::Running,
            wait_reason: None,
        };
        let body = format_frames(&[StackFrame::application("myapp::main")]);
        let rendered = format_thread_state(&thread, &body);

        assert!(rendered.contains("Thread worker(7)"));
        assert!(rendered.contains("ThreadState = Running"));
        assert!(rendered.contains("Call Stack:"));
        assert!(rendered.contains("myapp::main()"));
    }

    #[test]
    fn test_process_threads_wait_reason_only_when_waiting() {
        let threads = vec![
            ThreadSnapshot {
                name: Some("main".to_string()),
                id: 1,
                state: ThreadRunState::Running,
                wait_reason: None,
            },
            ThreadSnapshot {
                name: Some("io".to_string()),
                id: 2,
                state: ThreadRunState::Waiting,
                wait_reason: Some("DiskSleep".to_string()),
            },
        ];

        let rendered = format_process_threads(&threads);
        assert!(rendered.contains("Thread ID='1'"));
        assert!(rendered.contains("ThreadState = Running\n"));
        assert!(rendered.contains("ThreadState = Waiting (WaitReason=DiskSleep)"));
        // Non-waiting threads never show a reason
        assert!(!rendered.contains("Running (WaitReason"));
    }

    #[test]
    fn test_empty_frame_list() {
        assert_eq!(format_frames(&[]), "");
    }
}
