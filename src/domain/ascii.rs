//! ASCII-safe rendering of values for embedding in log lines.
//!
//! Log lines must stay printable even when the data they carry is not:
//! control characters, high code points, and nested collections are all
//! rendered as plain ASCII tokens. The rendering is total; no input shape
//! can make it fail.

use std::fmt;

/// Names for the 32 ASCII control codes (0-31).
const CONTROL_CHARS: [&str; 32] = [
    "<NUL>", "<SOH>", "<STX>", "<ETX>", "<EOT>", "<ENQ>", "<ACK>", "<BEL>",
    "<BS>", "<HT>", "<LF>", "<VT>", "<FF>", "<CR>", "<SO>", "<SI>", "<DLE>",
    "<DC1>", "<DC2>", "<DC3>", "<DC4>", "<NAK>", "<SYN>", "<ETB>", "<CAN>",
    "<EM>", "<SUB>", "<ESC>", "<FS>", "<GS>", "<RS>", "<US>",
];

/// A fixed-size array with explicit bounds, rendered as
/// `(<lower> to <upper> : {elements})`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedArray {
    /// Index of the first element.
    pub lower: i64,
    /// Index of the last element.
    pub upper: i64,
    /// The elements themselves.
    pub items: Vec<LogValue>,
}

/// A value that can be serialized into a printable ASCII string.
///
/// This is the shape-dispatch model for [`asciify`]: each variant has a
/// fixed rendering rule, and anything without a better rule falls through
/// to its plain text form.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    /// A single character, escaped when not printable ASCII.
    Char(char),
    /// A string; `None` renders as an empty quoted string.
    Str(Option<String>),
    /// An ordered collection; `None` or empty renders as `{}`.
    List(Option<Vec<LogValue>>),
    /// A bounded array; `None` renders as `()`.
    Array(Option<BoundedArray>),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// Anything else, pre-rendered by the caller.
    Text(String),
}

/// Render a value as a printable ASCII string.
///
/// Total over all inputs: absent strings render as `""`, absent or empty
/// lists as `{}`, absent arrays as `()`.
pub fn asciify(value: &LogValue) -> String {
    match value {
        LogValue::Char(c) => asciify_char(*c),
        LogValue::Str(s) => asciify_str(s.as_deref()),
        LogValue::List(items) => asciify_list(items.as_deref().unwrap_or(&[])),
        LogValue::Array(arr) => asciify_array(arr.as_ref()),
        LogValue::Int(i) => i.to_string(),
        LogValue::Float(f) => f.to_string(),
        LogValue::Bool(b) => b.to_string(),
        LogValue::Text(t) => t.clone(),
    }
}

/// Render a single character.
///
/// Control codes 0-31 map to their fixed names (`\r` becomes `<CR>`),
/// printable ASCII passes through unchanged, and everything from 127 up
/// renders as `<code>`.
pub fn asciify_char(c: char) -> String {
    let code = c as u32;
    if let Some(name) = CONTROL_CHARS.get(code as usize) {
        (*name).to_string()
    } else if code < 127 {
        c.to_string()
    } else {
        format!("<{code}>")
    }
}

/// Render a string as a double-quoted sequence of per-character renderings.
///
/// `None` and the empty string both render as `""`.
pub fn asciify_str(s: Option<&str>) -> String {
    let mut out = String::from("\"");
    if let Some(s) = s {
        for c in s.chars() {
            out.push_str(&asciify_char(c));
        }
    }
    out.push('"');
    out
}

fn asciify_list(items: &[LogValue]) -> String {
    if items.is_empty() {
        return "{}".to_string();
    }
    let rendered: Vec<String> = items.iter().map(asciify).collect();
    format!("{{{}}}", rendered.join(", "))
}

fn asciify_array(arr: Option<&BoundedArray>) -> String {
    match arr {
        None => "()".to_string(),
        Some(arr) => format!(
            "({} to {} : {})",
            arr.lower,
            arr.upper,
            asciify_list(&arr.items)
        ),
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&asciify(self))
    }
}

impl From<char> for LogValue {
    fn from(c: char) -> Self {
        LogValue::Char(c)
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Str(Some(s.to_string()))
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Str(Some(s))
    }
}

impl From<i64> for LogValue {
    fn from(i: i64) -> Self {
        LogValue::Int(i)
    }
}

impl From<i32> for LogValue {
    fn from(i: i32) -> Self {
        LogValue::Int(i64::from(i))
    }
}

impl From<f64> for LogValue {
    fn from(f: f64) -> Self {
        LogValue::Float(f)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<Vec<LogValue>> for LogValue {
    fn from(items: Vec<LogValue>) -> Self {
        LogValue::List(Some(items))
    }
}
