//! Attribute formatters and the formatter chain
//!
//! A formatter pairs a [`Matcher`] (which attributes it applies to) with a
//! [`Transform`] (how it rewrites them). The chain runs every formatter
//! against every attribute in order; a later formatter sees what earlier
//! ones did to the same attribute.
//!
//! # Example
//!
//! ```
//! use rust_structured_logger::{Attr, Formatter, FormatterChain};
//!
//! let chain = FormatterChain::new(vec![
//!     Formatter::rewrite_key("source", "logger"),
//!     Formatter::rewrite_key("logger", "caller"),
//! ]);
//!
//! let mut attr = Attr::new("source", "main.rs:10");
//! chain.apply(&mut attr);
//! assert_eq!(attr.key, "caller");
//! ```

use super::attribute::{Attr, Value, ValueKind, SOURCE_KEY, TIME_KEY};
use super::timestamp::TimeLayout;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Which attributes a formatter applies to
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Attribute key equals the given key at the time of evaluation
    ByKey(String),
    /// Attribute value has the given kind, whatever its key
    ByValueKind(ValueKind),
}

impl Matcher {
    fn matches(&self, attr: &Attr) -> bool {
        match self {
            Matcher::ByKey(key) => attr.key == *key,
            Matcher::ByValueKind(kind) => attr.value.kind() == *kind,
        }
    }
}

/// Directory that relative source paths are computed against
#[derive(Debug, Clone, PartialEq)]
pub enum SourceRoot {
    /// The process working directory, resolved on every call
    WorkingDir,
    /// A fixed directory
    Dir(PathBuf),
}

impl SourceRoot {
    fn resolve(&self) -> Option<PathBuf> {
        match self {
            SourceRoot::WorkingDir => std::env::current_dir().ok(),
            SourceRoot::Dir(dir) => Some(dir.clone()),
        }
    }
}

/// How a matched attribute is rewritten
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Rename the key, keep the value
    RewriteKey(String),
    /// Optionally normalize to UTC, then keep as a time or render with a layout
    TimeFormat { layout: Option<TimeLayout>, utc: bool },
    /// Make an absolute source file path relative to a root directory
    RelativeSource(SourceRoot),
}

impl Transform {
    fn apply(&self, attr: &mut Attr) {
        match self {
            Transform::RewriteKey(new_key) => attr.key.clone_from(new_key),
            Transform::TimeFormat { layout, utc } => {
                let Some(mut time) = attr.value.as_time().copied() else {
                    return;
                };
                if *utc {
                    time = time.with_timezone(&Utc).fixed_offset();
                }
                attr.value = match layout {
                    Some(layout) => match layout.format(&time) {
                        Some(rendered) => Value::String(rendered),
                        None => return,
                    },
                    None => Value::Time(time),
                };
            }
            Transform::RelativeSource(root) => {
                let Value::Source(source) = &mut attr.value else {
                    return;
                };
                let Some(root) = root.resolve() else {
                    return;
                };
                if let Some(relative) = relative_to(&source.file, &root) {
                    source.file = relative;
                }
            }
        }
    }
}

/// `file` relative to `root` with `/` separators, if `file` lies under `root`
fn relative_to(file: &str, root: &Path) -> Option<String> {
    let relative = Path::new(file).strip_prefix(root).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// A rule that conditionally rewrites an attribute's key or value
#[derive(Debug, Clone, PartialEq)]
pub struct Formatter {
    matcher: Matcher,
    transform: Transform,
}

impl Formatter {
    pub fn new(matcher: Matcher, transform: Transform) -> Self {
        Self { matcher, transform }
    }

    /// Rename every attribute keyed `key` to `new_key`
    pub fn rewrite_key(key: impl Into<String>, new_key: impl Into<String>) -> Self {
        Self::new(
            Matcher::ByKey(key.into()),
            Transform::RewriteKey(new_key.into()),
        )
    }

    /// Rewrite the `source` file path relative to the process working directory
    ///
    /// Only absolute paths are rewritten. Call sites inside the current
    /// package usually report paths that are already relative (such as
    /// `src/main.rs`), so in practice this shortens paths from dependencies
    /// built elsewhere, such as registry crates.
    pub fn relative_source() -> Self {
        Self::new(
            Matcher::ByKey(SOURCE_KEY.to_string()),
            Transform::RelativeSource(SourceRoot::WorkingDir),
        )
    }

    /// Rewrite the `source` file path relative to `dir`
    pub fn relative_source_to(dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Matcher::ByKey(SOURCE_KEY.to_string()),
            Transform::RelativeSource(SourceRoot::Dir(dir.into())),
        )
    }

    /// Format the record timestamp (`time` key)
    ///
    /// With `layout == None` the value stays a time, UTC-normalized if `utc`.
    pub fn time_format(layout: Option<TimeLayout>, utc: bool) -> Self {
        Self::new(
            Matcher::ByKey(TIME_KEY.to_string()),
            Transform::TimeFormat { layout, utc },
        )
    }

    /// Format every time-valued attribute regardless of its key
    pub fn times_format(layout: Option<TimeLayout>, utc: bool) -> Self {
        Self::new(
            Matcher::ByValueKind(ValueKind::Time),
            Transform::TimeFormat { layout, utc },
        )
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Pure predicate over the attribute's current key and value
    pub fn should_handle(&self, attr: &Attr) -> bool {
        self.matcher.matches(attr)
    }

    /// Rewrite `attr` in place; never fails, a mismatched shape is left alone
    pub fn format(&self, attr: &mut Attr) {
        self.transform.apply(attr);
    }
}

/// Ordered formatter sequence applied to each attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatterChain {
    formatters: Vec<Formatter>,
}

impl FormatterChain {
    pub fn new(formatters: Vec<Formatter>) -> Self {
        Self { formatters }
    }

    /// Run `attr` through every formatter, in order, without short-circuiting
    pub fn apply(&self, attr: &mut Attr) {
        for formatter in &self.formatters {
            if formatter.should_handle(attr) {
                formatter.format(attr);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }
}

impl From<Vec<Formatter>> for FormatterChain {
    fn from(formatters: Vec<Formatter>) -> Self {
        Self::new(formatters)
    }
}
