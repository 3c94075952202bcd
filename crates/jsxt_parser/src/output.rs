//! The append-only output builder.

use jsxt_core::text::line_feeds_of;
use std::borrow::Cow;

/// Transformed text as an ordered list of fragments.
///
/// Fixed fragments are borrowed from the constant table. Captures push a
/// fresh frame that collects everything written until `end_capture`, which
/// is how class-field initializers and `vdata` values are set aside.
#[derive(Debug)]
pub struct Output {
    frames: Vec<Vec<Cow<'static, str>>>,
}

impl Output {
    pub fn new() -> Self {
        Self {
            frames: vec![Vec::new()],
        }
    }

    /// Append a fragment to the innermost frame.
    pub fn push(&mut self, fragment: impl Into<Cow<'static, str>>) {
        let fragment = fragment.into();
        if fragment.is_empty() {
            return;
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.push(fragment);
        }
    }

    /// Append only the line feeds of `text`.
    pub fn push_line_feeds_of(&mut self, text: &str) {
        let feeds = line_feeds_of(text);
        self.push(feeds);
    }

    pub fn begin_capture(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Close the innermost capture and return what it collected.
    pub fn end_capture(&mut self) -> String {
        if self.frames.len() < 2 {
            return String::new();
        }
        self.frames.pop().map(concat).unwrap_or_default()
    }

    pub fn capture_depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Concatenate every frame, innermost last.
    pub fn finish(self) -> String {
        self.frames.into_iter().flatten().collect()
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

fn concat(fragments: Vec<Cow<'static, str>>) -> String {
    fragments.into_iter().collect()
}
