use std::fmt;

// -----------------------------------------------------------------------------
// KeyPath

/// The location of the node currently being converted, for diagnostics.
///
/// Renders as `$.order.parts[2].id`.
#[derive(Default)]
pub(crate) struct KeyPath {
    segments: Vec<Segment>,
}

enum Segment {
    Key(String),
    Index(usize),
}

impl KeyPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: &str) {
        self.segments.push(Segment::Key(key.to_owned()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests
