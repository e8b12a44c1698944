/// One physical line of the input, with its original terminator kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub text: String,
}

impl Line {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Line content without the trailing `\n` / `\r\n`.
    pub fn content(&self) -> &str {
        let t = self.text.strip_suffix('\n').unwrap_or(&self.text);
        t.strip_suffix('\r').unwrap_or(t)
    }
}

/// Ordered, immutable sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Split text into lines without losing a single byte.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .split_inclusive('\n')
            .enumerate()
            .map(|(i, l)| Line::new(i, l))
            .collect();
        Self { lines }
    }

    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Concatenate the lines back into text.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.text.len()).sum());
        for line in &self.lines {
            out.push_str(&line.text);
        }
        out
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Append-only sink the pruner writes kept lines into.
#[derive(Debug, Default)]
pub struct LineSink {
    lines: Vec<Line>,
}

impl LineSink {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            lines: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, line: &Line) {
        self.lines.push(line.clone());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_document(self) -> Document {
        Document::from_lines(self.lines)
    }
}
