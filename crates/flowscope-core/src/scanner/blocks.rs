//! Delimiter-balanced block extraction
//!
//! Given a line array and a start index, find the line on which the construct
//! opened there is closed. The scanner is string and comment aware, so a `{`
//! inside `"foo{bar"`, a raw string or a comment never moves the counter.

/// Delimiter pair a block is balanced on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `(` ... `)` for import, const and var groups
    Paren,
    /// `{` ... `}` for struct, interface and function bodies
    Brace,
}

impl Delimiter {
    const fn pair(self) -> (char, char) {
        match self {
            Self::Paren => ('(', ')'),
            Self::Brace => ('{', '}'),
        }
    }
}

/// A multi-line construct, as inclusive 0-based line indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
}

impl Block {
    /// Number of lines spanned
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Verbatim text of the block
    #[must_use]
    pub fn text(&self, lines: &[&str]) -> String {
        lines
            .get(self.start..=self.end.min(lines.len().saturating_sub(1)))
            .map(|slice| slice.join("\n"))
            .unwrap_or_default()
    }

    /// Lines strictly between the opening and closing lines
    #[must_use]
    pub fn inner<'a>(&self, lines: &'a [&'a str]) -> &'a [&'a str] {
        if self.end <= self.start + 1 {
            return &[];
        }
        lines.get(self.start + 1..self.end).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Code,
    Quoted { escaped: bool },
    Rune { escaped: bool },
    Raw,
    BlockComment,
}

/// Character scanner counting one delimiter pair outside literals and comments
struct DelimiterScanner {
    open: char,
    close: char,
    depth: usize,
    paren_depth: usize,
    seen_open: bool,
    state: LexState,
}

impl DelimiterScanner {
    fn new(delimiter: Delimiter) -> Self {
        let (open, close) = delimiter.pair();
        Self {
            open,
            close,
            depth: 0,
            paren_depth: 0,
            seen_open: false,
            state: LexState::Code,
        }
    }

    /// Feed one line; returns true once the block has been closed
    fn feed(&mut self, line: &str) -> bool {
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            match self.state {
                LexState::Code => match c {
                    '"' => self.state = LexState::Quoted { escaped: false },
                    '\'' => self.state = LexState::Rune { escaped: false },
                    '`' => self.state = LexState::Raw,
                    '/' if chars.peek() == Some(&'/') => break,
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        self.state = LexState::BlockComment;
                    }
                    _ => {
                        if self.open != '(' {
                            match c {
                                '(' => self.paren_depth += 1,
                                ')' => self.paren_depth = self.paren_depth.saturating_sub(1),
                                _ => {}
                            }
                        }
                        if c == self.open {
                            self.depth += 1;
                            self.seen_open = true;
                        } else if c == self.close && self.depth > 0 {
                            self.depth -= 1;
                            if self.depth == 0 {
                                return true;
                            }
                        }
                    }
                },
                LexState::Quoted { escaped } => {
                    self.state = match (escaped, c) {
                        (true, _) => LexState::Quoted { escaped: false },
                        (false, '\\') => LexState::Quoted { escaped: true },
                        (false, '"') => LexState::Code,
                        _ => LexState::Quoted { escaped: false },
                    }
                }
                LexState::Rune { escaped } => {
                    self.state = match (escaped, c) {
                        (true, _) => LexState::Rune { escaped: false },
                        (false, '\\') => LexState::Rune { escaped: true },
                        (false, '\'') => LexState::Code,
                        _ => LexState::Rune { escaped: false },
                    }
                }
                LexState::Raw => {
                    if c == '`' {
                        self.state = LexState::Code;
                    }
                }
                LexState::BlockComment => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        self.state = LexState::Code;
                    }
                }
            }
        }

        // Interpreted strings and runes cannot span lines
        if matches!(self.state, LexState::Quoted { .. } | LexState::Rune { .. }) {
            self.state = LexState::Code;
        }
        false
    }

    /// A statement with balanced parens that never opened a block ends on its line
    fn ended_without_block(&self, line: &str) -> bool {
        !self.seen_open
            && self.paren_depth == 0
            && self.state == LexState::Code
            && !line.trim_end().ends_with(',')
    }
}

/// Find the block that starts on `start` and is balanced on `delimiter`.
///
/// Nested pairs are counted. When the construct never closes, the block runs
/// to the last line. A brace construct whose header finishes without opening
/// a brace (a body-less function) is a single-line block.
#[must_use]
pub fn extract_block(lines: &[&str], start: usize, delimiter: Delimiter) -> Block {
    let last = lines.len().saturating_sub(1);
    if start >= lines.len() {
        return Block { start, end: start };
    }

    let mut scanner = DelimiterScanner::new(delimiter);
    for (idx, line) in lines.iter().enumerate().skip(start) {
        if scanner.feed(line) {
            return Block { start, end: idx };
        }
        if delimiter == Delimiter::Brace && scanner.ended_without_block(line) {
            return Block { start, end: idx };
        }
        if delimiter == Delimiter::Paren && !scanner.seen_open {
            return Block { start, end: idx };
        }
    }

    Block { start, end: last }
}
