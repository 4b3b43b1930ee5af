//! Script formats replaying `add_node`/`end` sequences.
//!
//! Two formats are understood:
//! - `commands`: one `node <title>` or `end` per line;
//! - `outline`: one title per line, nesting given by indentation
//!   (two spaces or one tab per level).
//!
//! In both, blank lines and lines starting with `#` are ignored.

use std::fmt;
use std::path::Path;

use regex::Regex;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a node with this title and descend into it
    Node(String),
    /// Close the current node
    End,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Node(title) => write!(f, "node {}", title),
            Command::End => write!(f, "end"),
        }
    }
}

/// A command together with the 1-based source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptFormat {
    #[default]
    Commands,
    Outline,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

struct ScriptParser {
    node_regex: Regex,
    end_regex: Regex,
}

impl ScriptParser {
    fn new() -> Self {
        Self {
            node_regex: Regex::new(r"^node(?:\s+(?P<title>.*))?$").unwrap(),
            end_regex: Regex::new(r"^end$").unwrap(),
        }
    }

    fn parse_commands(&self, input: &str) -> ApplicationResult<Vec<ScriptLine>> {
        let mut lines = Vec::new();
        for (line, text) in significant_lines(input) {
            let text = text.trim();
            let command = if let Some(caps) = self.node_regex.captures(text) {
                let title = caps.name("title").map_or("", |m| m.as_str().trim());
                if title.is_empty() {
                    return Err(ApplicationError::script(line, "node without a title"));
                }
                Command::Node(title.to_string())
            } else if self.end_regex.is_match(text) {
                Command::End
            } else {
                return Err(ApplicationError::script(
                    line,
                    format!("unknown command: {:?}", text),
                ));
            };
            lines.push(ScriptLine { line, command });
        }
        Ok(lines)
    }

    fn parse_outline(&self, input: &str) -> ApplicationResult<Vec<ScriptLine>> {
        let mut lines = Vec::new();
        let mut open = 0usize;
        for (line, text) in significant_lines(input) {
            let depth = indentation(text).ok_or_else(|| {
                ApplicationError::script(line, "indentation must be tabs or pairs of spaces")
            })?;
            if depth > open {
                return Err(ApplicationError::script(
                    line,
                    format!("indented {} levels below {} open nodes", depth, open),
                ));
            }
            for _ in depth..open {
                lines.push(ScriptLine {
                    line,
                    command: Command::End,
                });
            }
            lines.push(ScriptLine {
                line,
                command: Command::Node(text.trim().to_string()),
            });
            open = depth + 1;
        }
        Ok(lines)
    }
}

/// Non-blank, non-comment lines with their 1-based numbers.
fn significant_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(idx, text)| (idx + 1, text))
        .filter(|(_, text)| {
            let trimmed = text.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
}

/// Nesting level of an outline line, None for a dangling single space.
fn indentation(text: &str) -> Option<usize> {
    let mut depth = 0;
    let mut spaces = 0;
    for c in text.chars() {
        match c {
            '\t' if spaces == 0 => depth += 1,
            ' ' => spaces += 1,
            _ if c.is_whitespace() => return None,
            _ => break,
        }
    }
    (spaces % 2 == 0).then_some(depth + spaces / 2)
}

impl Script {
    pub fn parse(input: &str) -> ApplicationResult<Self> {
        Self::parse_as(input, ScriptFormat::Commands)
    }

    pub fn parse_outline(input: &str) -> ApplicationResult<Self> {
        Self::parse_as(input, ScriptFormat::Outline)
    }

    #[instrument(level = "debug", skip(input))]
    pub fn parse_as(input: &str, format: ScriptFormat) -> ApplicationResult<Self> {
        let parser = ScriptParser::new();
        let lines = match format {
            ScriptFormat::Commands => parser.parse_commands(input)?,
            ScriptFormat::Outline => parser.parse_outline(input)?,
        };
        debug!(commands = lines.len(), "script parsed");
        Ok(Self { lines })
    }

    /// Read and parse a script file.
    #[instrument(level = "debug")]
    pub fn load(path: &Path, format: ScriptFormat) -> ApplicationResult<Self> {
        let content = std::fs::read_to_string(path).with_path_context("read script", path)?;
        Self::parse_as(&content, format)
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of nodes the script creates.
    pub fn node_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l.command, Command::Node(_)))
            .count()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line.command)?;
        }
        Ok(())
    }
}
