//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::application::{Outcome, Session};
use crate::domain::{NodeFactory, NodeHandle, OutlineOptions, TreeNodeConvert};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    print!("{}", msg);
}

/// Print prompt without newline (cyan)
pub fn prompt(msg: &(impl std::fmt::Display + ?Sized)) {
    use std::io::Write;
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}

/// Progress line followed by the outline of the revealed tree.
pub fn frame<F: NodeFactory>(session: &Session<F>, options: &OutlineOptions) {
    header(&session.progress());
    info(&session.tree().to_tree_string(options));
}

/// Human-readable description of an action's effect.
pub fn describe_outcome<F: NodeFactory>(session: &Session<F>, outcome: Outcome) -> String {
    let title = |id: usize| {
        session
            .tree()
            .node(id)
            .map_or_else(|| format!("#{}", id), |n| format!("{:?}", n.title()))
    };
    match outcome {
        Outcome::Revealed(id) => format!("revealed {}", title(id)),
        Outcome::Hidden(id) => format!("hid {}", title(id)),
        Outcome::Unchanged => "nothing left to step".to_string(),
        Outcome::AllShown => "all nodes shown".to_string(),
        Outcome::AllHidden => "all nodes hidden".to_string(),
        Outcome::Destroyed(count) => format!("released {} nodes", count),
        Outcome::Quit => "bye".to_string(),
    }
}
