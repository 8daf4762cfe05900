//! Readline wrapper with command, regime and field completion.

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Context, Editor, Helper};

/// Token sequences offered for completion
pub const COMMAND_PATTERNS: &[&[&str]] = &[
    &["regime", "intraday"],
    &["regime", "delivery"],
    &["intraday"],
    &["delivery"],
    &["set", "buy"],
    &["set", "sell"],
    &["set", "qty"],
    &["buy"],
    &["sell"],
    &["qty"],
    &["calc"],
    &["show"],
    &["reset"],
    &["back"],
    &["regimes"],
    &["help"],
    &["exit"],
    &["quit"],
];

/// Complete the token under the cursor against `patterns`.
///
/// Returns the byte offset where the replacement starts and the candidate
/// replacements (each followed by a space). A leading `/` on the first token
/// is preserved.
pub fn complete_line(patterns: &[&[&str]], line: &str, pos: usize) -> (usize, Vec<String>) {
    let before = &line[..pos];
    let mut tokens: Vec<&str> = before.split_whitespace().collect();

    // Trailing space starts a new, empty token
    if before.is_empty() || before.ends_with(char::is_whitespace) {
        tokens.push("");
    }

    let current = tokens.last().copied().unwrap_or("");
    let start = pos - current.len();
    let slash = tokens.first().is_some_and(|t| t.starts_with('/'));

    let typed: Vec<String> = tokens[..tokens.len() - 1]
        .iter()
        .map(|t| t.trim_start_matches('/').to_lowercase())
        .collect();
    let prefix = current.trim_start_matches('/').to_lowercase();
    let index = tokens.len() - 1;

    let mut candidates: Vec<String> = patterns
        .iter()
        .filter(|pattern| pattern.len() > index)
        .filter(|pattern| {
            typed
                .iter()
                .zip(pattern.iter())
                .all(|(t, p)| p.eq_ignore_ascii_case(t))
        })
        .map(|pattern| pattern[index])
        .filter(|candidate| candidate.starts_with(prefix.as_str()))
        .map(|candidate| {
            if index == 0 && slash {
                format!("/{} ", candidate)
            } else {
                format!("{} ", candidate)
            }
        })
        .collect();

    candidates.sort();
    candidates.dedup();
    (start, candidates)
}

pub struct SessionHelper {
    patterns: &'static [&'static [&'static str]],
    hinter: HistoryHinter,
}

impl Helper for SessionHelper {}
impl Validator for SessionHelper {}
impl Highlighter for SessionHelper {}

impl Hinter for SessionHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Completer for SessionHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = complete_line(self.patterns, line, pos);
        let pairs = candidates
            .into_iter()
            .map(|replacement| Pair {
                display: replacement.clone(),
                replacement,
            })
            .collect();
        Ok((start, pairs))
    }
}

/// Thin wrapper over `rustyline::Editor` with in-memory history only.
pub struct Readline {
    editor: Editor<SessionHelper, DefaultHistory>,
}

impl Readline {
    pub fn new() -> anyhow::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(SessionHelper {
            patterns: COMMAND_PATTERNS,
            hinter: HistoryHinter::default(),
        }));
        Ok(Self { editor })
    }

    pub fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        let line = self.editor.readline(prompt)?;
        if !line.trim().is_empty() {
            let _ = self.editor.add_history_entry(line.as_str());
        }
        Ok(line)
    }
}
