//! Command line parsing.
//!
//! Turns a raw chat line into an [`Invocation`]: the lowercased command name,
//! lowercased argument tokens, and the case-preserved remainder for commands
//! that relay text verbatim (e.g. `say`). Parsing is pure — no I/O, no state.

/// Identity of the message sender as supplied by the host IRC layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub nick: String,
    pub ident: String,
    pub hostmask: String,
}

impl Sender {
    pub fn new(
        nick: impl Into<String>,
        ident: impl Into<String>,
        hostmask: impl Into<String>,
    ) -> Self {
        Self {
            nick: nick.into(),
            ident: ident.into(),
            hostmask: hostmask.into(),
        }
    }
}

/// A parsed command invocation, immutable after construction.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Command name, lowercased, prefix stripped.
    pub name: String,
    /// Argument tokens, lowercased.
    pub args: Vec<String>,
    /// Everything after the command token, original casing preserved.
    pub rest: String,
    /// The raw line as received.
    pub raw: String,
    /// Who sent the line.
    pub sender: Sender,
    /// Channel the line arrived on. `None` for private messages.
    pub channel: Option<String>,
}

impl Invocation {
    /// Parse a raw line into an invocation.
    ///
    /// Returns `None` when the line is not a command: empty input, wrong
    /// prefix character, or an empty command name after prefix stripping.
    pub fn from_message(
        raw: &str,
        prefix: char,
        sender: Sender,
        channel: Option<&str>,
    ) -> Option<Self> {
        let parsed = parse(raw, prefix)?;
        Some(Self {
            name: parsed.name,
            args: parsed.args,
            rest: parsed.rest,
            raw: raw.to_string(),
            sender,
            channel: channel.map(|c| c.to_string()),
        })
    }
}

/// Tokens extracted from a raw line, before sender context is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub name: String,
    pub args: Vec<String>,
    pub rest: String,
}

/// Split a raw line into command name, arguments, and verbatim remainder.
pub fn parse(raw: &str, prefix: char) -> Option<ParsedLine> {
    let stripped = raw.strip_prefix(prefix)?;
    // "/ join" is not a command: the name must follow the prefix directly.
    if stripped.is_empty() || stripped.starts_with(char::is_whitespace) {
        return None;
    }

    let mut tokens = stripped.split_whitespace();
    let name_token = tokens.next()?;
    let name = name_token.to_lowercase();
    let args: Vec<String> = tokens.map(|t| t.to_lowercase()).collect();

    // Remainder after the command token, minus the single separator space.
    let after = &stripped[name_token.len()..];
    let rest = after.strip_prefix(' ').unwrap_or(after).to_string();

    Some(ParsedLine { name, args, rest })
}
