//! Syntax-highlighted preview rendering for sprig.
//!
//! Turns raw file bytes into ANSI SGR markup in three steps:
//! - [detect_language]: file extension to a language tag
//! - [Tokenizer]: content + tag to a lazy stream of (fragment, category) tokens
//! - [Palette]: category + style name to an optional foreground color
//!
//! [TokenRenderer] drives the pipeline and never fails: any tokenizer or palette error makes it
//! return the decoded content as is.

use crate::core::error::RenderError;

use phf::phf_map;
use ratatui::style::Color;
use syntect::highlighting::{Highlighter, ThemeSet};
use syntect::parsing::{ParseState, ScopeStack, SyntaxSet};
use syntect::util::LinesWithEndings;

use std::collections::VecDeque;
use std::path::Path;

pub const DEFAULT_STYLE: &str = "base16-ocean.dark";

/// Closes every color scope opened by [sgr_foreground].
pub const RESET_FG: &str = "\x1b[39m";

/// Lowercased file extension to language tag.
static LANGUAGE_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "go" => "go",
    "json" => "json",
    "yaml" => "yaml",
    "yml" => "yaml",
    "md" => "markdown",
    "sh" => "bash",
    "toml" => "toml",
    "js" => "javascript",
    "ts" => "typescript",
    "py" => "python",
    "rs" => "rust",
    "c" => "c",
    "h" => "c",
    "cpp" => "c++",
    "hpp" => "c++",
    "cc" => "c++",
    "java" => "java",
    "rb" => "ruby",
    "html" => "html",
    "htm" => "html",
    "css" => "css",
    "lua" => "lua",
    "xml" => "xml",
    "sql" => "sql",
};

/// Returns the language tag for a path, or `""` when the extension is unknown.
pub fn detect_language(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| LANGUAGE_MAP.get(ext.to_ascii_lowercase().as_str()).copied())
        .unwrap_or("")
}

/// Category of a token: the full scope stack at that point of the parse.
pub type TokenCategory = ScopeStack;

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub category: TokenCategory,
}

pub type TokenStream<'a> = Box<dyn Iterator<Item = Result<Token<'a>, RenderError>> + 'a>;

/// Splits content into categorized fragments.
///
/// The stream is finite and consumed once. Concatenating all fragments yields the content.
pub trait Tokenizer {
    fn tokenize<'a>(&'a self, content: &'a str, hint: &str) -> Result<TokenStream<'a>, RenderError>;
}

/// Maps token categories to colors for a named style.
pub trait Palette {
    fn has_style(&self, style: &str) -> bool;

    /// `None` means the category has no color of its own in this style.
    fn color_for(&self, category: &TokenCategory, style: &str)
    -> Result<Option<Color>, RenderError>;
}

/// [Tokenizer] over syntect's bundled grammars.
pub struct SyntectTokenizer {
    syntaxes: SyntaxSet,
}

impl SyntectTokenizer {
    pub fn new() -> Self {
        SyntectTokenizer {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }
}

impl Default for SyntectTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for SyntectTokenizer {
    fn tokenize<'a>(&'a self, content: &'a str, hint: &str) -> Result<TokenStream<'a>, RenderError> {
        let set = &self.syntaxes;
        let first_line = content.lines().next().unwrap_or("");
        let syntax = Some(hint)
            .filter(|h| !h.is_empty())
            .and_then(|h| set.find_syntax_by_token(h))
            .or_else(|| set.find_syntax_by_first_line(first_line))
            .unwrap_or_else(|| set.find_syntax_plain_text());

        let plain = syntax.name == set.find_syntax_plain_text().name;
        tracing::trace!(hint, syntax = %syntax.name, "tokenizing");

        Ok(Box::new(SyntectTokens {
            set,
            state: (!plain).then(|| ParseState::new(syntax)),
            stack: ScopeStack::new(),
            lines: LinesWithEndings::from(content),
            pending: VecDeque::new(),
            done: false,
        }))
    }
}

/// Lazy token stream, one line parsed per refill.
struct SyntectTokens<'a> {
    set: &'a SyntaxSet,
    /// None for plain text: lines pass through with an empty category.
    state: Option<ParseState>,
    stack: ScopeStack,
    lines: LinesWithEndings<'a>,
    pending: VecDeque<Token<'a>>,
    done: bool,
}

impl<'a> SyntectTokens<'a> {
    fn parse_next_line(&mut self, line: &'a str) -> Result<(), RenderError> {
        let Some(state) = self.state.as_mut() else {
            self.pending.push_back(Token {
                text: line,
                category: ScopeStack::new(),
            });
            return Ok(());
        };

        let ops = state
            .parse_line(line, self.set)
            .map_err(|e| RenderError::Tokenize(e.to_string()))?;

        let mut offset = 0;
        for (op_offset, op) in ops {
            let op_offset = op_offset.min(line.len());
            if op_offset > offset {
                self.pending.push_back(Token {
                    text: &line[offset..op_offset],
                    category: self.stack.clone(),
                });
                offset = op_offset;
            }
            self.stack
                .apply(&op)
                .map_err(|e| RenderError::Scope(format!("{e:?}")))?;
        }
        if offset < line.len() {
            self.pending.push_back(Token {
                text: &line[offset..],
                category: self.stack.clone(),
            });
        }
        Ok(())
    }
}

impl<'a> Iterator for SyntectTokens<'a> {
    type Item = Result<Token<'a>, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            let Some(line) = self.lines.next() else {
                self.done = true;
                return None;
            };
            if let Err(e) = self.parse_next_line(line) {
                self.done = true;
                self.pending.clear();
                return Some(Err(e));
            }
        }
    }
}

/// [Palette] over syntect's bundled themes.
///
/// A scope stack that resolves to the theme's default foreground has no color.
pub struct ThemePalette {
    themes: ThemeSet,
}

impl ThemePalette {
    pub fn new() -> Self {
        ThemePalette {
            themes: ThemeSet::load_defaults(),
        }
    }

    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.themes.themes.keys().map(String::as_str)
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette for ThemePalette {
    fn has_style(&self, style: &str) -> bool {
        self.themes.themes.contains_key(style)
    }

    fn color_for(
        &self,
        category: &TokenCategory,
        style: &str,
    ) -> Result<Option<Color>, RenderError> {
        let theme = self
            .themes
            .themes
            .get(style)
            .ok_or_else(|| RenderError::UnknownStyle(style.to_string()))?;

        let scopes = category.as_slice();
        if scopes.is_empty() {
            return Ok(None);
        }

        let highlighter = Highlighter::new(theme);
        let fg = highlighter.style_for_stack(scopes).foreground;
        if fg == highlighter.get_default().foreground {
            return Ok(None);
        }
        Ok(Some(Color::Rgb(fg.r, fg.g, fg.b)))
    }
}

/// SGR sequence setting the foreground to `color`. `None` for [Color::Reset].
pub fn sgr_foreground(color: Color) -> Option<String> {
    let code = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => return Some(format!("\x1b[38;2;{r};{g};{b}m")),
        Color::Indexed(n) => return Some(format!("\x1b[38;5;{n}m")),
        Color::Black => 30,
        Color::Red => 31,
        Color::Green => 32,
        Color::Yellow => 33,
        Color::Blue => 34,
        Color::Magenta => 35,
        Color::Cyan => 36,
        Color::Gray => 37,
        Color::DarkGray => 90,
        Color::LightRed => 91,
        Color::LightGreen => 92,
        Color::LightYellow => 93,
        Color::LightBlue => 94,
        Color::LightMagenta => 95,
        Color::LightCyan => 96,
        Color::White => 97,
    };
    Some(format!("\x1b[{code}m"))
}

/// Wraps `text` in a color scope, one scope per line.
pub fn paint(text: &str, color: Color) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    match sgr_foreground(color) {
        Some(sgr) => push_colored(&mut out, text, &sgr),
        None => push_literal(&mut out, text),
    }
    out
}

fn push_literal(out: &mut String, text: &str) {
    if text.contains('\x1b') {
        out.extend(text.chars().map(|c| if c == '\x1b' { '\u{241b}' } else { c }));
    } else {
        out.push_str(text);
    }
}

/// `text` with its escape bytes made visible, as the preview shows uncolored content.
fn literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_literal(&mut out, text);
    out
}

fn push_colored(out: &mut String, text: &str, sgr: &str) {
    for piece in text.split_inclusive('\n') {
        let body = piece
            .strip_suffix("\r\n")
            .or_else(|| piece.strip_suffix('\n'))
            .unwrap_or(piece);
        if !body.is_empty() {
            out.push_str(sgr);
            push_literal(out, body);
            out.push_str(RESET_FG);
        }
        out.push_str(&piece[body.len()..]);
    }
}

/// Drives tokenization and color mapping for the preview pane.
pub struct TokenRenderer {
    tokenizer: Box<dyn Tokenizer>,
    palette: Box<dyn Palette>,
    style: String,
}

impl TokenRenderer {
    /// Builds the syntect-backed renderer. An unknown style falls back to [DEFAULT_STYLE].
    pub fn new(style: &str) -> Self {
        let tokenizer = Box::new(SyntectTokenizer::new());
        let palette = Box::new(ThemePalette::new());
        if !palette.has_style(style) {
            tracing::warn!(
                style,
                available = ?palette.style_names().collect::<Vec<_>>(),
                "unknown syntax theme, using {DEFAULT_STYLE}"
            );
            return Self::with_parts(tokenizer, palette, DEFAULT_STYLE);
        }
        Self::with_parts(tokenizer, palette, style)
    }

    pub fn with_parts(
        tokenizer: Box<dyn Tokenizer>,
        palette: Box<dyn Palette>,
        style: &str,
    ) -> Self {
        TokenRenderer {
            tokenizer,
            palette,
            style: style.to_string(),
        }
    }

    #[inline]
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Renders file bytes to markup. Non-empty content never renders to an empty string.
    pub fn render(&self, content: &[u8], path: &Path) -> String {
        if content.is_empty() {
            return String::new();
        }
        let text = String::from_utf8_lossy(content);
        let hint = detect_language(path);

        match self.try_render(&text, hint) {
            Ok(markup) if !markup.is_empty() => markup,
            Ok(_) => literal(&text),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "highlighting skipped");
                literal(&text)
            }
        }
    }

    fn try_render(&self, text: &str, hint: &str) -> Result<String, RenderError> {
        let mut out = String::with_capacity(text.len() * 2);
        for token in self.tokenizer.tokenize(text, hint)? {
            let token = token?;
            match self
                .palette
                .color_for(&token.category, &self.style)?
                .and_then(sgr_foreground)
            {
                Some(sgr) => push_colored(&mut out, token.text, &sgr),
                None => push_literal(&mut out, token.text),
            }
        }
        Ok(out)
    }
}
