//! The module contains the user-facing message templates.
//!
//! Templates are keyed by name and live in `messages.toml`; the copy shipped
//! with the binary fills in for keys the file on disk leaves out. Rendering
//! substitutes `{token}` pairs in one deterministic pass per token, then
//! translates `&`-color codes to ANSI escapes.

use std::collections::HashMap;

use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::Result;
use crate::settings::Settings;

const DEFAULT_MESSAGES: &str = include_str!("../messages.toml");

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
struct Templates(HashMap<String, String>);

#[derive(Debug, Clone)]
pub struct Messages {
    templates: HashMap<String, String>,
    prefix: String,
    currency: String,
    symbol: String,
}

impl Messages {
    /// Load templates from `path`, falling back to the built-in copy for
    /// keys the file does not override.
    pub fn load(path: &str, settings: &Settings) -> Result<Self> {
        let templates: Templates = Config::builder()
            .add_source(File::from_str(DEFAULT_MESSAGES, FileFormat::Toml))
            .add_source(File::with_name(path).required(false))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            templates: templates.0,
            prefix: settings.prefix.clone(),
            currency: settings.currency.name.clone(),
            symbol: settings.currency.symbol.clone(),
        })
    }

    /// Render template `key`, substituting the built-in `prefix`, `currency`
    /// and `symbol` tokens before the pairs in `tokens`.
    ///
    /// A key with no template renders as a visible `missing message` marker
    /// instead of failing the whole command.
    pub fn render(&self, key: &str, tokens: &[(&str, &str)]) -> String {
        let Some(template) = self.templates.get(key) else {
            return format!("missing message: {key}");
        };

        let mut out = template.clone();
        out = out.replace("{prefix}", &self.prefix);
        out = out.replace("{currency}", &self.currency);
        out = out.replace("{symbol}", &self.symbol);
        for (token, value) in tokens {
            out = out.replace(&format!("{{{token}}}"), value);
        }

        colorize(&out)
    }
}

/// Translate `&`-prefixed color codes to ANSI escapes.
///
/// Unknown codes pass through untouched, as does a trailing lone `&`.
pub fn colorize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '&' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied().and_then(ansi_for) {
            Some(escape) => {
                out.push_str(escape);
                chars.next();
            }
            None => out.push(ch),
        }
    }

    out
}

fn ansi_for(code: char) -> Option<&'static str> {
    Some(match code {
        '0' => "\x1b[30m",
        '1' => "\x1b[34m",
        '2' => "\x1b[32m",
        '3' => "\x1b[36m",
        '4' => "\x1b[31m",
        '5' => "\x1b[35m",
        '6' => "\x1b[33m",
        '7' => "\x1b[37m",
        '8' => "\x1b[90m",
        '9' => "\x1b[94m",
        'a' => "\x1b[92m",
        'b' => "\x1b[96m",
        'c' => "\x1b[91m",
        'd' => "\x1b[95m",
        'e' => "\x1b[93m",
        'f' => "\x1b[97m",
        'l' => "\x1b[1m",
        'r' => "\x1b[0m",
        _ => return None,
    })
}
