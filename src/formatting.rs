//! Terminal styling: color and emoji modes with environment detection,
//! and the formatter used by the terminal renderers.

use std::io::IsTerminal;

use colored::Colorize;

use crate::rating::RiskRating;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: EmojiMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            emoji: EmojiMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, emoji: EmojiMode) -> Self {
        Self { color, emoji }
    }

    /// No styling at all, regardless of environment.
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            emoji: EmojiMode::Never,
        }
    }

    /// Resolve modes from the conventional environment variables.
    /// `NO_COLOR`, `CLICOLOR=0` and `TERM=dumb` disable color;
    /// `CLICOLOR_FORCE` (set to anything but `0`) forces it on.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if std::env::var_os("NO_COLOR").is_some() {
            config.color = ColorMode::Never;
        }
        if let Ok(term) = std::env::var("TERM") {
            if term == "dumb" {
                config.color = ColorMode::Never;
                config.emoji = EmojiMode::Never;
            }
        }
        if let Ok(clicolor) = std::env::var("CLICOLOR") {
            if clicolor == "0" {
                config.color = ColorMode::Never;
            }
        }
        if let Ok(force) = std::env::var("CLICOLOR_FORCE") {
            if force != "0" {
                config.color = ColorMode::Always;
            }
        }
        config
    }

    pub fn should_use_color(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub fn should_use_emoji(&self) -> bool {
        match self.emoji {
            EmojiMode::Always => true,
            EmojiMode::Never => false,
            EmojiMode::Auto => detect_emoji_support(),
        }
    }
}

fn detect_emoji_support() -> bool {
    std::env::var("LANG")
        .or_else(|_| std::env::var("LC_ALL"))
        .map(|value| value.to_uppercase().contains("UTF"))
        .unwrap_or(false)
}

/// Styling hooks used by the terminal renderers.
pub trait OutputFormatter {
    /// Section titles.
    fn heading(&self, text: &str) -> String;
    /// Field labels in front of values.
    fn field(&self, text: &str) -> String;
    /// A rating label in its severity color; `None` renders "Not Rated".
    fn rating(&self, rating: Option<RiskRating>) -> String;
    fn good(&self, text: &str) -> String;
    fn warn(&self, text: &str) -> String;
    fn bad(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
}

/// ANSI-styled formatter backed by the `colored` crate.
pub struct ColoredFormatter {
    config: FormattingConfig,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        // Keep the colored crate's global switch in sync so stray
        // styling from other call sites obeys the same decision.
        colored::control::set_override(config.should_use_color());
        Self { config }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn heading(&self, text: &str) -> String {
        if self.config.should_use_color() {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn field(&self, text: &str) -> String {
        if self.config.should_use_color() {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn rating(&self, rating: Option<RiskRating>) -> String {
        let Some(rating) = rating else {
            return self.dim("Not Rated");
        };
        if !self.config.should_use_color() {
            return rating.label().to_string();
        }
        match rating {
            RiskRating::Sustainable => rating.label().green().to_string(),
            RiskRating::Moderate => rating.label().yellow().to_string(),
            RiskRating::Severe => rating.label().red().to_string(),
            RiskRating::Critical => rating.label().bright_red().bold().to_string(),
        }
    }

    fn good(&self, text: &str) -> String {
        if self.config.should_use_color() {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn warn(&self, text: &str) -> String {
        if self.config.should_use_color() {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn bad(&self, text: &str) -> String {
        if self.config.should_use_color() {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.config.should_use_color() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Formatter that passes text through untouched.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn heading(&self, text: &str) -> String {
        text.to_string()
    }

    fn field(&self, text: &str) -> String {
        text.to_string()
    }

    fn rating(&self, rating: Option<RiskRating>) -> String {
        rating.map_or_else(|| "Not Rated".to_string(), |r| r.label().to_string())
    }

    fn good(&self, text: &str) -> String {
        text.to_string()
    }

    fn warn(&self, text: &str) -> String {
        text.to_string()
    }

    fn bad(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Pick the formatter for a config; plain when color is off.
pub fn formatter_for(config: FormattingConfig) -> Box<dyn OutputFormatter> {
    if config.should_use_color() {
        Box::new(ColoredFormatter::new(config))
    } else {
        Box::new(PlainFormatter)
    }
}

/// Badge glyph for a rating, matching the portal's severity dots.
pub fn rating_emoji(rating: Option<RiskRating>) -> &'static str {
    match rating {
        Some(RiskRating::Critical) => "\u{1f534}",
        Some(RiskRating::Severe) => "\u{1f7e0}",
        Some(RiskRating::Moderate) => "\u{1f7e1}",
        Some(RiskRating::Sustainable) => "\u{1f7e2}",
        None => "\u{26aa}",
    }
}

/// Choose the emoji or its ASCII fallback based on config.
pub fn emoji_or_fallback<'a>(emoji: &'a str, fallback: &'a str, config: FormattingConfig) -> &'a str {
    if config.should_use_emoji() {
        emoji
    } else {
        fallback
    }
}
