//! Localized UI Strings
//!
//! Every user-facing string the coordinator and surfaces emit, per locale.
//! Japanese is the default: the assistant is a Japanese conversation partner.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported UI locales
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// 日本語
    #[default]
    #[serde(rename = "ja")]
    Japanese,
    /// English
    #[serde(rename = "en")]
    English,
}

impl Locale {
    /// String table for this locale
    #[must_use]
    pub fn strings(self) -> &'static Strings {
        match self {
            Self::Japanese => &JAPANESE,
            Self::English => &ENGLISH,
        }
    }

    /// Locale code (`ja`, `en`)
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Japanese => "ja",
            Self::English => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Unknown locale code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown locale '{0}' (expected 'ja' or 'en')")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ja" | "jp" | "japanese" => Ok(Self::Japanese),
            "en" | "english" => Ok(Self::English),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// One locale's string table
#[derive(Debug)]
pub struct Strings {
    /// Scripted thinking phrases, streamed in order while a reply is pending
    pub thinking_phrases: &'static [&'static str],
    /// Trace entry after the API returned an error
    pub api_error_entry: &'static str,
    /// Trace entry after a reply was delivered
    pub reply_delivered_entry: &'static str,
    /// Assistant message shown when the transport faulted
    pub network_error_message: &'static str,
    /// Trace entry shown when the transport faulted
    pub network_error_entry: &'static str,
    /// Marker prefixed to assistant-facing error text
    pub error_marker: &'static str,
    /// Input box placeholder
    pub input_placeholder: &'static str,
    /// Prompt shown while the conversation is empty
    pub empty_conversation: &'static str,
    /// Prompt shown while the thinking panel is empty
    pub empty_thinking: &'static str,
    /// Thinking panel turn label prefix
    pub turn_label: &'static str,
    /// Avatar label for user messages
    pub user_label: &'static str,
    /// Avatar label for assistant messages
    pub assistant_label: &'static str,
}

impl Strings {
    /// Assistant-facing text for an application error
    #[must_use]
    pub fn error_message(&self, error: &str) -> String {
        format!("{}{}", self.error_marker, error)
    }
}

static JAPANESE: Strings = Strings {
    thinking_phrases: &[
        "考え中。。。",
        "生成中。。。",
        "方法を探し中。。。",
        "準備する中。。。",
        "理解する中。。。",
        "確認する中。。。",
    ],
    api_error_entry: "APIからエラーが来ました.",
    reply_delivered_entry: "返信が配信されました.",
    network_error_message: "! ネットワークエラー、サーバーが生きていきますか？",
    network_error_entry: "ネットワークエラーがありました.",
    error_marker: "! ",
    input_placeholder: "メッセージを入力してください。。。",
    empty_conversation: "会話を始めましょう",
    empty_thinking: "思考ログはここに表示されます",
    turn_label: "turn",
    user_label: "U",
    assistant_label: "AI",
};

static ENGLISH: Strings = Strings {
    thinking_phrases: &[
        "Thinking...",
        "Generating...",
        "Looking for an approach...",
        "Preparing...",
        "Understanding...",
        "Double-checking...",
    ],
    api_error_entry: "Error received from API.",
    reply_delivered_entry: "Reply delivered.",
    network_error_message: "! Network error, is the server running?",
    network_error_entry: "Network error.",
    error_marker: "! ",
    input_placeholder: "Type a message...",
    empty_conversation: "Start a conversation",
    empty_thinking: "The thinking trace shows up here",
    turn_label: "turn",
    user_label: "U",
    assistant_label: "AI",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!("ja".parse::<Locale>(), Ok(Locale::Japanese));
        assert_eq!(" EN ".parse::<Locale>(), Ok(Locale::English));
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(UnknownLocale("fr".to_string()))
        );
    }

    #[test]
    fn test_error_message_is_marker_prefixed() {
        let strings = Locale::English.strings();
        assert_eq!(strings.error_message("rate limited"), "! rate limited");
        assert_eq!(
            Locale::Japanese.strings().error_message("rate limited"),
            "! rate limited"
        );
    }

    #[test]
    fn test_every_locale_has_phrases() {
        for locale in [Locale::Japanese, Locale::English] {
            let strings = locale.strings();
            assert_eq!(strings.thinking_phrases.len(), 6);
            assert!(strings.thinking_phrases.iter().all(|p| !p.is_empty()));
        }
    }

    #[test]
    fn test_locale_serde_codes() {
        #[derive(Deserialize)]
        struct Wrapper {
            locale: Locale,
        }
        let w: Wrapper = toml::from_str("locale = \"en\"").unwrap();
        assert_eq!(w.locale, Locale::English);
    }
}
