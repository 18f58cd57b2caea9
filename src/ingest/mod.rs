// Modality normalizer — adapts heterogeneous inputs to the plain-text
// contract the cascade expects.
//
// Extraction itself (OCR, speech-to-text, transcoding) happens upstream;
// by the time text arrives here it is already a UTF-8 string, and the
// modality tag is provenance only. Social posts get extra cleanup: URLs
// and @-mention tokens are noise for classification, but hashtags stay
// in the text because they may be the signal of interest. Hashtags and
// mentions are also extracted as side metadata for display/aggregation;
// they never affect classification.

use std::str::FromStr;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Where a piece of text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Text,
    Image,
    Audio,
    Video,
    SocialPost,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Audio => "audio",
            Modality::Video => "video",
            Modality::SocialPost => "social_post",
        }
    }
}

impl FromStr for Modality {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Modality::Text),
            "image" => Ok(Modality::Image),
            "audio" => Ok(Modality::Audio),
            "video" => Ok(Modality::Video),
            "social-post" | "social_post" => Ok(Modality::SocialPost),
            other => anyhow::bail!(
                "Unknown modality '{other}' (expected text, image, audio, video, or social-post)"
            ),
        }
    }
}

/// Text ready for the cascade, plus display-only social metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    pub text: String,
    pub modality: Modality,
    /// Hashtags found in the raw text, lowercased, without '#'.
    pub hashtags: Vec<String>,
    /// @-mentions found in the raw text, lowercased, without '@'.
    pub mentions: Vec<String>,
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").unwrap())
}

fn mention_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@\w+").unwrap())
}

// Hashtag bodies are not \w: tags in Devanagari or Bengali must survive,
// and regex-lite's \w is ASCII-only.
fn hashtag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#([^\s#@]+)").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Normalize one raw input for classification.
pub fn normalize(raw: &str, modality: Modality) -> NormalizedInput {
    let (hashtags, mentions, cleaned) = match modality {
        Modality::SocialPost => {
            // Metadata comes from the raw text, before any stripping
            let hashtags = extract_hashtags(raw);
            let mentions = extract_mentions(raw);
            let stripped = url_re().replace_all(raw, " ");
            let stripped = mention_re().replace_all(&stripped, " ");
            (hashtags, mentions, stripped.into_owned())
        }
        _ => (Vec::new(), Vec::new(), raw.to_string()),
    };

    let text = whitespace_re().replace_all(&cleaned, " ").trim().to_string();

    NormalizedInput {
        text,
        modality,
        hashtags,
        mentions,
    }
}

/// Extract hashtags (without '#', lowercased) from raw text.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    hashtag_re()
        .captures_iter(text)
        .map(|c| c[1].to_lowercase())
        .collect()
}

/// Extract @-mentions (without '@', lowercased) from raw text.
pub fn extract_mentions(text: &str) -> Vec<String> {
    mention_re()
        .find_iter(text)
        .map(|m| m.as_str()[1..].to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_collapses_whitespace() {
        let n = normalize("  hello\n\t world  ", Modality::Text);
        assert_eq!(n.text, "hello world");
        assert!(n.hashtags.is_empty());
        assert!(n.mentions.is_empty());
    }

    #[test]
    fn social_post_strips_urls_and_mentions() {
        let n = normalize(
            "@someone check this https://example.com/x India is great",
            Modality::SocialPost,
        );
        assert_eq!(n.text, "check this India is great");
        assert_eq!(n.mentions, vec!["someone"]);
    }

    #[test]
    fn social_post_keeps_hashtag_tokens_in_text() {
        let n = normalize("proud day #JaiHind for all", Modality::SocialPost);
        assert_eq!(n.text, "proud day #JaiHind for all");
        assert_eq!(n.hashtags, vec!["jaihind"]);
    }

    #[test]
    fn hashtags_in_other_scripts_are_extracted() {
        let n = normalize("trending #भारत today", Modality::SocialPost);
        assert_eq!(n.hashtags, vec!["भारत"]);
    }

    #[test]
    fn non_social_modalities_do_not_strip_tokens() {
        // OCR output could legitimately contain an @ sign
        let n = normalize("contact @support for help", Modality::Image);
        assert_eq!(n.text, "contact @support for help");
        assert!(n.mentions.is_empty());
    }

    #[test]
    fn whitespace_only_input_normalizes_to_empty() {
        let n = normalize("   \n\t ", Modality::Text);
        assert_eq!(n.text, "");
    }

    #[test]
    fn modality_round_trips_through_from_str() {
        for (s, m) in [
            ("text", Modality::Text),
            ("image", Modality::Image),
            ("audio", Modality::Audio),
            ("video", Modality::Video),
            ("social-post", Modality::SocialPost),
        ] {
            assert_eq!(s.parse::<Modality>().unwrap(), m);
        }
        assert!("carrier-pigeon".parse::<Modality>().is_err());
    }
}
