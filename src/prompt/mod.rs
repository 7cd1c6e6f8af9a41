mod templates;

use std::fmt;

use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Sub-topics the `surprise` style draws from.
pub const FALLBACK_TOPICS: &[&str] = &[
    "Famous Movie Quotes",
    "Rock Band Names",
    "Kitchen Disasters",
    "Sci-Fi Technology",
    "Ancient Myths",
    "Things You Find in a Pocket",
    "Circus Acts",
    "Under the Ocean",
    "Time Travel",
    "Detective Noire",
    "Superstitions",
    "Breakfast Foods",
    "Medieval Weaponry",
    "Office Buzzwords",
    "Haunted House Items",
    "Retro Video Games",
    "Space Exploration",
    "Extreme Weather",
    "Fairy Tale Villains",
    "Wild West Slang",
    "Astronaut Food",
    "Secret Agent Gadgets",
    "Shakespearean Insults",
    "Coffee Shop Orders",
    "Pirate Lingo",
];

/// Prompt template family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptStyle {
    /// Phrase or idiom drawn as a rebus, white lines for dark themes.
    Rebus,
    /// Strict white-on-black 300x300 canvas with a fixed element vocabulary.
    Monochrome,
    /// Clue symbols read left to right as a visual riddle.
    Riddle,
    /// Random sub-topic per request, caller topic kept as the theme.
    Surprise,
}

impl PromptStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rebus => "rebus",
            Self::Monochrome => "monochrome",
            Self::Riddle => "riddle",
            Self::Surprise => "surprise",
        }
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered prompt plus the sub-topic drawn for it, if any.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    pub text: String,
    pub sub_topic: Option<&'static str>,
}

/// Render the prompt for `topic`. Only `Surprise` is non-deterministic.
pub fn build_prompt(topic: &str, style: PromptStyle) -> String {
    let rendered = build_prompt_with_rng(topic, style, &mut rand::thread_rng());
    if let Some(sub_topic) = rendered.sub_topic {
        debug!(sub_topic, "drew sub-topic");
    }
    rendered.text
}

/// Render the prompt, drawing any sub-topic from `rng`.
pub fn build_prompt_with_rng<R: Rng + ?Sized>(
    topic: &str,
    style: PromptStyle,
    rng: &mut R,
) -> RenderedPrompt {
    match style {
        PromptStyle::Rebus => fixed(templates::rebus(topic)),
        PromptStyle::Monochrome => fixed(templates::monochrome(topic)),
        PromptStyle::Riddle => fixed(templates::riddle(topic)),
        PromptStyle::Surprise => {
            let sub_topic = FALLBACK_TOPICS
                .choose(rng)
                .copied()
                .unwrap_or("Everyday Objects");
            let subject = if topic.trim().is_empty() {
                sub_topic.to_string()
            } else {
                format!("{sub_topic}, within the broader theme of {topic}")
            };
            RenderedPrompt {
                text: templates::surprise(&subject),
                sub_topic: Some(sub_topic),
            }
        }
    }
}

fn fixed(text: String) -> RenderedPrompt {
    RenderedPrompt {
        text,
        sub_topic: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const ALL_STYLES: [PromptStyle; 4] = [
        PromptStyle::Rebus,
        PromptStyle::Monochrome,
        PromptStyle::Riddle,
        PromptStyle::Surprise,
    ];

    #[test]
    fn test_prompt_contains_literal_topic() {
        let topics = [
            "space exploration",
            "",
            "{topic}",
            "{{}}",
            "} {0} {",
            r#"quotes " and ' and \"escaped\""#,
            "émoji 🚀 and\nnewlines",
        ];
        for style in ALL_STYLES {
            for topic in topics {
                let prompt = build_prompt(topic, style);
                assert!(prompt.contains(topic), "{style} prompt lost topic {topic:?}");
            }
        }
    }

    #[test]
    fn test_every_style_describes_output_contract() {
        for style in ALL_STYLES {
            let prompt = build_prompt("weather", style);
            assert!(prompt.contains("word"), "{style}");
            assert!(prompt.contains("svg"), "{style}");
            assert!(prompt.contains("<svg"), "{style}");
            assert!(prompt.contains("</svg>"), "{style}");
            assert!(prompt.contains("Do not include markdown"), "{style}");
        }
    }

    #[test]
    fn test_strict_styles_pin_canvas_and_colors() {
        for style in [PromptStyle::Monochrome, PromptStyle::Riddle, PromptStyle::Surprise] {
            let prompt = build_prompt("pirates", style);
            assert!(prompt.contains("viewBox=\"0 0 300 300\""), "{style}");
            assert!(prompt.contains("fill=\"black\""), "{style}");
            assert!(prompt.contains("white"), "{style}");
            assert!(prompt.contains("sans-serif"), "{style}");
        }
    }

    #[test]
    fn test_fixed_styles_are_deterministic() {
        for style in [PromptStyle::Rebus, PromptStyle::Monochrome, PromptStyle::Riddle] {
            let rendered = build_prompt_with_rng("kitchen", style, &mut rand::thread_rng());
            assert_eq!(rendered.text, build_prompt("kitchen", style));
            assert!(rendered.sub_topic.is_none());
        }
    }

    #[test]
    fn test_surprise_draws_varied_sub_topics() {
        let mut rng = rand::thread_rng();
        let drawn: HashSet<&str> = (0..200)
            .filter_map(|_| {
                build_prompt_with_rng("space exploration", PromptStyle::Surprise, &mut rng)
                    .sub_topic
            })
            .collect();

        assert!(drawn.len() > 1);
        assert!(drawn.iter().all(|t| FALLBACK_TOPICS.contains(t)));
    }

    #[test]
    fn test_surprise_keeps_caller_theme() {
        let rendered =
            build_prompt_with_rng("robots", PromptStyle::Surprise, &mut rand::thread_rng());
        let sub_topic = rendered.sub_topic.unwrap();
        assert!(rendered.text.contains(sub_topic));
        assert!(rendered.text.contains("broader theme of robots"));
    }

    #[test]
    fn test_surprise_blank_topic_uses_sub_topic_alone() {
        let rendered = build_prompt_with_rng("  ", PromptStyle::Surprise, &mut rand::thread_rng());
        assert!(!rendered.text.contains("broader theme"));
        assert!(rendered.text.contains(rendered.sub_topic.unwrap()));
    }

    #[test]
    fn test_fallback_topics_are_distinct() {
        let unique: HashSet<&str> = FALLBACK_TOPICS.iter().copied().collect();
        assert_eq!(unique.len(), FALLBACK_TOPICS.len());
        assert_eq!(FALLBACK_TOPICS.len(), 25);
        assert!(FALLBACK_TOPICS.contains(&"Detective Noire"));
    }

    #[test]
    fn test_style_names_match_cli_values() {
        for style in ALL_STYLES {
            let parsed = PromptStyle::from_str(style.as_str(), false).unwrap();
            assert_eq!(parsed, style);
        }
    }
}
