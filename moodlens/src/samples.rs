//! Ready-made inputs offered next to the text box.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExample {
    pub label: &'static str,
    pub text: &'static str,
}

pub const TEXT_EXAMPLES: [TextExample; 4] = [
    TextExample {
        label: "Positive",
        text: "I absolutely love this product! It exceeded all my expectations and the quality is outstanding.",
    },
    TextExample {
        label: "Negative",
        text: "This is terrible. I am extremely disappointed with the poor service and low quality.",
    },
    TextExample {
        label: "Neutral",
        text: "The customer service team responded, but the reply seemed automated.",
    },
    TextExample {
        label: "Mixed",
        text: "The design is beautiful but the price is quite high. Overall, it is acceptable.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactArea {
    PeaceConflict,
    OnlineAbuse,
    MentalHealth,
}

impl ImpactArea {
    pub fn slug(&self) -> &'static str {
        match self {
            ImpactArea::PeaceConflict => "peace-conflict",
            ImpactArea::OnlineAbuse => "online-abuse",
            ImpactArea::MentalHealth => "mental-health",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ImpactArea::PeaceConflict => "Peace & Conflict Monitoring",
            ImpactArea::OnlineAbuse => "Online Abuse Detection & Safer Communities",
            ImpactArea::MentalHealth => "Mental Health Signal Detection",
        }
    }

    /// Sustainable Development Goal number the area supports.
    pub fn sdg(&self) -> u8 {
        match self {
            ImpactArea::PeaceConflict | ImpactArea::OnlineAbuse => 16,
            ImpactArea::MentalHealth => 3,
        }
    }

    pub fn sdg_title(&self) -> &'static str {
        match self.sdg() {
            16 => "SDG 16: Peace, Justice and Strong Institutions",
            _ => "SDG 3: Good Health and Well-being",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ImpactArea::PeaceConflict => {
                "Detects escalation language and violence-prone rhetoric in public discourse, helping institutions monitor social tensions and prevent conflicts."
            }
            ImpactArea::OnlineAbuse => {
                "Identifies harmful language patterns that may indicate cyberbullying, harassment, or psychological abuse, enabling proactive moderation."
            }
            ImpactArea::MentalHealth => {
                "Detects patterns indicating mental health distress, withdrawal, or need for support, enabling early intervention and resource connection."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactExample {
    pub area: ImpactArea,
    pub text: &'static str,
}

pub const IMPACT_EXAMPLES: [ImpactExample; 3] = [
    ImpactExample {
        area: ImpactArea::PeaceConflict,
        text: "If they keep pushing us, we'll take to the streets and fight back.",
    },
    ImpactExample {
        area: ImpactArea::OnlineAbuse,
        text: "You're worthless and nobody cares about you.",
    },
    ImpactExample {
        area: ImpactArea::MentalHealth,
        text: "Lately I feel like nothing matters. I can't focus and I'm exhausted all the time.",
    },
];

/// Look up a sample by label or impact-area slug, case-insensitively.
pub fn find(name: &str) -> Option<&'static str> {
    let name = name.trim();
    TEXT_EXAMPLES
        .iter()
        .find(|e| e.label.eq_ignore_ascii_case(name))
        .map(|e| e.text)
        .or_else(|| {
            IMPACT_EXAMPLES
                .iter()
                .find(|e| e.area.slug().eq_ignore_ascii_case(name))
                .map(|e| e.text)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::validate_texts;

    #[test]
    fn test_find_samples() {
        assert_eq!(find("mixed"), Some(TEXT_EXAMPLES[3].text));
        assert_eq!(find("Mental-Health"), Some(IMPACT_EXAMPLES[2].text));
        assert_eq!(find("unknown"), None);
    }

    #[test]
    fn test_sdg_numbers() {
        assert_eq!(ImpactArea::OnlineAbuse.sdg(), 16);
        assert_eq!(ImpactArea::MentalHealth.sdg_title(), "SDG 3: Good Health and Well-being");
    }

    #[test]
    fn test_samples_are_valid_input() {
        for example in TEXT_EXAMPLES {
            assert!(validate_texts(example.text).is_ok());
        }
    }
}
