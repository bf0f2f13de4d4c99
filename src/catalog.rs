//! Phase catalog for the roadmap.
//!
//! The six phases are compiled in and never change at runtime.
//! Lookups past the end of the catalog synthesize a placeholder phase
//! instead of failing.

use std::borrow::Cow;

/// Asset shown when an index has no catalog entry
pub const PLACEHOLDER_ILLUSTRATION: &str = "/placeholder.svg?height=120&width=160";

/// One stage of the roadmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseRecord {
    /// 1-based position in the catalog
    pub id: u32,
    /// Short tag, e.g. "PHASE 1:"
    pub label: &'static str,
    /// Display title; `\n` marks a line break
    pub title: &'static str,
    /// Static image asset reference
    pub illustration: &'static str,
    /// Heading of the detail card
    pub section_header: &'static str,
    /// Detail card bullets (never empty)
    pub bullets: &'static [&'static str],
}

static PHASES: [PhaseRecord; 6] = [
    PhaseRecord {
        id: 1,
        label: "PHASE 1:",
        title: "Foundation\n& Infrastructure",
        illustration: "/1.png",
        section_header: "Design Tools",
        bullets: &[
            "Establish core platform functionality and improve basic engineering.",
            "Introduce security, plagiarism detection, fact-checking, and translation tools.",
            "Conduct user acceptance testing and optimize existing infrastructure.",
        ],
    },
    PhaseRecord {
        id: 2,
        label: "PHASE 2:",
        title: "Content Creation\nSuite",
        illustration: "/2.png",
        section_header: "Content Creation Tools",
        bullets: &[
            "Introduce AI-powered tools for various media types (memes, podcasts and more).",
            "Develop multimedia bot builder for multiple platforms and applications.",
            "Implement AI-assisted blog creation tool with image generation.",
        ],
    },
    PhaseRecord {
        id: 3,
        label: "PHASE 3:",
        title: "Pro Features\n& Monetization",
        illustration: "/3.png",
        section_header: "Advanced Features",
        bullets: &[
            "Utilize AI-powered development tools to enhance efficiency and streamline workflows.",
            "Introduce security, plagiarism detection, fact-checking, and translation tools.",
            "Develop monetization strategies and successfully launch marketplace.",
        ],
    },
    PhaseRecord {
        id: 4,
        label: "PHASE 4:",
        title: "Website\n& Marketing Toolkit",
        illustration: "/4.png",
        section_header: "Marketing Tools",
        bullets: &[
            "Deploy AI-powered website tools and crypto-oriented APIs & introduce AI-driven marketing tools suite.",
            "Create presentation and crypto-oriented document generators.",
            "Provide customizable presentation and website templates.",
        ],
    },
    PhaseRecord {
        id: 5,
        label: "PHASE 5:",
        title: "Market Growth\n& Partnerships",
        illustration: "/5.png",
        section_header: "Growth & Expansion",
        bullets: &[
            "Launch portfolio showcase and talent hiring platforms.",
            "Extend marketplace offerings and focus on continuous improvement.",
        ],
    },
    PhaseRecord {
        id: 6,
        label: "PHASE 6:",
        title: "Global Impact\n& Innovation",
        illustration: "/6.png",
        section_header: "Global Reach",
        bullets: &[
            "Pursue strategic acquisitions for enhancing the innovation ecosystem.",
            "Implement initiatives for social impact and sustainability goals.",
        ],
    },
];

/// The full ordered catalog
pub fn phases() -> &'static [PhaseRecord] {
    &PHASES
}

/// Number of phases in the catalog
pub fn phase_count() -> usize {
    phases().len()
}

/// Look up the phase shown for `index`, falling back to a placeholder
pub fn resolve(index: usize) -> PhaseView {
    match phases().get(index) {
        Some(record) => PhaseView::Record(record),
        None => PhaseView::Placeholder { index },
    }
}

/// Content rendered by the cards for a given active index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseView {
    /// A real catalog entry
    Record(&'static PhaseRecord),
    /// Synthesized content for an index with no catalog entry
    Placeholder { index: usize },
}

impl PhaseView {
    /// 1-based number used in placeholder text
    fn number(index: usize) -> usize {
        index + 1
    }

    /// 1-based phase number
    pub fn id(&self) -> usize {
        match self {
            PhaseView::Record(r) => r.id as usize,
            PhaseView::Placeholder { index } => Self::number(*index),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PhaseView::Placeholder { .. })
    }

    pub fn label(&self) -> Cow<'static, str> {
        match self {
            PhaseView::Record(r) => Cow::Borrowed(r.label),
            PhaseView::Placeholder { index } => {
                Cow::Owned(format!("Phase {}", Self::number(*index)))
            }
        }
    }

    pub fn title(&self) -> Cow<'static, str> {
        match self {
            PhaseView::Record(r) => Cow::Borrowed(r.title),
            PhaseView::Placeholder { index } => {
                Cow::Owned(format!("Phase {} Title", Self::number(*index)))
            }
        }
    }

    /// Title split on its line-break markers
    pub fn title_lines(&self) -> Vec<String> {
        self.title().split('\n').map(str::to_string).collect()
    }

    pub fn illustration(&self) -> &'static str {
        match self {
            PhaseView::Record(r) => r.illustration,
            PhaseView::Placeholder { .. } => PLACEHOLDER_ILLUSTRATION,
        }
    }

    /// Caption for the illustration
    pub fn illustration_alt(&self) -> String {
        match self {
            PhaseView::Record(r) => format!("{} illustration", r.title.replace('\n', " ")),
            PhaseView::Placeholder { index } => {
                format!("Phase {} illustration", Self::number(*index))
            }
        }
    }

    pub fn section_header(&self) -> Cow<'static, str> {
        match self {
            PhaseView::Record(r) => Cow::Borrowed(r.section_header),
            PhaseView::Placeholder { index } => {
                Cow::Owned(format!("Phase {} Details", Self::number(*index)))
            }
        }
    }

    pub fn bullets(&self) -> Vec<Cow<'static, str>> {
        match self {
            PhaseView::Record(r) => r.bullets.iter().map(|b| Cow::Borrowed(*b)).collect(),
            PhaseView::Placeholder { index } => vec![Cow::Owned(format!(
                "Description for phase {}",
                Self::number(*index)
            ))],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_contiguous_from_one() {
        for (position, phase) in phases().iter().enumerate() {
            assert_eq!(phase.id as usize, position + 1);
        }
        assert_eq!(phase_count(), 6);
    }

    #[test]
    fn test_every_phase_has_bullets() {
        for phase in phases() {
            assert!(!phase.bullets.is_empty(), "{} has no bullets", phase.label);
            assert!((2..=3).contains(&phase.bullets.len()));
        }
    }

    #[test]
    fn test_resolve_in_range() {
        let view = resolve(4);
        assert!(!view.is_placeholder());
        assert_eq!(view.label(), "PHASE 5:");
        assert_eq!(view.title_lines(), vec!["Market Growth", "& Partnerships"]);
        assert_eq!(view.illustration(), "/5.png");
        assert_eq!(view.id(), 5);
        assert_eq!(view.illustration_alt(), "Market Growth & Partnerships illustration");
    }

    #[test]
    fn test_resolve_past_end_is_placeholder() {
        let view = resolve(6);
        assert!(view.is_placeholder());
        assert_eq!(view.label(), "Phase 7");
        assert_eq!(view.id(), 7);
        assert_eq!(view.title(), "Phase 7 Title");
        assert_eq!(view.section_header(), "Phase 7 Details");
        assert_eq!(view.bullets(), vec!["Description for phase 7"]);
        assert_eq!(view.illustration(), PLACEHOLDER_ILLUSTRATION);
    }
}
