//! Static question graph and canned replies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interview stage. Every stage but `Synthesis` is a question node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Greeting,
    Focus,
    Timeframe,
    Meetings,
    Blockers,
    Documents,
    Automation,
    DeepDive,
    Synthesis,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Focus => "focus",
            Self::Timeframe => "timeframe",
            Self::Meetings => "meetings",
            Self::Blockers => "blockers",
            Self::Documents => "documents",
            Self::Automation => "automation",
            Self::DeepDive => "deep_dive",
            Self::Synthesis => "synthesis",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Synthesis)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub struct QuestionNode {
    pub id: Stage,
    pub prompt: &'static str,
    pub quick_replies: &'static [&'static str],
    pub next: Option<Stage>,
}

pub const QUESTIONS: &[QuestionNode] = &[
    QuestionNode {
        id: Stage::Greeting,
        prompt: "Good morning! ☀️ Ready to find some tasks we can delegate to agents today? \
                 Let's start with a quick check-in. What's your main focus for today?",
        quick_replies: &[
            "Client deliverables",
            "Internal operations",
            "Proposals",
            "Planning & strategy",
            "Catching up",
        ],
        next: Some(Stage::Focus),
    },
    QuestionNode {
        id: Stage::Focus,
        prompt: "Got it. Now, what's been on your mind this morning that feels repetitive \
                 or time-consuming?",
        quick_replies: &[
            "Status reports",
            "Email drafts",
            "Document updates",
            "Meeting prep",
            "Data analysis",
        ],
        next: Some(Stage::Timeframe),
    },
    QuestionNode {
        id: Stage::Timeframe,
        prompt: "What's your deadline pressure looking like?",
        quick_replies: &[
            "Due today",
            "Due this week",
            "Due this month",
            "No specific deadline",
        ],
        next: Some(Stage::Meetings),
    },
    QuestionNode {
        id: Stage::Meetings,
        prompt: "Any meetings or reviews coming up that need preparation?",
        quick_replies: &[
            "Client meeting today",
            "Team standup",
            "Steering committee",
            "QBR this week",
            "None planned",
        ],
        next: Some(Stage::Blockers),
    },
    QuestionNode {
        id: Stage::Blockers,
        prompt: "What's currently blocking you or eating up too much time?",
        quick_replies: &[
            "Writing/drafting",
            "Data gathering",
            "Status updates",
            "Email responses",
            "Documentation",
        ],
        next: Some(Stage::Documents),
    },
    QuestionNode {
        id: Stage::Documents,
        prompt: "Which documents or deliverables are you working with? (You can list multiple)",
        quick_replies: &[
            "Proposals",
            "Status reports",
            "Meeting notes",
            "Client updates",
            "Technical docs",
        ],
        next: Some(Stage::Automation),
    },
    QuestionNode {
        id: Stage::Automation,
        prompt: "What would you love to never have to do manually again?",
        quick_replies: &[
            "Weekly status emails",
            "Meeting summaries",
            "Action item extraction",
            "Progress reports",
            "Document formatting",
        ],
        next: Some(Stage::DeepDive),
    },
    QuestionNode {
        id: Stage::DeepDive,
        prompt: "Let me dig deeper. Which of these resonates most with your morning?",
        quick_replies: &[
            "I have unprocessed meeting notes",
            "I need to write multiple updates",
            "I'm behind on proposals",
            "I need to prep for a review",
            "I have routine reports due",
        ],
        next: None,
    },
];

/// Ordered keyword table for the acknowledgment sent before the next
/// question. First case-insensitive substring match wins.
const ACKNOWLEDGMENTS: &[(&str, &str)] = &[
    (
        "proposals",
        "Proposals can definitely be streamlined with agents. Let me understand your timeline better.",
    ),
    (
        "status",
        "Status reports are perfect for automation - we can save you hours each week.",
    ),
    (
        "meeting",
        "Meeting prep is a great candidate for delegation. Let's explore what you need.",
    ),
    (
        "client",
        "Client work often has repeatable patterns we can automate.",
    ),
    (
        "email",
        "Email drafting is something agents excel at. Let's dig deeper.",
    ),
];

pub const DEFAULT_ACKNOWLEDGMENT: &str = "Interesting - I can see some opportunities there.";

pub const CLARIFY_PROMPT: &str = "Hmm, I haven't identified specific agentic tasks yet. \
     Could you tell me more about what's taking up most of your time today? \
     For example, any documents you need to write or data you need to process?";

pub const CLARIFY_REPLIES: &[&str] = &[
    "Writing proposals",
    "Processing emails",
    "Creating reports",
    "Updating documentation",
];

pub const MORE_CONTEXT_PROMPT: &str =
    "Tell me more about your workload. What else is on your plate that feels repetitive?";

pub const MORE_CONTEXT_REPLIES: &[&str] = &[
    "Data analysis",
    "Report generation",
    "Email responses",
    "Meeting scheduling",
    "Documentation updates",
];

/// Look up the question node for a stage. `Synthesis` has none.
pub fn question(stage: Stage) -> Option<&'static QuestionNode> {
    QUESTIONS.iter().find(|q| q.id == stage)
}

/// Zero-based position of a stage in the question chain
pub fn position(stage: Stage) -> usize {
    QUESTIONS
        .iter()
        .position(|q| q.id == stage)
        .unwrap_or(QUESTIONS.len())
}

pub fn acknowledgment(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    ACKNOWLEDGMENTS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_ACKNOWLEDGMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_is_linear_and_ends_at_deep_dive() {
        let mut stage = Stage::Greeting;
        let mut visited = vec![stage];
        while let Some(next) = question(stage).and_then(|q| q.next) {
            assert!(!visited.contains(&next), "{next} visited twice");
            visited.push(next);
            stage = next;
        }
        assert_eq!(stage, Stage::DeepDive);
        assert_eq!(visited.len(), QUESTIONS.len());
    }

    #[test]
    fn test_synthesis_has_no_question() {
        assert!(question(Stage::Synthesis).is_none());
        assert!(Stage::Synthesis.is_terminal());
        assert_eq!(position(Stage::Synthesis), QUESTIONS.len());
    }

    #[test]
    fn test_quick_replies_fit_number_keys() {
        for q in QUESTIONS {
            assert!(!q.quick_replies.is_empty());
            assert!(q.quick_replies.len() <= 9, "{} has too many replies", q.id);
        }
    }

    #[test]
    fn test_acknowledgment_first_match_wins() {
        // "status" appears before "meeting" in the table
        assert_eq!(
            acknowledgment("Meeting about the status report"),
            ACKNOWLEDGMENTS[1].1
        );
        assert_eq!(acknowledgment("PROPOSALS and emails"), ACKNOWLEDGMENTS[0].1);
    }

    #[test]
    fn test_acknowledgment_singular_proposal_falls_through() {
        assert_eq!(acknowledgment("one proposal"), DEFAULT_ACKNOWLEDGMENT);
    }

    #[test]
    fn test_acknowledgment_default() {
        assert_eq!(acknowledgment("Catching up"), DEFAULT_ACKNOWLEDGMENT);
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::DeepDive).unwrap();
        assert_eq!(json, "\"deep_dive\"");
    }
}
