//! Canned clause pools. Only [`PLAYFUL_SUFFIXES`] and [`EMOJIS`] carry emoji;
//! everything else is plain text so the emoji step stays predictable.

pub type ClausePool = &'static [&'static str];

pub const ACKNOWLEDGEMENT: ClausePool = &[
    "Thanks so much, really appreciate it.",
    "Got it, thank you!",
    "Appreciate you reaching out.",
    "Thank you, that means a lot.",
];

pub const CONFIRMATION: ClausePool = &[
    "That time works for me.",
    "See you then!",
    "Sounds good, I'll put it on my calendar.",
    "All good for then, looking forward to it.",
];

pub const CLARIFYING: ClausePool = &[
    "Could you share a bit more detail?",
    "What did you have in mind?",
    "Happy to help, what's the best next step on your side?",
];

pub const AGREEMENT: ClausePool = &[
    "Sounds great!",
    "Yeah, totally agree.",
    "Cool, that makes sense.",
    "Love that idea.",
];

pub const EMPATHY: ClausePool = &[
    "Sorry to hear that, I'm here if you need anything.",
    "That sounds tough, thanks for telling me.",
    "I hear you, let's figure it out together.",
];

pub const LEAN_IN: ClausePool = &[
    "Keep me posted!",
    "Would love to hear more.",
    "Let's keep this going.",
];

pub const PLAYFUL_SUFFIXES: ClausePool = &[" 😄", " 🎉 haha", " 😜"];

pub const EMOJIS: ClausePool = &["🙂", "👍", "😊", "🙌", "✨"];

/// Repeat-avoidance tails when emoji are off.
pub const PUNCTUATION_VARIATIONS: ClausePool = &["!", " :)"];
