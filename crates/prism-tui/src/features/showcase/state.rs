//! Headline rotation state.
//!
//! A bounded cyclic index over a fixed ordered headline sequence.
//! The timer-driven advance can be suspended (panel focus); manual
//! stepping always works. The index wraps modulo the sequence length
//! in both directions, so any length >= 1 is legal.

use std::time::Duration;

use ratatui::style::Color;

/// Cadence of timer-driven advances.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(5);

/// One showcase entry. No identity beyond its position in `HEADLINES`.
#[derive(Debug, Clone, Copy)]
pub struct Headline {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub accent: Color,
    pub category: &'static str,
    pub tag: &'static str,
}

/// The fixed headline sequence, in display order.
pub const HEADLINES: &[Headline] = &[
    Headline {
        title: "Apple's 'sexist' credit card investigated by US regulator",
        subtitle: "Investigation highlights need for algorithmic fairness in financial services",
        accent: Color::Magenta,
        category: "FINANCIAL REGULATIONS",
        tag: "Policy",
    },
    Headline {
        title: "CFPB Issues Guidance on Credit Denials by Lenders Using Artificial Intelligence",
        subtitle: "Consumers must receive accurate and specific reasons for credit denials",
        accent: Color::Blue,
        category: "GOVERNMENT OVERSIGHT",
        tag: "Compliance",
    },
    Headline {
        title: "Italian Authority Fines OpenAI $15.6 Million for Alleged GDPR Violations",
        subtitle: "Landmark case sets precedent for AI companies operating in Europe",
        accent: Color::Green,
        category: "PRIVACY COMPLIANCE",
        tag: "Legal",
    },
    Headline {
        title: "How best to regulate Artificial Intelligence",
        subtitle: "Insights from governing complex markets can inform AI regulation using \
                   partitions, transparency, control points and accountability",
        accent: Color::LightMagenta,
        category: "REGULATORY FRAMEWORKS",
        tag: "Research",
    },
    Headline {
        title: "Empowering AI Innovators to Build Trust",
        subtitle: "Precision and compliance are the cornerstones of responsible AI development, \
                   ensuring transparency, control, and accountability. - Arun Prasad",
        accent: Color::Cyan,
        category: "FOUNDER MESSAGE",
        tag: "Opinion",
    },
];

/// Cyclic index into a fixed-length sequence, with a suspend flag for
/// the timer-driven path.
#[derive(Debug, Clone)]
pub struct RotationState {
    current: usize,
    len: usize,
    suspended: bool,
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new(HEADLINES.len())
    }
}

impl RotationState {
    /// Creates a rotation over `len` items starting at index 0.
    ///
    /// # Panics
    /// Panics when `len` is 0; the sequence is fixed at compile time
    /// and never empty.
    pub fn new(len: usize) -> Self {
        assert!(len >= 1, "rotation over an empty sequence");
        Self {
            current: 0,
            len,
            suspended: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Steps forward, wrapping at the end.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.len;
    }

    /// Steps backward, wrapping at the start.
    pub fn retreat(&mut self) {
        self.current = (self.current + self.len - 1) % self.len;
    }

    /// Gates timer-driven advances. Manual stepping is unaffected.
    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
    }

    /// A timer fire: advances unless suspended.
    pub fn timer_tick(&mut self) {
        if !self.suspended {
            self.advance();
        }
    }

    /// The headline at the current index.
    pub fn current_headline(&self) -> &'static Headline {
        &HEADLINES[self.current % HEADLINES.len()]
    }
}
