//! Display transforms for generated values.
//!
//! Pure string formatting in en-US style. Nothing here feeds back into
//! generation.

use serde::{Deserialize, Serialize};

/// `$127,450`; compact: `$1.5M`, `$127k`.
pub fn format_currency(value: f64, compact: bool) -> String {
    if compact {
        if value >= 1_000_000.0 {
            return format!("${:.1}M", value / 1_000_000.0);
        }
        if value >= 1_000.0 {
            return format!("${:.0}k", value / 1_000.0);
        }
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_digits(rounded.abs(), 0))
}

/// `1,847`, `2.4`; compact: `1.5M`, `1.8k`.
pub fn format_number(value: f64, compact: bool) -> String {
    if compact {
        if value >= 1_000_000.0 {
            return format!("{:.1}M", value / 1_000_000.0);
        }
        if value >= 1_000.0 {
            return format!("{:.1}k", value / 1_000.0);
        }
    }
    // Up to three fraction digits, trailing zeros dropped.
    let scaled = (value * 1_000.0).round() / 1_000.0;
    let sign = if scaled < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_digits(scaled.abs(), 3))
}

/// `+8.2%` (sign only for positive values when `include_sign`).
pub fn format_percentage(value: f64, decimals: usize, include_sign: bool) -> String {
    let sign = if include_sign && value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.decimals$}%")
}

/// Non-negative `value` with thousands separators and at most
/// `max_fraction` fraction digits.
fn group_digits(value: f64, max_fraction: usize) -> String {
    let fixed = format!("{value:.max_fraction$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub text: String,
    pub tone: Tone,
    pub direction: Direction,
}

/// Month-over-month change badge. With `invert`, a decrease is good news.
pub fn format_delta(value: f64, invert: bool) -> Delta {
    let good = if invert { value < 0.0 } else { value > 0.0 };
    let tone = if value == 0.0 {
        Tone::Neutral
    } else if good {
        Tone::Positive
    } else {
        Tone::Negative
    };
    let direction = if value > 0.0 {
        Direction::Up
    } else if value < 0.0 {
        Direction::Down
    } else {
        Direction::Flat
    };
    Delta {
        text: format_percentage(value, 1, true),
        tone,
        direction,
    }
}

/// Frames of a count-up animation from zero to `target`.
///
/// Each view owns its own CountUp; dropping it is the whole teardown.
#[derive(Debug, Clone)]
pub struct CountUp {
    target: f64,
    steps: u32,
    frame: u32,
}

impl CountUp {
    pub const DEFAULT_STEPS: u32 = 60;

    pub fn new(target: f64) -> Self {
        Self::with_steps(target, Self::DEFAULT_STEPS)
    }

    pub fn with_steps(target: f64, steps: u32) -> Self {
        Self { target, steps: steps.max(1), frame: 0 }
    }
}

impl Iterator for CountUp {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.frame >= self.steps {
            return None;
        }
        self.frame += 1;
        if self.frame == self.steps {
            Some(self.target)
        } else {
            Some(self.target * f64::from(self.frame) / f64::from(self.steps))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.steps - self.frame) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for CountUp {}
