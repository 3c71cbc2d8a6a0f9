//! Labeled horizontal slider for the confidence threshold.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use betlens_core::Threshold;

use crate::theme;

const BAR_WIDTH: usize = 24;

pub struct Slider {
    threshold: Threshold,
    suffix: String,
}

impl Slider {
    pub fn new(threshold: Threshold) -> Self {
        Self {
            threshold,
            suffix: String::new(),
        }
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// `[====|       ]`, with the knob at the current position.
    pub fn bar(&self) -> String {
        let filled = (self.threshold.fraction() * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        let empty = BAR_WIDTH - filled;
        format!("[{}|{}]", "=".repeat(filled), " ".repeat(empty))
    }
}

impl Widget for Slider {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(format!("{:.2} ", Threshold::min().value()), theme::muted()),
            Span::styled(self.bar(), theme::accent()),
            Span::styled(format!(" {:.2}", Threshold::max().value()), theme::muted()),
            Span::styled(format!("  >= {}", self.threshold), theme::accent_bold()),
            Span::styled(self.suffix, theme::muted()),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_ends() {
        let at_min = Slider::new(Threshold::min()).bar();
        let at_max = Slider::new(Threshold::max()).bar();
        assert!(at_min.starts_with("[|"));
        assert!(at_max.ends_with("|]"));
        assert_eq!(at_min.len(), at_max.len());
    }

    #[test]
    fn default_sits_at_one_third() {
        let bar = Slider::new(Threshold::default()).bar();
        let knob = bar.find('|').unwrap();
        assert_eq!(knob, 1 + BAR_WIDTH / 3);
    }
}
