// src/ui/widgets/status_bar.rs
//! One-line status bar: track, transport state, volume, particles, frame color.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::color::ColorRgb;

/// Transport state shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Loading,
    Playing,
    Paused,
    Ended,
    Failed,
}

impl Transport {
    fn icon(self) -> Span<'static> {
        match self {
            Transport::Loading => Span::styled(" … ", Style::default().fg(Color::Gray)),
            Transport::Playing => Span::styled(" ⏵ ", Style::default().fg(Color::Green)),
            Transport::Paused => Span::styled(" ⏸ ", Style::default().fg(Color::Yellow)),
            Transport::Ended => Span::styled(" ⏹ ", Style::default().fg(Color::Cyan)),
            Transport::Failed => Span::styled(" ✗ ", Style::default().fg(Color::Red)),
        }
    }
}

/// Everything the status bar displays.
#[derive(Debug, Clone)]
pub struct StatusLine<'a> {
    pub title: &'a str,
    pub transport: Transport,
    pub elapsed: u64,
    pub duration: u64,
    /// Linear volume, 0..=1
    pub volume: f32,
    pub particles: usize,
    pub max_particles: usize,
    pub color: ColorRgb,
    pub error: Option<&'a str>,
}

fn clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl StatusLine<'_> {
    pub fn to_line(&self) -> Line<'_> {
        let dim = Style::default().fg(Color::DarkGray);
        let mut spans = vec![
            self.transport.icon(),
            Span::styled(self.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("  ", dim),
            Span::raw(format!("{} / {}", clock(self.elapsed), clock(self.duration))),
            Span::styled("  vol ", dim),
            Span::raw(format!("{:>3}%", (self.volume * 100.0).round() as u32)),
            Span::styled("  aura ", dim),
            Span::raw(format!("{}/{}", self.particles, self.max_particles)),
            Span::raw("  "),
            Span::styled(
                "  ",
                Style::default().bg(Color::Rgb(self.color.red, self.color.green, self.color.blue)),
            ),
            Span::styled(format!(" {}", self.color), dim),
        ];
        if let Some(error) = self.error {
            spans.push(Span::styled(format!("  {error}"), Style::default().fg(Color::Red)));
        }
        Line::from(spans)
    }
}

/// Render the status bar.
pub fn render_status_bar(f: &mut Frame<'_>, area: Rect, status: &StatusLine<'_>) {
    f.render_widget(
        Paragraph::new(status.to_line()).style(Style::default().bg(Color::Black)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_mentions_every_field() {
        let status = StatusLine {
            title: "Nobody - Aura",
            transport: Transport::Playing,
            elapsed: 75,
            duration: 200,
            volume: 0.55,
            particles: 7,
            max_particles: 10,
            color: ColorRgb::new(0x12, 0x34, 0x56),
            error: None,
        };
        let text: String = status
            .to_line()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("Nobody - Aura"));
        assert!(text.contains("01:15 / 03:20"));
        assert!(text.contains(" 55%"));
        assert!(text.contains("7/10"));
        assert!(text.contains("#123456"));
    }

    #[test]
    fn errors_are_appended() {
        let status = StatusLine {
            title: "x",
            transport: Transport::Failed,
            elapsed: 0,
            duration: 0,
            volume: 1.0,
            particles: 0,
            max_particles: 10,
            color: ColorRgb::BLACK,
            error: Some("no audio output device"),
        };
        let line = status.to_line();
        assert_eq!(line.spans.last().unwrap().content, "  no audio output device");
    }
}
