// src/ui/layout.rs
//! Layout computation for the aura and the status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Visibility state for optional UI sections.
#[derive(Debug, Clone, Copy)]
pub struct SectionVisibility {
    pub status: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self { status: true }
    }
}

impl SectionVisibility {
    pub fn toggle_status(&mut self) {
        self.status = !self.status;
    }
}

/// Computed layout areas for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedLayout {
    /// Area the aura is drawn into
    pub aura_area: Rect,
    /// Bottom status line (if visible)
    pub status_area: Option<Rect>,
}

/// Compute the layout based on total area and section visibility.
pub fn compute_layout(area: Rect, visibility: &SectionVisibility) -> ComputedLayout {
    // The status bar needs one row and leaves at least one for the aura
    if !visibility.status || area.height < 2 {
        return ComputedLayout {
            aura_area: area,
            status_area: None,
        };
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    ComputedLayout {
        aura_area: rows[0],
        status_area: Some(rows[1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_takes_last_row() {
        let layout = compute_layout(Rect::new(0, 0, 80, 24), &SectionVisibility::default());
        assert_eq!(layout.aura_area, Rect::new(0, 0, 80, 23));
        assert_eq!(layout.status_area, Some(Rect::new(0, 23, 80, 1)));
    }

    #[test]
    fn hidden_status_gives_everything_to_aura() {
        let mut visibility = SectionVisibility::default();
        visibility.toggle_status();
        let area = Rect::new(0, 0, 80, 24);
        let layout = compute_layout(area, &visibility);
        assert_eq!(layout.aura_area, area);
        assert_eq!(layout.status_area, None);
    }

    #[test]
    fn tiny_terminal_has_no_status() {
        let area = Rect::new(0, 0, 10, 1);
        assert_eq!(compute_layout(area, &SectionVisibility::default()).status_area, None);
    }
}
