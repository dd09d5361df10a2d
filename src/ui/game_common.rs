//! Layout and chrome shared by the arena screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Areas returned by [`create_game_layout`].
pub struct GameLayout {
    /// Play field, top left inside the outer border.
    pub content: Rect,
    /// Recent-event strip under the play field.
    pub event_log: Rect,
    /// Two-line status bar at the bottom left.
    pub status_bar: Rect,
    /// Right column with its own border.
    pub info_panel: Rect,
}

/// Split `area` into the standard arena layout:
///
/// ```text
/// ┌─ Arena ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [play field]                  │  [stats]    │
/// │                                 │             │
/// │ [event log]                     │  [xp]       │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    event_log_height: u16,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(event_log_height),
            Constraint::Length(2),
        ])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        event_log: v_chunks[1],
        status_bar: v_chunks[2],
        info_panel: h_chunks[1],
    }
}

/// Two-line status bar: a centered message, then `[key] action` hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::with_capacity(controls.len() * 3);
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

pub const QUIT_STATUS_TEXT: &str = "Quit the arena? Progress is not saved.";
pub const QUIT_CONTROLS: &[(&str, &str)] = &[("[Esc/Q]", "Confirm"), ("[Any]", "Cancel")];

/// Replace the status bar with the quit confirmation while it is armed.
/// Returns true if it drew.
pub fn render_quit_status_bar(frame: &mut Frame, area: Rect, quit_pending: bool) -> bool {
    if !quit_pending {
        return false;
    }
    render_status_bar(frame, area, QUIT_STATUS_TEXT, Color::LightRed, QUIT_CONTROLS);
    true
}

/// Bordered " Info " block; returns its inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Centered modal of `width`x`height` over `area`, cleared underneath.
pub fn render_modal(
    frame: &mut Frame,
    area: Rect,
    width: u16,
    height: u16,
    border_color: Color,
    lines: Vec<Line>,
) {
    let modal = centered_rect(area, width, height);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(modal);
    frame.render_widget(block, modal);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// A `width`x`height` rect centered in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Shown instead of the arena when the terminal is too small.
pub fn render_too_small(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Need {}x{}, have {}x{}", min_width, min_height, area.width, area.height),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let text = Paragraph::new(lines).alignment(Alignment::Center);
    let y = area.y + area.height.saturating_sub(2) / 2;
    frame.render_widget(text, Rect::new(area.x, y, area.width, area.height.min(2)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(10, 5, 40, 20);
        let r = centered_rect(area, 20, 10);
        assert_eq!(r, Rect::new(20, 10, 20, 10));
    }

    #[test]
    fn test_centered_rect_shrinks_to_area() {
        let area = Rect::new(0, 0, 12, 4);
        let r = centered_rect(area, 30, 9);
        assert_eq!(r, Rect::new(0, 0, 12, 4));
    }
}
