//! Arena scene: play field, info panel, overlays.
//!
//! The play field is rasterized into a cell buffer scaled from arena units
//! to terminal cells, then emitted as styled lines.

use super::event_log::{EventLog, LogTone};
use super::game_common::{
    create_game_layout, render_info_panel_frame, render_modal, render_quit_status_bar,
    render_status_bar, render_too_small,
};
use crate::assets::{AssetCatalog, SpriteStatus};
use crate::core::{ArenaState, Phase};
use crate::entities::{Aabb, SpriteId};
use crate::progression::UpgradeKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

const MIN_WIDTH: u16 = 56;
const MIN_HEIGHT: u16 = 18;
const INFO_PANEL_WIDTH: u16 = 24;
const EVENT_LOG_HEIGHT: u16 = 4;

/// Render the whole arena screen.
pub fn render_arena_scene(
    frame: &mut Frame,
    area: Rect,
    state: &ArenaState,
    catalog: &AssetCatalog,
    log: &EventLog,
    quit_pending: bool,
) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let layout = create_game_layout(
        frame,
        area,
        " Arena ",
        border_color(state.phase),
        EVENT_LOG_HEIGHT,
        INFO_PANEL_WIDTH,
    );

    render_play_field(frame, layout.content, state, catalog);
    render_event_log(frame, layout.event_log, log);
    render_status_bar_content(frame, layout.status_bar, state, quit_pending);
    render_info_panel(frame, layout.info_panel, state);

    match state.phase {
        Phase::UpgradePending => render_upgrade_overlay(frame, layout.content, state),
        Phase::GameOver => render_game_over_overlay(frame, layout.content, state, catalog),
        Phase::Playing => {}
    }
}

fn border_color(phase: Phase) -> Color {
    match phase {
        Phase::Playing => Color::LightGreen,
        Phase::UpgradePending => Color::Yellow,
        Phase::GameOver => Color::Red,
    }
}

/// Cell in the render buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }
}

/// Glyph and color for a sprite, falling back to solid shapes when the
/// catalog has no art ready.
pub fn sprite_cell(catalog: &AssetCatalog, id: SpriteId) -> Cell {
    match catalog.status(id) {
        SpriteStatus::Ready(art) => Cell {
            ch: art.glyph,
            fg: Color::Rgb(art.rgb[0], art.rgb[1], art.rgb[2]),
        },
        SpriteStatus::Loading | SpriteStatus::Failed => fallback_cell(id),
    }
}

fn fallback_cell(id: SpriteId) -> Cell {
    let (ch, fg) = match id {
        SpriteId::Player(_) => ('█', Color::Blue),
        SpriteId::Monster(_) => ('█', Color::Rgb(128, 0, 0)),
        SpriteId::Heart => ('█', Color::LightMagenta),
        SpriteId::Background => ('.', Color::Green),
        SpriteId::GameOver => ('X', Color::Red),
    };
    Cell { ch, fg }
}

/// Half-open cell range covered by `[pos, pos + size)` at `scale`, or None
/// when it lies entirely outside `0..limit`. Always at least one cell wide.
fn cell_span(pos: f64, size: f64, scale: f64, limit: usize) -> Option<(usize, usize)> {
    let start = (pos * scale).floor();
    let end = ((pos + size) * scale).ceil().max(start + 1.0);
    if end <= 0.0 || start >= limit as f64 {
        return None;
    }
    let start = start.max(0.0) as usize;
    let end = (end as usize).min(limit);
    Some((start, end))
}

struct Raster {
    cells: Vec<Vec<Cell>>,
    x_scale: f64,
    y_scale: f64,
}

impl Raster {
    fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    fn height(&self) -> usize {
        self.cells.len()
    }

    /// Cell rectangle `(col0, col1, row0, row1)` covered by `b`.
    fn project(&self, b: &Aabb) -> Option<(usize, usize, usize, usize)> {
        let (c0, c1) = cell_span(b.x, b.w, self.x_scale, self.width())?;
        let (r0, r1) = cell_span(b.y, b.h, self.y_scale, self.height())?;
        Some((c0, c1, r0, r1))
    }

    fn fill(&mut self, b: &Aabb, cell: Cell) {
        if let Some((c0, c1, r0, r1)) = self.project(b) {
            for row in &mut self.cells[r0..r1] {
                for slot in &mut row[c0..c1] {
                    *slot = cell;
                }
            }
        }
    }

    /// Health bar on the row above `b`, or on its top row at the edge.
    fn hp_bar(&mut self, b: &Aabb, ratio: f64) {
        let Some((c0, c1, r0, _)) = self.project(b) else {
            return;
        };
        let row = r0.saturating_sub(1);
        let width = c1 - c0;
        let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
        let color = hp_color(ratio);
        for (i, slot) in self.cells[row][c0..c1].iter_mut().enumerate() {
            *slot = if i < filled {
                Cell { ch: '▬', fg: color }
            } else {
                Cell {
                    ch: '▬',
                    fg: Color::DarkGray,
                }
            };
        }
    }
}

fn hp_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Rasterize the arena into a `width`x`height` cell buffer.
pub fn build_play_field(
    state: &ArenaState,
    catalog: &AssetCatalog,
    width: usize,
    height: usize,
) -> Vec<Vec<Cell>> {
    let mut raster = Raster {
        cells: vec![vec![Cell::default(); width]; height],
        x_scale: width as f64 / state.config.arena_width,
        y_scale: height as f64 / state.config.arena_height,
    };
    if width == 0 || height == 0 {
        return raster.cells;
    }

    // Sparse deterministic ground texture
    let ground = sprite_cell(catalog, SpriteId::Background);
    for (r, row) in raster.cells.iter_mut().enumerate() {
        for (c, slot) in row.iter_mut().enumerate() {
            if (r * 131 + c * 241 + 17) % 23 == 0 {
                *slot = ground;
            }
        }
    }

    for heart in &state.hearts {
        raster.fill(&heart.bounds(), sprite_cell(catalog, SpriteId::Heart));
    }
    for monster in &state.monsters {
        raster.fill(&monster.bounds(), sprite_cell(catalog, monster.sprite));
    }
    let player = &state.player;
    raster.fill(&player.bounds(), sprite_cell(catalog, player.sprite));

    for monster in &state.monsters {
        raster.hp_bar(&monster.bounds(), monster.hp_ratio());
    }
    raster.hp_bar(&player.bounds(), player.hp_ratio());

    raster.cells
}

fn render_play_field(frame: &mut Frame, area: Rect, state: &ArenaState, catalog: &AssetCatalog) {
    if area.height < 2 || area.width < 10 {
        return;
    }
    let buffer = build_play_field(state, catalog, area.width as usize, area.height as usize);

    for (row_idx, row) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_text = String::new();

        for cell in row {
            if cell.fg != current_fg && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg),
                ));
            }
            current_fg = cell.fg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(current_text, Style::default().fg(current_fg)));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn render_event_log(frame: &mut Frame, area: Rect, log: &EventLog) {
    if area.height == 0 {
        return;
    }
    let lines: Vec<Line> = log
        .recent(area.height as usize)
        .map(|(tone, message)| {
            let color = match tone {
                LogTone::Good => Color::Green,
                LogTone::Bad => Color::LightRed,
                LogTone::Neutral => Color::Gray,
            };
            Line::from(Span::styled(message.as_str(), Style::default().fg(color)))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, state: &ArenaState, quit_pending: bool) {
    if render_quit_status_bar(frame, area, quit_pending) {
        return;
    }

    match state.phase {
        Phase::GameOver => render_status_bar(
            frame,
            area,
            "Game over",
            Color::Red,
            &[("[R]", "Restart"), ("[Esc/Q]", "Quit")],
        ),
        Phase::UpgradePending => render_status_bar(
            frame,
            area,
            "Level up! Monsters are still coming",
            Color::Yellow,
            &[("[1-5]", "Upgrade"), ("[Esc/Q]", "Quit")],
        ),
        Phase::Playing => {
            let status = format!("Wave {}  ·  {} monsters left", state.wave, state.monsters.len());
            render_status_bar(
                frame,
                area,
                &status,
                Color::LightGreen,
                &[
                    ("[WASD/Arrows]", "Move"),
                    ("[Space/K]", "Attack"),
                    ("[Esc/Q]", "Quit"),
                ],
            );
        }
    }
}

fn stat_line<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, state: &ArenaState) {
    if area.width < 2 {
        return;
    }
    let inner = render_info_panel_frame(frame, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let p = &state.player;
    let lines = vec![
        stat_line(
            "HP:   ",
            format!("{}/{}", p.hp, p.max_hp),
            hp_color(p.hp_ratio()),
        ),
        stat_line("ATK:  ", p.atk.to_string(), Color::White),
        stat_line("DEF:  ", p.def.to_string(), Color::White),
        stat_line("VEL:  ", format!("{:.2}", p.speed), Color::White),
        Line::from(""),
        Line::from(vec![
            Span::styled("Lv:   ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                p.level.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        stat_line("XP x: ", format!("{:.2}", p.xp_multiplier), Color::White),
        Line::from(""),
        stat_line("Kills:", format!(" {}", state.kills), Color::White),
        stat_line("Wave: ", state.wave.to_string(), Color::White),
        stat_line(
            "Time: ",
            format!("{}s", state.clock_ms / 1000),
            Color::White,
        ),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::TOP).title("XP"))
        .gauge_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .label(format!("{}/{}", p.xp, p.xp_to_next))
        .ratio(state.xp_ratio());
    frame.render_widget(gauge, chunks[1]);
}

fn render_upgrade_overlay(frame: &mut Frame, area: Rect, state: &ArenaState) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("LEVEL {}!", state.player.level),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Choose an upgrade",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];
    for (i, kind) in UpgradeKind::ALL.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::White)),
            Span::styled(kind.label(), Style::default().fg(Color::Cyan)),
        ]));
    }
    let height = lines.len() as u16 + 2;
    render_modal(frame, area, 34, height, Color::Yellow, lines);
}

fn render_game_over_overlay(
    frame: &mut Frame,
    area: Rect,
    state: &ArenaState,
    catalog: &AssetCatalog,
) {
    let skull = sprite_cell(catalog, SpriteId::GameOver);
    let lines = vec![
        Line::from(Span::styled(
            skull.ch.to_string(),
            Style::default().fg(skull.fg).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "YOU HAVE FALLEN",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Level {}  ·  {} kills  ·  wave {}",
                state.player.level, state.kills, state.wave
            ),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press R to restart",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_modal(frame, area, 40, 8, Color::Red, lines);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ArenaConfig;
    use crate::entities::{Heart, Monster, Tier};

    fn find(buffer: &[Vec<Cell>], ch: char) -> Vec<(usize, usize)> {
        let mut hits = Vec::new();
        for (r, row) in buffer.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.ch == ch {
                    hits.push((r, c));
                }
            }
        }
        hits
    }

    #[test]
    fn test_cell_span_scales_and_clips() {
        assert_eq!(cell_span(0.0, 48.0, 0.1, 80), Some((0, 5)));
        assert_eq!(cell_span(790.0, 54.0, 0.1, 80), Some((79, 80)));
        assert_eq!(cell_span(-100.0, 54.0, 0.1, 80), None);
        assert_eq!(cell_span(900.0, 54.0, 0.1, 80), None);
        assert_eq!(cell_span(-20.0, 54.0, 0.1, 80), Some((0, 4)));
    }

    #[test]
    fn test_cell_span_is_at_least_one_cell() {
        assert_eq!(cell_span(100.0, 0.0, 0.1, 80), Some((10, 11)));
    }

    #[test]
    fn test_player_drawn_at_scaled_position() {
        let state = ArenaState::empty(ArenaConfig::default());
        let catalog = AssetCatalog::builtin();
        let buffer = build_play_field(&state, &catalog, 80, 60);
        let cells = find(&buffer, '@');
        assert!(!cells.is_empty());
        // (380, 280) at 0.1 cells per unit
        assert!(cells.contains(&(28, 38)));
    }

    #[test]
    fn test_fallback_when_sprite_not_ready() {
        let state = ArenaState::empty(ArenaConfig::default());
        let catalog = AssetCatalog::new();
        let buffer = build_play_field(&state, &catalog, 80, 60);
        assert_eq!(buffer[28][38], fallback_cell(SpriteId::Player(Tier::new(1))));
    }

    #[test]
    fn test_monster_heart_and_hp_bar() {
        let config = ArenaConfig::default();
        let mut state = ArenaState::empty(config.clone());
        let mut monster = Monster::new(Tier::new(2), 100.0, 100.0, &config);
        monster.hp = monster.max_hp / 2;
        state.hearts.push(Heart::dropped_by(&monster, &config));
        let heart_only = state.hearts.clone();
        state.monsters.push(monster);
        let catalog = AssetCatalog::builtin();

        let buffer = build_play_field(&state, &catalog, 80, 60);
        assert!(!find(&buffer, 'g').is_empty());
        // The monster covers the heart completely.
        assert!(find(&buffer, '♥').is_empty());
        // Bar sits on row 9, above the monster's first row.
        let bar: Vec<Cell> = buffer[9][10..16].to_vec();
        assert!(bar.iter().all(|c| c.ch == '▬'));
        assert!(bar.iter().any(|c| c.fg == Color::DarkGray));

        state.monsters.clear();
        state.hearts = heart_only;
        let buffer = build_play_field(&state, &catalog, 80, 60);
        assert!(!find(&buffer, '♥').is_empty());
    }

    #[test]
    fn test_zero_sized_field_is_empty() {
        let state = ArenaState::empty(ArenaConfig::default());
        let buffer = build_play_field(&state, &AssetCatalog::builtin(), 0, 0);
        assert!(buffer.is_empty());
    }
}
