use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use sugoroku_core::{Card, Channel, DisplayState, Effect, ResultView};

const GRID_COLUMNS: usize = 3;

struct Regions {
    header: Rect,
    grid: Rect,
    result: Rect,
    log: Rect,
}

fn regions(area: Rect) -> Regions {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(12),
            Constraint::Length(8),
        ])
        .split(area);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(root[1]);
    Regions {
        header: root[0],
        grid: middle[0],
        result: middle[1],
        log: root[2],
    }
}

/// Screen rectangles of the six cards, in position order. Shared by drawing
/// and mouse hit-testing so both agree on where a card is.
pub fn card_areas(area: Rect) -> Vec<Rect> {
    let grid = Block::default().borders(Borders::ALL).inner(regions(area).grid);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(grid);
    rows.iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .split(*row)
                .to_vec()
        })
        .collect()
}

pub fn draw(frame: &mut Frame, app: &App) {
    let regions = regions(frame.area());
    draw_header(frame, regions.header, app);
    draw_grid(frame, regions.grid, app);
    draw_result(frame, regions.result, app);
    draw_log(frame, regions.log, app);

    let mut particle_area = regions.grid;
    particle_area.width += regions.result.width;
    draw_particles(frame, particle_area, app);

    if app.show_help {
        draw_help_popup(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "{} | {}: {}",
        app.locale.text("Sugoroku Cards", "けんちゃんのすごろくカード"),
        app.locale.text("Hint", "ヒント"),
        app.next_hint()
    );
    let mut music = vec![Span::raw(format!("{}: ", app.locale.text("Music", "BGM")))];
    for channel in Channel::BGM {
        let label = format!(" {} ", app.channel_label(channel));
        if app.game.bgm_highlight(channel) {
            music.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            music.push(Span::raw(label));
        }
    }
    music.push(Span::raw(format!(
        " | {} {} | {} {} | {} {}",
        app.locale.text("Seed", "シード"),
        app.game.seed(),
        app.locale.text("Lang", "言語"),
        app.locale.code(),
        app.locale.text("Lock", "ロック"),
        if app.game.is_locked() { "on" } else { "off" }
    )));
    let lines = vec![
        Line::from(Span::from(title).bold()),
        Line::from(music),
        Line::from(format!(
            "{}: {}",
            app.locale.text("Status", "状態"),
            app.status_line
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Overview", "概要"));
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_grid(frame: &mut Frame, area: Rect, app: &App) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Cards", "カード"));
    if !app.game.grid_interactive() {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    }
    frame.render_widget(block, area);

    let areas = card_areas(frame.area());
    for (card, card_area) in app.game.cards().iter().zip(areas) {
        draw_card(frame, card_area, app, card);
    }
}

fn draw_card(frame: &mut Frame, area: Rect, app: &App, card: &Card) {
    let mut style = card_style(card);
    if !app.game.grid_interactive() {
        style = style.add_modifier(Modifier::DIM);
    }
    let lines = vec![
        Line::from(""),
        Line::from(Span::from(app.card_label(card)).bold()),
        Line::from(app.card_caption(card)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{}", card.position + 1))
        .border_style(style);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(style)
            .block(block),
        area,
    );
}

fn card_style(card: &Card) -> Style {
    match card.display_state() {
        DisplayState::Idle => Style::default(),
        DisplayState::Shuffling => Style::default().fg(Color::DarkGray),
        DisplayState::Selected => Style::default().fg(Color::Yellow),
        DisplayState::EffectActive => {
            let color = card.markers.effect.map_or(Color::Yellow, effect_color);
            let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            if card.markers.drumroll {
                style.add_modifier(Modifier::RAPID_BLINK)
            } else {
                style
            }
        }
        DisplayState::Flipped => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    }
}

fn effect_color(effect: Effect) -> Color {
    match effect {
        Effect::GlowPulse => Color::LightYellow,
        Effect::Bouncing => Color::LightGreen,
        Effect::MagicSpin => Color::LightMagenta,
        Effect::ShakeFlash => Color::LightRed,
        Effect::FloatOrbit => Color::LightCyan,
    }
}

fn draw_result(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Result", "結果"));
    let lines = match app.game.result() {
        ResultView::Hidden => vec![
            Line::from(""),
            Line::from(app.next_hint()).fg(Color::DarkGray),
        ],
        ResultView::Showing { position, face } => vec![
            Line::from(""),
            Line::from(format!(
                "{} {}",
                app.locale.text("Card", "カード"),
                position + 1
            )),
            Line::from(Span::from(face.to_string()).bold().fg(Color::Yellow)),
            Line::from(face.image_name()).fg(Color::DarkGray),
            Line::from(""),
            Line::from(app.locale.text("press s to play again", "sでもう一度")),
        ],
    };
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_particles(frame: &mut Frame, area: Rect, app: &App) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let bounds = frame.area();
    for particle in app.game.particles() {
        let x = area.x + (particle.x * area.width as f32) as u16;
        let y = area.y + (particle.y * area.height as f32) as u16;
        if x >= bounds.right() || y >= bounds.bottom() {
            continue;
        }
        let (r, g, b) = particle.color.rgb();
        frame.render_widget(
            Paragraph::new("*").style(Style::default().fg(Color::Rgb(r, g, b))),
            Rect::new(x, y, 1, 1),
        );
    }
}

fn draw_log(frame: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(app.event_log.len().saturating_sub(visible))
        .map(|line| Line::from(line.as_str()))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Events", "イベント"));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.locale.text("1-6 / click  pick a card", "1-6 / クリック  カードを選ぶ")),
        Line::from(app.locale.text("s / space    shuffle", "s / スペース  シャッフル")),
        Line::from(app.locale.text("b            play BGM1", "b            BGM1を再生")),
        Line::from(app.locale.text("n            play BGM2", "n            BGM2を再生")),
        Line::from(app.locale.text("m            stop music", "m            BGM停止")),
        Line::from(app.locale.text("?            toggle help", "?            ヘルプ")),
        Line::from(app.locale.text("q            quit", "q            終了")),
    ];
    let block = Block::default()
        .title(app.locale.text("Help", "ヘルプ"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
