use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use sugoroku_core::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    CloseHelp,
    SelectCard(usize),
    Shuffle,
    PlayBgm(Channel),
    StopBgm,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::CloseHelp,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char(ch @ '1'..='6') => InputAction::SelectCard(ch as usize - '1' as usize),
        KeyCode::Char('s') | KeyCode::Char(' ') => InputAction::Shuffle,
        KeyCode::Char('b') => InputAction::PlayBgm(Channel::Bgm1),
        KeyCode::Char('n') => InputAction::PlayBgm(Channel::Bgm2),
        KeyCode::Char('m') => InputAction::StopBgm,
        _ => InputAction::None,
    }
}

/// Left click on a card selects it; everything else is ignored.
pub fn map_mouse(mouse: MouseEvent, card_areas: &[Rect]) -> InputAction {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return InputAction::None;
    }
    card_areas
        .iter()
        .position(|area| {
            mouse.column >= area.x
                && mouse.column < area.x.saturating_add(area.width)
                && mouse.row >= area.y
                && mouse.row < area.y.saturating_add(area.height)
        })
        .map_or(InputAction::None, InputAction::SelectCard)
}
