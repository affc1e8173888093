use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::CloseHelp => app.show_help = false,
        InputAction::SelectCard(position) => app.select_card(position),
        InputAction::Shuffle => app.shuffle(),
        InputAction::PlayBgm(channel) => app.play_bgm(channel),
        InputAction::StopBgm => app.stop_bgm(),
    }
}
