use crate::audio::TerminalAudio;
use anyhow::{Context, Result};
use sugoroku_core::{
    AudioBackend, Card, Channel, ControllerConfig, DisplayState, Event, EventBus, GameController,
    MutedAudio, RngState, SelectOutcome,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_EVENT_LOG: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLocale {
    EnUs,
    JaJp,
}

impl UiLocale {
    pub fn from_opt(value: Option<&str>) -> Self {
        let normalized = normalize_locale(value);
        if normalized == "ja_JP" {
            Self::JaJp
        } else {
            Self::EnUs
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::JaJp => "ja_JP",
        }
    }

    pub fn text<'a>(self, en: &'a str, ja: &'a str) -> &'a str {
        if matches!(self, Self::JaJp) {
            ja
        } else {
            en
        }
    }
}

pub fn normalize_locale(value: Option<&str>) -> String {
    let raw = value.unwrap_or("").trim().to_ascii_lowercase();
    let base = raw.split(['.', '@']).next().unwrap_or("");
    match base.replace('-', "_").as_str() {
        "ja" | "ja_jp" | "jp" => "ja_JP".to_string(),
        _ => "en_US".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub locale: UiLocale,
    pub seed: Option<u64>,
    pub config: ControllerConfig,
    pub mute: bool,
    pub bell: bool,
}

pub struct App {
    pub locale: UiLocale,
    pub game: GameController,
    pub events: EventBus,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
    last_tick: Instant,
}

impl App {
    pub fn bootstrap(options: AppOptions) -> Result<Self> {
        let rng = match options.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        let audio: Box<dyn AudioBackend> = if options.mute {
            Box::new(MutedAudio)
        } else {
            Box::new(TerminalAudio::new(options.bell))
        };
        let game = GameController::new(options.config, audio, rng)
            .map_err(|err| anyhow::anyhow!(err))
            .context("create game controller")?;

        let locale = options.locale;
        let mut app = Self {
            locale,
            game,
            events: EventBus::default(),
            event_log: VecDeque::new(),
            status_line: locale.text("ready", "準備完了").to_string(),
            show_help: false,
            should_quit: false,
            last_tick: Instant::now(),
        };
        app.push_event_line(format!(
            "{} {}",
            locale.text("seed", "シード"),
            app.game.seed()
        ));
        app.shuffle();
        Ok(app)
    }

    /// Moves the game clock by the wall time since the previous tick.
    pub fn on_tick(&mut self) {
        let elapsed = Instant::now().duration_since(self.last_tick).as_millis() as u64;
        // carry the sub-millisecond remainder into the next tick
        self.last_tick += Duration::from_millis(elapsed);
        self.advance(elapsed);
    }

    pub fn advance(&mut self, delta_ms: u64) {
        self.game.advance(delta_ms, &mut self.events);
        self.flush_events();
    }

    pub fn shuffle(&mut self) {
        self.game.shuffle(&mut self.events);
        self.status_line = self.locale.text("shuffling...", "シャッフル中...").to_string();
        self.flush_events();
    }

    pub fn select_card(&mut self, position: usize) {
        match self.game.select_card(position, &mut self.events) {
            Ok(SelectOutcome::Started { effect }) => {
                self.status_line = format!(
                    "{} {}",
                    self.locale.text("effect", "演出"),
                    self.effect_label(effect)
                );
            }
            Ok(SelectOutcome::Ignored) => {
                self.status_line = if self.game.selected_position().is_some() {
                    self.locale
                        .text("a card is already chosen; shuffle first", "選択済みです。シャッフルしてください")
                } else {
                    self.locale.text("cards are still shuffling", "シャッフル中です")
                }
                .to_string();
            }
            Err(err) => self.status_line = err.to_string(),
        }
        self.flush_events();
    }

    pub fn play_bgm(&mut self, channel: Channel) {
        match self.game.play_bgm(channel, &mut self.events) {
            Ok(true) => {
                self.status_line = format!(
                    "{} {}",
                    self.locale.text("playing", "再生中"),
                    self.channel_label(channel)
                );
            }
            Ok(false) => {
                self.status_line = self
                    .locale
                    .text("music could not start", "BGMを再生できません")
                    .to_string();
            }
            Err(err) => self.status_line = err.to_string(),
        }
        self.flush_events();
    }

    pub fn stop_bgm(&mut self) {
        self.game.stop_bgm(&mut self.events);
        self.status_line = self.locale.text("music stopped", "BGM停止").to_string();
        self.flush_events();
    }

    pub fn next_hint(&self) -> &'static str {
        if self.game.result().is_visible() {
            self.locale.text("press s to shuffle", "sでシャッフル")
        } else if self.game.is_locked() && self.game.selected_position().is_none() {
            self.locale.text("wait for the shuffle", "シャッフルを待っています")
        } else if self.game.is_locked() {
            self.locale.text("wait for the reveal", "結果を待っています")
        } else {
            self.locale.text("pick a card (1-6 or click)", "カードを選んでください (1-6 / クリック)")
        }
    }

    pub fn card_label(&self, card: &Card) -> String {
        match card.display_state() {
            DisplayState::Flipped => card.face.to_string(),
            DisplayState::Shuffling => "~".to_string(),
            _ => "?".to_string(),
        }
    }

    pub fn card_caption(&self, card: &Card) -> &'static str {
        match card.display_state() {
            DisplayState::Idle => "",
            DisplayState::Shuffling => self.locale.text("shuffling", "シャッフル"),
            DisplayState::Selected => self.locale.text("selected", "選択"),
            DisplayState::EffectActive if card.markers.drumroll => {
                self.locale.text("drum roll!", "ドラムロール!")
            }
            DisplayState::EffectActive => card
                .markers
                .effect
                .map(|effect| self.effect_label(effect))
                .unwrap_or(""),
            DisplayState::Flipped => self.locale.text("open", "オープン"),
        }
    }

    pub fn effect_label(&self, effect: sugoroku_core::Effect) -> &'static str {
        use sugoroku_core::Effect;
        match effect {
            Effect::GlowPulse => self.locale.text("glow pulse", "神秘的な光のパルス"),
            Effect::Bouncing => self.locale.text("bouncing", "楽しいバウンシング"),
            Effect::MagicSpin => self.locale.text("magic spin", "魔法の回転"),
            Effect::ShakeFlash => self.locale.text("shake & flash", "シェイク＆フラッシュ"),
            Effect::FloatOrbit => self.locale.text("float orbit", "浮遊＆星の軌道"),
        }
    }

    pub fn channel_label(&self, channel: Channel) -> &'static str {
        match channel {
            Channel::Bgm1 => "BGM1",
            Channel::Bgm2 => "BGM2",
            Channel::CardFlip => self.locale.text("card flip", "カードめくり"),
            Channel::DrumRoll => self.locale.text("drum roll", "ドラムロール"),
            Channel::Fanfare => self.locale.text("fanfare", "ファンファーレ"),
            Channel::Shuffle => self.locale.text("shuffle", "シャッフル"),
        }
    }

    pub fn bgm_label(&self) -> String {
        match self.game.active_bgm() {
            Some(channel) => self.channel_label(channel).to_string(),
            None => self.locale.text("off", "停止").to_string(),
        }
    }

    pub fn describe_event(&self, event: &Event) -> Option<String> {
        let text = match event {
            Event::ShuffleStarted { generation } => format!(
                "{} #{generation}",
                self.locale.text("shuffle", "シャッフル")
            ),
            Event::SelectionUnlocked => self.locale.text("cards ready", "カード準備完了").to_string(),
            Event::SelectionIgnored { position } => format!(
                "{} {}",
                self.locale.text("ignored click on card", "無視されたクリック: カード"),
                position + 1
            ),
            Event::CardSelected {
                position, effect, ..
            } => format!(
                "{} {} ({})",
                self.locale.text("selected card", "選択したカード"),
                position + 1,
                self.effect_label(*effect)
            ),
            Event::DrumRoll { .. } => self.locale.text("drum roll...", "ドラムロール...").to_string(),
            Event::CardFlipped { position } => format!(
                "{} {}",
                self.locale.text("flipped card", "カードをめくる"),
                position + 1
            ),
            Event::ResultRevealed { face, .. } => format!(
                "{} {face}",
                self.locale.text("result:", "結果:")
            ),
            Event::BgmStarted { channel } => format!(
                "{} {}",
                self.locale.text("music on:", "BGM再生:"),
                self.channel_label(*channel)
            ),
            Event::BgmStopped { channel } => format!(
                "{} {}",
                self.locale.text("music off:", "BGM停止:"),
                self.channel_label(*channel)
            ),
            Event::AudioFailed { channel, reason } => format!(
                "{} {}: {reason}",
                self.locale.text("audio failed", "音声エラー"),
                self.channel_label(*channel)
            ),
            Event::RoundCancelled { generation, dropped } => format!(
                "{} #{generation} ({dropped})",
                self.locale.text("cancelled round", "ラウンド中断")
            ),
            Event::CardDealt { .. }
            | Event::ShuffleSettled { .. }
            | Event::EffectEnded { .. }
            | Event::ParticleSpawned { .. }
            | Event::ParticleExpired { .. }
            | Event::SoundPlayed { .. } => return None,
        };
        Some(text)
    }

    pub fn flush_events(&mut self) {
        let drained: Vec<Event> = self.events.drain().collect();
        for event in drained {
            if let Event::ResultRevealed { face, .. } = &event {
                self.status_line = format!(
                    "{} {face}!",
                    self.locale.text("you got", "結果は")
                );
            }
            if let Some(line) = self.describe_event(&event) {
                self.push_event_line(line);
            }
        }
    }

    pub fn push_event_line(&mut self, line: String) {
        self.event_log.push_back(line);
        while self.event_log.len() > MAX_EVENT_LOG {
            self.event_log.pop_front();
        }
    }
}
