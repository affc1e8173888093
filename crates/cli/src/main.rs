mod auto;

use auto::{run_rounds, AutoReport};
use log::info;
use sugoroku_core::{
    AudioBackend, Effect, Face, GameController, MutedAudio, RngState, SilentAudio,
};
use sugoroku_cui::{parse_options, resolve_app_options, LaunchOptions, UiLocale};

const DEFAULT_AUTO_ROUNDS: u32 = 100;

#[derive(Debug, Clone)]
struct CliOptions {
    auto: Option<u32>,
    json: bool,
    launch: LaunchOptions,
}

/// Picks out the launcher's own flags and leaves the rest to the terminal UI
/// parser, so both binaries accept the same launch flags.
fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut auto = None;
    let mut json = false;
    let mut rest = Vec::with_capacity(args.len());
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--cui" => auto = None,
            "--auto" => {
                let rounds = args
                    .get(idx + 1)
                    .and_then(|value| value.parse::<u32>().ok());
                if rounds.is_some() {
                    idx += 1;
                }
                auto = Some(rounds.unwrap_or(DEFAULT_AUTO_ROUNDS));
            }
            "--json" => json = true,
            _ => rest.push(args[idx].clone()),
        }
        idx += 1;
    }
    CliOptions {
        auto,
        json,
        launch: parse_options(&rest),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    match options.auto {
        Some(rounds) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
            if let Err(err) = run_auto(&options, rounds) {
                eprintln!("auto run error: {err}");
                std::process::exit(1);
            }
        }
        None => {
            if let Err(err) = sugoroku_cui::run(options.launch) {
                eprintln!("cui launch error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}

fn run_auto(options: &CliOptions, rounds: u32) -> anyhow::Result<()> {
    let app_options = resolve_app_options(&options.launch)?;
    let rng = match app_options.seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    };
    let mut picker = RngState::from_seed(rng.seed().wrapping_add(1));
    let audio: Box<dyn AudioBackend> = if app_options.mute {
        Box::new(MutedAudio)
    } else {
        Box::new(SilentAudio::new())
    };
    let mut game = GameController::new(app_options.config, audio, rng)?;
    info!("headless run: {rounds} rounds, seed {}", game.seed());

    let locale = app_options.locale;
    let json = options.json;
    let report = run_rounds(&mut game, &mut picker, rounds, |line| {
        if json {
            match serde_json::to_string(&line) {
                Ok(body) => println!("{body}"),
                Err(err) => eprintln!("serialize error: {err}"),
            }
        } else if let sugoroku_core::Event::ResultRevealed { position, face } = line.event {
            println!(
                "{} {:>4} @{:>8}ms  {} {}  -> {}",
                locale.text("round", "ラウンド"),
                line.round,
                line.at_ms,
                locale.text("card", "カード"),
                position + 1,
                face
            );
        }
    })?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        print_summary(&report, locale);
    }
    Ok(())
}

fn print_summary(report: &AutoReport, locale: UiLocale) {
    println!(
        "{}: {}  {}: {}  {}: {}",
        locale.text("seed", "シード"),
        report.seed,
        locale.text("rounds", "ラウンド数"),
        report.rounds.len(),
        locale.text("audio failures", "音声エラー"),
        report.audio_failures
    );
    println!("{}", locale.text("effects:", "演出:"));
    for effect in Effect::ALL {
        println!(
            "  {} {:<24} {:>6.2}%",
            effect.id(),
            effect.description(),
            report.effect_frequency(effect) * 100.0
        );
    }
    println!("{}", locale.text("faces:", "出目:"));
    let total = report.rounds.len().max(1) as f64;
    for face in Face::all() {
        let hits = report.face_counts.get(&face.value()).copied().unwrap_or(0);
        println!("  {} {:>6.2}%", face, f64::from(hits) / total * 100.0);
    }
}
