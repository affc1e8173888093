use sugoroku_core::{
    is_permutation, ControllerConfig, DisplayState, Effect, Event, EventBus, Face, GameController,
    GameError, MutedAudio, ResultView, RngState, SelectOutcome, SilentAudio,
};

fn controller(seed: u64) -> GameController {
    GameController::new(
        ControllerConfig::default(),
        Box::new(SilentAudio::new()),
        RngState::from_seed(seed),
    )
    .expect("controller")
}

/// Controller after the startup shuffle has fully settled.
fn settled(seed: u64) -> (GameController, EventBus) {
    let mut game = controller(seed);
    let mut events = EventBus::default();
    game.shuffle(&mut events);
    game.run_until_idle(&mut events);
    events.drain().for_each(drop);
    (game, events)
}

fn position_of(game: &GameController, value: u8) -> usize {
    game.cards()
        .iter()
        .position(|card| card.face.value() == value)
        .expect("face present")
}

fn count<F: Fn(&Event) -> bool>(events: &mut EventBus, pred: F) -> usize {
    events.drain().filter(|event| pred(event)).count()
}

#[test]
fn shuffle_unlocks_with_a_permutation_after_1200ms() {
    let (mut game, mut events) = settled(1);
    game.select_card(0, &mut events).expect("select");
    game.run_until_idle(&mut events);
    assert!(game.is_locked());

    game.shuffle(&mut events);
    game.advance(1199, &mut events);
    assert!(game.is_locked());
    assert!(!game.grid_interactive());
    game.advance(1, &mut events);
    assert!(!game.is_locked());
    assert!(game.grid_interactive());
    assert!(is_permutation(&game.faces()));
}

#[test]
fn every_completed_shuffle_is_a_permutation() {
    for seed in 0..200 {
        let mut game = controller(seed);
        let mut events = EventBus::default();
        let dealt = game.shuffle(&mut events);
        game.run_until_idle(&mut events);
        assert!(is_permutation(&game.faces()), "seed {seed}");
        assert_eq!(game.faces(), dealt.to_vec());
    }
}

#[test]
fn shuffle_staggers_each_card_by_100ms() {
    let mut game = controller(3);
    let mut events = EventBus::default();
    let dealt = game.shuffle(&mut events);
    for position in 0..6u64 {
        game.advance_to(position * 100, &mut events);
        let card = game.card(position as usize).expect("card");
        assert_eq!(card.display_state(), DisplayState::Shuffling);
        assert_eq!(card.face, dealt[position as usize]);
        if let Some(next) = game.card(position as usize + 1) {
            assert!(!next.markers.shuffling, "card {} dealt early", position + 1);
        }
    }
    for position in 0..6u64 {
        game.advance_to(position * 100 + 799, &mut events);
        assert!(game.card(position as usize).expect("card").markers.shuffling);
        game.advance_to(position * 100 + 800, &mut events);
        assert!(!game.card(position as usize).expect("card").markers.shuffling);
    }
    assert!(game.is_idle());
}

#[test]
fn shuffle_hides_result_immediately() {
    let (mut game, mut events) = settled(4);
    game.select_card(2, &mut events).expect("select");
    game.run_until_idle(&mut events);
    assert!(game.result().is_visible());
    game.shuffle(&mut events);
    assert_eq!(game.result(), ResultView::Hidden);
}

#[test]
fn selected_card_reveals_its_face_at_2500ms() {
    let (mut game, mut events) = settled(9);
    let position = position_of(&game, 4);
    game.select_card(position, &mut events).expect("select");
    game.advance(2499, &mut events);
    assert_eq!(game.result(), ResultView::Hidden);
    game.advance(1, &mut events);
    assert_eq!(
        game.result(),
        ResultView::Showing {
            position,
            face: Face::new(4).expect("face"),
        }
    );
    assert!(!game.grid_interactive());
}

#[test]
fn selection_markers_follow_the_timeline() {
    let (mut game, mut events) = settled(12);
    let t0 = game.now_ms();
    game.select_card(1, &mut events).expect("select");
    let card = |game: &GameController| game.card(1).expect("card").markers.clone();

    assert!(card(&game).selected);
    assert!(card(&game).effect.is_some());
    assert!(!card(&game).drumroll);

    game.advance_to(t0 + 499, &mut events);
    assert!(!card(&game).drumroll);
    game.advance_to(t0 + 500, &mut events);
    assert!(card(&game).drumroll);

    game.advance_to(t0 + 1999, &mut events);
    assert!(!card(&game).flipped);
    game.advance_to(t0 + 2000, &mut events);
    let markers = card(&game);
    assert!(markers.flipped);
    assert!(markers.effect.is_none());
    assert!(!markers.drumroll);
    assert!(markers.selected);
    assert_eq!(
        game.card(1).expect("card").display_state(),
        DisplayState::Flipped
    );
}

#[test]
fn effect_end_fires_before_flip_at_the_same_instant() {
    let (mut game, mut events) = settled(13);
    game.select_card(5, &mut events).expect("select");
    game.advance(2000, &mut events);
    let order: Vec<Event> = events
        .drain()
        .filter(|event| matches!(event, Event::EffectEnded { .. } | Event::CardFlipped { .. }))
        .collect();
    assert_eq!(
        order,
        vec![
            Event::EffectEnded { position: 5 },
            Event::CardFlipped { position: 5 },
        ]
    );
}

#[test]
fn second_selection_is_ignored_while_locked() {
    let (mut game, mut events) = settled(21);
    let first = game.select_card(0, &mut events).expect("select");
    assert!(matches!(first, SelectOutcome::Started { .. }));
    let second = game.select_card(3, &mut events).expect("select");
    assert_eq!(second, SelectOutcome::Ignored);
    let again = game.select_card(0, &mut events).expect("select");
    assert_eq!(again, SelectOutcome::Ignored);
    assert!(!game.card(3).expect("card").markers.selected);

    game.run_until_idle(&mut events);
    let drained: Vec<Event> = events.drain().collect();
    let selected = drained
        .iter()
        .filter(|event| matches!(event, Event::CardSelected { .. }))
        .count();
    let revealed = drained
        .iter()
        .filter(|event| matches!(event, Event::ResultRevealed { .. }))
        .count();
    assert_eq!(selected, 1);
    assert_eq!(revealed, 1);
}

#[test]
fn lock_holds_through_the_whole_round_and_after_reveal() {
    let (mut game, mut events) = settled(22);
    let t0 = game.now_ms();
    game.select_card(4, &mut events).expect("select");
    for step in [1u64, 499, 500, 1500, 2000, 2499, 2500, 4000] {
        game.advance_to(t0 + step, &mut events);
        let pending = game.pending_tasks();
        let markers: Vec<_> = game.cards().iter().map(|c| c.markers.clone()).collect();
        let outcome = game.select_card(1, &mut events).expect("select");
        assert_eq!(outcome, SelectOutcome::Ignored, "at {step}ms");
        assert_eq!(game.pending_tasks(), pending);
        let after: Vec<_> = game.cards().iter().map(|c| c.markers.clone()).collect();
        assert_eq!(markers, after);
    }
    assert!(game.is_locked());
}

macro_rules! reveal_case {
    ($name:ident, $position:expr) => {
        #[test]
        fn $name() {
            for seed in 0..20 {
                let (mut game, mut events) = settled(seed);
                let face = game.card($position).expect("card").face;
                game.select_card($position, &mut events).expect("select");
                game.run_until_idle(&mut events);
                assert_eq!(game.result().face(), Some(face));
                assert!(events.drain().any(|event| event
                    == Event::ResultRevealed {
                        position: $position,
                        face
                    }));
            }
        }
    };
}

reveal_case!(reveal_matches_card_0, 0);
reveal_case!(reveal_matches_card_1, 1);
reveal_case!(reveal_matches_card_2, 2);
reveal_case!(reveal_matches_card_3, 3);
reveal_case!(reveal_matches_card_4, 4);
reveal_case!(reveal_matches_card_5, 5);

#[test]
fn effects_are_chosen_uniformly() {
    let mut game = controller(0xC0FFEE);
    let mut events = EventBus::default();
    let trials = 5_000;
    let mut counts = [0usize; 5];
    for round in 0..trials {
        game.shuffle(&mut events);
        game.advance(1200, &mut events);
        match game.select_card(round % 6, &mut events).expect("select") {
            SelectOutcome::Started { effect } => counts[effect.id() as usize - 1] += 1,
            SelectOutcome::Ignored => panic!("round {round} was still locked"),
        }
        events.drain().for_each(drop);
    }
    for (idx, hits) in counts.iter().enumerate() {
        let freq = *hits as f64 / trials as f64;
        assert!(
            (0.17..0.23).contains(&freq),
            "effect {:?} frequency {freq}",
            Effect::from_id(idx as u8 + 1)
        );
    }
}

#[test]
fn shuffle_mid_round_cancels_the_pending_reveal() {
    let (mut game, mut events) = settled(30);
    game.select_card(2, &mut events).expect("select");
    game.advance(1000, &mut events);
    events.drain().for_each(drop);

    game.shuffle(&mut events);
    assert_eq!(
        count(&mut events, |event| matches!(
            event,
            Event::RoundCancelled { dropped: 3, .. }
        )),
        1
    );
    game.run_until_idle(&mut events);
    assert_eq!(
        count(&mut events, |event| matches!(
            event,
            Event::ResultRevealed { .. } | Event::CardFlipped { .. }
        )),
        0
    );
    assert_eq!(game.result(), ResultView::Hidden);
    assert!(game
        .cards()
        .iter()
        .all(|card| card.display_state() == DisplayState::Idle));
    assert!(!game.is_locked());
}

#[test]
fn overlapping_shuffles_leave_the_last_permutation() {
    let mut game = controller(31);
    let mut events = EventBus::default();
    game.shuffle(&mut events);
    game.advance(250, &mut events);
    let last = game.shuffle(&mut events);
    game.run_until_idle(&mut events);
    assert_eq!(game.faces(), last.to_vec());
    assert!(game.cards().iter().all(|card| !card.markers.shuffling));
    assert!(!game.is_locked());
}

#[test]
fn selection_is_ignored_while_a_shuffle_is_dealing() {
    let (mut game, mut events) = settled(32);
    assert!(!game.is_locked());
    game.shuffle(&mut events);
    game.advance(50, &mut events);
    events.drain().for_each(drop);

    assert_eq!(game.select_card(5, &mut events), Ok(SelectOutcome::Ignored));
    assert_eq!(
        count(&mut events, |event| matches!(
            event,
            Event::SelectionIgnored { position: 5 }
        )),
        1
    );
    game.run_until_idle(&mut events);
    assert_eq!(
        count(&mut events, |event| matches!(
            event,
            Event::ResultRevealed { .. } | Event::CardFlipped { .. }
        )),
        0
    );
    assert!(game.cards().iter().all(|card| !card.markers.selected));

    let face = game.card(5).expect("card").face;
    assert!(matches!(
        game.select_card(5, &mut events),
        Ok(SelectOutcome::Started { .. })
    ));
    game.run_until_idle(&mut events);
    let card = game.card(5).expect("card");
    assert_eq!(card.face, face);
    assert!(card.is_face_up());
    assert_eq!(game.result().face(), Some(face));
}

#[test]
fn startup_shuffle_locks_until_unlock() {
    let mut game = controller(33);
    let mut events = EventBus::default();
    game.shuffle(&mut events);
    assert!(game.is_locked());
    assert_eq!(game.select_card(0, &mut events), Ok(SelectOutcome::Ignored));
    game.advance(1199, &mut events);
    assert_eq!(game.select_card(0, &mut events), Ok(SelectOutcome::Ignored));
    game.advance(1, &mut events);
    assert!(matches!(
        game.select_card(0, &mut events),
        Ok(SelectOutcome::Started { .. })
    ));
}

#[test]
fn round_completes_even_when_audio_is_denied() {
    let mut game = GameController::new(
        ControllerConfig::default(),
        Box::new(MutedAudio),
        RngState::from_seed(40),
    )
    .expect("controller");
    let mut events = EventBus::default();
    game.shuffle(&mut events);
    game.run_until_idle(&mut events);
    events.drain().for_each(drop);
    game.select_card(0, &mut events).expect("select");
    game.run_until_idle(&mut events);
    assert!(game.result().is_visible());
    let failures = count(&mut events, |event| matches!(event, Event::AudioFailed { .. }));
    // card flip, drum roll, fanfare
    assert_eq!(failures, 3);
}

#[test]
fn unknown_card_is_an_error() {
    let (mut game, mut events) = settled(41);
    assert_eq!(
        game.select_card(6, &mut events),
        Err(GameError::UnknownCard(6))
    );
    assert!(!game.is_locked());
}

#[test]
fn construction_rejects_invalid_config() {
    let config = ControllerConfig {
        card_count: 7,
        ..ControllerConfig::default()
    };
    let built = GameController::new(config, Box::new(SilentAudio::new()), RngState::from_seed(1));
    assert!(matches!(built, Err(GameError::InvalidConfig(_))));
}
