//! Headless demo runner.
//!
//! Plays a short built-in narrative script against the scripted playback
//! backend: a staging scene, a few typed lines with grading, a sound
//! with a fade-out and a terminal event. A scripted "typist" feeds the
//! text events at a configurable rate with occasional mistakes, so the
//! penalty policy and the grade tiers are visible in the log output.
//!
//! ```sh
//! RUST_LOG=info cargo run -- --seconds 30 --typist-rate 8
//! ```

use clap::Parser;
use glam::Vec2;
use log::{info, warn};

use keyline::events::gamestate::GameStateChangedEvent;
use keyline::resources::actions::{Action, ActionScheduler, Then};
use keyline::resources::gamestate::{GameStates, NextGameState};
use keyline::resources::playback::{Playback, SkeletonLibrary};
use keyline::resources::settings::{KeyAction, KeyBindings, Settings};
use keyline::resources::worldsignals::WorldSignals;
use keyline::timeline::{
    AudioEvent, DelayEvent, ErrorPolicy, GameEndEvent, StagingEvent, StagingStep, TextEvent,
};
use keyline::Stage;

#[derive(Parser, Debug)]
#[command(name = "keyline", about = "Narrative typing-game runtime demo")]
struct Args {
    /// Wall-clock cap on the demo run, in seconds
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// Fixed simulation tick, in milliseconds
    #[arg(long, default_value_t = 10.0)]
    tick_ms: f32,

    /// Keystrokes per second of the scripted typist
    #[arg(long, default_value_t = 8.0)]
    typist_rate: f32,

    /// Chance in [0, 1] that a keystroke is wrong
    #[arg(long, default_value_t = 0.05)]
    typo_chance: f32,

    /// Settings file for the persisted best score
    #[arg(long, default_value = "keyline-settings.json")]
    settings: String,

    /// Key-binding file; created with the defaults on first run
    #[arg(long, default_value = "keyline-keys.json")]
    keys: String,
}

fn library() -> SkeletonLibrary {
    let mut library = SkeletonLibrary::new();
    library.register(
        "spine/game/captain.json",
        [("stand", 1.0), ("walk", 0.8), ("salute", 1.2), ("blink", 0.2)],
    );
    library.register("spine/game/ensign.json", [("stand", 1.0), ("panic", 0.6)]);
    library
}

fn script(stage: &mut Stage) {
    let mut timeline = stage.timeline_mut();
    timeline
        .add(StagingEvent::new(vec![
            StagingStep::Spawn {
                name: "captain".to_string(),
                skeleton: "spine/game/captain.json".to_string(),
                animation: "stand".to_string(),
                position: Vec2::new(-200.0, 0.0),
                depth: 10,
            },
            StagingStep::Spawn {
                name: "ensign".to_string(),
                skeleton: "spine/game/ensign.json".to_string(),
                animation: "stand".to_string(),
                position: Vec2::new(200.0, 0.0),
                depth: 20,
            },
            StagingStep::MoveTo {
                name: "captain".to_string(),
                target: Vec2::new(0.0, 0.0),
                speed: 150.0,
            },
            StagingStep::AwaitArrival {
                name: "captain".to_string(),
            },
            StagingStep::SetAnimation {
                name: "captain".to_string(),
                track: 1,
                animation: "salute".to_string(),
                looped: false,
            },
            StagingStep::AwaitAnimation {
                name: "captain".to_string(),
                track: 1,
            },
            StagingStep::AddAnimation {
                name: "captain".to_string(),
                track: 2,
                animation: "blink".to_string(),
                looped: true,
                delay: 0.5,
                jitter: 2.0,
            },
        ]))
        .add(AudioEvent::play("sfx/alarm"))
        .add(TextEvent::new(
            "all hands brace for impact",
            6.0,
            ErrorPolicy::Penalize { seconds: 0.5 },
        ))
        .add(DelayEvent::new(1.0))
        .add(TextEvent::new(
            "reroute power to the forward shields",
            8.0,
            ErrorPolicy::Ignore,
        ))
        .add(StagingEvent::new(vec![
            StagingStep::SetAnimation {
                name: "ensign".to_string(),
                track: 1,
                animation: "panic".to_string(),
                looped: false,
            },
            StagingStep::AwaitSeconds(0.5),
            StagingStep::Despawn {
                name: "ensign".to_string(),
            },
        ]))
        .add(DelayEvent::new(1.5))
        .add(GameEndEvent);
}

/// Type the next expected character of the current prompt, sometimes
/// fumbling it.
fn typist_stroke(stage: &mut Stage, typo_chance: f32) {
    let (prompt, typed) = {
        let signals = stage.world().resource::<WorldSignals>();
        let prompt = signals.get_string("text_prompt").cloned().unwrap_or_default();
        let typed = signals.get_integer("text_typed").unwrap_or(0) as usize;
        (prompt, typed)
    };
    let Some(next) = prompt.chars().nth(typed) else {
        return;
    };
    let ch = if fastrand::f32() < typo_chance {
        // a miss that is never accidentally correct
        if next == 'q' { 'w' } else { 'q' }
    } else {
        next
    };
    stage.key_typed(ch);
    stage.key_down(ch as i32);
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::open(&args.settings)?;
    let best_score = settings.get_int("best_score", 0);
    info!("best score so far: {}", best_score);

    let keys_path = std::path::Path::new(&args.keys);
    let bindings = KeyBindings::load(keys_path)?;
    if !keys_path.exists() {
        bindings.save(keys_path)?;
        info!("wrote default key bindings to {}", args.keys);
    }
    for action in KeyAction::ALL {
        info!("binding: {} -> {}", action.name(), bindings.key_for(action));
    }

    let mut stage = Stage::with_tick(Playback::scripted(library()), args.tick_ms / 1000.0);
    stage.world_mut().insert_resource(bindings);
    script(&mut stage);

    stage
        .world_mut()
        .resource_mut::<NextGameState>()
        .set(GameStates::Playing);
    stage.world_mut().trigger(GameStateChangedEvent {});

    // fade the alarm out over the back half of the run
    stage
        .world_mut()
        .resource_mut::<ActionScheduler>()
        .schedule(
            Action::SoundFade {
                sound: "sfx/alarm".to_string(),
                duration: args.seconds * 0.5,
                life: 0.0,
            },
            Then::Nothing,
        );

    let frame_delta = 1.0 / 60.0;
    let mut elapsed = 0.0_f32;
    let mut typist_budget = 0.0_f32;

    while elapsed < args.seconds && !stage.is_finished() {
        stage.advance(frame_delta);
        elapsed += frame_delta;

        typist_budget += args.typist_rate * frame_delta;
        while typist_budget >= 1.0 {
            typist_budget -= 1.0;
            typist_stroke(&mut stage, args.typo_chance);
        }

        for grade in stage.drain_grades() {
            info!("line graded {:?} ({:.2}s to spare)", grade.grade, grade.remaining);
        }
        for cmd in stage.drain_audio() {
            info!("audio: {:?}", cmd);
        }
    }

    let score = stage
        .world()
        .resource::<WorldSignals>()
        .get_integer("score")
        .unwrap_or(0) as i64;
    info!("final score: {}", score);
    if stage.is_finished() {
        info!("script finished after {:.1}s", elapsed);
    } else {
        warn!("hit the time cap before the script finished");
    }

    if score > best_score {
        settings.put_int("best_score", score);
        settings.flush()?;
        info!("new best score saved");
    }
    Ok(())
}
