//! Spacewar headless runner
//!
//! Flies an autopiloted session at a fixed frame time, logs sound cues and
//! appends the result to the score log.
//!
//! Usage: `spacewar [settings.json]` (verbosity via `RUST_LOG`)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use spacewar::audio::{LogSink, dispatch};
    use spacewar::scores::{best, rank_of};
    use spacewar::sim::{GameState, TickInput, tick};
    use spacewar::{ScoreLog, Settings};

    env_logger::init();
    log::info!("Spacewar (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".to_string());
    let settings = Settings::load(&settings_path);

    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut state = GameState::new(seed, settings.playfield());
    log::info!("Game initialized with seed: {}", seed);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let dt = settings.clamp_dt(1.0 / 60.0);
    let mut sink = LogSink::new(!settings.sound_effects);

    let mut frames = 0;
    while frames < settings.demo_frames && !state.is_over() {
        tick(&mut state, &input, dt);
        dispatch(&state.drain_events(), &mut sink);
        frames += 1;
    }

    let score_log = ScoreLog::new(&settings.score_log);
    let Some(record) = state.session_record(chrono::Utc::now()) else {
        println!(
            "Stopped after {} frames at level {} with score {}",
            frames,
            state.level().id,
            state.score
        );
        return;
    };

    // Rank against earlier sessions before adding this one
    let history = score_log.load().unwrap_or_else(|e| {
        log::warn!("Could not read score history: {}", e);
        Vec::new()
    });
    score_log.record(&record);

    println!(
        "{:?} after {} frames with score {} (rank {} of {}, best {})",
        record.outcome,
        frames,
        record.score,
        rank_of(&history, record.score),
        history.len() + 1,
        best(&history).map_or(record.score, |b| b.max(record.score)),
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the host page on the web
}
