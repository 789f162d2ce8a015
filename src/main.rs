//! Neon Maze - headless runner
//!
//! Plays a bot-driven session at a steady 60 Hz frame cadence, then records
//! the run on the high-score table.

use std::path::PathBuf;

use clap::Parser;

use neon_maze::consts::SIM_STEP;
use neon_maze::session::sanitize_name;
use neon_maze::sim::GamePhase;
use neon_maze::{HighScores, LogAudio, Session, Settings, Tuning};

/// Command-line options
#[derive(Debug, Parser)]
#[command(name = "neon-maze", about = "Fog-of-war maze chase, played by the path-finding bot")]
struct Args {
    /// Maze seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated seconds to play
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,
    /// Game balance JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// High-score JSON file
    #[arg(long, default_value = "highscores.json")]
    scores: PathBuf,
    /// Leaderboard name (falls back to the saved name, then "BOT")
    #[arg(long)]
    name: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let tuning = args
        .tuning
        .as_deref()
        .map(Tuning::load_or_default)
        .unwrap_or_default();
    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let scores = HighScores::load_or_default(&args.scores);
    let seed = args.seed.unwrap_or_else(rand::random);

    log::info!("Neon Maze starting (seed {}, {}s)", seed, args.seconds);

    let audio = LogAudio::new(&settings);
    let mut session = Session::new(seed, tuning, &settings, audio, scores);
    session.set_bot(true);
    session.start();

    let frames = (args.seconds / SIM_STEP.as_secs_f64()).ceil() as u64;
    let mut last_level = 1;
    for _ in 0..frames {
        session.frame(SIM_STEP);
        let state = session.state();
        if state.level != last_level {
            last_level = state.level;
            log::info!(
                "Reached level {} at {:.1}s with {} lives",
                state.level,
                state.game_time,
                state.lives
            );
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let state = session.state();
    let stats = session.scene().stats;
    log::info!(
        "Run over: {} levels in {:.1}s, {:.2} levels/min, score {:.2}",
        state.levels_cleared(),
        stats.elapsed,
        stats.levels_per_minute,
        stats.score
    );

    // A run cut short by the time limit is scored like a lost one
    if state.phase != GamePhase::GameOver {
        session.state_mut().phase = GamePhase::GameOver;
    }
    let name = args
        .name
        .or_else(|| (!settings.player_name.is_empty()).then(|| settings.player_name.clone()))
        .unwrap_or_else(|| "BOT".to_string());
    if session.scores().qualifies(stats.score) {
        log::info!("Score {:.2} is good enough for the leaderboard", stats.score);
    }
    match session.submit_score(&name) {
        Some(rank) => log::info!("{} placed #{} on the leaderboard", name, rank),
        None => log::info!("{} did not make the leaderboard", name),
    }

    // Remember the name for the next run
    if let Some(name) = sanitize_name(&name) {
        settings.set_player_name(&name);
    }
    if let Some(path) = &args.settings {
        if let Err(e) = settings.save(path) {
            log::error!("Failed to save settings to {}: {}", path.display(), e);
        }
    }

    let (audio, scores) = session.into_parts();
    log::debug!("{} sound cues played", audio.played);
    if let Err(e) = scores.save(&args.scores) {
        log::error!("Failed to save high scores to {}: {}", args.scores.display(), e);
    }
    for (i, entry) in scores.top_scores(10).iter().enumerate() {
        log::info!(
            "{:>2}. {:<10} {:>3} levels {:>7.1}s {:>6.2} lpm {:>8.2}",
            i + 1,
            entry.name,
            entry.levels,
            entry.time,
            entry.lpm,
            entry.score
        );
    }
}
