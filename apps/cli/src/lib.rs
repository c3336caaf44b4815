pub mod settings;
pub mod shell;
pub mod store;

use hsk_core::{
    build_pool, practice_unlocked, CardDeck, KnownSet, Lexicon, Mode, Phase, Progress, QuizSession,
    PRACTICE_UNLOCK_THRESHOLD,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::{Practice, Settings};
use crate::store::KnownFile;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "loaded settings");

    let lexicon = Lexicon::hsk1()?;
    let mut known = KnownFile::load(&settings.known_file)?;

    let mut lines = shell::stdin_lines();

    // The dictionary is always open; it is where words get marked.
    if settings.practice != Practice::Dict {
        let progress = Progress::of(&lexicon, &known);
        println!(
            "You know {}% of the words ({}/{})",
            progress.percent, progress.known, progress.total
        );

        if settings.session.mode != Mode::Learn && !practice_unlocked(&known) {
            println!(
                "Mark at least {} words as known first (HSK_PRACTICE=dict), or start in learn mode (HSK_MODE=learn).",
                PRACTICE_UNLOCK_THRESHOLD
            );
            return Ok(());
        }
    }

    let mut rng = StdRng::from_entropy();

    match settings.practice {
        Practice::Cards => {
            let mut deck = CardDeck::prepare(&lexicon, &known, settings.session.mode, &mut rng);
            let passed = shell::run_cards(&mut deck, &mut known, &mut lines).await?;
            println!("Cards passed: {passed}");
        }
        Practice::Dict => shell::run_dict(&lexicon, &mut known, &mut lines).await?,
        Practice::Test => {
            let pool = build_pool(&lexicon, &known, &settings.session, &mut rng)?;
            let mut session = QuizSession::start(lexicon, pool, settings.session.clone())?;
            let result = shell::run_quiz(&mut session, &mut known, &mut lines).await?;

            let headline = match result.outcome {
                Phase::Completed => "Test passed!",
                Phase::Aborted => "Test stopped.",
                _ => "Test failed!",
            };
            println!("\n{headline}");
            println!("Answered correctly: {}/{}", result.correct, result.total);
            println!("Seconds spent: {}", result.elapsed_seconds);
        }
    }

    known.save()?;
    tracing::info!(known = known.len(), path = %known.path().display(), "progress saved");
    Ok(())
}
