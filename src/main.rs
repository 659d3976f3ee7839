//! Chromask entry point
//!
//! On the web the library's `wasm_start` does the setup and the host page
//! drives `GameScene`. Natively this runs a headless demo climb.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use chromask::consts::SIM_DT;
    use chromask::settings::{MemoryStore, Settings};
    use chromask::sim::TickInput;
    use chromask::view::NullPresenter;
    use chromask::{GameScene, Tuning};

    env_logger::init();
    log::info!("Chromask (native) starting headless demo...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let tuning = args
        .next()
        .map(|json| Tuning::from_json(&json))
        .unwrap_or_default();

    let settings = Settings::load(&MemoryStore::default());
    let mut scene = GameScene::new(settings.difficulty, tuning, seed, NullPresenter);
    scene.on_create();

    let demo = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    const MAX_FRAMES: u32 = 60 * 60 * 3;
    let delta_ms = SIM_DT * 1000.0;

    for frame in 0..MAX_FRAMES {
        if let Some(over) = scene.on_frame(delta_ms, &demo) {
            log::info!("Demo run ended at frame {frame} with score {}", over.score);
            println!("score: {}", over.score);
            return;
        }
    }

    let score = scene.state().map(|s| s.score).unwrap_or(0);
    log::info!("Demo run still alive after {MAX_FRAMES} frames, score {score}");
    println!("score: {score}");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start, this is just to satisfy the compiler
}
