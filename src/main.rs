//! Furnace Reline entry point
//!
//! Native: headless demo that lets the autopilot run the whole procedure and
//! logs each stage transition (`RUST_LOG=info`). An optional first argument
//! overrides the quality preset. Web: the library's
//! `WebSimulation` is driven from the page, so there is nothing to do here.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use furnace_reline::{QualityPreset, Settings};
    use furnace_reline::consts::SIM_DT;
    use furnace_reline::sim::{SimState, StageKind, TickInput, tick};

    /// Give up after ten simulated minutes
    const TICK_LIMIT: u64 = 10 * 60 * 60;

    env_logger::init();
    log::info!("Furnace Reline (native) starting...");

    let mut settings = Settings::load();
    // Optional quality override: `furnace-reline [low|medium|high]`
    if let Some(arg) = std::env::args().nth(1) {
        match QualityPreset::parse(&arg) {
            Some(preset) => settings.quality = preset,
            None => log::warn!(
                "Unknown quality '{}', keeping {}",
                arg,
                settings.quality.as_str()
            ),
        }
    }
    log::info!("Quality: {}", settings.quality.as_str());
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    let mut state = SimState::with_settings(seed, &settings);

    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };

    let mut last = state.stage.kind();
    let mut ticks = 0u64;
    while state.stage.kind() != StageKind::Victory && ticks < TICK_LIMIT {
        tick(&mut state, &input, SIM_DT);
        ticks += 1;

        let kind = state.stage.kind();
        if kind != last {
            println!(
                "[{:>7.2}s] {} -> {}",
                ticks as f32 * SIM_DT,
                last.as_str(),
                kind.as_str()
            );
            last = kind;
        }
    }

    if state.stage.kind() == StageKind::Victory {
        println!(
            "Relining complete in {:.1}s of simulated time (seed {})",
            ticks as f32 * SIM_DT,
            seed
        );
    } else {
        log::warn!(
            "Stopped in {} after {} ticks",
            state.stage.kind().as_str(),
            ticks
        );
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
