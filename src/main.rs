//! Palace Run entry point
//!
//! The playable build is the wasm library (`WebGame`). Natively this runs a
//! short scripted session headlessly so the simulation can be watched in the
//! log: `RUST_LOG=debug palace-run [settings.json]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use palace_run::consts::FRAME_MS;
    use palace_run::sim::Viewport;
    use palace_run::{Runner, Settings};

    env_logger::init();
    log::info!("Palace Run (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::from_file(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Could not load settings from {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut runner = Runner::new(settings, Viewport::new(800.0, 600.0));

    // Start, walk right off the ledge, hop once, then idle out ten seconds
    let script: [(&str, bool, u32); 6] = [
        ("Enter", true, 1),
        ("ArrowRight", true, 90),
        ("Space", true, 20),
        ("Space", false, 1),
        ("ArrowRight", false, 1),
        ("KeyQ", true, 600),
    ];

    for (code, down, frames) in script {
        if down {
            runner.key_down(code);
        } else {
            runner.key_up(code);
        }
        for _ in 0..frames {
            runner.advance(FRAME_MS);
        }
        let actor = runner.session().actor();
        log::info!(
            "after {:>3} frames of {:<10} actor at ({:.1}, {:.1}) on_ground={}",
            frames,
            code,
            actor.pos.x,
            actor.pos.y,
            actor.on_ground
        );
    }

    let hud = runner.hud();
    log::info!(
        "Level {} | lives {} | time {} | {:?}",
        hud.level,
        hud.lives,
        hud.clock,
        hud.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::init, this is just to satisfy the compiler
}
