//! Pocket Artillery entry point
//!
//! Headless build: an autopilot stands in for the human player(s) and the
//! match is reported as text. Windowed frontends plug in through
//! `pocket_artillery::frontend::Frontend`.

use clap::Parser;
use pocket_artillery::frontend::{AutoPilot, ConsoleFrontend};
use pocket_artillery::sim::PerSide;
use pocket_artillery::{App, Cli};

fn main() {
    env_logger::init();
    log::info!("Pocket Artillery (headless) starting...");

    let mut settings = Cli::parse().settings();
    let seed = settings.resolved_seed();
    settings.seed = Some(seed);
    log::debug!("{:?}", settings);

    // Skips whichever side the planner is driving
    let pilot = AutoPilot::new(seed ^ 0x9e37_79b9_7f4a_7c15, PerSide::new(true, true));
    let console = ConsoleFrontend::new(
        pilot,
        settings.render_every,
        settings.view_cols,
        settings.view_rows,
        std::io::stdout(),
    );

    let mut app = App::new(&settings, console);
    app.run();
}
