mod app;
mod render;
mod sim;
mod vec;

use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::App;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,glyph_rain=debug"));
    fmt().with_env_filter(filter).with_target(false).init();

    let mut app = App::new()?;
    let mut last = Instant::now();

    while app.is_running() {
        app.input()?;

        let now = Instant::now();
        let elapsed = now.duration_since(last).as_secs_f64();
        last = now;

        app.update(elapsed);
        app.render();

        // Keep the loop from spinning flat out; the effect does not need
        // more frames than this yields.
        thread::sleep(Duration::from_millis(1));
    }

    Ok(())
}
