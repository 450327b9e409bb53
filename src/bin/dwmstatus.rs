//! dwmstatus - system metrics on the dwm status bar.
//!
//! Samples once per second and stores the rendered line as the X root
//! window name.

use anyhow::Context;
use dwmstatus::prelude::*;
use tracing::error;

fn main() -> anyhow::Result<()> {
    dwmstatus::logging::init();

    let publisher = RootWindowPublisher::connect()
        .map_err(|e| {
            error!(error = %e, "cannot open display");
            e
        })
        .context("dwmstatus: cannot open display")?;

    let mut app = App::new(Config::new(), publisher);
    app.run().context("dwmstatus: lost the display")?;

    Ok(())
}
