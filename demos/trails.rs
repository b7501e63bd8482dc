//! # Line Trails Demo
//!
//! Opens a window with animated line trails and the control panel.
//!
//! ## Usage:
//! ```bash
//! cargo run --example trails
//! cargo run --example trails -- line_count=120 projector=xy palette=rainbow
//! RUST_LOG=debug cargo run --example trails
//! ```
//!
//! Arguments are `name=value` pairs. `projector`, `depth_effect` and `palette`
//! select a strategy by name; every other name is a tunable parameter.
//!
//! ## Keys:
//! - `H` toggles the control panel
//! - `Space` pauses and resumes
//! - `Esc` quits

use anyhow::Context;
use linetrails::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = linetrails::default()?;
    for arg in std::env::args().skip(1) {
        let (name, value) = arg
            .split_once('=')
            .with_context(|| format!("expected name=value, got '{}'", arg))?;
        let manager = app.manager_mut();
        match name {
            "projector" => manager.select_projector(value.parse()?),
            "depth_effect" => manager.select_depth_effect(value.parse()?),
            "palette" => manager.select_palette(value.parse()?),
            _ => {
                let value: f64 = value
                    .parse()
                    .with_context(|| format!("{} needs a number, got '{}'", name, value))?;
                manager.set_parameter_by_name(name, value)?;
            }
        }
    }

    app.run()?;
    Ok(())
}
