//! Donut Split entry point
//!
//! On the web this mounts the chart into `#donut-chart`. Natively it renders
//! the chart, simulates a drag and prints the resulting SVG.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }

    log::info!("Donut Split starting...");
    match donut_split::platform::ChartHandle::mount("donut-chart") {
        // The chart lives as long as the page
        Ok(handle) => std::mem::forget(handle),
        Err(err) => log::error!("Failed to mount chart: {err}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Donut Split (native) starting...");

    if let Err(err) = run_demo() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Build the chart, drag boundary 2 to 100 degrees and print the SVG
#[cfg(not(target_arch = "wasm32"))]
fn run_demo() -> Result<(), Box<dyn std::error::Error>> {
    use donut_split::chart::{Chart, ScreenRect};
    use donut_split::renderer::{MountedChart, Scene, SvgDocument};
    use donut_split::{ChartConfig, polar_to_cartesian};

    let config = match std::env::args().nth(1) {
        Some(path) => ChartConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ChartConfig::default(),
    };
    let mut chart = Chart::new(config)?;

    let mut doc = SvgDocument::new();
    let Ok(mounted) = MountedChart::mount(&mut doc, &Scene::from_chart(&chart));

    // Pretend the chart sits at the top-left of the screen at 1:1 scale
    let view_box = chart.config().view_box;
    let rect = ScreenRect::new(0.0, 0.0, view_box, view_box);
    if chart.press(2, rect) {
        let pointer = polar_to_cartesian(rect.center(), view_box / 3.0, 100.0);
        if let Some(patch) = chart.pointer_move(pointer) {
            let Ok(()) = mounted.apply(&mut doc, &patch);
            log::info!("Boundary {} moved to {:.1}", patch.boundary, patch.angle);
        }
        chart.release();
    }

    print!("{}", doc.render());
    Ok(())
}
