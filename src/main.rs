use std::path::Path;

use anyhow::Result;

use perrin_avogadro::config::{CONFIG_FILE, Config};
use perrin_avogadro::{pipeline, plot, report};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load_or_default(Path::new(CONFIG_FILE))?;
    let analysis = pipeline::run(&config)?;

    println!("{}", report::summary_line(&analysis.estimate));

    plot::render_msd_curve(&config.plot, &analysis)?;
    if let Some(path) = &config.report {
        report::write_json(path, &analysis)?;
    }
    Ok(())
}
