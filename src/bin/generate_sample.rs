use perrin_avogadro::analysis::avogadro::PhysicalParams;
use perrin_avogadro::data::synth::{SimpleRng, WalkSpec, brownian_walk};

/// Reference value the synthetic walks are built from.
const AVOGADRO: f64 = 6.022e23;

fn main() {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let params = PhysicalParams::default();

    // Perrin recorded positions every 30 s.
    let spec = WalkSpec {
        samples: 50,
        dt: 30.0,
        diffusion: params.diffusion_for(AVOGADRO),
    };

    for i in 1..=3 {
        let output_path = format!("traj{i}.txt");
        let walk = brownian_walk(format!("traj{i}"), spec, &mut rng)
            .expect("Failed to generate walk");

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&output_path)
            .expect("Failed to create output file");
        for s in walk.samples() {
            writer
                .serialize((s.t, s.x, s.y))
                .expect("Failed to write sample");
        }
        writer.flush().expect("Failed to flush output file");

        println!(
            "Wrote {} samples (D = {:.3e} m²/s) to {output_path}",
            walk.len(),
            spec.diffusion
        );
    }
}
