use anyhow::{Result, bail};
use log::info;
use plotters::prelude::*;

use crate::color::{generate_palette, trajectory_color};
use crate::config::PlotConfig;
use crate::pipeline::Analysis;
use crate::report::format_sci;

// ---------------------------------------------------------------------------
// MSD-vs-time chart
// ---------------------------------------------------------------------------

/// Render the bucketed MSD curve with error bars and the fitted line to an
/// SVG file.
pub fn render_msd_curve(config: &PlotConfig, analysis: &Analysis) -> Result<()> {
    let buckets = &analysis.buckets;
    let Some(last) = buckets.last() else {
        bail!("no MSD buckets to plot");
    };
    let t_max = last.elapsed;
    let fit = &analysis.fit;

    let mut y_max = buckets
        .iter()
        .map(|b| b.mean + b.sem)
        .fold(fit.predict(t_max), f64::max);
    let mut y_min = buckets
        .iter()
        .map(|b| b.mean - b.sem)
        .fold(0.0, f64::min);
    if config.show_observations {
        y_max = analysis
            .observations
            .iter()
            .map(|o| o.squared_displacement)
            .fold(y_max, f64::max);
    }
    y_min = y_min.min(fit.predict(t_max));
    if !(y_max > y_min) {
        y_max = y_min + 1.0;
    }
    let pad = 0.05 * (y_max - y_min);

    let root = SVGBackend::new(&config.output, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..t_max * 1.05, (y_min - pad)..(y_max + pad))?;

    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .y_label_formatter(&|v| format_sci(*v, 1))
        .draw()?;

    if config.show_observations {
        let palette = generate_palette(analysis.trajectories);
        for index in 0..analysis.trajectories {
            let color = trajectory_color(&palette, index);
            chart
                .draw_series(
                    analysis
                        .observations
                        .iter()
                        .filter(|o| o.trajectory == index)
                        .map(|o| {
                            Circle::new(
                                (o.elapsed, o.squared_displacement),
                                2,
                                color.mix(0.25).filled(),
                            )
                        }),
                )?
                .label(format!("trajetória {}", index + 1))
                .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
        }
    }

    let grey = RGBColor(128, 128, 128);
    chart.draw_series(buckets.iter().map(|b| {
        ErrorBar::new_vertical(
            b.elapsed,
            b.mean - b.sem,
            b.mean,
            b.mean + b.sem,
            grey.filled(),
            6,
        )
    }))?;

    chart
        .draw_series(LineSeries::new(
            buckets.iter().map(|b| (b.elapsed, b.mean)),
            &BLACK,
        ))?
        .label("DQM médio")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    chart
        .draw_series(LineSeries::new(
            [(0.0, 0.0), (t_max, fit.predict(t_max))],
            RED.stroke_width(2),
        ))?
        .label(format!("ajuste: a = {} m²/s", format_sci(fit.slope, 2)))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    info!("wrote {}", config.output.display());
    Ok(())
}
