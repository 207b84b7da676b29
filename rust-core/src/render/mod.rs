//! Diagnostic plot of an alpha peak estimate

pub mod figure;

pub use figure::{Bounds, Figure, LineStyle};

use std::path::{Path, PathBuf};

use crate::estimator::PeakEstimate;

/// Draw the averaged spectrum, the smoothed curve, the peak marker and the
/// label into `figure`
pub fn render_estimate(figure: &mut Figure, estimate: &PeakEstimate, title: &str) {
    figure.plot(
        estimate.averaged.x(),
        estimate.averaged.y(),
        LineStyle::new("lightgray").with_opacity(0.5),
    );
    figure.plot(
        estimate.smoothed.x(),
        estimate.smoothed.y(),
        LineStyle::new("#1f77b4"),
    );
    figure.axvline(estimate.peak_hz, LineStyle::new("red"));

    let label_y = 0.9 * estimate.averaged.max_y().unwrap_or(0.0);
    figure.text(estimate.peak_hz + 1.0, label_y, &estimate.label());

    figure.set_labels("Frequency (Hz)", "Energy");
    figure.set_title(title);
}

/// Plot title for a recording: its file stem
pub fn title_for(recording: &Path) -> String {
    recording
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "recording".to_string())
}

/// `<output_dir>/<title>.svg`
pub fn plot_path(output_dir: &Path, title: &str) -> PathBuf {
    output_dir.join(format!("{title}.svg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::BandWindow;
    use crate::smoothing::Curve;

    fn estimate() -> PeakEstimate {
        PeakEstimate {
            peak_hz: 10.25,
            band: BandWindow::default(),
            averaged: Curve::new(vec![8.0, 10.0, 12.0], vec![1.0, 3.0, 2.0]).unwrap(),
            smoothed: Curve::new(vec![8.0, 10.0, 12.0], vec![1.2, 2.8, 2.1]).unwrap(),
        }
    }

    #[test]
    fn test_render_estimate() {
        let mut figure = Figure::default();
        render_estimate(&mut figure, &estimate(), "subject-01");

        let svg = figure.to_svg();
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains(r#"stroke="red""#));
        assert!(svg.contains("Alpha peak: 10.25 Hz"));
        assert!(svg.contains("subject-01"));
        assert!(svg.contains("Energy"));
    }

    #[test]
    fn test_title_and_path() {
        let title = title_for(Path::new("/data/eeg/subject-01.csv"));
        assert_eq!(title, "subject-01");
        assert_eq!(
            plot_path(Path::new("out"), &title),
            PathBuf::from("out/subject-01.svg")
        );
    }
}
