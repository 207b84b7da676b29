//! End-to-end tests of the alpha peak pipeline

use std::f64::consts::PI;

use alpha_peak::render::{plot_path, render_estimate, title_for, Figure};
use alpha_peak::{
    io, AlphaError, AlphaPeakEstimator, BandWindow, EstimatorConfig, SpectrumAnalyzer, WindowType,
};

const SAMPLE_RATE: f64 = 250.0;

fn tone(freq_hz: f64, amplitude: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| amplitude * (2.0 * PI * freq_hz * n as f64 / SAMPLE_RATE).sin())
        .collect()
}

/// Deterministic uniform noise in [-amplitude, amplitude]
fn noise(amplitude: f64, len: usize) -> Vec<f64> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            amplitude * (2.0 * unit - 1.0)
        })
        .collect()
}

fn default_estimator() -> AlphaPeakEstimator {
    AlphaPeakEstimator::new(&EstimatorConfig::default()).unwrap()
}

#[test]
fn test_pure_ten_hz_tone() {
    // 60 s at 250 Hz: 30 bins span 0.5 Hz
    let signal = tone(10.0, 1.0, 15_000);
    let estimate = default_estimator().estimate(&signal).unwrap();

    assert!(
        (estimate.peak_hz - 10.0).abs() < 1.0,
        "peak at {} Hz",
        estimate.peak_hz
    );
    assert_eq!(estimate.smoothed.len(), 2099 - 30 + 1);
}

#[test]
fn test_short_recording_peak_follows_averaged_axis() {
    // 500 samples give 0.5 Hz bins, so the first averaged frequency is
    // already 12.75 Hz and the 10 Hz line shows up in the first 10 points.
    let signal = tone(10.0, 1.0, 500);
    let estimate = default_estimator().estimate(&signal).unwrap();

    assert_eq!(estimate.averaged.len(), 40);
    assert!((estimate.averaged.x()[0] - 12.75).abs() < 1e-9);
    assert!(
        estimate.peak_hz > 12.0 && estimate.peak_hz < 18.0,
        "peak at {} Hz",
        estimate.peak_hz
    );
}

#[test]
fn test_dominant_tone_in_noise() {
    let len = 15_000;
    let signal: Vec<f64> = tone(10.0, 1.0, len)
        .iter()
        .zip(tone(25.0, 0.3, len))
        .zip(noise(0.5, len))
        .map(|((a, b), c)| a + b + c)
        .collect();

    for window in [WindowType::Rectangular, WindowType::Hann] {
        let config = EstimatorConfig {
            spectral_window: window,
            ..Default::default()
        };
        let estimate = AlphaPeakEstimator::new(&config)
            .unwrap()
            .estimate(&signal)
            .unwrap();
        assert!(
            (estimate.peak_hz - 10.0).abs() < 1.0,
            "{window}: peak at {} Hz",
            estimate.peak_hz
        );
    }
}

#[test]
fn test_deterministic() {
    let len = 15_000;
    let signal: Vec<f64> = tone(11.0, 1.0, len)
        .iter()
        .zip(noise(0.8, len))
        .map(|(a, b)| a + b)
        .collect();

    let estimator = default_estimator();
    let first = estimator.estimate(&signal).unwrap();
    let second = estimator.estimate(&signal).unwrap();

    assert_eq!(first.peak_hz.to_bits(), second.peak_hz.to_bits());
    assert_eq!(first.smoothed, second.smoothed);
    assert_eq!(first.averaged, second.averaged);
}

#[test]
fn test_peak_stays_inside_band() {
    let config = EstimatorConfig {
        band: BandWindow::new(8.0, 13.0).unwrap(),
        window_size: 10,
        interior_knots: 10,
        ..Default::default()
    };
    let estimator = AlphaPeakEstimator::new(&config).unwrap();

    // Strongest energy is outside the band
    let len = 15_000;
    let signal: Vec<f64> = tone(20.0, 5.0, len)
        .iter()
        .zip(tone(10.0, 1.0, len))
        .map(|(a, b)| a + b)
        .collect();

    let estimate = estimator.estimate(&signal).unwrap();
    assert!(estimate.peak_hz > 8.0 && estimate.peak_hz < 13.0);
    assert!(estimate.smoothed.x().windows(2).all(|w| w[0] < w[1]));
    assert!(estimate.averaged.x().iter().all(|&f| f > 8.0 && f < 13.0));
}

#[test]
fn test_band_edges_excluded_from_real_spectrum() {
    let analyzer = SpectrumAnalyzer::new(SAMPLE_RATE, WindowType::Rectangular).unwrap();
    let spectrum = analyzer.analyze(&tone(10.0, 1.0, 500)).unwrap();

    // 0.5 Hz grid has bins exactly on 5 and 40 Hz
    assert!(spectrum.frequencies().contains(&5.0));
    assert!(spectrum.frequencies().contains(&40.0));

    let band = spectrum.restrict(&BandWindow::default()).unwrap();
    assert_eq!(band.frequencies().first(), Some(&5.5));
    assert_eq!(band.frequencies().last(), Some(&39.5));
    assert_eq!(band.len(), 69);
}

#[test]
fn test_insufficient_data_for_window() {
    let err = default_estimator().estimate(&tone(10.0, 1.0, 10)).unwrap_err();
    assert!(matches!(err, AlphaError::InsufficientData { window: 30, .. }));
}

#[test]
fn test_band_beyond_nyquist() {
    let config = EstimatorConfig {
        band: BandWindow::new(1000.0, 2000.0).unwrap(),
        ..Default::default()
    };
    let err = AlphaPeakEstimator::new(&config)
        .unwrap()
        .estimate(&tone(10.0, 1.0, 500))
        .unwrap_err();
    assert!(matches!(err, AlphaError::EmptyBand { .. }));
    assert_eq!(err.error_code(), "EMPTY_BAND");
}

#[test]
fn test_unbounded_knot_count_is_fit_failure() {
    let config = EstimatorConfig {
        interior_knots: usize::MAX,
        ..Default::default()
    };
    let err = AlphaPeakEstimator::new(&config)
        .unwrap()
        .estimate(&tone(10.0, 1.0, 15_000))
        .unwrap_err();
    assert!(matches!(err, AlphaError::FitFailure { .. }));
}

#[test]
fn test_empty_signal() {
    let err = default_estimator().estimate(&[]).unwrap_err();
    assert!(matches!(err, AlphaError::InvalidInput { .. }));
}

#[test]
fn test_csv_to_plot() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("subject-07.csv");

    let ch0 = tone(10.0, 1.0, 15_000);
    let ch1 = tone(12.0, 1.0, 15_000);
    let mut text = String::from("channel-0,channel-1\n");
    for (a, b) in ch0.iter().zip(ch1.iter()) {
        text.push_str(&format!("{a},{b}\n"));
    }
    std::fs::write(&csv_path, text).unwrap();

    let samples = io::read_channel(&csv_path, 1).unwrap();
    assert_eq!(samples.len(), 15_000);

    let estimate = default_estimator().estimate(&samples).unwrap();
    assert!((estimate.peak_hz - 12.0).abs() < 1.0);

    let title = title_for(&csv_path);
    let mut figure = Figure::default();
    render_estimate(&mut figure, &estimate, &title);

    let out = plot_path(dir.path(), &title);
    figure.save(&out).unwrap();

    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains("subject-07"));
    assert!(svg.contains(&estimate.label()));
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alpha.json");
    std::fs::write(
        &path,
        r#"{"band": {"min_freq": 7, "max_freq": 14}, "window_size": 10, "spectral_window": "hann"}"#,
    )
    .unwrap();

    let config = EstimatorConfig::from_json_file(&path).unwrap();
    assert_eq!(config.band, BandWindow::new(7.0, 14.0).unwrap());
    assert_eq!(config.window_size, 10);
    assert_eq!(config.interior_knots, 30);
    assert_eq!(config.spectral_window, WindowType::Hann);

    std::fs::write(&path, r#"{"sample_rate": -1}"#).unwrap();
    assert!(matches!(
        EstimatorConfig::from_json_file(&path),
        Err(AlphaError::InvalidInput { .. })
    ));

    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(
        EstimatorConfig::from_json_file(&path),
        Err(AlphaError::Config(_))
    ));
}
