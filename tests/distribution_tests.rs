use autoopt::Error;
use autoopt::distribution::{
    Choice, Distribution, LogNormal, LogUniform, Normal, QLogNormal, QLogUniform, QNormal,
    QUniform, Quantized, Uniform, WeightedChoice,
};
use autoopt::quantization::{Quantization, round_to_q};

fn grid(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let step = (stop - start) / (n - 1) as f64;
    let mut xs: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
    xs[n - 1] = stop;
    xs
}

#[test]
fn uniform_density_is_flat_inside_and_zero_outside() {
    for (a, b) in [(0.0, 1.0), (-3.0, 7.5), (100.0, 100.25)] {
        let dist = Uniform::new(a, b).unwrap();
        for x in grid(a, b, 50) {
            assert!((dist.pdf(x) - 1.0 / (b - a)).abs() < 1e-9, "pdf({x}) on [{a}, {b}]");
        }
        assert_eq!(dist.pdf(a - 1e-6), 0.0);
        assert_eq!(dist.pdf(b + 1e-6), 0.0);
        assert!((dist.mean() - (a + b) / 2.0).abs() < 1e-12);
    }
}

#[test]
fn uniform_rejects_empty_and_reversed_ranges() {
    assert!(matches!(
        Uniform::new(5.0, 5.0),
        Err(Error::InvalidBounds { .. })
    ));
    assert!(matches!(
        Uniform::new(5.0, 1.0),
        Err(Error::InvalidBounds { .. })
    ));
    assert!(Uniform::new(f64::NAN, 1.0).is_err());
}

#[test]
fn normal_peaks_at_its_mean() {
    for (loc, scale) in [(0.0, 1.0), (2.5, 0.1), (-10.0, 4.0)] {
        let dist = Normal::new(loc, scale).unwrap();
        let peak = dist.pdf(loc);
        let xs = grid(dist.plot_min_value(), dist.plot_max_value(), 1001);
        assert!(dist.pdf_many(&xs).into_iter().all(|y| y <= peak));
        assert!((dist.mean() - loc).abs() < f64::EPSILON);
    }
}

#[test]
fn normal_rejects_non_positive_scale() {
    assert!(matches!(Normal::new(0.0, 0.0), Err(Error::InvalidScale(_))));
    assert!(matches!(Normal::new(0.0, -1.0), Err(Error::InvalidScale(_))));
    assert!(matches!(
        LogNormal::new(0.0, f64::INFINITY),
        Err(Error::InvalidScale(_))
    ));
}

#[test]
fn log_uniform_has_no_mass_below_zero() {
    let dist = LogUniform::new(1e-3, 10.0).unwrap();
    for x in [-5.0, -1e-3, -1e-12] {
        assert_eq!(dist.pdf(x), 0.0);
    }
    assert!(dist.pdf(1.0) > 0.0);
}

#[test]
fn log_uniform_requires_positive_lower_bound() {
    assert!(matches!(
        LogUniform::new(-1.0, 1.0),
        Err(Error::InvalidLogBounds(_))
    ));
    assert!(matches!(
        LogUniform::new(0.0, 1.0),
        Err(Error::InvalidLogBounds(_))
    ));
    assert!(matches!(
        LogUniform::new(2.0, 1.0),
        Err(Error::InvalidBounds { .. })
    ));
}

#[test]
fn log_normal_mean_and_support() {
    for (loc, scale) in [(0.0, 1.0), (1.5, 0.25), (-2.0, 0.5)] {
        let dist = LogNormal::new(loc, scale).unwrap();
        assert_eq!(dist.pdf(0.0), 0.0);
        assert_eq!(dist.pdf(-1.0), 0.0);
        let expected = (loc + scale * scale / 2.0).exp();
        assert!((dist.mean() - expected).abs() < 1e-12);
    }
}

#[test]
fn rounding_is_idempotent() {
    let quantization = Quantization::new(0.25).unwrap();
    for v in grid(-10.0, 10.0, 997) {
        let once = quantization.round_to_q(v);
        assert!((quantization.round_to_q(once) - once).abs() < 1e-12, "v = {v}");
    }
    assert!(matches!(round_to_q(1.0, 0.0), Err(Error::InvalidStep(_))));
}

fn assert_quantized<D: Distribution>(dist: &Quantized<D>) {
    for x in grid(dist.plot_min_value(), dist.plot_max_value(), 200) {
        let expected = dist.base().pdf(dist.round_to_q(x));
        assert!((dist.pdf(x) - expected).abs() < f64::EPSILON, "x = {x}");
    }
    let expected_mean = dist.round_to_q(dist.base().mean());
    assert!((dist.mean() - expected_mean).abs() < f64::EPSILON);
}

#[test]
fn every_quantized_variant_snaps_queries_and_mean() {
    assert_quantized(&QUniform::new(-2.0, 3.0, 0.5).unwrap());
    assert_quantized(&QLogUniform::new(0.1, 20.0, 2.0).unwrap());
    assert_quantized(&QNormal::new(0.3, 1.5, 0.25).unwrap());
    assert_quantized(&QLogNormal::new(0.2, 0.5, 0.1).unwrap());
}

#[test]
fn quantized_variants_keep_base_validation() {
    assert!(matches!(
        QUniform::new(1.0, 1.0, 0.5),
        Err(Error::InvalidBounds { .. })
    ));
    assert!(matches!(
        QLogUniform::new(0.0, 1.0, 0.5),
        Err(Error::InvalidLogBounds(_))
    ));
    assert!(matches!(
        QNormal::new(0.0, 1.0, -0.5),
        Err(Error::InvalidStep(_))
    ));
}

#[test]
fn quantized_uniform_end_to_end() {
    let dist = QUniform::new(0.0, 10.0, 1.0).unwrap();
    assert_eq!(dist.pdf(3.4), dist.pdf(3.0));
    assert!((dist.pdf(3.0) - 0.1).abs() < f64::EPSILON);
    assert_eq!(dist.mean(), dist.round_to_q(5.0));
    assert_eq!(dist.mean(), 5.0);
}

#[test]
fn weighted_choice_normalizes_weights() {
    let dist = WeightedChoice::new([("A", 1.0), ("B", 1.0), ("C", 1.0)]).unwrap();
    assert!((dist.pdf("A") - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(dist.pdf("not_present"), 0.0);

    let skewed = WeightedChoice::new([("a", 1.0), ("b", 100.0)]).unwrap();
    assert!((skewed.pdf("b") - 100.0 / 101.0).abs() < 1e-12);
    assert!((skewed.pdf("b") / skewed.pdf("a") - 100.0).abs() < 1e-9);
}

#[test]
fn weighted_choice_rejects_bad_input() {
    let empty: [(&str, f64); 0] = [];
    assert!(matches!(WeightedChoice::new(empty), Err(Error::EmptyChoices)));
    assert!(matches!(
        WeightedChoice::new([("a", 1.0), ("b", 0.0)]),
        Err(Error::InvalidWeight { index: 1, .. })
    ));
}

#[test]
fn choice_weights_values_equally() {
    let dist = Choice::new(["x", "y", "z"]).unwrap();
    assert!((dist.pdf("x") - dist.pdf("y")).abs() < f64::EPSILON);
    assert_eq!(dist.len(), 3);
    assert_eq!(*dist.mean(), "y");
}

#[test]
fn trait_objects_mix_distribution_types() {
    let dists: Vec<Box<dyn Distribution>> = vec![
        Box::new(Uniform::new(0.0, 1.0).unwrap()),
        Box::new(Normal::new(0.0, 1.0).unwrap()),
        Box::new(QLogUniform::new(1.0, 100.0, 1.0).unwrap()),
    ];
    for dist in &dists {
        assert!(dist.plot_min_value() < dist.plot_max_value());
        assert!(!dist.plot_label().is_empty());
        assert!(dist.pdf(dist.mean()) >= 0.0);
    }
}
