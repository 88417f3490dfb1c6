use super::*;

fn fps() -> Fps {
    Fps::new(24, 1).unwrap()
}

#[test]
fn starts_at_from_and_settles_at_to() {
    let s = Spring::new(SpringConfig::new(100.0, 15.0).mass(1.2));
    assert_eq!(s.sample(0.0, fps()), 0.0);
    let late = s.sample(24.0 * 10.0, fps());
    assert!((late - 1.0).abs() < 1e-3);
}

#[test]
fn delay_holds_the_start_value() {
    let s = Spring::new(SpringConfig::default()).delay(12.0);
    assert_eq!(s.sample(5.0, fps()), 0.0);
    assert_eq!(s.sample(12.0, fps()), 0.0);
    assert!(s.sample(13.0, fps()) > 0.0);
}

#[test]
fn underdamped_overshoots_unless_clamped() {
    let cfg = SpringConfig::new(120.0, 10.0);
    let peak = (0..48)
        .map(|f| Spring::new(cfg).sample(f64::from(f), fps()))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);

    let clamped = SpringConfig {
        overshoot_clamping: true,
        ..cfg
    };
    let peak = (0..48)
        .map(|f| Spring::new(clamped).sample(f64::from(f), fps()))
        .fold(f64::MIN, f64::max);
    assert!(peak <= 1.0);
}

#[test]
fn heavily_damped_is_monotonic() {
    let s = Spring::new(SpringConfig::new(150.0, 200.0).mass(0.8));
    let mut prev = 0.0;
    for f in 0..120 {
        let v = s.sample(f64::from(f), fps());
        assert!(v >= prev - 1e-12);
        prev = v;
    }
}

#[test]
fn duration_stretch_settles_on_time() {
    let cfg = SpringConfig::new(150.0, 200.0).mass(0.8);
    let s = Spring::new(cfg).duration(12.0);
    let at_end = s.sample(12.0, fps());
    assert!((at_end - 1.0).abs() <= REST_THRESHOLD + 1e-9);
    assert!(s.sample(6.0, fps()) < at_end);
}

#[test]
fn range_maps_output() {
    let s = Spring::new(SpringConfig::default()).range(50.0, 0.0);
    assert_eq!(s.sample(0.0, fps()), 50.0);
    assert!(s.sample(240.0, fps()).abs() < 0.1);
}

#[test]
fn sampling_is_order_independent() {
    let s = Spring::new(SpringConfig::new(90.0, 18.0)).delay(4.0);
    let forward: Vec<f64> = (0..30).map(|f| s.sample(f64::from(f), fps())).collect();
    let backward: Vec<f64> = (0..30)
        .rev()
        .map(|f| s.sample(f64::from(f), fps()))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    assert_eq!(forward, backward);
}
