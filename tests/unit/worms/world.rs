use super::*;

#[test]
fn default_world_is_valid() {
    let cfg = WorldConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.bounds(), Rect::new(0, 0, 1650, 850));
    assert_eq!(cfg.trail_style, TrailStyle::Raster);
}

#[test]
fn validate_rejects_bad_ranges() {
    let bad = [
        WorldConfig {
            width: 1,
            ..WorldConfig::default()
        },
        WorldConfig {
            worms: 0,
            ..WorldConfig::default()
        },
        WorldConfig {
            min_len: 0,
            ..WorldConfig::default()
        },
        WorldConfig {
            min_len: 11,
            max_len: 10,
            ..WorldConfig::default()
        },
        WorldConfig {
            min_step_ms: 60,
            max_step_ms: 50,
            ..WorldConfig::default()
        },
        WorldConfig {
            fps: 0,
            ..WorldConfig::default()
        },
    ];
    for cfg in bad {
        assert!(
            matches!(cfg.validate(), Err(PaintError::Validation(_))),
            "{cfg:?}"
        );
    }
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");
    std::fs::write(
        &path,
        r#"{ "width": 64, "height": 32, "worms": 4, "trail_style": "lazy", "seed": 7 }"#,
    )
    .unwrap();

    let cfg = WorldConfig::from_json_path(&path).unwrap();
    assert_eq!(cfg.width, 64);
    assert_eq!(cfg.worms, 4);
    assert_eq!(cfg.trail_style, TrailStyle::Lazy);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.fps, WorldConfig::default().fps);
}

#[test]
fn json_errors_are_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(matches!(
        WorldConfig::from_json_path(&missing),
        Err(PaintError::Config(_))
    ));

    let typo = dir.path().join("typo.json");
    std::fs::write(&typo, r#"{ "widht": 64 }"#).unwrap();
    let err = WorldConfig::from_json_path(&typo).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn loaded_config_is_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");
    std::fs::write(&path, r#"{ "fps": 0 }"#).unwrap();
    assert!(matches!(
        WorldConfig::from_json_path(&path),
        Err(PaintError::Validation(_))
    ));
}

#[test]
fn random_points_stay_inside() {
    use rand::{SeedableRng, rngs::StdRng};
    let cfg = WorldConfig {
        width: 3,
        height: 2,
        ..WorldConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        assert!(cfg.contains(cfg.random_point(&mut rng)));
    }
    assert!(!cfg.contains(Point::new(3, 0)));
}
