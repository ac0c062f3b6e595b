use unit_atlas_core::config::{AtlasConfig, ChannelOrder};
use unit_atlas_core::error::AtlasError;
use unit_atlas_core::palette::Palette;

#[test]
fn default_config_is_valid() {
    let cfg = AtlasConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.min_width, 64);
    assert_eq!(cfg.max_width, 2048);
    assert_eq!(cfg.swatch_size, 4);
    assert_eq!(cfg.logo_saturation_threshold, 0.333);
}

#[test]
fn non_power_of_two_width() {
    let cfg = AtlasConfig {
        max_width: 1000,
        ..Default::default()
    };
    match cfg.validate() {
        Err(AtlasError::InvalidDimensions { width, .. }) => assert_eq!(width, 1000),
        other => panic!("Expected InvalidDimensions error, got {:?}", other),
    }
}

#[test]
fn zero_width() {
    let cfg = AtlasConfig {
        min_width: 0,
        ..Default::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(AtlasError::InvalidDimensions { width: 0, .. })
    ));
}

#[test]
fn inverted_width_range() {
    let cfg = AtlasConfig::builder().with_width_range(512, 128).build();
    assert!(matches!(cfg.validate(), Err(AtlasError::InvalidConfig(_))));
}

#[test]
fn zero_swatch() {
    let cfg = AtlasConfig::builder().swatch_size(0).build();
    assert!(matches!(cfg.validate(), Err(AtlasError::InvalidConfig(_))));
}

#[test]
fn threshold_out_of_range() {
    for t in [-0.1, 1.5, f32::NAN] {
        let cfg = AtlasConfig::builder().logo_saturation_threshold(t).build();
        assert!(cfg.validate().is_err(), "threshold {} accepted", t);
    }
}

#[test]
fn logo_marker_is_case_insensitive() {
    let cfg = AtlasConfig::default();
    assert!(cfg.is_logo_archive("D:/ta/textures/Logos.GAF"));
    assert!(!cfg.is_logo_archive("textures/armtex.gaf"));
    let off = AtlasConfig::builder().logo_archive_marker("").build();
    assert!(!off.is_logo_archive("logos.gaf"));
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: AtlasConfig = serde_json::from_str(r#"{"max_width": 512, "channel_order": "rgbx"}"#)
        .expect("partial config");
    assert_eq!(cfg.max_width, 512);
    assert_eq!(cfg.min_width, 64);
    assert!(cfg.tall_variants);
    assert_eq!(cfg.channel_order, ChannelOrder::Rgbx);
}

#[test]
fn missing_palette_file() {
    let err = Palette::load("/definitely/not/here/PALETTE.PAL", ChannelOrder::Bgrx).unwrap_err();
    assert!(matches!(err, AtlasError::Io(_)));
}

#[test]
fn truncated_palette() {
    let err = Palette::from_bytes(&[0u8; 1023], ChannelOrder::Bgrx).unwrap_err();
    assert!(matches!(err, AtlasError::InvalidPalette(_)));
    let ok = Palette::from_bytes(&[0u8; 1024], ChannelOrder::Bgrx).unwrap();
    assert_eq!(ok.len(), 256);
}
