/*!
 * Tests for style descriptors and renderer parameters
 */

use narrasub::style::{
    AssColour, StyleConfig, StyleDescriptor, StyleParameters, DEFAULT_FONT_SIZE, MAX_FONT_SIZE,
};

/// Every descriptor maps to valid parameters
#[test]
fn test_parameters_withEveryDescriptor_shouldValidate() {
    for style in StyleDescriptor::all() {
        let params = style.parameters("Noto Sans CJK TC", 18);
        assert!(params.validate().is_ok(), "{}", style);
        assert_eq!(params.alignment, 2);
    }
}

/// Legacy names deserialize to the current descriptors
#[test]
fn test_deserialize_withLegacyNames_shouldResolve() {
    let styles: Vec<StyleDescriptor> =
        serde_json::from_str(r#"["default","yellow","white_box","custom","boxed"]"#).unwrap();
    assert_eq!(
        styles,
        vec![
            StyleDescriptor::Default,
            StyleDescriptor::Highlighted,
            StyleDescriptor::Boxed,
            StyleDescriptor::Emphasized,
            StyleDescriptor::Boxed,
        ]
    );
}

/// Display and parsing agree
#[test]
fn test_display_withEveryDescriptor_shouldParseBack() {
    for style in StyleDescriptor::all() {
        assert_eq!(style.to_string().parse::<StyleDescriptor>().unwrap(), style);
    }
}

/// Parameters serialize colours in ASS notation
#[test]
fn test_serialize_withHighlighted_shouldWriteAssColours() {
    let params = StyleDescriptor::Highlighted.parameters("Noto Sans CJK TC", 18);
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json["primary_colour"], "&H0000FFFF");
    assert_eq!(json["border_style"], "outline");

    let back: StyleParameters = serde_json::from_value(json).unwrap();
    assert_eq!(back, params);
}

/// Invalid values are rejected
#[test]
fn test_validate_withBadValues_shouldFail() {
    let mut params = StyleParameters::default();
    params.font_size = 0;
    assert!(params.validate().is_err());

    let mut params = StyleParameters::default();
    params.alignment = 10;
    assert!(params.validate().is_err());

    let mut params = StyleParameters::default();
    params.font_name = "  ".to_string();
    assert!(params.validate().is_err());
}

/// Oversized fonts from configuration fall back to the defaults
#[test]
fn test_resolve_withHugeFontSize_shouldFallBackToDefaults() {
    let config = StyleConfig {
        font_size: u32::MAX,
        ..StyleConfig::default()
    };
    for style in StyleDescriptor::all() {
        let params = config.resolve(style);
        assert!(params.validate().is_ok(), "{}", style);
        assert!(params.font_size <= DEFAULT_FONT_SIZE + 2, "{}", style);
    }

    let mut params = StyleParameters::default();
    params.font_size = MAX_FONT_SIZE + 1;
    assert!(params.validate().is_err());
}

/// The boxed style draws an opaque box
#[test]
fn test_toForceStyle_withBoxed_shouldUseBoxBorder() {
    let force_style = StyleConfig::default()
        .resolve(StyleDescriptor::Boxed)
        .to_force_style();
    assert!(force_style.contains("BorderStyle=4"));
    assert!(force_style.contains("MarginV=20"));
    assert!(force_style.contains(&format!("BackColour={}", AssColour::TRANSLUCENT_BLACK)));
}
