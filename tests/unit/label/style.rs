use super::*;

#[test]
fn defaults_match_node_parameters() {
    let s = LabelStyle::default();
    assert_eq!(s.font_family, None);
    assert_eq!(s.font_size, 30.0);
    assert_eq!(s.text_align, HorizontalAlign::Left);
    assert_eq!(s.placement, Placement::TopLeft);
    assert_eq!(s.edge_offset, 25);
    assert_eq!(s.color_scheme, ColorScheme::WhiteOnBlack);
    assert_eq!(s.padding, 18);
    assert_eq!(s.corner_radius, 15);
    assert_eq!(s.stroke_width, 1);
    assert_eq!(s.background_opacity, 0);
}

#[test]
fn serde_uses_snake_case_wire_names() {
    let json = serde_json::to_value(LabelStyle {
        placement: Placement::BottomRight,
        color_scheme: ColorScheme::BlackOnWhite,
        text_align: HorizontalAlign::Center,
        ..LabelStyle::default()
    })
    .unwrap();
    assert_eq!(json["placement"], "bottom_right");
    assert_eq!(json["color_scheme"], "black_on_white");
    assert_eq!(json["text_align"], "center");
}

#[test]
fn serde_roundtrip_preserves_style() {
    let style = LabelStyle {
        font_family: Some("DejaVu Sans".to_string()),
        background_opacity: 200,
        ..LabelStyle::default()
    };
    let json = serde_json::to_string(&style).unwrap();
    let back: LabelStyle = serde_json::from_str(&json).unwrap();
    assert_eq!(back, style);
}

#[test]
fn scheme_colors_are_inverses() {
    assert_eq!(ColorScheme::WhiteOnBlack.foreground(), [255, 255, 255]);
    assert_eq!(ColorScheme::WhiteOnBlack.background(), [0, 0, 0]);
    assert_eq!(ColorScheme::BlackOnWhite.foreground(), [0, 0, 0]);
    assert_eq!(ColorScheme::BlackOnWhite.background(), [255, 255, 255]);
}

#[test]
fn validate_rejects_bad_font_size() {
    for size in [0.0f32, -1.0, f32::NAN, f32::INFINITY] {
        let style = LabelStyle {
            font_size: size,
            ..LabelStyle::default()
        };
        assert!(style.validate().is_err());
    }
}

#[test]
fn validate_enforces_node_parameter_ranges() {
    let style = LabelStyle {
        padding: 257,
        ..LabelStyle::default()
    };
    assert!(style.validate().is_err());

    let style = LabelStyle {
        stroke_width: 21,
        ..LabelStyle::default()
    };
    assert!(style.validate().is_err());

    assert!(LabelStyle::default().validate().is_ok());
}

#[test]
fn validate_rejects_blank_family() {
    let style = LabelStyle {
        font_family: Some("  ".to_string()),
        ..LabelStyle::default()
    };
    assert!(style.validate().is_err());
}
