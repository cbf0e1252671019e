// File: crates/price-graph/tests/theme.rs
// Purpose: Built-in lookup and partial override merging.

use price_graph::theme::{builtin, presets, resolve, HexColor};
use price_graph::{CustomTheme, Error, LineStyle, PriceTone, Theme};
use skia_safe::Color;

#[test]
fn resolve_without_override_is_the_builtin() {
    assert_eq!(resolve("dark", None).expect("dark"), Theme::dark());
    assert_eq!(resolve("Light", None).expect("light"), Theme::light());
    assert_eq!(presets().len(), 2);
    assert!(builtin("solarized").is_none());
}

#[test]
fn unknown_theme_is_a_configuration_error() {
    assert!(matches!(resolve("neon", None), Err(Error::Configuration(_))));
}

#[test]
fn single_field_override_changes_only_that_field() {
    let custom = CustomTheme::from_json(r##"{ "background_color": "#000000" }"##).expect("parse");
    let got = resolve("dark", Some(&custom)).expect("resolve");
    let want = Theme { background_color: Color::from_rgb(0, 0, 0), ..Theme::dark() };
    assert_eq!(got, want);
}

#[test]
fn omitted_fields_come_from_the_selected_theme() {
    let custom = CustomTheme::from_json(r##"{ "fill_alpha": 0.5, "avgline_style": "--" }"##).expect("parse");
    let got = resolve("light", Some(&custom)).expect("resolve");
    assert_eq!(got.fill_alpha, 0.5);
    assert_eq!(got.avgline_style, LineStyle::Dashed);
    assert_eq!(got.price_line_color, Theme::light().price_line_color);
    assert_eq!(got.background_color, Theme::light().background_color);
}

#[test]
fn unknown_keys_are_ignored() {
    let custom = CustomTheme::from_json(r##"{ "sparkle": true, "label_stroke": false }"##).expect("parse");
    assert!(custom.unknown.contains_key("sparkle"));
    let got = resolve("dark", Some(&custom)).expect("resolve");
    assert!(!got.label_stroke);
}

#[test]
fn color_spellings() {
    assert_eq!("#fff".parse::<HexColor>().unwrap().0, Color::from_rgb(255, 255, 255));
    assert_eq!("#0b0f14".parse::<HexColor>().unwrap().0, Color::from_rgb(0x0b, 0x0f, 0x14));
    assert_eq!("#11223380".parse::<HexColor>().unwrap().0, Color::from_argb(0x80, 0x11, 0x22, 0x33));
    assert_eq!("none".parse::<HexColor>().unwrap().0, Color::TRANSPARENT);
    assert!("red".parse::<HexColor>().is_err());
    assert!("#12345".parse::<HexColor>().is_err());
}

#[test]
fn invalid_values_are_configuration_errors() {
    assert!(matches!(CustomTheme::from_json(r#"{ "grid_color": "blue" }"#), Err(Error::Configuration(_))));
    assert!(matches!(CustomTheme::from_json(r#"{ "cheapline_style": "wavy" }"#), Err(Error::Configuration(_))));

    let alpha = CustomTheme::from_json(r#"{ "nowline_alpha": 1.5 }"#).expect("parse");
    assert!(matches!(resolve("dark", Some(&alpha)), Err(Error::Configuration(_))));

    let width = CustomTheme::from_json(r#"{ "plot_linewidth": -1 }"#).expect("parse");
    assert!(matches!(resolve("dark", Some(&width)), Err(Error::Configuration(_))));
}

#[test]
fn line_style_spellings() {
    for (raw, want) in [
        ("-", LineStyle::Solid),
        ("dashed", LineStyle::Dashed),
        (":", LineStyle::Dotted),
        ("-.", LineStyle::DashDot),
    ] {
        assert_eq!(raw.parse::<LineStyle>().unwrap(), want);
    }
    assert!(LineStyle::Solid.dash_intervals(2.0).is_none());
    assert_eq!(LineStyle::Dotted.dash_intervals(1.0).map(|d| d.len()), Some(2));
}

#[test]
fn tones_map_to_average_colors() {
    let t = Theme::light();
    assert_eq!(t.tone_color(PriceTone::Below), t.price_line_color_below_avg);
    assert_eq!(t.tone_color(PriceTone::Near), t.price_line_color_near_avg);
    assert_eq!(t.tone_color(PriceTone::Above), t.price_line_color_above_avg);
}
