use super::*;

#[test]
fn defaults_match_documented_values() {
    let s = SubtitleSettings::default();
    assert_eq!(s.font_family_ja, "Noto Sans JP");
    assert_eq!(s.font_family_en, "Roboto");
    assert_eq!(s.font_size, 32);
    assert_eq!(s.color, "#FFFFFF");
    assert_eq!(s.outline_color, "#000000");
    assert_eq!(s.outline_size, 0.0);
    assert_eq!(s.bottom_margin, 50);
    assert!(s.enable_fade);
}

#[test]
fn empty_patch_is_identity() {
    let s = SubtitleSettings {
        font_size: 40,
        color: "#123456".to_string(),
        ..SubtitleSettings::default()
    };
    let patch = SettingsPatch::default();
    assert!(patch.is_empty());
    assert_eq!(s.merged(&patch), s);
}

#[test]
fn patch_sequence_never_resets_earlier_fields() {
    let patches = [
        SettingsPatch {
            font_size: Some(48),
            ..SettingsPatch::default()
        },
        SettingsPatch {
            outline_color: Some("#FF0000".to_string()),
            outline_size: Some(1.5),
            ..SettingsPatch::default()
        },
        SettingsPatch {
            enable_fade: Some(false),
            ..SettingsPatch::default()
        },
        SettingsPatch::default(),
        SettingsPatch {
            font_size: Some(20),
            ..SettingsPatch::default()
        },
    ];

    let mut s = SubtitleSettings::default();
    for p in &patches {
        let next = s.merged(p);
        assert_eq!(next.font_size, p.font_size.unwrap_or(s.font_size));
        assert_eq!(
            next.outline_color,
            p.outline_color.clone().unwrap_or(s.outline_color.clone())
        );
        assert_eq!(next.outline_size, p.outline_size.unwrap_or(s.outline_size));
        assert_eq!(next.enable_fade, p.enable_fade.unwrap_or(s.enable_fade));
        assert_eq!(next.font_family_ja, s.font_family_ja);
        s = next;
    }

    assert_eq!(s.font_size, 20);
    assert_eq!(s.outline_color, "#FF0000");
    assert_eq!(s.outline_size, 1.5);
    assert!(!s.enable_fade);
}

#[test]
fn merge_does_not_validate_domains() {
    let s = SubtitleSettings::default().merged(&SettingsPatch {
        font_size: Some(500),
        font_family_ja: Some("Comic Sans".to_string()),
        ..SettingsPatch::default()
    });
    assert_eq!(s.font_size, 500);
    assert_eq!(s.font_family_ja, "Comic Sans");
}

#[test]
fn secondary_size_is_exactly_half_for_whole_domain() {
    for size in 16..=72u32 {
        let s = SubtitleSettings {
            font_size: size,
            ..SubtitleSettings::default()
        };
        assert_eq!(s.secondary_font_size() * 2.0, f64::from(size));
    }
    let odd = SubtitleSettings {
        font_size: 33,
        ..SubtitleSettings::default()
    };
    assert_eq!(odd.secondary_font_size(), 16.5);
}

#[test]
fn patch_parses_sparse_json_and_rejects_unknown_fields() {
    let p = SettingsPatch::from_json_str(r##"{"font_size": 40, "color": "#00FF00"}"##).unwrap();
    assert_eq!(p.font_size, Some(40));
    assert_eq!(p.color.as_deref(), Some("#00FF00"));
    assert_eq!(p.bottom_margin, None);

    let err = SettingsPatch::from_json_str(r#"{"fontSize": 40}"#).unwrap_err();
    assert!(matches!(err, LyricVidError::Serde(_)));
}

#[test]
fn overlay_prefers_later_patch() {
    let base = SettingsPatch {
        font_size: Some(30),
        bottom_margin: Some(10),
        ..SettingsPatch::default()
    };
    let over = SettingsPatch {
        font_size: Some(60),
        ..SettingsPatch::default()
    };
    let p = base.and(over);
    assert_eq!(p.font_size, Some(60));
    assert_eq!(p.bottom_margin, Some(10));
}
