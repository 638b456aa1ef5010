use super::*;
use crate::animation::phase::{PhaseKind, PhaseSpec};

const GREETING: &str = r##"
{
  "base_video": "public/base.mp4",
  "output": { "width": 1080, "height": 1920 },
  "overlays": [
    {
      "type": "image",
      "path": "public/dummy.png",
      "start": 0,
      "end": 5,
      "width": 243,
      "x": 67.5,
      "y": 104.5,
      "animation": { "in": { "kind": "zoom", "duration": 1, "overshoot": 1.15 }, "hold": 4 }
    },
    {
      "type": "text",
      "text": "Haikal Surya",
      "font": "public/fonts/font-bold.ttf",
      "font_size": 21,
      "color": "#FBE6D3",
      "start": 1,
      "end": 6,
      "y": 382,
      "animation": {
        "in": { "kind": "slide-up", "duration": 0.6, "easing": "ease-out" },
        "hold": 3.9,
        "out": { "kind": "fade", "duration": 0.5 }
      },
      "idle": { "amplitude": 6, "speed": 0.5 }
    }
  ]
}
"##;

fn basic_comp() -> Composition {
    Composition {
        base_video: PathBuf::from("base.mp4"),
        output: Canvas::DEFAULT_OUTPUT,
        overlays: vec![
            ImageOverlay {
                path: PathBuf::from("photo.png"),
                start: 0.0,
                end: 4.0,
                width: Some(320),
                geometry: OverlayGeometry::default(),
                animation: None,
            }
            .into(),
            TextOverlay::new("Selamat!", 1.0, 4.0).into(),
        ],
    }
}

#[test]
fn parses_greeting_document() {
    let comp = Composition::from_json_str(GREETING).unwrap();
    comp.validate().unwrap();
    assert_eq!(comp.output, Canvas::new(1080, 1920).unwrap());
    assert_eq!(comp.overlays.len(), 2);

    let Overlay::Image(img) = &comp.overlays[0] else {
        panic!("expected image overlay first");
    };
    assert_eq!(img.width, Some(243));
    assert_eq!(img.geometry.x, Some(67.5));
    let zoom = img.animation.as_ref().unwrap().entry.as_ref().unwrap();
    assert_eq!(zoom.kind, PhaseKind::Zoom);
    assert_eq!(zoom.overshoot, Some(1.15));

    let Overlay::Text(text) = &comp.overlays[1] else {
        panic!("expected text overlay second");
    };
    assert_eq!(text.font_size, 21.0);
    assert_eq!(text.color, "#FBE6D3");
    assert_eq!(text.geometry.x, None);
    assert_eq!(text.geometry.y, Some(382.0));
    assert_eq!(text.idle.unwrap().speed, 0.5);
    assert_eq!(comp.overlays[1].kind(), OverlayKind::Text);
}

#[test]
fn defaults_fill_missing_fields() {
    let comp = Composition::from_json_str(
        r#"{
            "base_video": "b.mp4",
            "overlays": [ { "type": "text", "text": "hi", "start": 0, "end": 1 } ]
        }"#,
    )
    .unwrap();
    assert_eq!(comp.output, Canvas::DEFAULT_OUTPUT);
    let Overlay::Text(text) = &comp.overlays[0] else {
        panic!("expected text overlay");
    };
    assert_eq!(text.font_size, TextOverlay::DEFAULT_FONT_SIZE);
    assert_eq!(text.color, "white");
    assert!(text.font.is_none());
    assert!(text.animation.is_none());
}

#[test]
fn json_round_trip_preserves_composition() {
    let comp = Composition::from_json_str(GREETING).unwrap();
    let json = comp.to_json_pretty().unwrap();
    assert_eq!(Composition::from_json_str(&json).unwrap(), comp);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Composition::from_json_str("{ \"base_video\": 3 }").unwrap_err();
    assert!(matches!(err, GreetError::Serde(_)));
    let err = Composition::from_json_str(
        r#"{ "base_video": "b.mp4", "overlays": [ { "type": "video", "start": 0, "end": 1 } ] }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("serialization error"));
}

#[test]
fn animation_without_hold_is_rejected() {
    let err = Composition::from_json_str(
        r#"{
            "base_video": "b.mp4",
            "overlays": [ {
                "type": "text", "text": "hi", "start": 0, "end": 10,
                "animation": {
                    "in": { "kind": "fade", "duration": 1 },
                    "out": { "kind": "fade", "duration": 1 }
                }
            } ]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, GreetError::Serde(_)));
    assert!(err.to_string().contains("missing field `hold`"), "{err}");
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = Composition::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, GreetError::Other(_)));
    assert!(format!("{err:#}").contains("does/not/exist.json"));
}

#[test]
fn end_before_start_is_rejected() {
    let mut comp = basic_comp();
    comp.validate().unwrap();
    comp.overlays[1] = TextOverlay::new("late", 3.0, 2.0).into();
    let err = comp.validate().unwrap_err().to_string();
    assert!(err.contains("overlays[1]"), "{err}");
    assert!(err.contains("end (2)"), "{err}");
}

#[test]
fn nested_animation_errors_name_their_location() {
    let mut comp = basic_comp();
    if let Overlay::Text(t) = &mut comp.overlays[1] {
        t.animation = Some(Animation::new(
            Some(PhaseSpec::new(PhaseKind::Zoom, 1.0).with_overshoot(0.5)),
            1.0,
            None,
        ));
    }
    let err = comp.validate().unwrap_err().to_string();
    assert!(
        err.contains("overlays[1]: animation: in: zoom overshoot"),
        "{err}"
    );
}

#[test]
fn kind_specific_checks() {
    let mut text = TextOverlay::new("", 0.0, 1.0);
    assert!(Overlay::from(text.clone()).validate().is_err());
    text.text = "ok".to_string();
    text.font_size = 0.0;
    assert!(Overlay::from(text.clone()).validate().is_err());
    text.font_size = 12.0;
    text.idle = Some(IdleAnimation {
        amplitude: 1.0,
        speed: -2.0,
    });
    let err = Overlay::from(text).validate().unwrap_err().to_string();
    assert!(err.contains("idle:"), "{err}");

    let img = ImageOverlay {
        path: PathBuf::from("a.png"),
        start: 0.0,
        end: 1.0,
        width: Some(0),
        geometry: OverlayGeometry::default(),
        animation: None,
    };
    assert!(Overlay::from(img).validate().is_err());
}

#[test]
fn output_canvas_must_be_non_empty() {
    let mut comp = basic_comp();
    comp.output = Canvas {
        width: 0,
        height: 1080,
    };
    let err = comp.validate().unwrap_err().to_string();
    assert!(err.contains("output:"), "{err}");
}
