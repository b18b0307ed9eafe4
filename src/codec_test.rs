#![allow(clippy::float_cmp)]

use base64::engine::general_purpose::STANDARD;
use rand::Rng;

use super::*;
use crate::bouquet::ArrangedFlower;
use crate::catalog::{self, FLOWERS};

fn instance(id: &str, x: f64, y: f64, scale: f64, rot: f64, z: i32) -> ArrangedFlower {
    ArrangedFlower {
        instance_id: format!("inst-{id}"),
        flower: catalog::find_flower_by_id(id).unwrap(),
        x,
        y,
        scale,
        rotation_deg: rot,
        z_index: z,
    }
}

fn sample_draft() -> BouquetDraft {
    BouquetDraft {
        flowers: vec![
            instance("rose", 0.0, -20.0, 1.0, -5.0, 10),
            instance("foliage-1", -70.4, 10.6, 1.384, -18.2, 1),
            instance("tulip", 70.0, 10.0, 0.92, 18.0, 8),
        ],
        message: "Thinking of you 🌷 always".into(),
        to: "Mía".into(),
        from: "Jo".into(),
        song: SongClip { url: "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC".into(), start_seconds: 42, end_seconds: 75 },
        background: "#2C2420".into(),
        wrap: "linen".into(),
    }
}

fn encode_json(value: &serde_json::Value) -> String {
    URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn encoded_payload_is_url_safe() {
    let encoded = encode(&sample_draft()).unwrap();
    assert!(
        encoded.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
        "unexpected character in {encoded}"
    );
}

#[test]
fn compact_form_uses_short_keys_and_rounds() {
    let compact = CompactBouquet::from_draft(&sample_draft());
    let json = serde_json::to_value(&compact).unwrap();
    let obj = json.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["b", "f", "fr", "m", "s", "t", "w"]);

    let leaf = &json["f"][1];
    assert_eq!(leaf["i"], "foliage-1");
    assert_eq!(leaf["x"], -70);
    assert_eq!(leaf["y"], 11);
    assert_eq!(leaf["s"], 1.38);
    assert_eq!(leaf["r"], -18);
    assert_eq!(leaf["z"], 1);
    assert_eq!(json["s"]["st"], 42);
}

#[test]
fn compact_form_carries_only_flower_id() {
    let compact = CompactBouquet::from_draft(&sample_draft());
    let json = serde_json::to_string(&compact).unwrap();
    assert!(!json.contains("Rose"));
    assert!(!json.contains("inst-"));
    assert!(!json.contains("/flowers/"));
}

// =============================================================================
// Round trip
// =============================================================================

#[test]
fn round_trip_preserves_content() {
    let draft = sample_draft();
    let view = decode(Some(&encode(&draft).unwrap())).unwrap();

    assert_eq!(view.message, draft.message);
    assert_eq!(view.to, draft.to);
    assert_eq!(view.from, draft.from);
    assert_eq!(view.song, draft.song);
    assert_eq!(view.background, draft.background);
    assert_eq!(view.wrap, draft.wrap);

    let ids: Vec<&str> = view.flowers.iter().map(|f| f.flower.id).collect();
    assert_eq!(ids, vec!["rose", "foliage-1", "tulip"]);
    assert_eq!(view.flowers[1].x, -70.0);
    assert_eq!(view.flowers[1].y, 11.0);
    assert_eq!(view.flowers[1].scale, 1.38);
    assert_eq!(view.flowers[1].rotation_deg, -18.0);
    assert_eq!(view.flowers[1].z_index, 1);
}

#[test]
fn round_trip_regenerates_instance_ids() {
    let view = decode(Some(&encode(&sample_draft()).unwrap())).unwrap();
    assert!(view.flowers.iter().all(|f| !f.instance_id.starts_with("inst-")));
}

#[test]
fn round_trip_randomized_arrangements() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let count = rng.random_range(3..=20);
        let flowers: Vec<ArrangedFlower> = (0..count)
            .map(|_| {
                let def = &FLOWERS[rng.random_range(0..FLOWERS.len())];
                ArrangedFlower {
                    instance_id: crate::ids::generate_instance_id(),
                    flower: def,
                    x: rng.random_range(-400.0..400.0),
                    y: rng.random_range(-400.0..400.0),
                    scale: rng.random_range(0.2..4.0),
                    rotation_deg: rng.random_range(-360.0..360.0),
                    z_index: rng.random_range(-5..40),
                }
            })
            .collect();
        let draft = BouquetDraft {
            flowers,
            message: "m".repeat(rng.random_range(1..=300)),
            to: "t".repeat(rng.random_range(0..=60)),
            from: "f".repeat(rng.random_range(0..=60)),
            song: SongClip {
                url: String::new(),
                start_seconds: rng.random_range(0..600),
                end_seconds: rng.random_range(0..600),
            },
            background: "#A8B5A2".into(),
            wrap: "kraft".into(),
        };

        let view = decode(Some(&encode(&draft).unwrap())).unwrap();
        assert_eq!(view.flowers.len(), draft.flowers.len());
        for (before, after) in draft.flowers.iter().zip(&view.flowers) {
            assert_eq!(after.flower.id, before.flower.id);
            assert_eq!(after.x, before.x.round());
            assert_eq!(after.y, before.y.round());
            assert_eq!(after.rotation_deg, before.rotation_deg.round());
            assert_eq!(after.scale, round_scale(before.scale));
            assert_eq!(after.z_index, before.z_index);
        }
        assert_eq!(view.message, draft.message);
        assert_eq!(view.to, draft.to);
        assert_eq!(view.from, draft.from);
        assert_eq!(view.song, draft.song);
    }
}

#[test]
fn record_projection_round_trips_created_at() {
    let record = BouquetRecord::from_draft("abc".into(), &sample_draft(), "2026-02-14T09:00:00Z".into());
    let encoded = encode_compact(&CompactBouquet::from_record(&record)).unwrap();
    let view = decode(Some(&encoded)).unwrap();
    assert_eq!(view.created_at, "2026-02-14T09:00:00Z");
    assert_eq!(view.flowers.len(), 3);
}

// =============================================================================
// Catalog drift and defaults
// =============================================================================

#[test]
fn unknown_flower_ids_are_dropped() {
    let payload = encode_json(&serde_json::json!({
        "f": [
            {"i": "rose", "x": 1, "y": 2, "s": 1.0, "r": 0, "z": 3},
            {"i": "moonflower", "x": 5, "y": 5, "s": 1.0, "r": 0, "z": 4},
            {"i": "daisy", "x": -1, "y": -2, "s": 0.5, "r": 10, "z": 5}
        ],
        "m": "still here"
    }));
    let view = decode(Some(&payload)).unwrap();
    let ids: Vec<&str> = view.flowers.iter().map(|f| f.flower.id).collect();
    assert_eq!(ids, vec!["rose", "daisy"]);
    assert_eq!(view.flowers[1].scale, 0.5);
    assert_eq!(view.message, "still here");
}

#[test]
fn missing_optional_fields_default() {
    let payload = encode_json(&serde_json::json!({"f": [{"i": "lily"}], "m": "hi"}));
    let view = decode(Some(&payload)).unwrap();
    assert_eq!(view.to, "");
    assert_eq!(view.from, "");
    assert_eq!(view.song, SongClip::default());
    assert_eq!(view.background, catalog::DEFAULT_BACKGROUND);
    assert_eq!(view.wrap, catalog::NO_WRAP);
    assert!(!view.created_at.is_empty());

    let lily = &view.flowers[0];
    assert_eq!((lily.x, lily.y, lily.rotation_deg, lily.z_index), (0.0, 0.0, 0.0, 0));
    assert_eq!(lily.scale, 1.0);
}

#[test]
fn null_fields_default() {
    let payload = encode_json(&serde_json::json!({
        "f": null, "m": null, "t": null, "fr": null,
        "s": {"u": null, "st": null, "en": null}, "b": null, "w": null
    }));
    let view = decode(Some(&payload)).unwrap();
    assert!(view.flowers.is_empty());
    assert_eq!(view.message, "");
    assert_eq!(view.song, SongClip::default());
    assert_eq!(view.wrap, catalog::NO_WRAP);
}

#[test]
fn empty_object_decodes() {
    let view = decode(Some(&encode_json(&serde_json::json!({})))).unwrap();
    assert!(view.flowers.is_empty());
    assert_eq!(view.background, catalog::DEFAULT_BACKGROUND);
}

#[test]
fn fractional_numbers_are_rounded() {
    let payload = encode_json(&serde_json::json!({
        "f": [{"i": "rose", "x": 10.6, "y": -3.2, "s": 0.456, "r": 44.5, "z": 5.0}],
        "s": {"u": "", "st": 12.4, "en": -3}
    }));
    let view = decode(Some(&payload)).unwrap();
    let rose = &view.flowers[0];
    assert_eq!(rose.x, 11.0);
    assert_eq!(rose.y, -3.0);
    assert_eq!(rose.scale, 0.46);
    assert_eq!(rose.rotation_deg, 45.0);
    assert_eq!(rose.z_index, 5);
    assert_eq!(view.song.start_seconds, 12);
    assert_eq!(view.song.end_seconds, 0);
}

// =============================================================================
// Transport dialects
// =============================================================================

#[test]
fn accepts_standard_base64_with_padding() {
    let json = serde_json::to_vec(&CompactBouquet::from_draft(&sample_draft())).unwrap();
    let standard = STANDARD.encode(&json);
    let view = decode(Some(&standard)).unwrap();
    assert_eq!(view.to, "Mía");
}

#[test]
fn accepts_plus_mangled_into_space() {
    // "~~~" lands on a 3-byte boundary and encodes to "fn5+".
    let json = serde_json::json!({"m": "~~~>"});
    let standard = STANDARD.encode(serde_json::to_vec(&json).unwrap());
    let mangled = standard.replace('+', " ");
    assert!(mangled.contains(' '));
    let view = decode(Some(&mangled)).unwrap();
    assert_eq!(view.message, "~~~>");
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn missing_payload_fails() {
    assert!(matches!(decode(None), Err(DecodeError::Missing)));
    assert!(matches!(decode(Some("")), Err(DecodeError::Missing)));
    assert!(matches!(decode(Some("   ")), Err(DecodeError::Missing)));
}

#[test]
fn invalid_base64_fails() {
    assert!(matches!(decode(Some("not*base64!")), Err(DecodeError::Transport(_))));
}

#[test]
fn invalid_utf8_fails() {
    let payload = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]);
    assert!(matches!(decode(Some(&payload)), Err(DecodeError::Utf8(_))));
}

#[test]
fn non_json_fails() {
    let payload = URL_SAFE_NO_PAD.encode("definitely not json");
    assert!(matches!(decode(Some(&payload)), Err(DecodeError::Shape(_))));
}

#[test]
fn wrong_shape_fails() {
    for value in [
        serde_json::json!("just a string"),
        serde_json::json!(42),
        serde_json::json!({"f": "roses"}),
        serde_json::json!({"f": [{"i": 7}]}),
        serde_json::json!({"m": {"nested": true}}),
    ] {
        let payload = encode_json(&value);
        assert!(matches!(decode(Some(&payload)), Err(DecodeError::Shape(_))), "{value} should fail");
    }
}
