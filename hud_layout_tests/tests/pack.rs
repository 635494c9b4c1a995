// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emitted pack files.

use std::sync::Arc;

use hud_layout::{
    AnimationLocation, BuildConfig, ErrorKind, HeadLayout, ImageLayout, LayoutGroup, LocationGroup, PackFile,
    PopupLayout, ShaderProperties, TextLayout, pack_path,
};
use hud_primitives::{GuiLocation, PixelLocation};
use serde_json::json;

use crate::util::samples::{font, head, popup, still};
use crate::util::{TestEnv, assert_unique_chars};

fn heart_group() -> Arc<LayoutGroup> {
    Arc::new(LayoutGroup {
        name: "heart".into(),
        images: vec![ImageLayout::new(still("heart", 9, 9))],
        ..LayoutGroup::default()
    })
}

#[test]
fn pack_bitmap_provider_schema() {
    let mut env = TestEnv::new();
    env.build(&popup("status", &[&heart_group()]));
    let output = env.finish();

    assert_eq!(
        output.json("assets/hud/font/popup/status/image.json"),
        json!({
            "providers": [{
                "type": "bitmap",
                "file": "hud:heart.png",
                "ascent": -4096,
                "height": 9,
                "chars": ["\u{F0000}"]
            }]
        })
    );
    assert_eq!(
        output.json("assets/hud/shaders/hud_shaders.json"),
        json!({
            "shaders": [{
                "id": 0,
                "gui": [0.0, 0.0],
                "render_scale": 1.0,
                "layer": 0,
                "outline": false,
                "opacity": 1.0,
                "properties": {}
            }]
        })
    );
}

#[test]
fn pack_paths_follow_the_config() {
    let config = BuildConfig {
        namespace: "overlay".into(),
        font_directory: "hud/popups".into(),
        max_space: 16,
        ..BuildConfig::default()
    };
    let mut env = TestEnv::with_config(config);
    env.build(&popup("Boss Bar", &[&heart_group()]));
    let output = env.finish();
    assert_eq!(
        output.paths(),
        [
            "assets/overlay/font/hud/popups/-42-oss-20--42-ar/image.json",
            "assets/overlay/font/space.json",
            "assets/overlay/shaders/hud_shaders.json",
        ]
    );
    let space = output.json("assets/overlay/font/space.json");
    assert_eq!(space["providers"][0]["advances"].as_object().unwrap().len(), 32);
}

#[test]
fn pack_shared_text_font_is_emitted_once() {
    let mut env = TestEnv::new();
    let sample = font("sample");
    let group = |pattern: &str| {
        Arc::new(LayoutGroup {
            name: "text".into(),
            texts: vec![TextLayout::new(Arc::clone(&sample), pattern)],
            ..LayoutGroup::default()
        })
    };
    let (first, second) = (group("[hp]"), group("[mana]"));
    env.build(&popup("hp", &[&first]));
    env.build(&popup("mana", &[&second]));
    env.build(&popup("both", &[&first, &second]));
    let output = env.finish();
    let text_fonts = output
        .paths()
        .iter()
        .filter(|path| path.contains("/text_"))
        .count();
    assert_eq!(text_fonts, 1);
}

#[test]
fn pack_chars_are_unique_per_font() {
    let mut env = TestEnv::new();
    let mixed = Arc::new(LayoutGroup {
        name: "mixed".into(),
        images: vec![
            ImageLayout::new(still("heart", 9, 9)),
            ImageLayout::new(still("armor", 9, 9)),
        ],
        texts: vec![TextLayout::new(font("sample"), "[name]")],
        heads: vec![HeadLayout::new(head("player", 1))],
        ..LayoutGroup::default()
    });
    let mut status = popup("status", &[&mixed, &heart_group()]);
    status.move_locations = (0..3)
        .map(|i| LocationGroup {
            pixel: PixelLocation::new(0, i * 20),
            ..LocationGroup::default()
        })
        .collect();
    env.build(&status);
    env.build(&popup("other", &[&mixed]));
    let output = env.finish();
    assert_unique_chars(&output);

    for (path, font) in output.fonts() {
        for provider in font["providers"].as_array().unwrap() {
            let Some(chars) = provider["chars"].as_array() else {
                continue;
            };
            if path.contains("/text_") {
                continue;
            }
            for ch in chars.iter().flat_map(|row| row.as_str().unwrap().chars()) {
                assert!(
                    ('\u{F0000}'..='\u{FFFFD}').contains(&ch),
                    "U+{:X} in `{path}` is outside the popup range",
                    u32::from(ch)
                );
            }
        }
    }
}

#[test]
fn pack_opacity_nearest_override_wins() {
    let mut env = TestEnv::new();
    let faded = Arc::new(LayoutGroup {
        name: "faded".into(),
        images: vec![ImageLayout {
            location: PixelLocation::new(0, 0).with_opacity(0.25),
            ..ImageLayout::new(still("heart", 9, 9))
        }],
        ..LayoutGroup::default()
    });
    let mut status = popup("status", &[&faded, &heart_group()]);
    status.gui = GuiLocation::new(50.0, 10.0);
    status.move_locations = vec![LocationGroup {
        gui: GuiLocation::new(1.0, 2.0),
        pixel: PixelLocation::ZERO.with_opacity(0.5),
    }];
    status.layouts.push(PopupLayout {
        gui: GuiLocation::new(0.0, 5.0),
        ..PopupLayout::new(heart_group())
    });
    let swaying = Arc::new(LayoutGroup {
        name: "swaying".into(),
        animation: AnimationLocation {
            locations: vec![PixelLocation::ZERO.with_opacity(0.3)],
            ..AnimationLocation::default()
        },
        images: vec![ImageLayout::new(still("heart", 9, 9))],
        ..LayoutGroup::default()
    });
    status.layouts.push(PopupLayout {
        gui: GuiLocation::new(0.0, 9.0),
        ..PopupLayout::new(swaying)
    });
    env.build(&status);
    let output = env.finish();
    let table = output.json("assets/hud/shaders/hud_shaders.json");
    let shaders = table["shaders"].as_array().unwrap();
    let opacities: Vec<f64> = shaders
        .iter()
        .map(|shader| shader["opacity"].as_f64().unwrap())
        .collect();
    // The move location outranks the animation frame, the element outranks both.
    assert_eq!(opacities, [0.25, 0.5, 0.5, 0.5]);
    assert_eq!(shaders[0]["gui"], json!([51.0, 12.0]));
    assert_eq!(shaders[2]["gui"], json!([51.0, 17.0]));
}

#[test]
fn pack_move_opacity_applies_over_animation_frames() {
    let mut env = TestEnv::new();
    let swaying = Arc::new(LayoutGroup {
        name: "swaying".into(),
        animation: AnimationLocation {
            locations: vec![PixelLocation::new(0, 1).with_opacity(0.3)],
            ..AnimationLocation::default()
        },
        images: vec![ImageLayout::new(still("heart", 9, 9))],
        ..LayoutGroup::default()
    });
    let mut status = popup("status", &[&swaying]);
    status.move_locations = vec![LocationGroup {
        gui: GuiLocation::ZERO,
        pixel: PixelLocation::ZERO.with_opacity(0.7),
    }];
    env.build(&status);
    let output = env.finish();
    let table = output.json("assets/hud/shaders/hud_shaders.json");
    assert_eq!(table["shaders"][0]["opacity"], json!(0.7));
}

#[test]
fn pack_shader_properties_split_shaders() {
    let mut env = TestEnv::new();
    let mut glowing = ImageLayout::new(still("heart", 9, 9));
    glowing.style.properties = ShaderProperties::from_iter([("glow", "red")]);
    let group = Arc::new(LayoutGroup {
        name: "glow".into(),
        images: vec![glowing, ImageLayout::new(still("heart", 9, 9))],
        ..LayoutGroup::default()
    });
    env.build(&popup("glow", &[&group]));
    assert_eq!(env.cx.shader_count(), 2);
    let output = env.finish();
    let table = output.json("assets/hud/shaders/hud_shaders.json");
    assert_eq!(table["shaders"][0]["properties"], json!({ "glow": "red" }));
}

#[test]
fn pack_ascent_out_of_range_fails_the_build() {
    let mut env = TestEnv::new();
    let low = Arc::new(LayoutGroup {
        name: "low".into(),
        images: vec![ImageLayout {
            location: PixelLocation::new(0, 2048),
            ..ImageLayout::new(still("heart", 9, 9))
        }],
        ..LayoutGroup::default()
    });
    env.build(&popup("low", &[&low]));
    let err = env.cx.finish().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AscentOutOfRange);
}

#[test]
fn pack_extra_tasks_keep_the_first_producer() {
    let mut env = TestEnv::new();
    assert!(
        env.cx
            .add_task(pack_path("pack.mcmeta"), || Ok(b"first".to_vec()))
    );
    assert!(
        !env.cx
            .add_task(pack_path("pack.mcmeta"), || Ok(b"second".to_vec()))
    );
    let queue = env.cx.finish().unwrap();
    let mut sink: Vec<PackFile> = Vec::new();
    let written = queue.write_to(&mut sink).unwrap();
    assert_eq!(written, sink.len());
    let meta = sink
        .iter()
        .find(|file| file.path_string() == "pack.mcmeta")
        .unwrap();
    assert_eq!(meta.bytes, b"first");
}
