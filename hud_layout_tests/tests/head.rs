// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Player head elements.

use std::sync::Arc;

use hud_layout::{CacheKind, CompiledPopup, HeadLayout, HeadRenderer, HeadSkin, LayoutGroup};
use hud_primitives::{HeadRenderType, Rgb};

use crate::util::samples::{head, popup};
use crate::util::{TestEnv, TestViewer, assert_unique_chars};

fn group(heads: Vec<HeadLayout>) -> Arc<LayoutGroup> {
    Arc::new(LayoutGroup {
        name: "heads".into(),
        heads,
        ..LayoutGroup::default()
    })
}

fn first_head(compiled: &CompiledPopup) -> &HeadRenderer {
    &compiled.layouts()[0].frames(0)[0].heads()[0]
}

#[test]
fn head_standard_draws_sixty_four_pixels() {
    let mut env = TestEnv::new();
    let compiled = env.build(&popup(
        "party",
        &[&group(vec![HeadLayout::new(head("member", 2))])],
    ));
    let renderer = first_head(&compiled);
    assert_eq!(renderer.rows().len(), 8);
    assert!(renderer.rows().iter().all(|(main, hair)| main == hair));

    let viewer = TestViewer::new().with_skin(HeadSkin::solid(Rgb::new(40, 30, 20)));
    let drawn = renderer.render(&viewer);
    assert_eq!(drawn.component.width(), 16);
    assert_eq!(compiled.render(&viewer, 0, 0).width(), 16);

    let output = env.finish();
    let bitmaps = output.bitmaps("assets/hud/font/popup/party/image.json");
    let ascents: Vec<i64> = bitmaps
        .iter()
        .map(|bitmap| bitmap["ascent"].as_i64().unwrap() + 4096)
        .collect();
    assert_eq!(ascents, [0, 2, 4, 6, 8, 10, 12, 14]);
    assert!(bitmaps.iter().all(|bitmap| bitmap["file"] == "hud:pixel_2.png"));
    assert!(bitmaps.iter().all(|bitmap| bitmap["height"] == 2));

    let texture = output.file("assets/hud/textures/pixel_2.png");
    assert_eq!(&texture.bytes[1..4], b"PNG");
    assert_unique_chars(&output);
}

#[test]
fn head_negative_spaces_live_in_the_image_font() {
    let mut env = TestEnv::new();
    env.build(&popup(
        "party",
        &[&group(vec![HeadLayout::new(head("member", 3))])],
    ));
    let output = env.finish();
    let font = output.json("assets/hud/font/popup/party/image.json");
    let spaces = font["providers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|provider| provider["type"] == "space")
        .expect("the image font has a space provider");
    let mut advances: Vec<i64> = spaces["advances"]
        .as_object()
        .unwrap()
        .values()
        .map(|advance| advance.as_i64().unwrap())
        .collect();
    advances.sort_unstable();
    assert_eq!(advances, [-25, -4, -1]);
}

#[test]
fn head_glyphs_are_shared_between_popups() {
    let mut env = TestEnv::new();
    let member = head("member", 2);
    let a = env.build(&popup(
        "a",
        &[&group(vec![HeadLayout::new(Arc::clone(&member))])],
    ));
    let b = env.build(&popup("b", &[&group(vec![HeadLayout::new(member)])]));
    let other = env.build(&popup(
        "c",
        &[&group(vec![HeadLayout::new(head("leader", 2))])],
    ));

    assert_eq!(first_head(&a).rows(), first_head(&b).rows());
    assert_eq!(
        first_head(&a).rows(),
        first_head(&other).rows(),
        "heads of the same pixel size share glyphs"
    );
    let stats = env.cx.cache_stats(CacheKind::Head);
    assert_eq!(stats.entries, 8);
    assert_eq!(stats.hits, 16);

    let output = env.finish();
    let pixel_bitmaps: usize = output
        .fonts()
        .iter()
        .flat_map(|(_, font)| font["providers"].as_array().unwrap().clone())
        .filter(|provider| provider["file"] == "hud:pixel_2.png")
        .count();
    assert_eq!(pixel_bitmaps, 8);
    assert_unique_chars(&output);
}

#[test]
fn head_fancy_adds_a_hair_layer() {
    let mut env = TestEnv::new();
    let layout = HeadLayout {
        kind: HeadRenderType::Fancy,
        ..HeadLayout::new(head("member", 2))
    };
    let compiled = env.build(&popup("party", &[&group(vec![layout])]));
    let renderer = first_head(&compiled);
    assert!(renderer.rows().iter().all(|(main, hair)| main != hair));
    assert_eq!(env.cx.shader_count(), 2);

    let mut skin = HeadSkin::solid(Rgb::new(1, 2, 3));
    skin.hair[0] = Some(Rgb::new(200, 100, 0));
    let drawn = renderer.render(&TestViewer::new().with_skin(skin));
    assert_eq!(drawn.component.width(), 16);
    let hair = renderer.rows()[0].1.ch;
    assert_eq!(
        drawn.component.content().matches(hair).count(),
        1,
        "only opaque hair pixels are drawn"
    );

    let output = env.finish();
    let table = output.json("assets/hud/shaders/hud_shaders.json");
    let shaders = table["shaders"].as_array().unwrap();
    assert_eq!(shaders[1]["layer"], 1);
    assert_eq!(shaders[1]["outline"], true);
    assert_eq!(shaders[1]["render_scale"], 1.125);

    // The hair rows sit one skin pixel above the face rows, in the second shader's band.
    let hair_ascents: Vec<i64> = output
        .bitmaps("assets/hud/font/popup/party/image.json")
        .iter()
        .map(|bitmap| bitmap["ascent"].as_i64().unwrap())
        .filter(|ascent| *ascent < -6000)
        .map(|ascent| ascent + 2 * 4096)
        .collect();
    assert_eq!(hair_ascents, [-2, 0, 2, 4, 6, 8, 10, 12]);
}

#[test]
fn head_follow_cancels_without_target() {
    let mut env = TestEnv::new();
    let layout = HeadLayout {
        follow: Some(hud_layout::FollowTarget::new("target")),
        ..HeadLayout::new(head("target", 1))
    };
    let compiled = env.build(&popup("target", &[&group(vec![layout])]));
    let renderer = first_head(&compiled);
    assert!(renderer.render(&TestViewer::new()).is_empty());
    let viewer = TestViewer::new().following("target", TestViewer::new());
    assert_eq!(renderer.render(&viewer).component.width(), 8);
}
