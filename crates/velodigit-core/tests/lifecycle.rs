//! Scene lifecycle tests against a recording host.

use velodigit_core::frame::{Command, Primitive};
use velodigit_core::layout::labelled_draw_count;
use velodigit_core::{
    Glyph, HostError, Readout, RecordingHost, Rgba, SceneConfig, SceneError, SceneOps,
    SpeedometerScene, TextureId,
};

fn initialized_scene() -> (SpeedometerScene, RecordingHost) {
    let mut host = RecordingHost::new();
    let mut scene = SpeedometerScene::default();
    scene.gl_init(&mut host).expect("init should succeed");
    (scene, host)
}

#[test]
fn test_init_submits_a_single_clear() {
    let (scene, host) = initialized_scene();
    assert_eq!(host.frames.len(), 1);
    assert_eq!(
        host.frames[0].commands(),
        &[Command::Clear {
            color: Rgba::TRANSPARENT,
            depth: 1.0
        }]
    );
    assert_eq!(scene.animation().step, 0);
    assert_eq!(scene.animation().angle, 0.0);
}

#[test]
fn test_failed_init_propagates_host_code_and_draws_nothing() {
    let mut host = RecordingHost::failing_init(HostError::new(-7, "no EGL display"));
    let mut scene = SpeedometerScene::default();
    let err = scene.gl_init(&mut host).expect_err("init should fail");
    assert_eq!(err.host_code(), Some(-7));
    match err {
        SceneError::Host(inner) => assert_eq!(inner, HostError::new(-7, "no EGL display")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(host.frames.is_empty());
    assert_eq!(scene.animation().step, 0);

    // The scene stays unusable until a successful init.
    assert!(matches!(
        scene.redraw(&mut host, &Readout::default()),
        Err(SceneError::NotInitialized)
    ));
}

#[test]
fn test_step_counter_wraps_after_full_loop() {
    let (mut scene, mut host) = initialized_scene();
    for _ in 0..449 {
        scene.update_model(&mut host).unwrap();
    }
    assert_eq!(scene.animation().step, 449);
    scene.update_model(&mut host).unwrap();
    assert_eq!(scene.animation().step, 0);
    assert_eq!(scene.animation().angle, 0.0);
}

#[test]
fn test_reinit_resets_step_counter() {
    let (mut scene, mut host) = initialized_scene();
    for _ in 0..10 {
        scene.update_model(&mut host).unwrap();
    }
    scene.gl_init(&mut host).unwrap();
    assert_eq!(scene.animation().step, 0);
}

#[test]
fn test_redraw_frame_order() {
    let (mut scene, mut host) = initialized_scene();
    host.texture = TextureId(42);
    let readout = Readout {
        speed: 25.6,
        average_speed: 25.3,
    };
    scene.update_model(&mut host).unwrap();
    scene.redraw(&mut host, &readout).unwrap();

    let frame = host.last_frame().expect("redraw submits a frame");
    let commands = frame.commands();
    assert!(matches!(commands[0], Command::Clear { .. }));
    assert_eq!(commands[1], Command::SetDepthTest(true));
    assert_eq!(commands[2], Command::SetBlend(true));
    match &commands[3] {
        Command::Draw(draw) => {
            assert_eq!(draw.primitive, Primitive::CameraQuad);
            assert_eq!(draw.texture, Some(TextureId(42)));
        }
        other => panic!("expected camera quad, got {other:?}"),
    }
    assert_eq!(commands[4], Command::SetColor(Rgba::RED));
    assert_eq!(commands.last(), Some(&Command::SetColor(Rgba::WHITE)));

    let camera_draws = frame
        .draws()
        .filter(|d| d.primitive == Primitive::CameraQuad)
        .count();
    assert_eq!(camera_draws, 1);
}

#[test]
fn test_redraw_draw_count_matches_formula() {
    let (mut scene, mut host) = initialized_scene();
    for (speed, average_speed) in [(25.6, 25.3), (0.0, 99.9), (88.8, 11.1), (-4.0, 500.0)] {
        let readout = Readout {
            speed,
            average_speed,
        };
        scene.redraw(&mut host, &readout).unwrap();
        let frame = host.last_frame().unwrap();
        let expected = 1
            + labelled_draw_count(Glyph::V, speed)
            + labelled_draw_count(Glyph::M, average_speed);
        assert_eq!(frame.draws().count(), expected, "{readout:?}");
        // One decimal point per readout.
        let points = frame
            .draws()
            .filter(|d| d.primitive == Primitive::Point)
            .count();
        assert_eq!(points, 2);
    }
}

#[test]
fn test_readouts_use_their_label_colours() {
    let (mut scene, mut host) = initialized_scene();
    scene
        .redraw(
            &mut host,
            &Readout {
                speed: 10.0,
                average_speed: 20.0,
            },
        )
        .unwrap();
    let frame = host.last_frame().unwrap();
    let colored = frame.colored_draws();
    let speed_draws = labelled_draw_count(Glyph::V, 10.0);
    assert_eq!(colored[0].0, Rgba::WHITE);
    assert!(colored[1..=speed_draws].iter().all(|(c, _)| *c == Rgba::RED));
    assert!(
        colored[speed_draws + 1..]
            .iter()
            .all(|(c, _)| *c == Rgba::ORANGE)
    );
}

#[test]
fn test_overlay_draws_carry_no_texture() {
    let (mut scene, mut host) = initialized_scene();
    scene.redraw(&mut host, &Readout::default()).unwrap();
    let frame = host.last_frame().unwrap();
    assert!(
        frame
            .draws()
            .filter(|d| d.primitive != Primitive::CameraQuad)
            .all(|d| d.texture.is_none() && d.tex_coords().is_none())
    );
}

#[test]
fn test_custom_loop_period() {
    let config = SceneConfig {
        frames_per_loop: 5,
        ..SceneConfig::default()
    };
    let mut host = RecordingHost::new();
    let mut scene = SpeedometerScene::new(config);
    scene.gl_init(&mut host).unwrap();
    for _ in 0..5 {
        scene.update_model(&mut host).unwrap();
    }
    assert_eq!(scene.animation().step, 0);
}
