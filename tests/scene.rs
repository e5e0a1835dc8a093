use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DVec2, DVec3};
use pretty_assertions::assert_eq;

use portfolio_fx::entities::{
    EnergyWave, GeometryObject, GridNode, HolographicGrid, Particle, QuantumTunnel, Shape,
    TunnelPoint,
};
use portfolio_fx::surface::{
    Color, DrawCall, Hsl, Paint, RadialGradient, RecordingSurface, Rgba, Stroke, Surface,
};
use portfolio_fx::{Scene, SceneConfig, Viewport};

const VIEW: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

fn particle_at(position: DVec3, size: f64) -> Particle {
    Particle {
        position,
        velocity: DVec3::ZERO,
        size,
        color: Hsl { h: 240.0, s: 80.0, l: 60.0 },
        life: 1.0,
        decay: 0.01,
        rotation: 0.0,
        rotation_speed: 0.0,
    }
}

fn single_particle_scene(particle: Particle, with_lights: bool) -> Scene {
    let mut config = SceneConfig::empty();
    config.particle_count = 1;
    if with_lights {
        config.lights = SceneConfig::default().lights;
    }
    let mut scene = Scene::new(config, VIEW, 7).unwrap();
    scene.particles_mut()[0] = particle;
    scene
}

fn is_particle_fill(call: &DrawCall) -> bool {
    matches!(call, DrawCall::FillCircle { paint: Paint::Radial(g), .. } if g.stops.len() == 2)
}

#[test]
fn life_stays_in_unit_range_and_particles_never_stay_dead() {
    let mut scene = Scene::new(SceneConfig::default(), VIEW, 1).unwrap();
    for _ in 0..1_000 {
        scene.tick(1.0 / 60.0);
        for p in scene.particles() {
            assert!(p.life > 0.0 && p.life <= 1.0, "life {}", p.life);
        }
    }
    // every particle decays at >= 0.005/tick, so all have respawned at least once
    assert!(scene.stats().respawns >= scene.particles().len() as u64);
}

#[test]
fn wrapped_positions_stay_in_bounds() {
    let config = SceneConfig::default();
    let margin = config.geometry_margin;
    let depth = config.particle_depth;
    let solid_depth = config.geometry_depth + margin;
    let mut scene = Scene::new(config, VIEW, 99).unwrap();

    for _ in 0..3_000 {
        scene.tick(1.0 / 60.0);
        for p in scene.particles() {
            assert!((0.0..=VIEW.width).contains(&p.position.x));
            assert!((0.0..=VIEW.height).contains(&p.position.y));
            assert!((-depth..=depth).contains(&p.position.z));
        }
        for g in scene.geometry() {
            assert!((-margin..=VIEW.width + margin).contains(&g.position.x));
            assert!((-margin..=VIEW.height + margin).contains(&g.position.y));
            assert!((-solid_depth..=solid_depth).contains(&g.position.z));
        }
    }
}

#[test]
fn same_seed_same_scene() {
    let a = Scene::new(SceneConfig::default(), VIEW, 1234).unwrap();
    let b = Scene::new(SceneConfig::default(), VIEW, 1234).unwrap();
    let c = Scene::new(SceneConfig::default(), VIEW, 4321).unwrap();

    assert_eq!(a.particles(), b.particles());
    assert_eq!(a.geometry(), b.geometry());
    assert_eq!(a.waves(), b.waves());
    assert_eq!(a.tunnels(), b.tunnels());
    assert_eq!(a.grid(), b.grid());
    assert_ne!(a.particles(), c.particles());
}

#[test]
fn default_scene_population() {
    let scene = Scene::new(SceneConfig::default(), VIEW, 3).unwrap();
    assert_eq!(scene.particles().len(), 200);
    assert_eq!(scene.geometry().len(), 14);
    assert_eq!(scene.waves().len(), 10);
    assert_eq!(scene.tunnels().len(), 3);
    assert_eq!(scene.lights().len(), 3);
    // ceil(800 / 50) x ceil(600 / 50)
    assert_eq!(scene.grid().nodes.len(), 16 * 12);
    assert!(scene.lights()[0].position.distance(DVec3::new(240.0, 120.0, 200.0)) < 1e-9);
}

#[test]
fn unlit_particle_at_depth_zero_draws_unscaled() {
    let scene = single_particle_scene(particle_at(DVec3::new(100.0, 100.0, 0.0), 2.0), false);
    let mut surface = RecordingSurface::new(VIEW.width, VIEW.height);
    let stats = scene.render(&mut surface);
    assert_eq!(stats.particles_drawn, 1);

    let calls = surface.calls();
    let at = calls.iter().position(is_particle_fill).unwrap();
    assert_eq!(calls[at - 1], DrawCall::GlobalAlpha(0.3));
    match &calls[at] {
        DrawCall::FillCircle { center, radius, paint: Paint::Radial(g) } => {
            assert_eq!(*center, DVec2::new(100.0, 100.0));
            assert_eq!(*radius, 4.0);
            assert_eq!(g.stops[0].1, Color::Hsl(Hsl { h: 240.0, s: 80.0, l: 60.0 }));
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[test]
fn lit_particle_is_brighter() {
    // sits on the first default light: (0.3w, 0.2h, 200), intensity 0.8
    let mut p = particle_at(DVec3::new(240.0, 120.0, 200.0), 2.0);
    p.life = 0.5;
    let scene = single_particle_scene(p, true);

    // the third light (400, 300, 100), radius 400, also reaches it
    let third = 0.4 * (1.0 - 68_000f64.sqrt() / 400.0);
    let expected = 0.5 * (0.3 + 0.7 * (0.8 + third));
    let lit = scene.particles()[0].base_alpha(scene.lights());
    assert!((lit - expected).abs() < 1e-9, "lit {lit} expected {expected}");

    let dark = scene.particles()[0].base_alpha(&[]);
    assert!((dark - 0.15).abs() < 1e-12);
    assert!(lit > dark);
}

#[test]
fn far_particle_is_culled() {
    let scene = single_particle_scene(particle_at(DVec3::new(400.0, 300.0, 4_500.0), 3.0), true);
    let mut surface = RecordingSurface::new(VIEW.width, VIEW.height);
    let stats = scene.render(&mut surface);

    assert_eq!(stats.particles_drawn, 0);
    assert_eq!(stats.particles_culled, 1);
    assert!(!surface.calls().iter().any(is_particle_fill));
}

#[test]
fn far_solid_is_culled() {
    let mut config = SceneConfig::empty();
    config.shapes.torus = 1;
    let mut scene = Scene::new(config, VIEW, 5).unwrap();
    scene.geometry_mut()[0].position = DVec3::new(10.0, 10.0, 10_000.0);

    let mut surface = RecordingSurface::new(VIEW.width, VIEW.height);
    let stats = scene.render(&mut surface);
    assert_eq!((stats.geometry_drawn, stats.geometry_culled), (0, 1));
    assert!(!surface
        .calls()
        .iter()
        .any(|c| matches!(c, DrawCall::StrokeCircle { stroke, .. } if stroke.width == 3.0)));
}

#[test]
fn wave_resets_only_once_radius_exceeds_max() {
    let mut config = SceneConfig::empty();
    config.wave_count = 1;
    let mut scene = Scene::new(config, VIEW, 21).unwrap();
    let origin = DVec2::new(-1.0, -1.0);
    scene.waves_mut()[0] = EnergyWave {
        origin,
        radius: 0.0,
        max_radius: 150.0,
        speed: 5.0,
        intensity: 0.3,
        frequency: 0.02,
        phase: 0.0,
    };

    for _ in 0..30 {
        scene.tick(1.0 / 60.0);
    }
    assert_eq!(scene.waves()[0].radius, 150.0);
    assert_eq!(scene.waves()[0].origin, origin);
    assert_eq!(scene.stats().wave_resets, 0);

    scene.tick(1.0 / 60.0);
    let wave = &scene.waves()[0];
    assert_eq!(wave.radius, 0.0);
    assert_ne!(wave.origin, origin);
    assert!((0.0..=VIEW.width).contains(&wave.origin.x));
    assert!((0.0..=VIEW.height).contains(&wave.origin.y));
    assert_eq!(scene.stats().wave_resets, 1);
}

#[test]
fn frame_fades_first_and_sets_bloom_last() {
    let mut scene = Scene::new(SceneConfig::default(), VIEW, 8).unwrap();
    let mut surface = RecordingSurface::new(VIEW.width, VIEW.height);
    scene.frame(&mut surface, 1.0 / 60.0);

    let calls = surface.calls();
    match &calls[0] {
        DrawCall::FillRect { origin, size, color: Color::Rgba(c) } => {
            assert_eq!(*origin, DVec2::ZERO);
            assert_eq!(*size, DVec2::new(800.0, 600.0));
            assert_eq!(c.a, 0.05);
        }
        other => panic!("expected fade, got {other:?}"),
    }
    assert!(matches!(calls.last(), Some(DrawCall::Shadow { blur, .. }) if *blur == 10.0));

    // waves (three-stop gradients) are painted before any particle
    let last_wave = calls
        .iter()
        .rposition(|c| matches!(c, DrawCall::FillCircle { paint: Paint::Radial(g), .. } if g.stops.len() == 3))
        .unwrap();
    let first_particle = calls.iter().position(is_particle_fill).unwrap();
    assert!(last_wave < first_particle);
}

#[test]
fn zero_size_viewport_still_runs() {
    let mut scene = Scene::new(SceneConfig::default(), Viewport::default(), 2).unwrap();
    let mut surface = RecordingSurface::new(0.0, 0.0);
    for _ in 0..10 {
        scene.frame(&mut surface, 1.0 / 60.0);
    }
    assert!(scene.grid().nodes.is_empty());
    assert!(matches!(
        surface.calls()[0],
        DrawCall::FillRect { size, .. } if size == DVec2::ZERO
    ));
}

#[test]
fn resize_leaves_entities_to_wrap_on_their_own() {
    let mut config = SceneConfig::empty();
    config.shapes.octahedron = 1;
    let mut scene = Scene::new(config, VIEW, 4).unwrap();
    {
        let solid = &mut scene.geometry_mut()[0];
        solid.position = DVec3::new(780.0, 300.0, 0.0);
        solid.velocity = DVec3::ZERO;
    }

    scene.resize(Viewport::new(400.0, 300.0));
    assert_eq!(scene.viewport(), Viewport::new(400.0, 300.0));
    assert_eq!(scene.geometry()[0].position.x, 780.0);

    scene.tick(1.0 / 60.0);
    assert_eq!(scene.geometry()[0].position.x, -100.0);
}

#[test]
fn cursor_input_reaches_the_overlay() {
    let mut scene = Scene::new(SceneConfig::empty(), VIEW, 4).unwrap();
    scene.pointer_moved(200.0, 100.0);
    scene.clicked();
    scene.tick(1.0 / 60.0);
    assert_eq!(scene.cursor().ripples().len(), 1);
    assert_eq!(scene.cursor().ripples()[0].center, DVec2::new(200.0, 100.0));

    for _ in 0..80 {
        scene.tick(1.0 / 60.0);
    }
    assert!(scene.cursor().ripples().is_empty());
    assert!(scene.cursor().head().distance(DVec2::new(200.0, 100.0)) < 1.0);
}

#[test]
fn invalid_config_is_rejected() {
    let config = SceneConfig {
        perspective: -1.0,
        ..SceneConfig::default()
    };
    assert!(Scene::new(config, VIEW, 0).is_err());
}

fn rgba_alpha(color: Color) -> f64 {
    match color {
        Color::Rgba(c) => c.a,
        Color::Hsl(_) => panic!("expected an rgba color"),
    }
}

fn solid_scene_at(z: f64) -> Scene {
    let mut config = SceneConfig::empty();
    config.shapes.octahedron = 1;
    let mut scene = Scene::new(config, VIEW, 12).unwrap();
    scene.geometry_mut()[0] = GeometryObject {
        shape: Shape::Octahedron,
        position: DVec3::new(200.0, 100.0, z),
        rotation: DVec3::ZERO,
        rotation_speed: DVec3::ZERO,
        size: 40.0,
        color: Rgba::new(200, 150, 255, 0.5),
        velocity: DVec3::ZERO,
    };
    scene
}

#[test]
fn solid_alpha_follows_depth() {
    for (z, alpha, center, half) in [
        (0.0, 0.5, DVec2::new(200.0, 100.0), 20.0),
        (500.0, 0.25, DVec2::new(100.0, 50.0), 10.0),
    ] {
        let scene = solid_scene_at(z);
        let mut surface = RecordingSurface::new(VIEW.width, VIEW.height);
        let stats = scene.render(&mut surface);
        assert_eq!(stats.geometry_drawn, 1);

        let calls = surface.calls();
        let at = calls
            .iter()
            .position(|c| matches!(c, DrawCall::GlobalAlpha(_)))
            .unwrap();
        assert_eq!(calls[at], DrawCall::GlobalAlpha(alpha));
        assert_eq!(
            calls[at + 1],
            DrawCall::StrokePath {
                points: vec![
                    center + DVec2::new(0.0, -half),
                    center + DVec2::new(half, 0.0),
                    center + DVec2::new(0.0, half),
                    center + DVec2::new(-half, 0.0),
                ],
                closed: true,
                stroke: Stroke::new(Rgba::new(200, 150, 255, 0.5), 2.0),
            }
        );
        assert_eq!(calls[at + 2], DrawCall::Restore);
    }
}

#[test]
fn grid_glow_drives_dot_and_line_alpha() {
    // clock + pulse lands on the sine peak for the first node, the trough
    // for the second
    let clock = 0.5;
    let grid = HolographicGrid {
        columns: 1,
        rows: 2,
        spacing: 50.0,
        nodes: vec![
            GridNode {
                position: DVec3::new(0.0, 0.0, 0.0),
                intensity: 0.6,
                pulse: FRAC_PI_2 - clock,
            },
            GridNode {
                position: DVec3::new(0.0, 50.0, 3.0),
                intensity: 0.4,
                pulse: 3.0 * FRAC_PI_2 - clock,
            },
        ],
        connections: vec![(0, 1)],
        clock,
    };
    let mut surface = RecordingSurface::new(100.0, 100.0);
    grid.draw(&mut surface);

    let calls = surface.calls();
    assert_eq!(calls.len(), 3);
    let dots: Vec<(DVec2, f64, f64)> = calls[..2]
        .iter()
        .map(|c| match c {
            DrawCall::FillCircle { center, radius, paint: Paint::Solid(color) } => {
                (*center, *radius, rgba_alpha(*color))
            }
            other => panic!("expected a grid dot, got {other:?}"),
        })
        .collect();
    assert_eq!((dots[0].0, dots[0].1), (DVec2::ZERO, 1.0));
    assert!((dots[0].2 - 0.3 * 0.6).abs() < 1e-12);
    assert_eq!((dots[1].0, dots[1].1), (DVec2::new(0.0, 50.0), 1.0));
    assert!(dots[1].2.abs() < 1e-12);

    match &calls[2] {
        DrawCall::StrokePath { points, closed, stroke } => {
            assert_eq!(points, &vec![DVec2::ZERO, DVec2::new(0.0, 50.0)]);
            assert!(!closed);
            assert_eq!(stroke.width, 0.5);
            assert!((rgba_alpha(stroke.color) - 0.1 * 0.6).abs() < 1e-12);
        }
        other => panic!("expected a grid connection, got {other:?}"),
    }
}

fn two_point_tunnel(flow: f64) -> QuantumTunnel {
    QuantumTunnel {
        points: vec![
            TunnelPoint {
                position: DVec3::new(100.0, 50.0, -10.0),
                offset: 0.0,
            },
            TunnelPoint {
                position: DVec3::new(200.0, 80.0, 10.0),
                offset: 25.0,
            },
        ],
        radius: 30.0,
        length: 20.0,
        rotation: 0.0,
        rotation_speed: 0.0,
        flow,
        flow_speed: 0.05,
    }
}

#[test]
fn tunnel_segment_color_and_offset_endpoints() {
    // segment 0 of 2: phase (0/2 + flow)·2π
    for (flow, alpha) in [(0.25, 0.5), (0.0, 0.25), (0.75, 0.0)] {
        let tunnel = two_point_tunnel(flow);
        let mut surface = RecordingSurface::new(VIEW.width, VIEW.height);
        assert_eq!(tunnel.draw(&mut surface), 1);

        match &surface.calls()[..] {
            [DrawCall::StrokePath { points, closed, stroke }] => {
                assert_eq!(points, &vec![DVec2::new(100.0, 50.0), DVec2::new(225.0, 80.0)]);
                assert!(!closed);
                assert_eq!(stroke.width, 2.0);
                match stroke.color {
                    Color::Rgba(c) => {
                        assert_eq!((c.r, c.g, c.b), (245, 87, 108));
                        assert!((c.a - alpha).abs() < 1e-12, "flow {flow}: alpha {}", c.a);
                    }
                    other => panic!("unexpected color {other:?}"),
                }
            }
            other => panic!("expected one segment, got {other:?}"),
        }
    }
}

#[test]
fn wave_gradient_has_three_stops() {
    let wave = EnergyWave {
        origin: DVec2::new(50.0, 60.0),
        radius: 40.0,
        max_radius: 200.0,
        speed: 2.0,
        intensity: 0.4,
        frequency: 0.02,
        phase: PI,
    };
    let mut surface = RecordingSurface::new(VIEW.width, VIEW.height);
    assert!(wave.draw(&mut surface));

    let expected = DrawCall::FillCircle {
        center: DVec2::new(50.0, 60.0),
        radius: 40.0,
        paint: Paint::Radial(RadialGradient {
            center: DVec2::new(50.0, 60.0),
            radius: 40.0,
            stops: vec![
                (0.0, Rgba::new(79, 172, 254, 0.4).into()),
                (0.5, Rgba::new(102, 126, 234, 0.2).into()),
                (1.0, Rgba::new(79, 172, 254, 0.0).into()),
            ],
        }),
    };
    assert_eq!(surface.calls(), &[expected][..]);
    assert_eq!(surface.size(), DVec2::new(800.0, 600.0));
}
