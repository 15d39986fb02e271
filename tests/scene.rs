use parhelion::{
    Dirty, OrbitCamera, ProbeScene, Viewport, DRAG_DEGREES_PER_PIXEL, PITCH_LIMIT_DEGREES,
};

#[test]
fn pitch_never_leaves_the_clamp_range() {
    let mut camera = OrbitCamera::default();

    let drags: [(f32, f32); 9] = [
        (10.0, -2000.0),
        (-35.0, 1.5),
        (0.0, 5000.0),
        (120.0, -0.25),
        (-1.0, -1.0),
        (4000.0, 4000.0),
        (0.5, -12345.0),
        (-800.0, 99999.0),
        (3.0, -3.0),
    ];

    for &(dx, dy) in &drags {
        camera.drag(dx, dy);

        assert!(camera.pitch >= -PITCH_LIMIT_DEGREES);
        assert!(camera.pitch <= PITCH_LIMIT_DEGREES);
        assert!(camera.yaw >= 0.0 && camera.yaw < 360.0);
    }
}

#[test]
fn drag_composition_is_deterministic_and_order_sensitive() {
    let mut first = OrbitCamera::default();
    let mut second = OrbitCamera::default();

    for &(dx, dy) in &[(10.0, 4.0), (-3.0, 8.0), (0.25, -2.0)] {
        first.drag(dx, dy);
        second.drag(dx, dy);
    }

    assert_eq!(first, second);

    // saturation makes the composition order observable
    let mut up_first = OrbitCamera::default();
    up_first.drag(0.0, -100000.0);
    up_first.drag(0.0, 40.0);

    let mut down_first = OrbitCamera::default();
    down_first.drag(0.0, 40.0);
    down_first.drag(0.0, -100000.0);

    assert!(up_first.pitch < down_first.pitch);
}

#[test]
fn yaw_wraps_modulo_full_turns() {
    let mut camera = OrbitCamera::default();

    camera.drag(3.0 * 360.0 / DRAG_DEGREES_PER_PIXEL + 4.0, 0.0);

    assert!((camera.yaw - 4.0 * DRAG_DEGREES_PER_PIXEL).abs() < 1e-3);

    camera.drag(-8.0, 0.0);

    assert!(camera.yaw >= 0.0 && camera.yaw < 360.0);
}

#[test]
fn view_direction_tracks_the_orientation() {
    let camera = OrbitCamera::default();
    let dir = camera.direction();

    assert!((dir.x - 0.0).abs() < 1e-6);
    assert!((dir.y - 0.0).abs() < 1e-6);
    assert!((dir.z + 1.0).abs() < 1e-6);

    let mut turned = OrbitCamera::default();
    turned.drag(90.0 / DRAG_DEGREES_PER_PIXEL, 0.0);

    let dir = turned.direction();

    assert!((dir.x - 1.0).abs() < 1e-5);
    assert!(dir.z.abs() < 1e-5);
}

#[test]
fn repeated_identical_resize_is_idempotent() {
    let mut scene = ProbeScene::default();

    Dirty::clean(&mut scene.viewport, |_| Ok::<(), ()>(())).unwrap();

    Dirty::modify(&mut scene.viewport, |viewport| {
        viewport.width = 800;
        viewport.height = 600;
    });

    assert!(Dirty::clean(&mut scene.viewport, |_| Ok::<(), ()>(())).unwrap());

    // same size again: nothing to schedule
    Dirty::modify(&mut scene.viewport, |viewport| {
        viewport.width = 800;
        viewport.height = 600;
    });

    assert!(!Dirty::clean(&mut scene.viewport, |_| Ok::<(), ()>(())).unwrap());

    Dirty::modify(&mut scene.viewport, |viewport| {
        viewport.width = 1024;
        viewport.height = 600;
    });

    assert!(Dirty::clean(&mut scene.viewport, |_| Ok::<(), ()>(())).unwrap());
}

#[test]
fn viewport_projection_is_aspect_correct() {
    let viewport = Viewport {
        width: 1920,
        height: 1080,
    };

    assert!((viewport.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);

    // m[1][1] = cot(fov / 2); m[0][0] = m[1][1] / aspect
    let projection = viewport.projection(90.0);

    assert!((projection[1][1] - 1.0).abs() < 1e-5);
    assert!((projection[0][0] - 1080.0 / 1920.0).abs() < 1e-5);
}

#[test]
fn values_start_dirty_and_track_mutation() {
    let mut value = Dirty::new(7);

    assert!(Dirty::clean(&mut value, |_| Ok::<(), ()>(())).unwrap());
    assert!(!Dirty::clean(&mut value, |_| Ok::<(), ()>(())).unwrap());

    *value = 8;

    assert!(Dirty::clean(&mut value, |&seen| {
        assert_eq!(seen, 8);
        Ok::<(), ()>(())
    })
    .unwrap());

    // a failing update leaves the value dirty for a retry
    *value = 9;

    assert!(Dirty::clean(&mut value, |_| Err(())).is_err());
    assert!(Dirty::clean(&mut value, |_| Ok::<(), ()>(())).unwrap());
}

#[test]
fn scene_state_machine_starts_in_the_placeholder_state() {
    let mut scene = ProbeScene::default();

    assert!(scene.probe.is_none());

    scene.assets.insert(String::from("probe.hdr"), vec![0; 4]);
    *scene.probe = Some(String::from("probe.hdr"));

    // the probe field is dirty, so the next device update performs the load
    assert!(Dirty::clean(&mut scene.probe, |probe| {
        assert!(probe.is_some());
        Ok::<(), ()>(())
    })
    .unwrap());
}
