use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use zoomlet::{
    Geometry, InputEvent, LonLat, MoveEvent, MoveListener, Point, Projection, ViewPosition,
    ViewTransform, ZoomConfig, ZoomController, ZoomEvent,
};

/// Projection that treats lon/lat as raw pixel coordinates, so geometry
/// coordinates land verbatim in pixel space
struct PixelProjection;

impl Projection for PixelProjection {
    fn project(&self, coord: &LonLat) -> Point {
        Point::new(coord.lon, coord.lat)
    }

    fn invert(&self, point: &Point) -> LonLat {
        LonLat::new(point.x, point.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Start(f64),
    Move { k: f64, dragging: bool },
    End(f64),
}

struct Recorder {
    log: Arc<Mutex<Vec<Entry>>>,
}

impl MoveListener for Recorder {
    fn on_move_start(&mut self, event: &MoveEvent, _raw: &ZoomEvent) {
        self.log.lock().unwrap().push(Entry::Start(event.zoom));
    }

    fn on_move(&mut self, position: &ViewPosition, _raw: &ZoomEvent) {
        self.log.lock().unwrap().push(Entry::Move {
            k: position.k,
            dragging: position.dragging.is_some(),
        });
    }

    fn on_move_end(&mut self, event: &MoveEvent, _raw: &ZoomEvent) {
        self.log.lock().unwrap().push(Entry::End(event.zoom));
    }
}

fn recorder() -> (Box<Recorder>, Arc<Mutex<Vec<Entry>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    (Box::new(Recorder { log: log.clone() }), log)
}

/// Pixel-space square [[100,100],[300,300]] under [`PixelProjection`]
fn square_geometry() -> Geometry {
    Geometry::Polygon {
        coordinates: vec![vec![
            [100.0, 100.0],
            [300.0, 100.0],
            [300.0, 300.0],
            [100.0, 300.0],
            [100.0, 100.0],
        ]],
    }
}

#[test]
fn fits_the_reference_scenario() {
    // 800x600 viewport, bbox [[100,100],[300,300]], margin 0.1, max zoom 8:
    // k = min(8, 0.9 / max(200/800, 200/600)) = 2.7, translated so the bbox
    // center lands on the viewport center.
    let config = ZoomConfig::new(800.0, 600.0)
        .with_bounds_margin(0.1)
        .with_duration_ms(0.0);
    let mut controller = ZoomController::new(config, PixelProjection).unwrap();

    controller.set_bounds_to(Some(square_geometry()));
    controller.tick(0.0);

    let t = controller.transform();
    assert_relative_eq!(t.k, 2.7, max_relative = 1e-12);
    assert_relative_eq!(t.x, 400.0 - 2.7 * 200.0, max_relative = 1e-12);
    assert_relative_eq!(t.y, 300.0 - 2.7 * 200.0, max_relative = 1e-12);
}

#[test]
fn full_lifecycle_mount_gesture_retarget() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (listener, log) = recorder();
    let config = ZoomConfig::new(800.0, 600.0)
        .with_bounds_margin(0.1)
        .with_duration_ms(100.0)
        .with_bounds_from(square_geometry());
    let mut controller =
        ZoomController::with_listener(config, PixelProjection, listener).unwrap();

    // Mount applied the initial fit without any hook calls.
    assert_relative_eq!(controller.position().k, 2.7, max_relative = 1e-12);
    assert!(log.lock().unwrap().is_empty());

    // A touch gesture moves the view and reports itself as dragging.
    controller.handle_event(InputEvent::TouchStart {
        position: Point::new(400.0, 300.0),
    });
    controller.handle_event(InputEvent::TouchMove {
        delta: Point::new(-20.0, 10.0),
        scale: 1.0,
        center: Point::new(400.0, 300.0),
    });
    controller.handle_event(InputEvent::TouchEnd);

    {
        let entries = log.lock().unwrap();
        assert_eq!(entries.len(), 3);
        assert!(matches!(entries[1], Entry::Move { dragging: true, .. }));
        assert!(matches!(entries[2], Entry::End(_)));
    }

    // Retargeting animates back through the same hook stream, minus the
    // dragging flag.
    controller.set_bounds_to(Some(square_geometry()));
    assert!(controller.is_transitioning());
    controller.tick(50.0);
    controller.tick(50.0);
    assert!(!controller.is_transitioning());

    let entries = log.lock().unwrap();
    assert!(matches!(entries[3], Entry::Start(_)));
    assert!(entries[4..]
        .iter()
        .all(|e| !matches!(e, Entry::Move { dragging: true, .. })));
    assert!(matches!(entries.last().unwrap(), Entry::End(k) if (*k - 2.7).abs() < 1e-9));

    assert_relative_eq!(controller.transform().k, 2.7, max_relative = 1e-12);
    assert_eq!(controller.settled_transform(), controller.transform());
}

#[test]
fn rapid_retargets_restart_cleanly() {
    let (listener, log) = recorder();
    let config = ZoomConfig::new(800.0, 600.0)
        .with_bounds_margin(0.1)
        .with_duration_ms(100.0);
    let mut controller =
        ZoomController::with_listener(config, PixelProjection, listener).unwrap();

    let other_square = Geometry::Polygon {
        coordinates: vec![vec![
            [500.0, 400.0],
            [700.0, 400.0],
            [700.0, 500.0],
            [500.0, 500.0],
            [500.0, 400.0],
        ]],
    };

    controller.set_bounds_to(Some(square_geometry()));
    controller.tick(10.0);
    controller.set_bounds_to(Some(other_square));
    controller.tick(10.0);
    controller.set_bounds_to(None);
    controller.tick(200.0);

    assert!(!controller.is_transitioning());
    assert_eq!(controller.transform(), ViewTransform::identity());

    // Every Start is paired with an End, in order.
    let mut open = 0;
    for entry in log.lock().unwrap().iter() {
        match entry {
            Entry::Start(_) => open += 1,
            Entry::End(_) => {
                assert!(open > 0, "End without a matching Start");
                open -= 1;
            }
            Entry::Move { .. } => assert!(open > 0, "Move outside a sequence"),
        }
    }
    assert_eq!(open, 0);
}

#[test]
fn point_target_centers_at_max_zoom() {
    let config = ZoomConfig::new(800.0, 600.0)
        .with_bounds_margin(0.1)
        .with_duration_ms(0.0);
    let mut controller = ZoomController::new(config, PixelProjection).unwrap();

    controller.set_bounds_to(Some(Geometry::Point {
        coordinates: [250.0, 150.0],
    }));
    controller.tick(0.0);

    let t = controller.transform();
    assert_eq!(t.k, 8.0);
    assert_relative_eq!(t.x, 400.0 - 8.0 * 250.0, max_relative = 1e-12);
    assert_relative_eq!(t.y, 300.0 - 8.0 * 150.0, max_relative = 1e-12);
}

#[test]
fn parsed_geojson_drives_the_controller() {
    let geojson = r#"{
        "type": "Polygon",
        "coordinates": [[[100.0, 100.0], [300.0, 100.0], [300.0, 300.0], [100.0, 300.0], [100.0, 100.0]]]
    }"#;
    let geometry = Geometry::from_str(geojson).unwrap();

    let config = ZoomConfig::new(800.0, 600.0)
        .with_bounds_margin(0.1)
        .with_duration_ms(0.0);
    let mut controller = ZoomController::new(config, PixelProjection).unwrap();

    controller.set_bounds_to(Some(geometry));
    controller.tick(0.0);

    assert_relative_eq!(controller.transform().k, 2.7, max_relative = 1e-12);
    // The exposed position mirrors the behavior's transform.
    assert_eq!(controller.position().transform(), controller.transform());
}
