mod common;

use common::*;
use cutout_editor::PreviewWorker;
use cutout_editor::adjust::apply;
use std::time::{Duration, Instant};

#[test]
fn delivers_only_the_latest_submission() {
    let base = ellipse_cutout(80, 60);
    let mut worker = PreviewWorker::spawn(base.clone());

    let requests: Vec<ParameterSet> = (0..10)
        .map(|step| ParameterSet {
            rotation_degrees: step as f32 * 10.0,
            blur_radius: 1.0,
            ..ParameterSet::default()
        })
        .collect();
    for params in &requests {
        worker.submit(*params);
    }
    let last = requests[9];

    let rendered = worker.wait_latest().expect("worker should render the last request");

    assert_eq!(rendered.generation, 10);
    assert_eq!(rendered.generation, worker.latest_generation());
    assert_eq!(rendered.params, last);
    assert_eq!(rendered.image, apply(&base, &last));
}

#[test]
fn nothing_pending_returns_none() {
    let mut worker = PreviewWorker::spawn(ellipse_cutout(10, 10));

    assert!(worker.wait_latest().is_none());
    assert!(worker.try_latest().is_none());
}

#[test]
fn latest_is_handed_out_once() {
    let base = ellipse_cutout(16, 16);
    let mut worker = PreviewWorker::spawn(base.clone());

    worker.submit(ParameterSet {
        contrast: 1.5,
        ..ParameterSet::default()
    });
    let first = worker.wait_latest().expect("first render");
    assert_eq!(first.generation, 1);

    assert!(worker.wait_latest().is_none());

    worker.submit(ParameterSet::default());
    let second = worker.wait_latest().expect("second render");
    assert_eq!(second.generation, 2);
    assert_eq!(&second.image, base.image());
}

#[test]
fn try_latest_drains_finished_renders_down_to_newest() {
    let base = ellipse_cutout(24, 24);
    let mut worker = PreviewWorker::spawn(base.clone());

    // Spaced out so the worker finishes each one instead of skipping ahead
    for brightness in [1.1, 1.2, 1.3] {
        worker.submit(ParameterSet {
            brightness,
            ..ParameterSet::default()
        });
        std::thread::sleep(Duration::from_millis(100));
    }

    let deadline = Instant::now() + Duration::from_secs(10);
    let rendered = loop {
        if let Some(rendered) = worker.try_latest() {
            break rendered;
        }
        assert!(Instant::now() < deadline, "worker never finished the latest request");
        std::thread::sleep(Duration::from_millis(10));
    };

    assert_eq!(rendered.generation, 3);
    assert_eq!(rendered.params.brightness, 1.3);
    assert_eq!(rendered.image, apply(&base, &rendered.params));
    // Older results were consumed along the way
    assert!(worker.try_latest().is_none());
    assert!(worker.wait_latest().is_none());
}
