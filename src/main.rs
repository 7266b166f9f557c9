//! Headless demo host: replays a scripted touch session against a
//! `NavigationController` at a paced frame rate and logs the camera.
//!
//! Run with `RUST_LOG=debug` to see gesture state changes. An optional
//! argument names a TOML options file.

use std::path::Path;

use glam::Vec3;
use orbitnav::camera::{CameraPose, ViewState};
use orbitnav::input::{EventFn, GestureEvent, TouchEvent, TouchPoint};
use orbitnav::util::frame_timing::FrameTiming;
use orbitnav::{NavError, NavigationController, Options};

/// One scripted input, applied on the first frame at or after `at_ms`.
enum Step {
    Touch(TouchEvent),
    View(ViewState, CameraPose),
}

fn finger(id: u64, x: f32, y: f32, t: f64) -> Vec<TouchPoint> {
    vec![TouchPoint::new(id, x, y, t)]
}

fn script() -> Vec<(f64, Step)> {
    let mut steps = vec![
        // Single tap
        (100.0, Step::Touch(TouchEvent::Start(finger(0, 200.0, 300.0, 100.0)))),
        (160.0, Step::Touch(TouchEvent::End(finger(0, 201.0, 300.0, 160.0)))),
        // Horizontal fling
        (700.0, Step::Touch(TouchEvent::Start(finger(1, 100.0, 300.0, 700.0)))),
    ];
    for i in 1..=6 {
        let t = 700.0 + f64::from(i) * 16.0;
        let x = 100.0 + i as f32 * 25.0;
        steps.push((t, Step::Touch(TouchEvent::Move(finger(1, x, 300.0, t), t))));
    }
    steps.extend([
        (810.0, Step::Touch(TouchEvent::End(finger(1, 250.0, 300.0, 810.0)))),
        // Pinch out to half the distance
        (
            1800.0,
            Step::Touch(TouchEvent::Start(vec![
                TouchPoint::new(2, 150.0, 300.0, 1800.0),
                TouchPoint::new(3, 250.0, 300.0, 1800.0),
            ])),
        ),
        (
            1850.0,
            Step::Touch(TouchEvent::Move(
                vec![
                    TouchPoint::new(2, 100.0, 300.0, 1850.0),
                    TouchPoint::new(3, 300.0, 300.0, 1850.0),
                ],
                1850.0,
            )),
        ),
        (1900.0, Step::Touch(TouchEvent::End(finger(3, 300.0, 300.0, 1900.0)))),
        (1910.0, Step::Touch(TouchEvent::End(finger(2, 100.0, 300.0, 1910.0)))),
        // Zoom into a ring, then back out
        (
            2100.0,
            Step::View(
                ViewState::Ring,
                CameraPose::new(Vec3::new(0.0, 20.0, 30.0), Vec3::new(0.0, 5.0, 0.0)),
            ),
        ),
        (2700.0, Step::View(ViewState::Overview, CameraPose::default())),
    ]);
    steps
}

fn main() -> Result<(), NavError> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading options from {path}");
            Options::load(Path::new(&path))?
        }
        None => Options::default(),
    };

    let mut nav = NavigationController::new(options);
    nav.set_home_position(nav.current_pose());
    let _ = nav.subscribe(EventFn(|event: &GestureEvent| {
        log::info!("gesture: {event:?}");
    }));

    let mut timing = FrameTiming::new(60);
    let mut pending = script().into_iter().peekable();

    loop {
        let now = timing.now_ms();
        while let Some((_, step)) = pending.next_if(|(at, _)| *at <= now) {
            match step {
                Step::Touch(event) => {
                    let _ = nav.handle_event(event);
                }
                Step::View(view, target) => {
                    let _ = nav.go_to_view(view, target);
                }
            }
        }

        let out = nav.frame(now);
        if out.needs_redraw || out.animation.is_some() {
            log::debug!(
                "{now:>7.1}ms eye={:.2} target={:.2} dist={:.2}",
                out.pose.position,
                out.pose.look_at,
                out.pose.distance()
            );
        }
        timing.end_frame();

        if pending.peek().is_none() && !out.needs_redraw {
            break;
        }
        std::thread::sleep(timing.until_next_frame());
    }

    let pose = nav.current_pose();
    log::info!(
        "settled in {:?} at eye={} target={} ({:.0} fps)",
        nav.view(),
        pose.position,
        pose.look_at,
        timing.fps()
    );
    nav.dispose();
    Ok(())
}
