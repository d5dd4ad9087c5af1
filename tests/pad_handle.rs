use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration, Instant};

use dpad::controller::{Direction, PadHandle, PadState};
use dpad::input::{InputEvent, PointerEvent, TouchEvent};

type Log = Arc<Mutex<Vec<(Option<Direction>, Duration)>>>;

fn spawn_pad() -> (PadHandle, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let start = Instant::now();
    let observer = move |direction: Option<Direction>| {
        sink.lock().unwrap().push((direction, start.elapsed()));
    };
    let pad = PadHandle::spawn(None, Some(Box::new(observer))).expect("spawn pad");
    (pad, log)
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn hold_up_then_release() {
    let (mut pad, log) = spawn_pad();

    pad.send_input(TouchEvent::Start(Direction::Up)).await.unwrap();
    sleep(ms(250)).await;
    pad.send_input(TouchEvent::End(Direction::Up)).await.unwrap();
    sleep(ms(200)).await;
    pad.teardown().await;

    let entries = log.lock().unwrap().clone();
    assert_eq!(
        entries,
        vec![
            (Some(Direction::Up), ms(0)),
            (Some(Direction::Up), ms(100)),
            (Some(Direction::Up), ms(200)),
            (None, ms(250)),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn pointer_press_preempts_touch_press() {
    let (mut pad, log) = spawn_pad();

    pad.send_input(TouchEvent::Start(Direction::Right)).await.unwrap();
    sleep(ms(10)).await;
    pad.send_input(PointerEvent::Down(Direction::Down)).await.unwrap();
    sleep(ms(350)).await;

    assert_eq!(pad.state(), PadState::Held(Direction::Down));
    pad.teardown().await;

    let directions: Vec<_> = log.lock().unwrap().iter().map(|(d, _)| *d).collect();
    assert_eq!(directions[0], Some(Direction::Right));
    assert_eq!(&directions[1..], &[Some(Direction::Down); 4]);
}

#[tokio::test(start_paused = true)]
async fn pointer_leave_releases_like_up() {
    let (mut pad, log) = spawn_pad();

    pad.send_input(PointerEvent::Down(Direction::Left)).await.unwrap();
    sleep(ms(50)).await;
    pad.send_input(PointerEvent::Leave(Direction::Left)).await.unwrap();
    sleep(ms(500)).await;

    assert_eq!(pad.state(), PadState::Idle);
    pad.teardown().await;

    let directions: Vec<_> = log.lock().unwrap().iter().map(|(d, _)| *d).collect();
    assert_eq!(directions, vec![Some(Direction::Left), None]);
}

#[tokio::test(start_paused = true)]
async fn release_without_press_emits_none_once() {
    let (mut pad, log) = spawn_pad();

    pad.release().await.unwrap();
    sleep(ms(300)).await;
    pad.teardown().await;

    assert_eq!(log.lock().unwrap().clone(), vec![(None, ms(0))]);
}

#[tokio::test(start_paused = true)]
async fn teardown_while_held_silences_the_pad() {
    let (mut pad, log) = spawn_pad();

    pad.press(Direction::Up).await.unwrap();
    sleep(ms(120)).await;
    pad.teardown().await;
    let count = log.lock().unwrap().len();

    sleep(Duration::from_secs(10)).await;
    pad.teardown().await;

    assert_eq!(count, 2);
    assert_eq!(log.lock().unwrap().len(), count);
    assert_eq!(pad.state(), PadState::TornDown);
}

#[tokio::test(start_paused = true)]
async fn teardown_before_any_input_is_harmless() {
    let (mut pad, log) = spawn_pad();

    pad.teardown().await;
    pad.teardown().await;

    assert!(log.lock().unwrap().is_empty());
    assert!(pad.send_input(TouchEvent::Start(Direction::Up)).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn scripted_lines_drive_the_pad() {
    let (mut pad, log) = spawn_pad();

    for line in ["mouse down up", "touch start left", "touch end left"] {
        let event: InputEvent = line.parse().unwrap();
        pad.send_input(event).await.unwrap();
    }
    sleep(ms(300)).await;
    pad.teardown().await;

    let directions: Vec<_> = log.lock().unwrap().iter().map(|(d, _)| *d).collect();
    assert_eq!(
        directions,
        vec![Some(Direction::Up), Some(Direction::Left), None]
    );
}
