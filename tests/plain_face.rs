mod common;

use common::{at, FakeHost, FrameBuffer};
use pinetime_watchface::{
    clock::HourPadding, status::ChargeState, Event, PlainWatchface, ResourcePool, WatchApp,
};

#[test]
fn shows_time_and_date() {
    let pool = ResourcePool::new();
    let mut host = FakeHost::new(at(2026, 1, 5, 9, 5));
    let mut app = WatchApp::<PlainWatchface>::launch(&pool, &mut host).unwrap();
    assert_eq!(app.face().clock().time_text(), "09:05");
    assert_eq!(app.face().clock().date_text(), "Mon 05 Jan");

    let mut display = FrameBuffer::new();
    assert!(app.render(&mut display).unwrap());
}

#[test]
fn unpadded_twelve_hour_host() {
    let pool = ResourcePool::new();
    let mut host = FakeHost::new(at(2026, 7, 14, 15, 45));
    host.twenty_four_hour = false;
    host.padding = HourPadding::Unpadded;
    let app = WatchApp::<PlainWatchface>::launch(&pool, &mut host).unwrap();
    assert_eq!(app.face().clock().time_text(), "3:45");
    assert_eq!(app.face().clock().date_text(), "Tue 14 Jul");
}

#[test]
fn ignores_status_events() {
    let pool = ResourcePool::new();
    let mut host = FakeHost::new(at(2026, 1, 5, 9, 5));
    let mut app = WatchApp::<PlainWatchface>::launch(&pool, &mut host).unwrap();
    let mut display = FrameBuffer::new();
    app.render(&mut display).unwrap();

    app.handle(&mut host, Event::Connection(false));
    app.handle(&mut host, Event::Battery(ChargeState::new(5, true)));
    assert_eq!(host.pulses, 0);
    assert!(!app.render(&mut display).unwrap());
}
