use super::*;
use crate::driver::memory::{Buffering, MemoryDriver};
use crate::foundation::core::{Rect, Rgba8Premul};
use crate::paint::command::Blit;
use crate::paint::painter::{Painter, PainterOpts};

#[test]
fn zero_rate_is_rejected() {
    assert!(matches!(
        TickerOpts::at_fps(0),
        Err(PaintError::Validation(_))
    ));

    let (_painter, handle) =
        Painter::new(MemoryDriver::new(1, 1, Buffering::Direct), PainterOpts::default()).unwrap();
    let opts = TickerOpts {
        period: Duration::ZERO,
        after_flush: None,
        max_ticks: None,
    };
    assert!(FlushTicker::spawn(handle, opts).is_err());
}

#[test]
fn at_fps_divides_one_second() {
    let opts = TickerOpts::at_fps(50).unwrap();
    assert_eq!(opts.period, Duration::from_millis(20));
}

#[test]
fn ticker_flushes_then_submits_after_flush_command() {
    let (painter, handle) =
        Painter::new(MemoryDriver::new(4, 4, Buffering::Double), PainterOpts::default()).unwrap();
    let join = painter.spawn().unwrap();

    let opts = TickerOpts {
        period: Duration::from_millis(1),
        after_flush: Some(Blit::fill(Rect::from_size(4, 4), Rgba8Premul::BLACK).into()),
        max_ticks: Some(3),
    };
    let ticker = FlushTicker::spawn(handle.clone(), opts).unwrap();
    assert_eq!(ticker.wait().unwrap(), 3);
    drop(handle);

    let finished = join.join().unwrap().unwrap();
    assert_eq!(finished.stats.frames_presented, 3);
    assert_eq!(finished.stats.flushes, 3);
    // The clear after the last flush is still pending when the channel closes.
    assert_eq!(finished.stats.commands_received, 3);
    assert_eq!(finished.stats.commands_painted, 2);
    assert_eq!(finished.driver.presents(), 3);
}

#[test]
fn ticker_exits_when_painter_is_gone() {
    let (painter, handle) =
        Painter::new(MemoryDriver::new(1, 1, Buffering::Direct), PainterOpts::default()).unwrap();
    drop(painter);

    let ticker = FlushTicker::spawn(handle, TickerOpts::at_fps(1000).unwrap()).unwrap();
    assert_eq!(ticker.wait().unwrap(), 0);
}

#[test]
fn stop_ends_an_unbounded_ticker() {
    let (painter, handle) =
        Painter::new(MemoryDriver::new(1, 1, Buffering::Direct), PainterOpts::default()).unwrap();
    let join = painter.spawn().unwrap();

    let ticker = FlushTicker::spawn(handle, TickerOpts::at_fps(1000).unwrap()).unwrap();
    std::thread::sleep(Duration::from_millis(20));
    let ticks = ticker.stop().unwrap();

    // The ticker owned the last handle, so the painter stops too.
    let finished = join.join().unwrap().unwrap();
    assert_eq!(finished.stats.flushes, ticks);
}

#[test]
fn ticker_thread_panic_is_reported() {
    let ticker = FlushTicker {
        stop: Arc::new(AtomicBool::new(false)),
        join: Some(std::thread::spawn(|| -> u64 { panic!("tick failed") })),
    };
    let err = ticker.wait().unwrap_err();
    assert!(err.to_string().contains("panicked"));
}
