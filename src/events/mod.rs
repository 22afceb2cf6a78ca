use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::time::{interval, Duration, Instant, Interval, MissedTickBehavior};

pub enum AppEvent {
    Input(Event),
    Tick(Duration),
}

pub struct EventHandler {
    event_stream: EventStream,
    tick_interval: Interval,
    last_tick: Instant,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let mut tick_interval = interval(Duration::from_millis(tick_rate_ms));
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            event_stream: EventStream::new(),
            tick_interval,
            last_tick: Instant::now(),
        }
    }

    pub async fn next(&mut self) -> AppEvent {
        tokio::select! {
            now = self.tick_interval.tick() => {
                let elapsed = now.saturating_duration_since(self.last_tick);
                self.last_tick = now;
                AppEvent::Tick(elapsed)
            }
            event = self.event_stream.next() => {
                match event {
                    Some(Ok(evt)) => AppEvent::Input(evt),
                    Some(Err(e)) => {
                        log::warn!("Input error: {}", e);
                        AppEvent::Tick(Duration::ZERO)
                    }
                    None => AppEvent::Tick(Duration::ZERO),
                }
            }
        }
    }
}
