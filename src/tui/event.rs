use crossterm::event::{KeyEvent, KeyEventKind};
use futures::{Stream, StreamExt};
use std::io;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_input(crossterm::event::EventStream::new(), tick_rate_ms)
    }

    /// Forward `input` and a tick timer to the app.
    ///
    /// Ticks keep coming after `input` ends so the main loop never spins.
    pub fn with_input<S>(input: S, tick_rate_ms: u64) -> Self
    where
        S: Stream<Item = io::Result<crossterm::event::Event>> + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = input;
            let mut input_open = true;
            let mut tick_interval =
                tokio::time::interval(std::time::Duration::from_millis(tick_rate_ms));

            loop {
                let event = tokio::select! {
                    maybe_event = reader.next(), if input_open => match maybe_event {
                        // Filter for Press only (Windows compatibility)
                        Some(Ok(crossterm::event::Event::Key(key)))
                            if key.kind == KeyEventKind::Press => Event::Key(key),
                        Some(Ok(crossterm::event::Event::Resize(_, _))) => Event::Resize,
                        Some(Ok(_)) => continue,
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "terminal event read failed");
                            continue;
                        }
                        None => {
                            tracing::warn!("terminal input closed");
                            input_open = false;
                            continue;
                        }
                    },
                    _ = tick_interval.tick() => Event::Tick,
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        EventHandler { rx }
    }

    pub async fn next(&mut self) -> Event {
        self.rx.recv().await.unwrap_or(Event::Tick)
    }

    #[cfg(test)]
    async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[tokio::test]
    async fn test_ticks_continue_after_input_ends() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let input = futures::stream::iter(vec![Ok(crossterm::event::Event::Key(key))]);
        let mut events = EventHandler::with_input(input, 10);

        let mut saw_key = false;
        let mut ticks = 0;
        while ticks < 5 {
            match events.recv().await {
                Some(Event::Key(k)) => {
                    assert_eq!(k.code, KeyCode::Char('q'));
                    saw_key = true;
                }
                Some(Event::Tick) => ticks += 1,
                Some(Event::Resize) => {}
                None => panic!("event channel closed after input ended"),
            }
        }
        assert!(saw_key);
    }
}
