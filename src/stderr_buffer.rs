use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, log lines are stored instead of
/// being printed over the dashboard.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// Write a message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn write_line(msg: String) {
    let mut guard = buffer();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `MakeWriter` that routes each formatted tracing event through the buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferedStderr;

/// Collects one event's bytes and hands them to [`write_line`] on drop
#[derive(Debug, Default)]
pub struct EventWriter {
    bytes: Vec<u8>,
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if self.bytes.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.bytes);
        write_line(text.trim_end_matches('\n').to_string());
    }
}

impl<'a> MakeWriter<'a> for BufferedStderr {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_writer_collects_lines() {
        activate();

        {
            let mut writer = BufferedStderr.make_writer();
            writer.write_all(b"first line\n").unwrap();
        }
        write_line("second".to_string());

        let lines = drain();
        assert_eq!(lines, vec!["first line".to_string(), "second".to_string()]);
        assert!(drain().is_empty());

        // After a drain, lines go straight to stderr instead of the buffer
        write_line("late".to_string());
        activate();
        assert!(drain().is_empty());
    }
}
