use std::io::BufRead;
use std::thread;

use kanal::Sender;

/// Read stdin on a detached thread. A blocked read cannot be cancelled, so
/// the thread is never joined and dies with the process.
pub fn spawn_stdin_reader(line_tx: Sender<Option<String>>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            if let Err(e) = forward_lines(stdin.lock(), &line_tx) {
                tracing::error!("Input reader failed: {e}");
            }
        })?;
    Ok(())
}

/// Send each line as `Some`, then `None` once the reader is exhausted
pub fn forward_lines<R: BufRead>(reader: R, line_tx: &Sender<Option<String>>) -> anyhow::Result<()> {
    for line in reader.lines() {
        if line_tx.send(Some(line?)).is_err() {
            tracing::debug!("Input receiver gone, stopping reader");
            return Ok(());
        }
    }

    tracing::debug!("Input closed");
    let _ = line_tx.send(None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_then_end_marker() {
        let (tx, rx) = kanal::unbounded();
        let input: &[u8] = b"hello\n:define\n";

        forward_lines(input, &tx).unwrap();

        assert_eq!(rx.recv().unwrap().as_deref(), Some("hello"));
        assert_eq!(rx.recv().unwrap().as_deref(), Some(":define"));
        assert_eq!(rx.recv().unwrap(), None);
    }

    #[test]
    fn stops_when_receiver_is_dropped() {
        let (tx, rx) = kanal::unbounded();
        drop(rx);
        assert!(forward_lines(&b"a\nb\n"[..], &tx).is_ok());
    }
}
