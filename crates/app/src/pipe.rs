//! JSON-lines front end: one `UserIntent` per stdin line, one
//! `RenderCommand` per stdout line.

use quiz_core::{RenderCommand, UserIntent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Blank lines are skipped.
pub fn decode_intent(line: &str) -> Result<Option<UserIntent>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

pub fn encode_render(command: &RenderCommand) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(command)?;
    line.push('\n');
    Ok(line)
}

/// Malformed input lines are logged and skipped; the stream keeps going.
///
/// At end of input the intent sender is dropped and renders are drained
/// until the runtime, having handled every queued intent, closes them.
pub async fn run<R, W>(
    input: R,
    mut output: W,
    intents: UnboundedSender<UserIntent>,
    mut renders: UnboundedReceiver<RenderCommand>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut intents = Some(intents);

    loop {
        tokio::select! {
            command = renders.recv() => {
                let Some(command) = command else { break };
                output.write_all(encode_render(&command)?.as_bytes()).await?;
                output.flush().await?;
            }
            line = lines.next_line(), if intents.is_some() => {
                let Some(line) = line? else {
                    tracing::debug!("end of input; draining render commands");
                    intents = None;
                    continue;
                };
                match decode_intent(&line) {
                    Ok(Some(intent)) => {
                        if intents.as_ref().is_some_and(|tx| tx.send(intent).is_err()) {
                            intents = None;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => tracing::warn!(%err, line = %line, "skipping malformed intent"),
                }
            }
        }
    }
    Ok(())
}
