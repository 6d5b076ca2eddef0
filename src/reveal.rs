use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::events::TurnEvent;

/// Char-boundary prefixes of `text`, from the empty string through the full
/// reply. `N` chars yield `N + 1` prefixes.
pub fn prefixes(text: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(text.chars().count() + 1);
    out.push(String::new());
    let mut buf = String::new();
    for ch in text.chars() {
        buf.push(ch);
        out.push(buf.clone());
    }
    out
}

/// Spawn the typewriter pass for one reply.
///
/// Emits one [`TurnEvent::RevealStep`] per prefix with a fixed sleep between
/// steps, then [`TurnEvent::RevealDone`]. The task stops as soon as the
/// receiver is gone, so tearing down the widget detaches any in-flight pass
/// without further transcript mutation. Superseded passes keep running until
/// their next send; the controller drops their stale-generation events.
pub fn spawn_reveal(
    text: String,
    generation: u64,
    interval: Duration,
    tx: UnboundedSender<TurnEvent>,
) {
    tokio::spawn(async move {
        for prefix in prefixes(&text) {
            if tx.send(TurnEvent::RevealStep { generation, prefix }).is_err() {
                return;
            }
            tokio::time::sleep(interval).await;
        }
        let _ = tx.send(TurnEvent::RevealDone { generation });
    });
}
