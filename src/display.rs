// Console display sink for pipeline events.

use tokio::sync::mpsc;

use crate::pipeline::PipelineEvent;

/// Drain pipeline events to stdout until the channel closes.
///
/// Transcript turns print as single lines; answer suggestions print as a
/// block so they can be read at a glance mid-interview.
pub async fn run_console(mut events: mpsc::Receiver<PipelineEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            PipelineEvent::Transcript(entry) => {
                println!("[{}] {}", entry.speaker, entry.text);
            }
            PipelineEvent::Answer(response) => {
                println!();
                println!("=== Suggested answer ===");
                println!("Q: {}", response.question);
                println!();
                println!("{}", response.response);
                println!("========================");
                println!();
            }
        }
    }
}
