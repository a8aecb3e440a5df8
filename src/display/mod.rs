pub mod canvas;
pub mod scene;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    classify::AlertRecord,
    config::Locale,
    display::{
        canvas::{Canvas, Ink, SCREEN_HEIGHT},
        scene::select_scene,
    },
};

/// Contract between the pipeline and whatever paints frames. The caller
/// guarantees the record's invariants hold and that calls are serialized;
/// implementations do no validation.
#[async_trait]
pub trait ScenePort: Send + Sync {
    async fn render(&self, record: AlertRecord);
}

/// Simulated panel: paints each alert onto the in-memory canvas and logs
/// the resulting frame. The hardware build swaps this for the driver-backed
/// implementation with the same draw vocabulary.
pub struct SimulatedPanel {
    locale: Locale,
    canvas: Mutex<Canvas>,
}

const MESSAGE_Y: u32 = 120;
const INSTRUCTION_Y: u32 = SCREEN_HEIGHT - 48;
const TITLE_Y: u32 = 8;

impl SimulatedPanel {
    pub fn new(locale: Locale) -> Self {
        let panel = Self {
            locale,
            canvas: Mutex::new(Canvas::new()),
        };
        panel.draw_idle_frame();
        panel
    }

    /// Boot frame shown before any alert arrives.
    fn draw_idle_frame(&self) {
        let mut canvas = self.canvas.lock().expect("canvas lock poisoned");
        canvas.clear();
        canvas.border();
        canvas.text(8, MESSAGE_Y, "No current alerts", Ink::Black);
    }

    fn paint(&self, record: &AlertRecord) {
        let scene = select_scene(record.category);
        let mut canvas = self.canvas.lock().expect("canvas lock poisoned");
        canvas.clear();
        canvas.border();
        canvas.text(8, TITLE_Y, scene.title, title_ink(record.severity));
        (scene.icon)(&mut canvas);
        canvas.text(8, MESSAGE_Y, record.message.clone(), Ink::Black);
        canvas.text(
            8,
            INSTRUCTION_Y,
            scene.instructions.for_locale(self.locale),
            Ink::Black,
        );
    }

    /// Snapshot of the current frame, for tests and debugging.
    pub fn frame(&self) -> Canvas {
        self.canvas.lock().expect("canvas lock poisoned").clone()
    }
}

fn title_ink(severity: u8) -> Ink {
    if severity >= 4 { Ink::Red } else { Ink::Black }
}

#[async_trait]
impl ScenePort for SimulatedPanel {
    async fn render(&self, record: AlertRecord) {
        self.paint(&record);
        tracing::info!(
            target: "display",
            category = record.category.as_str(),
            severity = record.severity,
            message = %record.message,
            "frame_refreshed"
        );
    }
}

/// Single consumer of the scene queue. This task is the one execution
/// context allowed to touch the panel, which keeps render calls serialized
/// no matter how many transport connections are in flight.
pub async fn run_display_loop(
    mut scene_rx: mpsc::Receiver<AlertRecord>,
    panel: Arc<dyn ScenePort>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            maybe_record = scene_rx.recv() => {
                match maybe_record {
                    Some(record) => panel.render(record).await,
                    None => {
                        tracing::info!(target: "display", "scene queue closed; display loop exiting");
                        return;
                    }
                }
            }
            _ = shutdown.cancelled() => {
                tracing::info!(target: "display", "shutdown requested; display loop exiting");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    use crate::{
        classify::{AlertRecord, Category},
        config::Locale,
        display::canvas::{DrawOp, Ink},
    };

    use super::{ScenePort, SimulatedPanel, run_display_loop};

    fn record(category: Category, severity: u8, message: &str) -> AlertRecord {
        AlertRecord {
            category,
            severity,
            message: message.to_string(),
        }
    }

    #[test]
    fn boots_with_the_idle_frame() {
        let panel = SimulatedPanel::new(Locale::En);
        assert_eq!(panel.frame().text_lines(), vec!["No current alerts"]);
    }

    #[tokio::test]
    async fn renders_title_message_and_localized_instruction() {
        let panel = SimulatedPanel::new(Locale::Es);
        panel
            .render(record(Category::Flood, 1, "seek higher ground"))
            .await;

        let frame = panel.frame();
        assert_eq!(
            frame.text_lines(),
            vec!["FLOOD", "seek higher ground", "Vaya a un lugar elevado"]
        );
    }

    #[tokio::test]
    async fn high_severity_titles_are_drawn_in_red() {
        let panel = SimulatedPanel::new(Locale::En);
        panel.render(record(Category::Typhoon, 4, "stay inside")).await;

        let frame = panel.frame();
        let title_ink = frame
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, ink, .. } if text.as_str() == "TYPHOON" => Some(*ink),
                _ => None,
            })
            .expect("title must be drawn");
        assert_eq!(title_ink, Ink::Red);
    }

    #[tokio::test]
    async fn display_loop_drains_the_queue_until_closed() {
        let panel = Arc::new(SimulatedPanel::new(Locale::En));
        let (tx, rx) = mpsc::channel(4);
        let shutdown = CancellationToken::new();

        let loop_task = tokio::spawn(run_display_loop(
            rx,
            Arc::clone(&panel) as Arc<dyn ScenePort>,
            shutdown,
        ));

        tx.send(record(Category::Drought, 2, "conserve water"))
            .await
            .expect("send");
        drop(tx);
        loop_task.await.expect("display loop join");

        let frame = panel.frame();
        assert!(frame.text_lines().contains(&"conserve water"));
    }
}
