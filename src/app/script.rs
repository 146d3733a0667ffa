//! Scripted sessions
//!
//! A script is a JSON list of user steps replayed through a [`Runtime`]:
//!
//! ```json
//! { "steps": [
//!     { "step": "drag", "dy": -300.0 },
//!     { "step": "select", "index": 2 },
//!     { "step": "capture" },
//!     { "step": "continue" }
//! ] }
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Message, Runtime, ScrollMetrics};
use crate::media::{CaptureDevice, MediaProvider};
use crate::panel::{GestureSample, PanelState};

/// Frames allowed for one sheet settle before giving up
const MAX_SETTLE_FRAMES: usize = 600;

/// Pointer moves reported per drag
const DRAG_SAMPLES: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Drag the sheet header by `dy` and release at `velocity` px/ms
    Drag {
        dy: f32,
        #[serde(default)]
        velocity: f32,
    },
    TapHandle,
    ShowGallery,
    CloseGallery,
    /// Scroll the grid to `offset_y`
    Scroll {
        offset_y: f32,
        viewport_height: f32,
        content_height: f32,
    },
    Refresh,
    /// Press the photo at this grid position
    Select { index: usize },
    Capture,
    Continue,
    DismissNotice,
    /// Deliver frame ticks
    Frames { count: usize },
    /// Wait for outstanding I/O and for the sheet to come to rest
    Settle,
    /// Return from the preview screen
    Finish,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }
}

/// Where the session ended up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub steps: usize,
    pub sheet_state: Option<String>,
    pub sheet_offset: f32,
    pub gallery_visible: bool,
    pub loaded_photos: usize,
    pub has_more: bool,
    /// Selected photo uris in selection order
    pub selected: Vec<String>,
    /// Each navigation as the uris handed over
    pub navigations: Vec<Vec<String>>,
    /// Every notice raised, as "title: message"
    pub notices: Vec<String>,
}

/// Replay `script` from a freshly mounted screen
pub async fn play<P, C>(runtime: &mut Runtime<P, C>, script: &Script) -> Result<Report>
where
    P: MediaProvider + 'static,
    C: CaptureDevice + 'static,
{
    let mut notices = Vec::new();

    runtime.dispatch(Message::Mounted);
    runtime.settle_io().await;
    record_notice(runtime, &mut notices);

    for (n, step) in script.steps.iter().enumerate() {
        debug!("Step {}: {:?}", n + 1, step);
        run_step(runtime, step)
            .await
            .with_context(|| format!("Step {} ({:?}) failed", n + 1, step))?;
        runtime.pump();
        record_notice(runtime, &mut notices);
    }

    runtime.settle_io().await;
    runtime.settle_panel(MAX_SETTLE_FRAMES).await;
    record_notice(runtime, &mut notices);

    let screen = runtime.screen();
    info!(
        "Replayed {} steps, {} photos selected",
        script.steps.len(),
        screen.selection().len()
    );

    Ok(Report {
        steps: script.steps.len(),
        sheet_state: screen.sheet_state().map(state_name),
        sheet_offset: screen.sheet_offset(),
        gallery_visible: screen.gallery_visible(),
        loaded_photos: screen.gallery().len(),
        has_more: screen.gallery().has_more(),
        selected: screen
            .selected_items()
            .into_iter()
            .map(|item| item.uri)
            .collect(),
        navigations: runtime
            .navigations()
            .iter()
            .map(|items| items.iter().map(|item| item.uri.clone()).collect())
            .collect(),
        notices,
    })
}

async fn run_step<P, C>(runtime: &mut Runtime<P, C>, step: &Step) -> Result<()>
where
    P: MediaProvider + 'static,
    C: CaptureDevice + 'static,
{
    match step {
        Step::Drag { dy, velocity } => {
            runtime.dispatch(Message::GestureStarted);
            for i in 1..=DRAG_SAMPLES {
                runtime.dispatch(Message::GestureMoved(dy * i as f32 / DRAG_SAMPLES as f32));
            }
            runtime.dispatch(Message::GestureReleased(GestureSample {
                delta_y: *dy,
                velocity_y: *velocity,
            }));
        }
        Step::TapHandle => runtime.dispatch(Message::HandleTapped),
        Step::ShowGallery => runtime.dispatch(Message::ShowGallery),
        Step::CloseGallery => runtime.dispatch(Message::CloseGallery),
        Step::Scroll {
            offset_y,
            viewport_height,
            content_height,
        } => runtime.dispatch(Message::GridScrolled(ScrollMetrics {
            offset_y: *offset_y,
            viewport_height: *viewport_height,
            content_height: *content_height,
        })),
        Step::Refresh => runtime.dispatch(Message::RefreshGallery),
        Step::Select { index } => {
            let Some(item) = runtime.screen().gallery().items().get(*index) else {
                bail!(
                    "no photo at index {} ({} loaded)",
                    index,
                    runtime.screen().gallery().len()
                );
            };
            let id = item.id.clone();
            runtime.dispatch(Message::PhotoPressed(id));
        }
        Step::Capture => runtime.dispatch(Message::CapturePressed),
        Step::Continue => runtime.dispatch(Message::ContinuePressed),
        Step::DismissNotice => runtime.dispatch(Message::DismissNotice),
        Step::Frames { count } => runtime.run_frames(*count).await,
        Step::Settle => {
            runtime.settle_io().await;
            runtime.settle_panel(MAX_SETTLE_FRAMES).await;
        }
        Step::Finish => runtime.dispatch(Message::SessionFinished),
    }
    Ok(())
}

fn record_notice<P, C>(runtime: &Runtime<P, C>, notices: &mut Vec<String>)
where
    P: MediaProvider + 'static,
    C: CaptureDevice + 'static,
{
    if let Some(notice) = runtime.screen().notice() {
        let line = format!("{}: {}", notice.title, notice.message);
        if notices.last() != Some(&line) {
            notices.push(line);
        }
    }
}

fn state_name(state: PanelState) -> String {
    format!("{:?}", state).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Settings;
    use crate::media::{MemoryLibrary, ScriptedCapture};
    use tokio::task::LocalSet;

    fn parse(json: &str) -> Script {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_steps() {
        let script = parse(
            r#"{ "steps": [
                { "step": "drag", "dy": -300 },
                { "step": "select", "index": 1 },
                { "step": "frames", "count": 3 },
                { "step": "tap_handle" }
            ] }"#,
        );
        assert_eq!(
            script.steps,
            vec![
                Step::Drag {
                    dy: -300.0,
                    velocity: 0.0
                },
                Step::Select { index: 1 },
                Step::Frames { count: 3 },
                Step::TapHandle,
            ]
        );
        assert!(serde_json::from_str::<Script>(r#"{ "steps": [{ "step": "fly" }] }"#).is_err());
    }

    #[tokio::test]
    async fn test_replay_selection_session() {
        LocalSet::new()
            .run_until(async {
                let camera = ScriptedCapture::new();
                camera.push_shot("memory://camera/0.jpg");
                let mut runtime =
                    Runtime::new(&Settings::default(), MemoryLibrary::with_photos(12), camera);

                let script = parse(
                    r#"{ "steps": [
                        { "step": "continue" },
                        { "step": "dismiss_notice" },
                        { "step": "drag", "dy": -320, "velocity": -0.1 },
                        { "step": "settle" },
                        { "step": "select", "index": 3 },
                        { "step": "select", "index": 0 },
                        { "step": "capture" },
                        { "step": "settle" },
                        { "step": "continue" }
                    ] }"#,
                );
                let report = play(&mut runtime, &script).await.unwrap();

                assert_eq!(report.sheet_state.as_deref(), Some("expanded"));
                assert_eq!(report.loaded_photos, 13);
                assert_eq!(
                    report.selected,
                    vec![
                        "memory://photos/0003.jpg",
                        "memory://photos/0000.jpg",
                        "memory://camera/0.jpg"
                    ]
                );
                assert_eq!(report.navigations.len(), 1);
                assert_eq!(report.navigations[0], report.selected);
                assert_eq!(
                    report.notices,
                    vec!["No Photos Selected: Please select at least one photo"]
                );
            })
            .await;
    }

    #[tokio::test]
    async fn test_select_out_of_range_fails() {
        LocalSet::new()
            .run_until(async {
                let mut runtime = Runtime::new(
                    &Settings::default(),
                    MemoryLibrary::with_photos(2),
                    ScriptedCapture::new(),
                );
                let script = parse(r#"{ "steps": [{ "step": "select", "index": 5 }] }"#);
                let err = play(&mut runtime, &script).await.unwrap_err();
                assert!(format!("{:#}", err).contains("no photo at index 5"));
            })
            .await;
    }
}
