//! Task executor for the scan screen
//!
//! Runs the tasks `ScanScreen::update` returns. Fetches and captures are
//! spawned on the current `LocalSet` and report back over a channel, so the
//! screen keeps taking gestures and frames while they are outstanding. Every
//! runtime method that spawns must be called from inside a `LocalSet`.

use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{Message, ScanScreen, Task};
use crate::error::ScanError;
use crate::features::Settings;
use crate::media::{CaptureDevice, MediaItem, MediaProvider, PageRequest};

pub struct Runtime<P, C> {
    screen: ScanScreen,
    provider: Rc<P>,
    camera: Rc<C>,
    fetch_timeout: Option<Duration>,
    frame_interval: Duration,
    feedback_tx: mpsc::UnboundedSender<Message>,
    feedback_rx: mpsc::UnboundedReceiver<Message>,
    /// Spawned tasks whose result message has not been dispatched yet
    in_flight: usize,
    navigations: Vec<Vec<MediaItem>>,
}

impl<P, C> Runtime<P, C>
where
    P: MediaProvider + 'static,
    C: CaptureDevice + 'static,
{
    pub fn new(settings: &Settings, provider: P, camera: C) -> Self {
        let (feedback_tx, feedback_rx) = mpsc::unbounded_channel();
        Self {
            screen: ScanScreen::new(settings),
            provider: Rc::new(provider),
            camera: Rc::new(camera),
            fetch_timeout: settings.gallery.fetch_timeout(),
            frame_interval: settings.frame_interval(),
            feedback_tx,
            feedback_rx,
            in_flight: 0,
            navigations: Vec::new(),
        }
    }

    pub fn screen(&self) -> &ScanScreen {
        &self.screen
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Photo sets handed to the next screen, oldest first
    pub fn navigations(&self) -> &[Vec<MediaItem>] {
        &self.navigations
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Feed one message through the screen and run what it asks for
    pub fn dispatch(&mut self, message: Message) {
        let task = self.screen.update(message);
        self.execute(task);
    }

    fn execute(&mut self, task: Task) {
        match task {
            Task::None => {}
            Task::Fetch(request) => self.spawn_fetch(request),
            Task::Capture => self.spawn_capture(),
            Task::Navigate(items) => {
                info!("Navigating to preview with {} photos", items.len());
                self.navigations.push(items);
            }
        }
    }

    fn spawn_fetch(&mut self, request: PageRequest) {
        let provider = Rc::clone(&self.provider);
        let tx = self.feedback_tx.clone();
        let timeout = self.fetch_timeout;

        self.in_flight += 1;
        debug!("Spawning {:?} fetch", request.kind);
        tokio::task::spawn_local(async move {
            let result = request.fetch(provider.as_ref(), timeout).await;
            let _ = tx.send(Message::PageLoaded(request, result));
        });
    }

    fn spawn_capture(&mut self) {
        let provider = Rc::clone(&self.provider);
        let camera = Rc::clone(&self.camera);
        let tx = self.feedback_tx.clone();

        self.in_flight += 1;
        tokio::task::spawn_local(async move {
            let result = capture_and_admit(camera.as_ref(), provider.as_ref())
                .await
                .map_err(|e| ScanError::CaptureFailed(format!("{:#}", e)));
            let _ = tx.send(Message::Captured(result));
        });
    }

    /// Dispatch every result that has already arrived, without waiting
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.feedback_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(message);
            handled += 1;
        }
        handled
    }

    /// Wait until no fetch or capture is outstanding
    ///
    /// Results may spawn follow-up work (a capture triggers a reload), which
    /// is waited for as well.
    pub async fn settle_io(&mut self) {
        while self.in_flight > 0 {
            let Some(message) = self.feedback_rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            self.dispatch(message);
        }
    }

    /// Deliver `count` frame ticks, letting spawned work run in between
    pub async fn run_frames(&mut self, count: usize) {
        for _ in 0..count {
            tokio::task::yield_now().await;
            self.pump();
            self.dispatch(Message::Frame(self.frame_interval));
        }
    }

    /// Tick frames until the sheet stops moving, up to `max_frames`
    ///
    /// Returns the number of frames delivered.
    pub async fn settle_panel(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.screen.wants_frames() && frames < max_frames {
            self.run_frames(1).await;
            frames += 1;
        }
        frames
    }
}

async fn capture_and_admit<C, P>(camera: &C, provider: &P) -> anyhow::Result<MediaItem>
where
    C: CaptureDevice,
    P: MediaProvider,
{
    let uri = camera.capture().await.context("Camera capture failed")?;
    provider
        .create_item(&uri)
        .await
        .with_context(|| format!("Failed to add {} to the library", uri))
}
