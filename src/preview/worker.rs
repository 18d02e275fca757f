use image::RgbaImage;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use tracing::{debug, warn};

use crate::adjust::{self, ParameterSet};
use crate::models::Cutout;

/// Render request tagged with the order it was submitted in
struct RenderRequest {
    generation: u64,
    params: ParameterSet,
}

/// A finished preview and the submission it belongs to
pub struct RenderedPreview {
    pub generation: u64,
    pub params: ParameterSet,
    pub image: RgbaImage,
}

/// Renders previews on a background thread for cutouts too large to
/// re-render on the interaction thread
///
/// Only the newest submission is ever handed out; superseded renders are
/// skipped when still queued and discarded when already finished.
pub struct PreviewWorker {
    sender: Option<Sender<RenderRequest>>,
    receiver: Receiver<RenderedPreview>,
    handle: Option<JoinHandle<()>>,
    latest_generation: u64,
    delivered_generation: u64,
}

impl PreviewWorker {
    pub fn spawn(base: Cutout) -> Self {
        let (request_tx, request_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        let handle = std::thread::spawn(move || render_loop(base, request_rx, result_tx));

        Self {
            sender: Some(request_tx),
            receiver: result_rx,
            handle: Some(handle),
            latest_generation: 0,
            delivered_generation: 0,
        }
    }

    /// Queue a render of the full parameter set, returning its generation
    pub fn submit(&mut self, params: ParameterSet) -> u64 {
        self.latest_generation += 1;
        let request = RenderRequest {
            generation: self.latest_generation,
            params,
        };
        if let Some(sender) = &self.sender {
            if sender.send(request).is_err() {
                warn!("Preview worker has stopped; request {} dropped", self.latest_generation);
            }
        }
        self.latest_generation
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// The preview for the latest submission, if it has finished
    pub fn try_latest(&mut self) -> Option<RenderedPreview> {
        let mut newest = None;
        while let Ok(rendered) = self.receiver.try_recv() {
            if let Some(current) = self.accept(rendered) {
                newest = Some(current);
            }
        }
        newest
    }

    /// Block until the latest submission is rendered
    ///
    /// Returns `None` if nothing is pending or the worker thread is gone.
    pub fn wait_latest(&mut self) -> Option<RenderedPreview> {
        while self.delivered_generation < self.latest_generation {
            let rendered = self.receiver.recv().ok()?;
            if let Some(current) = self.accept(rendered) {
                return Some(current);
            }
        }
        None
    }

    fn accept(&mut self, rendered: RenderedPreview) -> Option<RenderedPreview> {
        if rendered.generation != self.latest_generation {
            debug!(
                "Discarding superseded preview {} (latest {})",
                rendered.generation, self.latest_generation
            );
            return None;
        }
        self.delivered_generation = rendered.generation;
        Some(rendered)
    }
}

impl Drop for PreviewWorker {
    fn drop(&mut self) {
        // Closing the channel ends the render loop
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Preview worker panicked");
            }
        }
    }
}

fn render_loop(base: Cutout, requests: Receiver<RenderRequest>, results: Sender<RenderedPreview>) {
    while let Ok(mut request) = requests.recv() {
        // Skip straight to the newest queued request
        while let Ok(newer) = requests.try_recv() {
            debug!("Skipping superseded request {}", request.generation);
            request = newer;
        }

        let image = adjust::apply(&base, &request.params);
        let rendered = RenderedPreview {
            generation: request.generation,
            params: request.params,
            image,
        };
        if results.send(rendered).is_err() {
            break;
        }
    }
}
