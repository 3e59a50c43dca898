//! Background worker owning the line store.
//!
//! The store runs on a dedicated thread; consumers talk to it exclusively
//! through typed request/response messages, so a slow `load` of a large
//! document never stalls the requesting thread and no shared-memory
//! synchronization is needed (the worker is the single owner of all
//! mutable state).
//!
//! Every request carries its own reply channel, which correlates each
//! response with the request that caused it; callers may keep any number
//! of requests in flight. The worker serves requests strictly in arrival
//! order. A new `load` supersedes an earlier one by overwriting the store;
//! callers discard stale window responses themselves by dropping the old
//! [`ResponseHandle`].

use crate::model::Line;
use crate::store::LineStore;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{info, trace, warn};

/// Window size used when a request does not specify one.
pub const DEFAULT_LIMIT: usize = 100;

/// One request to the line service.
///
/// Dispatch priority: `clear` first; otherwise a present `file` triggers a
/// load before the windowed read; otherwise the read runs against the
/// currently stored sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Raw document text; its presence triggers a load.
    pub file: Option<String>,
    /// First line of the requested window.
    pub position: usize,
    /// Maximum number of lines in the requested window.
    pub limit: usize,
    /// Reset the store instead of reading.
    pub clear: bool,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            file: None,
            position: 0,
            limit: DEFAULT_LIMIT,
            clear: false,
        }
    }
}

impl Request {
    /// Load a document, then read the first window of [`DEFAULT_LIMIT`]
    /// lines.
    pub fn load(document: impl Into<String>) -> Self {
        Self {
            file: Some(document.into()),
            ..Self::default()
        }
    }

    /// Read the window `[position, position + limit)` of the stored
    /// sequence.
    pub fn window(position: usize, limit: usize) -> Self {
        Self {
            position,
            limit,
            ..Self::default()
        }
    }

    /// Reset the stored sequence.
    pub fn clear() -> Self {
        Self {
            clear: true,
            ..Self::default()
        }
    }

    /// Replace the window parameters on an existing request.
    pub fn with_window(mut self, position: usize, limit: usize) -> Self {
        self.position = position;
        self.limit = limit;
        self
    }
}

/// One response from the line service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A windowed read: the requested lines plus the full sequence length.
    Window {
        /// Lines in the requested window, clamped to the stored bounds.
        data: Vec<Line>,
        /// Total length of the stored sequence.
        length: usize,
    },
    /// Acknowledgment that the store was reset.
    Cleared,
    /// The document could not be parsed; the store kept its prior state.
    Failed {
        /// The JSON parser's diagnostic.
        message: String,
    },
}

/// The worker thread went away before answering.
///
/// Only happens when the service is shut down while a request is in
/// flight.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line service disconnected before responding")]
pub struct Disconnected;

/// Pending response for one request.
///
/// Returned by [`LineService::request`]; resolves to the typed response
/// for exactly that request.
#[derive(Debug)]
pub struct ResponseHandle {
    rx: Receiver<Response>,
}

impl ResponseHandle {
    /// Block until the response arrives.
    ///
    /// # Errors
    ///
    /// Returns [`Disconnected`] if the service shut down first.
    pub fn wait(self) -> Result<Response, Disconnected> {
        self.rx.recv().map_err(|_| Disconnected)
    }

    /// Non-blocking probe for the response; `None` while still pending.
    ///
    /// # Errors
    ///
    /// Returns [`Disconnected`] if the service shut down first.
    pub fn try_wait(&self) -> Result<Option<Response>, Disconnected> {
        match self.rx.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(Disconnected),
        }
    }
}

struct Envelope {
    request: Request,
    reply: Sender<Response>,
}

/// Handle to the background line service.
///
/// Spawns the worker thread on construction; dropping the handle
/// disconnects the request channel, which ends the worker loop and joins
/// the thread.
#[derive(Debug)]
pub struct LineService {
    tx: Option<Sender<Envelope>>,
    handle: Option<JoinHandle<()>>,
}

impl LineService {
    /// Start the worker thread with an empty store.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Envelope>();
        let handle = thread::spawn(move || serve(rx));
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Send a request; the returned handle resolves to its response.
    ///
    /// Sending never blocks. If the service is already shut down, the
    /// handle resolves to [`Disconnected`] instead of a response.
    pub fn request(&self, request: Request) -> ResponseHandle {
        let (reply, rx) = mpsc::channel();
        if let Some(tx) = &self.tx {
            // A send failure drops `reply`, which surfaces to the caller
            // as Disconnected on wait().
            let _ = tx.send(Envelope { request, reply });
        }
        ResponseHandle { rx }
    }
}

impl Drop for LineService {
    fn drop(&mut self) {
        // Disconnect the request channel so the worker loop exits.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Worker loop: owns the store, serves requests until the channel
/// disconnects.
fn serve(rx: Receiver<Envelope>) {
    let mut store = LineStore::new();
    while let Ok(Envelope { request, reply }) = rx.recv() {
        let response = dispatch(&mut store, request);
        // The caller may have dropped its handle; that is not an error.
        let _ = reply.send(response);
    }
    trace!("line service stopped");
}

fn dispatch(store: &mut LineStore, request: Request) -> Response {
    if request.clear {
        store.clear();
        info!("store cleared");
        return Response::Cleared;
    }

    if let Some(raw) = request.file {
        match store.load(&raw) {
            Ok(length) => {
                info!(length, "document loaded");
            }
            Err(failure) => {
                warn!(%failure, "document rejected, store unchanged");
                return Response::Failed {
                    message: failure.message,
                };
            }
        }
    }

    let data = store.read(request.position, request.limit).to_vec();
    trace!(
        position = request.position,
        limit = request.limit,
        returned = data.len(),
        "window read"
    );
    Response::Window {
        data,
        length: store.len(),
    }
}
