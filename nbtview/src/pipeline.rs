//! Reading a user supplied file, decoding it and handing the rendered tree to
//! a host.
//!
//! A host provides three things:
//!
//! * a [`Decode`] implementation, initialized through [`Initialized`],
//! * a [`Document`] that rendered trees are appended to, and
//! * a [`Notifier`] that shows failures to the user.
//!
//! Each [`Request`] carries a future that reads the whole file. The pipeline
//! awaits it, inflates compressed data, decodes, renders and appends. Runs
//! are single threaded; a request submitted while another is still in flight
//! is refused with [`Error::Busy`].
//!
//! ```
//! use nbtview::pipeline::{Initialized, Pipeline, PipelineOptions, Request};
//! use nbtview::{NbtDecoder, VisualNode};
//!
//! # async fn run(bytes: Vec<u8>) -> Result<(), nbtview::pipeline::Error> {
//! let pipeline = Pipeline::new(
//!     Initialized::ready(NbtDecoder),
//!     Vec::<VisualNode>::new(),
//!     |msg: &str| eprintln!("{}", msg),
//!     PipelineOptions::default(),
//! );
//!
//! pipeline.submit(Request::new(async { Ok(bytes) }, true)).await?;
//! assert_eq!(pipeline.document().len(), 1);
//! # Ok(())
//! # }
//! ```
use std::{
    cell::{Cell, Ref, RefCell},
    fmt,
    future::Future,
};

use log::{debug, error};

use crate::{compression, decode, Decode, RenderOptions, Renderer, VisualNode};

#[cfg(doc)]
use crate::NbtDecoder;

/// Where rendered trees go. For a web page this is the area after the form.
pub trait Document {
    fn append(&mut self, node: VisualNode);

    /// Remove everything appended so far.
    fn clear(&mut self);
}

impl Document for Vec<VisualNode> {
    fn append(&mut self, node: VisualNode) {
        self.push(node);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

/// Shows a failure to the user, in a way they cannot miss.
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<F: Fn(&str)> Notifier for F {
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// A failure to read the source of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError(String);

impl ReadError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl std::error::Error for ReadError {}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        Self(e.to_string())
    }
}

#[derive(Debug)]
pub enum Error {
    /// Another request was still being processed.
    Busy,
    /// The source could not be read.
    Read(ReadError),
    /// The source looked compressed but could not be inflated.
    Decompress(std::io::Error),
    /// The decoder rejected the data.
    Decode(decode::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Busy => None,
            Error::Read(e) => Some(e),
            Error::Decompress(e) => Some(e),
            Error::Decode(e) => Some(e),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Busy => f.write_str("still processing the previous file"),
            Error::Read(e) => write!(f, "could not read file: {}", e),
            Error::Decompress(e) => write!(f, "could not decompress file: {}", e),
            Error::Decode(e) => write!(f, "could not decode NBT: {}", e),
        }
    }
}

/// A decoder that has finished any one-time setup it needs. A [`Pipeline`]
/// can only be built from one of these, so requests cannot reach a decoder
/// that is not ready.
#[derive(Debug)]
pub struct Initialized<D>(D);

impl<D: Decode> Initialized<D> {
    /// Wait for `setup` to produce a ready decoder.
    pub async fn new<F, E>(setup: F) -> Result<Self, E>
    where
        F: Future<Output = Result<D, E>>,
    {
        let decoder = setup.await?;
        debug!("decoder initialized");
        Ok(Self(decoder))
    }

    /// Wrap a decoder that has no setup, such as [`NbtDecoder`].
    pub fn ready(decoder: D) -> Self {
        Self(decoder)
    }
}

/// One submission: a pending full read of the file, and its byte order.
pub struct Request<F> {
    source: F,
    big_endian: bool,
}

impl<F> Request<F>
where
    F: Future<Output = Result<Vec<u8>, ReadError>>,
{
    pub fn new(source: F, big_endian: bool) -> Self {
        Self { source, big_endian }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub render: RenderOptions,
    /// Clear the document before appending a new tree. Off by default, so
    /// results of earlier requests accumulate.
    pub clear_previous: bool,
}

pub struct Pipeline<D, Doc, N> {
    decoder: D,
    document: RefCell<Doc>,
    notifier: N,
    options: Cell<PipelineOptions>,
    in_flight: Cell<bool>,
}

/// Marks a run as in flight until dropped.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<D, Doc, N> Pipeline<D, Doc, N>
where
    D: Decode,
    Doc: Document,
    N: Notifier,
{
    pub fn new(
        decoder: Initialized<D>,
        document: Doc,
        notifier: N,
        options: PipelineOptions,
    ) -> Self {
        Self {
            decoder: decoder.0,
            document: RefCell::new(document),
            notifier,
            options: Cell::new(options),
            in_flight: Cell::new(false),
        }
    }

    pub fn options(&self) -> PipelineOptions {
        self.options.get()
    }

    /// Change the options used by later requests.
    pub fn set_options(&self, options: PipelineOptions) {
        self.options.set(options);
    }

    pub fn document(&self) -> Ref<'_, Doc> {
        self.document.borrow()
    }

    pub fn into_document(self) -> Doc {
        self.document.into_inner()
    }

    /// Process one request to completion.
    ///
    /// Read failures are logged only. Decompression and decode failures, and
    /// requests refused because another is in flight, are also sent to the
    /// notifier. Nothing is appended for a failed request, and a failure has
    /// no effect on later requests.
    pub async fn submit<F>(&self, request: Request<F>) -> Result<(), Error>
    where
        F: Future<Output = Result<Vec<u8>, ReadError>>,
    {
        let _in_flight = match InFlight::enter(&self.in_flight) {
            Some(guard) => guard,
            None => return Err(self.fail(Error::Busy)),
        };

        let bytes = request.source.await.map_err(|e| {
            error!("could not read file: {}", e);
            Error::Read(e)
        })?;
        debug!("read {} bytes", bytes.len());

        let bytes = compression::inflate(bytes).map_err(|e| self.fail(Error::Decompress(e)))?;

        let tag = self
            .decoder
            .decode(&bytes, request.big_endian)
            .map_err(|e| self.fail(Error::Decode(e)))?;

        let options = self.options.get();
        let tree = Renderer::new(options.render).render(&tag);
        debug!("rendered tree of depth {}", tree.depth());

        let mut document = self.document.borrow_mut();
        if options.clear_previous {
            document.clear();
        }
        document.append(tree);

        Ok(())
    }

    fn fail(&self, e: Error) -> Error {
        self.notifier.notify(&e.to_string());
        e
    }
}
