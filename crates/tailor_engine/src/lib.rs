//! Tailor engine: transport, file intake and PDF export.
mod client;
mod engine;
mod export;
mod intake;
mod persist;
mod types;

pub use client::{OptimizeClient, ReqwestOptimizeClient, ServiceSettings, ServiceStatus};
pub use engine::{probe_service, EngineConfig, EngineError, EngineHandle};
#[cfg(feature = "chromium")]
pub use export::ChromiumRasterizer;
pub use export::{
    default_rasterizer, surface_document, ComposedPdf, ExportError, ExportSettings, PdfComposer,
    PdfExporter, SurfaceRasterizer, SurfaceSpec, UnavailableRasterizer, PX_PER_PT,
};
pub use intake::{describe_local_file, mime_for_path, IntakeError, LocalFile};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, ExportId, ExportReceipt, FailureKind, OptimizeError, OptimizePayload, RequestId,
};
