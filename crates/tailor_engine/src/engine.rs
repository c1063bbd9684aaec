use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tailor_logging::{enter_operation, tailor_info, tailor_warn};

use crate::client::{OptimizeClient, ReqwestOptimizeClient, ServiceSettings, ServiceStatus};
use crate::export::{default_rasterizer, ExportError, ExportSettings, PdfExporter};
use crate::{EngineEvent, ExportId, FailureKind, OptimizeError, OptimizePayload, RequestId};

enum EngineCommand {
    Optimize {
        request_id: RequestId,
        payload: OptimizePayload,
    },
    Export {
        export_id: ExportId,
        html: String,
    },
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub service: ServiceSettings,
    pub export: ExportSettings,
    pub output_dir: PathBuf,
    /// Run Chromium with its sandbox; it cannot start as root in most containers.
    pub chromium_sandbox: bool,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            service: ServiceSettings::default(),
            export: ExportSettings::default(),
            output_dir,
            chromium_sandbox: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] OptimizeError),
    #[error("engine thread stopped")]
    Disconnected,
}

/// Background executor for transport and export work. Results come back as
/// [`EngineEvent`]s in completion order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let client = Arc::new(ReqwestOptimizeClient::new(config.service)?);
        let exporter = Arc::new(PdfExporter::new(
            default_rasterizer(config.chromium_sandbox),
            config.export,
        ));
        Self::with_parts(client, exporter, config.output_dir)
    }

    pub fn with_parts(
        client: Arc<dyn OptimizeClient>,
        exporter: Arc<PdfExporter>,
        output_dir: PathBuf,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let event_tx = event_tx.clone();
                match command {
                    EngineCommand::Optimize {
                        request_id,
                        payload,
                    } => {
                        let client = client.clone();
                        runtime.spawn(async move {
                            let result =
                                tokio::spawn(async move { client.optimize(&payload).await })
                                    .await
                                    .unwrap_or_else(|err| {
                                        Err(OptimizeError::new(
                                            FailureKind::Network,
                                            format!("request task aborted: {err}"),
                                        ))
                                    });
                            if let Err(err) = &result {
                                tailor_warn!("request {} failed: {}", request_id, err);
                            }
                            let _ = event_tx.send(EngineEvent::OptimizationCompleted {
                                request_id,
                                result,
                            });
                        });
                    }
                    EngineCommand::Export { export_id, html } => {
                        let exporter = exporter.clone();
                        let output_dir = output_dir.clone();
                        runtime.spawn(async move {
                            let result = tokio::task::spawn_blocking(move || {
                                let _scope = enter_operation(format!("export#{export_id}"));
                                exporter.export(&html, &output_dir)
                            })
                            .await
                            .unwrap_or_else(|err| Err(ExportError::Aborted(err.to_string())));
                            let _ = event_tx.send(EngineEvent::ExportCompleted { export_id, result });
                        });
                    }
                }
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit_optimization(&self, request_id: RequestId, payload: OptimizePayload) {
        tailor_info!("dispatching request {} ({})", request_id, payload.file_name);
        let _ = self.cmd_tx.send(EngineCommand::Optimize {
            request_id,
            payload,
        });
    }

    pub fn export(&self, export_id: ExportId, html: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Export {
            export_id,
            html: html.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Like [`recv_timeout`](Self::recv_timeout), but reports a stopped
    /// engine instead of folding it into `None`.
    pub fn wait_event(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Disconnected),
        }
    }
}

/// One-shot connectivity check against the service's probe endpoint.
pub fn probe_service(settings: ServiceSettings) -> Result<ServiceStatus, OptimizeError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| OptimizeError::new(FailureKind::Io, err.to_string()))?;
    let client = ReqwestOptimizeClient::new(settings)?;
    runtime.block_on(client.probe())
}
