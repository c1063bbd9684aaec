use crate::{ExportId, OptimizationRequest, RequestId, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitOptimization {
        request_id: RequestId,
        request: OptimizationRequest,
    },
    NavigateTo(Route),
    ExportDocument { export_id: ExportId, html: String },
}
