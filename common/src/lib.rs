//! Vision Query Common Library
//!
//! CLIとWeb(WASM)で共有される型・ワイヤ形式・描画処理

pub mod types;
pub mod error;
pub mod wire;
pub mod render;
pub mod state;
pub mod annotate;

pub use types::{Feature, FeatureSelection, InferenceRequest, InferenceResponse};
pub use error::{Error, FailureReport, Result};
pub use wire::{encode_form, interpret_response, parse_response, DEFAULT_ENDPOINT, FORM_CONTENT_TYPE};
pub use render::{render_error, render_image_preview, render_results, WORKING_PLACEHOLDER};
pub use state::{QueryTracker, RenderState, RequestTicket};
pub use annotate::{build_annotate_request, describe_annotations, pretty_list, AnnotateRequest};
