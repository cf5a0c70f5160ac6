//! Wire schema for the generative backend.
//!
//! Only the Gemini REST surface is modelled; every optional field the backend
//! may omit is an `Option` or a `#[serde(default)]` collection so that absent
//! data is handled explicitly instead of by probing untyped JSON.

pub mod gemini;

pub use gemini::{
    ApiErrorEnvelope, GeminiContent, GeminiPart, GeminiRole, GenerateContentRequest,
    GenerateContentResponse, ImagenPredictRequest, ImagenPredictResponse, VeoPredictRequest,
    VideoOperation,
};
