//! fieldtrace-core: String-keyed container access and traceable decode errors.
//!
//! This crate provides:
//! - `DynamicKey`: A coding key built from any field name
//! - Keyed container traits and their field-name operations (`DynamicDecoding`, `DynamicEncoding`)
//! - `DecodeError`: A failure chain naming every property down to the root cause
//! - Rendering of that chain as an indented diagnostic
//! - `TypeDecoder`: Property decoding that builds the chain as failures propagate

pub mod config;
pub mod container;
pub mod decode;
pub mod error;
pub mod key;
pub mod render;

pub use config::{DateStrategy, RenderConfig};
pub use container::{
    DecodeField, DynamicDecoding, DynamicEncoding, EncodeField, KeyedDecodingContainer,
    KeyedEncodingContainer,
};
pub use decode::{
    decode_type, decode_type_with, format_date, parse_date, FieldDecode, FieldEncode, TypeDecoder,
};
pub use error::{DecodeError, OpaqueValue, Result, TypeName};
pub use key::{CodingKey, DynamicKey};
pub use render::{render, unwind, Chain, ChainFrame, Renderer, Terminal};
