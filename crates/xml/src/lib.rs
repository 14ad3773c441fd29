//! XML encoding for the FES 2.0 filter object model.
//!
//! The parser is a recursive descent over a namespace-resolved `roxmltree`
//! tree; the serializer drives a `quick-xml` event writer. The two sides are
//! kept symmetric: every tree the serializer can emit, the parser accepts
//! back into an equal tree.

pub mod error;
pub mod ns;
pub mod parser;
pub mod serializer;

pub use error::{ParseError, SerializeError};
pub use ns::{FES_NAMESPACE, XS_NAMESPACE};
pub use parser::{parse_filter, parse_filter_document};
pub use serializer::{serialize_filter, write_filter};
