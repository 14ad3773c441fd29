//! Namespace constants and name helpers shared by the parser and serializer.

/// The FES 2.0 namespace every filter element lives in.
pub const FES_NAMESPACE: &str = "http://www.opengis.net/fes/2.0";

/// The XML Schema namespace, declared when typed literals are written.
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

pub const FES_PREFIX: &str = "fes";
pub const GML_PREFIX: &str = "gml";

/// Qualifies a local name with the `fes` prefix.
pub(crate) fn fes_name(local: &str) -> String {
    format!("{}:{}", FES_PREFIX, local)
}

/// Qualifies a local name with the `gml` prefix.
pub(crate) fn gml_name(local: &str) -> String {
    format!("{}:{}", GML_PREFIX, local)
}
