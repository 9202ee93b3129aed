#![forbid(unsafe_code)]

use exegete_wire::StreamKey;
use serde::{Serialize, de::DeserializeOwned};

/// Compile-time parameterization of one document class.
///
/// One generic session serves every document class; a profile supplies the
/// resolved document shape, the class name, the known section set and the
/// request path. Implementors are unit structs.
pub trait DocumentProfile: Send + Sync + 'static {
    /// The resolved document delivered by the `complete` envelope.
    type Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Document class name, e.g. `word-analysis`.
    const CLASS: &'static str;

    /// Section names this class is known to stream. Unknown sections are
    /// still accumulated; the set exists for rendering order and diagnostics.
    const SECTIONS: &'static [&'static str];

    /// Path segments appended to the configured base URL.
    ///
    /// Defaults to `CLASS` followed by the key's normalized coordinates.
    fn request_path(key: &StreamKey) -> Vec<String> {
        let mut segments = Vec::with_capacity(key.coords().len() + 1);
        segments.push(Self::CLASS.to_string());
        segments.extend(key.coords().iter().cloned());
        segments
    }
}
