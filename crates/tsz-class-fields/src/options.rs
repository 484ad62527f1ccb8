//! Options for the class field analysis.

use serde::{Deserialize, Serialize};

/// Options that change what the analysis reports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassTransformOptions {
    /// Leave class fields in place for a runtime with native field support.
    ///
    /// Parameter properties, the constructor insertion point and the removal
    /// of `declare`/`abstract` fields are still reported.
    #[serde(rename = "disableESTransforms")]
    pub disable_es_transforms: bool,
}
