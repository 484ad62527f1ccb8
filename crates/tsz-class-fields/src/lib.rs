//! Class field analysis for token-level TypeScript transforms.
//!
//! Given an annotated [`TokenStream`](tsz_scanner::TokenStream) positioned at
//! a `class` token, [`get_class_info`] walks the class once and reports what
//! a code generator needs to turn field declarations into assignments:
//!
//! - `class_header` - Name, superclass presence, expression position
//! - `constructor` - Parameter properties and the initializer insertion point
//! - `members` - Modifier and member-name predicates
//! - `class_info` - The body scan and its result types
//!
//! The scan never builds a syntax tree. It relies on the pairing tags and
//! type flags `tsz_scanner::annotate` stamps on the tokens.

pub mod class_header;
pub mod class_info;
pub mod constructor;
pub mod error;
pub mod members;
pub mod name_manager;
pub mod options;
pub mod rewriter;

pub use class_header::{ClassHeaderInfo, process_class_header};
pub use class_info::{ClassField, ClassInfo, TokenRange, get_class_info};
pub use constructor::{ConstructorInfo, process_constructor};
pub use error::{Annotation, ClassInfoError};
pub use name_manager::{NameAllocator, NameManager};
pub use options::ClassTransformOptions;
pub use rewriter::{ExpressionRewriter, SkipRewriter, TextCollector};
