pub mod declarations;
pub mod inference;

pub use declarations::{DeclarationTable, collect_declarations};
pub use inference::{Kind, infer_expression_type};
