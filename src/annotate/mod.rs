mod annotator;
mod validator;

pub use annotator::{AnnotateError, annotate};
#[cfg(test)]
pub use annotator::DISTANCE_COLUMN;
pub use validator::{ValidationError, validate};
