use thiserror::Error;

/// Rejections raised by the bounded entry point, [`crate::Merger`].
///
/// The unbounded engine never fails; these exist only to stop pathological
/// input from untrusted template authors before any scanning happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("template is {size} bytes, limit is {limit}")]
    TemplateTooLarge { size: usize, limit: usize },

    #[error("template nests braces {depth} deep, limit is {limit}")]
    BracesTooDeep { depth: usize, limit: usize },

    #[error("region {region} has {count} items, limit is {limit}")]
    TooManyItems {
        region: &'static str,
        count: usize,
        limit: usize,
    },
}
