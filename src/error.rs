use thiserror::Error;

use crate::core::AxisClass;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("too many ticks: {count} exceeds the limit of {limit}")]
    TooManyTicks { count: usize, limit: usize },

    #[error("can't find axis \"{0}\"")]
    UnknownAxis(String),

    #[error("axis \"{0}\" already exists")]
    DuplicateAxis(String),

    #[error("axis \"{0}\" is still referenced")]
    AxisInUse(String),

    #[error("wrong type axis \"{name}\": can't use {expected} type axis")]
    WrongAxisClass { name: String, expected: AxisClass },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("tick label format hook failed: {0}")]
    LabelFormat(String),
}
