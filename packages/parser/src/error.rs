use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Markup nesting exceeds {limit} levels at {pos}")]
    NestingTooDeep { limit: usize, pos: usize },
}

impl ParseError {
    pub fn nesting_too_deep(limit: usize, pos: usize) -> Self {
        Self::NestingTooDeep { limit, pos }
    }
}
