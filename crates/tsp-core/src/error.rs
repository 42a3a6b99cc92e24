use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to allocate {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: usize },
    #[error("worker protocol violation: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}

/// Allocates a vector of `len` copies of `fill`, reporting an allocation
/// failure instead of aborting the process.
pub fn try_filled_vec<T: Clone>(len: usize, fill: T, what: &'static str) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| Error::Allocation {
        what,
        bytes: len.saturating_mul(std::mem::size_of::<T>()),
    })?;
    buffer.resize(len, fill);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_vec_has_requested_length() {
        let buffer = try_filled_vec(5, 7u32, "test buffer").unwrap();
        assert_eq!(buffer, vec![7; 5]);
    }

    #[test]
    fn impossible_allocation_is_an_error() {
        let err = try_filled_vec(usize::MAX / 2, 0u64, "huge buffer").unwrap_err();
        assert!(matches!(err, Error::Allocation { what: "huge buffer", .. }));
    }
}
