//! Error handling for the cryptanalysis workspace

pub mod types;
pub mod traits;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Re-export error traits
pub use traits::ResultExt;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_errors_name_the_path() {
        let failed: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = failed.with_path("samples/PARA-1pk").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("samples/PARA-1pk"), "{text}");
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn format_errors_name_the_file() {
        let err = Error::format("signature corpus", "truncated input: expected 8 bits, found 3")
            .in_file(std::path::Path::new("samples/PARA-2sigs"));
        match &err {
            Error::Format { context, message } => {
                assert_eq!(*context, "signature corpus");
                assert!(message.starts_with("samples/PARA-2sigs: truncated"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(Error::Singular.in_file(std::path::Path::new("x")), Error::Singular));
    }

    #[test]
    fn unknown_parameter_set_is_descriptive() {
        let err = Error::UnknownParameterSet { id: 7 };
        assert!(err.to_string().contains("unknown parameter set 7"));
    }

    #[test]
    fn singular_is_the_only_retryable_outcome() {
        assert!(Error::Singular.is_singular());
        assert!(!Error::format("matrix", "short").is_singular());
    }
}
