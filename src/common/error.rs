use std::{error::Error, sync::Arc};

/// The error type a [`CacheLoader`][loader] returns from `load` and `reload`.
///
/// [loader]: ../trait.CacheLoader.html
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The error type for the loading methods of a
/// [`LoadingCache`][loading-cache] such as `get`.
///
/// A `LoadError` is shared by every caller that waited on the same load, so it
/// is cheap to clone.
///
/// [loading-cache]: ./sync/struct.LoadingCache.html
#[derive(thiserror::Error, Debug, Clone)]
pub enum LoadError {
    /// The loader returned an error. No value was cached for the key.
    #[error("failed to load a value: {0}")]
    Failed(#[source] Arc<dyn Error + Send + Sync + 'static>),

    /// The loader panicked, so the computation was abandoned before it produced
    /// a value. No value was cached for the key.
    #[error("the loader panicked while computing a value")]
    Panicked,
}

impl LoadError {
    pub(crate) fn from_boxed(error: BoxError) -> Self {
        Self::Failed(Arc::from(error))
    }

    /// Returns the error returned by the loader, if any.
    pub fn loader_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::Failed(e) => Some(e.as_ref()),
            Self::Panicked => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BoxError, LoadError};

    use std::error::Error;

    #[test]
    fn wraps_the_loader_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = LoadError::from_boxed(BoxError::from(io));

        assert_eq!(err.to_string(), "failed to load a value: no such file");
        assert_eq!(err.loader_error().map(|e| e.to_string()).as_deref(), Some("no such file"));
        assert!(err.source().is_some());

        let cloned = err.clone();
        assert!(matches!(cloned, LoadError::Failed(_)));
    }

    #[test]
    fn panicked_has_no_cause() {
        let err = LoadError::Panicked;
        assert!(err.loader_error().is_none());
        assert!(err.source().is_none());
    }
}
