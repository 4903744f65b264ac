// Loading state for async data.

/// Lifecycle of one asynchronously loaded value.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState<T, E> {
    Idle,
    Loading,
    Loaded(T),
    Error(E),
}

// Manual impl so `T` and `E` need not be `Default`.
impl<T, E> Default for LoadingState<T, E> {
    fn default() -> Self {
        LoadingState::Idle
    }
}

impl<T, E> LoadingState<T, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            LoadingState::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for LoadingState<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => LoadingState::Loaded(data),
            Err(err) => LoadingState::Error(err),
        }
    }
}
