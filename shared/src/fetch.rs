//! Request state of a server read and the render precedence built on it.

use crate::error::ClientError;

/// Lifecycle of a single read request as seen by a component.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Failed(ClientError),
    Loaded(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> FetchState<T> {
    pub fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => FetchState::Loaded(value),
            Err(err) => FetchState::Failed(err),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// What a list component shows, in precedence order.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    /// A precondition for fetching (e.g. a connected account) is not met.
    PrerequisiteMissing,
    Loading,
    Error(&'a ClientError),
    Empty,
    Populated(&'a [T]),
}

/// Pick the list state to render. Rows keep the order the backend sent.
pub fn list_view<T>(prerequisite_met: bool, state: &FetchState<Vec<T>>) -> ListView<'_, T> {
    if !prerequisite_met {
        return ListView::PrerequisiteMissing;
    }
    match state {
        FetchState::Loading => ListView::Loading,
        FetchState::Failed(err) => ListView::Error(err),
        FetchState::Loaded(items) if items.is_empty() => ListView::Empty,
        FetchState::Loaded(items) => ListView::Populated(items.as_slice()),
    }
}

/// Single-flight flag for fire-and-forget actions such as triggering a run.
#[derive(Debug, Default)]
pub struct InFlight {
    pending: bool,
}

impl InFlight {
    /// Claims the slot; `false` when a request is already outstanding.
    pub fn try_begin(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn finish(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerequisite_wins_over_everything() {
        let failed: FetchState<Vec<u8>> = FetchState::Failed(ClientError::Network("x".into()));
        assert_eq!(list_view(false, &failed), ListView::PrerequisiteMissing);
        assert_eq!(
            list_view::<u8>(false, &FetchState::Loading),
            ListView::PrerequisiteMissing
        );
    }

    #[test]
    fn test_list_precedence() {
        assert_eq!(list_view::<u8>(true, &FetchState::Loading), ListView::Loading);

        let err = ClientError::Http {
            status: 500,
            message: "boom".into(),
        };
        let failed: FetchState<Vec<u8>> = FetchState::Failed(err.clone());
        assert_eq!(list_view(true, &failed), ListView::Error(&err));

        let empty: FetchState<Vec<u8>> = FetchState::Loaded(Vec::new());
        assert_eq!(list_view(true, &empty), ListView::Empty);
    }

    #[test]
    fn test_populated_keeps_backend_order() {
        let state = FetchState::Loaded(vec![3, 1, 2]);
        match list_view(true, &state) {
            ListView::Populated(items) => assert_eq!(items, &[3, 1, 2]),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_from_result() {
        let ok: FetchState<u8> = FetchState::from_result(Ok(7));
        assert_eq!(ok.loaded(), Some(&7));
        let err: FetchState<u8> = FetchState::from_result(Err(ClientError::Decode("x".into())));
        assert!(err.loaded().is_none());
        assert!(matches!(err, FetchState::Failed(ClientError::Decode(_))));
    }

    #[test]
    fn test_in_flight_admits_one_request_until_finished() {
        let mut guard = InFlight::default();
        assert!(guard.try_begin());
        assert!(!guard.try_begin());
        guard.finish();
        assert!(guard.try_begin());
    }
}
