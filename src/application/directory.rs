//! School directory view model: fetch once, filter locally.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;

use crate::domain::{filter_schools, School};
use crate::error::{Error, Result};
use crate::port::outbound::api::SchoolApi;

pub const FETCH_FAILURE: &str = "An error occurred while fetching schools";

/// Load status of the directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DirectoryState {
    #[default]
    Loading,
    Loaded(Vec<School>),
    Failed(String),
}

/// Why a loaded directory shows nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// Schools exist but none match the query.
    NoMatches,
    /// No school has been registered yet.
    NoSchools,
}

/// Listing page state bound to a [`SchoolApi`].
pub struct Directory<A> {
    api: Arc<A>,
    state: RwLock<DirectoryState>,
    query: RwLock<String>,
}

impl<A: SchoolApi> Directory<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: RwLock::new(DirectoryState::Loading),
            query: RwLock::new(String::new()),
        }
    }

    /// Fetch the full list, replacing whatever was loaded before.
    ///
    /// # Errors
    /// Returns the API error after recording it as [`DirectoryState::Failed`].
    pub async fn load(&self) -> Result<usize> {
        *self.state.write() = DirectoryState::Loading;

        match self.api.list_schools().await {
            Ok(schools) => {
                let count = schools.len();
                *self.state.write() = DirectoryState::Loaded(schools);
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "Failed to load schools");
                let message = match &err {
                    Error::Api { message, .. } if !message.is_empty() => message.clone(),
                    _ => FETCH_FAILURE.to_string(),
                };
                *self.state.write() = DirectoryState::Failed(message);
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> DirectoryState {
        self.state.read().clone()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        *self.query.write() = query.into();
    }

    #[must_use]
    pub fn query(&self) -> String {
        self.query.read().clone()
    }

    /// Loaded schools matching the current query, newest first.
    #[must_use]
    pub fn visible(&self) -> Vec<School> {
        let query = self.query.read();
        match &*self.state.read() {
            DirectoryState::Loaded(schools) => filter_schools(schools, &query)
                .into_iter()
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Number of loaded schools, ignoring the query.
    #[must_use]
    pub fn total(&self) -> usize {
        match &*self.state.read() {
            DirectoryState::Loaded(schools) => schools.len(),
            _ => 0,
        }
    }

    /// Set when the directory is loaded but shows nothing.
    #[must_use]
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if !matches!(*self.state.read(), DirectoryState::Loaded(_)) {
            return None;
        }
        if self.total() == 0 {
            Some(EmptyReason::NoSchools)
        } else if self.visible().is_empty() {
            Some(EmptyReason::NoMatches)
        } else {
            None
        }
    }
}
