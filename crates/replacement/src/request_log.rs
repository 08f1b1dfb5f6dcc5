//! Ring-buffer log of recently processed replacement requests.
//!
//! UI panels read this instead of diffing the catalog to find out whether the
//! last request did anything.

use bevy::prelude::*;

use crate::layers::ApplyOutcome;
use crate::plugin::ReplacementRequest;

const MAX_ENTRIES: usize = 64;

/// What processing one request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestResult {
    Applied(ApplyOutcome),
    Reverted { released: usize, reinstated: usize },
    Restored(bool),
    RevertedAll(usize),
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RequestLog {
    entries: Vec<(ReplacementRequest, RequestResult)>,
}

impl RequestLog {
    /// Record a request and its result, evicting the oldest entry when full.
    pub fn push(&mut self, request: ReplacementRequest, result: RequestResult) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push((request, result));
    }

    pub fn last_n(&self, n: usize) -> &[(ReplacementRequest, RequestResult)] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn last_result(&self) -> Option<RequestResult> {
        self.entries.last().map(|(_, result)| *result)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
