//! Per-request state
//!
//! Every request kind owns one `ApiState` slot. Starting a request bumps the
//! slot's sequence number; a completion only lands in the slot when it carries
//! the latest sequence, so a slow response cannot overwrite a newer one.

use serde::Serialize;

use crate::error::ErrorPayload;

/// Identifies one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    /// Cache generation the request was issued under
    pub generation: u64,
    /// Sequence number within its slot
    pub seq: u64,
}

/// What happened to a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Slot and cache updated
    Current,
    /// Cache updated, slot already belongs to a newer request
    Superseded,
    /// Issued under an older cache generation; dropped entirely
    Stale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiState<T> {
    pub loading: bool,
    pub payload: T,
    pub successful: bool,
    pub error: Option<ErrorPayload>,
    #[serde(skip)]
    seq: u64,
}

impl<T: Default> Default for ApiState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            payload: T::default(),
            successful: false,
            error: None,
            seq: 0,
        }
    }
}

impl<T: Default> ApiState<T> {
    /// Mark the slot pending and return the new sequence number.
    pub fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.loading = true;
        self.payload = T::default();
        self.successful = false;
        self.error = None;
        self.seq
    }

    /// Returns false, leaving the slot untouched, when `seq` is not the latest.
    pub fn fulfill(&mut self, seq: u64, payload: T) -> bool {
        if seq != self.seq {
            return false;
        }
        self.loading = false;
        self.payload = payload;
        self.successful = true;
        self.error = None;
        true
    }

    /// Returns false, leaving the slot untouched, when `seq` is not the latest.
    pub fn reject(&mut self, seq: u64, error: ErrorPayload) -> bool {
        if seq != self.seq {
            return false;
        }
        self.loading = false;
        self.payload = T::default();
        self.successful = false;
        self.error = Some(error);
        true
    }

    /// Back to idle. In-flight completions for this slot are ignored afterwards.
    pub fn reset(&mut self) {
        let seq = self.seq + 1;
        *self = Self::default();
        self.seq = seq;
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}
