//! Application layer for Herald.
//!
//! Coordinates the refresh cycle (fetch, reconcile) and the outbound actions
//! (save, trigger) on top of a [`herald_core::BackendGateway`].

pub mod console;
pub mod dispatcher;
pub mod fetcher;

#[cfg(test)]
mod mock;

pub use console::{ConsoleUseCase, ConsoleView};
pub use dispatcher::{SubmitReceipt, UpdateDispatcher};
pub use fetcher::{RefreshTicket, RemoteSnapshot, RemoteStateFetcher, merge_roster};
