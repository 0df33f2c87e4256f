//! Client side of the product catalog.
//!
//! - [`state`]: the list/edit/draft state record and its pure transitions.
//! - [`field`]: typed field edits, and parsing of raw form input into them.
//! - [`api`]: the HTTP client for the `/products` API.
//! - [`session`]: drives `state` from `api` results, one event at a time.

pub mod api;
pub mod field;
pub mod session;
pub mod state;

pub use api::{ClientError, ProductApi};
pub use field::{FieldEdit, InputError};
pub use session::{ProductSession, SessionError};
pub use state::{ClientState, Event, Notice, Operation, Rejection};
