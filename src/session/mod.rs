//! Interactive session (verb module)
//!
//! Owns the filter state and the executor handle for one user. Every
//! evaluation is issued a [`Ticket`] with a monotonically increasing
//! generation, and only the newest ticket's result is displayed.
//!
//! ```ignore
//! let mut session = Session::start(settings).await;
//! session.edit(FilterEdit::SetAgeRange(25, 40))?;
//! if let Some(gauge) = session.refresh().await { /* render */ }
//! session.shutdown().await?;
//! ```

mod pipeline;
mod runtime;
mod ticket;

pub use runtime::{Inspection, Session};
pub use ticket::{fingerprint, Ticket};
