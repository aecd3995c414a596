//! Application layer: the session state machine, the checkout and the
//! context object that ties them to a catalog and a gateway.
//!
//! Commands are handled one at a time. The only suspension point is the
//! simulated gateway call, which runs as a tokio task owned by the checkout.

pub mod app;
pub mod checkout;
pub mod session;
