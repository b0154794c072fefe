//! Authentication
//!
//! Bearer session middleware and the sign up, sign in and profile endpoints.

pub(crate) mod handlers;
pub(crate) mod middleware;

pub(crate) use handlers::*;
