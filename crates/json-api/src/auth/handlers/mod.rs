//! Auth Handlers

pub(crate) mod me;
pub(crate) mod sign_in;
pub(crate) mod sign_out;
pub(crate) mod sign_up;
pub(crate) mod update_profile;
