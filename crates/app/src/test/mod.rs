//! Test helpers.

mod responder;

pub(crate) use responder::respond_once;
