//! Systems - logic that operates on the session's world and seats

mod customers;
mod pointer;
mod service;

pub use customers::*;
pub use pointer::*;
pub use service::*;
