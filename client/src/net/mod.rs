//! REST transport for the rooms workflow.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the only module that touches the network. Everything it returns
//! is a `rooms` type or a `WorkflowError`, so pages never see `gloo-net`.
//! `abort` ties in-flight markup requests to the component that wants them.

pub mod abort;
pub mod api;
