//! Browser glue shared by pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! These modules keep `web-sys` details out of component bodies. Everything
//! that can run natively is compiled and tested without the `csr` feature.

pub mod browser;
pub mod designer_input;
pub mod storage;
