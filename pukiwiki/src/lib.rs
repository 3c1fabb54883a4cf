//! Internal API of the pukiwiki binary, exposed for integration tests.
pub mod cli;
pub mod site;
