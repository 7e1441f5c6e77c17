//! Test suites for the node console.

pub(crate) mod support;
