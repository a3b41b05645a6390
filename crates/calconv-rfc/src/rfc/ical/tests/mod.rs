//! End-to-end conversion tests.

mod fixtures;
