//! Client-side state modules.
//!
//! DESIGN
//! ======
//! `session` holds the in-memory auth session and mirrors every write into a
//! `storage` backend, so the two can be swapped independently (memory for
//! tests, a JSON file natively, `localStorage` in the browser).

pub mod session;
pub mod storage;
