/// State management module
///
/// This module handles all catalog state, independent of the GUI:
/// - Species records and their lenient JSON decoding (data.rs)
/// - The loaded dataset and its derived views (store.rs)
/// - Search and structural filters (filter.rs)
/// - The single-slot search debounce timer (debounce.rs)
/// - The detail modal state machine (session.rs)
/// - The controller that owns all of the above (controller.rs)

pub mod controller;
pub mod data;
pub mod debounce;
pub mod filter;
pub mod session;
pub mod store;
