/// GUI layer
///
/// Pure projections of catalog state (`GridView`, `ModalView`) and the
/// iced widgets that draw them:
/// - Header, search box and filter controls (toolbar.rs)
/// - Card grid and empty state (grid.rs)
/// - Detail modal with tabs and image carousel (modal.rs)

pub mod grid;
pub mod modal;
pub mod toolbar;
