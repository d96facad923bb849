/// Asset loading module
///
/// This module handles:
/// - Reading and decoding the JSON dataset
/// - Generating and caching card thumbnails

pub mod dataset;
pub mod thumbnail;
