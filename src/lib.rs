//! # Justified Gallery
//!
//! Justified photo-grid layout: photos are split into rows that each span the
//! container width exactly, with every photo in a row sharing one height.
//! Row heights stay near a target and the number of photos per row changes
//! gently from one row to the next.
//!
//! The core is [`layout::compute_justified_layout`], a pure function from an
//! ordered photo list and a width to a list of rows. Around it sits a small
//! two-stage pipeline that feeds it from a content directory:
//!
//! ```text
//! 1. Scan      content/    →  photos.json   (directories → ordered photo lists)
//! 2. Arrange   photos.json →  stdout        (rows for a given width)
//! ```
//!
//! Layouts are never written to disk: a layout is only valid for the width it
//! was computed at, and computing one is cheap.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | The engine: cost function, row-break search, row sizing |
//! | [`types`] | Shared types: [`types::PhotoInput`], [`types::LayoutItem`], [`types::Row`] |
//! | [`scan`] | Stage 1: walks the content directory, reads photo dimensions |
//! | [`arrange`] | Stage 2: runs the engine for every album |
//! | [`config`] | Hierarchical `config.toml` loading, validation and merging |
//! | [`naming`] | `NNN-name` ordering convention |
//! | [`imaging`] | Reading pixel dimensions from image headers |
//! | [`output`] | CLI output formatting |
//!
//! # The Layout Problem
//!
//! Fixing a row's photos fixes its height: the photos must share one height
//! and their widths (height × aspect ratio) plus the gaps must equal the
//! container width. The only freedom is where rows break. The engine prices
//! every feasible row by how far its height lands from the target, whether
//! that height is unusably short or tall, how much its photo count differs
//! from the previous row's, and how far it strays from the gallery-wide
//! average. A dynamic program over break positions finds the cheapest
//! partition, looking back at most `max_photos_per_row` photos from each
//! position, so a gallery of n photos costs O(n · max_photos_per_row).

pub mod arrange;
pub mod config;
pub mod imaging;
pub mod layout;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
