//! Benchmark inputs for the Rift reflection framework.
//!
//! - [`metadata_layouts`]: a deterministic mix of allocation layouts shaped
//!   like reflection metadata (small records, name buffers, tables)
//! - [`synthetic_keys`]: distinct type keys spread over a few source files

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::alloc::Layout;

use rift_core::TypeKey;

/// `count` layouts cycling through sizes and alignments typical of
/// reflection metadata.
pub fn metadata_layouts(count: usize) -> Vec<Layout> {
    const SHAPES: [(usize, usize); 6] = [(8, 8), (24, 8), (48, 8), (96, 16), (13, 1), (256, 16)];
    (0..count)
        .map(|i| {
            let (size, align) = SHAPES[i % SHAPES.len()];
            match Layout::from_size_align(size, align) {
                Ok(layout) => layout,
                Err(_) => unreachable!("constant layouts are valid"),
            }
        })
        .collect()
}

/// `count` distinct keys, ten declarations per source file.
pub fn synthetic_keys(count: usize) -> Vec<TypeKey> {
    (0..count)
        .map(|i| {
            let file = format!("src/generated/module_{}.rs", i / 10);
            TypeKey::new(&format!("Type{i}"), &file, (i % 10) as u32 * 12 + 1)
        })
        .collect()
}
