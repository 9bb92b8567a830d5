//! Chapter assembly.
//!
//! A chapter is one output file: an XML declaration, a `chapter` (or
//! `appendix`) root with a title, an optional introduction drawn from one
//! module, and one `section` per unit module. Each chapter is converted
//! fully in memory and written with a single write, so a unit that fails to
//! parse leaves no partial file behind.
//!
//! Chapters share no state, so a book converts its chapters independently
//! (on a thread pool with the `parallel` feature).

mod manifest;
mod source;

pub use manifest::{BookManifest, ChapterSpec, Division, UnitSpec};
pub use source::{DirectorySource, MemorySource, ModuleSource};

use crate::cnxml::{BlockKind, CnxmlDocument};
use crate::common::namespace::XINCLUDE_NS;
use crate::common::xml::{escape_attribute, escape_text};
use crate::common::Result;
use crate::pretext::{ConversionContext, Converter, PretextOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Block kinds that may open a chapter.
fn is_introduction_block(kind: BlockKind) -> bool {
    matches!(
        kind,
        BlockKind::Paragraph
            | BlockKind::List
            | BlockKind::Figure
            | BlockKind::Note
            | BlockKind::Table
            | BlockKind::Equation
            | BlockKind::Quote
            | BlockKind::Media
    )
}

fn load_document(source: &dyn ModuleSource, module: &str) -> Result<CnxmlDocument> {
    let bytes = source.load(module)?;
    CnxmlDocument::from_bytes(module, &bytes)
}

/// Convert one chapter to a complete PreTeXt document.
pub fn convert_chapter(spec: &ChapterSpec, source: &dyn ModuleSource, options: &PretextOptions) -> Result<String> {
    let converter = Converter::new(options);
    let pad = " ".repeat(options.indent_width);
    let tag = spec.division.tag();

    let mut out = String::from(XML_DECLARATION);
    out.push_str(&format!(
        "<{} xml:id=\"{}\" xmlns:xi=\"{}\">\n",
        tag,
        escape_attribute(&spec.id),
        XINCLUDE_NS
    ));
    out.push_str(&format!("{}<title>{}</title>\n", pad, escape_text(&spec.title)));

    if let Some(module) = &spec.introduction {
        let doc = load_document(source, module)?;
        match doc.content() {
            Some(content) => {
                let blocks =
                    converter.convert_blocks_where(content, &spec.id, ConversionContext::new(2), is_introduction_block);
                if !blocks.is_empty() {
                    out.push_str(&format!("{}<introduction>\n{}{}</introduction>\n", pad, blocks, pad));
                }
            },
            None => debug!(module = module.as_str(), "introduction module has no content"),
        }
    }

    for unit in &spec.units {
        let doc = load_document(source, &unit.module)?;
        info!(chapter = spec.id.as_str(), module = unit.module.as_str(), "converting unit");
        out.push_str(&converter.convert_unit(
            &doc,
            unit.section_id(),
            unit.title.as_deref(),
            ConversionContext::new(1),
        ));
    }

    out.push_str(&format!("</{}>\n", tag));
    Ok(out)
}

/// Convert a chapter and write it to `{out_dir}/{slug}.ptx`.
pub fn write_chapter(
    spec: &ChapterSpec,
    source: &dyn ModuleSource,
    options: &PretextOptions,
    out_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let ptx = convert_chapter(spec, source, options)?;
    let path = out_dir.as_ref().join(format!("{}.ptx", spec.slug));
    std::fs::write(&path, ptx)?;
    info!(chapter = spec.id.as_str(), path = %path.display(), "wrote chapter");
    Ok(path)
}

/// Convert every chapter of a book, one result per chapter id.
///
/// A failing chapter does not stop the others.
pub fn convert_book(
    manifest: &BookManifest,
    source: &dyn ModuleSource,
    options: &PretextOptions,
) -> Vec<(String, Result<String>)> {
    let convert = |spec: &ChapterSpec| (spec.id.clone(), convert_chapter(spec, source, options));

    #[cfg(feature = "parallel")]
    let results = manifest.chapters.par_iter().map(convert).collect();
    #[cfg(not(feature = "parallel"))]
    let results = manifest.chapters.iter().map(convert).collect();

    results
}

/// Convert and write every chapter of a book into `out_dir`.
pub fn write_book(
    manifest: &BookManifest,
    source: &dyn ModuleSource,
    options: &PretextOptions,
    out_dir: impl AsRef<Path>,
) -> Vec<(String, Result<PathBuf>)> {
    let out_dir = out_dir.as_ref();
    let write = |spec: &ChapterSpec| (spec.id.clone(), write_chapter(spec, source, options, out_dir));

    #[cfg(feature = "parallel")]
    let results = manifest.chapters.par_iter().map(write).collect();
    #[cfg(not(feature = "parallel"))]
    let results = manifest.chapters.iter().map(write).collect();

    results
}
