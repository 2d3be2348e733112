// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF inspector — read back exported scans with `lopdf` to check page count,
// page size, the dimensions of embedded images, and how they are drawn.

use std::path::Path;

use docscan_core::error::ScanError;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, instrument};

/// Read-only view over a PDF file.
pub struct PdfInspector {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfInspector {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            ScanError::DecodeFailure(format!("failed to open {}: {}", path_ref.display(), err))
        })?;
        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    /// Parse PDF bytes already in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ScanError> {
        let document = Document::load_mem(data).map_err(|err| {
            ScanError::DecodeFailure(format!("failed to load PDF from memory: {}", err))
        })?;
        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Page size (1-indexed) in PDF units, from the page's MediaBox or the
    /// nearest ancestor that defines one.
    pub fn page_size(&self, page_number: u32) -> Result<(f32, f32), ScanError> {
        let page_id = self.page_id(page_number)?;

        let media_box = self
            .inherited_entry(page_id, b"MediaBox")
            .ok_or_else(|| ScanError::DecodeFailure("page has no MediaBox".into()))?;
        let values = self
            .resolve(media_box)
            .as_array()
            .map_err(|err| ScanError::DecodeFailure(format!("malformed MediaBox: {err}")))?
            .iter()
            .map(|v| self.resolve(v).as_float())
            .collect::<Result<Vec<f32>, _>>()
            .map_err(|err| ScanError::DecodeFailure(format!("malformed MediaBox: {err}")))?;

        match values.as_slice() {
            [x0, y0, x1, y1] => Ok(((x1 - x0).abs(), (y1 - y0).abs())),
            other => Err(ScanError::DecodeFailure(format!(
                "MediaBox has {} entries",
                other.len()
            ))),
        }
    }

    /// Page size rounded to whole pixels at one pixel per PDF unit.
    pub fn page_pixel_size(&self, page_number: u32) -> Result<(u32, u32), ScanError> {
        let (w, h) = self.page_size(page_number)?;
        Ok((w.round() as u32, h.round() as u32))
    }

    /// Pixel dimensions of every image XObject in the document.
    pub fn image_sizes(&self) -> Vec<(u32, u32)> {
        self.document
            .objects
            .values()
            .filter_map(|object| object.as_stream().ok())
            .filter(|stream| {
                stream
                    .dict
                    .get(b"Subtype")
                    .and_then(Object::as_name)
                    .is_ok_and(|name| name == b"Image")
            })
            .filter_map(|stream| {
                let w = stream.dict.get(b"Width").and_then(Object::as_i64).ok()?;
                let h = stream.dict.get(b"Height").and_then(Object::as_i64).ok()?;
                Some((u32::try_from(w).ok()?, u32::try_from(h).ok()?))
            })
            .collect()
    }

    /// Operands of every `cm` (concatenate matrix) operator in the page's
    /// content stream, in drawing order.
    ///
    /// For a scan page this is the matrix the image is drawn with: `[a, 0, 0,
    /// d, e, f]` puts it `a` x `d` units large at (`e`, `f`).
    pub fn draw_transforms(&self, page_number: u32) -> Result<Vec<[f32; 6]>, ScanError> {
        let page_id = self.page_id(page_number)?;
        let data = self
            .document
            .get_page_content(page_id)
            .map_err(|err| ScanError::DecodeFailure(format!("unreadable page content: {err}")))?;
        let content = Content::decode(&data)
            .map_err(|err| ScanError::DecodeFailure(format!("malformed page content: {err}")))?;

        content
            .operations
            .iter()
            .filter(|op| op.operator == "cm")
            .map(|op| {
                let values = op
                    .operands
                    .iter()
                    .map(Object::as_float)
                    .collect::<Result<Vec<f32>, _>>()
                    .map_err(|err| ScanError::DecodeFailure(format!("malformed cm: {err}")))?;
                <[f32; 6]>::try_from(values).map_err(|values| {
                    ScanError::DecodeFailure(format!("cm has {} operands", values.len()))
                })
            })
            .collect()
    }

    // -- Helpers --------------------------------------------------------------

    /// Object id of page `page_number` (1-indexed).
    fn page_id(&self, page_number: u32) -> Result<ObjectId, ScanError> {
        let pages = self.document.get_pages();
        pages.get(&page_number).copied().ok_or_else(|| {
            ScanError::DecodeFailure(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })
    }

    /// Follow references until a direct object is reached.
    fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self
                .document
                .get_object(*id)
                .map(|inner| self.resolve(inner))
                .unwrap_or(object),
            direct => direct,
        }
    }

    /// Look up `key` on a page, walking up the `/Parent` chain for inherited
    /// attributes.
    fn inherited_entry(&self, node: ObjectId, key: &[u8]) -> Option<&Object> {
        let mut current = Some(node);
        // Page trees are shallow; the bound guards against reference cycles.
        for _ in 0..32 {
            let dict: &Dictionary = self.document.get_dictionary(current?).ok()?;
            if let Ok(value) = dict.get(key) {
                return Some(value);
            }
            current = dict.get(b"Parent").and_then(Object::as_reference).ok();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_a_decode_failure() {
        let err = PdfInspector::from_bytes(b"%PDF-not-really").err().unwrap();
        assert!(matches!(err, ScanError::DecodeFailure(_)));
    }
}
