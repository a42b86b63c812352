// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page composition — stack the recognised pages of a document on one tall
// canvas as drawing primitives, ready for a vector renderer.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tablescan_core::error::{Result, TablescanError};
use tablescan_core::table::DetectedCell;
use tracing::{debug, info, instrument};

use crate::pipeline::PageScan;
use crate::scan::TextLine;

/// Font size used for body text lines.
pub const BODY_FONT_SIZE: u32 = 32;

/// Recognised body text of one page and the page's dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageText {
    pub width: u32,
    pub height: u32,
    pub lines: Vec<TextLine>,
}

impl From<&PageScan> for PageText {
    fn from(scan: &PageScan) -> Self {
        Self {
            width: scan.width,
            height: scan.height,
            lines: scan.lines.clone(),
        }
    }
}

/// A drawing primitive on the composed canvas. Rectangles are filled white;
/// text and lines are black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drawable {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Text {
        x: i64,
        y: i64,
        content: String,
        font_size: u32,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
}

/// All pages of a document laid out top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub width: f64,
    pub height: f64,
    pub page_count: usize,
    /// Drawing order: background, body text, cells, page separators.
    pub elements: Vec<Drawable>,
}

/// Serialises a composition into some vector format. Failures are reported
/// as [`TablescanError::RenderError`].
pub trait LayoutRenderer {
    fn render(&self, composition: &Composition) -> Result<Vec<u8>>;
}

/// Writes the composition itself as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl LayoutRenderer for JsonRenderer {
    fn render(&self, composition: &Composition) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(composition)?)
    }
}

/// Font size that fits `text` on one line of `width` pixels, or 0 for empty
/// text.
pub fn guess_font_size(text: &str, width: i64) -> u32 {
    let chars = text.chars().count();
    if chars == 0 || width <= 0 {
        return 0;
    }
    u32::try_from(width as u64 / chars as u64).unwrap_or(u32::MAX)
}

/// Stack `pages` on one canvas, optionally drawing each page's cells.
///
/// All pages must share one size, and `page_cells`, when given, must hold
/// one list per page.
#[instrument(skip_all, fields(pages = pages.len(), with_cells = page_cells.is_some()))]
pub fn compose_pages(pages: &[PageText], page_cells: Option<&[Vec<DetectedCell>]>) -> Result<Composition> {
    let first = pages
        .first()
        .ok_or_else(|| TablescanError::Precondition("expected at least one page to compose".into()))?;
    let (page_width, page_height) = (first.width, first.height);
    if let Some(page) = pages
        .iter()
        .find(|page| (page.width, page.height) != (page_width, page_height))
    {
        return Err(TablescanError::Precondition(format!(
            "expected one page size, found {}x{} and {}x{}",
            page_width, page_height, page.width, page.height
        )));
    }
    if let Some(cells) = page_cells {
        if cells.len() != pages.len() {
            return Err(TablescanError::Precondition(format!(
                "got {} pages but {} per-page cell lists",
                pages.len(),
                cells.len()
            )));
        }
    }

    let page_count = pages.len();
    let width = f64::from(page_width);
    let page_height = f64::from(page_height);
    let height = page_height * page_count as f64;

    let mut elements = vec![Drawable::Rect {
        x: 0.0,
        y: 0.0,
        width,
        height,
    }];

    for (index, page) in pages.iter().enumerate() {
        let offset = page_height * index as f64;
        elements.extend(page.lines.iter().map(|line| Drawable::Text {
            x: i64::from(line.h_pos),
            y: (f64::from(line.v_pos) + offset) as i64,
            content: line.text.clone(),
            font_size: BODY_FONT_SIZE,
        }));
    }

    if let Some(page_cells) = page_cells {
        for (index, cells) in page_cells.iter().enumerate() {
            let offset = page_height * index as f64;
            for cell in cells {
                push_cell(&mut elements, cell, offset);
            }
        }
    }

    elements.push(Drawable::Line {
        x1: 0.0,
        y1: 0.0,
        x2: 0.0,
        y2: height,
    });
    elements.push(Drawable::Line {
        x1: width,
        y1: 0.0,
        x2: width,
        y2: height,
    });
    for boundary in 0..=page_count {
        let y = page_height * boundary as f64;
        elements.push(Drawable::Line {
            x1: 0.0,
            y1: y,
            x2: width,
            y2: y,
        });
    }

    debug!(elements = elements.len(), "Pages composed");
    Ok(Composition {
        width,
        height,
        page_count,
        elements,
    })
}

/// A white box over the cell, then its text lines from the top, sized to
/// the longest line.
fn push_cell(elements: &mut Vec<Drawable>, cell: &DetectedCell, offset: f64) {
    let contour = &cell.contour;
    let top = f64::from(contour.y0()) + offset;
    elements.push(Drawable::Rect {
        x: f64::from(contour.x0()),
        y: top,
        width: contour.width() as f64,
        height: contour.height() as f64,
    });

    let longest = cell.text.lines().max_by_key(|line| line.chars().count()).unwrap_or("");
    let font_size = guess_font_size(longest, contour.width());
    if font_size == 0 {
        return;
    }
    for (row, line) in cell.text.lines().enumerate() {
        let baseline = top + f64::from(font_size) * (row + 1) as f64;
        elements.push(Drawable::Text {
            x: i64::from(contour.x0()),
            y: baseline as i64,
            content: line.to_string(),
            font_size,
        });
    }
}

/// Compose the pages, render them, and write the result to `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display(), pages = pages.len()))]
pub fn render_document(
    pages: &[PageText],
    page_cells: Option<&[Vec<DetectedCell>]>,
    renderer: &impl LayoutRenderer,
    path: impl AsRef<Path>,
) -> Result<()> {
    let composition = compose_pages(pages, page_cells)?;
    let bytes = renderer.render(&composition)?;
    std::fs::write(path.as_ref(), &bytes)?;
    info!(bytes = bytes.len(), "Layout written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablescan_core::geometry::Contour;

    fn line(text: &str, h_pos: i32, v_pos: i32) -> TextLine {
        TextLine {
            text: text.into(),
            h_pos,
            v_pos,
            width: 100,
            height: 20,
        }
    }

    fn page(lines: Vec<TextLine>) -> PageText {
        PageText {
            width: 600,
            height: 800,
            lines,
        }
    }

    fn lines_of(composition: &Composition) -> Vec<&Drawable> {
        composition
            .elements
            .iter()
            .filter(|element| matches!(element, Drawable::Line { .. }))
            .collect()
    }

    #[test]
    fn zero_pages_is_a_precondition_error() {
        let result = compose_pages(&[], None);
        assert!(matches!(result, Err(TablescanError::Precondition(_))));
    }

    #[test]
    fn mixed_page_sizes_are_rejected() {
        let mut landscape = page(Vec::new());
        landscape.width = 800;
        landscape.height = 600;
        let result = compose_pages(&[page(Vec::new()), landscape], None);
        assert!(matches!(result, Err(TablescanError::Precondition(_))));
    }

    #[test]
    fn cell_lists_must_match_pages() {
        let pages = vec![page(Vec::new()), page(Vec::new())];
        let cells = vec![Vec::new()];
        let result = compose_pages(&pages, Some(&cells));
        assert!(matches!(result, Err(TablescanError::Precondition(_))));
    }

    #[test]
    fn pages_are_stacked_vertically() {
        let pages = vec![
            page(vec![line("first", 10, 40)]),
            page(vec![line("second", 20, 50)]),
        ];
        let composition = compose_pages(&pages, None).unwrap();
        assert_eq!((composition.width, composition.height), (600.0, 1600.0));
        assert_eq!(composition.page_count, 2);

        assert_eq!(
            composition.elements[0],
            Drawable::Rect {
                x: 0.0,
                y: 0.0,
                width: 600.0,
                height: 1600.0
            },
            "background comes first"
        );
        assert_eq!(
            composition.elements[2],
            Drawable::Text {
                x: 20,
                y: 850,
                content: "second".into(),
                font_size: BODY_FONT_SIZE
            }
        );

        // Two edges plus one boundary above, between, and below the pages.
        let separators = lines_of(&composition);
        assert_eq!(separators.len(), 5);
        assert_eq!(
            separators[3],
            &Drawable::Line {
                x1: 0.0,
                y1: 800.0,
                x2: 600.0,
                y2: 800.0
            }
        );
    }

    #[test]
    fn cells_are_drawn_on_their_page() {
        let pages = vec![page(Vec::new()), page(Vec::new())];
        let cell = DetectedCell::new("ab\nabcd", Contour::new(100, 300, 50, 150).unwrap());
        let cells = vec![Vec::new(), vec![cell]];
        let composition = compose_pages(&pages, Some(&cells)).unwrap();

        assert_eq!(
            composition.elements[1],
            Drawable::Rect {
                x: 100.0,
                y: 850.0,
                width: 200.0,
                height: 100.0
            }
        );
        // 200 px over the four characters of the longest line.
        assert_eq!(
            composition.elements[2],
            Drawable::Text {
                x: 100,
                y: 900,
                content: "ab".into(),
                font_size: 50
            }
        );
        assert_eq!(
            composition.elements[3],
            Drawable::Text {
                x: 100,
                y: 950,
                content: "abcd".into(),
                font_size: 50
            }
        );
    }

    #[test]
    fn font_size_divides_width_by_characters() {
        assert_eq!(guess_font_size("abcd", 200), 50);
        assert_eq!(guess_font_size("abc", 100), 33);
        assert_eq!(guess_font_size("", 100), 0);
        assert_eq!(guess_font_size("x", 0), 0);
    }

    #[test]
    fn render_document_writes_renderer_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        render_document(&[page(vec![line("hello", 0, 0)])], None, &JsonRenderer, &path).unwrap();

        let written: Composition = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written.page_count, 1);
        assert!(written.elements.iter().any(|element| matches!(
            element,
            Drawable::Text { content, .. } if content == "hello"
        )));
    }

    #[test]
    fn render_document_rejects_empty_input_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        assert!(render_document(&[], None, &JsonRenderer, &path).is_err());
        assert!(!path.exists());
    }
}
