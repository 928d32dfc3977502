//! Rebuilds text rows and cells from glyph positions.
//!
//! pdf-extract's plain-text output collapses every horizontal gap to one
//! space, which loses column boundaries. Collecting the glyphs ourselves keeps
//! the x positions, so a wide gap can start a new cell.

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};

/// Glyphs closer than this (in ems) vertically share a line.
const LINE_TOLERANCE_EM: f64 = 0.5;
/// A horizontal gap wider than this (in ems) starts a new cell.
const CELL_GAP_EM: f64 = 1.0;
/// A gap wider than this (in ems) without a space glyph still splits words.
const WORD_GAP_EM: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Glyph {
    pub x: f64,
    pub y: f64,
    pub end: f64,
    pub size: f64,
    pub text: String,
}

/// Glyphs of one page in user space (y grows upwards).
#[derive(Debug, Default)]
pub(super) struct PageLayout {
    glyphs: Vec<Glyph>,
}

impl PageLayout {
    #[cfg(test)]
    pub fn from_glyphs(glyphs: Vec<Glyph>) -> Self {
        Self { glyphs }
    }

    /// Lines top to bottom, each split into cells left to right.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let mut glyphs: Vec<&Glyph> = self.glyphs.iter().collect();
        glyphs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut lines: Vec<Vec<&Glyph>> = Vec::new();
        for glyph in glyphs {
            match lines.last_mut() {
                Some(line) if (line[0].y - glyph.y).abs() <= line[0].size * LINE_TOLERANCE_EM => {
                    line.push(glyph)
                }
                _ => lines.push(vec![glyph]),
            }
        }

        lines
            .into_iter()
            .map(|mut line| {
                line.sort_by(|a, b| a.x.total_cmp(&b.x));
                line_cells(&line)
            })
            .filter(|cells| !cells.is_empty())
            .collect()
    }
}

fn line_cells(line: &[&Glyph]) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut last_end: Option<f64> = None;
    let mut pending_space = false;

    for glyph in line {
        if glyph.text.trim().is_empty() {
            pending_space = true;
            continue;
        }
        if let Some(end) = last_end {
            let gap = glyph.x - end;
            if gap > glyph.size * CELL_GAP_EM {
                cells.push(std::mem::take(&mut current));
            } else if pending_space || gap > glyph.size * WORD_GAP_EM {
                current.push(' ');
            }
        }
        current.push_str(&glyph.text);
        last_end = Some(glyph.end.max(last_end.unwrap_or(f64::MIN)));
        pending_space = false;
    }
    if !current.is_empty() {
        cells.push(current);
    }
    cells
}

impl OutputDev for PageLayout {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.glyphs.clear();
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        let scale_x = font_size * (trm.m11 + trm.m21);
        let scale_y = font_size * (trm.m12 + trm.m22);
        let size = (scale_x * scale_y).abs().sqrt().max(1.0);
        let x = trm.m31;
        self.glyphs.push(Glyph {
            x,
            y: trm.m32,
            end: x + width * size,
            size,
            text: char.to_string(),
        });
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lays out `text` from `x` at 10pt with a fixed half-em advance.
    fn word(x: f64, y: f64, text: &str) -> Vec<Glyph> {
        text.chars()
            .enumerate()
            .map(|(i, c)| {
                let start = x + i as f64 * 5.0;
                Glyph { x: start, y, end: start + 5.0, size: 10.0, text: c.to_string() }
            })
            .collect()
    }

    #[test]
    fn test_wide_gaps_split_cells() {
        let mut glyphs = word(50.0, 700.0, "2023-01-15");
        glyphs.extend(word(200.0, 700.0, "Corner Cafe"));
        glyphs.extend(word(450.0, 700.0, "5.75"));
        let rows = PageLayout::from_glyphs(glyphs).rows();
        assert_eq!(rows, vec![vec!["2023-01-15", "Corner Cafe", "5.75"]]);
    }

    #[test]
    fn test_lines_ordered_top_down() {
        let mut glyphs = word(50.0, 680.0, "second");
        glyphs.extend(word(50.0, 700.0, "first"));
        // Slight baseline jitter stays on the same line.
        glyphs.extend(word(200.0, 681.5, "row"));
        let rows = PageLayout::from_glyphs(glyphs).rows();
        assert_eq!(rows, vec![vec!["first"], vec!["second", "row"]]);
    }

    #[test]
    fn test_small_gap_without_space_glyph_is_a_word_break() {
        let mut glyphs = word(50.0, 700.0, "Shell");
        glyphs.extend(word(78.0, 700.0, "Gas"));
        let rows = PageLayout::from_glyphs(glyphs).rows();
        assert_eq!(rows, vec![vec!["Shell Gas"]]);
    }

    #[test]
    fn test_glyph_order_within_line_does_not_matter() {
        let mut glyphs = word(300.0, 700.0, "42.10");
        glyphs.extend(word(50.0, 700.0, "2023-01-16"));
        let rows = PageLayout::from_glyphs(glyphs).rows();
        assert_eq!(rows, vec![vec!["2023-01-16", "42.10"]]);
    }

    #[test]
    fn test_blank_layout_has_no_rows() {
        let rows = PageLayout::from_glyphs(word(50.0, 700.0, "   ")).rows();
        assert!(rows.is_empty());
    }
}
