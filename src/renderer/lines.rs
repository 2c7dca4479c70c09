//! Line operations on rendered segments.
//!
//! All positions are terminal cells, not bytes or chars. A double-width
//! character cut in half becomes a space on each side of the cut.

use crate::types::{Line, Segment, Style};

/// Total cell width of a line.
pub fn cell_length(line: &[Segment]) -> usize {
    line.iter().map(Segment::cell_length).sum()
}

/// A line of `width` blank cells.
pub fn blank(width: usize, style: Style) -> Line {
    if width == 0 {
        Vec::new()
    } else {
        vec![Segment::blank(width, style)]
    }
}

/// Divide a line at ascending cell positions.
///
/// Returns one line per cut, covering `[previous cut, cut)`; the first
/// starts at cell 0. Content past the last cut is dropped and cuts past the
/// end of the line give empty lines.
pub fn divide(line: &[Segment], cuts: &[usize]) -> Vec<Line> {
    let mut lines = Vec::with_capacity(cuts.len());
    let mut current: Line = Vec::new();
    let mut position = 0;
    let mut cuts = cuts.iter().copied();
    let Some(mut cut) = cuts.next() else {
        return lines;
    };

    for segment in line {
        let mut segment = segment.clone();
        loop {
            let end = position + segment.cell_length();
            if end <= cut {
                if !segment.text.is_empty() {
                    current.push(segment);
                }
                position = end;
                break;
            }
            let (left, right) = segment.split_cells(cut.saturating_sub(position));
            if !left.text.is_empty() {
                current.push(left);
            }
            lines.push(std::mem::take(&mut current));
            position = position.max(cut);
            segment = right;
            match cuts.next() {
                Some(next) => cut = next,
                None => return lines,
            }
        }
    }

    lines.push(current);
    lines.extend(cuts.map(|_| Vec::new()));
    lines
}

/// The cells `[start, end)` of a line.
pub fn crop(line: &[Segment], start: usize, end: usize) -> Line {
    if end <= start {
        return Vec::new();
    }
    divide(line, &[start, end]).pop().unwrap_or_default()
}

/// Pad with blanks or crop so the line is exactly `width` cells.
pub fn adjust_width(mut line: Line, width: usize, style: Style) -> Line {
    let length = cell_length(&line);
    if length < width {
        line.push(Segment::blank(width - length, style));
        line
    } else if length > width {
        crop(&line, 0, width)
    } else {
        line
    }
}

/// Merge adjacent segments with the same style.
pub fn simplify(line: Line) -> Line {
    let mut simplified: Line = Vec::with_capacity(line.len());
    for segment in line {
        if segment.text.is_empty() {
            continue;
        }
        match simplified.last_mut() {
            Some(last) if last.style == segment.style => last.text.push_str(&segment.text),
            _ => simplified.push(segment),
        }
    }
    simplified
}

/// Plain text of a line, styles dropped.
pub fn line_text(line: &[Segment]) -> String {
    line.iter().map(|segment| segment.text.as_str()).collect()
}
