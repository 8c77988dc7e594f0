use std::borrow::Cow;

use ratatui::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;

pub(in crate::tui) fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> Cow<'_, str> {
    const ELLIPSIS: &str = "...";
    const ELLIPSIS_GRAPHEMES: usize = 3;

    if max_graphemes == 0 {
        return Cow::Owned(String::new());
    }

    let grapheme_count = input.graphemes(true).count();
    if grapheme_count <= max_graphemes {
        return Cow::Borrowed(input);
    }

    if max_graphemes <= ELLIPSIS_GRAPHEMES {
        return Cow::Owned(input.graphemes(true).take(max_graphemes).collect());
    }

    let mut truncated: String = input.graphemes(true).take(max_graphemes - ELLIPSIS_GRAPHEMES).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

/// Centered popup rectangle: `width_percent` of the area clamped to
/// `[min_width, area.width]`, and a fixed `height` clamped to the area.
pub(in crate::tui) fn centered_popup(area: Rect, width_percent: u16, min_width: u16, height: u16) -> Rect {
    let width = (area.width.saturating_mul(width_percent) / 100)
        .max(min_width)
        .min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
