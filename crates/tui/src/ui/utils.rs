//! Small layout helpers shared by the view layer.

use ratatui::layout::Rect;

/// Centered rectangle with a fixed size, clamped to the enclosing area.
pub fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fixed_clamps_to_area() {
        let outer = Rect::new(0, 0, 20, 10);
        let rect = centered_fixed(40, 40, outer);
        assert_eq!(rect, outer);
    }

    #[test]
    fn centered_fixed_centers_smaller_rect() {
        let outer = Rect::new(0, 0, 20, 10);
        let rect = centered_fixed(10, 4, outer);
        assert_eq!(rect, Rect::new(5, 3, 10, 4));
    }
}
