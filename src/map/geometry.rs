use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Pixels of a filled disc (region markers), row by row
pub fn disc_pixels(cx: i32, cy: i32, radius: i32) -> impl Iterator<Item = (i32, i32)> {
    (-radius..=radius).flat_map(move |dy| {
        (-radius..=radius)
            .filter(move |dx| dx * dx + dy * dy <= radius * radius)
            .map(move |dx| (cx + dx, cy + dy))
    })
}

/// Is `(px, py)` one of the [`disc_pixels`]?
pub fn disc_contains(cx: i32, cy: i32, radius: i32, px: i32, py: i32) -> bool {
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        // Top dots of every cell: 0x01 | 0x08
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_line_clipped_at_edges() {
        let mut canvas = BrailleCanvas::new(2, 1);
        draw_line(&mut canvas, -5, 0, 10, 0);
        assert_eq!(canvas.to_string(), "⠉⠉");
    }

    #[test]
    fn test_disc() {
        let mut canvas = BrailleCanvas::new(4, 2);
        for (x, y) in disc_pixels(3, 3, 2) {
            canvas.set_pixel_signed(x, y);
        }
        assert_eq!(disc_pixels(3, 3, 2).count(), 13);
        assert!(disc_pixels(3, 3, 2).all(|(x, y)| disc_contains(3, 3, 2, x, y)));
        assert!(canvas.cell(1, 0).is_some());
        assert!(canvas.cell(3, 1).is_none());
        assert!(disc_contains(3, 3, 2, 5, 3));
        assert!(!disc_contains(3, 3, 2, 5, 5));
    }
}
