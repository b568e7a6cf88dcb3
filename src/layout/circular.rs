use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Places `count` points evenly on a circle centred in a `width` x `height`
/// canvas, starting at angle zero and going counter-clockwise.
pub fn circular_layout(count: usize, width: f64, height: f64) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }
    let step = 2.0 * PI / count as f64;
    let radius = width.min(height) * 0.4;
    let (cx, cy) = (width / 2.0, height / 2.0);

    (0..count)
        .map(|i| {
            let angle = i as f64 * step;
            Position {
                x: cx + radius * angle.cos(),
                y: cy + radius * angle.sin(),
            }
        })
        .collect()
}
