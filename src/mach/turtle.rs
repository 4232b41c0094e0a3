use super::sink::{Graphic, Point};

/// ## Turtle state
///
/// Heading 0 points north and grows clockwise, in degrees.

#[derive(Debug, Clone, PartialEq)]
pub struct Turtle {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub pen_down: bool,
    pub color: String,
    pub width: f64,
    pub visible: bool,
}

impl Default for Turtle {
    fn default() -> Turtle {
        Turtle {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            pen_down: true,
            color: "black".to_string(),
            width: 1.0,
            visible: true,
        }
    }
}

impl Turtle {
    pub fn position(&self) -> Point {
        (self.x, self.y)
    }

    /// Move along the heading. Returns the segment drawn, if the pen is down.
    pub fn forward(&mut self, distance: f64) -> Option<Graphic> {
        let radians = self.heading.to_radians();
        let to = (
            round(self.x + distance * radians.sin()),
            round(self.y + distance * radians.cos()),
        );
        self.move_to(to)
    }

    pub fn turn(&mut self, degrees: f64) {
        self.heading = (self.heading + degrees).rem_euclid(360.0);
    }

    pub fn move_to(&mut self, to: Point) -> Option<Graphic> {
        let from = self.position();
        self.x = to.0;
        self.y = to.1;
        if self.pen_down {
            Some(Graphic::Line {
                from,
                to,
                color: self.color.clone(),
                width: self.width,
            })
        } else {
            None
        }
    }

    /// Back to the origin facing north, without drawing.
    pub fn home(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.heading = 0.0;
    }

    pub fn reset(&mut self) {
        *self = Turtle {
            visible: self.visible,
            ..Turtle::default()
        };
    }

    pub fn sprite(&self) -> Graphic {
        Graphic::Turtle {
            at: self.position(),
            heading: self.heading,
            visible: self.visible,
        }
    }
}

// Keep 90-degree moves on exact integers.
fn round(n: f64) -> f64 {
    let r = n.round();
    if (n - r).abs() < 1e-9 {
        r
    } else {
        n
    }
}
