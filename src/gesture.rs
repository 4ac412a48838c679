//! Pointer-drag to move translation.
//!
//! A press-drag-release cycle is worth a single step: the first motion sample
//! after a press decides the move (one per axis that changed), and every later
//! sample until release only tracks the pointer.
//!
//! ```text
//!            pointer_down              first pointer_move
//!   Idle ─────────────────▶ Armed ───────────────────────▶ Consumed
//!    ▲                        │                               │
//!    └──────── pointer_up ────┴────────── pointer_up ─────────┘
//! ```

use std::cmp::Ordering;

use tracing::debug;

use crate::puzzle::Direction;

/// A pointer location in host units (pixels, terminal cells, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    /// Pressed, no move issued yet.
    Armed { anchor: Point },
    /// Pressed and this press already produced its move.
    Consumed { anchor: Point },
}

impl DragSession {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragSession::Idle)
    }

    pub fn anchor(&self) -> Option<Point> {
        match *self {
            DragSession::Idle => None,
            DragSession::Armed { anchor } | DragSession::Consumed { anchor } => Some(anchor),
        }
    }
}

/// Moves produced by one motion sample. Horizontal and vertical are decided
/// independently, so a diagonal sample yields both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gesture {
    pub horizontal: Option<Direction>,
    pub vertical: Option<Direction>,
}

impl Gesture {
    /// Axis directions by comparison, so any pair of points is valid.
    fn between(from: Point, to: Point) -> Self {
        let horizontal = match to.x.cmp(&from.x) {
            Ordering::Less => Some(Direction::Left),
            Ordering::Greater => Some(Direction::Right),
            Ordering::Equal => None,
        };
        let vertical = match to.y.cmp(&from.y) {
            Ordering::Less => Some(Direction::Up),
            Ordering::Greater => Some(Direction::Down),
            Ordering::Equal => None,
        };
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }

    /// Issued directions, horizontal first.
    pub fn directions(&self) -> impl Iterator<Item = Direction> {
        self.horizontal.into_iter().chain(self.vertical)
    }
}

#[derive(Debug, Default)]
pub struct GestureTranslator {
    session: DragSession,
}

impl GestureTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> DragSession {
        self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    pub fn pointer_down(&mut self, at: Point) {
        debug!(x = at.x, y = at.y, "drag armed");
        self.session = DragSession::Armed { anchor: at };
    }

    /// Feeds one motion sample and returns the moves it issues, if any.
    pub fn pointer_move(&mut self, at: Point) -> Gesture {
        match self.session {
            DragSession::Idle => Gesture::default(),
            DragSession::Armed { anchor } => {
                let gesture = Gesture::between(anchor, at);
                debug!(?anchor, ?at, ?gesture, "drag consumed");
                self.session = DragSession::Consumed { anchor: at };
                gesture
            }
            DragSession::Consumed { .. } => {
                self.session = DragSession::Consumed { anchor: at };
                Gesture::default()
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        self.session = DragSession::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(gesture: Gesture) -> Vec<Direction> {
        gesture.directions().collect()
    }

    #[test]
    fn one_move_per_press() {
        let mut translator = GestureTranslator::new();
        translator.pointer_down(Point::new(0, 0));

        assert_eq!(collect(translator.pointer_move(Point::new(10, 0))), vec![Direction::Right]);
        assert!(translator.pointer_move(Point::new(20, 0)).is_empty());
        assert!(translator.pointer_move(Point::new(-40, 30)).is_empty());

        translator.pointer_up();
        assert_eq!(translator.session(), DragSession::Idle);
    }

    #[test]
    fn diagonal_sample_issues_both_axes() {
        let mut translator = GestureTranslator::new();
        translator.pointer_down(Point::new(0, 0));
        assert_eq!(
            collect(translator.pointer_move(Point::new(10, -10))),
            vec![Direction::Right, Direction::Up]
        );
    }

    #[test]
    fn sign_of_each_axis_picks_direction() {
        let cases = [
            ((-3, 0), vec![Direction::Left]),
            ((3, 0), vec![Direction::Right]),
            ((0, -3), vec![Direction::Up]),
            ((0, 3), vec![Direction::Down]),
            ((-1, 1), vec![Direction::Left, Direction::Down]),
        ];
        for ((x, y), expected) in cases {
            let mut translator = GestureTranslator::new();
            translator.pointer_down(Point::new(0, 0));
            assert_eq!(collect(translator.pointer_move(Point::new(x, y))), expected);
        }
    }

    #[test]
    fn stationary_first_sample_still_consumes_press() {
        let mut translator = GestureTranslator::new();
        translator.pointer_down(Point::new(5, 5));
        assert!(translator.pointer_move(Point::new(5, 5)).is_empty());
        assert!(matches!(translator.session(), DragSession::Consumed { .. }));
        assert!(translator.pointer_move(Point::new(9, 5)).is_empty());
    }

    #[test]
    fn consumed_session_tracks_anchor_silently() {
        let mut translator = GestureTranslator::new();
        translator.pointer_down(Point::new(0, 0));
        translator.pointer_move(Point::new(1, 0));
        translator.pointer_move(Point::new(7, 4));
        assert_eq!(translator.session().anchor(), Some(Point::new(7, 4)));
    }

    #[test]
    fn motion_without_press_is_ignored() {
        let mut translator = GestureTranslator::new();
        assert!(translator.pointer_move(Point::new(10, 10)).is_empty());
        assert!(!translator.is_dragging());
    }

    #[test]
    fn release_without_motion_returns_to_idle() {
        let mut translator = GestureTranslator::new();
        translator.pointer_down(Point::new(2, 2));
        assert!(translator.is_dragging());
        translator.pointer_up();
        assert!(!translator.is_dragging());
        assert_eq!(translator.session().anchor(), None);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let mut translator = GestureTranslator::new();
        translator.pointer_down(Point::new(i32::MIN, 0));
        assert_eq!(
            collect(translator.pointer_move(Point::new(i32::MAX, 0))),
            vec![Direction::Right]
        );

        translator.pointer_up();
        translator.pointer_down(Point::new(0, i32::MAX));
        assert_eq!(
            collect(translator.pointer_move(Point::new(0, i32::MIN))),
            vec![Direction::Up]
        );
    }

    #[test]
    fn new_press_rearms() {
        let mut translator = GestureTranslator::new();
        translator.pointer_down(Point::new(0, 0));
        translator.pointer_move(Point::new(1, 0));
        translator.pointer_up();

        translator.pointer_down(Point::new(0, 0));
        assert_eq!(collect(translator.pointer_move(Point::new(0, 4))), vec![Direction::Down]);
    }
}
