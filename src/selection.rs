use grid_util::point::Point;
use log::debug;

/// Two-phase tile selection: the first pick sets the start, the second completes the pair
/// and empties the selection again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    start: Option<Point>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    StartSelected(Point),
    /// Both endpoints are known; the selection has been reset.
    PathRequested { start: Point, end: Point },
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }
    pub fn pick(&mut self, cell: Point) -> SelectionEvent {
        match self.start.take() {
            None => {
                debug!("start selected at {}", cell);
                self.start = Some(cell);
                SelectionEvent::StartSelected(cell)
            }
            Some(start) => SelectionEvent::PathRequested { start, end: cell },
        }
    }
    pub fn clear(&mut self) {
        self.start = None;
    }
}
