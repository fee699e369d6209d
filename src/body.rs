use crate::coord::Coord;

#[derive(Clone, Copy, Debug)]
struct Segment {
    coord: Coord,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Ordered chain of segments from head (front) to tail (back).
///
/// Segments live in an arena and link to each other by slot index. Slots
/// freed by a pop are handed out again by the next push, so a long run
/// doesn't keep growing the arena. `head` is `None` exactly when `tail` is.
#[derive(Clone, Debug, Default)]
pub struct Body {
    slots: Vec<Option<Segment>>,
    free_slots: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl Body {
    pub fn new() -> Self {
        Body::default()
    }

    /// A body holding one segment at `coord`.
    pub fn spawn(coord: Coord) -> Self {
        let mut body = Body::new();
        body.push_front(coord);
        body
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn front(&self) -> Option<Coord> {
        self.head.map(|index| self.segment(index).coord)
    }

    pub fn back(&self) -> Option<Coord> {
        self.tail.map(|index| self.segment(index).coord)
    }

    pub fn push_front(&mut self, coord: Coord) {
        let index = self.alloc(Segment {
            coord,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => self.segment_mut(old_head).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.len += 1;
    }

    pub fn push_back(&mut self, coord: Coord) {
        let Some(old_tail) = self.tail else {
            self.push_front(coord);
            return;
        };
        let index = self.alloc(Segment {
            coord,
            prev: Some(old_tail),
            next: None,
        });
        self.segment_mut(old_tail).next = Some(index);
        self.tail = Some(index);
        self.len += 1;
    }

    pub fn pop_front(&mut self) -> Option<Coord> {
        let index = self.head?;
        let segment = self.release(index);
        match segment.next {
            Some(next) => self.segment_mut(next).prev = None,
            None => self.tail = None,
        }
        self.head = segment.next;
        self.len -= 1;
        Some(segment.coord)
    }

    pub fn pop_back(&mut self) -> Option<Coord> {
        let index = self.tail?;
        let segment = self.release(index);
        match segment.prev {
            Some(prev) => self.segment_mut(prev).next = None,
            None => self.head = None,
        }
        self.tail = segment.prev;
        self.len -= 1;
        Some(segment.coord)
    }

    pub fn member(&self, coord: Coord) -> bool {
        let mut cursor = self.cursor();
        while cursor.advance() {
            if cursor.get() == Some(coord) {
                return true;
            }
        }
        false
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_slots.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// A cursor parked *before* the head. It must be advanced once before
    /// `get` yields the head; collision checks lean on this to skip it.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            body: self,
            started: false,
            current: None,
        }
    }

    /// Head-to-tail iteration for callers that don't need the cursor.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            body: self,
            next: self.head,
        }
    }

    fn segment(&self, index: usize) -> &Segment {
        self.slots[index]
            .as_ref()
            .expect("linked slot must be occupied")
    }

    fn segment_mut(&mut self, index: usize) -> &mut Segment {
        self.slots[index]
            .as_mut()
            .expect("linked slot must be occupied")
    }

    fn alloc(&mut self, segment: Segment) -> usize {
        match self.free_slots.pop() {
            Some(index) => {
                self.slots[index] = Some(segment);
                index
            }
            None => {
                self.slots.push(Some(segment));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, index: usize) -> Segment {
        let segment = self.slots[index]
            .take()
            .expect("linked slot must be occupied");
        self.free_slots.push(index);
        segment
    }
}

impl<'a> IntoIterator for &'a Body {
    type Item = Coord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Restartable head-to-tail cursor over a [`Body`].
///
/// A fresh (or reset) cursor sits before the first segment: `get` returns
/// `None` until `advance` has returned `true` once.
pub struct Cursor<'a> {
    body: &'a Body,
    started: bool,
    current: Option<usize>,
}

impl Cursor<'_> {
    /// Moves to the next segment. Returns `false` once past the tail.
    pub fn advance(&mut self) -> bool {
        let next = if self.started {
            match self.current {
                Some(index) => self.body.segment(index).next,
                None => None,
            }
        } else {
            self.body.head
        };
        self.started = true;
        match next {
            Some(index) => {
                self.current = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self) -> Option<Coord> {
        if !self.started {
            return None;
        }
        self.current.map(|index| self.body.segment(index).coord)
    }

    pub fn reset(&mut self) {
        self.started = false;
        self.current = None;
    }
}

pub struct Iter<'a> {
    body: &'a Body,
    next: Option<usize>,
}

impl Iterator for Iter<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let segment = self.body.segment(self.next?);
        self.next = segment.next;
        Some(segment.coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    /// Walks the chain both ways and checks it agrees with `len`.
    fn assert_linked(body: &Body) {
        assert_eq!(body.head.is_none(), body.tail.is_none());
        assert_eq!(body.is_empty(), body.len() == 0);

        let mut forward = Vec::new();
        let mut cursor = body.head;
        while let Some(index) = cursor {
            forward.push(index);
            cursor = body.segment(index).next;
        }
        assert_eq!(forward.last().copied(), body.tail);

        let mut backward = Vec::new();
        let mut cursor = body.tail;
        while let Some(index) = cursor {
            backward.push(index);
            cursor = body.segment(index).prev;
        }
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), body.len());
    }

    #[test]
    fn test_empty() {
        let mut body = Body::new();
        assert_eq!(body.pop_back(), None);
        assert_eq!(body.pop_front(), None);
        assert_eq!(body.front(), None);
        assert_eq!(body.back(), None);
        assert!(body.is_empty());
        assert_linked(&body);
    }

    #[test]
    fn test_push_back() {
        let mut body = Body::new();
        body.push_back(c(1, 1));
        assert_eq!(body.front(), Some(c(1, 1)));
        assert_eq!(body.back(), Some(c(1, 1)));
        body.push_back(c(2, 2));
        assert_eq!(body.front(), Some(c(1, 1)));
        assert_eq!(body.back(), Some(c(2, 2)));
        body.push_back(c(3, 3));
        assert_eq!(body.front(), Some(c(1, 1)));
        assert_eq!(body.back(), Some(c(3, 3)));
        assert_linked(&body);
    }

    #[test]
    fn test_push_front() {
        let mut body = Body::new();
        body.push_front(c(1, 1));
        assert_eq!(body.front(), Some(c(1, 1)));
        assert_eq!(body.back(), Some(c(1, 1)));
        body.push_front(c(2, 2));
        assert_eq!(body.front(), Some(c(2, 2)));
        assert_eq!(body.back(), Some(c(1, 1)));
        body.push_front(c(3, 3));
        assert_eq!(body.front(), Some(c(3, 3)));
        assert_eq!(body.back(), Some(c(1, 1)));
        assert_linked(&body);
    }

    #[test]
    fn test_mixed_pops() {
        let mut body = Body::new();
        body.push_front(c(1, 1));
        body.push_back(c(2, 2));
        body.push_back(c(3, 3));

        assert_eq!(body.pop_back(), Some(c(3, 3)));
        assert_eq!(body.front(), Some(c(1, 1)));
        assert_eq!(body.back(), Some(c(2, 2)));

        assert_eq!(body.pop_front(), Some(c(1, 1)));
        assert_eq!(body.front(), Some(c(2, 2)));
        assert_eq!(body.back(), Some(c(2, 2)));

        assert_eq!(body.pop_front(), Some(c(2, 2)));
        assert!(body.is_empty());
        assert_linked(&body);

        assert_eq!(body.pop_back(), None);
        assert_eq!(body.pop_front(), None);
        assert_eq!(body.front(), None);
        assert_eq!(body.back(), None);
    }

    #[test]
    fn test_push_back_then_pop_back_restores_ends() {
        let mut body = Body::new();
        body.push_front(c(4, 4));
        body.push_front(c(5, 4));
        let (front, back) = (body.front(), body.back());

        body.push_back(c(3, 4));
        assert_eq!(body.pop_back(), Some(c(3, 4)));
        assert_eq!(body.front(), front);
        assert_eq!(body.back(), back);
        assert_linked(&body);
    }

    #[test]
    fn test_pop_only_segment_clears_both_ends() {
        let mut body = Body::spawn(c(7, 2));
        assert_eq!(body.pop_back(), Some(c(7, 2)));
        assert_eq!(body.front(), None);
        assert_eq!(body.back(), None);
        assert_linked(&body);
    }

    #[test]
    fn test_member() {
        let mut body = Body::new();
        assert!(!body.member(c(0, 0)));
        body.push_front(c(0, 0));
        body.push_back(c(0, 1));
        body.push_back(c(0, 2));
        assert!(body.member(c(0, 0)));
        assert!(body.member(c(0, 2)));
        assert!(!body.member(c(1, 1)));
    }

    #[test]
    fn test_cursor_must_advance_before_get() {
        let mut body = Body::new();
        body.push_back(c(1, 0));
        body.push_back(c(2, 0));

        let mut cursor = body.cursor();
        assert_eq!(cursor.get(), None);
        assert!(cursor.advance());
        assert_eq!(cursor.get(), Some(c(1, 0)));
        assert!(cursor.advance());
        assert_eq!(cursor.get(), Some(c(2, 0)));
        assert!(!cursor.advance());
        assert!(!cursor.advance());

        cursor.reset();
        assert_eq!(cursor.get(), None);
        assert!(cursor.advance());
        assert_eq!(cursor.get(), Some(c(1, 0)));
    }

    #[test]
    fn test_cursor_on_empty_body() {
        let body = Body::new();
        let mut cursor = body.cursor();
        assert!(!cursor.advance());
        assert_eq!(cursor.get(), None);
    }

    #[test]
    fn test_iter_runs_head_to_tail() {
        let mut body = Body::new();
        body.push_front(c(2, 0));
        body.push_front(c(1, 0));
        body.push_back(c(3, 0));
        let coords: Vec<Coord> = body.iter().collect();
        assert_eq!(coords, vec![c(1, 0), c(2, 0), c(3, 0)]);
        assert_eq!(body.iter().count(), body.len());
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut body = Body::spawn(c(0, 0));
        for x in 1..100 {
            body.push_front(c(x, 0));
            body.pop_back();
        }
        assert_eq!(body.len(), 1);
        assert_eq!(body.front(), Some(c(99, 0)));
        assert!(body.slots.len() <= 2);
        assert_linked(&body);
    }

    #[test]
    fn test_arbitrary_operation_sequence_keeps_links() {
        let mut body = Body::new();
        let mut model = std::collections::VecDeque::new();
        for step in 0..200i32 {
            let coord = c(step, step % 7);
            match step % 5 {
                0 | 3 => {
                    body.push_front(coord);
                    model.push_front(coord);
                }
                1 => {
                    body.push_back(coord);
                    model.push_back(coord);
                }
                2 => assert_eq!(body.pop_back(), model.pop_back()),
                _ => assert_eq!(body.pop_front(), model.pop_front()),
            }
            assert_linked(&body);
            assert_eq!(body.front(), model.front().copied());
            assert_eq!(body.back(), model.back().copied());
        }
        assert!(body.iter().eq(model.iter().copied()));
    }

    #[test]
    fn test_clear() {
        let mut body = Body::spawn(c(1, 1));
        body.push_back(c(1, 2));
        body.clear();
        assert!(body.is_empty());
        assert_eq!(body.len(), 0);
        assert_linked(&body);
    }
}
