//! Position within a move list, as driven by Home/End/arrow keys and
//! move-list clicks. Index -1 is the initial position.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCursor {
    len: usize,
    index: isize,
}

impl MoveCursor {
    pub fn new(len: usize) -> Self {
        Self { len, index: -1 }
    }

    /// Cursor at `index`, clamped to `[-1, len - 1]`.
    pub fn at(len: usize, index: isize) -> Self {
        let mut cursor = Self::new(len);
        cursor.jump(index);
        cursor
    }

    pub fn index(&self) -> isize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn last_index(&self) -> isize {
        self.len as isize - 1
    }

    pub fn jump(&mut self, index: isize) -> isize {
        self.index = index.clamp(-1, self.last_index().max(-1));
        self.index
    }

    pub fn start(&mut self) -> isize {
        self.jump(-1)
    }

    pub fn end(&mut self) -> isize {
        self.jump(self.last_index())
    }

    pub fn next(&mut self) -> isize {
        self.jump(self.index + 1)
    }

    pub fn prev(&mut self) -> isize {
        self.jump(self.index - 1)
    }

    pub fn at_start(&self) -> bool {
        self.index == -1
    }

    pub fn at_end(&self) -> bool {
        self.index == self.last_index().max(-1)
    }

    /// Move counter shown under the board, e.g. "3/14".
    pub fn counter(&self) -> String {
        format!("{}/{}", self.index + 1, self.len)
    }
}

/// Move-list prefix for the ply at `index`: "1." for white, "1..." for black.
pub fn move_number_label(index: usize) -> String {
    let number = index / 2 + 1;
    if index % 2 == 0 {
        format!("{number}.")
    } else {
        format!("{number}...")
    }
}
