//! The machine tape, split at the head into two stacks.
//!
//! `left` holds the cells left of the head with the nearest cell last. `right` holds
//! the head cell and everything after it, stored reversed so the head is the last
//! element. Cells that were never visited are not stored: popping from an empty stack
//! yields a blank, which gives the tape its infinite-in-both-directions behavior.

use crate::types::{Direction, TuringMachineError, BLANK_SYMBOL, ERASED_SYMBOL};

/// How far the head may travel from where it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bound {
    /// Cells available left of the starting head position.
    left: usize,
    /// Cells available right of the starting head position, excluding it.
    right: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    left: Vec<char>,
    right: Vec<char>,
    /// Head offset from its starting cell.
    position: isize,
    bound: Option<Bound>,
}

impl Tape {
    /// Creates a tape that grows on demand, with the head on the first input symbol.
    pub fn unbounded(input: &str) -> Self {
        Self {
            left: Vec::new(),
            right: input.chars().rev().collect(),
            position: 0,
            bound: None,
        }
    }

    /// Creates a tape of `length` cells with the head in the middle.
    ///
    /// The input is copied starting at the head; symbols that do not fit before the
    /// right edge are dropped. Moving the head past either edge fails with
    /// [`TuringMachineError::TapeBoundary`].
    pub fn bounded(input: &str, length: usize) -> Self {
        let left = length / 2;
        let right = length.saturating_sub(left + 1);
        let mut cells: Vec<char> = input.chars().take(right + 1).collect();
        cells.reverse();

        Self {
            left: Vec::new(),
            right: cells,
            position: 0,
            bound: Some(Bound { left, right }),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.bound.is_some()
    }

    /// Returns the symbol under the head.
    pub fn head(&self) -> char {
        self.right.last().copied().unwrap_or(BLANK_SYMBOL)
    }

    /// Returns the head offset from its starting cell. Negative is left.
    pub fn position(&self) -> isize {
        self.position
    }

    /// Overwrites the cell under the head.
    pub fn write(&mut self, symbol: char) {
        match self.right.last_mut() {
            Some(cell) => *cell = symbol,
            None => self.right.push(symbol),
        }
    }

    /// Moves the head one cell in `direction`.
    pub fn shift(&mut self, direction: Direction) -> Result<(), TuringMachineError> {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Stay => Ok(()),
        }
    }

    pub fn move_left(&mut self) -> Result<(), TuringMachineError> {
        if let Some(bound) = self.bound {
            if self.position <= -(bound.left as isize) {
                return Err(TuringMachineError::TapeBoundary);
            }
        }

        let head = self.right.pop().unwrap_or(BLANK_SYMBOL);
        let previous = self.left.pop().unwrap_or(BLANK_SYMBOL);
        // An unvisited blank head with nothing after it does not need to be stored.
        if head != BLANK_SYMBOL || !self.right.is_empty() {
            self.right.push(head);
        }
        self.right.push(previous);
        self.position -= 1;

        Ok(())
    }

    pub fn move_right(&mut self) -> Result<(), TuringMachineError> {
        if let Some(bound) = self.bound {
            if self.position >= bound.right as isize {
                return Err(TuringMachineError::TapeBoundary);
            }
        }

        let head = self.right.pop().unwrap_or(BLANK_SYMBOL);
        self.left.push(head);
        self.position += 1;

        Ok(())
    }

    /// Returns every stored cell in tape order.
    pub fn cells(&self) -> Vec<char> {
        self.left
            .iter()
            .chain(self.right.iter().rev())
            .copied()
            .collect()
    }

    /// Renders the tape with blank and erased cells trimmed from both ends.
    ///
    /// Erased cells (`_`) mark consumed input and are trimmed like blanks.
    /// [`Tape::cells`] keeps them.
    pub fn render(&self) -> String {
        let cells: String = self.cells().into_iter().collect();
        cells
            .trim_matches(|c| c == BLANK_SYMBOL || c == ERASED_SYMBOL)
            .to_string()
    }

    /// Renders every stored cell with the head cell wrapped in brackets.
    ///
    /// ```
    /// use quintape::tape::Tape;
    ///
    /// let mut tape = Tape::unbounded("abc");
    /// tape.move_right().unwrap();
    /// assert_eq!(tape.annotated(), "a[b]c");
    /// ```
    pub fn annotated(&self) -> String {
        let mut out: String = self.left.iter().collect();
        out.push('[');
        out.push(self.head());
        out.push(']');
        out.extend(self.right.iter().rev().skip(1));
        out
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::Stay)
        ]
    }

    proptest! {
        #[test]
        fn left_then_right_returns_to_same_cell(
            input in "[a-z01 ]{0,16}",
            moves in prop::collection::vec(direction(), 0..32),
        ) {
            let mut tape = Tape::unbounded(&input);
            for direction in moves {
                tape.shift(direction).unwrap();
            }

            let head = tape.head();
            let position = tape.position();
            let cells = tape.render();

            tape.move_left().unwrap();
            tape.move_right().unwrap();

            prop_assert_eq!(tape.head(), head);
            prop_assert_eq!(tape.position(), position);
            prop_assert_eq!(tape.render(), cells);
        }

        #[test]
        fn right_then_left_returns_to_same_cell(
            input in "[a-z01 ]{0,16}",
            steps in 0usize..20,
        ) {
            let mut tape = Tape::unbounded(&input);
            for _ in 0..steps {
                tape.move_right().unwrap();
            }

            let head = tape.head();
            tape.move_right().unwrap();
            tape.move_left().unwrap();

            prop_assert_eq!(tape.head(), head);
            prop_assert_eq!(tape.position(), steps as isize);
        }

        #[test]
        fn bounded_tape_never_leaves_its_window(
            moves in prop::collection::vec(direction(), 0..256),
        ) {
            let mut tape = Tape::bounded("", 16);
            for direction in moves {
                let _ = tape.shift(direction);
                prop_assert!(tape.position() >= -8 && tape.position() <= 7);
            }
        }
    }
}
