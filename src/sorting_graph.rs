use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    style::Print,
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use crate::config::MAX_VALUE;
use crate::sorting_algorithms::Element;

const HEIGHT: i32 = 25;
// Past this many bars the wide "[x]" columns no longer fit a terminal
const NARROW_COLUMNS_FROM: usize = 34;
const CODE_GAP: &str = "    ";

/// The role a bar is drawn with when several flags are set at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Current,
    SecondaryCurrent,
    Pivot,
    Sorted,
    Plain,
}

impl Role {
    /// current > secondary current > pivot > sorted
    pub fn of(element: &Element) -> Role {
        if element.current {
            Role::Current
        } else if element.secondary_current {
            Role::SecondaryCurrent
        } else if element.pivot {
            Role::Pivot
        } else if element.sorted {
            Role::Sorted
        } else {
            Role::Plain
        }
    }

    fn paint(self, symbol: &str) -> ColoredString {
        match self {
            Role::Current => symbol.bright_yellow(),
            Role::SecondaryCurrent => symbol.bright_red(),
            Role::Pivot => symbol.blue(),
            Role::Sorted => symbol.green(),
            Role::Plain => symbol.white(),
        }
    }
}

/// Draws frames as vertical bars in the terminal, with the algorithm's
/// pseudocode alongside.
pub struct SortGraph {
    pub title: String,
    pub max_height: i32,
    pub height: i32,
    pseudocode: Vec<String>,
}

impl SortGraph {
    pub fn new(title: &str) -> Self {
        SortGraph {
            title: title.to_string(),
            max_height: MAX_VALUE,
            height: HEIGHT,
            pseudocode: Vec::new(),
        }
    }

    /// Text shown to the right of the bars, one line per row from the top.
    pub fn with_pseudocode(mut self, pseudocode: &str) -> Self {
        self.pseudocode = pseudocode.lines().map(str::to_string).collect();
        self
    }

    /// Rows a value fills, rounded up so every positive value shows.
    fn bar_rows(&self, value: i32) -> i32 {
        if value <= 0 {
            return 0;
        }
        (value * self.height + self.max_height - 1) / self.max_height
    }

    /// Builds the frame: a title line followed by `height` rows of bars, or
    /// more if the pseudocode runs longer.
    pub fn render(&self, elements: &[Element]) -> String {
        let (filled, empty) = if elements.len() >= NARROW_COLUMNS_FROM {
            ("x", " ")
        } else {
            ("[x]", "   ")
        };

        let rows = (self.height as usize).max(self.pseudocode.len());
        let mut buffer = String::new();
        buffer.push_str(&format!("{}\n", self.title));
        for y in 0..rows {
            let level = self.height - y as i32;
            for element in elements {
                if level > 0 && self.bar_rows(element.value) >= level {
                    buffer += &format!("{}", Role::of(element).paint(filled));
                } else {
                    buffer.push_str(empty);
                }
            }
            if let Some(line) = self.pseudocode.get(y) {
                buffer.push_str(CODE_GAP);
                buffer.push_str(line);
            }
            buffer.push('\n');
        }
        buffer
    }

    /// Redraws the frame in place with an optional status line underneath.
    pub fn display(&self, elements: &[Element], status: Option<&str>) -> io::Result<()> {
        let mut stdout = io::stdout();
        // Hide the cursor to avoid flickering
        stdout.queue(Hide)?;
        stdout.queue(MoveTo(0, 0))?;
        stdout.queue(Clear(ClearType::FromCursorDown))?;

        let frame = self.render(elements);
        let mut row = 0u16;
        for line in frame.lines() {
            stdout.queue(MoveTo(0, row))?;
            stdout.queue(Print(line))?;
            row += 1;
        }
        if let Some(status) = status {
            stdout.queue(MoveTo(0, row))?;
            stdout.queue(Print(status))?;
        }

        stdout.queue(Show)?;
        stdout.flush()
    }

    pub fn clear_screen() -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.queue(Clear(ClearType::All))?;
        stdout.queue(MoveTo(0, 0))?;
        stdout.flush()
    }
}
