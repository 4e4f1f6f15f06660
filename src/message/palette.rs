//! mIRC colour codes.

/// Resets foreground and background colour.
pub const RESET: &str = "\x03";

/// Double bold: renders as nothing, but ends a colour code so that a `,`
/// starting the text is not read as a background colour.
const SEPARATOR: &str = "\x02\x02";

/// The sixteen standard mIRC colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
    Blue,
    Green,
    Red,
    Brown,
    Purple,
    Orange,
    Yellow,
    LightGreen,
    Teal,
    LightCyan,
    LightBlue,
    Pink,
    Grey,
    LightGrey,
}

impl Color {
    /// Returns the escape sequence selecting this colour as foreground.
    ///
    /// Always two digits, so a following digit in the text is never read as
    /// part of the code.
    pub fn code(self) -> &'static str {
        match self {
            Color::White => "\x0300",
            Color::Black => "\x0301",
            Color::Blue => "\x0302",
            Color::Green => "\x0303",
            Color::Red => "\x0304",
            Color::Brown => "\x0305",
            Color::Purple => "\x0306",
            Color::Orange => "\x0307",
            Color::Yellow => "\x0308",
            Color::LightGreen => "\x0309",
            Color::Teal => "\x0310",
            Color::LightCyan => "\x0311",
            Color::LightBlue => "\x0312",
            Color::Pink => "\x0313",
            Color::Grey => "\x0314",
            Color::LightGrey => "\x0315",
        }
    }
}

/// Which colour each kind of token is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// The `[project]` prefix.
    pub project: Color,
    /// Pushers and commit authors.
    pub person: Color,
    /// SHAs, branches, tags and counts.
    pub highlight: Color,
    /// Shortened links.
    pub link: Color,
}

impl Palette {
    pub const DEFAULT: Palette = Palette {
        project: Color::Blue,
        person: Color::Orange,
        highlight: Color::Green,
        link: Color::Pink,
    };

    /// `{RESET}[{project}name{RESET}]`
    pub fn project(&self, name: &str) -> String {
        format!("{RESET}[{}{RESET}]", paint_raw(self.project, name))
    }

    pub fn person(&self, name: &str) -> String {
        paint(self.person, name)
    }

    pub fn highlight(&self, text: &str) -> String {
        paint(self.highlight, text)
    }

    pub fn link(&self, url: &str) -> String {
        paint(self.link, url)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::DEFAULT
    }
}

fn paint(color: Color, text: &str) -> String {
    format!("{}{RESET}", paint_raw(color, text))
}

/// The colour code and the text, without the closing reset.
fn paint_raw(color: Color, text: &str) -> String {
    let separator = if text.starts_with(',') { SEPARATOR } else { "" };
    format!("{}{separator}{text}", color.code())
}
