use strum::Display;

/// Colours understood by the chat front-end, written as `{name}` tags.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Colour {
    Green,
    Red,
    Blue,
    Orange,
    Magenta,
    Cyan,
    Yellow,
}

const PALETTE: [Colour; 7] = [
    Colour::Green,
    Colour::Red,
    Colour::Blue,
    Colour::Orange,
    Colour::Magenta,
    Colour::Cyan,
    Colour::Yellow,
];

/// Wraps every item in a colour tag, cycling through the palette by position.
pub fn colour_tag<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .zip(PALETTE.iter().cycle())
        .map(|(item, colour)| format!("{{{colour}}}{}{{clear}}", item.as_ref()))
        .collect()
}
