use crate::config::get_config;
use colored::{Color, Colorize};

/// Colorize log output, but only when writing to a terminal.
pub trait MaybeColorize {
    fn green(&self) -> String;
    fn red(&self) -> String;
    fn yellow(&self) -> String;
}

fn paint(text: &str, color: Color, tty: bool) -> String {
    if tty {
        Colorize::color(text, color).to_string()
    } else {
        text.to_string()
    }
}

impl<T: AsRef<str>> MaybeColorize for T {
    fn green(&self) -> String {
        paint(self.as_ref(), Color::Green, get_config().general.tty)
    }

    fn red(&self) -> String {
        paint(self.as_ref(), Color::Red, get_config().general.tty)
    }

    fn yellow(&self) -> String {
        paint(self.as_ref(), Color::Yellow, get_config().general.tty)
    }
}
