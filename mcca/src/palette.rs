//! Color-code lookup tables for terminal and Graphviz output.

/// ANSI reset sequence.
pub const RESET: &str = "\x1b[0m";

/// ANSI SGR foreground code for a color key.
pub fn ansi_code(key: i32) -> u8 {
    match key {
        1 => 94, // light blue
        2 => 92, // light green
        3 => 93, // light yellow
        4 => 35, // magenta
        5 => 91, // light red
        6 => 96, // light cyan
        7 => 32, // green
        8 => 90, // light grey
        9 => 91, // light red
        _ => 37, // white
    }
}

/// Wrap `text` in the ANSI color for `key`.
pub fn colorize(text: &str, key: i32) -> String {
    format!("\x1b[{}m{text}{RESET}", ansi_code(key))
}

/// Distinct symbol used when painting without colors.
pub fn symbol(key: i32) -> char {
    match key {
        1 => '*',
        2 => '@',
        3 => '^',
        4 => '>',
        5 => '<',
        6 => '$',
        7 => '"',
        8 => '&',
        9 => '%',
        _ => '#',
    }
}

/// Graphviz fill color name for a color key.
pub fn graphviz_color(key: i32) -> &'static str {
    match key {
        1 => "blue",
        2 => "green",
        3 => "yellow",
        4 => "magenta",
        5 => "red",
        6 => "cyan",
        7 => "green",
        8 => "gray",
        9 => "pink",
        _ => "white",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_map_to_table() {
        assert_eq!(ansi_code(1), 94);
        assert_eq!(symbol(2), '@');
        assert_eq!(graphviz_color(9), "pink");
    }

    #[test]
    fn unknown_keys_fall_back() {
        assert_eq!(ansi_code(0), 37);
        assert_eq!(symbol(42), '#');
        assert_eq!(graphviz_color(-1), "white");
    }

    #[test]
    fn colorize_wraps_text() {
        assert_eq!(colorize("3", 3), "\x1b[93m3\x1b[0m");
    }
}
