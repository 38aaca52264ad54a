use is_terminal::IsTerminal;
use supports_color::Stream;

/// Environment variable that disables color when set to a non-empty value.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

pub fn no_color_requested() -> bool {
    std::env::var_os(NO_COLOR_ENV).is_some_and(|v| !v.is_empty())
}

/// Whether human output on stdout should be colored.
pub fn stdout_color(disabled: bool) -> bool {
    if disabled || no_color_requested() || !std::io::stdout().is_terminal() {
        return false;
    }
    supports_color::on(Stream::Stdout).is_some_and(|level| level.has_basic)
}
