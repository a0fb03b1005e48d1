//! Output helpers shared by the CLI subcommands.
//!
//! Global flags are propagated through environment variables set in
//! `main` so every module can check them without threading state.

/// True when `--json` was given.
pub fn is_json() -> bool {
    std::env::var("CAMPUSDL_JSON").is_ok()
}

/// True when `--quiet` was given.
pub fn is_quiet() -> bool {
    std::env::var("CAMPUSDL_QUIET").is_ok()
}

/// Print a machine-readable JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Minimal status-symbol styling, disabled by `--no-color` or `NO_COLOR`.
pub struct Styled {
    color: bool,
}

impl Styled {
    pub fn new() -> Self {
        let color = std::env::var("CAMPUSDL_NO_COLOR").is_err()
            && std::env::var("NO_COLOR").is_err();
        Self { color }
    }

    pub fn ok_sym(&self) -> &'static str {
        if self.color {
            "\x1b[32m✓\x1b[0m"
        } else {
            "ok"
        }
    }

    pub fn warn_sym(&self) -> &'static str {
        if self.color {
            "\x1b[33m!\x1b[0m"
        } else {
            "!"
        }
    }

    pub fn err_sym(&self) -> &'static str {
        if self.color {
            "\x1b[31m✗\x1b[0m"
        } else {
            "x"
        }
    }
}
