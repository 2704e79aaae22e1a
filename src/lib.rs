//! Rules engine for standard chess: legal move generation, check detection,
//! move execution with undo and a text front-end to play against a computer
//! opponent. Castling and en passant are not supported and pawns always
//! promote to a queen. For more information, see [README].
//!
//! [README]: https://github.com/caissa-dev/caissa/blob/main/README.md

pub mod chess;
pub mod strategy;

mod engine;
pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Build profile. Produced by `build.rs`.
const PROFILE: &str = include_str!(concat!(env!("OUT_DIR"), "/profile"));

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
#[must_use]
pub fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {}, profile {PROFILE})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the version and the repository on startup, prefixed the same way as
/// all other diagnostics of the front-end.
pub fn print_engine_info<W: std::io::Write>(output: &mut W) -> std::io::Result<()> {
    writeln!(
        output,
        "info string {} {}",
        env!("CARGO_PKG_NAME"),
        engine_version()
    )?;
    writeln!(output, "info string <{}>", env!("CARGO_PKG_REPOSITORY"))?;
    if !shadow_rs::git_clean() {
        writeln!(output, "info string built with uncommitted changes")?;
    }
    Ok(())
}
