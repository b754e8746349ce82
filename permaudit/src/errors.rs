//! User-facing error display.
//!
//! Formats anyhow errors with their causal chain and an actionable hint taken
//! from the first settings or scan error in the chain.

use std::io::Write;

use claude_settings::SettingsError;

use crate::scanner::ScanError;
use crate::style;

/// Display a user-facing error on stderr.
///
/// Format:
///   error: top-level message
///     caused by: chain item
///
///   hint: actionable suggestion (if available)
///
/// Without `verbose` a deeper chain gets a pointer to `--verbose`; with it,
/// the full Debug representation is appended.
pub fn display_error(err: &anyhow::Error, verbose: bool) {
    let mut stderr = std::io::stderr().lock();
    let _ = write_error(&mut stderr, err, verbose);
}

fn write_error(out: &mut impl Write, err: &anyhow::Error, verbose: bool) -> std::io::Result<()> {
    writeln!(out, "{}: {}", style::err_red_bold("error"), err)?;

    let chain: Vec<_> = err.chain().skip(1).collect();
    if let [cause] = chain.as_slice() {
        writeln!(out, "  {}", style::err_dim(&format!("caused by: {cause}")))?;
    } else {
        for (i, cause) in chain.iter().enumerate() {
            writeln!(out, "  {}", style::err_dim(&format!("{}: {}", i + 1, cause)))?;
        }
    }

    if let Some(hint) = hint(err) {
        writeln!(out, "\n  {}: {}", style::err_cyan_bold("hint"), hint)?;
    }

    if verbose {
        writeln!(out, "\nFull error chain:\n{err:?}")?;
    } else if !chain.is_empty() {
        writeln!(out, "\n  {}", style::err_dim("run with --verbose for full details"))?;
    }
    Ok(())
}

fn hint(err: &anyhow::Error) -> Option<String> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<SettingsError>() {
            return e.help();
        }
        if let Some(e) = cause.downcast_ref::<ScanError>() {
            return e.help();
        }
        None
    })
}
