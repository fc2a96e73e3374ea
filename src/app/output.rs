use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::ReportError;
use crate::metrics::CategorizedBodies;

/// Writes the categorized bodies as JSON to `path`.
///
/// An existing file is only replaced when `overwrite` is set or the user
/// confirms on stdin.
///
/// # Errors
///
/// Returns an error when the user declines, the prompt cannot be read, or
/// the report cannot be serialized or written.
pub async fn write_report(
    path: &Path,
    bodies: &CategorizedBodies,
    overwrite: bool,
) -> Result<(), ReportError> {
    let exists = tokio::fs::try_exists(path).await.unwrap_or(false);
    if exists && !overwrite && !prompt_overwrite(path.to_path_buf()).await? {
        return Err(ReportError::OverwriteDeclined {
            path: path.to_path_buf(),
        });
    }

    let json = serde_json::to_vec(bodies).map_err(|source| ReportError::Serialize { source })?;
    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = tokio::fs::File::create(path).await.map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&json).await.map_err(write_error)?;
    writer.flush().await.map_err(write_error)?;
    Ok(())
}

async fn prompt_overwrite(path: PathBuf) -> Result<bool, ReportError> {
    tokio::task::spawn_blocking(move || {
        // Stdout stays unlocked while waiting so an interrupt can still print.
        let stdin = std::io::stdin();
        confirm_overwrite(&path, &mut stdin.lock(), &mut std::io::stdout())
    })
    .await
    .map_err(|err| ReportError::Prompt {
        source: std::io::Error::other(err),
    })?
    .map_err(|source| ReportError::Prompt { source })
}

/// Asks until the answer is `y` or `n` (any case). End of input declines.
///
/// # Errors
///
/// Returns an error when reading the answer or writing the prompt fails.
pub fn confirm_overwrite<R, W>(path: &Path, input: &mut R, output: &mut W) -> std::io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "File {} exists!", path.display())?;
    let mut answer = String::new();
    loop {
        write!(output, "Overwrite file? (y/n): ")?;
        output.flush()?;

        answer.clear();
        if input.read_line(&mut answer)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("y") {
            return Ok(true);
        }
        if answer.eq_ignore_ascii_case("n") {
            return Ok(false);
        }
    }
}
