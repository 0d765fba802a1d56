//! Filesystem side of a run: writing rendered files and running the
//! formatter over the output tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::codegen::go_model::RenderedFile;
use crate::error::{CodegenError, Result};

/// Write content to a file, creating parent directories if needed.
/// An existing file is replaced.
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
    let path = path.as_ref();

    // create_dir_all tolerates directories that already exist or appear concurrently
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, contents)
}

/// Write every rendered file below `root`, in order, and return the paths
/// written. Stops at the first failure; files already written stay.
pub fn write_files(root: &Path, files: &[RenderedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = root.join(&file.path);
        write_file(&path, &file.content).map_err(|source| CodegenError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = file.content.len(), "wrote file");
        written.push(path);
    }
    Ok(written)
}

/// Run `formatter` (argv) with `root` appended. An empty argv is a no-op.
pub fn run_formatter(formatter: &[String], root: &Path) -> Result<()> {
    let Some((program, args)) = formatter.split_first() else {
        return Ok(());
    };
    let command = format!("{} {}", formatter.join(" "), root.display());
    tracing::info!(command = %command, "running formatter");

    let status = Command::new(program)
        .args(args)
        .arg(root)
        .status()
        .map_err(|source| CodegenError::FormatterSpawn {
            command: command.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(CodegenError::FormatterFailed { command, status })
    }
}

/// Write all files, then format the whole tree. A formatter failure is
/// reported even though the files are already on disk.
pub fn emit(root: &Path, files: &[RenderedFile], formatter: &[String]) -> Result<Vec<PathBuf>> {
    let written = write_files(root, files)?;
    run_formatter(formatter, root)?;
    Ok(written)
}
