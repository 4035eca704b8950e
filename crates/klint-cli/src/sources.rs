//! Source discovery for `klint lint`.

use anyhow::{bail, Context, Result};
use glob::Pattern;
use klint::SourceFile;
use std::path::{Path, PathBuf};

/// Collects the files to lint under `paths`.
///
/// Directories are walked honouring `.gitignore`, keeping files whose
/// extension is in `extensions` and whose path does not match any of the
/// `exclude` globs. Paths naming a file are kept as given. The result is
/// sorted and free of duplicates.
///
/// # Errors
///
/// Returns an error for a missing path, an invalid glob or a walk failure.
pub fn discover(paths: &[PathBuf], exclude: &[String], extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let patterns = exclude
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect::<Result<Vec<_>>>()?;

    let mut files = Vec::new();
    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            bail!("No such file or directory: {}", root.display());
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder.hidden(false).git_ignore(true);

        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !has_extension(path, extensions) {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(path);
            if patterns
                .iter()
                .any(|p| p.matches_path(relative) || p.matches_path(path))
            {
                tracing::debug!("Excluded {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Reads every path into a [`SourceFile`].
///
/// # Errors
///
/// Returns an error naming the first file that cannot be read.
pub fn read_all(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    paths
        .iter()
        .map(|p| SourceFile::read(p).with_context(|| format!("Failed to read {}", p.display())))
        .collect()
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const KOTLIN: &[&str] = &["kt", "kts"];

    fn tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/main")).unwrap();
        fs::create_dir_all(root.join("build/generated")).unwrap();
        fs::write(root.join("src/main/App.kt"), "class App\n").unwrap();
        fs::write(root.join("src/main/notes.txt"), "hello\n").unwrap();
        fs::write(root.join("build.gradle.kts"), "plugins {}\n").unwrap();
        fs::write(root.join("build/generated/Gen.kt"), "class Gen\n").unwrap();
        tmp
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn keeps_kotlin_files_only() {
        let tmp = tree();
        let files = discover(&[tmp.path().to_path_buf()], &[], KOTLIN).unwrap();
        assert_eq!(
            names(tmp.path(), &files),
            vec!["build.gradle.kts", "build/generated/Gen.kt", "src/main/App.kt"]
        );
    }

    #[test]
    fn exclude_globs_match_relative_paths() {
        let tmp = tree();
        let files = discover(
            &[tmp.path().to_path_buf()],
            &["build/**".to_string()],
            KOTLIN,
        )
        .unwrap();
        assert_eq!(
            names(tmp.path(), &files),
            vec!["build.gradle.kts", "src/main/App.kt"]
        );
    }

    #[test]
    fn explicit_files_and_duplicates() {
        let tmp = tree();
        let app = tmp.path().join("src/main/App.kt");
        let files = discover(&[app.clone(), tmp.path().join("src")], &[], KOTLIN).unwrap();
        assert_eq!(files, vec![app]);
    }

    #[test]
    fn missing_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = discover(&[tmp.path().join("nope")], &[], KOTLIN).unwrap_err();
        assert!(err.to_string().contains("No such file or directory"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let tmp = tree();
        let err = discover(&[tmp.path().to_path_buf()], &["[".to_string()], KOTLIN).unwrap_err();
        assert!(err.to_string().contains("Invalid exclude pattern"));
    }

    #[test]
    fn reads_sources() {
        let tmp = tree();
        let files = discover(&[tmp.path().join("src")], &[], KOTLIN).unwrap();
        let sources = read_all(&files).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].content, "class App\n");
    }
}
