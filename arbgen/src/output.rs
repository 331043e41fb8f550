//! Output artifact placement and writing.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::Error, scan::FilePattern};

/// Where the artifact for one identifier goes, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLayout {
    /// `<output>/<dir_prefix><identifier>/<file_name>`, as Android resource
    /// qualifiers (`values-fr/strings.xml`).
    ResourceDirectory { dir_prefix: String, file_name: String },
    /// `<output>/<prefix><identifier>.<extension>`, reusing the input prefix.
    FlatFile { extension: String },
}

impl OutputLayout {
    pub fn android_values() -> Self {
        OutputLayout::ResourceDirectory {
            dir_prefix: "values-".to_string(),
            file_name: "strings.xml".to_string(),
        }
    }

    pub fn json_assets() -> Self {
        OutputLayout::FlatFile {
            extension: "json".to_string(),
        }
    }

    /// Resolves the directory and file name of the artifact for `identifier`.
    pub fn target(
        &self,
        output_dir: &Path,
        pattern: &FilePattern,
        identifier: &str,
    ) -> ArtifactTarget {
        match self {
            OutputLayout::ResourceDirectory {
                dir_prefix,
                file_name,
            } => ArtifactTarget {
                dir: output_dir.join(format!("{}{}", dir_prefix, identifier)),
                file_name: file_name.clone(),
            },
            OutputLayout::FlatFile { extension } => ArtifactTarget {
                dir: output_dir.to_path_buf(),
                file_name: format!("{}{}.{}", pattern.prefix, identifier, extension),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactTarget {
    pub dir: PathBuf,
    pub file_name: String,
}

impl ArtifactTarget {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Writes `contents` to `dir/file_name`, creating `dir` first.
///
/// An existing file is overwritten. Returns the written path.
pub fn write_artifact(dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf, Error> {
    fs::create_dir_all(dir).map_err(|source| Error::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(file_name);
    fs::write(&path, contents).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
