//! Writing generated nodes to disk.
//!
//! Layout: `<output>/<ClassName>/<ClassName>.node.ts` and
//! `<ClassName>.node.json`.
//!
//! Both files are first written next to their targets with a `.tmp` suffix
//! and only renamed into place once both writes succeeded. A failure before
//! the renames leaves any previous output untouched; the remaining window is
//! the two renames themselves.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{GeneratorError, Result};
use crate::generator::GeneratedNode;

/// Paths of a node written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenNode {
    pub dir: PathBuf,
    pub module_path: PathBuf,
    pub manifest_path: PathBuf,
}

/// Directory a node is written to under `output_dir`.
pub fn node_dir(output_dir: &Path, node: &GeneratedNode) -> PathBuf {
    output_dir.join(&node.identifiers.class_name)
}

/// Write `node` under `output_dir`.
///
/// Fails with [`GeneratorError::OutputExists`] if the node directory already
/// exists and `force` is false.
pub async fn write_node(
    output_dir: &Path,
    node: &GeneratedNode,
    force: bool,
) -> Result<WrittenNode> {
    let dir = node_dir(output_dir, node);
    let exists = fs::try_exists(&dir)
        .await
        .map_err(|source| GeneratorError::Write {
            path: dir.clone(),
            source,
        })?;
    if exists {
        if !force {
            return Err(GeneratorError::OutputExists(dir));
        }
        warn!(
            target: "nodegen::output",
            dir = %dir.display(),
            "Overwriting existing node directory"
        );
    }

    fs::create_dir_all(&dir)
        .await
        .map_err(|source| GeneratorError::Write {
            path: dir.clone(),
            source,
        })?;

    let module_path = dir.join(node.module_file_name());
    let manifest_path = dir.join(node.manifest_file_name());
    let module_tmp = temp_path(&module_path);
    let manifest_tmp = temp_path(&manifest_path);

    write_file(&module_tmp, &node.module_source).await?;
    if let Err(err) = write_file(&manifest_tmp, &node.manifest).await {
        discard(&module_tmp).await;
        return Err(err);
    }

    if let Err(err) = rename(&module_tmp, &module_path).await {
        discard(&module_tmp).await;
        discard(&manifest_tmp).await;
        return Err(err);
    }
    if let Err(err) = rename(&manifest_tmp, &manifest_path).await {
        discard(&manifest_tmp).await;
        return Err(err);
    }

    debug!(
        target: "nodegen::output",
        module = %module_path.display(),
        manifest = %manifest_path.display(),
        "Wrote node files"
    );
    Ok(WrittenNode {
        dir,
        module_path,
        manifest_path,
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

async fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .await
        .map_err(|source| GeneratorError::Write {
            path: path.to_path_buf(),
            source,
        })
}

async fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to)
        .await
        .map_err(|source| GeneratorError::Write {
            path: to.to_path_buf(),
            source,
        })
}

/// Best-effort removal of a temp file.
async fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        debug!(
            target: "nodegen::output",
            path = %path.display(), error = %e,
            "Could not remove temp file"
        );
    }
}
